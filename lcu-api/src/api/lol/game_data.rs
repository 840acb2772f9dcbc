use async_trait::async_trait;
use serde::Deserialize;

use crate::{
    api::traits::{LcuRequest, decode},
    types::LcuApiResponse,
};

const CHAMPION_ROUTE: &str = "/lol-game-data/assets/v1/champions";
const CHAMPION_SUMMARY_ROUTE: &str = "/lol-game-data/assets/v1/champion-summary.json";

#[async_trait]
pub trait GameDataApi: LcuRequest {
    async fn get_champion(&self, champion_id: u32) -> LcuApiResponse<ChampionDto> {
        decode(
            self.get(&format!("{}/{}.json", CHAMPION_ROUTE, champion_id))
                .await?,
        )
    }

    /// Every champion known to the client, without the `-1` placeholder entry.
    async fn get_champion_summary(&self) -> LcuApiResponse<Vec<ChampionSummaryDto>> {
        let champions: Vec<ChampionSummaryDto> = decode(self.get(CHAMPION_SUMMARY_ROUTE).await?)?;
        Ok(champions.into_iter().filter(|c| c.id > 0).collect())
    }
}

/// Representation of the champion metadata response.
#[derive(Deserialize, Debug, Clone)]
#[serde(rename_all = "camelCase")]
pub struct ChampionDto {
    pub id: u32,
    pub name: String,
    #[serde(default)]
    pub title: String,
}

impl ChampionDto {
    pub fn full_name(&self) -> String {
        if self.title.is_empty() {
            self.name.clone()
        } else {
            format!("{} {}", self.name, self.title)
        }
    }
}

#[derive(Deserialize, Debug, Clone)]
#[serde(rename_all = "camelCase")]
pub struct ChampionSummaryDto {
    pub id: i32,
    pub name: String,
}

#[cfg(test)]
mod tests {
    use httpmock::prelude::*;
    use serde_json::json;

    use super::*;
    use crate::LcuClient;

    #[tokio::test]
    async fn summary_skips_placeholder() {
        let server = MockServer::start_async().await;
        server
            .mock_async(|when, then| {
                when.method(GET)
                    .path("/lol-game-data/assets/v1/champion-summary.json");
                then.status(200).json_body(json!([
                    {"id": -1, "name": "None", "alias": "None"},
                    {"id": 1, "name": "Annie", "alias": "Annie"},
                    {"id": 22, "name": "Ashe", "alias": "Ashe"}
                ]));
            })
            .await;
        let client = LcuClient::with_base_url(server.base_url(), "t").unwrap();

        let champions = client.get_champion_summary().await.unwrap();

        assert_eq!(champions.len(), 2);
        assert_eq!(champions[1].name, "Ashe");
    }

    #[tokio::test]
    async fn champion_metadata() {
        let server = MockServer::start_async().await;
        server
            .mock_async(|when, then| {
                when.method(GET).path("/lol-game-data/assets/v1/champions/99.json");
                then.status(200).json_body(json!({
                    "id": 99, "name": "Lux", "title": "the Lady of Luminosity"
                }));
            })
            .await;
        let client = LcuClient::with_base_url(server.base_url(), "t").unwrap();

        let champion = client.get_champion(99).await.unwrap();

        assert_eq!(champion.full_name(), "Lux the Lady of Luminosity");
    }
}
