use async_trait::async_trait;
use serde::Deserialize;

use crate::{
    api::traits::{LcuRequest, decode},
    types::LcuApiResponse,
};

const CURRENT_SUMMONER_ROUTE: &str = "/lol-summoner/v1/current-summoner";
const SUMMONER_ROUTE: &str = "/lol-summoner/v1/summoners";

#[async_trait]
pub trait SummonerApi: LcuRequest {
    /// The summoner logged into the client.
    async fn get_current_summoner(&self) -> LcuApiResponse<SummonerDto> {
        tracing::trace!("[LCU::SUMMONER] get_current_summoner");
        decode(self.get(CURRENT_SUMMONER_ROUTE).await?)
    }

    async fn get_summoner(&self, summoner_id: u64) -> LcuApiResponse<SummonerDto> {
        tracing::trace!("[LCU::SUMMONER] get_summoner {}", summoner_id);
        decode(
            self.get(&format!("{}/{}", SUMMONER_ROUTE, summoner_id))
                .await?,
        )
    }
}

/// Representation of the summoner data response.
#[derive(Deserialize, Debug, Clone)]
#[serde(rename_all = "camelCase")]
pub struct SummonerDto {
    #[serde(default)]
    pub display_name: String,
    #[serde(default)]
    pub game_name: String,
    #[serde(default)]
    pub tag_line: String,
    pub puuid: String,
    pub summoner_id: u64,
}

impl SummonerDto {
    /// Name shown to other players, the Riot ID when no display name is set.
    pub fn name(&self) -> String {
        if !self.display_name.is_empty() {
            self.display_name.clone()
        } else if self.tag_line.is_empty() {
            self.game_name.clone()
        } else {
            format!("{}#{}", self.game_name, self.tag_line)
        }
    }
}
