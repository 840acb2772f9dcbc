use async_trait::async_trait;
use lcu_companion_shared::FlowPhase;
use serde::Deserialize;

use crate::{
    api::traits::{LcuRequest, decode},
    types::LcuApiResponse,
};

pub const GAMEFLOW_PHASE_ROUTE: &str = "/lol-gameflow/v1/gameflow-phase";
const GAMEFLOW_SESSION_ROUTE: &str = "/lol-gameflow/v1/session";

#[async_trait]
pub trait GameflowApi: LcuRequest {
    async fn get_gameflow_phase(&self) -> LcuApiResponse<FlowPhase> {
        decode(self.get(GAMEFLOW_PHASE_ROUTE).await?)
    }

    async fn get_gameflow_session(&self) -> LcuApiResponse<GameflowSessionDto> {
        decode(self.get(GAMEFLOW_SESSION_ROUTE).await?)
    }

    /// Game mode of the ongoing session, `None` outside of a game.
    async fn get_current_game_mode(&self) -> LcuApiResponse<Option<String>> {
        Ok(self.get_gameflow_session().await?.game_mode())
    }
}

/// Representation of the game-flow session response, reduced to what the
/// companion reads.
#[derive(Deserialize, Debug, Clone, Default)]
#[serde(rename_all = "camelCase")]
pub struct GameflowSessionDto {
    #[serde(default)]
    pub phase: Option<FlowPhase>,
    #[serde(default)]
    pub map: Option<MapDto>,
    #[serde(default)]
    pub game_data: Option<GameDataDto>,
}

impl GameflowSessionDto {
    pub fn game_mode(&self) -> Option<String> {
        let from_map = self.map.as_ref().map(|m| m.game_mode.as_str());
        let from_queue = self.game_data.as_ref().map(|d| d.queue.game_mode.as_str());

        from_map
            .filter(|mode| !mode.is_empty())
            .or(from_queue.filter(|mode| !mode.is_empty()))
            .map(str::to_string)
    }
}

#[derive(Deserialize, Debug, Clone, Default)]
#[serde(rename_all = "camelCase")]
pub struct MapDto {
    #[serde(default)]
    pub game_mode: String,
}

#[derive(Deserialize, Debug, Clone, Default)]
#[serde(rename_all = "camelCase")]
pub struct GameDataDto {
    #[serde(default)]
    pub queue: QueueDto,
}

#[derive(Deserialize, Debug, Clone, Default)]
#[serde(rename_all = "camelCase")]
pub struct QueueDto {
    #[serde(default)]
    pub game_mode: String,
}

#[cfg(test)]
mod tests {
    use httpmock::prelude::*;
    use serde_json::json;

    use super::*;
    use crate::LcuClient;

    #[tokio::test]
    async fn game_mode_is_read_from_the_map() {
        let server = MockServer::start_async().await;
        server
            .mock_async(|when, then| {
                when.method(GET).path("/lol-gameflow/v1/session");
                then.status(200).json_body(json!({
                    "phase": "ChampSelect",
                    "map": {"gameMode": "ARAM", "id": 12},
                    "gameData": {"queue": {"gameMode": "ARAM"}}
                }));
            })
            .await;
        let client = LcuClient::with_base_url(server.base_url(), "t").unwrap();

        assert_eq!(
            client.get_current_game_mode().await.unwrap().as_deref(),
            Some("ARAM")
        );
    }

    #[test]
    fn game_mode_falls_back_to_the_queue() {
        let session: GameflowSessionDto = serde_json::from_value(json!({
            "map": {"gameMode": ""},
            "gameData": {"queue": {"gameMode": "CLASSIC"}}
        }))
        .unwrap();
        assert_eq!(session.game_mode().as_deref(), Some("CLASSIC"));

        let idle: GameflowSessionDto = serde_json::from_value(json!({})).unwrap();
        assert_eq!(idle.game_mode(), None);
    }

    #[tokio::test]
    async fn phase_is_decoded() {
        let server = MockServer::start_async().await;
        server
            .mock_async(|when, then| {
                when.method(GET).path(GAMEFLOW_PHASE_ROUTE);
                then.status(200).json_body(json!("ReadyCheck"));
            })
            .await;
        let client = LcuClient::with_base_url(server.base_url(), "t").unwrap();

        assert_eq!(
            client.get_gameflow_phase().await.unwrap(),
            FlowPhase::ReadyCheck
        );
    }
}
