use async_trait::async_trait;
use serde::Deserialize;
use serde_json::json;

use crate::{
    api::traits::{LcuRequest, decode},
    types::LcuApiResponse,
};

pub const CHAMP_SELECT_SESSION_ROUTE: &str = "/lol-champ-select/v1/session";
const READY_CHECK_ACCEPT_ROUTE: &str = "/lol-matchmaking/v1/ready-check/accept";

#[async_trait]
pub trait ChampSelectApi: LcuRequest {
    async fn accept_ready_check(&self) -> LcuApiResponse<()> {
        self.post(READY_CHECK_ACCEPT_ROUTE, None).await?;
        Ok(())
    }

    async fn get_champ_select_session(&self) -> LcuApiResponse<ChampSelectSessionDto> {
        decode(self.get(CHAMP_SELECT_SESSION_ROUTE).await?)
    }

    /// Take a champion from the shared bench.
    async fn swap_bench_champion(&self, champion_id: u32) -> LcuApiResponse<()> {
        tracing::debug!("[LCU::CHAMP_SELECT] bench swap {}", champion_id);
        self.post(
            &format!("{}/bench/swap/{}", CHAMP_SELECT_SESSION_ROUTE, champion_id),
            None,
        )
        .await?;
        Ok(())
    }

    /// Complete a pick action with `champion_id`.
    async fn pick_champion(&self, action_id: i64, champion_id: u32) -> LcuApiResponse<()> {
        tracing::debug!(
            "[LCU::CHAMP_SELECT] action {} picks {}",
            action_id,
            champion_id
        );
        self.patch(
            &format!("{}/actions/{}", CHAMP_SELECT_SESSION_ROUTE, action_id),
            json!({ "completed": true, "type": "pick", "championId": champion_id }),
        )
        .await?;
        Ok(())
    }
}

/// Representation of the champion-select session, as pushed by the event
/// stream and returned by the session endpoint.
#[derive(Deserialize, Debug, Clone, Default)]
#[serde(rename_all = "camelCase")]
pub struct ChampSelectSessionDto {
    #[serde(default)]
    pub local_player_cell_id: i64,
    /// Action groups, one per draft turn.
    #[serde(default)]
    pub actions: Vec<Vec<ActionDto>>,
    #[serde(default)]
    pub bench_enabled: bool,
    #[serde(default)]
    pub bench_champions: Vec<BenchChampionDto>,
    #[serde(default)]
    pub my_team: Vec<TeamMemberDto>,
}

impl ChampSelectSessionDto {
    pub fn local_player(&self) -> Option<&TeamMemberDto> {
        self.my_team
            .iter()
            .find(|member| member.cell_id == self.local_player_cell_id)
    }

    /// Champion currently held by the local player, if any.
    pub fn local_champion_id(&self) -> Option<u32> {
        self.local_player()
            .map(|member| member.champion_id)
            .filter(|id| *id != 0)
    }

    pub fn has_bench(&self) -> bool {
        self.bench_enabled
    }

    pub fn is_on_bench(&self, champion_id: u32) -> bool {
        self.bench_champions
            .iter()
            .any(|champion| champion.champion_id == champion_id)
    }

    /// The local player's pick action, when it is their turn.
    pub fn local_pick_in_progress(&self) -> Option<&ActionDto> {
        self.actions.iter().flatten().find(|action| {
            action.actor_cell_id == self.local_player_cell_id
                && action.is_pick()
                && action.is_in_progress
        })
    }

    /// Whether `champion_id` was taken by a teammate or banned.
    pub fn is_unavailable(&self, champion_id: u32) -> bool {
        let taken = self.my_team.iter().any(|member| {
            member.cell_id != self.local_player_cell_id && member.champion_id == champion_id
        });
        let banned = self
            .actions
            .iter()
            .flatten()
            .any(|action| action.is_ban() && action.completed && action.champion_id == champion_id);

        taken || banned
    }
}

#[derive(Deserialize, Debug, Clone)]
#[serde(rename_all = "camelCase")]
pub struct ActionDto {
    pub id: i64,
    pub actor_cell_id: i64,
    #[serde(default)]
    pub champion_id: u32,
    #[serde(rename = "type", default)]
    pub kind: String,
    #[serde(default)]
    pub is_in_progress: bool,
    #[serde(default)]
    pub completed: bool,
}

impl ActionDto {
    pub fn is_pick(&self) -> bool {
        self.kind == "pick"
    }

    pub fn is_ban(&self) -> bool {
        self.kind == "ban"
    }
}

#[derive(Deserialize, Debug, Clone)]
#[serde(rename_all = "camelCase")]
pub struct BenchChampionDto {
    pub champion_id: u32,
}

#[derive(Deserialize, Debug, Clone)]
#[serde(rename_all = "camelCase")]
pub struct TeamMemberDto {
    pub cell_id: i64,
    #[serde(default)]
    pub champion_id: u32,
    #[serde(default)]
    pub summoner_id: u64,
    #[serde(default)]
    pub puuid: String,
}

#[cfg(test)]
mod tests {
    use httpmock::{Method::PATCH, prelude::*};
    use serde_json::json;

    use super::*;
    use crate::LcuClient;

    fn draft_session() -> ChampSelectSessionDto {
        serde_json::from_value(json!({
            "localPlayerCellId": 2,
            "benchEnabled": false,
            "benchChampions": [],
            "myTeam": [
                {"cellId": 0, "championId": 22, "summonerId": 10},
                {"cellId": 2, "championId": 0, "summonerId": 12}
            ],
            "actions": [
                [{"id": 1, "actorCellId": 7, "championId": 99, "type": "ban", "completed": true, "isInProgress": false}],
                [
                    {"id": 5, "actorCellId": 0, "championId": 22, "type": "pick", "completed": true, "isInProgress": false},
                    {"id": 6, "actorCellId": 2, "championId": 0, "type": "pick", "completed": false, "isInProgress": true}
                ]
            ]
        }))
        .unwrap()
    }

    #[test]
    fn finds_the_local_pick_turn() {
        let session = draft_session();

        assert_eq!(session.local_pick_in_progress().map(|a| a.id), Some(6));
        assert_eq!(session.local_champion_id(), None);
        assert!(!session.has_bench());
    }

    #[test]
    fn picked_and_banned_champions_are_unavailable() {
        let session = draft_session();

        assert!(session.is_unavailable(22));
        assert!(session.is_unavailable(99));
        assert!(!session.is_unavailable(157));
    }

    #[test]
    fn bench_session() {
        let session: ChampSelectSessionDto = serde_json::from_value(json!({
            "localPlayerCellId": 1,
            "benchEnabled": true,
            "benchChampions": [{"championId": 157, "isPriority": false}],
            "myTeam": [{"cellId": 1, "championId": 86}],
            "actions": []
        }))
        .unwrap();

        assert!(session.has_bench());
        assert!(session.is_on_bench(157));
        assert!(!session.is_on_bench(86));
        assert_eq!(session.local_champion_id(), Some(86));
    }

    #[tokio::test]
    async fn pick_patches_the_action() {
        let server = MockServer::start_async().await;
        let mock = server
            .mock_async(|when, then| {
                when.method(PATCH)
                    .path("/lol-champ-select/v1/session/actions/6")
                    .json_body(json!({"completed": true, "type": "pick", "championId": 157}));
                then.status(204);
            })
            .await;
        let client = LcuClient::with_base_url(server.base_url(), "t").unwrap();

        client.pick_champion(6, 157).await.unwrap();

        mock.assert_async().await;
    }

    #[tokio::test]
    async fn bench_swap_posts_the_champion() {
        let server = MockServer::start_async().await;
        let mock = server
            .mock_async(|when, then| {
                when.method(POST)
                    .path("/lol-champ-select/v1/session/bench/swap/157");
                then.status(204);
            })
            .await;
        let client = LcuClient::with_base_url(server.base_url(), "t").unwrap();

        client.swap_bench_champion(157).await.unwrap();

        mock.assert_async().await;
    }
}
