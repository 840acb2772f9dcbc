use async_trait::async_trait;
use lcu_companion_shared::{MatchRecord, MatchStats};
use serde::Deserialize;

use crate::{
    api::traits::{LcuRequest, decode},
    types::LcuApiResponse,
};

/// The client never returns more than this many games per page.
pub const MATCH_HISTORY_PAGE_SIZE: u32 = 20;

#[async_trait]
pub trait MatchHistoryApi: LcuRequest {
    /// One page of a player's history, `[begin, end)` counted from the most
    /// recent game. Entries without participant data are dropped.
    async fn get_match_history(
        &self,
        puuid: &str,
        begin_index: u32,
        end_index: u32,
    ) -> LcuApiResponse<Vec<MatchRecord>> {
        tracing::trace!(
            "[LCU::MATCH_HISTORY] get_match_history {} [{}, {})",
            puuid,
            begin_index,
            end_index
        );
        let path = format!(
            "/lol-match-history/v1/products/lol/{}/matches?begIndex={}&endIndex={}",
            puuid, begin_index, end_index
        );

        let history: MatchHistoryDto = decode(self.get(&path).await?)?;
        Ok(history
            .games
            .games
            .into_iter()
            .filter_map(|game| MatchRecord::try_from(game).ok())
            .collect())
    }

    async fn get_recent_matches(&self, puuid: &str) -> LcuApiResponse<Vec<MatchRecord>> {
        self.get_match_history(puuid, 0, MATCH_HISTORY_PAGE_SIZE)
            .await
    }

    async fn get_match_detail(&self, game_id: u64) -> LcuApiResponse<GameDetailDto> {
        tracing::trace!("[LCU::MATCH_HISTORY] get_match_detail {}", game_id);
        decode(
            self.get(&format!("/lol-match-history/v1/games/{}", game_id))
                .await?,
        )
    }
}

#[derive(Deserialize, Debug, Clone, Default)]
#[serde(rename_all = "camelCase")]
struct MatchHistoryDto {
    #[serde(default)]
    games: GamesPageDto,
}

#[derive(Deserialize, Debug, Clone, Default)]
#[serde(rename_all = "camelCase")]
struct GamesPageDto {
    #[serde(default)]
    games: Vec<GameDto>,
}

/// Representation of a match history entry. The history of a player only
/// carries that player in `participants`.
#[derive(Deserialize, Debug, Clone)]
#[serde(rename_all = "camelCase")]
pub struct GameDto {
    pub game_id: u64,
    pub game_creation: i64,
    pub game_duration: i64,
    #[serde(default)]
    pub game_mode: String,
    #[serde(default)]
    pub participants: Vec<ParticipantDto>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct MissingParticipant;

impl TryFrom<GameDto> for MatchRecord {
    type Error = MissingParticipant;

    fn try_from(game: GameDto) -> Result<Self, Self::Error> {
        let participant = game
            .participants
            .into_iter()
            .next()
            .ok_or(MissingParticipant)?;

        Ok(Self {
            game_id: game.game_id,
            creation: game.game_creation,
            duration: game.game_duration,
            game_mode: game.game_mode,
            champion_id: participant.champion_id,
            stats: participant.stats,
        })
    }
}

#[derive(Deserialize, Debug, Clone)]
#[serde(rename_all = "camelCase")]
pub struct ParticipantDto {
    #[serde(default)]
    pub participant_id: u32,
    #[serde(default)]
    pub champion_id: u32,
    #[serde(default)]
    pub team_id: u32,
    #[serde(default)]
    pub stats: MatchStats,
}

/// Representation of a full match, every player included.
#[derive(Deserialize, Debug, Clone)]
#[serde(rename_all = "camelCase")]
pub struct GameDetailDto {
    pub game_id: u64,
    #[serde(default)]
    pub game_creation: i64,
    #[serde(default)]
    pub game_duration: i64,
    #[serde(default)]
    pub game_mode: String,
    #[serde(default)]
    pub participant_identities: Vec<ParticipantIdentityDto>,
    #[serde(default)]
    pub participants: Vec<ParticipantDto>,
}

#[derive(Deserialize, Debug, Clone)]
#[serde(rename_all = "camelCase")]
pub struct ParticipantIdentityDto {
    pub participant_id: u32,
    pub player: PlayerDto,
}

#[derive(Deserialize, Debug, Clone)]
#[serde(rename_all = "camelCase")]
pub struct PlayerDto {
    #[serde(default)]
    pub puuid: String,
    #[serde(default)]
    pub summoner_id: u64,
    #[serde(default)]
    pub summoner_name: String,
    #[serde(default)]
    pub game_name: String,
}

#[cfg(test)]
mod tests {
    use httpmock::prelude::*;
    use serde_json::json;

    use super::*;
    use crate::LcuClient;

    fn history_game(game_id: u64, mode: &str, win: bool) -> serde_json::Value {
        json!({
            "gameId": game_id,
            "gameCreation": 1_700_000_000_000i64 + game_id as i64,
            "gameDuration": 1_100,
            "gameMode": mode,
            "participants": [{
                "participantId": 1,
                "championId": 157,
                "teamId": 100,
                "stats": {
                    "kills": 7, "deaths": 3, "assists": 12,
                    "totalDamageDealtToChampions": 31_000,
                    "champLevel": 18,
                    "visionScore": 9,
                    "win": win
                }
            }]
        })
    }

    #[tokio::test]
    async fn history_page_is_projected_into_records() {
        let server = MockServer::start_async().await;
        let mock = server
            .mock_async(|when, then| {
                when.method(GET)
                    .path("/lol-match-history/v1/products/lol/p-1/matches")
                    .query_param("begIndex", "0")
                    .query_param("endIndex", "20");
                then.status(200).json_body(json!({
                    "accountId": 1,
                    "games": {
                        "gameCount": 3,
                        "games": [
                            history_game(1, "ARAM", true),
                            history_game(2, "CLASSIC", false),
                            {"gameId": 3, "gameCreation": 0, "gameDuration": 0, "participants": []}
                        ]
                    }
                }));
            })
            .await;
        let client = LcuClient::with_base_url(server.base_url(), "t").unwrap();

        let records = client.get_recent_matches("p-1").await.unwrap();

        mock.assert_async().await;
        assert_eq!(records.len(), 2);
        assert_eq!(records[0].champion_id, 157);
        assert_eq!(records[0].stats.total_damage_dealt_to_champions, 31_000);
        assert!(records[0].win());
        assert_eq!(records[1].game_mode, "CLASSIC");
        assert_eq!(records[1].stats.penta_kills, 0);
    }

    #[tokio::test]
    async fn empty_history_page() {
        let server = MockServer::start_async().await;
        server
            .mock_async(|when, then| {
                when.method(GET)
                    .path("/lol-match-history/v1/products/lol/p-2/matches");
                then.status(200).json_body(json!({"games": {"games": []}}));
            })
            .await;
        let client = LcuClient::with_base_url(server.base_url(), "t").unwrap();

        assert!(client.get_recent_matches("p-2").await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn match_detail_carries_every_player() {
        let server = MockServer::start_async().await;
        let identity = |id: u32, puuid: &str| {
            json!({"participantId": id, "player": {"puuid": puuid, "summonerId": id, "summonerName": puuid}})
        };
        let participant = |id: u32, team: u32| {
            json!({"participantId": id, "championId": id, "teamId": team, "stats": {"win": team == 100}})
        };
        server
            .mock_async(|when, then| {
                when.method(GET).path("/lol-match-history/v1/games/7349112729");
                then.status(200).json_body(json!({
                    "gameId": 7_349_112_729u64,
                    "gameMode": "ARAM",
                    "participantIdentities": [
                        identity(1, "a"), identity(2, "b"), identity(3, "c"), identity(4, "d")
                    ],
                    "participants": [
                        participant(1, 100), participant(2, 200),
                        participant(3, 100), participant(4, 200)
                    ]
                }));
            })
            .await;
        let client = LcuClient::with_base_url(server.base_url(), "t").unwrap();

        let detail = client.get_match_detail(7_349_112_729).await.unwrap();

        assert_eq!(detail.game_mode, "ARAM");
        assert_eq!(detail.participant_identities.len(), 4);
        assert_eq!(detail.participant_identities[2].player.puuid, "c");
        assert_eq!(detail.participants[1].team_id, 200);
        assert!(detail.participants[2].stats.win);
    }
}
