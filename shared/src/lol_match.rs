use serde::{Deserialize, Serialize};

/// One historical match seen from a single player's side.
///
/// Only a fixed set of stat fields is kept so that records captured for the
/// history log stay small.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct MatchRecord {
    pub game_id: u64,
    /// Creation timestamp in milliseconds.
    pub creation: i64,
    /// Duration in seconds.
    pub duration: i64,
    pub game_mode: String,
    pub champion_id: u32,
    pub stats: MatchStats,
}

impl MatchRecord {
    pub fn is_mode(&self, game_mode: &str) -> bool {
        self.game_mode == game_mode
    }

    pub fn win(&self) -> bool {
        self.stats.win
    }
}

/// Missing fields default to zero, the client omits some of them for
/// remakes.
#[derive(Serialize, Deserialize, Debug, Clone, Default, PartialEq)]
#[serde(rename_all = "camelCase", default)]
pub struct MatchStats {
    pub assists: u32,
    pub champ_level: u32,
    pub damage_self_mitigated: u64,
    pub deaths: u32,
    pub first_blood_kill: bool,
    pub gold_earned: u64,
    pub killing_sprees: u32,
    pub kills: u32,
    pub largest_multi_kill: u32,
    pub longest_time_spent_living: u64,
    pub penta_kills: u32,
    pub quadra_kills: u32,
    pub total_damage_dealt: u64,
    pub total_damage_dealt_to_champions: u64,
    pub total_damage_taken: u64,
    pub total_heal: u64,
    pub total_minions_killed: u32,
    pub triple_kills: u32,
    pub true_damage_dealt: u64,
    pub win: bool,
}

/// Recent matches of one teammate captured during a champion select.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct TeammateRecord {
    pub puuid: String,
    pub matches: Vec<MatchRecord>,
}

impl TeammateRecord {
    /// Upper bound of matches kept per teammate, one history page.
    pub const MAX_MATCHES: usize = 20;

    pub fn new(puuid: String, mut matches: Vec<MatchRecord>) -> Self {
        matches.sort_by(|a, b| b.creation.cmp(&a.creation));
        matches.truncate(Self::MAX_MATCHES);
        Self { puuid, matches }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn record(game_id: u64, creation: i64) -> MatchRecord {
        MatchRecord {
            game_id,
            creation,
            duration: 754,
            game_mode: "ARAM".into(),
            champion_id: 1,
            stats: MatchStats::default(),
        }
    }

    #[test]
    fn teammate_record_keeps_most_recent_page() {
        let matches = (0..25).map(|i| record(i, i as i64 * 1_000)).collect();
        let record = TeammateRecord::new("puuid".into(), matches);

        assert_eq!(record.matches.len(), TeammateRecord::MAX_MATCHES);
        assert_eq!(record.matches[0].game_id, 24);
        assert_eq!(record.matches[19].game_id, 5);
    }

    #[test]
    fn serializes_with_client_field_names() {
        let json = serde_json::to_value(record(7, 42)).unwrap();

        assert_eq!(json["gameMode"], "ARAM");
        assert_eq!(json["stats"]["totalDamageDealtToChampions"], 0);
        assert_eq!(json["duration"], record(7, 42).duration);
    }
}
