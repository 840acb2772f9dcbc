//! Weighted performance summary over a player's recent matches.

use serde::Serialize;

use crate::MatchRecord;

/// Matches younger than this count fully, older ones with [`STALE_WEIGHT`].
pub const RECENT_WINDOW_MS: i64 = 5 * 60 * 60 * 1_000;
pub const RECENT_WEIGHT: f64 = 1.0;
pub const STALE_WEIGHT: f64 = 0.2;

#[derive(Serialize, Debug, Clone, Copy, PartialEq)]
pub struct PerformanceSummary {
    pub kda: f64,
    pub damage_per_minute: f64,
    /// Between 0 and 1.
    pub win_rate: f64,
    /// Positive for consecutive wins, negative for consecutive losses.
    pub streak: i32,
}

impl PerformanceSummary {
    pub fn to_formatted_streak(&self) -> String {
        match self.streak {
            0 => "no streak".to_string(),
            1 => "won last game".to_string(),
            -1 => "lost last game".to_string(),
            n if n > 1 => format!("{n} wins in a row"),
            n => format!("{} losses in a row", -n),
        }
    }
}

fn recency_weight(creation: i64, now_ms: i64) -> f64 {
    if now_ms - creation < RECENT_WINDOW_MS {
        RECENT_WEIGHT
    } else {
        STALE_WEIGHT
    }
}

/// Summarize `matches`, most recent first regardless of the input order.
///
/// When `game_mode` is set, only matches of that mode feed the KDA and damage
/// figures. Win rate and streak are always computed over every supplied match.
/// Returns `None` when there is no match at all.
pub fn summarize(
    matches: &[MatchRecord],
    game_mode: Option<&str>,
    now_ms: i64,
) -> Option<PerformanceSummary> {
    if matches.is_empty() {
        return None;
    }

    let mut ordered: Vec<&MatchRecord> = matches.iter().collect();
    ordered.sort_by(|a, b| b.creation.cmp(&a.creation));

    let (mut kills, mut deaths, mut assists) = (0.0, 0.0, 0.0);
    // Matches without a duration have no rate and stay out of the damage average.
    let (mut damage, mut damage_weight) = (0.0, 0.0);
    let mut wins = 0usize;
    let mut streak = 0i32;
    let mut streak_broken = false;
    let reference = ordered[0].win();

    for record in &ordered {
        if record.win() {
            wins += 1;
        }

        if !streak_broken && record.win() == reference {
            streak += if reference { 1 } else { -1 };
        } else {
            streak_broken = true;
        }

        if game_mode.is_some_and(|mode| !record.is_mode(mode)) {
            continue;
        }

        let weight = recency_weight(record.creation, now_ms);
        kills += record.stats.kills as f64 * weight;
        deaths += record.stats.deaths as f64 * weight;
        assists += record.stats.assists as f64 * weight;
        if record.duration > 0 {
            damage += record.stats.total_damage_dealt_to_champions as f64 * weight
                / record.duration as f64
                * 60.0;
            damage_weight += weight;
        }
    }

    Some(PerformanceSummary {
        kda: (kills + assists) / f64::max(deaths, 1.0),
        damage_per_minute: if damage_weight > 0.0 {
            damage / damage_weight
        } else {
            0.0
        },
        win_rate: wins as f64 / ordered.len() as f64,
        streak,
    })
}
