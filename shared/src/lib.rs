//! Domain types shared by every LCU Companion component.

use std::time::{SystemTime, UNIX_EPOCH};

pub mod lol_match;
pub mod phase;
pub mod preferences;
pub mod stats;

pub use lol_match::{MatchRecord, MatchStats, TeammateRecord};
pub use phase::FlowPhase;
pub use preferences::{PreferenceCache, PreferenceList};
pub use stats::{PerformanceSummary, summarize};

/// Current UNIX time in milliseconds, the unit used by the client for every
/// match timestamp.
pub fn now_millis() -> i64 {
    SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .map(|d| d.as_millis() as i64)
        .unwrap_or_default()
}
