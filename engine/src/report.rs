//! Chat messages posted during champion select.

use lcu_companion_shared::PerformanceSummary;

/// Sent once every teammate has been reported.
pub const CLOSING_MESSAGE: &str = "Teammate analysis done, good luck have fun!";

/// One chat line describing a teammate's recent form.
pub fn format_summary(name: &str, summary: Option<&PerformanceSummary>) -> String {
    match summary {
        Some(summary) => format!(
            "{}: KDA {:.2} | {:.0} dmg/min | {:.0}% WR | {}",
            name,
            summary.kda,
            summary.damage_per_minute,
            summary.win_rate * 100.0,
            summary.to_formatted_streak()
        ),
        None => format!("{}: no recent matches", name),
    }
}
