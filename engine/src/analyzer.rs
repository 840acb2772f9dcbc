//! Teammate analysis posted to the champion-select chat.

use std::{sync::Arc, time::Duration};

use futures::future::join_all;
use lcu_companion_api::{LcuApiError, LcuApiFull, api::lol::MessageDto};
use lcu_companion_shared::{TeammateRecord, now_millis, summarize};
use tokio::time::sleep;
use tracing::{debug, error, info, instrument, warn};

use crate::{EngineError, report, session::Session};

/// Attempts made to find the conversation and the full roster.
const LOOKUP_ATTEMPTS: usize = 3;
const LOOKUP_DELAY: Duration = Duration::from_millis(500);
/// A complete team.
const FULL_ROSTER: usize = 5;
/// Delay between two chat messages, players joining the room late still
/// receive every line.
const SEND_PACING: Duration = Duration::from_secs(1);

/// Message and history capture of one teammate.
#[derive(Debug)]
struct MemberReport {
    message: String,
    record: TeammateRecord,
}

#[derive(Debug)]
pub struct TeammateAnalyzer<A> {
    api: Arc<A>,
    session: Arc<Session>,
}

impl<A: LcuApiFull> TeammateAnalyzer<A> {
    pub fn new(api: Arc<A>, session: Arc<Session>) -> Self {
        Self { api, session }
    }

    /// Report every teammate's recent form in the champion-select chat.
    #[instrument(skip_all, fields(roster_size))]
    pub async fn analyze_team(&self) -> Result<(), EngineError> {
        let batch = self.session.current_batch();
        let Some(conversation_id) = self.find_conversation().await? else {
            error!("🔍 ❌ Champion select conversation not found");
            return Ok(());
        };

        let roster = self.resolve_roster(&conversation_id).await;
        tracing::Span::current().record("roster_size", roster.len());
        info!("🔍 Analyzing {} teammate(s)", roster.len());

        let game_mode = match self.api.get_current_game_mode().await {
            Ok(mode) => mode,
            Err(e) if e.is_host_gone() => return Err(e.into()),
            Err(e) => {
                warn!(error = %e, "🔍 ⚠️ Game mode unavailable, summarizing every mode");
                None
            }
        };
        self.session.set_game_mode(game_mode.clone()).await;

        let now = now_millis();
        let reports = join_all(
            roster
                .iter()
                .map(|summoner_id| self.report_member(*summoner_id, game_mode.as_deref(), now)),
        )
        .await;

        let mut records = Vec::with_capacity(reports.len());
        for (summoner_id, report) in roster.iter().zip(reports) {
            let report = match report {
                Ok(report) => report,
                Err(e) => {
                    warn!(summoner_id, error = %e, "🔍 ⚠️ Teammate skipped");
                    continue;
                }
            };

            records.push(report.record);
            self.send(&conversation_id, &report.message).await?;
            sleep(SEND_PACING).await;
        }

        self.send(&conversation_id, report::CLOSING_MESSAGE).await?;
        if !self.session.append_teammates(batch, records).await {
            debug!("🔍 Champion select restarted, records dropped");
        }

        Ok(())
    }

    /// Post one line. Only losing the client is fatal, a refused message
    /// does not stop the remaining lines.
    async fn send(&self, conversation_id: &str, message: &str) -> Result<(), LcuApiError> {
        match self.api.send_message(conversation_id, message).await {
            Ok(()) => Ok(()),
            Err(e) if e.is_host_gone() => Err(e),
            Err(e) => {
                warn!(error = %e, "🔍 ⚠️ Chat message not delivered");
                Ok(())
            }
        }
    }

    /// The conversation id of the room, `None` when it never showed up.
    async fn find_conversation(&self) -> Result<Option<String>, EngineError> {
        for attempt in 1..=LOOKUP_ATTEMPTS {
            sleep(LOOKUP_DELAY).await;
            match self.api.get_champ_select_conversation_id().await {
                Ok(Some(id)) => return Ok(Some(id)),
                Ok(None) => debug!(attempt, "🔍 Conversation not created yet"),
                Err(e) if e.is_host_gone() => return Err(e.into()),
                Err(e) => debug!(attempt, error = %e, "🔍 Conversation lookup failed"),
            }
        }

        Ok(None)
    }

    /// Summoner ids of the players who joined the room, in join order.
    /// Whatever was found is returned once the attempts run out.
    async fn resolve_roster(&self, conversation_id: &str) -> Vec<u64> {
        let mut roster = Vec::new();

        for attempt in 1..=LOOKUP_ATTEMPTS {
            match self.api.get_messages(conversation_id).await {
                Ok(messages) => {
                    roster = roster_from(&messages);
                    if roster.len() >= FULL_ROSTER {
                        break;
                    }
                    debug!(attempt, found = roster.len(), "🔍 Roster incomplete");
                }
                Err(e) => warn!(attempt, error = %e, "🔍 ⚠️ Reading room messages failed"),
            }

            if attempt < LOOKUP_ATTEMPTS {
                sleep(LOOKUP_DELAY).await;
            }
        }

        roster
    }

    async fn report_member(
        &self,
        summoner_id: u64,
        game_mode: Option<&str>,
        now_ms: i64,
    ) -> Result<MemberReport, EngineError> {
        let summoner = self.api.get_summoner(summoner_id).await?;
        let matches = self.api.get_recent_matches(&summoner.puuid).await?;
        let summary = summarize(&matches, game_mode, now_ms);

        debug!(
            summoner_id,
            matches = matches.len(),
            "🔍 {} summarized",
            summoner.name()
        );

        Ok(MemberReport {
            message: report::format_summary(&summoner.name(), summary.as_ref()),
            record: TeammateRecord::new(summoner.puuid, matches),
        })
    }
}

fn roster_from(messages: &[MessageDto]) -> Vec<u64> {
    let mut roster = Vec::new();
    for message in messages.iter().filter(|m| m.is_join_notice()) {
        if !roster.contains(&message.from_summoner_id) {
            roster.push(message.from_summoner_id);
        }
    }
    roster
}
