//! Automatic champion selection from the user's preference list.

use std::sync::Arc;

use lcu_companion_api::{LcuApiError, LcuApiFull, api::lol::ChampSelectSessionDto};
use lcu_companion_shared::PreferenceList;
use tracing::{debug, info, instrument, warn};

use crate::{EngineError, session::Session, settings::EngineSettings};

#[derive(Debug)]
pub struct AutoPicker<A> {
    api: Arc<A>,
    session: Arc<Session>,
    settings: Arc<EngineSettings>,
    preferences: PreferenceList,
}

impl<A: LcuApiFull> AutoPicker<A> {
    pub fn new(
        api: Arc<A>,
        session: Arc<Session>,
        settings: Arc<EngineSettings>,
        preferences: PreferenceList,
    ) -> Self {
        Self {
            api,
            session,
            settings,
            preferences,
        }
    }

    /// Try to lock in a preferred champion for this champion-select state.
    ///
    /// At most one pick succeeds per champion select. When nothing can be
    /// picked yet, the next state update tries again.
    #[instrument(skip_all, fields(cell = state.local_player_cell_id))]
    pub async fn auto_pick(&self, state: &ChampSelectSessionDto) -> Result<(), EngineError> {
        if !self.settings.auto_pick() || self.session.has_picked() {
            return Ok(());
        }

        if let Some(current) = state.local_champion_id() {
            if self.preferences.contains(current) {
                debug!(champion_id = current, "🎯 Already holding a preferred champion");
                self.session.mark_picked();
                return Ok(());
            }
        }

        let picked = if state.has_bench() {
            self.pick_from_bench(state).await?
        } else {
            self.pick_on_turn(state).await?
        };

        if let Some(champion_id) = picked {
            self.session.mark_picked();
            self.log_pick(champion_id).await;
        }

        Ok(())
    }

    async fn pick_from_bench(
        &self,
        state: &ChampSelectSessionDto,
    ) -> Result<Option<u32>, EngineError> {
        for champion_id in self.preferences.iter() {
            if !state.is_on_bench(champion_id) {
                continue;
            }

            match self.api.swap_bench_champion(champion_id).await {
                Ok(()) => return Ok(Some(champion_id)),
                Err(LcuApiError::RequestFailed(status)) => {
                    warn!(champion_id, %status, "🎯 ⚠️ Bench swap refused");
                }
                Err(e) => return Err(e.into()),
            }
        }

        Ok(None)
    }

    async fn pick_on_turn(
        &self,
        state: &ChampSelectSessionDto,
    ) -> Result<Option<u32>, EngineError> {
        let Some(action) = state.local_pick_in_progress() else {
            return Ok(None);
        };

        for champion_id in self.preferences.iter() {
            if state.is_unavailable(champion_id) {
                debug!(champion_id, "🎯 Champion unavailable, skipped");
                continue;
            }

            match self.api.pick_champion(action.id, champion_id).await {
                Ok(()) => return Ok(Some(champion_id)),
                Err(LcuApiError::RequestFailed(status)) => {
                    debug!(champion_id, %status, "🎯 Pick refused, trying next preference");
                }
                Err(e) => return Err(e.into()),
            }
        }

        Ok(None)
    }

    async fn log_pick(&self, champion_id: u32) {
        match self.api.get_champion(champion_id).await {
            Ok(champion) => info!(champion_id, "🎯 Picked {}", champion.full_name()),
            Err(e) => {
                debug!(error = %e, "🎯 Champion metadata unavailable");
                info!(champion_id, "🎯 Picked champion {}", champion_id);
            }
        }
    }
}
