//! Game-flow state machine driving the engine from client events.

use std::{sync::Arc, time::Duration};

use lcu_companion_api::{
    ClientEvent, EventSource, LcuApiError, LcuApiFull, api::lol::ChampSelectSessionDto,
};
use lcu_companion_shared::{FlowPhase, PreferenceList};
use tokio::{task::AbortHandle, time::sleep};
use tracing::{debug, error, info, warn};

use crate::{
    EngineError,
    analyzer::TeammateAnalyzer,
    auto_pick::AutoPicker,
    session::Session,
    settings::EngineSettings,
    storage::{HistoryEntry, Storage},
    tasks::TaskSet,
};

/// Lifecycle signals returned to the process loop.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SessionSignal {
    GameStarted,
    GameEnded,
}

/// Why [`FlowMachine::monitor`] returned.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MonitorExit {
    Signal(SessionSignal),
    StreamClosed,
}

pub struct FlowMachine<A: LcuApiFull + 'static> {
    api: Arc<A>,
    session: Arc<Session>,
    settings: Arc<EngineSettings>,
    storage: Storage,
    analyzer: Arc<TeammateAnalyzer<A>>,
    auto_picker: AutoPicker<A>,
    tasks: TaskSet,
    /// Analysis of the current champion select, if one was started.
    analysis: Option<AbortHandle>,
    phase: FlowPhase,
}

impl<A: LcuApiFull + 'static> FlowMachine<A> {
    const READY_CHECK_RETRY: Duration = Duration::from_secs(1);

    pub fn new(
        api: Arc<A>,
        session: Arc<Session>,
        settings: Arc<EngineSettings>,
        storage: Storage,
        preferences: PreferenceList,
    ) -> Self {
        Self {
            analyzer: Arc::new(TeammateAnalyzer::new(api.clone(), session.clone())),
            auto_picker: AutoPicker::new(
                api.clone(),
                session.clone(),
                settings.clone(),
                preferences,
            ),
            api,
            session,
            settings,
            storage,
            tasks: TaskSet::new(),
            analysis: None,
            phase: FlowPhase::None,
        }
    }

    pub fn phase(&self) -> &FlowPhase {
        &self.phase
    }

    pub fn session(&self) -> &Arc<Session> {
        &self.session
    }

    /// Wait for the background tasks still running.
    pub async fn join_tasks(&mut self) {
        self.tasks.join_all().await;
    }

    /// Read events until a lifecycle signal or the end of the stream.
    ///
    /// Malformed frames are logged and skipped.
    pub async fn monitor<S: EventSource + ?Sized>(
        &mut self,
        source: &mut S,
    ) -> Result<MonitorExit, EngineError> {
        loop {
            let frame = match source.next_frame().await {
                Ok(Some(frame)) => frame,
                Ok(None) | Err(LcuApiError::StreamClosed) => return Ok(MonitorExit::StreamClosed),
                Err(e) => return Err(e.into()),
            };
            self.tasks.reap();

            let event = match ClientEvent::decode(&frame) {
                Ok(event) => event,
                Err(e) => {
                    warn!(error = %e, "📡 ⚠️ Malformed event ignored");
                    continue;
                }
            };

            if let Some(signal) = self.handle_event(event).await? {
                return Ok(MonitorExit::Signal(signal));
            }
        }
    }

    pub async fn handle_event(
        &mut self,
        event: ClientEvent,
    ) -> Result<Option<SessionSignal>, EngineError> {
        match event {
            ClientEvent::GameflowPhase(phase) => self.on_phase(phase).await,
            ClientEvent::ChampSelectSession(state) => {
                self.on_champ_select(&state).await?;
                Ok(None)
            }
            ClientEvent::Ignored { uri } => {
                debug!(%uri, "📡 Event ignored");
                Ok(None)
            }
        }
    }

    async fn on_phase(&mut self, phase: FlowPhase) -> Result<Option<SessionSignal>, EngineError> {
        if phase == self.phase {
            debug!(%phase, "📡 Phase unchanged");
            return Ok(None);
        }

        info!(from = %self.phase, to = %phase, "📡 Game flow changed");
        self.phase = phase.clone();

        match phase {
            FlowPhase::ChampSelect => {
                self.session.reset_pick();
                if let Some(previous) = self.analysis.take() {
                    previous.abort();
                }
                self.session.clear_teammates().await;

                if self.settings.auto_analysis() {
                    let analyzer = self.analyzer.clone();
                    self.analysis = Some(
                        self.tasks
                            .spawn("teammate analysis", async move { analyzer.analyze_team().await }),
                    );
                }
                if self.settings.auto_pick() {
                    self.pick_from_current_session().await?;
                }
                Ok(None)
            }
            FlowPhase::ReadyCheck => {
                if self.settings.auto_confirm() {
                    self.accept_ready_check().await?;
                }
                Ok(None)
            }
            FlowPhase::InProgress => {
                self.flush_teammates().await;
                Ok(Some(SessionSignal::GameStarted))
            }
            FlowPhase::PreEndOfGame => Ok(Some(SessionSignal::GameEnded)),
            _ => Ok(None),
        }
    }

    async fn on_champ_select(&mut self, state: &ChampSelectSessionDto) -> Result<(), EngineError> {
        if !self.settings.auto_pick() || self.session.has_picked() {
            return Ok(());
        }

        match self.auto_picker.auto_pick(state).await {
            Ok(()) => Ok(()),
            Err(e) if e.is_host_gone() => Err(e),
            Err(e) => {
                warn!(error = %e, "🎯 ⚠️ Auto-pick attempt failed");
                Ok(())
            }
        }
    }

    /// The session may already be open when the phase change arrives, its
    /// first update is not waited for.
    async fn pick_from_current_session(&mut self) -> Result<(), EngineError> {
        match self.api.get_champ_select_session().await {
            Ok(state) => self.on_champ_select(&state).await,
            Err(e) if e.is_host_gone() => Err(e.into()),
            Err(e) => {
                debug!(error = %e, "🎯 Champion select session not readable yet");
                Ok(())
            }
        }
    }

    /// Accept the match, retrying until the client takes it or leaves the
    /// ready check.
    async fn accept_ready_check(&self) -> Result<(), EngineError> {
        loop {
            match self.api.accept_ready_check().await {
                Ok(()) => {
                    info!("✅ Match accepted");
                    return Ok(());
                }
                Err(e) if e.is_host_gone() => return Err(e.into()),
                Err(e) => debug!(error = %e, "✅ Ready check not accepted yet"),
            }

            sleep(Self::READY_CHECK_RETRY).await;

            match self.api.get_gameflow_phase().await {
                Ok(FlowPhase::ReadyCheck) => {}
                Ok(phase) => {
                    info!(%phase, "✅ Ready check is over");
                    return Ok(());
                }
                Err(e) if e.is_host_gone() => return Err(e.into()),
                Err(e) => debug!(error = %e, "✅ Phase check failed"),
            }
        }
    }

    async fn flush_teammates(&self) {
        let teammates = self.session.take_teammates().await;
        if !self.settings.save_history() || teammates.is_empty() {
            return;
        }

        let entry = HistoryEntry::new(self.session.game_mode().await, teammates);
        if let Err(e) = self.storage.append_history(&entry).await {
            error!(error = %e, "💾 ❌ Saving teammate history failed");
        }
    }
}
