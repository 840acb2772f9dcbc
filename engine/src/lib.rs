//! Session event engine: reacts to the League client's game flow, analyzes
//! teammates and picks champions on behalf of the user.

use lcu_companion_api::LcuApiError;
use thiserror::Error;

pub mod analyzer;
pub mod auto_pick;
pub mod flow;
pub mod report;
pub mod session;
pub mod settings;
pub mod storage;
pub mod tasks;

#[cfg(test)]
mod testing;

pub use analyzer::TeammateAnalyzer;
pub use auto_pick::AutoPicker;
pub use flow::{FlowMachine, MonitorExit, SessionSignal};
pub use session::Session;
pub use settings::EngineSettings;
pub use storage::{HistoryEntry, Storage};
pub use tasks::TaskSet;

#[derive(Debug, Error)]
pub enum EngineError {
    #[error("An error occured during a request to the League client: {0}")]
    Api(#[from] LcuApiError),
    #[error("An error occured while accessing local files: {0}")]
    Storage(#[from] std::io::Error),
    #[error("An error occured while (de)serializing local data: {0}")]
    Serialization(#[from] serde_json::Error),
}

impl EngineError {
    /// Whether the League client went away, which ends the session.
    pub fn is_host_gone(&self) -> bool {
        matches!(self, Self::Api(e) if e.is_host_gone())
    }
}
