use lcu_companion_api::LcuApiError;
use lcu_companion_engine::EngineError;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum AppError {
    #[error("Configuration error: {0}")]
    Config(String),

    #[error("League client error: {0}")]
    Api(#[from] LcuApiError),

    #[error("Engine error: {0}")]
    Engine(#[from] EngineError),
}
