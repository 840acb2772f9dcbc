use std::{env, path::PathBuf};

use lcu_companion_api::Credentials;
use lcu_companion_engine::EngineSettings;

use crate::error::AppError;

#[derive(Debug, Clone)]
pub struct Config {
    /// Process searched for when no credentials are configured.
    pub process_name: String,
    /// Fixed credentials, skipping discovery.
    pub credentials: Option<Credentials>,
    pub auto_confirm: bool,
    pub auto_pick: bool,
    pub auto_analysis: bool,
    pub save_history: bool,
    pub data_dir: PathBuf,
}

impl Config {
    pub fn from_env() -> Result<Self, AppError> {
        dotenvy::dotenv().ok();
        Self::from_vars(|key| env::var(key).ok())
    }

    fn from_vars(var: impl Fn(&str) -> Option<String>) -> Result<Self, AppError> {
        const DEFAULT_PROCESS_NAME: &str = "LeagueClientUx";
        const DEFAULT_DATA_DIR: &str = "./data";

        let flag = |key: &str, default: bool| -> Result<bool, AppError> {
            match var(key) {
                None => Ok(default),
                Some(value) => match value.trim().to_ascii_lowercase().as_str() {
                    "1" | "true" | "yes" | "on" => Ok(true),
                    "0" | "false" | "no" | "off" => Ok(false),
                    _ => Err(AppError::Config(format!(
                        "{} must be a boolean, got {:?}",
                        key, value
                    ))),
                },
            }
        };

        let credentials = match (var("LCU_PORT"), var("LCU_TOKEN")) {
            (Some(port), Some(token)) => {
                let port = port
                    .parse()
                    .map_err(|_| AppError::Config(format!("LCU_PORT is not a port: {}", port)))?;
                Some(Credentials::new(token, port))
            }
            (None, None) => None,
            _ => {
                return Err(AppError::Config(
                    "LCU_PORT and LCU_TOKEN must be set together".into(),
                ));
            }
        };

        Ok(Self {
            process_name: var("LCU_PROCESS_NAME").unwrap_or_else(|| DEFAULT_PROCESS_NAME.into()),
            credentials,
            auto_confirm: flag("AUTO_CONFIRM", true)?,
            auto_pick: flag("AUTO_PICK", true)?,
            auto_analysis: flag("AUTO_ANALYSIS", true)?,
            save_history: flag("SAVE_HISTORY", false)?,
            data_dir: var("DATA_DIR")
                .unwrap_or_else(|| DEFAULT_DATA_DIR.into())
                .into(),
        })
    }

    pub fn engine_settings(&self) -> EngineSettings {
        EngineSettings::new(
            self.auto_confirm,
            self.auto_pick,
            self.auto_analysis,
            self.save_history,
        )
    }
}
