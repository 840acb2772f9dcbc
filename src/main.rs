use std::sync::Arc;

use lcu_companion_api::{Credentials, EventStream, LcuApiError, LcuClient, discovery};
use lcu_companion_engine::{
    EngineError, FlowMachine, MonitorExit, Session, SessionSignal, Storage,
};
use tracing::{error, info};

use crate::{config::Config, error::AppError};

mod config;
mod error;
mod logging;

#[tokio::main]
async fn main() {
    logging::init();

    info!("🐙 Starting...");

    if let Err(e) = start().await {
        error!(error = %e, "❌ LCU Companion stopped");
        std::process::exit(1);
    }
}

async fn start() -> Result<(), AppError> {
    let config = Config::from_env()?;

    let credentials = resolve_credentials(&config).await?;

    let api = Arc::new(LcuClient::new(&credentials)?);
    api.start_metrics_logging();

    let session = Arc::new(Session::establish(api.as_ref()).await?);
    let storage = Storage::new(&config.data_dir);
    let preferences = storage
        .load_or_bootstrap_preferences(api.as_ref())
        .await?
        .preference_list();
    info!(
        data_dir = %config.data_dir.display(),
        "🎯 {} champion(s) in the auto-pick list",
        preferences.len()
    );

    let mut machine = FlowMachine::new(
        api,
        session,
        Arc::new(config.engine_settings()),
        storage,
        preferences,
    );

    run(&credentials, &mut machine).await
}

/// Configured credentials win over process discovery.
async fn resolve_credentials(config: &Config) -> Result<Credentials, AppError> {
    if let Some(credentials) = &config.credentials {
        return Ok(credentials.clone());
    }

    match discovery::discover(&config.process_name).await {
        Ok(credentials) => Ok(credentials),
        Err(e @ LcuApiError::HostNotRunning) => {
            error!(
                process = %config.process_name,
                "🔎 ❌ {} is not running, start the League client first",
                config.process_name
            );
            Err(e.into())
        }
        Err(e) => Err(e.into()),
    }
}

/// Keep an event stream open until the client goes away.
async fn run(
    credentials: &Credentials,
    machine: &mut FlowMachine<LcuClient>,
) -> Result<(), AppError> {
    loop {
        let mut stream = match EventStream::connect(credentials).await {
            Ok(stream) => stream,
            Err(e) if e.is_host_gone() => {
                info!("👋 League client closed");
                return Ok(());
            }
            Err(e) => return Err(e.into()),
        };
        info!("📡 Listening to client events");

        match machine.monitor(&mut stream).await {
            Ok(MonitorExit::Signal(SessionSignal::GameStarted)) => info!("🎮 Game started"),
            Ok(MonitorExit::Signal(SessionSignal::GameEnded)) => info!("🏁 Game ended"),
            Ok(MonitorExit::StreamClosed) => info!("📡 Event stream closed, reconnecting"),
            Err(e) if e.is_host_gone() => {
                info!("👋 League client closed");
                return Ok(());
            }
            Err(EngineError::Api(LcuApiError::RequestFailed(status))) => {
                error!(%status, "📡 ❌ Request failed, monitoring restarted");
            }
            Err(e) => return Err(e.into()),
        }
    }
}
