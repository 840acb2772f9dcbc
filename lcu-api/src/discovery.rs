//! Locate the running League client and read its remoting credentials from
//! the process command line.

use tokio::process::Command;
use tracing::{debug, info};

use crate::types::{LcuApiError, LcuApiResponse};

const TOKEN_ARG: &str = "--remoting-auth-token=";
const PORT_ARG: &str = "--app-port=";

/// Remoting credentials of one client instance.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Credentials {
    pub token: String,
    pub port: u16,
}

impl Credentials {
    pub fn new(token: impl Into<String>, port: u16) -> Self {
        Self {
            token: token.into(),
            port,
        }
    }

    pub fn base_url(&self) -> String {
        format!("https://127.0.0.1:{}", self.port)
    }

    pub fn ws_url(&self) -> String {
        format!("wss://127.0.0.1:{}/", self.port)
    }
}

/// Extract the credentials from one process command line.
pub fn parse_launch_args(command_line: &str) -> Option<Credentials> {
    let mut token = None;
    let mut port = None;

    for arg in command_line.split_whitespace() {
        let arg = arg.trim_matches('"');
        if let Some(value) = arg.strip_prefix(TOKEN_ARG) {
            token = Some(value.trim_matches('"').to_string());
        } else if let Some(value) = arg.strip_prefix(PORT_ARG) {
            port = value.trim_matches('"').parse::<u16>().ok();
        }
    }

    match (token, port) {
        (Some(token), Some(port)) if !token.is_empty() => Some(Credentials { token, port }),
        _ => None,
    }
}

/// Find the first line of a process listing that belongs to `process_name`
/// and carries usable credentials.
pub fn find_in_listing(listing: &str, process_name: &str) -> Option<Credentials> {
    listing
        .lines()
        .filter(|line| line.contains(process_name))
        .find_map(parse_launch_args)
}

/// Look the client up among the running processes.
pub async fn discover(process_name: &str) -> LcuApiResponse<Credentials> {
    let listing = list_processes(process_name).await?;
    let credentials =
        find_in_listing(&listing, process_name).ok_or(LcuApiError::HostNotRunning)?;

    info!(
        port = credentials.port,
        "🔎 Found {} listening on port {}", process_name, credentials.port
    );
    Ok(credentials)
}

#[cfg(windows)]
fn listing_command(process_name: &str) -> Command {
    let query = format!(
        "Get-CimInstance Win32_Process -Filter \"name = '{}.exe'\" | Select-Object -ExpandProperty CommandLine",
        process_name
    );
    let mut command = Command::new("powershell");
    command.args(["-NoProfile", "-Command", query.as_str()]);
    command
}

#[cfg(not(windows))]
fn listing_command(_process_name: &str) -> Command {
    let mut command = Command::new("ps");
    command.args(["-A", "-ww", "-o", "args="]);
    command
}

async fn list_processes(process_name: &str) -> LcuApiResponse<String> {
    let output = listing_command(process_name).output().await.map_err(|e| {
        debug!("[LCU::DISCOVERY] process listing failed: {}", e);
        LcuApiError::HostNotRunning
    })?;

    if !output.status.success() {
        debug!(
            "[LCU::DISCOVERY] process listing exited with {}",
            output.status
        );
        return Err(LcuApiError::HostNotRunning);
    }

    Ok(String::from_utf8_lossy(&output.stdout).into_owned())
}
