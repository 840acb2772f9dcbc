use thiserror::Error;

#[derive(Debug, Error)]
pub enum LcuApiError {
    #[error("League client process not found")]
    HostNotRunning,

    #[error("League client refused the connection")]
    HostUnavailable,

    #[error("Request failed with HTTP status {0}")]
    RequestFailed(reqwest::StatusCode),

    #[error("Event stream closed by the client")]
    StreamClosed,

    #[error("Reqwest error: {0}")]
    Reqwest(#[from] reqwest::Error),

    #[error("Decoding raw response error: {0}")]
    Serde(#[from] serde_json::Error),

    #[error("WebSocket error: {0}")]
    WebSocket(#[from] tokio_tungstenite::tungstenite::Error),

    #[error("TLS setup error: {0}")]
    Tls(#[from] native_tls::Error),

    #[error("Invalid header value: {0}")]
    InvalidHeader(String),
}

impl LcuApiError {
    /// Whether the error means the client itself is gone.
    pub fn is_host_gone(&self) -> bool {
        matches!(self, Self::HostUnavailable | Self::HostNotRunning)
    }
}

/// A call to the LCU can either result in a success with the success type or fail with a [`LcuApiError`].
pub type LcuApiResponse<T> = Result<T, LcuApiError>;
