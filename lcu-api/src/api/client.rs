use std::{fmt::Debug, sync::Arc, time::Duration};

use async_trait::async_trait;
use reqwest::{Method, StatusCode};
use serde_json::Value;
use tracing::{debug, trace};

use crate::{
    discovery::Credentials,
    types::{LcuApiError, LcuApiResponse},
};

use super::{metrics::RequestMetrics, traits::LcuRequest};

/// Authenticated HTTP client bound to one running League client.
///
/// The client serves its API over TLS with a self-signed certificate, so
/// certificate verification is disabled. Safe to share between tasks.
#[derive(Debug)]
pub struct LcuClient {
    client: reqwest::Client,
    base_url: String,
    /// Remoting auth token, sent as the password of the `riot` user.
    token: String,
    pub metrics: Arc<RequestMetrics>,
}

impl LcuClient {
    const USERNAME: &'static str = "riot";
    const TIMEOUT: Duration = Duration::from_secs(10);

    pub fn new(credentials: &Credentials) -> LcuApiResponse<Self> {
        Self::with_base_url(credentials.base_url(), credentials.token.clone())
    }

    pub fn with_base_url(
        base_url: impl Into<String>,
        token: impl Into<String>,
    ) -> LcuApiResponse<Self> {
        let client = reqwest::Client::builder()
            .danger_accept_invalid_certs(true)
            .timeout(Self::TIMEOUT)
            .build()?;

        Ok(Self {
            client,
            base_url: base_url.into().trim_end_matches('/').to_string(),
            token: token.into(),
            metrics: RequestMetrics::new("lcu"),
        })
    }

    /// Spawn a task logging periodic metrics about requests.
    pub fn start_metrics_logging(&self) {
        let metrics = self.metrics.clone();
        tokio::spawn(async move { metrics.log_loop().await });
    }
}

#[async_trait]
impl LcuRequest for LcuClient {
    async fn request(
        &self,
        method: Method,
        path: &str,
        body: Option<Value>,
    ) -> LcuApiResponse<Value> {
        trace!("[LCU::CLIENT] {} {}", method, path);
        self.metrics.inc();

        let mut builder = self
            .client
            .request(method, format!("{}{}", self.base_url, path))
            .basic_auth(Self::USERNAME, Some(&self.token));
        if let Some(body) = body {
            builder = builder.json(&body);
        }

        let res = builder.send().await.map_err(|e| {
            if e.is_connect() {
                debug!(error = %e, "[LCU::CLIENT] connection failed");
                LcuApiError::HostUnavailable
            } else {
                LcuApiError::Reqwest(e)
            }
        })?;

        let status = res.status();
        if status == StatusCode::NO_CONTENT {
            return Ok(Value::Null);
        }
        if !status.is_success() {
            self.metrics.inc_failed();
            return Err(LcuApiError::RequestFailed(status));
        }

        let bytes = res.bytes().await?;
        if bytes.is_empty() {
            return Ok(Value::Null);
        }
        serde_json::from_slice(&bytes).map_err(LcuApiError::Serde)
    }
}
