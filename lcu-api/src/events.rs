//! Push event stream of the League client.
//!
//! The client speaks a WAMP-like protocol over a WebSocket: after
//! subscribing to an event name, every change of the matching resource is
//! pushed as `[8, eventName, {uri, eventType, data}]`.

use async_trait::async_trait;
use base64::{Engine, engine::general_purpose::STANDARD};
use futures::{SinkExt, StreamExt};
use lcu_companion_shared::FlowPhase;
use serde_json::Value;
use thiserror::Error;
use tokio::net::TcpStream;
use tokio_tungstenite::{
    Connector, MaybeTlsStream, WebSocketStream, connect_async_tls_with_config,
    tungstenite::{
        self, Message,
        client::IntoClientRequest,
        error::ProtocolError,
        http::{HeaderValue, header::AUTHORIZATION},
    },
};
use tracing::{debug, trace};

use crate::{
    api::lol::{
        ChampSelectSessionDto, champ_select::CHAMP_SELECT_SESSION_ROUTE,
        gameflow::GAMEFLOW_PHASE_ROUTE,
    },
    discovery::Credentials,
    types::{LcuApiError, LcuApiResponse},
};

/// Subscription frames sent right after the connection is established.
pub const SUBSCRIPTIONS: [&str; 2] = [
    r#"[5, "OnJsonApiEvent_lol-gameflow_v1_gameflow-phase"]"#,
    r#"[5, "OnJsonApiEvent_lol-champ-select_v1_session"]"#,
];

/// A frame that could not be turned into a [`ClientEvent`].
#[derive(Debug, Error)]
pub enum MalformedEvent {
    #[error("frame is not valid JSON: {0}")]
    Json(#[from] serde_json::Error),

    #[error("frame is not an event envelope")]
    NotAnEnvelope,

    #[error("unexpected payload for {uri}: {source}")]
    Payload {
        uri: String,
        source: serde_json::Error,
    },
}

/// Typed event pushed by the client.
#[derive(Debug, Clone)]
pub enum ClientEvent {
    GameflowPhase(FlowPhase),
    ChampSelectSession(Box<ChampSelectSessionDto>),
    /// Event on a resource we do not act on, or without data.
    Ignored { uri: String },
}

impl ClientEvent {
    /// Validate the envelope of a raw frame and decode its payload.
    pub fn decode(frame: &str) -> Result<Self, MalformedEvent> {
        let envelope: Value = serde_json::from_str(frame)?;
        let payload = envelope
            .as_array()
            .filter(|parts| parts.len() >= 3)
            .and_then(|parts| parts[2].as_object())
            .ok_or(MalformedEvent::NotAnEnvelope)?;

        let uri = payload
            .get("uri")
            .and_then(Value::as_str)
            .ok_or(MalformedEvent::NotAnEnvelope)?
            .to_string();
        let data = match payload.get("data") {
            None | Some(Value::Null) => return Ok(Self::Ignored { uri }),
            Some(data) => data.clone(),
        };

        let event = match uri.as_str() {
            GAMEFLOW_PHASE_ROUTE => serde_json::from_value(data).map(Self::GameflowPhase),
            CHAMP_SELECT_SESSION_ROUTE => serde_json::from_value(data)
                .map(|session| Self::ChampSelectSession(Box::new(session))),
            _ => return Ok(Self::Ignored { uri }),
        };

        event.map_err(|source| MalformedEvent::Payload { uri, source })
    }
}

/// Source of raw event frames.
#[async_trait]
pub trait EventSource: Send {
    /// Next text frame, or `None` once the stream ended normally.
    async fn next_frame(&mut self) -> LcuApiResponse<Option<String>>;
}

/// WebSocket connection to the client's event endpoint.
pub struct EventStream {
    socket: WebSocketStream<MaybeTlsStream<TcpStream>>,
}

impl EventStream {
    const USERNAME: &'static str = "riot";

    /// Connect to the client described by `credentials` and subscribe to the
    /// events the companion reacts to.
    pub async fn connect(credentials: &Credentials) -> LcuApiResponse<Self> {
        let tls = native_tls::TlsConnector::builder()
            .danger_accept_invalid_certs(true)
            .build()?;

        Self::open(
            &credentials.ws_url(),
            &credentials.token,
            Some(Connector::NativeTls(tls)),
        )
        .await
    }

    pub async fn open(
        url: &str,
        token: &str,
        connector: Option<Connector>,
    ) -> LcuApiResponse<Self> {
        let mut request = url.into_client_request()?;
        let auth = STANDARD.encode(format!("{}:{}", Self::USERNAME, token));
        let header = HeaderValue::from_str(&format!("Basic {}", auth))
            .map_err(|e| LcuApiError::InvalidHeader(e.to_string()))?;
        request.headers_mut().insert(AUTHORIZATION, header);

        let (mut socket, _) = connect_async_tls_with_config(request, None, false, connector)
            .await
            .map_err(map_ws_error)?;

        for subscription in SUBSCRIPTIONS {
            socket
                .send(Message::Text(subscription.to_string()))
                .await
                .map_err(map_ws_error)?;
        }
        debug!("[LCU::EVENTS] subscribed to {} events", SUBSCRIPTIONS.len());

        Ok(Self { socket })
    }
}

#[async_trait]
impl EventSource for EventStream {
    async fn next_frame(&mut self) -> LcuApiResponse<Option<String>> {
        while let Some(message) = self.socket.next().await {
            match message.map_err(map_ws_error)? {
                Message::Text(text) if text.is_empty() => continue,
                Message::Text(text) => {
                    trace!("[LCU::EVENTS] frame of {} bytes", text.len());
                    return Ok(Some(text));
                }
                Message::Close(frame) => {
                    debug!("[LCU::EVENTS] closed by the client: {:?}", frame);
                    return Ok(None);
                }
                _ => continue,
            }
        }

        Ok(None)
    }
}

fn map_ws_error(error: tungstenite::Error) -> LcuApiError {
    use std::io::ErrorKind;

    match error {
        tungstenite::Error::Io(e) if e.kind() == ErrorKind::ConnectionRefused => {
            LcuApiError::HostUnavailable
        }
        tungstenite::Error::Io(e)
            if matches!(
                e.kind(),
                ErrorKind::ConnectionReset | ErrorKind::ConnectionAborted | ErrorKind::UnexpectedEof
            ) =>
        {
            LcuApiError::StreamClosed
        }
        tungstenite::Error::ConnectionClosed
        | tungstenite::Error::AlreadyClosed
        | tungstenite::Error::Protocol(ProtocolError::ResetWithoutClosingHandshake) => {
            LcuApiError::StreamClosed
        }
        other => LcuApiError::WebSocket(other),
    }
}
