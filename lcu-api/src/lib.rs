//! Client for the League client's local API (LCU).
//!
//! The library offers typed wrappers around the REST endpoints used by the
//! companion, the push event stream and the discovery of the running client.

pub mod api;
pub mod discovery;
pub mod events;
pub mod types;

pub use api::client::LcuClient;
pub use api::lol::{
    ChampSelectApi, ChatApi, GameDataApi, GameflowApi, LcuApiFull, MatchHistoryApi, SummonerApi,
};
pub use api::traits::LcuRequest;
pub use discovery::Credentials;
pub use events::{ClientEvent, EventSource, EventStream, MalformedEvent};
pub use reqwest::{Method, StatusCode};
pub use types::{LcuApiError, LcuApiResponse};
