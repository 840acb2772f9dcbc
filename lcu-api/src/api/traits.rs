use std::fmt::Debug;

use async_trait::async_trait;
use reqwest::Method;
use serde::de::DeserializeOwned;
use serde_json::Value;

use crate::types::{LcuApiError, LcuApiResponse};

/// Trait implemented by structures capable of performing raw requests to the LCU.
///
/// Every typed endpoint trait is built on top of it, so a fake implementing
/// only this trait gets the whole API surface.
#[async_trait]
pub trait LcuRequest: Send + Sync + Debug {
    /// A `204 No Content` or an empty body resolves to [`Value::Null`].
    async fn request(&self, method: Method, path: &str, body: Option<Value>)
    -> LcuApiResponse<Value>;

    async fn get(&self, path: &str) -> LcuApiResponse<Value> {
        self.request(Method::GET, path, None).await
    }

    async fn post(&self, path: &str, body: Option<Value>) -> LcuApiResponse<Value> {
        self.request(Method::POST, path, body).await
    }

    async fn patch(&self, path: &str, body: Value) -> LcuApiResponse<Value> {
        self.request(Method::PATCH, path, Some(body)).await
    }
}

/// Decode a raw response into its DTO.
pub fn decode<T: DeserializeOwned>(value: Value) -> LcuApiResponse<T> {
    serde_json::from_value(value).map_err(LcuApiError::Serde)
}
