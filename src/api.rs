//! Typed HTTP façade over the three registry services.
//! All network access in the crate goes through [`RegistryClient`]; no other
//! component issues raw requests. Response JSON is parsed only after the
//! status is confirmed successful; failure bodies are reduced to one
//! [`ApiError`](crate::error::ApiError) per operation.

pub mod activity;
pub mod auth;
pub mod documents;
pub mod types;

use crate::config::Endpoints;
use crate::error::ApiResult;

/// Header carrying the session token on authenticated requests.
/// The services never use cookies or the Authorization header.
pub const AUTH_HEADER: &str = "X-Auth-Token";

#[derive(Clone)]
pub struct RegistryClient {
    pub(crate) http: reqwest::Client,
    pub(crate) endpoints: Endpoints,
}

impl RegistryClient {
    pub fn new(endpoints: Endpoints) -> ApiResult<Self> {
        let http = reqwest::Client::builder().build()?;
        Ok(Self { http, endpoints })
    }

    pub fn endpoints(&self) -> &Endpoints {
        &self.endpoints
    }

    /// Extract status and service message from a failed response.
    /// Non-success bodies carry `{"error": string}` when the service had
    /// anything to say; otherwise the caller's default message stands.
    pub(crate) async fn failure_parts(resp: reqwest::Response, default_msg: &str) -> (u16, String) {
        let status = resp.status().as_u16();
        let message = match resp.json::<serde_json::Value>().await {
            Ok(body) => body
                .get("error")
                .and_then(|e| e.as_str())
                .map(|s| s.to_string())
                .unwrap_or_else(|| default_msg.to_string()),
            Err(_) => default_msg.to_string(),
        };
        (status, message)
    }
}
