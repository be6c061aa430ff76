//! Authentication service calls: credential login and token introspection.

use serde::{Deserialize, Serialize};
use tracing::debug;

use super::types::User;
use super::{RegistryClient, AUTH_HEADER};
use crate::error::{ApiError, ApiResult};

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LoginResponse {
    pub token: String,
    pub user: User,
}

#[derive(Deserialize)]
struct UserEnvelope {
    user: User,
}

impl RegistryClient {
    /// Exchange credentials for a token and the authenticated user.
    /// Any non-success response is an auth failure carrying the service's
    /// message when it sent one.
    pub async fn login(&self, email: &str, password: &str) -> ApiResult<LoginResponse> {
        let resp = self
            .http
            .post(self.endpoints.auth.clone())
            .json(&serde_json::json!({ "email": email, "password": password }))
            .send()
            .await?;
        if !resp.status().is_success() {
            let (status, message) = Self::failure_parts(resp, "Login failed").await;
            debug!(status, "auth.login rejected");
            return Err(ApiError::auth(message));
        }
        let out: LoginResponse = resp.json().await?;
        debug!(user = %out.user.email, "auth.login ok");
        Ok(out)
    }

    /// Resolve a token to its user. Invalid tokens and service errors are
    /// not distinguished at this layer: both come back as an auth failure.
    pub async fn current_user(&self, token: &str) -> ApiResult<User> {
        let resp = self
            .http
            .get(self.endpoints.auth.clone())
            .header(AUTH_HEADER, token)
            .send()
            .await?;
        if !resp.status().is_success() {
            let (status, message) = Self::failure_parts(resp, "Failed to get user").await;
            debug!(status, "auth.current_user rejected");
            return Err(ApiError::auth(message));
        }
        let env: UserEnvelope = resp.json().await?;
        Ok(env.user)
    }
}
