//! Activity service calls: the per-user action log.

use serde::Deserialize;
use tracing::debug;

use super::types::Activity;
use super::{RegistryClient, AUTH_HEADER};
use crate::error::{ApiError, ApiResult};

#[derive(Deserialize)]
struct ActivityEnvelope {
    activities: Vec<Activity>,
}

impl RegistryClient {
    /// Fetch the caller's activity log in the server's order (newest first
    /// as served; the client does not re-sort).
    pub async fn activity_history(&self, token: &str) -> ApiResult<Vec<Activity>> {
        let resp = self
            .http
            .get(self.endpoints.activity.clone())
            .header(AUTH_HEADER, token)
            .send()
            .await?;
        if !resp.status().is_success() {
            let (status, message) = Self::failure_parts(resp, "Failed to fetch activity").await;
            debug!(status, "activity.history failed");
            return Err(ApiError::classify(status, message));
        }
        let env: ActivityEnvelope = resp.json().await?;
        Ok(env.activities)
    }
}
