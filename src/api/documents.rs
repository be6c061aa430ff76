//! Documents service calls: filtered listing and registration.

use serde::Deserialize;
use tracing::{debug, info};

use super::types::{Document, DocumentFilter, NewDocument};
use super::{RegistryClient, AUTH_HEADER};
use crate::error::{ApiError, ApiResult};

#[derive(Deserialize)]
struct ListEnvelope {
    documents: Vec<Document>,
}

#[derive(Deserialize)]
struct CreateEnvelope {
    #[allow(dead_code)]
    success: bool,
    document: Document,
}

impl RegistryClient {
    /// List documents in the server's order. Filtering is entirely
    /// server-side; the result is returned as-is, never re-filtered or
    /// re-sorted here.
    pub async fn list_documents(&self, filter: &DocumentFilter) -> ApiResult<Vec<Document>> {
        let mut req = self.http.get(self.endpoints.documents.clone());
        let pairs = filter.query_pairs();
        if !pairs.is_empty() {
            req = req.query(&pairs);
        }
        let resp = req.send().await?;
        if !resp.status().is_success() {
            let (status, message) = Self::failure_parts(resp, "Failed to fetch documents").await;
            debug!(status, "documents.list failed");
            return Err(ApiError::fetch(message));
        }
        let env: ListEnvelope = resp.json().await?;
        debug!(count = env.documents.len(), "documents.list ok");
        Ok(env.documents)
    }

    /// Register a new document. Number, status and registration date are
    /// assigned server-side. A rejected token maps to an auth error, a
    /// rejected payload to a validation error.
    pub async fn create_document(&self, token: &str, doc: &NewDocument) -> ApiResult<Document> {
        let resp = self
            .http
            .post(self.endpoints.documents.clone())
            .header(AUTH_HEADER, token)
            .json(doc)
            .send()
            .await?;
        if !resp.status().is_success() {
            let (status, message) = Self::failure_parts(resp, "Failed to create document").await;
            debug!(status, "documents.create rejected");
            return Err(ApiError::classify(status, message));
        }
        let env: CreateEnvelope = resp.json().await?;
        info!(number = %env.document.number, "documents.create ok");
        Ok(env.document)
    }
}
