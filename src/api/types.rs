//! Wire types shared by the registry services.
//! Field names follow the services' JSON exactly; date-ish fields stay
//! opaque ISO strings (the services may also emit null for them).

use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct User {
    pub id: i64,
    pub email: String,
    pub full_name: String,
    pub role: String,
    #[serde(default)]
    pub phone: Option<String>,
    #[serde(default)]
    pub region: Option<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct Document {
    pub id: i64,
    pub number: String,
    #[serde(rename = "type")]
    pub doc_type: String,
    #[serde(default)]
    pub date: Option<String>,
    #[serde(default)]
    pub registration_date: Option<String>,
    pub status: String,
    pub party1_name: String,
    pub party1_passport: String,
    #[serde(default)]
    pub party2_name: Option<String>,
    #[serde(default)]
    pub party2_passport: Option<String>,
    pub subject: String,
    #[serde(default)]
    pub notes: Option<String>,
    #[serde(default)]
    pub created_by_name: Option<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct Activity {
    pub id: i64,
    pub action_type: String,
    pub description: String,
    #[serde(default)]
    pub created_at: Option<String>,
    #[serde(default)]
    pub document_number: Option<String>,
}

/// Registration payload. The document number, status and registration date
/// are assigned server-side; optional fields are omitted from the body.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct NewDocument {
    pub document_type: String,
    pub document_date: String,
    pub party1_name: String,
    pub party1_passport: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub party2_name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub party2_passport: Option<String>,
    pub subject: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub notes: Option<String>,
}

/// Optional server-side document filter. Empty strings and the UI sentinel
/// values ("all", "all-status") count as absent.
#[derive(Debug, Clone, Default)]
pub struct DocumentFilter {
    pub search: Option<String>,
    pub doc_type: Option<String>,
    pub status: Option<String>,
}

impl DocumentFilter {
    pub fn search<S: Into<String>>(text: S) -> Self {
        Self { search: Some(text.into()), ..Default::default() }
    }

    pub fn is_empty(&self) -> bool {
        self.query_pairs().is_empty()
    }

    /// Query parameters to send, with absent/sentinel entries dropped.
    pub fn query_pairs(&self) -> Vec<(&'static str, String)> {
        let mut pairs = Vec::new();
        if let Some(s) = self.search.as_deref() {
            if !s.trim().is_empty() {
                pairs.push(("search", s.to_string()));
            }
        }
        if let Some(t) = self.doc_type.as_deref() {
            if !t.is_empty() && t != "all" {
                pairs.push(("type", t.to_string()));
            }
        }
        if let Some(st) = self.status.as_deref() {
            if !st.is_empty() && st != "all-status" {
                pairs.push(("status", st.to_string()));
            }
        }
        pairs
    }
}
