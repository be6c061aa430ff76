//! Endpoint and storage-path configuration.
//! The three registry services live at fixed, independently deployed base
//! URLs, so each one is configured separately rather than derived from a
//! shared root.

use std::env;
use std::path::PathBuf;

use anyhow::{Context, Result};
use reqwest::Url;

pub const ENV_AUTH_URL: &str = "NOTARIUM_AUTH_URL";
pub const ENV_DOCUMENTS_URL: &str = "NOTARIUM_DOCUMENTS_URL";
pub const ENV_ACTIVITY_URL: &str = "NOTARIUM_ACTIVITY_URL";
pub const ENV_TOKEN_FILE: &str = "NOTARIUM_TOKEN_FILE";

/// Base URLs of the three registry services.
#[derive(Debug, Clone)]
pub struct Endpoints {
    pub auth: Url,
    pub documents: Url,
    pub activity: Url,
}

impl Endpoints {
    pub fn new(auth: &str, documents: &str, activity: &str) -> Result<Self> {
        Ok(Self {
            auth: Url::parse(auth).context("invalid auth service URL")?,
            documents: Url::parse(documents).context("invalid documents service URL")?,
            activity: Url::parse(activity).context("invalid activity service URL")?,
        })
    }

    /// Read all three base URLs from the environment.
    pub fn from_env() -> Result<Self> {
        let auth = env::var(ENV_AUTH_URL).context(ENV_AUTH_URL)?;
        let documents = env::var(ENV_DOCUMENTS_URL).context(ENV_DOCUMENTS_URL)?;
        let activity = env::var(ENV_ACTIVITY_URL).context(ENV_ACTIVITY_URL)?;
        Self::new(&auth, &documents, &activity)
    }
}

/// Location of the persisted session token: the env override when set,
/// otherwise `~/.notarium/token`.
pub fn default_token_path() -> PathBuf {
    if let Ok(p) = env::var(ENV_TOKEN_FILE) {
        if !p.is_empty() {
            return PathBuf::from(p);
        }
    }
    let home = env::var("HOME")
        .or_else(|_| env::var("USERPROFILE"))
        .unwrap_or_else(|_| ".".to_string());
    PathBuf::from(home).join(".notarium").join("token")
}
