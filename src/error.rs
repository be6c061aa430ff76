//! Unified error model for the registry client.
//! Every fallible API operation resolves to one of three structured kinds so
//! callers can branch on the kind while still rendering a plain message.

use serde::{Deserialize, Serialize};
use std::fmt::{Display, Formatter};

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum ApiError {
    /// Rejected credentials or rejected/expired token.
    Auth { message: String },
    /// The service rejected a request payload.
    Validation { message: String },
    /// Transport failure or a non-success HTTP status without a more specific cause.
    Fetch { message: String },
}

impl ApiError {
    pub fn message(&self) -> &str {
        match self {
            ApiError::Auth { message }
            | ApiError::Validation { message }
            | ApiError::Fetch { message } => message.as_str(),
        }
    }

    pub fn auth<S: Into<String>>(msg: S) -> Self { ApiError::Auth { message: msg.into() } }
    pub fn validation<S: Into<String>>(msg: S) -> Self { ApiError::Validation { message: msg.into() } }
    pub fn fetch<S: Into<String>>(msg: S) -> Self { ApiError::Fetch { message: msg.into() } }

    /// Classify a non-success HTTP status into an error kind.
    /// 401/403 are authentication/authorization, 400/422 are payload
    /// rejections, everything else is a plain fetch failure.
    pub fn classify(status: u16, message: String) -> Self {
        match status {
            401 | 403 => ApiError::Auth { message },
            400 | 422 => ApiError::Validation { message },
            _ => ApiError::Fetch { message },
        }
    }

    pub fn is_auth(&self) -> bool {
        matches!(self, ApiError::Auth { .. })
    }
}

impl Display for ApiError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        let kind = match self {
            ApiError::Auth { .. } => "auth",
            ApiError::Validation { .. } => "validation",
            ApiError::Fetch { .. } => "fetch",
        };
        write!(f, "{}: {}", kind, self.message())
    }
}

impl std::error::Error for ApiError {}

pub type ApiResult<T> = Result<T, ApiError>;

impl From<reqwest::Error> for ApiError {
    fn from(err: reqwest::Error) -> Self {
        // Transport-level failures carry no service message to salvage
        ApiError::Fetch { message: err.to_string() }
    }
}
