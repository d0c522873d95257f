//! Error types for API calls.

use serde_json::Value;
use thiserror::Error;

/// A response outside the 2xx range.
///
/// `payload` is the parsed JSON body, or `Value::Null` when the response
/// was not JSON. Callers match on `status` and the payload shape to recover
/// domain-specific messages.
#[derive(Debug, Clone, PartialEq, Error)]
#[error("{message}")]
pub struct HttpError {
    pub status: u16,
    pub payload: Value,
    pub message: String,
}

impl HttpError {
    /// Build an error, preferring the backend's `{"detail": "..."}` text.
    pub fn new(status: u16, payload: Value) -> Self {
        let message = payload
            .get("detail")
            .and_then(Value::as_str)
            .map(str::to_owned)
            .unwrap_or_else(|| format!("Request failed with status {}", status));
        Self {
            status,
            payload,
            message,
        }
    }
}

/// Everything that can go wrong issuing an API request.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum ApiError {
    #[error(transparent)]
    Http(#[from] HttpError),

    #[error("network error: {0}")]
    Transport(String),

    #[error("invalid response body: {0}")]
    Decode(String),

    #[error("invalid request body: {0}")]
    Encode(String),
}

impl ApiError {
    /// HTTP status, if the server answered.
    pub fn status(&self) -> Option<u16> {
        match self {
            ApiError::Http(err) => Some(err.status),
            _ => None,
        }
    }

    /// Parsed error payload, if the server answered.
    pub fn payload(&self) -> Option<&Value> {
        match self {
            ApiError::Http(err) => Some(&err.payload),
            _ => None,
        }
    }

    pub fn is_not_found(&self) -> bool {
        self.status() == Some(404)
    }
}
