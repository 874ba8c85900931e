use reqwest::StatusCode;
use thiserror::Error;

use crate::domain::errors::DomainError;

#[derive(Debug, Error)]
pub enum ClientError {
    /// The backend answered 401 or 403 to an authenticated call.
    #[error("Unauthorized ({status})")]
    Unauthorized { status: u16 },

    /// Any other non-2xx answer. `error` is the body's JSON `error` field.
    #[error("{}", http_message(*status, error.as_deref(), body))]
    Http {
        status: u16,
        error: Option<String>,
        body: String,
    },

    /// A request the page refused or the server rejected, with the message to show.
    #[error("{0}")]
    Rejected(String),

    #[error("{0}")]
    Validation(String),

    #[error("Network error: {0}")]
    Transport(String),

    #[error("Invalid response: {0}")]
    Decode(String),

    #[error("Storage error: {0}")]
    Storage(String),
}

fn http_message(status: u16, error: Option<&str>, body: &str) -> String {
    if let Some(error) = error {
        return error.to_string();
    }
    let body = body.trim();
    if !body.is_empty() {
        return body.to_string();
    }
    StatusCode::from_u16(status)
        .ok()
        .and_then(|s| s.canonical_reason())
        .unwrap_or("Request failed")
        .to_string()
}

impl ClientError {
    pub fn status(&self) -> Option<u16> {
        match self {
            ClientError::Unauthorized { status } | ClientError::Http { status, .. } => {
                Some(*status)
            }
            _ => None,
        }
    }

    /// The `error` field of a JSON error body, if the server sent one.
    pub fn server_error(&self) -> Option<&str> {
        match self {
            ClientError::Http { error, .. } => error.as_deref(),
            _ => None,
        }
    }
}

impl From<DomainError> for ClientError {
    fn from(e: DomainError) -> Self {
        match e {
            DomainError::OutOfStock => ClientError::Validation(e.to_string()),
            DomainError::InvalidInput(msg) => ClientError::Validation(msg),
            DomainError::Internal(msg) => ClientError::Storage(msg),
        }
    }
}

impl From<reqwest::Error> for ClientError {
    fn from(e: reqwest::Error) -> Self {
        if e.is_decode() {
            ClientError::Decode(e.to_string())
        } else {
            ClientError::Transport(e.to_string())
        }
    }
}

impl From<serde_json::Error> for ClientError {
    fn from(e: serde_json::Error) -> Self {
        ClientError::Decode(e.to_string())
    }
}
