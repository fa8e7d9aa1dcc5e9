//! HTTP client error types.

use reqwest::StatusCode;
use thiserror::Error;

/// Errors that can occur when talking to the catalog API.
#[derive(Error, Debug)]
pub enum FetchError {
    /// The server answered with a non-success status.
    #[error("{message}")]
    Api { status: u16, message: String },

    /// The request never produced a response.
    #[error("Request failed: {0}")]
    Transport(#[from] reqwest::Error),

    /// The response body was not the expected JSON.
    #[error("Failed to parse response: {0}")]
    Decode(String),

    /// Invalid URL.
    #[error("Invalid URL: {0}")]
    InvalidUrl(String),
}

impl FetchError {
    /// Build an [`FetchError::Api`] from a response status.
    ///
    /// The message reads `Failed to fetch: Not Found`, using the status
    /// line's reason phrase.
    pub fn from_status(status: StatusCode) -> Self {
        let reason = status
            .canonical_reason()
            .map(str::to_string)
            .unwrap_or_else(|| status.as_str().to_string());
        FetchError::Api {
            status: status.as_u16(),
            message: format!("Failed to fetch: {}", reason),
        }
    }

    /// Build an [`FetchError::Api`] from a bare status code.
    pub fn api(status: u16) -> Self {
        match StatusCode::from_u16(status) {
            Ok(status) => Self::from_status(status),
            Err(_) => FetchError::Api {
                status,
                message: format!("Failed to fetch: {}", status),
            },
        }
    }

    /// HTTP status, when the server answered.
    pub fn status(&self) -> Option<u16> {
        match self {
            FetchError::Api { status, .. } => Some(*status),
            FetchError::Transport(e) => e.status().map(|s| s.as_u16()),
            _ => None,
        }
    }

    /// Whether the server reported the resource as missing.
    pub fn is_not_found(&self) -> bool {
        self.status() == Some(StatusCode::NOT_FOUND.as_u16())
    }
}

impl From<serde_json::Error> for FetchError {
    fn from(e: serde_json::Error) -> Self {
        FetchError::Decode(e.to_string())
    }
}

impl From<url::ParseError> for FetchError {
    fn from(e: url::ParseError) -> Self {
        FetchError::InvalidUrl(e.to_string())
    }
}
