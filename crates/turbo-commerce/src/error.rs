//! Commerce error types.

use thiserror::Error;

/// Errors raised by the catalog domain.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum CommerceError {
    /// Unknown sort option.
    #[error("Invalid sort option: {0}")]
    InvalidSortOption(String),

    /// Unknown value for a named setting.
    #[error("Invalid {kind}: {value}")]
    InvalidOption { kind: String, value: String },
}

impl CommerceError {
    /// Build an [`CommerceError::InvalidOption`].
    pub fn invalid_option(kind: &str, value: &str) -> Self {
        CommerceError::InvalidOption {
            kind: kind.to_string(),
            value: value.to_string(),
        }
    }
}
