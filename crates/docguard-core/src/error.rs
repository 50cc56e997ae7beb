//! Error types for core primitives.

use thiserror::Error;

/// Errors that can occur when building core values.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum CoreError {
    /// An access control entry is missing its principal or permission.
    #[error("invalid ACE: {0}")]
    InvalidAce(String),

    /// A serialized lock could not be parsed.
    #[error("invalid lock: {0}")]
    InvalidLock(String),
}

/// Result type for core operations.
pub type Result<T> = std::result::Result<T, CoreError>;
