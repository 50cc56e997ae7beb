//! Error types for the security service.

use docguard_perms::PermsError;
use docguard_policy::PolicyError;
use thiserror::Error;

/// Errors that can occur when configuring the security service.
///
/// A denied permission is never an error, see [`docguard_core::Access`].
#[derive(Debug, Error)]
pub enum SecurityError {
    /// Permission registry error.
    #[error("permission error: {0}")]
    Permission(#[from] PermsError),

    /// Policy deployment error.
    #[error("policy error: {0}")]
    Policy(#[from] PolicyError),

    /// Malformed configuration or contribution file.
    #[error("json error: {0}")]
    Json(#[from] serde_json::Error),

    /// Configuration or contribution file could not be read.
    #[error("io error: {0}")]
    Io(#[from] std::io::Error),
}

/// Result type for security service operations.
pub type Result<T> = std::result::Result<T, SecurityError>;
