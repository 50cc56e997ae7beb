//! Error types for policy deployment.

use thiserror::Error;

/// Errors that can occur when deploying policies.
///
/// Evaluation never returns errors: a denial is an [`Access`] value and a
/// misbehaving policy panics.
///
/// [`Access`]: docguard_core::Access
#[derive(Debug, Error, PartialEq, Eq)]
pub enum PolicyError {
    /// Descriptor without a name.
    #[error("invalid policy descriptor: empty name")]
    EmptyName,

    /// No factory registered under the descriptor's class key.
    #[error("unknown policy class {class} for policy {name}")]
    UnknownClass { name: String, class: String },

    /// A new policy descriptor without a class.
    #[error("policy {0} has no class")]
    MissingClass(String),

    /// No policy deployed under this name.
    #[error("policy not registered: {0}")]
    NotRegistered(String),
}

/// Result type for policy operations.
pub type Result<T> = std::result::Result<T, PolicyError>;
