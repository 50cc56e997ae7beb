//! Error types for the permission registry.

use thiserror::Error;

/// Errors that can occur when contributing to the registry.
///
/// Queries never fail; only registration calls return these.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum PermsError {
    /// A descriptor has no name.
    #[error("invalid {kind} descriptor: empty name")]
    EmptyName {
        /// Which descriptor kind was rejected.
        kind: &'static str,
    },

    /// Unregistering a descriptor that was never registered.
    #[error("{kind} descriptor not registered: {name}")]
    NotRegistered {
        kind: &'static str,
        name: String,
    },
}

/// Result type for registry operations.
pub type Result<T> = std::result::Result<T, PermsError>;
