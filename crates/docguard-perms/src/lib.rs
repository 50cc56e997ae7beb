//! # Docguard Permissions
//!
//! The permission registry: which permissions exist, which compound
//! permissions imply which others, and which permissions are offered to
//! users per document type.
//!
//! ## Overview
//!
//! The registry is fed with ordered contribution descriptors:
//!
//! - [`PermissionDescriptor`]: defines a permission, its includes and aliases
//! - [`VisibilityDescriptor`]: user visible permissions for a document type
//!   (or the default list when the type is empty)
//! - [`DocumentTypeDescriptor`]: type hierarchy used for visibility fallback
//!
//! Every change replays all descriptors in registration order into a fresh
//! [`PermissionTable`] which is then published atomically. Readers always
//! see a complete table.
//!
//! ## Usage
//!
//! ```rust
//! use docguard_perms::{PermissionProvider, PermissionRegistry};
//!
//! let registry = PermissionRegistry::with_defaults();
//! assert_eq!(registry.permission_groups("Read"), vec!["ReadRemove", "ReadWrite"]);
//! assert!(registry.permission_groups("Unknown").is_empty());
//! ```

pub mod defaults;
pub mod descriptor;
pub mod error;
pub mod provider;
pub mod registry;
pub mod table;

pub use descriptor::{
    DocumentTypeDescriptor, PermissionDescriptor, UserVisiblePermission, VisibilityDescriptor,
    VisibilityItem,
};
pub use error::{PermsError, Result};
pub use provider::PermissionProvider;
pub use registry::PermissionRegistry;
pub use table::PermissionTable;
