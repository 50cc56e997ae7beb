//! # Docguard Core
//!
//! Pure value types for the Docguard permission engine.
//!
//! This crate contains no registry and no policy logic. It defines what the
//! engine reasons about: access decisions, principals, access control
//! entries, locks and the document contract consumed by security policies.
//!
//! ## Key Types
//!
//! - [`Access`] - Tri-state decision (`Grant`, `Deny`, `Unknown`)
//! - [`Principal`] - A user name plus the groups it belongs to
//! - [`Acp`] - Ordered list of ACLs, each an ordered list of [`Ace`]s
//! - [`Document`] - What policies may ask of a document
//!
//! ## Principal Expansion
//!
//! ACL evaluation and most policies work on the expanded principal set,
//! see [`principals_to_check`].

pub mod access;
pub mod acp;
pub mod document;
pub mod error;
pub mod permissions;
pub mod principal;

pub use access::Access;
pub use acp::{Ace, Acl, Acp, INHERITED_ACL, LOCAL_ACL};
pub use document::{Document, Lock, MemoryDocument, PropertyValue};
pub use error::{CoreError, Result};
pub use permissions::{EVERYONE, EVERYTHING, SYSTEM_USERNAME};
pub use principal::{principals_to_check, Principal};
