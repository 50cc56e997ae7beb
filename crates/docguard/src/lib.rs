//! # Docguard
//!
//! Permission resolution for a document repository: a registry of compound
//! permissions, a chain of pluggable security policies and ACL evaluation.
//!
//! ## Overview
//!
//! - **Permissions**: named, atomic or compound. Granting a compound
//!   permission grants everything it includes, transitively.
//! - **Policies**: ordered rules consulted before the ACL. The first policy
//!   returning `Grant` or `Deny` wins, lower order first.
//! - **ACL**: the document's merged ACP. The first entry binding one of the
//!   caller's principals to one of the expanded permissions decides.
//!
//! ## Usage
//!
//! ```rust
//! use docguard::{SecurityService, SecurityConfig};
//! use docguard::core::{Access, Ace, Acl, Acp, Lock, MemoryDocument, Principal};
//!
//! let service = SecurityService::new(SecurityConfig::default());
//!
//! let doc = MemoryDocument::new("doc-1", "File").with_lock(Lock::new("Bubbles", 0));
//! let acp = Acp::new().with_acl(Acl::new("local").with(Ace::grant("Everyone", "ReadWrite")));
//!
//! let bodie = Principal::new("Bodie");
//! assert_eq!(service.check_permission(&doc, &acp, &bodie, "Read"), Access::Grant);
//! assert_eq!(service.check_permission(&doc, &acp, &bodie, "Write"), Access::Deny);
//! ```
//!
//! ## Re-exports
//!
//! - `docguard::core` - Access, principals, ACPs, the document contract
//! - `docguard::perms` - Permission registry
//! - `docguard::policy` - Security policies

pub mod config;
pub mod contributions;
pub mod error;
pub mod service;

pub use docguard_core as core;
pub use docguard_perms as perms;
pub use docguard_policy as policy;

pub use config::SecurityConfig;
pub use contributions::{Contributions, DeployReport};
pub use error::{Result, SecurityError};
pub use service::SecurityService;

pub use docguard_core::{Access, Acp, Document, Principal};
pub use docguard_perms::{PermissionProvider, PermissionRegistry, UserVisiblePermission};
pub use docguard_policy::{
    PolicyDescriptor, PolicyFactories, SecurityPolicy, SecurityPolicyService,
};
