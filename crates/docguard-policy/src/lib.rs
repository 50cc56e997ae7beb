//! # Docguard Policies
//!
//! Pluggable security policies evaluated before ACLs.
//!
//! ## Overview
//!
//! A [`SecurityPolicy`] looks at a document, its merged ACP and the caller
//! and answers `Grant`, `Deny` or `Unknown`. The [`SecurityPolicyService`]
//! holds the deployed policies sorted by ascending `order` and returns the
//! first decisive answer. When every policy abstains the caller falls back
//! to ACL evaluation.
//!
//! Policies are deployed from [`PolicyDescriptor`]s. The descriptor's
//! `class` is looked up in an explicit [`PolicyFactories`] table; there is
//! no runtime reflection.
//!
//! ## Built-in Policies
//!
//! - [`LockSecurityPolicy`] (`"lock"`): a document locked by someone else
//!   cannot be modified
//! - [`CheckInSecurityPolicy`] (`"checkin"`): checked-in documents, versions
//!   and proxies cannot be modified
//!
//! Both decide what counts as a write through the permission registry, so a
//! compound contributed later that includes `Write` is restricted as well.

pub mod builtin;
pub mod descriptor;
pub mod error;
pub mod factory;
pub mod policy;
pub mod service;

pub use builtin::{CheckInSecurityPolicy, LockSecurityPolicy, CHECKIN_POLICY, LOCK_POLICY};
pub use descriptor::PolicyDescriptor;
pub use error::{PolicyError, Result};
pub use factory::{PolicyFactory, PolicyFactories};
pub use policy::SecurityPolicy;
pub use service::{PolicyChain, SecurityPolicyService, CHECKIN_POLICY_ORDER, LOCK_POLICY_ORDER};
