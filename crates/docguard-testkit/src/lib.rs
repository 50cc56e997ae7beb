//! # Docguard Testkit
//!
//! Testing utilities for Docguard.
//!
//! ## Overview
//!
//! This crate provides:
//!
//! - **Fixtures**: a service wired with a creator policy, a cast of
//!   principals and ready-made documents and ACPs
//! - **Generators**: Proptest strategies for principals, entries and ACPs
//!
//! ## Test Fixtures
//!
//! ```rust
//! use docguard_testkit::fixtures::SecurityFixture;
//! use docguard::Access;
//!
//! let fixture = SecurityFixture::new();
//! let doc = fixture.locked_document("Bubbles", "Bodie");
//! let access = fixture.check(&doc, &fixture.empty_acp(), &fixture.bodie(), "Write");
//! assert_eq!(access, Access::Deny);
//! ```
//!
//! ## Property Testing
//!
//! ```rust,ignore
//! use proptest::prelude::*;
//! use docguard_testkit::generators::{acp, principal};
//!
//! proptest! {
//!     #[test]
//!     fn check_is_deterministic(p in principal(), a in acp()) {
//!         // ...
//!     }
//! }
//! ```

pub mod fixtures;
pub mod generators;

pub use fixtures::{CreatorPolicy, SecurityFixture, CREATOR_POLICY};
pub use generators::{ace, acp, permission_name, principal};
