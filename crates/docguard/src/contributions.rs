//! Contribution bundles.
//!
//! A bundle groups every descriptor kind the engine accepts so that a whole
//! deployment unit can be loaded from one JSON document:
//!
//! ```json
//! {
//!   "permissions": [{ "name": "CustomCompoundPerm", "include": ["Read"] }],
//!   "visibility": [{ "doc_type": "Section", "items": [{ "permission": "Read", "order": 10 }] }],
//!   "document_types": [{ "name": "Section", "parent": "Folder" }],
//!   "policies": [{ "name": "creator", "class": "creator", "order": 10 }]
//! }
//! ```

use std::path::Path;

use serde::{Deserialize, Serialize};

use docguard_perms::{DocumentTypeDescriptor, PermissionDescriptor, VisibilityDescriptor};
use docguard_policy::PolicyDescriptor;

use crate::error::Result;

/// Descriptors of one deployment unit, applied in field order.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct Contributions {
    pub permissions: Vec<PermissionDescriptor>,
    pub visibility: Vec<VisibilityDescriptor>,
    pub document_types: Vec<DocumentTypeDescriptor>,
    pub policies: Vec<PolicyDescriptor>,
}

impl Contributions {
    /// Parse a bundle from JSON.
    pub fn from_json(json: &str) -> Result<Self> {
        Ok(serde_json::from_str(json)?)
    }

    /// Read a bundle from a JSON file.
    pub fn from_file(path: impl AsRef<Path>) -> Result<Self> {
        let json = std::fs::read_to_string(path)?;
        Self::from_json(&json)
    }

    /// Total number of descriptors.
    pub fn len(&self) -> usize {
        self.permissions.len()
            + self.visibility.len()
            + self.document_types.len()
            + self.policies.len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

/// Outcome of deploying a bundle.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct DeployReport {
    /// Descriptors applied.
    pub applied: usize,

    /// One message per rejected descriptor.
    pub skipped: Vec<String>,
}

impl DeployReport {
    /// Whether every descriptor was applied.
    pub fn is_clean(&self) -> bool {
        self.skipped.is_empty()
    }
}
