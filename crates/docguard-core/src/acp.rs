//! Access control entries, lists and policies.
//!
//! An [`Acp`] is the merged view of a document's security: an ordered list
//! of named [`Acl`]s (usually the local ACL first, then the inherited one),
//! each holding an ordered list of [`Ace`]s. Order is significant: the first
//! matching entry decides.

use serde::{Deserialize, Serialize};

use crate::access::Access;
use crate::error::{CoreError, Result};

/// Name of the ACL holding entries set directly on a document.
pub const LOCAL_ACL: &str = "local";

/// Name of the ACL holding entries inherited from ancestors.
pub const INHERITED_ACL: &str = "inherited";

/// A single access control entry.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Ace {
    /// User or group name this entry applies to.
    pub principal: String,

    /// The permission granted or denied.
    pub permission: String,

    /// `true` for a grant, `false` for a deny.
    pub granted: bool,
}

impl Ace {
    /// Create a validated entry.
    pub fn new(
        principal: impl Into<String>,
        permission: impl Into<String>,
        granted: bool,
    ) -> Result<Self> {
        let ace = Self {
            principal: principal.into(),
            permission: permission.into(),
            granted,
        };
        if ace.principal.is_empty() {
            return Err(CoreError::InvalidAce("empty principal".into()));
        }
        if ace.permission.is_empty() {
            return Err(CoreError::InvalidAce(format!(
                "empty permission for {}",
                ace.principal
            )));
        }
        Ok(ace)
    }

    /// A granting entry. Not validated, intended for literals.
    pub fn grant(principal: &str, permission: &str) -> Self {
        Self {
            principal: principal.to_string(),
            permission: permission.to_string(),
            granted: true,
        }
    }

    /// A denying entry. Not validated, intended for literals.
    pub fn deny(principal: &str, permission: &str) -> Self {
        Self {
            principal: principal.to_string(),
            permission: permission.to_string(),
            granted: false,
        }
    }

    /// Whether this entry concerns one of `principals` and one of `permissions`.
    pub fn matches(&self, principals: &[String], permissions: &[String]) -> bool {
        principals.iter().any(|p| *p == self.principal)
            && permissions.iter().any(|p| *p == self.permission)
    }
}

/// A named, ordered list of entries.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct Acl {
    pub name: String,
    #[serde(default)]
    pub entries: Vec<Ace>,
}

impl Acl {
    /// Create an empty ACL.
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            entries: Vec::new(),
        }
    }

    /// Append an entry.
    pub fn with(mut self, ace: Ace) -> Self {
        self.entries.push(ace);
        self
    }

    /// First matching entry decides; `Unknown` if none matches.
    pub fn access(&self, principals: &[String], permissions: &[String]) -> Access {
        self.entries
            .iter()
            .find(|ace| ace.matches(principals, permissions))
            .map(|ace| Access::from_granted(ace.granted))
            .unwrap_or(Access::Unknown)
    }
}

/// The merged access control policy of a document.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct Acp {
    #[serde(default)]
    pub acls: Vec<Acl>,
}

impl Acp {
    /// Create an empty ACP.
    pub fn new() -> Self {
        Self::default()
    }

    /// Append an ACL (evaluated after the existing ones).
    pub fn with_acl(mut self, acl: Acl) -> Self {
        self.acls.push(acl);
        self
    }

    /// Get an ACL by name.
    pub fn acl(&self, name: &str) -> Option<&Acl> {
        self.acls.iter().find(|acl| acl.name == name)
    }

    /// Append an entry to the named ACL, creating it at the end if missing.
    pub fn add_ace(&mut self, acl_name: &str, ace: Ace) -> Result<()> {
        let ace = Ace::new(ace.principal, ace.permission, ace.granted)?;
        match self.acls.iter_mut().find(|acl| acl.name == acl_name) {
            Some(acl) => acl.entries.push(ace),
            None => self.acls.push(Acl::new(acl_name).with(ace)),
        }
        Ok(())
    }

    /// Build the merged ACP of a document from its local entries and the
    /// merged ACP of its parent.
    ///
    /// All parent ACLs are flattened into a single [`INHERITED_ACL`] placed
    /// after the document's own ACLs.
    pub fn merged(local: &Acp, parent: Option<&Acp>) -> Acp {
        let mut merged = Acp {
            acls: local
                .acls
                .iter()
                .filter(|acl| acl.name != INHERITED_ACL)
                .cloned()
                .collect(),
        };
        if let Some(parent) = parent {
            let inherited: Vec<Ace> = parent
                .acls
                .iter()
                .flat_map(|acl| acl.entries.iter().cloned())
                .collect();
            if !inherited.is_empty() {
                merged.acls.push(Acl {
                    name: INHERITED_ACL.to_string(),
                    entries: inherited,
                });
            }
        }
        merged
    }

    /// Walk ACLs in order, entries in order; the first entry binding one of
    /// `principals` to one of `permissions` decides.
    pub fn access(&self, principals: &[String], permissions: &[String]) -> Access {
        self.acls
            .iter()
            .map(|acl| acl.access(principals, permissions))
            .find(|access| access.is_decisive())
            .unwrap_or(Access::Unknown)
    }
}
