//! The tri-state access decision.

use serde::{Deserialize, Serialize};
use std::fmt;

/// Result of a permission check.
///
/// `Unknown` is the abstain value: a policy that has nothing to say about a
/// request returns it so that the next policy, or the ACL, can decide.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub enum Access {
    Grant,
    Deny,
    #[default]
    Unknown,
}

impl Access {
    /// Build a decisive access value from a flag.
    pub const fn from_granted(granted: bool) -> Self {
        if granted {
            Access::Grant
        } else {
            Access::Deny
        }
    }

    /// Whether this value settles the request.
    pub const fn is_decisive(self) -> bool {
        !matches!(self, Access::Unknown)
    }

    /// Enforcement view: only an explicit grant gives access.
    pub const fn to_bool(self) -> bool {
        matches!(self, Access::Grant)
    }

    /// Return `self` if decisive, otherwise evaluate `next`.
    pub fn or_else(self, next: impl FnOnce() -> Access) -> Access {
        if self.is_decisive() {
            self
        } else {
            next()
        }
    }
}

impl fmt::Display for Access {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            Access::Grant => "GRANT",
            Access::Deny => "DENY",
            Access::Unknown => "UNKNOWN",
        };
        f.write_str(s)
    }
}
