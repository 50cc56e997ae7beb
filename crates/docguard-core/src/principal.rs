//! Principals and principal expansion.

use serde::{Deserialize, Serialize};

use crate::permissions::EVERYONE;

/// An authenticated caller: a user name and the groups it belongs to.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Principal {
    /// The user name.
    pub name: String,

    /// Group memberships, in declaration order.
    #[serde(default)]
    pub groups: Vec<String>,
}

impl Principal {
    /// Create a principal with no groups.
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            groups: Vec::new(),
        }
    }

    /// Set the group memberships.
    pub fn with_groups<I, S>(mut self, groups: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.groups = groups.into_iter().map(Into::into).collect();
        self
    }

    /// Whether the principal is a member of `group`.
    pub fn is_member_of(&self, group: &str) -> bool {
        self.groups.iter().any(|g| g == group)
    }

    /// Expand to the names an ACE may be bound to, using `everyone` as the
    /// catch-all group.
    ///
    /// The result is `[name] ++ groups ++ [everyone]` with duplicates
    /// removed, keeping the first occurrence.
    pub fn principals_to_check_with(&self, everyone: &str) -> Vec<String> {
        let mut out: Vec<String> = Vec::with_capacity(self.groups.len() + 2);
        let names = std::iter::once(self.name.as_str())
            .chain(self.groups.iter().map(String::as_str))
            .chain(std::iter::once(everyone));
        for name in names {
            if !out.iter().any(|n| n == name) {
                out.push(name.to_string());
            }
        }
        out
    }
}

/// Expand a principal to `[name] ++ groups ++ ["Everyone"]`, deduplicated.
pub fn principals_to_check(principal: &Principal) -> Vec<String> {
    principal.principals_to_check_with(EVERYONE)
}
