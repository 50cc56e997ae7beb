//! Contribution descriptors.
//!
//! Descriptors are plain data, deserializable from JSON contribution files.
//! Folding rules live in [`crate::table`].

use serde::{Deserialize, Serialize};

/// Defines or redefines a permission.
///
/// When several descriptors share a name, they are folded in registration
/// order: a non-empty `include` replaces the previous include list, then
/// `remove` entries are taken out of it, and a non-empty `alias` replaces
/// the previous alias list.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct PermissionDescriptor {
    pub name: String,

    /// Permissions directly implied by this one, in declaration order.
    #[serde(default)]
    pub include: Vec<String>,

    /// Permissions to drop from an earlier include list.
    #[serde(default)]
    pub remove: Vec<String>,

    #[serde(default)]
    pub alias: Vec<String>,
}

impl PermissionDescriptor {
    /// An atomic permission.
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            ..Self::default()
        }
    }

    /// A compound permission including `include`.
    pub fn compound<I, S>(name: impl Into<String>, include: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            name: name.into(),
            include: include.into_iter().map(Into::into).collect(),
            ..Self::default()
        }
    }

    pub fn removing<I, S>(mut self, remove: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.remove = remove.into_iter().map(Into::into).collect();
        self
    }

    pub fn with_aliases<I, S>(mut self, alias: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.alias = alias.into_iter().map(Into::into).collect();
        self
    }
}

/// One entry of a visibility contribution.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct VisibilityItem {
    pub permission: String,

    /// Hidden items are kept in the merged list but not listed.
    #[serde(default = "default_show")]
    pub show: bool,

    /// Sort key. `None` keeps the order of an earlier item with the same
    /// permission, or 0 for a new one.
    #[serde(default)]
    pub order: Option<i32>,

    /// Permission to deny when the user removes this one.
    #[serde(default)]
    pub deny_permission: Option<String>,
}

fn default_show() -> bool {
    true
}

impl VisibilityItem {
    /// A shown item with an explicit order.
    pub fn new(permission: impl Into<String>, order: i32) -> Self {
        Self {
            permission: permission.into(),
            show: true,
            order: Some(order),
            deny_permission: None,
        }
    }

    pub fn hidden(mut self) -> Self {
        self.show = false;
        self
    }

    pub fn with_deny_permission(mut self, deny: impl Into<String>) -> Self {
        self.deny_permission = Some(deny.into());
        self
    }
}

/// User visible permissions for one document type.
///
/// An empty `doc_type` contributes to the default list.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct VisibilityDescriptor {
    #[serde(default)]
    pub doc_type: String,

    #[serde(default)]
    pub items: Vec<VisibilityItem>,
}

impl VisibilityDescriptor {
    /// Contribution to the default list.
    pub fn default_list(items: Vec<VisibilityItem>) -> Self {
        Self {
            doc_type: String::new(),
            items,
        }
    }

    /// Contribution for a document type.
    pub fn for_type(doc_type: impl Into<String>, items: Vec<VisibilityItem>) -> Self {
        Self {
            doc_type: doc_type.into(),
            items,
        }
    }

    /// Whether this contributes to the default list.
    pub fn is_default(&self) -> bool {
        self.doc_type.is_empty()
    }
}

/// Declares a document type and its supertype.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DocumentTypeDescriptor {
    pub name: String,

    #[serde(default)]
    pub parent: Option<String>,
}

impl DocumentTypeDescriptor {
    pub fn new(name: impl Into<String>, parent: Option<&str>) -> Self {
        Self {
            name: name.into(),
            parent: parent.map(str::to_string),
        }
    }
}

/// A permission offered to users when editing a document's ACL.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct UserVisiblePermission {
    /// Identifier shown to the UI; the permission name.
    pub id: String,

    /// Permission granted when the entry is selected.
    pub permission: String,

    /// Permission denied when the entry is revoked, if any.
    pub deny_permission: Option<String>,
}

impl UserVisiblePermission {
    pub fn new(permission: impl Into<String>, deny_permission: Option<String>) -> Self {
        let permission = permission.into();
        Self {
            id: permission.clone(),
            permission,
            deny_permission,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_permission_descriptor_from_json() {
        let d: PermissionDescriptor =
            serde_json::from_str(r#"{"name":"ReadWrite","include":["Read","Write"]}"#).unwrap();
        assert_eq!(d, PermissionDescriptor::compound("ReadWrite", ["Read", "Write"]));
    }

    #[test]
    fn test_visibility_item_defaults() {
        let item: VisibilityItem = serde_json::from_str(r#"{"permission":"Read"}"#).unwrap();
        assert!(item.show);
        assert_eq!(item.order, None);
        assert_eq!(item.deny_permission, None);
    }

    #[test]
    fn test_visibility_descriptor_kind() {
        assert!(VisibilityDescriptor::default_list(vec![]).is_default());
        assert!(!VisibilityDescriptor::for_type("Section", vec![]).is_default());
    }
}
