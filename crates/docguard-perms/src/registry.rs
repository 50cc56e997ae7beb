//! Copy-on-write permission registry.
//!
//! Contributions are kept in registration order behind a mutex. Every
//! change rebuilds a complete [`PermissionTable`] and swaps the published
//! `Arc`. Readers clone the `Arc` and never see a partial table.

use std::sync::{Arc, Mutex, PoisonError, RwLock};

use crate::defaults;
use crate::descriptor::{
    DocumentTypeDescriptor, PermissionDescriptor, UserVisiblePermission, VisibilityDescriptor,
};
use crate::error::{PermsError, Result};
use crate::provider::PermissionProvider;
use crate::table::PermissionTable;

#[derive(Debug, Default)]
struct Contributions {
    permissions: Vec<PermissionDescriptor>,
    visibility: Vec<VisibilityDescriptor>,
    types: Vec<DocumentTypeDescriptor>,
}

impl Contributions {
    fn build(&self) -> PermissionTable {
        PermissionTable::build(&self.permissions, &self.visibility, &self.types)
    }
}

/// Thread-safe permission registry.
pub struct PermissionRegistry {
    contributions: Mutex<Contributions>,
    table: RwLock<Arc<PermissionTable>>,
}

impl PermissionRegistry {
    /// An empty registry (only `Everything` is known).
    pub fn new() -> Self {
        Self::from_contributions(Contributions::default())
    }

    /// A registry loaded with the default permission contribution.
    pub fn with_defaults() -> Self {
        Self::from_contributions(Contributions {
            permissions: defaults::permission_descriptors(),
            visibility: defaults::visibility_descriptors(),
            types: Vec::new(),
        })
    }

    fn from_contributions(contributions: Contributions) -> Self {
        let table = Arc::new(contributions.build());
        Self {
            contributions: Mutex::new(contributions),
            table: RwLock::new(table),
        }
    }

    /// The currently published table.
    pub fn snapshot(&self) -> Arc<PermissionTable> {
        self.table
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .clone()
    }

    /// Apply `change` to the contributions, rebuild and publish.
    ///
    /// The contribution lock is held across the rebuild so that writers are
    /// serialized and tables are published in change order.
    fn update<F>(&self, change: F) -> Result<()>
    where
        F: FnOnce(&mut Contributions) -> Result<()>,
    {
        let mut contributions = self
            .contributions
            .lock()
            .unwrap_or_else(PoisonError::into_inner);
        change(&mut contributions)?;
        let table = Arc::new(contributions.build());
        *self.table.write().unwrap_or_else(PoisonError::into_inner) = table;
        Ok(())
    }

    /// Register a permission descriptor.
    pub fn register_permission(&self, descriptor: PermissionDescriptor) -> Result<()> {
        if descriptor.name.is_empty() {
            return Err(PermsError::EmptyName { kind: "permission" });
        }
        self.update(|c| {
            c.permissions.push(descriptor);
            Ok(())
        })
    }

    /// Unregister the most recent descriptor equal to `descriptor`.
    pub fn unregister_permission(&self, descriptor: &PermissionDescriptor) -> Result<()> {
        self.update(|c| {
            remove_last(&mut c.permissions, descriptor).ok_or_else(|| PermsError::NotRegistered {
                kind: "permission",
                name: descriptor.name.clone(),
            })
        })
    }

    /// Register a user visible permission descriptor.
    pub fn register_visibility(&self, descriptor: VisibilityDescriptor) -> Result<()> {
        self.update(|c| {
            c.visibility.push(descriptor);
            Ok(())
        })
    }

    /// Unregister the most recent descriptor equal to `descriptor`.
    pub fn unregister_visibility(&self, descriptor: &VisibilityDescriptor) -> Result<()> {
        self.update(|c| {
            remove_last(&mut c.visibility, descriptor).ok_or_else(|| PermsError::NotRegistered {
                kind: "visibility",
                name: descriptor.doc_type.clone(),
            })
        })
    }

    /// Register a document type declaration.
    pub fn register_document_type(&self, descriptor: DocumentTypeDescriptor) -> Result<()> {
        if descriptor.name.is_empty() {
            return Err(PermsError::EmptyName {
                kind: "document type",
            });
        }
        self.update(|c| {
            c.types.push(descriptor);
            Ok(())
        })
    }

    /// Unregister the most recent declaration equal to `descriptor`.
    pub fn unregister_document_type(&self, descriptor: &DocumentTypeDescriptor) -> Result<()> {
        self.update(|c| {
            remove_last(&mut c.types, descriptor).ok_or_else(|| PermsError::NotRegistered {
                kind: "document type",
                name: descriptor.name.clone(),
            })
        })
    }
}

impl Default for PermissionRegistry {
    fn default() -> Self {
        Self::with_defaults()
    }
}

fn remove_last<T: PartialEq>(list: &mut Vec<T>, item: &T) -> Option<()> {
    let idx = list.iter().rposition(|x| x == item)?;
    list.remove(idx);
    Some(())
}

impl PermissionProvider for PermissionRegistry {
    fn permission_groups(&self, name: &str) -> Vec<String> {
        self.snapshot().permission_groups(name)
    }

    fn sub_permissions(&self, name: &str) -> Vec<String> {
        self.snapshot().sub_permissions(name)
    }

    fn alias_permissions(&self, name: &str) -> Vec<String> {
        self.snapshot().alias_permissions(name)
    }

    fn permissions(&self) -> Vec<String> {
        self.snapshot().permissions()
    }

    fn user_visible_permissions(&self, doc_type: Option<&str>) -> Vec<UserVisiblePermission> {
        self.snapshot().user_visible_permissions(doc_type)
    }

    fn permissions_to_check(&self, permission: &str) -> Vec<String> {
        self.snapshot().permissions_to_check(permission)
    }

    fn is_write_permission(&self, permission: &str) -> bool {
        self.snapshot().is_write_permission(permission)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::descriptor::VisibilityItem;
    use std::thread;

    fn ids(list: &[UserVisiblePermission]) -> Vec<String> {
        list.iter().map(|u| u.id.clone()).collect()
    }

    #[test]
    fn test_new_registry_knows_everything() {
        let registry = PermissionRegistry::new();
        assert_eq!(registry.permissions(), vec!["Everything"]);
    }

    #[test]
    fn test_custom_compound_permission() {
        let registry = PermissionRegistry::with_defaults();
        registry
            .register_permission(PermissionDescriptor::compound("CustomCompoundPerm", ["Read"]))
            .unwrap();

        assert_eq!(
            registry.permission_groups("Read"),
            vec!["CustomCompoundPerm", "ReadRemove", "ReadWrite"]
        );
        assert!(registry.permission_groups("CustomCompoundPerm").is_empty());
        assert_eq!(
            registry.permission_groups("Browse"),
            vec!["CustomCompoundPerm", "Read", "ReadProperties", "ReadRemove", "ReadWrite"]
        );
    }

    #[test]
    fn test_new_atomic_permission_has_no_groups() {
        let registry = PermissionRegistry::with_defaults();
        registry
            .register_permission(PermissionDescriptor::new("CustomAtomicPerm"))
            .unwrap();
        assert!(registry.permissions().contains(&"CustomAtomicPerm".to_string()));
        assert_eq!(registry.permission_groups("CustomAtomicPerm").len(), 0);
    }

    #[test]
    fn test_unregister_restores_previous_table() {
        let registry = PermissionRegistry::with_defaults();
        let before = registry.snapshot();
        let custom = PermissionDescriptor::compound("CustomCompoundPerm", ["Read"]);

        registry.register_permission(custom.clone()).unwrap();
        assert_ne!(*registry.snapshot(), *before);

        registry.unregister_permission(&custom).unwrap();
        assert_eq!(*registry.snapshot(), *before);

        assert_eq!(
            registry.unregister_permission(&custom),
            Err(PermsError::NotRegistered {
                kind: "permission",
                name: "CustomCompoundPerm".into()
            })
        );
    }

    #[test]
    fn test_empty_name_rejected() {
        let registry = PermissionRegistry::with_defaults();
        assert_eq!(
            registry.register_permission(PermissionDescriptor::new("")),
            Err(PermsError::EmptyName { kind: "permission" })
        );
        assert!(registry
            .register_document_type(DocumentTypeDescriptor::new("", None))
            .is_err());
    }

    #[test]
    fn test_fallback_follows_default_changes() {
        let registry = PermissionRegistry::with_defaults();
        assert_eq!(
            ids(&registry.user_visible_permissions(Some("Workspace"))),
            vec!["Read", "ReadWrite", "Everything"]
        );

        registry
            .register_visibility(VisibilityDescriptor::for_type(
                "Section",
                vec![VisibilityItem::new("ReadRemove", 20)],
            ))
            .unwrap();
        registry
            .register_visibility(VisibilityDescriptor::default_list(vec![
                VisibilityItem::new("ReadWrite", 50).hidden(),
                VisibilityItem::new("Write", 40),
            ]))
            .unwrap();

        assert_eq!(
            ids(&registry.user_visible_permissions(Some("Section"))),
            vec!["Read", "ReadRemove", "ReadWrite", "Everything"]
        );
        assert_eq!(
            ids(&registry.user_visible_permissions(Some("Workspace"))),
            vec!["Read", "Write", "Everything"]
        );
        assert_eq!(
            registry.user_visible_permissions(None),
            registry.user_visible_permissions(Some("Workspace"))
        );
    }

    #[test]
    fn test_document_type_registration() {
        let registry = PermissionRegistry::with_defaults();
        registry
            .register_visibility(VisibilityDescriptor::for_type(
                "Folder",
                vec![VisibilityItem::new("Everything", 1).hidden()],
            ))
            .unwrap();
        let folderish = DocumentTypeDescriptor::new("Workspace", Some("Folder"));
        registry.register_document_type(folderish.clone()).unwrap();
        assert_eq!(
            ids(&registry.user_visible_permissions(Some("Workspace"))),
            vec!["Read", "ReadWrite"]
        );

        registry.unregister_document_type(&folderish).unwrap();
        assert_eq!(
            ids(&registry.user_visible_permissions(Some("Workspace"))),
            vec!["Read", "ReadWrite", "Everything"]
        );
    }

    #[test]
    fn test_write_permissions_follow_contributions() {
        let registry = PermissionRegistry::with_defaults();
        assert!(!registry.is_write_permission("Edit"));

        registry
            .register_permission(PermissionDescriptor::new("Edit"))
            .unwrap();
        assert!(!registry.is_write_permission("Edit"));

        registry
            .register_permission(PermissionDescriptor::compound("Edit", ["Write", "Read"]))
            .unwrap();
        assert!(registry.is_write_permission("Edit"));
        assert!(!registry.is_write_permission("Read"));
    }

    #[test]
    fn test_repeated_reads_identical() {
        let registry = PermissionRegistry::with_defaults();
        assert_eq!(registry.permissions(), registry.permissions());
        assert_eq!(registry.permission_groups("Browse"), registry.permission_groups("Browse"));
        assert_eq!(
            registry.user_visible_permissions(Some("File")),
            registry.user_visible_permissions(Some("File"))
        );
    }

    #[test]
    fn test_readers_see_complete_tables() {
        let registry = Arc::new(PermissionRegistry::with_defaults());
        let writer = {
            let registry = Arc::clone(&registry);
            thread::spawn(move || {
                for i in 0..50 {
                    let d = PermissionDescriptor::compound(format!("Custom{i}"), ["Read"]);
                    registry.register_permission(d.clone()).unwrap();
                    registry.unregister_permission(&d).unwrap();
                }
            })
        };

        for _ in 0..200 {
            let groups = registry.permission_groups("Read");
            assert!(groups.len() == 2 || groups.len() == 3);
            assert!(groups.contains(&"ReadRemove".to_string()));
            assert!(groups.contains(&"ReadWrite".to_string()));
        }
        writer.join().unwrap();
        assert_eq!(registry.permission_groups("Read"), vec!["ReadRemove", "ReadWrite"]);
    }
}
