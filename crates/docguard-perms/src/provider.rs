//! The read-only permission query interface.

use docguard_core::permissions::WRITE_PERMISSIONS;
use docguard_core::EVERYTHING;

use crate::descriptor::UserVisiblePermission;

/// Read-only permission queries.
///
/// None of these fail: unknown names yield empty results.
pub trait PermissionProvider: Send + Sync {
    /// Every compound permission transitively including `name`, sorted
    /// alphabetically. Empty for unknown names and names in no group.
    fn permission_groups(&self, name: &str) -> Vec<String>;

    /// Permissions directly included by `name`, in declaration order.
    fn sub_permissions(&self, name: &str) -> Vec<String>;

    /// Alias names declared for `name`.
    fn alias_permissions(&self, name: &str) -> Vec<String>;

    /// All known permission names, sorted. Always contains `Everything`.
    fn permissions(&self) -> Vec<String>;

    /// User visible permissions for `doc_type`, or the default list.
    fn user_visible_permissions(&self, doc_type: Option<&str>) -> Vec<UserVisiblePermission>;

    /// Expand a requested permission into the permissions an ACE may grant
    /// it through: the permission itself, its groups, then `Everything`.
    fn permissions_to_check(&self, permission: &str) -> Vec<String> {
        let mut out = vec![permission.to_string()];
        for group in self.permission_groups(permission) {
            if !out.contains(&group) {
                out.push(group);
            }
        }
        if !out.iter().any(|p| p == EVERYTHING) {
            out.push(EVERYTHING.to_string());
        }
        out
    }

    /// Whether granting `permission` grants one of the
    /// [`WRITE_PERMISSIONS`]: it is one of them, a compound including one,
    /// or `Everything`.
    fn is_write_permission(&self, permission: &str) -> bool {
        WRITE_PERMISSIONS
            .iter()
            .any(|w| self.permissions_to_check(w).iter().any(|p| p == permission))
    }
}
