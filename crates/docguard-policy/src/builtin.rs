//! Built-in policies.
//!
//! Both policies ask the permission registry whether a permission is a
//! write, so compounds contributed later are covered too.

use std::sync::Arc;

use docguard_core::{Access, Acp, Document, Principal};
use docguard_perms::PermissionProvider;

use crate::policy::SecurityPolicy;

/// Factory key of [`LockSecurityPolicy`].
pub const LOCK_POLICY: &str = "lock";

/// Factory key of [`CheckInSecurityPolicy`].
pub const CHECKIN_POLICY: &str = "checkin";

/// Denies write permissions on a document locked by someone else.
#[derive(Clone)]
pub struct LockSecurityPolicy {
    permissions: Arc<dyn PermissionProvider>,
}

impl LockSecurityPolicy {
    pub fn new(permissions: Arc<dyn PermissionProvider>) -> Self {
        Self { permissions }
    }
}

impl SecurityPolicy for LockSecurityPolicy {
    fn check_permission(
        &self,
        doc: &dyn Document,
        _merged_acp: &Acp,
        principal: &Principal,
        permission: &str,
        _resolved_permissions: &[String],
        _additional_principals: &[String],
    ) -> Access {
        match doc.lock() {
            Some(lock)
                if !lock.is_held_by(&principal.name)
                    && self.permissions.is_write_permission(permission) =>
            {
                Access::Deny
            }
            _ => Access::Unknown,
        }
    }

    fn is_restricting_permission(&self, permission: &str) -> bool {
        self.permissions.is_write_permission(permission)
    }
}

/// Denies write permissions on checked-in documents, versions and proxies.
#[derive(Clone)]
pub struct CheckInSecurityPolicy {
    permissions: Arc<dyn PermissionProvider>,
}

impl CheckInSecurityPolicy {
    pub fn new(permissions: Arc<dyn PermissionProvider>) -> Self {
        Self { permissions }
    }
}

impl SecurityPolicy for CheckInSecurityPolicy {
    fn check_permission(
        &self,
        doc: &dyn Document,
        _merged_acp: &Acp,
        _principal: &Principal,
        permission: &str,
        _resolved_permissions: &[String],
        _additional_principals: &[String],
    ) -> Access {
        let frozen = !doc.is_checked_out() || doc.is_version() || doc.is_proxy();
        if frozen && self.permissions.is_write_permission(permission) {
            Access::Deny
        } else {
            Access::Unknown
        }
    }

    fn is_restricting_permission(&self, permission: &str) -> bool {
        self.permissions.is_write_permission(permission)
    }
}
