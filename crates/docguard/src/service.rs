//! The SecurityService: permission resolution over policies and ACLs.

use std::sync::Arc;

use docguard_core::{Access, Acp, Document, Principal};
use docguard_perms::{PermissionProvider, PermissionRegistry};
use docguard_policy::{PolicyFactories, SecurityPolicyService};

use crate::config::SecurityConfig;
use crate::contributions::{Contributions, DeployReport};
use crate::error::{Result, SecurityError};

/// Resolves access decisions.
///
/// For each request:
/// 1. the system user is granted everything;
/// 2. the permission is expanded with its compound groups and `Everything`;
/// 3. the principal is expanded with its groups and the everyone group;
/// 4. policies are asked in ascending order, first decisive answer wins;
/// 5. otherwise the merged ACP decides, first matching entry wins.
///
/// `Unknown` from the last step means nothing matched and must be treated
/// as no access.
pub struct SecurityService {
    config: SecurityConfig,
    permissions: Arc<PermissionRegistry>,
    policies: Arc<SecurityPolicyService>,
}

impl SecurityService {
    /// Create a service from configuration.
    pub fn new(config: SecurityConfig) -> Self {
        Self::with_factories(config, PolicyFactories::new())
    }

    /// Create a service whose policy descriptors resolve against `factories`.
    ///
    /// The built-in policy classes are added for keys `factories` leaves
    /// free, bound to this service's permission registry.
    pub fn with_factories(config: SecurityConfig, mut factories: PolicyFactories) -> Self {
        let permissions = Arc::new(if config.load_defaults {
            PermissionRegistry::with_defaults()
        } else {
            PermissionRegistry::new()
        });
        let provider: Arc<dyn PermissionProvider> = permissions.clone();

        let policies = if config.load_defaults {
            SecurityPolicyService::with_builtin_policies(factories, provider)
        } else {
            factories.add_builtins(provider);
            SecurityPolicyService::new(factories)
        };
        Self::from_parts(config, permissions, Arc::new(policies))
    }

    /// Assemble a service from shared components.
    pub fn from_parts(
        config: SecurityConfig,
        permissions: Arc<PermissionRegistry>,
        policies: Arc<SecurityPolicyService>,
    ) -> Self {
        Self {
            config,
            permissions,
            policies,
        }
    }

    pub fn config(&self) -> &SecurityConfig {
        &self.config
    }

    /// The permission registry, for queries and contributions.
    pub fn permission_provider(&self) -> &PermissionRegistry {
        &self.permissions
    }

    /// The policy chain, for deployment.
    pub fn policy_service(&self) -> &SecurityPolicyService {
        &self.policies
    }

    /// `[permission] ++ groups ++ ["Everything"]`.
    pub fn permissions_to_check(&self, permission: &str) -> Vec<String> {
        self.permissions.permissions_to_check(permission)
    }

    /// `[name] ++ groups ++ [everyone]`, deduplicated.
    pub fn principals_to_check(&self, principal: &Principal) -> Vec<String> {
        principal.principals_to_check_with(&self.config.everyone)
    }

    /// Resolve `permission` for `principal` on `doc`.
    pub fn check_permission(
        &self,
        doc: &dyn Document,
        merged_acp: &Acp,
        principal: &Principal,
        permission: &str,
    ) -> Access {
        if !self.config.system_username.is_empty() && principal.name == self.config.system_username
        {
            return Access::Grant;
        }

        let permissions = self.permissions_to_check(permission);
        let principals = self.principals_to_check(principal);

        self.policies
            .check_permission(
                doc,
                merged_acp,
                principal,
                permission,
                &permissions,
                &principals,
            )
            .or_else(|| {
                let access = merged_acp.access(&principals, &permissions);
                tracing::trace!(
                    doc = doc.id(),
                    principal = %principal.name,
                    permission,
                    %access,
                    "resolved by ACL"
                );
                access
            })
    }

    /// Enforcement view of [`check_permission`](Self::check_permission):
    /// only `Grant` gives access.
    pub fn has_permission(
        &self,
        doc: &dyn Document,
        merged_acp: &Acp,
        principal: &Principal,
        permission: &str,
    ) -> bool {
        self.check_permission(doc, merged_acp, principal, permission)
            .to_bool()
    }

    /// Apply a contribution bundle.
    ///
    /// Invalid descriptors are logged and reported, the rest is applied.
    pub fn deploy(&self, contributions: Contributions) -> DeployReport {
        let mut report = DeployReport::default();
        let mut record = |what: &str, name: &str, result: Result<()>| {
            match result {
                Ok(()) => report.applied += 1,
                Err(e) => {
                    tracing::warn!(kind = what, name, error = %e, "skipping contribution");
                    report.skipped.push(format!("{what} {name}: {e}"));
                }
            }
        };

        for d in contributions.permissions {
            let name = d.name.clone();
            let result = self.permissions.register_permission(d);
            record("permission", &name, result.map_err(SecurityError::from));
        }
        for d in contributions.visibility {
            let name = d.doc_type.clone();
            let result = self.permissions.register_visibility(d);
            record("visibility", &name, result.map_err(SecurityError::from));
        }
        for d in contributions.document_types {
            let name = d.name.clone();
            let result = self.permissions.register_document_type(d);
            record("document type", &name, result.map_err(SecurityError::from));
        }
        for d in contributions.policies {
            let name = d.name.clone();
            let result = self.policies.register(d);
            record("policy", &name, result.map_err(SecurityError::from));
        }

        report
    }
}

impl Default for SecurityService {
    fn default() -> Self {
        Self::new(SecurityConfig::default())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use docguard_core::{Ace, Acl, Lock, MemoryDocument, LOCAL_ACL};
    use docguard_perms::PermissionDescriptor;
    use docguard_policy::PolicyDescriptor;

    fn acp(entries: Vec<Ace>) -> Acp {
        let mut acl = Acl::new(LOCAL_ACL);
        acl.entries = entries;
        Acp::new().with_acl(acl)
    }

    #[test]
    fn test_compound_grant_implies_sub_permission() {
        let service = SecurityService::default();
        let doc = MemoryDocument::new("d", "File");
        let acp = acp(vec![Ace::grant("bob", "ReadWrite")]);
        let bob = Principal::new("bob");

        assert_eq!(service.check_permission(&doc, &acp, &bob, "Browse"), Access::Grant);
        assert_eq!(service.check_permission(&doc, &acp, &bob, "Write"), Access::Grant);
        assert_eq!(
            service.check_permission(&doc, &acp, &bob, "WriteSecurity"),
            Access::Unknown
        );
    }

    #[test]
    fn test_everything_grants_any_permission() {
        let service = SecurityService::default();
        let doc = MemoryDocument::new("d", "File");
        let acp = acp(vec![Ace::grant("admins", "Everything")]);
        let alice = Principal::new("alice").with_groups(["admins"]);

        assert!(service.has_permission(&doc, &acp, &alice, "WriteSecurity"));
        assert!(service.has_permission(&doc, &acp, &alice, "SomethingCustom"));
    }

    #[test]
    fn test_deny_entry_before_grant() {
        let service = SecurityService::default();
        let doc = MemoryDocument::new("d", "File");
        let acp = acp(vec![
            Ace::deny("Everyone", "Write"),
            Ace::grant("bob", "ReadWrite"),
        ]);
        let bob = Principal::new("bob");

        assert_eq!(service.check_permission(&doc, &acp, &bob, "Write"), Access::Deny);
        assert_eq!(service.check_permission(&doc, &acp, &bob, "Read"), Access::Grant);
    }

    #[test]
    fn test_system_user_bypasses_policies() {
        let service = SecurityService::default();
        let doc = MemoryDocument::new("d", "File").with_lock(Lock::new("Bubbles", 0));
        let system = Principal::new("system");
        assert_eq!(service.check_permission(&doc, &Acp::new(), &system, "Write"), Access::Grant);
    }

    #[test]
    fn test_system_bypass_can_be_disabled() {
        let config = SecurityConfig {
            system_username: String::new(),
            ..SecurityConfig::default()
        };
        let service = SecurityService::new(config);
        let doc = MemoryDocument::new("d", "File");
        let system = Principal::new("system");
        assert_eq!(service.check_permission(&doc, &Acp::new(), &system, "Read"), Access::Unknown);
    }

    #[test]
    fn test_custom_everyone_group() {
        let config = SecurityConfig {
            everyone: "AllUsers".into(),
            ..SecurityConfig::default()
        };
        let service = SecurityService::new(config);
        let doc = MemoryDocument::new("d", "File");
        let acp = acp(vec![Ace::grant("AllUsers", "Read")]);
        let bob = Principal::new("bob");

        assert_eq!(service.principals_to_check(&bob), vec!["bob", "AllUsers"]);
        assert!(service.has_permission(&doc, &acp, &bob, "Read"));
    }

    #[test]
    fn test_without_defaults() {
        let config = SecurityConfig {
            load_defaults: false,
            ..SecurityConfig::default()
        };
        let service = SecurityService::new(config);
        assert!(service.policy_service().policies().is_empty());
        assert_eq!(service.permission_provider().permissions(), vec!["Everything"]);
        assert_eq!(service.permissions_to_check("Read"), vec!["Read", "Everything"]);
    }

    #[test]
    fn test_version_cannot_be_written() {
        let service = SecurityService::default();
        let doc = MemoryDocument::new("v", "File").as_version();
        let acp = acp(vec![Ace::grant("bob", "Everything")]);
        let bob = Principal::new("bob");

        assert_eq!(service.check_permission(&doc, &acp, &bob, "Write"), Access::Deny);
        assert_eq!(service.check_permission(&doc, &acp, &bob, "Read"), Access::Grant);
    }

    #[test]
    fn test_checked_in_document_cannot_be_written() {
        let service = SecurityService::default();
        let doc = MemoryDocument::new("d", "File").checked_in();
        let acp = acp(vec![Ace::grant("bob", "Everything")]);
        let bob = Principal::new("bob");

        assert_eq!(
            service.check_permission(&doc, &acp, &bob, "WriteProperties"),
            Access::Deny
        );
        assert_eq!(service.check_permission(&doc, &acp, &bob, "Read"), Access::Grant);
    }

    #[test]
    fn test_lock_covers_contributed_write_compound() {
        let service = SecurityService::default();
        service
            .permission_provider()
            .register_permission(PermissionDescriptor::compound("Edit", ["Write", "Read"]))
            .unwrap();
        let doc = MemoryDocument::new("d", "File").with_lock(Lock::new("Bubbles", 0));
        let acp = acp(vec![Ace::grant("Bodie", "Edit"), Ace::grant("Bubbles", "Edit")]);

        assert_eq!(
            service.check_permission(&doc, &acp, &Principal::new("Bodie"), "Edit"),
            Access::Deny
        );
        assert_eq!(
            service.check_permission(&doc, &acp, &Principal::new("Bubbles"), "Edit"),
            Access::Grant
        );
    }

    #[test]
    fn test_without_defaults_builtins_can_be_deployed() {
        let config = SecurityConfig {
            load_defaults: false,
            ..SecurityConfig::default()
        };
        let service = SecurityService::new(config);
        service
            .policy_service()
            .register(PolicyDescriptor::new("lock", "lock", 100))
            .unwrap();
        assert_eq!(service.policy_service().policies(), vec!["lock"]);
    }

    #[test]
    fn test_deploy_reports_skipped() {
        let service = SecurityService::default();
        let bundle = Contributions::from_json(
            r#"{
                "permissions": [
                    { "name": "CustomCompoundPerm", "include": ["Read"] },
                    { "name": "" }
                ],
                "policies": [{ "name": "mystery", "class": "nope", "order": 1 }]
            }"#,
        )
        .unwrap();

        let report = service.deploy(bundle);
        assert_eq!(report.applied, 1);
        assert_eq!(report.skipped.len(), 2);
        assert!(report.skipped[0].starts_with("permission : permission error"));
        assert!(report.skipped[1].starts_with("policy mystery: policy error"));
        assert!(!report.is_clean());
        assert_eq!(
            service.permission_provider().permission_groups("Read"),
            vec!["CustomCompoundPerm", "ReadRemove", "ReadWrite"]
        );
        assert_eq!(service.policy_service().policies(), vec!["lock", "checkin"]);
    }
}
