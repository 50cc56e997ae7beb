//! Test fixtures and helpers.

use std::sync::Arc;

use docguard::{SecurityConfig, SecurityService};
use docguard_core::{
    Access, Ace, Acl, Acp, Document, Lock, MemoryDocument, Principal, PropertyValue, LOCAL_ACL,
};
use docguard_policy::{PolicyDescriptor, PolicyFactories, SecurityPolicy};

/// Factory key of [`CreatorPolicy`].
pub const CREATOR_POLICY: &str = "creator";

/// Grants every permission to the document's `dc:creator`.
#[derive(Debug, Default, Clone, Copy)]
pub struct CreatorPolicy;

impl SecurityPolicy for CreatorPolicy {
    fn check_permission(
        &self,
        doc: &dyn Document,
        _merged_acp: &Acp,
        principal: &Principal,
        _permission: &str,
        _resolved_permissions: &[String],
        _additional_principals: &[String],
    ) -> Access {
        match doc.property("dc:creator").and_then(PropertyValue::as_str) {
            Some(creator) if creator == principal.name => Access::Grant,
            _ => Access::Unknown,
        }
    }
}

/// A security service with the creator policy available (not deployed).
pub struct SecurityFixture {
    pub service: SecurityService,
}

impl SecurityFixture {
    /// Default configuration plus the `creator` factory.
    pub fn new() -> Self {
        let mut factories = PolicyFactories::new();
        factories.register(CREATOR_POLICY, || Arc::new(CreatorPolicy) as Arc<dyn SecurityPolicy>);
        Self {
            service: SecurityService::with_factories(SecurityConfig::default(), factories),
        }
    }

    /// Deploy the creator policy at `order`.
    pub fn deploy_creator_policy(&self, order: i32) -> docguard_policy::Result<()> {
        self.service
            .policy_service()
            .register(PolicyDescriptor::new(CREATOR_POLICY, CREATOR_POLICY, order))
    }

    pub fn bodie(&self) -> Principal {
        Principal::new("Bodie").with_groups(["corner"])
    }

    pub fn bubbles(&self) -> Principal {
        Principal::new("Bubbles")
    }

    pub fn bob(&self) -> Principal {
        Principal::new("bob").with_groups(["vps", "males"])
    }

    /// A live document locked by `holder` and created by `creator`.
    pub fn locked_document(&self, holder: &str, creator: &str) -> MemoryDocument {
        MemoryDocument::new(format!("locked-by-{holder}"), "File")
            .with_lock(Lock::new(holder, 0))
            .with_property("dc:creator", creator)
    }

    /// A live, unlocked document.
    pub fn document(&self, doc_type: &str) -> MemoryDocument {
        MemoryDocument::new(format!("{doc_type}-doc"), doc_type)
    }

    pub fn empty_acp(&self) -> Acp {
        Acp::new()
    }

    /// A local ACL holding `entries`.
    pub fn acp(&self, entries: Vec<Ace>) -> Acp {
        let mut acl = Acl::new(LOCAL_ACL);
        acl.entries = entries;
        Acp::new().with_acl(acl)
    }

    pub fn check(
        &self,
        doc: &dyn Document,
        acp: &Acp,
        principal: &Principal,
        permission: &str,
    ) -> Access {
        self.service.check_permission(doc, acp, principal, permission)
    }
}

impl Default for SecurityFixture {
    fn default() -> Self {
        Self::new()
    }
}
