//! The ordered policy chain.
//!
//! Deployed policies are kept in registration order behind a mutex. Every
//! change sorts the enabled ones by `(order, registration slot)` into a new
//! [`PolicyChain`] which is swapped in atomically.

use std::sync::{Arc, Mutex, PoisonError, RwLock};

use docguard_core::{Access, Acp, Document, Principal};
use docguard_perms::{PermissionProvider, PermissionRegistry};

use crate::builtin::{CHECKIN_POLICY, LOCK_POLICY};
use crate::descriptor::PolicyDescriptor;
use crate::error::{PolicyError, Result};
use crate::factory::PolicyFactories;
use crate::policy::SecurityPolicy;

/// Order of the built-in lock policy in the default deployment.
pub const LOCK_POLICY_ORDER: i32 = 100;

/// Order of the built-in check-in policy in the default deployment.
pub const CHECKIN_POLICY_ORDER: i32 = 200;

/// A deployed policy.
struct Deployed {
    name: String,
    class: Option<String>,
    order: i32,
    policy: Arc<dyn SecurityPolicy>,
}

/// One link of a published chain.
#[derive(Clone)]
struct ChainEntry {
    name: String,
    order: i32,
    policy: Arc<dyn SecurityPolicy>,
}

/// An immutable, sorted snapshot of the deployed policies.
#[derive(Clone, Default)]
pub struct PolicyChain {
    entries: Vec<ChainEntry>,
}

impl PolicyChain {
    fn build(deployed: &[Deployed]) -> Self {
        let mut entries: Vec<(usize, ChainEntry)> = deployed
            .iter()
            .enumerate()
            .map(|(slot, d)| {
                (
                    slot,
                    ChainEntry {
                        name: d.name.clone(),
                        order: d.order,
                        policy: Arc::clone(&d.policy),
                    },
                )
            })
            .collect();
        entries.sort_by_key(|(slot, e)| (e.order, *slot));
        Self {
            entries: entries.into_iter().map(|(_, e)| e).collect(),
        }
    }

    /// Policy names in evaluation order.
    pub fn names(&self) -> Vec<String> {
        self.entries.iter().map(|e| e.name.clone()).collect()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Walk the chain; the first decisive answer wins.
    pub fn check_permission(
        &self,
        doc: &dyn Document,
        merged_acp: &Acp,
        principal: &Principal,
        permission: &str,
        resolved_permissions: &[String],
        additional_principals: &[String],
    ) -> Access {
        for entry in &self.entries {
            let access = entry.policy.check_permission(
                doc,
                merged_acp,
                principal,
                permission,
                resolved_permissions,
                additional_principals,
            );
            if access.is_decisive() {
                tracing::trace!(
                    policy = %entry.name,
                    doc = doc.id(),
                    principal = %principal.name,
                    permission,
                    %access,
                    "policy decided"
                );
                return access;
            }
        }
        Access::Unknown
    }

    /// Whether any policy may restrict `permission`.
    pub fn is_restricting_permission(&self, permission: &str) -> bool {
        self.entries
            .iter()
            .any(|e| e.policy.is_restricting_permission(permission))
    }
}

/// Registry and evaluator of security policies.
pub struct SecurityPolicyService {
    factories: PolicyFactories,
    deployed: Mutex<Vec<Deployed>>,
    chain: RwLock<Arc<PolicyChain>>,
}

impl SecurityPolicyService {
    /// A service with no deployed policy.
    pub fn new(factories: PolicyFactories) -> Self {
        Self {
            factories,
            deployed: Mutex::new(Vec::new()),
            chain: RwLock::new(Arc::new(PolicyChain::default())),
        }
    }

    /// A service with the built-in factories and the built-in policies
    /// deployed at their default orders.
    pub fn with_defaults() -> Self {
        Self::with_builtin_policies(
            PolicyFactories::new(),
            Arc::new(PermissionRegistry::with_defaults()),
        )
    }

    /// Deploy the built-in policies on top of `factories`. They read write
    /// permissions from `permissions`.
    pub fn with_builtin_policies(
        mut factories: PolicyFactories,
        permissions: Arc<dyn PermissionProvider>,
    ) -> Self {
        factories.add_builtins(permissions);
        let service = Self::new(factories);
        for descriptor in [
            PolicyDescriptor::new(LOCK_POLICY, LOCK_POLICY, LOCK_POLICY_ORDER),
            PolicyDescriptor::new(CHECKIN_POLICY, CHECKIN_POLICY, CHECKIN_POLICY_ORDER),
        ] {
            if let Err(e) = service.register(descriptor) {
                tracing::warn!(error = %e, "failed to deploy built-in policy");
            }
        }
        service
    }

    /// The factory table used for descriptors.
    pub fn factories(&self) -> &PolicyFactories {
        &self.factories
    }

    /// The currently published chain.
    pub fn chain(&self) -> Arc<PolicyChain> {
        self.chain
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .clone()
    }

    fn update<F>(&self, change: F) -> Result<()>
    where
        F: FnOnce(&mut Vec<Deployed>) -> Result<()>,
    {
        let mut deployed = self.deployed.lock().unwrap_or_else(PoisonError::into_inner);
        change(&mut deployed)?;
        let chain = Arc::new(PolicyChain::build(&deployed));
        tracing::debug!(policies = ?chain.names(), "policy chain rebuilt");
        *self.chain.write().unwrap_or_else(PoisonError::into_inner) = chain;
        Ok(())
    }

    /// Deploy, redeploy or disable a policy from a descriptor.
    pub fn register(&self, descriptor: PolicyDescriptor) -> Result<()> {
        if descriptor.name.is_empty() {
            return Err(PolicyError::EmptyName);
        }
        self.update(|deployed| {
            let existing = deployed.iter().position(|d| d.name == descriptor.name);

            if !descriptor.enabled {
                if let Some(idx) = existing {
                    deployed.remove(idx);
                }
                return Ok(());
            }

            match existing {
                Some(idx) => {
                    let slot = &mut deployed[idx];
                    if let Some(class) = &descriptor.class {
                        if slot.class.as_deref() != Some(class.as_str()) {
                            slot.policy = self.instantiate(&descriptor.name, class)?;
                            slot.class = Some(class.clone());
                        }
                    }
                    if let Some(order) = descriptor.order {
                        slot.order = order;
                    }
                }
                None => {
                    let class = descriptor
                        .class
                        .as_deref()
                        .ok_or_else(|| PolicyError::MissingClass(descriptor.name.clone()))?;
                    let policy = self.instantiate(&descriptor.name, class)?;
                    deployed.push(Deployed {
                        name: descriptor.name.clone(),
                        class: Some(class.to_string()),
                        order: descriptor.order.unwrap_or(0),
                        policy,
                    });
                }
            }
            Ok(())
        })
    }

    fn instantiate(&self, name: &str, class: &str) -> Result<Arc<dyn SecurityPolicy>> {
        self.factories.create(class).ok_or_else(|| {
            tracing::warn!(policy = name, class, "skipping policy with unknown class");
            PolicyError::UnknownClass {
                name: name.to_string(),
                class: class.to_string(),
            }
        })
    }

    /// Deploy an already constructed policy, replacing any policy with the
    /// same name in place.
    pub fn register_policy(
        &self,
        name: impl Into<String>,
        order: i32,
        policy: Arc<dyn SecurityPolicy>,
    ) -> Result<()> {
        let name = name.into();
        if name.is_empty() {
            return Err(PolicyError::EmptyName);
        }
        self.update(|deployed| {
            match deployed.iter_mut().find(|d| d.name == name) {
                Some(slot) => {
                    slot.class = None;
                    slot.order = order;
                    slot.policy = policy;
                }
                None => deployed.push(Deployed {
                    name,
                    class: None,
                    order,
                    policy,
                }),
            }
            Ok(())
        })
    }

    /// Remove a deployed policy.
    pub fn unregister(&self, name: &str) -> Result<()> {
        self.update(|deployed| {
            let idx = deployed
                .iter()
                .position(|d| d.name == name)
                .ok_or_else(|| PolicyError::NotRegistered(name.to_string()))?;
            deployed.remove(idx);
            Ok(())
        })
    }

    /// Deployed policy names in evaluation order.
    pub fn policies(&self) -> Vec<String> {
        self.chain().names()
    }

    /// Ask the chain; `Unknown` when every policy abstains.
    pub fn check_permission(
        &self,
        doc: &dyn Document,
        merged_acp: &Acp,
        principal: &Principal,
        permission: &str,
        resolved_permissions: &[String],
        additional_principals: &[String],
    ) -> Access {
        self.chain().check_permission(
            doc,
            merged_acp,
            principal,
            permission,
            resolved_permissions,
            additional_principals,
        )
    }

    /// Whether any deployed policy may restrict `permission`.
    pub fn are_policies_restricting_permission(&self, permission: &str) -> bool {
        self.chain().is_restricting_permission(permission)
    }
}

impl Default for SecurityPolicyService {
    fn default() -> Self {
        Self::with_defaults()
    }
}
