//! Explicit table of policy constructors.

use std::collections::BTreeMap;
use std::fmt;
use std::sync::Arc;

use docguard_perms::PermissionProvider;

use crate::builtin::{CheckInSecurityPolicy, LockSecurityPolicy, CHECKIN_POLICY, LOCK_POLICY};
use crate::policy::SecurityPolicy;

/// Constructor of a policy instance.
pub type PolicyFactory = Arc<dyn Fn() -> Arc<dyn SecurityPolicy> + Send + Sync>;

/// Maps descriptor class keys to constructors.
#[derive(Clone, Default)]
pub struct PolicyFactories {
    factories: BTreeMap<String, PolicyFactory>,
}

impl PolicyFactories {
    /// An empty table.
    pub fn new() -> Self {
        Self::default()
    }

    /// A table holding the built-in policies, reading `permissions`.
    pub fn with_builtins(permissions: Arc<dyn PermissionProvider>) -> Self {
        let mut factories = Self::new();
        factories.add_builtins(permissions);
        factories
    }

    /// Register the built-in constructors whose keys are still free.
    pub fn add_builtins(&mut self, permissions: Arc<dyn PermissionProvider>) {
        if !self.contains(LOCK_POLICY) {
            let permissions = Arc::clone(&permissions);
            self.register(LOCK_POLICY, move || {
                Arc::new(LockSecurityPolicy::new(Arc::clone(&permissions)))
                    as Arc<dyn SecurityPolicy>
            });
        }
        if !self.contains(CHECKIN_POLICY) {
            self.register(CHECKIN_POLICY, move || {
                Arc::new(CheckInSecurityPolicy::new(Arc::clone(&permissions)))
                    as Arc<dyn SecurityPolicy>
            });
        }
    }

    /// Register (or replace) the constructor for `class`.
    pub fn register<F>(&mut self, class: impl Into<String>, factory: F)
    where
        F: Fn() -> Arc<dyn SecurityPolicy> + Send + Sync + 'static,
    {
        self.factories.insert(class.into(), Arc::new(factory));
    }

    /// Instantiate a policy of `class`.
    pub fn create(&self, class: &str) -> Option<Arc<dyn SecurityPolicy>> {
        self.factories.get(class).map(|factory| factory())
    }

    /// Whether a constructor is registered for `class`.
    pub fn contains(&self, class: &str) -> bool {
        self.factories.contains_key(class)
    }

    /// Registered class keys, sorted.
    pub fn classes(&self) -> Vec<String> {
        self.factories.keys().cloned().collect()
    }
}

impl fmt::Debug for PolicyFactories {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("PolicyFactories")
            .field("classes", &self.classes())
            .finish()
    }
}
