//! Policy deployment descriptors.

use serde::{Deserialize, Serialize};

/// Deploys, redeploys or disables a policy.
///
/// Policies are identified by `name`. Redeploying an existing name keeps
/// its registration slot (and its instance when `class` is absent or
/// unchanged) and applies `order` when one is given. A new policy without
/// an order is deployed at order 0. `enabled: false` removes the policy
/// from the chain.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PolicyDescriptor {
    pub name: String,

    /// Factory key. Optional when redeploying an existing policy.
    #[serde(default)]
    pub class: Option<String>,

    /// Evaluation order: lower values are evaluated first.
    #[serde(default)]
    pub order: Option<i32>,

    #[serde(default = "default_enabled")]
    pub enabled: bool,
}

fn default_enabled() -> bool {
    true
}

impl PolicyDescriptor {
    /// An enabled policy of the given class.
    pub fn new(name: impl Into<String>, class: impl Into<String>, order: i32) -> Self {
        Self {
            name: name.into(),
            class: Some(class.into()),
            order: Some(order),
            enabled: true,
        }
    }

    /// Redeploy an existing policy with a new order.
    pub fn reorder(name: impl Into<String>, order: i32) -> Self {
        Self {
            name: name.into(),
            class: None,
            order: Some(order),
            enabled: true,
        }
    }

    /// Disable an existing policy.
    pub fn disable(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            class: None,
            order: None,
            enabled: false,
        }
    }
}
