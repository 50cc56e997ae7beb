//! Well-known permission and principal names.

/// Pseudo-permission implied by every permission check.
pub const EVERYTHING: &str = "Everything";

/// Pseudo-group every principal belongs to.
pub const EVERYONE: &str = "Everyone";

/// Name of the internal user that bypasses all checks.
pub const SYSTEM_USERNAME: &str = "system";

pub const BROWSE: &str = "Browse";
pub const READ: &str = "Read";
pub const READ_PROPERTIES: &str = "ReadProperties";
pub const READ_CHILDREN: &str = "ReadChildren";
pub const READ_LIFE_CYCLE: &str = "ReadLifeCycle";
pub const READ_SECURITY: &str = "ReadSecurity";
pub const READ_VERSION: &str = "ReadVersion";
pub const READ_WRITE: &str = "ReadWrite";
pub const READ_REMOVE: &str = "ReadRemove";

pub const WRITE: &str = "Write";
pub const WRITE_PROPERTIES: &str = "WriteProperties";
pub const WRITE_SECURITY: &str = "WriteSecurity";
pub const WRITE_LIFE_CYCLE: &str = "WriteLifeCycle";
pub const ADD_CHILDREN: &str = "AddChildren";
pub const REMOVE_CHILDREN: &str = "RemoveChildren";
pub const REMOVE: &str = "Remove";
pub const VERSION: &str = "Version";
pub const MANAGE_WORKFLOWS: &str = "ManageWorkflows";

/// Permissions that modify a document.
///
/// A permission is a write when it is one of these or includes one of them,
/// directly or transitively. Compound membership lives in the permission
/// registry.
pub const WRITE_PERMISSIONS: &[&str] = &[
    WRITE,
    WRITE_PROPERTIES,
    WRITE_SECURITY,
    WRITE_LIFE_CYCLE,
    ADD_CHILDREN,
    REMOVE_CHILDREN,
    REMOVE,
    VERSION,
];
