//! Proptest generators for property-based testing.

use proptest::prelude::*;

use docguard_core::{permissions, Ace, Acl, Acp, Principal, EVERYONE, INHERITED_ACL, LOCAL_ACL};

const USERS: &[&str] = &["alice", "bob", "carol", "dave"];
const GROUPS: &[&str] = &["vps", "males", "editors", "crew"];

/// Generate a permission name from the default table, or one it does not know.
pub fn permission_name() -> impl Strategy<Value = String> {
    prop::sample::select(vec![
        permissions::BROWSE,
        permissions::READ,
        permissions::READ_PROPERTIES,
        permissions::READ_CHILDREN,
        permissions::WRITE,
        permissions::WRITE_PROPERTIES,
        permissions::REMOVE,
        permissions::READ_WRITE,
        permissions::READ_REMOVE,
        permissions::VERSION,
        permissions::EVERYTHING,
        "Publish",
    ])
    .prop_map(String::from)
}

/// Generate a non-system principal with up to three groups.
pub fn principal() -> impl Strategy<Value = Principal> {
    (
        prop::sample::select(USERS.to_vec()),
        prop::sample::subsequence(GROUPS.to_vec(), 0..=3),
    )
        .prop_map(|(name, groups)| Principal::new(name).with_groups(groups))
}

/// Generate an entry naming a user, a group or `Everyone`.
pub fn ace() -> impl Strategy<Value = Ace> {
    let who = prop::sample::select(
        USERS
            .iter()
            .chain(GROUPS)
            .chain(std::iter::once(&EVERYONE))
            .copied()
            .collect::<Vec<_>>(),
    );
    (who, permission_name(), any::<bool>()).prop_map(|(principal, permission, granted)| Ace {
        principal: principal.to_string(),
        permission,
        granted,
    })
}

/// Generate an ACP with a local and an inherited ACL.
pub fn acp() -> impl Strategy<Value = Acp> {
    (
        prop::collection::vec(ace(), 0..8),
        prop::collection::vec(ace(), 0..8),
    )
        .prop_map(|(local, inherited)| {
            let mut local_acl = Acl::new(LOCAL_ACL);
            local_acl.entries = local;
            let mut inherited_acl = Acl::new(INHERITED_ACL);
            inherited_acl.entries = inherited;
            Acp::new().with_acl(local_acl).with_acl(inherited_acl)
        })
}
