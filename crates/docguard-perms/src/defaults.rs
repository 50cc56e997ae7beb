//! The out-of-the-box permission contribution.

use docguard_core::permissions::*;

use crate::descriptor::{PermissionDescriptor, VisibilityDescriptor, VisibilityItem};

/// Default permission definitions, in registration order.
pub fn permission_descriptors() -> Vec<PermissionDescriptor> {
    let atomic = [
        BROWSE,
        READ_VERSION,
        READ_CHILDREN,
        READ_LIFE_CYCLE,
        READ_SECURITY,
        WRITE_PROPERTIES,
        ADD_CHILDREN,
        REMOVE_CHILDREN,
        REMOVE,
        WRITE_SECURITY,
        WRITE_LIFE_CYCLE,
        VERSION,
        MANAGE_WORKFLOWS,
        EVERYTHING,
    ];

    let mut descriptors: Vec<PermissionDescriptor> =
        atomic.into_iter().map(PermissionDescriptor::new).collect();

    descriptors.extend([
        PermissionDescriptor::compound(READ_PROPERTIES, [BROWSE]),
        PermissionDescriptor::compound(
            READ,
            [READ_PROPERTIES, READ_CHILDREN, READ_LIFE_CYCLE, BROWSE, READ_VERSION],
        ),
        PermissionDescriptor::compound(
            WRITE,
            [
                ADD_CHILDREN,
                REMOVE_CHILDREN,
                WRITE_PROPERTIES,
                REMOVE,
                READ_VERSION,
                WRITE_LIFE_CYCLE,
                VERSION,
            ],
        ),
        PermissionDescriptor::compound(READ_WRITE, [READ, WRITE]),
        PermissionDescriptor::compound(READ_REMOVE, [READ, REMOVE]),
    ]);

    descriptors
}

/// Default user visible permissions.
pub fn visibility_descriptors() -> Vec<VisibilityDescriptor> {
    vec![VisibilityDescriptor::default_list(vec![
        VisibilityItem::new(READ, 10),
        VisibilityItem::new(READ_WRITE, 50),
        VisibilityItem::new(READ_REMOVE, 60).hidden(),
        VisibilityItem::new(EVERYTHING, 100),
    ])]
}
