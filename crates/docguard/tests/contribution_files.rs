//! Loading configuration and contribution bundles from disk.

use std::fs;

use docguard::core::{Ace, Acl, Lock, MemoryDocument};
use docguard::{
    Access, Acp, Contributions, PermissionProvider, Principal, SecurityConfig, SecurityService,
};

const BUNDLE: &str = r#"{
    "permissions": [
        { "name": "Publish" },
        { "name": "ReadWrite", "include": ["Read", "Write", "Publish"] }
    ],
    "visibility": [
        { "doc_type": "Section", "items": [
            { "permission": "Publish", "order": 30 },
            { "permission": "ReadWrite", "show": false }
        ] }
    ],
    "document_types": [
        { "name": "Section" },
        { "name": "PressSection", "parent": "Section" }
    ],
    "policies": [
        { "name": "checkin", "order": 5 }
    ]
}"#;

#[test]
fn bundle_from_file_is_deployed() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("publishing.json");
    fs::write(&path, BUNDLE).unwrap();

    let service = SecurityService::default();
    let report = service.deploy(Contributions::from_file(&path).unwrap());
    assert!(report.is_clean(), "skipped: {:?}", report.skipped);
    assert_eq!(report.applied, 6);

    let pp = service.permission_provider();
    assert_eq!(pp.permission_groups("Publish"), vec!["ReadWrite"]);

    let visible: Vec<String> = pp
        .user_visible_permissions(Some("PressSection"))
        .into_iter()
        .map(|u| u.id)
        .collect();
    assert_eq!(visible, vec!["Read", "Publish", "Everything"]);

    assert_eq!(service.policy_service().policies(), vec!["checkin", "lock"]);

    let doc = MemoryDocument::new("s", "Section").with_lock(Lock::new("Bubbles", 0));
    let acp = Acp::new().with_acl(Acl::new("local").with(Ace::grant("editors", "ReadWrite")));
    let editor = Principal::new("Herc").with_groups(["editors"]);
    assert_eq!(service.check_permission(&doc, &acp, &editor, "Publish"), Access::Grant);
    assert_eq!(service.check_permission(&doc, &acp, &editor, "Write"), Access::Deny);
}

#[test]
fn config_file_drives_service() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("security.json");
    fs::write(&path, r#"{ "system_username": "root", "load_defaults": true }"#).unwrap();

    let service = SecurityService::new(SecurityConfig::from_file(&path).unwrap());
    let doc = MemoryDocument::new("d", "File").with_lock(Lock::new("Bubbles", 0));

    assert_eq!(
        service.check_permission(&doc, &Acp::new(), &Principal::new("root"), "Write"),
        Access::Grant
    );
    assert_eq!(
        service.check_permission(&doc, &Acp::new(), &Principal::new("system"), "Write"),
        Access::Deny
    );
}

#[test]
fn malformed_bundle_is_an_error() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("broken.json");
    fs::write(&path, r#"{ "permissions": "Read" }"#).unwrap();

    assert!(matches!(
        Contributions::from_file(&path),
        Err(docguard::SecurityError::Json(_))
    ));
    assert!(matches!(
        Contributions::from_file(dir.path().join("missing.json")),
        Err(docguard::SecurityError::Io(_))
    ));
}
