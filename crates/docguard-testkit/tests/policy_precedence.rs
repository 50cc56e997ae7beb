//! Policy chain precedence against the built-in lock policy.

use docguard::policy::LOCK_POLICY_ORDER;
use docguard::{Access, Acp, PolicyDescriptor, Principal};
use docguard_testkit::{SecurityFixture, CREATOR_POLICY};

fn init_tracing() {
    let _ = tracing_subscriber::fmt()
        .with_max_level(tracing_subscriber::filter::LevelFilter::TRACE)
        .with_test_writer()
        .try_init();
}

#[test]
fn lower_order_policy_preempts_lock_policy() {
    init_tracing();
    let fixture = SecurityFixture::new();
    let doc = fixture.locked_document("Bubbles", "Bodie");
    let acp = Acp::new();
    let creator = Principal::new("Bodie");
    let lock_holder = Principal::new("Bubbles");

    assert_eq!(fixture.check(&doc, &acp, &creator, "Write"), Access::Deny);
    assert_eq!(fixture.check(&doc, &acp, &lock_holder, "Write"), Access::Unknown);

    fixture.deploy_creator_policy(LOCK_POLICY_ORDER - 90).unwrap();
    assert_eq!(
        fixture.service.policy_service().policies(),
        vec!["creator", "lock", "checkin"]
    );

    assert_eq!(fixture.check(&doc, &acp, &creator, "Write"), Access::Grant);
    assert_eq!(fixture.check(&doc, &acp, &lock_holder, "Write"), Access::Unknown);
}

#[test]
fn higher_order_policy_cannot_override_lock() {
    init_tracing();
    let fixture = SecurityFixture::new();
    let doc = fixture.locked_document("Bubbles", "Bodie");
    let creator = Principal::new("Bodie");

    fixture.deploy_creator_policy(LOCK_POLICY_ORDER + 1000).unwrap();
    assert_eq!(fixture.check(&doc, &Acp::new(), &creator, "Write"), Access::Deny);

    // Still reaches the creator policy for permissions the lock does not restrict.
    assert_eq!(fixture.check(&doc, &Acp::new(), &creator, "Read"), Access::Grant);
}

#[test]
fn redeploying_with_new_order_changes_precedence() {
    init_tracing();
    let fixture = SecurityFixture::new();
    let doc = fixture.locked_document("Bubbles", "Bodie");
    let creator = Principal::new("Bodie");
    let policies = fixture.service.policy_service();

    fixture.deploy_creator_policy(1000).unwrap();
    assert_eq!(fixture.check(&doc, &Acp::new(), &creator, "Write"), Access::Deny);

    policies.register(PolicyDescriptor::reorder(CREATOR_POLICY, 1)).unwrap();
    assert_eq!(fixture.check(&doc, &Acp::new(), &creator, "Write"), Access::Grant);

    policies.register(PolicyDescriptor::disable(CREATOR_POLICY)).unwrap();
    assert_eq!(fixture.check(&doc, &Acp::new(), &creator, "Write"), Access::Deny);
}

#[test]
fn unlocked_document_falls_through_to_acl() {
    init_tracing();
    let fixture = SecurityFixture::new();
    let mut doc = fixture.locked_document("Bubbles", "Bodie");
    doc.set_lock(None);
    let poot = Principal::new("Poot").with_groups(["crew"]);
    let acp: Acp = serde_json::from_str(
        r#"{"acls":[{"name":"local","entries":[
            {"principal":"crew","permission":"Write","granted":true}
        ]}]}"#,
    )
    .unwrap();

    assert_eq!(fixture.check(&doc, &acp, &poot, "WriteProperties"), Access::Grant);
    assert_eq!(fixture.check(&doc, &acp, &poot, "Read"), Access::Unknown);
    assert!(!fixture.service.has_permission(&doc, &acp, &poot, "Read"));
}
