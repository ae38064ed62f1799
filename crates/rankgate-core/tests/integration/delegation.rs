//! Integration tests for level configuration and delegated grants.

use rankgate_core::{Identity, Operation, Outcome, Status};

use crate::common::{OWNER, TestHarness, slot};

const L1: &str = "0xlevel1";
const L5: &str = "0xlevel5";
const L64: &str = "0xlevel64";
const L114: &str = "0xlevel114";

fn configure(max_level: u32, authorizer_level: u32) -> Operation {
    Operation::Configure {
        max_level,
        authorizer_level,
    }
}

#[test]
fn test_fresh_registry_has_no_grants() {
    let mut harness = TestHarness::new();
    assert!(harness.slots().is_empty());
    assert_eq!(harness.registry.max_level(), 64);
    assert_eq!(harness.registry.authorizer_level(), 56);
}

#[test]
fn test_default_config_owner_grant() {
    let mut harness = TestHarness::new();
    harness.authorize(OWNER, L1, 1).unwrap();
    assert_eq!(harness.level(L1), 1);
    assert_eq!(harness.active_slots(), 1);
}

#[test]
fn test_invalid_configurations_are_rejected() {
    let mut harness = TestHarness::new();

    let receipt = harness.receipt(OWNER, configure(0, 0));
    assert_eq!(receipt.status, Status::Rejected);
    assert_eq!(receipt.reason.as_deref(), Some("InvalidLevels"));

    let receipt = harness.receipt(OWNER, configure(128, 256));
    assert_eq!(receipt.reason.as_deref(), Some("InvalidLevels"));

    assert!(!harness.registry.is_configured());
    assert_eq!(harness.registry.max_level(), 64);
}

#[test]
fn test_configuration_is_one_shot() {
    let mut harness = TestHarness::new();
    harness.submit(OWNER, configure(128, 96)).unwrap();
    assert_eq!(harness.registry.max_level(), 128);
    assert_eq!(harness.registry.authorizer_level(), 96);

    let before = harness.registry.clone();
    let receipt = harness.receipt(OWNER, configure(1024, 960));
    assert_eq!(receipt.reason.as_deref(), Some("AlreadyConfigured"));
    assert_eq!(harness.registry, before);

    let receipt = harness.receipt(OWNER, configure(32, 28));
    assert_eq!(receipt.reason.as_deref(), Some("AlreadyConfigured"));
    assert_eq!(harness.registry, before);
}

#[test]
fn test_only_owner_configures() {
    let mut harness = TestHarness::new();
    let receipt = harness.receipt(L114, configure(128, 96));
    assert_eq!(receipt.reason.as_deref(), Some("Unauthorized"));
    assert!(!harness.registry.is_configured());
}

#[test]
fn test_regrant_and_revoke_keep_one_slot() {
    let mut harness = TestHarness::new();
    harness.submit(OWNER, configure(128, 96)).unwrap();

    harness.authorize(OWNER, L1, 1).unwrap();
    harness.authorize(OWNER, L1, 2).unwrap();
    assert_eq!(harness.level(L1), 2);
    harness.authorize(OWNER, L1, 1).unwrap();
    assert_eq!(harness.level(L1), 1);

    harness.authorize(OWNER, L1, 0).unwrap();
    assert_eq!(harness.level(L1), 0);
    harness.authorize(OWNER, L1, 1).unwrap();
    assert_eq!(harness.level(L1), 1);
    assert_eq!(harness.slots(), vec![slot(L1)]);
}

#[test]
fn test_delegation_chain() {
    let mut harness = TestHarness::new();
    harness.submit(OWNER, configure(128, 96)).unwrap();
    harness.authorize(OWNER, L1, 1).unwrap();
    harness.authorize(OWNER, L5, 5).unwrap();
    harness.authorize(OWNER, L114, 114).unwrap();

    // 114 > 96 and 64 < 114
    harness.authorize(L114, L64, 64).unwrap();
    assert_eq!(harness.level(L64), 64);
    assert_eq!(harness.active_slots(), 4);

    // 64 is not above the threshold
    let receipt = harness.receipt(
        L64,
        Operation::Authorize {
            target: Identity::new("0xother"),
            level: 64,
        },
    );
    assert_eq!(receipt.reason.as_deref(), Some("Unauthorized"));
    assert_eq!(harness.level("0xother"), 0);

    // the grantor may also take back what it handed out
    harness.authorize(L114, L64, 0).unwrap();
    assert_eq!(harness.level(L64), 0);
}

#[test]
fn test_grantor_cannot_escalate() {
    let mut harness = TestHarness::new();
    harness.submit(OWNER, configure(128, 96)).unwrap();
    harness.authorize(OWNER, L114, 114).unwrap();

    for level in [114, 115, 128] {
        let err = harness.authorize(L114, "0xpeer", level).unwrap_err();
        assert_eq!(err.reason(), "Unauthorized");
    }
    assert_eq!(harness.level("0xpeer"), 0);
}

#[test]
fn test_grantor_may_demote_higher_holder_and_itself() {
    let mut harness = TestHarness::new();
    harness.submit(OWNER, configure(128, 96)).unwrap();
    harness.authorize(OWNER, "0xgrantor", 100).unwrap();
    harness.authorize(OWNER, L114, 114).unwrap();

    // only the grantor's level and the new level are compared
    harness.authorize("0xgrantor", L114, 50).unwrap();
    assert_eq!(harness.level(L114), 50);

    harness.authorize("0xgrantor", "0xgrantor", 97).unwrap();
    assert_eq!(harness.level("0xgrantor"), 97);
    assert_eq!(harness.active_slots(), 2);
}

#[test]
fn test_am_i_authorized() {
    let mut harness = TestHarness::new();
    harness.authorize(OWNER, L5, 5).unwrap();

    let outcome = harness.submit(L5, Operation::AmIAuthorized).unwrap();
    assert_eq!(outcome, Outcome::Flag { value: true });

    let outcome = harness.submit("0xnobody", Operation::AmIAuthorized).unwrap();
    assert_eq!(outcome, Outcome::Flag { value: false });
}

#[test]
fn test_self_revocation() {
    let mut harness = TestHarness::new();
    harness.authorize(OWNER, L1, 1).unwrap();

    let outcome = harness.submit(L1, Operation::DeAuthorize).unwrap();
    assert_eq!(outcome, Outcome::Revoked { previous: 1 });
    assert_eq!(harness.level(L1), 0);

    let outcome = harness.submit("0xnobody", Operation::DeAuthorize).unwrap();
    assert_eq!(outcome, Outcome::Revoked { previous: 0 });
}

#[test]
fn test_enumeration_requires_owner() {
    let mut harness = TestHarness::new();
    harness.authorize(OWNER, L1, 1).unwrap();
    let receipt = harness.receipt(L1, Operation::GetAuthorizedAddresses);
    assert_eq!(receipt.status, Status::Rejected);
    assert_eq!(receipt.reason.as_deref(), Some("Unauthorized"));
}
