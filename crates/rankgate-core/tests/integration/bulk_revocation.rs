//! Integration tests for multi-step bulk revocation.

use rankgate_core::{Operation, Outcome, Progress};

use crate::common::{OWNER, TestHarness, slot};

fn step(harness: &mut TestHarness) -> Progress {
    match harness.submit(OWNER, Operation::DeAuthorizeAllStep) {
        Ok(Outcome::Step(progress)) => progress,
        other => unreachable!("unexpected step result: {other:?}"),
    }
}

#[test]
fn test_two_step_clear() {
    let mut harness = TestHarness::with_budget(3);
    let accounts: Vec<String> = (5..=9).map(|i| format!("0xaccount{i}")).collect();
    for account in &accounts {
        harness.authorize(OWNER, account, 16).unwrap();
    }

    let first = step(&mut harness);
    assert!(!first.pass_complete);
    let slots = harness.slots();
    assert_eq!(slots[2], None);
    assert_eq!(slots[3], slot("0xaccount8"));

    let second = step(&mut harness);
    assert!(second.pass_complete);
    assert!(harness.slots().iter().all(Option::is_none));
    for account in &accounts {
        assert_eq!(harness.level(account), 0);
    }
}

#[test]
fn test_clear_with_holes_from_earlier_revocations() {
    let mut harness = TestHarness::with_budget(4);
    for name in ["a", "b", "c", "d"] {
        harness.authorize(OWNER, name, 3).unwrap();
    }
    harness.submit("a", Operation::DeAuthorize).unwrap();
    harness.authorize(OWNER, "c", 0).unwrap();

    // refill the first hole, then grow past the old end
    for name in ["e", "f", "g", "h", "i"] {
        harness.authorize(OWNER, name, 2).unwrap();
    }
    assert_eq!(
        harness.slots(),
        vec![
            slot("e"),
            slot("b"),
            slot("f"),
            slot("d"),
            slot("g"),
            slot("h"),
            slot("i")
        ]
    );

    let first = step(&mut harness);
    assert_eq!(first.examined, 4);
    assert_eq!(first.cleared, 4);
    assert_eq!(first.cursor, 4);

    let second = step(&mut harness);
    assert!(second.pass_complete);
    assert_eq!(harness.active_slots(), 0);
}

#[test]
fn test_step_is_owner_only() {
    let mut harness = TestHarness::new();
    harness.authorize(OWNER, "a", 60).unwrap();
    let receipt = harness.receipt("a", Operation::DeAuthorizeAllStep);
    assert_eq!(receipt.reason.as_deref(), Some("Unauthorized"));
    assert_eq!(harness.level("a"), 60);
}

#[test]
fn test_interleaved_self_revocation_mid_pass() {
    let mut harness = TestHarness::with_budget(2);
    for name in ["a", "b", "c", "d", "e"] {
        harness.authorize(OWNER, name, 5).unwrap();
    }
    step(&mut harness);
    harness.submit("d", Operation::DeAuthorize).unwrap();

    let progress = step(&mut harness);
    assert_eq!(progress.cleared, 1);
    assert!(!progress.pass_complete);

    let progress = step(&mut harness);
    assert!(progress.pass_complete);
    assert_eq!(harness.active_slots(), 0);
    harness.registry.check_consistency().unwrap();
}

#[test]
fn test_step_after_full_pass_is_noop() {
    let mut harness = TestHarness::with_budget(8);
    for name in ["a", "b", "c"] {
        harness.authorize(OWNER, name, 5).unwrap();
    }
    assert!(step(&mut harness).pass_complete);

    let before = harness.registry.clone();
    let progress = step(&mut harness);
    assert!(progress.is_idle());
    assert_eq!(harness.registry, before);
}

#[test]
fn test_cursor_resumes_across_snapshot_reload() {
    let mut harness = TestHarness::with_budget(2);
    for name in ["a", "b", "c", "d"] {
        harness.authorize(OWNER, name, 5).unwrap();
    }
    step(&mut harness);

    let json = serde_json::to_string(&harness.registry).unwrap();
    harness.registry = serde_json::from_str(&json).unwrap();
    assert_eq!(harness.registry.cursor(), 2);

    let progress = step(&mut harness);
    assert!(progress.pass_complete);
    assert_eq!(harness.level("c"), 0);
}
