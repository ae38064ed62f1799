//! Common test utilities and harness for rankgate integration tests.

#![allow(dead_code)]

use rankgate_core::{
    Identity, Invocation, Level, Operation, Outcome, Receipt, Registry, Result, WorkBudget,
};

/// Account names in the order the scenarios use them.
pub const OWNER: &str = "0xowner";

/// Test harness wrapping a registry and a submission budget.
///
/// Every call goes through [`Registry::submit`], so tests exercise the same
/// path an execution environment does.
pub struct TestHarness {
    /// Registry under test
    pub registry: Registry,
    /// Budget handed to every invocation
    pub work_budget: WorkBudget,
}

impl TestHarness {
    /// Creates a harness with a fresh registry and the default budget.
    pub fn new() -> Self {
        Self {
            registry: Registry::new(OWNER),
            work_budget: WorkBudget::default(),
        }
    }

    /// Creates a harness whose invocations carry `slots` of work budget.
    pub fn with_budget(slots: usize) -> Self {
        Self {
            work_budget: WorkBudget::new(slots).expect("nonzero budget"),
            ..Self::new()
        }
    }

    /// The owner identity.
    pub fn owner(&self) -> Identity {
        Identity::new(OWNER)
    }

    /// Submits `op` as `caller`.
    pub fn submit(&mut self, caller: &str, op: Operation) -> Result<Outcome> {
        let invocation = Invocation::new(caller).with_work_budget(self.work_budget);
        self.registry.submit(&invocation, op)
    }

    /// Submits `op` as `caller` and returns the receipt.
    pub fn receipt(&mut self, caller: &str, op: Operation) -> Receipt {
        let name = op.name();
        let result = self.submit(caller, op);
        Receipt::new(&Identity::new(caller), name, &result)
    }

    /// Grants `level` to `target` on behalf of `caller`.
    pub fn authorize(&mut self, caller: &str, target: &str, level: Level) -> Result<Outcome> {
        self.submit(
            caller,
            Operation::Authorize {
                target: Identity::new(target),
                level,
            },
        )
    }

    /// Level currently held by `identity`.
    pub fn level(&mut self, identity: &str) -> Level {
        match self.submit(
            identity,
            Operation::Authorized {
                identity: Identity::new(identity),
            },
        ) {
            Ok(Outcome::Level { level }) => level,
            other => unreachable!("unexpected result for authorized(): {other:?}"),
        }
    }

    /// Owner's view of the slot array.
    pub fn slots(&mut self) -> Vec<Option<Identity>> {
        match self.submit(OWNER, Operation::GetAuthorizedAddresses) {
            Ok(Outcome::Slots { slots }) => slots,
            other => unreachable!("unexpected result for enumeration: {other:?}"),
        }
    }

    /// Number of occupied slots in the owner's view.
    pub fn active_slots(&mut self) -> usize {
        self.slots().iter().filter(|s| s.is_some()).count()
    }
}

impl Default for TestHarness {
    fn default() -> Self {
        Self::new()
    }
}

/// Shorthand for a slot holding `name`.
pub fn slot(name: &str) -> Option<Identity> {
    Some(Identity::new(name))
}
