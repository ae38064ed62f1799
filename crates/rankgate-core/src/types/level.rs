//! Levels and the bulk-revocation work budget.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::num::NonZeroUsize;

use crate::error::{Error, Result};

/// A permission level. `0` means "not authorized"; higher is more privileged.
pub type Level = u32;

/// The level held by an identity with no grant.
pub const UNAUTHORIZED: Level = 0;

/// Number of slots a single bulk-revocation step may examine.
///
/// Supplied by the execution environment on every invocation. It is never
/// zero, so every step makes forward progress.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "usize", into = "usize")]
pub struct WorkBudget(NonZeroUsize);

impl WorkBudget {
    /// Budget used when none is configured.
    pub const DEFAULT: WorkBudget = WorkBudget(NonZeroUsize::MIN.saturating_add(3));

    /// Creates a budget, rejecting zero.
    ///
    /// # Examples
    ///
    /// ```
    /// use rankgate_core::WorkBudget;
    ///
    /// assert_eq!(WorkBudget::new(8).unwrap().get(), 8);
    /// assert!(WorkBudget::new(0).is_err());
    /// ```
    pub fn new(slots: usize) -> Result<Self> {
        NonZeroUsize::new(slots)
            .map(Self)
            .ok_or_else(|| Error::config("work budget must be at least one slot"))
    }

    /// Returns the number of slots per step.
    pub fn get(self) -> usize {
        self.0.get()
    }
}

impl Default for WorkBudget {
    fn default() -> Self {
        Self::DEFAULT
    }
}

impl fmt::Display for WorkBudget {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl TryFrom<usize> for WorkBudget {
    type Error = Error;

    fn try_from(slots: usize) -> Result<Self> {
        Self::new(slots)
    }
}

impl From<WorkBudget> for usize {
    fn from(budget: WorkBudget) -> Self {
        budget.get()
    }
}

impl From<NonZeroUsize> for WorkBudget {
    fn from(slots: NonZeroUsize) -> Self {
        Self(slots)
    }
}
