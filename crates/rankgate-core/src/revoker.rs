//! Resumable, step-bounded bulk revocation.
//!
//! A full clear may touch more slots than a single invocation is allowed to
//! examine, so the work is split into steps. Each step starts at the
//! persisted cursor, examines at most `budget` materialized slots, and
//! either leaves the cursor at the next unexamined slot or wraps it to zero
//! when the end of the array is reached.
//!
//! Steps are safe to interleave with grants and individual revocations:
//! they only ever clear whatever currently occupies the slot they examine,
//! and an empty slot is skipped without effect.

use serde::{Deserialize, Serialize};

use crate::slots::SlotArray;
use crate::types::{Identity, WorkBudget};

/// Outcome of a single revocation step.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Progress {
    /// Slots looked at during this step.
    pub examined: usize,
    /// Occupied slots cleared during this step.
    pub cleared: usize,
    /// Cursor after the step.
    pub cursor: usize,
    /// `true` if this step reached the end of the array and wrapped.
    pub pass_complete: bool,
}

impl Progress {
    /// Returns `true` if the step cleared nothing and left no pass in flight.
    pub fn is_idle(&self) -> bool {
        self.cleared == 0 && self.pass_complete
    }
}

/// Cursor state for bulk revocation.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct BulkRevoker {
    cursor: usize,
}

impl BulkRevoker {
    /// Creates a revoker positioned at slot zero.
    pub fn new() -> Self {
        Self::default()
    }

    /// Next slot index a step will examine.
    pub fn cursor(&self) -> usize {
        self.cursor
    }

    /// Returns `true` if a pass has started and not yet wrapped.
    pub fn in_progress(&self) -> bool {
        self.cursor != 0
    }

    /// Runs one bounded step over `slots`.
    ///
    /// `on_clear` is called with each identity removed from a slot so the
    /// caller can drop its level in the same operation.
    pub fn step<F>(
        &mut self,
        slots: &mut SlotArray,
        budget: WorkBudget,
        mut on_clear: F,
    ) -> Progress
    where
        F: FnMut(Identity),
    {
        let len = slots.len();
        let start = self.cursor.min(len);
        let end = start.saturating_add(budget.get()).min(len);

        let mut cleared = 0;
        for index in start..end {
            if let Some(identity) = slots.release(index) {
                on_clear(identity);
                cleared += 1;
            }
        }

        let pass_complete = end >= len;
        self.cursor = if pass_complete { 0 } else { end };

        Progress {
            examined: end - start,
            cleared,
            cursor: self.cursor,
            pass_complete,
        }
    }

    /// Ends any pass in flight without examining slots.
    ///
    /// Used when nothing is left to revoke, so an idle step reports a
    /// complete pass regardless of how many empty slots remain.
    pub fn settle(&mut self) -> Progress {
        self.cursor = 0;
        Progress {
            examined: 0,
            cleared: 0,
            cursor: 0,
            pass_complete: true,
        }
    }

    /// Pulls the cursor back inside a shrunken array.
    pub(crate) fn clamp(&mut self, len: usize) {
        if self.cursor >= len {
            self.cursor = 0;
        }
    }
}
