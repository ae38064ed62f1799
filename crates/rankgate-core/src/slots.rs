//! Bounded slot arena used for enumeration and bulk revocation.
//!
//! Slots are never compacted: a released slot becomes an empty sentinel in
//! place, and the next first-time grant takes the lowest free index. This
//! keeps positions stable across revoke/re-grant cycles, which the
//! revocation cursor relies on.
//!
//! The arena has a logical capacity but only materializes slots up to the
//! highest index ever handed out, so an enumeration of a fresh registry is
//! empty rather than `capacity` sentinels.

use serde::{Deserialize, Serialize};

use crate::error::{Error, Result};
use crate::types::Identity;

/// Ordered, bounded array of optional identities.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SlotArray {
    capacity: usize,
    slots: Vec<Option<Identity>>,
}

impl SlotArray {
    /// Creates an empty arena that may hold up to `capacity` identities.
    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            capacity,
            slots: Vec::new(),
        }
    }

    /// Maximum number of slots.
    pub fn capacity(&self) -> usize {
        self.capacity
    }

    /// Number of materialized slots, occupied or not.
    pub fn len(&self) -> usize {
        self.slots.len()
    }

    /// Returns `true` if no slot has been materialized yet.
    pub fn is_empty(&self) -> bool {
        self.slots.is_empty()
    }

    /// Returns the identity in slot `index`, if any.
    pub fn get(&self, index: usize) -> Option<&Identity> {
        self.slots.get(index).and_then(Option::as_ref)
    }

    /// Lowest-indexed free slot, materialized or not.
    pub fn first_free(&self) -> Option<usize> {
        self.slots
            .iter()
            .position(Option::is_none)
            .or_else(|| (self.slots.len() < self.capacity).then_some(self.slots.len()))
    }

    /// Places `identity` in the lowest free slot and returns its index.
    pub fn occupy(&mut self, identity: Identity) -> Result<usize> {
        let index = self.first_free().ok_or(Error::SlotsExhausted {
            capacity: self.capacity,
        })?;
        if index == self.slots.len() {
            self.slots.push(Some(identity));
        } else {
            self.slots[index] = Some(identity);
        }
        Ok(index)
    }

    /// Clears slot `index`, returning whoever held it.
    pub fn release(&mut self, index: usize) -> Option<Identity> {
        self.slots.get_mut(index).and_then(Option::take)
    }

    /// Number of occupied slots.
    pub fn occupied(&self) -> usize {
        self.slots.iter().filter(|s| s.is_some()).count()
    }

    /// Index of the highest occupied slot.
    pub fn highest_occupied(&self) -> Option<usize> {
        self.slots.iter().rposition(Option::is_some)
    }

    /// Changes the capacity to `capacity`, never dropping an occupied slot.
    ///
    /// Returns the capacity actually applied.
    pub fn resize(&mut self, capacity: usize) -> usize {
        let floor = self.highest_occupied().map_or(0, |i| i + 1);
        let target = capacity.max(floor);
        if self.slots.len() > target {
            self.slots.truncate(target);
        }
        self.capacity = target;
        target
    }

    /// Copy of the materialized layout, sentinels included.
    pub fn snapshot(&self) -> Vec<Option<Identity>> {
        self.slots.clone()
    }

    /// Iterates over `(index, identity)` for occupied slots.
    pub fn iter_occupied(&self) -> impl Iterator<Item = (usize, &Identity)> {
        self.slots
            .iter()
            .enumerate()
            .filter_map(|(i, s)| s.as_ref().map(|id| (i, id)))
    }
}
