//! The authorization registry state machine.
//!
//! [`Registry`] owns every piece of mutable state: the one-time level
//! configuration, the identity to level map, the slot arena used for
//! enumeration, and the bulk-revocation cursor. Every mutating method
//! validates first and mutates second, so a returned error always means
//! the registry is exactly as it was before the call.
//!
//! # Usage
//!
//! ```rust
//! use rankgate_core::{Identity, Registry};
//!
//! let owner = Identity::new("owner");
//! let alice = Identity::new("alice");
//!
//! let mut registry = Registry::new(owner.clone());
//! registry.authorize(&owner, &alice, 1).unwrap();
//! assert_eq!(registry.authorized(&alice), 1);
//! assert!(registry.am_i_authorized(&alice));
//! ```

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use crate::config::LevelConfig;
use crate::error::{Error, Result};
use crate::revoker::{BulkRevoker, Progress};
use crate::slots::SlotArray;
use crate::types::{Identity, Level, UNAUTHORIZED, WorkBudget};

/// An active grant: its level and the slot it occupies.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Grant {
    /// Granted level, always nonzero.
    pub level: Level,
    /// Index in the slot arena.
    pub slot: usize,
}

/// Hierarchical level-based authorization registry.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Registry {
    owner: Identity,
    config: LevelConfig,
    grants: BTreeMap<Identity, Grant>,
    slots: SlotArray,
    revoker: BulkRevoker,
}

fn slot_capacity(max_level: Level) -> usize {
    usize::try_from(max_level).unwrap_or(usize::MAX)
}

impl Registry {
    /// Creates a registry owned by `owner` with the default level bounds.
    pub fn new(owner: impl Into<Identity>) -> Self {
        let config = LevelConfig::default();
        Self {
            owner: owner.into(),
            slots: SlotArray::with_capacity(slot_capacity(config.max_level())),
            config,
            grants: BTreeMap::new(),
            revoker: BulkRevoker::new(),
        }
    }

    // ------------------------------------------------------------------
    // Queries
    // ------------------------------------------------------------------

    /// The single identity with unconditional authority.
    pub fn owner(&self) -> &Identity {
        &self.owner
    }

    /// Returns `true` if `identity` is the owner.
    pub fn is_owner(&self, identity: &Identity) -> bool {
        &self.owner == identity
    }

    /// Current level bounds.
    pub fn config(&self) -> &LevelConfig {
        &self.config
    }

    /// Highest level that may be granted.
    pub fn max_level(&self) -> Level {
        self.config.max_level()
    }

    /// Non-owners must hold strictly more than this to grant.
    pub fn authorizer_level(&self) -> Level {
        self.config.authorizer_level()
    }

    /// Returns `true` once [`Registry::configure`] has succeeded.
    pub fn is_configured(&self) -> bool {
        self.config.is_configured()
    }

    /// Maximum number of identities that can hold a grant at once.
    pub fn capacity(&self) -> usize {
        self.slots.capacity()
    }

    /// Next slot a bulk-revocation step will examine.
    pub fn cursor(&self) -> usize {
        self.revoker.cursor()
    }

    /// Number of identities currently holding a nonzero level.
    pub fn active_count(&self) -> usize {
        self.grants.len()
    }

    /// Iterates over active grants in identity order.
    pub fn grants(&self) -> impl Iterator<Item = (&Identity, Level)> {
        self.grants.iter().map(|(id, grant)| (id, grant.level))
    }

    /// Level held by `identity`, zero if none.
    pub fn authorized(&self, identity: &Identity) -> Level {
        self.grants
            .get(identity)
            .map_or(UNAUTHORIZED, |grant| grant.level)
    }

    /// Returns `true` if `caller` holds any nonzero level.
    pub fn am_i_authorized(&self, caller: &Identity) -> bool {
        self.authorized(caller) != UNAUTHORIZED
    }

    /// Snapshot of the slot arena, empty slots included. Owner only.
    pub fn get_authorized_addresses(&self, caller: &Identity) -> Result<Vec<Option<Identity>>> {
        if !self.is_owner(caller) {
            return Err(reject(caller, "list authorized identities"));
        }
        Ok(self.slots.snapshot())
    }

    // ------------------------------------------------------------------
    // Mutations
    // ------------------------------------------------------------------

    /// Sets the level bounds. Owner only, exactly once.
    ///
    /// The slot capacity follows the new `max_level` but never drops below
    /// the highest slot currently in use. A `max_level` below a live grant
    /// is rejected as `InvalidLevels`.
    pub fn configure(
        &mut self,
        caller: &Identity,
        max_level: Level,
        authorizer_level: Level,
    ) -> Result<()> {
        if !self.is_owner(caller) {
            return Err(reject(caller, "configure levels"));
        }
        let mut config = self.config;
        config.apply(max_level, authorizer_level)?;
        if self.highest_level() > max_level {
            return Err(Error::InvalidLevels {
                max_level,
                authorizer_level,
            });
        }
        self.config = config;

        let capacity = self.slots.resize(slot_capacity(max_level));
        self.revoker.clamp(self.slots.len());
        log::info!(
            "Levels configured: max_level={max_level}, \
             authorizer_level={authorizer_level}, capacity={capacity}"
        );
        Ok(())
    }

    /// Grants `level` to `target`, or revokes it when `level` is zero.
    ///
    /// The owner may set any level up to `max_level`. Anyone else must hold
    /// more than `authorizer_level` and may only set levels strictly below
    /// their own. The target's current level plays no part, so a delegator
    /// may also lower their own grant.
    pub fn authorize(&mut self, caller: &Identity, target: &Identity, level: Level) -> Result<()> {
        if !self.is_owner(caller) {
            let own = self.authorized(caller);
            if !self.config.can_delegate(own) || level >= own {
                return Err(reject(caller, "grant this level"));
            }
        }
        if level > self.config.max_level() {
            return Err(Error::InvalidLevel {
                level,
                max_level: self.config.max_level(),
            });
        }

        self.set_level(target, level)?;
        log::debug!("{caller} set {target} to level {level}");
        Ok(())
    }

    /// Drops the caller's own grant. Always permitted.
    ///
    /// Returns the level held before the call.
    pub fn de_authorize(&mut self, caller: &Identity) -> Level {
        let previous = self.authorized(caller);
        self.revoke(caller);
        if previous != UNAUTHORIZED {
            log::debug!("{caller} gave up level {previous}");
        }
        previous
    }

    /// Runs one bounded bulk-revocation step. Owner only.
    pub fn de_authorize_all_step(
        &mut self,
        caller: &Identity,
        budget: WorkBudget,
    ) -> Result<Progress> {
        if !self.is_owner(caller) {
            return Err(reject(caller, "revoke all grants"));
        }

        if self.grants.is_empty() {
            return Ok(self.revoker.settle());
        }

        let grants = &mut self.grants;
        let progress = self.revoker.step(&mut self.slots, budget, |identity| {
            grants.remove(&identity);
        });

        log::debug!(
            "Revocation step: examined={}, cleared={}, cursor={}",
            progress.examined,
            progress.cleared,
            progress.cursor
        );
        if progress.pass_complete {
            log::info!("Revocation pass complete, {} grants remain", self.grants.len());
        }
        Ok(progress)
    }

    // ------------------------------------------------------------------
    // Internals
    // ------------------------------------------------------------------

    fn highest_level(&self) -> Level {
        self.grants
            .values()
            .map(|grant| grant.level)
            .max()
            .unwrap_or(UNAUTHORIZED)
    }

    fn set_level(&mut self, target: &Identity, level: Level) -> Result<()> {
        if level == UNAUTHORIZED {
            self.revoke(target);
            return Ok(());
        }
        if let Some(grant) = self.grants.get_mut(target) {
            grant.level = level;
            return Ok(());
        }
        let slot = self.slots.occupy(target.clone())?;
        self.grants.insert(target.clone(), Grant { level, slot });
        Ok(())
    }

    fn revoke(&mut self, target: &Identity) {
        if let Some(grant) = self.grants.remove(target) {
            self.slots.release(grant.slot);
        }
    }

    /// Verifies the slot/level invariant.
    ///
    /// Every grant lies in `[1, max_level]` and sits in exactly the slot it
    /// records. Every occupied slot belongs to a grant, and the cursor lies
    /// inside the materialized arena.
    pub fn check_consistency(&self) -> Result<()> {
        LevelConfig::validate(self.config.max_level(), self.config.authorizer_level())?;
        if self.slots.len() > self.slots.capacity() {
            return Err(Error::config(format!(
                "{} slots materialized but capacity is {}",
                self.slots.len(),
                self.slots.capacity()
            )));
        }
        for (identity, grant) in &self.grants {
            if grant.level == UNAUTHORIZED {
                return Err(Error::config(format!("{identity} is stored with level 0")));
            }
            if grant.level > self.config.max_level() {
                return Err(Error::config(format!(
                    "{identity} holds level {} above max_level {}",
                    grant.level,
                    self.config.max_level()
                )));
            }
            if self.slots.get(grant.slot) != Some(identity) {
                return Err(Error::config(format!(
                    "{identity} is not in its recorded slot {}",
                    grant.slot
                )));
            }
        }
        if self.slots.occupied() != self.grants.len() {
            return Err(Error::config(format!(
                "{} occupied slots for {} grants",
                self.slots.occupied(),
                self.grants.len()
            )));
        }
        if self.revoker.cursor() > self.slots.len() {
            return Err(Error::config(format!(
                "cursor {} is past the end of {} slots",
                self.revoker.cursor(),
                self.slots.len()
            )));
        }
        Ok(())
    }
}

fn reject(caller: &Identity, action: &'static str) -> Error {
    log::warn!("Rejected: {caller} may not {action}");
    Error::unauthorized(caller, action)
}
