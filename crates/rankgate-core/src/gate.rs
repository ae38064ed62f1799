//! Read-only predicates for guarding protected operations.
//!
//! [`AccessGate`] is what the rest of a system consumes: it only needs the
//! level of an identity and whether that identity is the owner. Guards are
//! described as [`Requirement`] values so they can be declared once and
//! checked wherever the protected operation runs.
//!
//! Note that the owner is not implicitly authorized. An owner with no grant
//! fails [`Requirement::Authorized`]; use [`Requirement::OwnerOr`] to let
//! the owner through as well.

use serde::{Deserialize, Serialize};

use crate::error::{Error, Result};
use crate::registry::Registry;
use crate::types::{Identity, Level, UNAUTHORIZED};

/// A guard over a protected operation.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Requirement {
    /// Any nonzero level.
    Authorized,
    /// A nonzero level of at least this much.
    AtLeast(Level),
    /// One of the listed levels exactly.
    AtLevels(Vec<Level>),
    /// A nonzero level inside `[min, max]`.
    Within {
        /// Lowest accepted level
        min: Level,
        /// Highest accepted level
        max: Level,
    },
    /// The owner, or anyone meeting the inner requirement.
    OwnerOr(Box<Requirement>),
}

impl Requirement {
    /// Wraps this requirement so the owner also passes.
    pub fn or_owner(self) -> Self {
        Requirement::OwnerOr(Box::new(self))
    }

    /// Decides the requirement for a holder of `level`.
    pub fn admits(&self, is_owner: bool, level: Level) -> bool {
        match self {
            Requirement::Authorized => level != UNAUTHORIZED,
            Requirement::AtLeast(min) => level != UNAUTHORIZED && level >= *min,
            Requirement::AtLevels(levels) => level != UNAUTHORIZED && levels.contains(&level),
            Requirement::Within { min, max } => {
                level != UNAUTHORIZED && (*min..=*max).contains(&level)
            }
            Requirement::OwnerOr(inner) => is_owner || inner.admits(is_owner, level),
        }
    }
}

/// Level lookups and the predicates built on them.
pub trait AccessGate {
    /// Level held by `identity`, zero if none.
    fn level_of(&self, identity: &Identity) -> Level;

    /// Returns `true` if `identity` is the registry owner.
    fn is_owner(&self, identity: &Identity) -> bool;

    /// `true` iff `identity` holds any nonzero level.
    fn is_authorized(&self, identity: &Identity) -> bool {
        self.level_of(identity) > UNAUTHORIZED
    }

    /// `true` iff `identity` holds at least `level`.
    fn is_authorized_at_least(&self, identity: &Identity, level: Level) -> bool {
        self.level_of(identity) >= level
    }

    /// Evaluates `requirement` for `identity`.
    fn satisfies(&self, identity: &Identity, requirement: &Requirement) -> bool {
        requirement.admits(self.is_owner(identity), self.level_of(identity))
    }

    /// Like [`AccessGate::satisfies`] but rejects with
    /// [`Error::Unauthorized`].
    fn require(&self, identity: &Identity, requirement: &Requirement) -> Result<()> {
        if self.satisfies(identity, requirement) {
            Ok(())
        } else {
            Err(Error::unauthorized(identity, "perform a guarded operation"))
        }
    }
}

impl AccessGate for Registry {
    fn level_of(&self, identity: &Identity) -> Level {
        self.authorized(identity)
    }

    fn is_owner(&self, identity: &Identity) -> bool {
        Registry::is_owner(self, identity)
    }
}
