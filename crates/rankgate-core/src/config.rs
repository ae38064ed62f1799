//! One-time level configuration.

use serde::{Deserialize, Serialize};

use crate::error::{Error, Result};
use crate::types::Level;

/// Default maximum grantable level.
pub const DEFAULT_MAX_LEVEL: Level = 64;

/// Default threshold above which a holder may grant lower levels.
pub const DEFAULT_AUTHORIZER_LEVEL: Level = 56;

/// Level bounds for the registry.
///
/// Holds the defaults until [`LevelConfig::apply`] succeeds once; after that
/// the values are frozen for the lifetime of the registry.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct LevelConfig {
    max_level: Level,
    authorizer_level: Level,
    configured: bool,
}

impl LevelConfig {
    /// Checks that a pair of bounds is consistent.
    pub fn validate(max_level: Level, authorizer_level: Level) -> Result<()> {
        if max_level == 0 || authorizer_level == 0 || authorizer_level > max_level {
            return Err(Error::InvalidLevels {
                max_level,
                authorizer_level,
            });
        }
        Ok(())
    }

    /// Stores new bounds and locks the configuration.
    ///
    /// Ownership is checked by the registry; this only enforces the
    /// one-shot rule and the bounds invariant.
    pub fn apply(&mut self, max_level: Level, authorizer_level: Level) -> Result<()> {
        if self.configured {
            return Err(Error::AlreadyConfigured);
        }
        Self::validate(max_level, authorizer_level)?;
        self.max_level = max_level;
        self.authorizer_level = authorizer_level;
        self.configured = true;
        Ok(())
    }

    /// Highest level that may be granted.
    pub fn max_level(&self) -> Level {
        self.max_level
    }

    /// Non-owners must hold strictly more than this to grant.
    pub fn authorizer_level(&self) -> Level {
        self.authorizer_level
    }

    /// Returns `true` once the one-time configuration has been applied.
    pub fn is_configured(&self) -> bool {
        self.configured
    }

    /// Returns `true` if a holder of `level` may grant to others.
    pub fn can_delegate(&self, level: Level) -> bool {
        level > self.authorizer_level
    }
}

impl Default for LevelConfig {
    fn default() -> Self {
        Self {
            max_level: DEFAULT_MAX_LEVEL,
            authorizer_level: DEFAULT_AUTHORIZER_LEVEL,
            configured: false,
        }
    }
}
