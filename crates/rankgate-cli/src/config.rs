//! Configuration for the `rankgate` binary.
//!
//! Values come from a TOML file (`rankgate.toml` by default) and may be
//! overridden by command-line flags or their environment variables.
//!
//! ```toml
//! state_file = "rankgate-state.json"
//!
//! [revocation]
//! work_budget = 4
//! ```

use std::path::{Path, PathBuf};

use rankgate_core::WorkBudget;
use serde::{Deserialize, Serialize};

use crate::error::{Error, Result};

/// Config file looked up in the working directory when none is given.
pub const DEFAULT_CONFIG_FILE: &str = "rankgate.toml";

/// Snapshot path used when the config does not name one.
pub const DEFAULT_STATE_FILE: &str = "rankgate-state.json";

/// Bulk-revocation settings.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct RevocationConfig {
    /// Slots one `revoke-all-step` may examine.
    pub work_budget: WorkBudget,
}

/// Top-level configuration.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct RankgateConfig {
    /// Path of the registry snapshot.
    pub state_file: PathBuf,
    /// Bulk-revocation settings.
    pub revocation: RevocationConfig,
}

impl Default for RankgateConfig {
    fn default() -> Self {
        Self {
            state_file: PathBuf::from(DEFAULT_STATE_FILE),
            revocation: RevocationConfig::default(),
        }
    }
}

impl RankgateConfig {
    /// Loads configuration.
    ///
    /// An explicitly requested file must exist. Without one, the default
    /// file is used if present and built-in defaults otherwise.
    pub fn load(path: Option<&Path>) -> Result<Self> {
        let (path, required) = match path {
            Some(p) => (p.to_path_buf(), true),
            None => (PathBuf::from(DEFAULT_CONFIG_FILE), false),
        };

        if !path.exists() {
            if required {
                return Err(Error::io_with_path(
                    std::io::Error::new(std::io::ErrorKind::NotFound, "config file not found"),
                    &path,
                ));
            }
            tracing::debug!(path = %path.display(), "No config file, using defaults");
            return Ok(Self::default());
        }

        let content = std::fs::read_to_string(&path).map_err(|e| Error::io_with_path(e, &path))?;
        let config = Self::from_toml_str(&content)?;
        tracing::debug!(path = %path.display(), "Loaded config");
        Ok(config)
    }

    /// Parses configuration from TOML text.
    pub fn from_toml_str(content: &str) -> Result<Self> {
        Ok(toml::from_str(content)?)
    }

    /// Renders configuration as TOML text.
    pub fn to_toml_string(&self) -> Result<String> {
        Ok(toml::to_string_pretty(self)?)
    }

    /// Applies command-line overrides on top of file values.
    pub fn apply_overrides(
        &mut self,
        state_file: Option<PathBuf>,
        work_budget: Option<usize>,
    ) -> Result<()> {
        if let Some(state_file) = state_file {
            self.state_file = state_file;
        }
        if let Some(slots) = work_budget {
            self.revocation.work_budget = WorkBudget::new(slots)?;
        }
        Ok(())
    }
}
