//! Command handlers.
//!
//! Every handler loads the snapshot, submits through
//! [`Registry::submit`](rankgate_core::Registry::submit), and writes the
//! snapshot back only when a mutating operation committed. Output goes to
//! the supplied writer as JSON so scripts can consume it.

use std::io::Write;
use std::path::Path;

use rankgate_core::{Identity, Invocation, Level, Operation, Receipt, Registry, store};
use serde::{Deserialize, Serialize};

use crate::cli::Command;
use crate::config::RankgateConfig;
use crate::error::{Error, Result};

/// One line of a submission script.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ScriptLine {
    /// Calling identity
    pub caller: Identity,
    /// Operation and its arguments
    #[serde(flatten)]
    pub op: Operation,
}

/// An active grant as printed by `show`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct GrantLine {
    /// Holder
    pub identity: Identity,
    /// Level held
    pub level: Level,
}

/// Registry overview printed by `show` and `init`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Summary {
    /// Registry owner
    pub owner: Identity,
    /// Highest grantable level
    pub max_level: Level,
    /// Delegation threshold
    pub authorizer_level: Level,
    /// Whether the one-time configuration has been applied
    pub configured: bool,
    /// Slot capacity
    pub capacity: usize,
    /// Number of active grants
    pub active: usize,
    /// Bulk-revocation cursor
    pub cursor: usize,
    /// Active grants in identity order
    pub grants: Vec<GrantLine>,
}

impl From<&Registry> for Summary {
    fn from(registry: &Registry) -> Self {
        Self {
            owner: registry.owner().clone(),
            max_level: registry.max_level(),
            authorizer_level: registry.authorizer_level(),
            configured: registry.is_configured(),
            capacity: registry.capacity(),
            active: registry.active_count(),
            cursor: registry.cursor(),
            grants: registry
                .grants()
                .map(|(identity, level)| GrantLine {
                    identity: identity.clone(),
                    level,
                })
                .collect(),
        }
    }
}

/// Resolved configuration plus the handlers that act on it.
#[derive(Debug, Clone)]
pub struct Session {
    config: RankgateConfig,
}

impl Session {
    /// Creates a session over a resolved configuration.
    pub fn new(config: RankgateConfig) -> Self {
        Self { config }
    }

    /// The configuration in effect.
    pub fn config(&self) -> &RankgateConfig {
        &self.config
    }

    fn state_path(&self) -> &Path {
        &self.config.state_file
    }

    fn invocation(&self, caller: Identity) -> Invocation {
        Invocation::new(caller).with_work_budget(self.config.revocation.work_budget)
    }

    /// Writes a fresh snapshot owned by `owner`.
    pub fn init(&self, owner: &str, force: bool) -> Result<Summary> {
        let path = self.state_path();
        if path.exists() && !force {
            return Err(Error::SnapshotExists(path.display().to_string()));
        }
        let registry = Registry::new(owner);
        store::save(path, &registry)?;
        tracing::info!(path = %path.display(), owner, "Initialized registry");
        Ok(Summary::from(&registry))
    }

    /// Submits a single operation.
    pub fn submit(&self, caller: &str, op: Operation) -> Result<Receipt> {
        let mut registry = store::load(self.state_path())?;
        let receipt = self.submit_to(&mut registry, Identity::new(caller), op)?;
        Ok(receipt)
    }

    /// Submits every line of a JSON-lines script in order.
    ///
    /// Blank lines and lines starting with `#` are skipped. A line that does
    /// not decode stops the run; lines before it stay committed.
    pub fn run_script(&self, script: &Path) -> Result<Vec<Receipt>> {
        let content =
            std::fs::read_to_string(script).map_err(|e| Error::io_with_path(e, script))?;
        let mut registry = store::load(self.state_path())?;

        let mut receipts = Vec::new();
        for (index, raw) in content.lines().enumerate() {
            let raw = raw.trim();
            if raw.is_empty() || raw.starts_with('#') {
                continue;
            }
            let line: ScriptLine = serde_json::from_str(raw).map_err(|e| Error::Script {
                line: index + 1,
                message: e.to_string(),
            })?;
            receipts.push(self.submit_to(&mut registry, line.caller, line.op)?);
        }
        tracing::info!(
            script = %script.display(),
            submitted = receipts.len(),
            committed = receipts.iter().filter(|r| r.is_committed()).count(),
            "Script finished"
        );
        Ok(receipts)
    }

    /// Current registry overview.
    pub fn summary(&self) -> Result<Summary> {
        let registry = store::load(self.state_path())?;
        Ok(Summary::from(&registry))
    }

    fn submit_to(
        &self,
        registry: &mut Registry,
        caller: Identity,
        op: Operation,
    ) -> Result<Receipt> {
        let invocation = self.invocation(caller);
        let name = op.name();
        let mutation = op.is_mutation();

        let result = registry.submit(&invocation, op);
        match &result {
            Ok(_) if mutation => {
                store::save(self.state_path(), registry)?;
                tracing::info!(caller = %invocation.caller, op = name, "Committed");
            }
            Ok(_) => tracing::debug!(caller = %invocation.caller, op = name, "Read"),
            Err(e) => {
                tracing::warn!(
                    caller = %invocation.caller,
                    op = name,
                    reason = e.reason(),
                    "Rejected: {e}"
                );
            }
        }
        Ok(Receipt::new(&invocation.caller, name, &result))
    }
}

/// Runs `command`, writing its output to `out`.
///
/// Returns `false` when a single submitted operation was not committed.
pub fn execute<W: Write>(session: &Session, command: Command, out: &mut W) -> Result<bool> {
    let single = |caller: String, op: Operation| session.submit(&caller, op);

    let receipt = match command {
        Command::Init { owner, force } => {
            let summary = session.init(&owner, force)?;
            write_json_pretty(out, &summary)?;
            return Ok(true);
        }
        Command::Show => {
            write_json_pretty(out, &session.summary()?)?;
            return Ok(true);
        }
        Command::Run { script } => {
            for receipt in session.run_script(&script)? {
                write_json_line(out, &receipt)?;
            }
            return Ok(true);
        }
        Command::Configure {
            caller,
            max_level,
            authorizer_level,
        } => single(
            caller,
            Operation::Configure {
                max_level,
                authorizer_level,
            },
        )?,
        Command::Authorize {
            caller,
            target,
            level,
        } => single(
            caller,
            Operation::Authorize {
                target: Identity::new(target),
                level,
            },
        )?,
        Command::Deauthorize { caller } => single(caller, Operation::DeAuthorize)?,
        Command::RevokeAllStep { caller } => single(caller, Operation::DeAuthorizeAllStep)?,
        Command::Level { identity, caller } => single(
            caller,
            Operation::Authorized {
                identity: Identity::new(identity),
            },
        )?,
        Command::AmI { caller } => single(caller, Operation::AmIAuthorized)?,
        Command::List { caller } => single(caller, Operation::GetAuthorizedAddresses)?,
    };

    write_json_line(out, &receipt)?;
    Ok(receipt.is_committed())
}

fn write_json_line<W: Write, T: Serialize>(out: &mut W, value: &T) -> Result<()> {
    let json = serde_json::to_string(value).map_err(rankgate_core::Error::from)?;
    writeln!(out, "{json}").map_err(|e| Error::io_with_path(e, Path::new("<stdout>")))
}

fn write_json_pretty<W: Write, T: Serialize>(out: &mut W, value: &T) -> Result<()> {
    let json = serde_json::to_string_pretty(value).map_err(rankgate_core::Error::from)?;
    writeln!(out, "{json}").map_err(|e| Error::io_with_path(e, Path::new("<stdout>")))
}
