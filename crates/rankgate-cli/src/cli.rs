//! Command-line argument definitions.

use std::path::PathBuf;

use clap::{Parser, Subcommand};
use rankgate_core::Level;

/// Rankgate - level-based authorization registry
#[derive(Parser, Debug)]
#[command(name = "rankgate", author, version, about, long_about = None)]
pub struct Cli {
    /// Configuration file path
    #[arg(short, long, env = "RANKGATE_CONFIG")]
    pub config: Option<PathBuf>,

    /// Registry snapshot path (overrides `state_file`)
    #[arg(long, env = "RANKGATE_STATE")]
    pub state: Option<PathBuf>,

    /// Slots a bulk-revocation step may examine (overrides `revocation.work_budget`)
    #[arg(long, env = "RANKGATE_WORK_BUDGET")]
    pub work_budget: Option<usize>,

    /// Enable debug logging
    #[arg(short, long)]
    pub verbose: bool,

    #[command(subcommand)]
    pub command: Command,
}

/// Registry subcommands.
#[derive(Subcommand, Debug, Clone, PartialEq, Eq)]
pub enum Command {
    /// Create a fresh registry snapshot
    Init {
        /// Identity that will own the registry
        #[arg(long)]
        owner: String,
        /// Replace an existing snapshot
        #[arg(long)]
        force: bool,
    },
    /// Set the level bounds (owner, once)
    Configure {
        /// Calling identity
        #[arg(long)]
        caller: String,
        /// Highest grantable level
        max_level: Level,
        /// Holders above this level may grant
        authorizer_level: Level,
    },
    /// Grant, change, or (with level 0) revoke a level
    Authorize {
        /// Calling identity
        #[arg(long)]
        caller: String,
        /// Identity receiving the level
        target: String,
        /// Level to set
        level: Level,
    },
    /// Give up the caller's own level
    Deauthorize {
        /// Calling identity
        #[arg(long)]
        caller: String,
    },
    /// Run one bounded bulk-revocation step (owner)
    RevokeAllStep {
        /// Calling identity
        #[arg(long)]
        caller: String,
    },
    /// Print the level held by an identity
    Level {
        /// Identity to look up
        identity: String,
        /// Calling identity
        #[arg(long, default_value = "anonymous")]
        caller: String,
    },
    /// Check whether the caller holds any level
    AmI {
        /// Calling identity
        #[arg(long)]
        caller: String,
    },
    /// Print the slot snapshot (owner)
    List {
        /// Calling identity
        #[arg(long)]
        caller: String,
    },
    /// Submit a JSON-lines script of operations
    Run {
        /// Script path; each line is `{"caller": ..., "op": ..., ...}`
        script: PathBuf,
    },
    /// Print a summary of the registry
    Show,
}
