//! # rankgate-cli
//!
//! Command-line submission driver for the rankgate registry.
//!
//! Each invocation loads a JSON snapshot, submits one operation (or a
//! script of them) as a named caller, and writes the snapshot back when a
//! mutation commits. Receipts are printed as JSON lines.

#![warn(missing_docs)]
#![warn(clippy::all)]
#![forbid(unsafe_code)]

pub mod cli;
pub mod commands;
pub mod config;
pub mod error;

pub use cli::{Cli, Command};
pub use commands::{Session, Summary, execute};
pub use config::RankgateConfig;
pub use error::{Error, Result};
