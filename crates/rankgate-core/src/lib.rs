#![doc = include_str!("../README.md")]
#![forbid(unsafe_code)]
#![warn(missing_docs)]

//! Rankgate Core Library
//!
//! Level-based authorization registry with bounded delegation and
//! resumable bulk revocation.

pub mod config;
pub mod error;
pub mod gate;
pub mod ops;
mod proptests;
pub mod registry;
pub mod revoker;
pub mod slots;
pub mod store;
pub mod types;

// Re-exports for convenience
pub use config::LevelConfig;
pub use error::{Error, Result};
pub use gate::{AccessGate, Requirement};
pub use ops::{Invocation, Operation, Outcome, Receipt, Status};
pub use registry::{Grant, Registry};
pub use revoker::{BulkRevoker, Progress};
pub use slots::SlotArray;
pub use types::{Identity, Level, UNAUTHORIZED, WorkBudget};
