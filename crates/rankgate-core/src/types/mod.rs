//! Core value types for the registry.

mod identity;
mod level;

pub use identity::Identity;
pub use level::{Level, WorkBudget, UNAUTHORIZED};
