//! Error types for the rankgate registry.

use crate::types::Level;

/// Errors that can occur while operating on the registry.
///
/// Rejections ([`Error::is_rejection`]) are raised before any state is
/// touched, so a rejected operation always leaves the registry unchanged.
#[derive(Debug, thiserror::Error)]
#[non_exhaustive]
pub enum Error {
    /// Caller lacks the right to perform the requested action.
    #[error("Unauthorized: {caller} may not {action}")]
    Unauthorized {
        /// Identity that attempted the action
        caller: String,
        /// What was attempted
        action: &'static str,
    },

    /// The one-time level configuration has already been applied.
    #[error("Levels have already been configured")]
    AlreadyConfigured,

    /// Inconsistent bounds passed to `configure`.
    #[error("Invalid levels: max_level={max_level}, authorizer_level={authorizer_level}")]
    InvalidLevels {
        /// Requested maximum level
        max_level: Level,
        /// Requested authorizer threshold
        authorizer_level: Level,
    },

    /// A granted level is above the configured maximum.
    #[error("Invalid level {level}: maximum is {max_level}")]
    InvalidLevel {
        /// Requested level
        level: Level,
        /// Current maximum level
        max_level: Level,
    },

    /// Every slot is occupied and a new identity cannot be enumerated.
    #[error("All {capacity} slots are occupied")]
    SlotsExhausted {
        /// Slot array capacity
        capacity: usize,
    },

    /// Configuration error
    #[error("Configuration error: {message}")]
    Config {
        /// What configuration is problematic
        message: String,
    },

    /// No snapshot exists at the given path.
    #[error("Snapshot not found: {path}")]
    SnapshotNotFound {
        /// Path that was looked up
        path: String,
    },

    /// I/O error while reading or writing a snapshot.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// JSON serialization/deserialization error
    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),
}

/// Convenience `Result` type alias for registry operations.
pub type Result<T> = std::result::Result<T, Error>;

impl Error {
    /// Returns the stable rejection code reported back to submitters.
    pub fn reason(&self) -> &'static str {
        match self {
            Error::Unauthorized { .. } => "Unauthorized",
            Error::AlreadyConfigured => "AlreadyConfigured",
            Error::InvalidLevels { .. } => "InvalidLevels",
            Error::InvalidLevel { .. } => "InvalidLevel",
            Error::SlotsExhausted { .. } => "SlotsExhausted",
            Error::Config { .. } => "Config",
            Error::SnapshotNotFound { .. } => "SnapshotNotFound",
            Error::Io(_) => "Io",
            Error::Serialization(_) => "Serialization",
        }
    }

    /// Returns whether this error is a state-machine rejection.
    ///
    /// Rejections are caused by the caller and leave state unchanged.
    /// Everything else is an environment failure.
    pub fn is_rejection(&self) -> bool {
        match self {
            Error::Unauthorized { .. } => true,
            Error::AlreadyConfigured => true,
            Error::InvalidLevels { .. } => true,
            Error::InvalidLevel { .. } => true,
            Error::SlotsExhausted { .. } => true,
            Error::Config { .. } => false,
            Error::SnapshotNotFound { .. } => false,
            Error::Io(_) => false,
            Error::Serialization(_) => false,
        }
    }

    /// Creates a new unauthorized error.
    pub fn unauthorized<S: ToString>(caller: &S, action: &'static str) -> Self {
        Error::Unauthorized {
            caller: caller.to_string(),
            action,
        }
    }

    /// Creates a new configuration error.
    pub fn config<S: Into<String>>(message: S) -> Self {
        Error::Config {
            message: message.into(),
        }
    }
}
