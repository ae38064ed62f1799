//! Error types for rankgate-cli

use thiserror::Error;

/// Result type alias for rankgate-cli operations
pub type Result<T> = std::result::Result<T, Error>;

/// Errors that can occur in rankgate-cli
#[derive(Error, Debug)]
#[non_exhaustive]
pub enum Error {
    /// Error from rankgate-core
    #[error("Core error: {0}")]
    Core(#[from] rankgate_core::Error),

    /// Config file could not be parsed
    #[error("Failed to parse config: {0}")]
    TomlParse(#[from] toml::de::Error),

    /// Config could not be rendered
    #[error("Failed to render config: {0}")]
    TomlRender(#[from] toml::ser::Error),

    /// I/O error with the path that caused it
    #[error("I/O error on {path}: {source}")]
    Io {
        /// File involved
        path: String,
        /// Underlying error
        #[source]
        source: std::io::Error,
    },

    /// A script line could not be decoded
    #[error("Script line {line}: {message}")]
    Script {
        /// 1-based line number
        line: usize,
        /// What went wrong
        message: String,
    },

    /// Refusing to overwrite existing state
    #[error("Snapshot already exists at {0}. Use --force to overwrite.")]
    SnapshotExists(String),
}

impl Error {
    /// Creates an I/O error tagged with the offending path.
    pub fn io_with_path(source: std::io::Error, path: &std::path::Path) -> Self {
        Error::Io {
            path: path.display().to_string(),
            source,
        }
    }
}
