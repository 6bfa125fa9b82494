//! Error types for scanning and reporting.
//!
//! Every failure is fatal to the run: the pipeline stops at the first error
//! and no partial report is produced.

use std::path::PathBuf;

use thiserror::Error;

/// Errors that can occur while building a specification map.
#[derive(Debug, Error)]
pub enum ScanError {
    /// Reading an input or writing the stored map failed.
    #[error("{}: {source}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// The YAML configuration file could not be parsed.
    #[error("invalid config file {}: {source}", path.display())]
    Config {
        path: PathBuf,
        #[source]
        source: serde_yaml::Error,
    },

    /// JSON serialization of the report failed.
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// A test function name produced a pattern that does not compile.
    #[error("invalid test function pattern: {0}")]
    Pattern(#[from] regex::Error),

    /// The configuration lists no test function names to look for.
    #[error("no test function names configured")]
    NoTestFunctions,

    /// A description could not be split even though it should always be.
    #[error("internal error: {0}")]
    Internal(String),
}

impl ScanError {
    pub(crate) fn io(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        Self::Io {
            path: path.into(),
            source,
        }
    }
}

/// Convenience alias for results with [`ScanError`].
pub type Result<T> = std::result::Result<T, ScanError>;
