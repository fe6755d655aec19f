//! Error types for voidnorm
//!
//! All fallible operations return `Result<T, Error>`.
//! Per-file errors are recorded by the walker and the walk continues;
//! only `Environment` errors terminate a run.

use std::path::PathBuf;

use thiserror::Error;

/// voidnorm error types
#[derive(Debug, Error)]
pub enum Error {
    /// No configured encoding could decode the file
    #[error("unable to decode {} with any configured encoding", path.display())]
    Decode { path: PathBuf },

    /// Reading or writing a single file failed
    #[error("i/o error on {}: {source}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// A directory entry below the root could not be visited
    #[error("cannot traverse {}: {message}", path.display())]
    Walk { path: PathBuf, message: String },

    /// The run itself cannot proceed (root missing, not a directory, unreadable)
    #[error("environment error at {}: {message}", path.display())]
    Environment { path: PathBuf, message: String },
}

impl Error {
    pub(crate) fn io(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        Error::Io {
            path: path.into(),
            source,
        }
    }

    pub(crate) fn environment(path: impl Into<PathBuf>, message: impl Into<String>) -> Self {
        Error::Environment {
            path: path.into(),
            message: message.into(),
        }
    }

    /// Returns true for errors that abort the whole run
    pub fn is_fatal(&self) -> bool {
        matches!(self, Error::Environment { .. })
    }
}

/// Result type alias for voidnorm operations
pub type Result<T> = std::result::Result<T, Error>;
