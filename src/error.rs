//! Errors raised by the collaborators around the generation core.
//!
//! The generation stages themselves never fail: malformed content degrades to
//! fewer candidates. Everything here comes from files, JSON, the network or
//! the external cracking tool.

use std::path::{Path, PathBuf};
use std::time::Duration;

pub type Result<T> = std::result::Result<T, Error>;

#[derive(Debug, thiserror::Error)]
pub enum Error {
    #[error("I/O error on {}: {source}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("invalid profile JSON: {0}")]
    Json(#[from] serde_json::Error),

    #[error("profile must be a JSON object, found {found}")]
    NotAnObject { found: &'static str },

    #[error("weight for '{name}' must be a positive number")]
    InvalidWeight { name: String },

    #[error("unknown cracker command '{name}' (available: {available})")]
    UnknownCommand { name: String, available: String },

    #[error("failed to launch '{command}': {source}")]
    Spawn {
        command: String,
        #[source]
        source: std::io::Error,
    },

    #[error("command timed out after {0:?}")]
    Timeout(Duration),

    #[error("download of '{name}' failed: {source}")]
    Download {
        name: String,
        #[source]
        source: reqwest::Error,
    },
}

impl Error {
    /// Wrap an I/O error with the path it happened on.
    pub(crate) fn io(path: &Path, source: std::io::Error) -> Self {
        Error::Io { path: path.to_path_buf(), source }
    }
}
