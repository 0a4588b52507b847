use std::path::PathBuf;

use thiserror::Error;

pub type Result<T> = std::result::Result<T, Error>;

/// Failures that abort the pipeline for a whole project.
///
/// Problems with individual declarations are reported as
/// [`Diagnostic`](crate::pipeline::Diagnostic)s instead.
#[derive(Debug, Error)]
pub enum Error {
    #[error("failed to read '{path}'")]
    UnreadableFile {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("failed to walk the declaration tree")]
    Walk(#[from] walkdir::Error),

    #[error("{what} snapshot unavailable: {reason}")]
    SnapshotUnavailable { what: String, reason: String },

    #[error("failed to write '{path}'")]
    Write {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("failed to serialize pipeline snapshot")]
    Serialize(#[from] serde_json::Error),
}

impl Error {
    pub fn snapshot_unavailable(what: impl Into<String>, reason: impl Into<String>) -> Self {
        Self::SnapshotUnavailable {
            what: what.into(),
            reason: reason.into(),
        }
    }
}
