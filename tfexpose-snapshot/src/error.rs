use std::fmt;

use thiserror::Error;

/// Which snapshot document failed.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SnapshotKind {
    /// Output of `providers schema -json`.
    ProviderSchemas,
    /// Output of `show -json`.
    State,
}

impl fmt::Display for SnapshotKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SnapshotKind::ProviderSchemas => write!(f, "provider schema"),
            SnapshotKind::State => write!(f, "state"),
        }
    }
}

#[derive(Debug, Error)]
pub enum SnapshotError {
    #[error("failed to parse {kind} snapshot")]
    Parse {
        kind: SnapshotKind,
        #[source]
        source: serde_json::Error,
    },
}

impl SnapshotError {
    pub(crate) fn parse(kind: SnapshotKind, source: serde_json::Error) -> Self {
        Self::Parse { kind, source }
    }

    /// The snapshot document that failed.
    pub fn kind(&self) -> SnapshotKind {
        match self {
            Self::Parse { kind, .. } => *kind,
        }
    }
}
