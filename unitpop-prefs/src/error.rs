use std::path::PathBuf;
use thiserror::Error;

/// Preference storage failures
#[derive(Debug, Error)]
pub enum PrefsError {
    #[error("failed to read preferences at {}: {source}", path.display())]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("failed to write preferences at {}: {source}", path.display())]
    Write {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("malformed preferences at {}: {source}", path.display())]
    Parse {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },

    #[error("failed to serialize preferences: {0}")]
    Serialize(#[from] serde_json::Error),
}
