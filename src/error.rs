use std::io;
use std::path::PathBuf;
use thiserror::Error;

/// Failure to retrieve one URL. Never fatal on its own.
#[derive(Debug, Error)]
pub enum FetchError {
    #[error("{url} returned HTTP {status}")]
    Status { url: String, status: u16 },

    #[error("request to {url} failed: {reason}")]
    Request { url: String, reason: String },
}

#[derive(Debug, Error)]
pub enum CheckError {
    #[error("both urls are unreachable (primary: {primary}; fallback: {fallback})")]
    Unreachable {
        primary: FetchError,
        fallback: FetchError,
    },

    #[error("another run holds the state lock {}", .0.display())]
    Locked(PathBuf),

    #[error("state file {}: {source}", .path.display())]
    State {
        path: PathBuf,
        #[source]
        source: io::Error,
    },
}

impl CheckError {
    pub(crate) fn state(path: impl Into<PathBuf>, source: io::Error) -> Self {
        CheckError::State {
            path: path.into(),
            source,
        }
    }
}
