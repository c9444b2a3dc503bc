//! Error types for the fragment crate.

use std::path::PathBuf;

/// Errors that can occur while loading fragments. All of them abort the run.
#[derive(Debug, thiserror::Error)]
pub enum FragmentError {
    /// The file is not syntactically valid JSON.
    #[error("invalid JSON in {}: {source}", path.display())]
    InvalidJson {
        path: PathBuf,
        source: serde_json::Error,
    },

    /// The file is valid JSON but its root is not an object.
    #[error("invalid fragment {}: {source}", path.display())]
    NotAnObject {
        path: PathBuf,
        source: ulog_types::TypeError,
    },

    /// The file could not be read.
    #[error("failed to read {}: {source}", path.display())]
    Io {
        path: PathBuf,
        source: std::io::Error,
    },

    /// The fragment directory could not be listed.
    #[error("failed to list fragment directory: {0}")]
    Walk(#[from] walkdir::Error),
}

/// Convenience alias for fragment results.
pub type FragmentResult<T> = Result<T, FragmentError>;
