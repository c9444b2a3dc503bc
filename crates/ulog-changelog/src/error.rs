//! Error types for the changelog crate.

use std::path::PathBuf;

/// Errors from reading or writing output files. None of them abort a run.
#[derive(Debug, thiserror::Error)]
pub enum ChangelogError {
    /// An existing file could not be read.
    #[error("failed to read {}: {source}", path.display())]
    Read {
        path: PathBuf,
        source: std::io::Error,
    },

    /// A file could not be created or fully written.
    #[error("failed to write {}: {source}", path.display())]
    Write {
        path: PathBuf,
        source: std::io::Error,
    },

    /// The merged tree could not be encoded.
    #[error("serialization error: {0}")]
    Serialization(#[from] serde_json::Error),
}

/// Convenience alias for changelog results.
pub type ChangelogResult<T> = Result<T, ChangelogError>;
