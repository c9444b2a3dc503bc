use std::path::PathBuf;

use thiserror::Error;

/// Errors that stop a run before any output is written.
#[derive(Debug, Error)]
pub enum SdkError {
    #[error(transparent)]
    Fragment(#[from] ulog_fragment::FragmentError),

    #[error("failed to read config {}: {source}", path.display())]
    ConfigRead {
        path: PathBuf,
        source: std::io::Error,
    },

    #[error("invalid config: {0}")]
    Config(#[from] toml::de::Error),
}

pub type SdkResult<T> = Result<T, SdkError>;
