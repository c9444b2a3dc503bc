use thiserror::Error;

#[derive(Debug, Error)]
pub enum PublishError {
    #[error("no supported CI environment detected (GitHub Actions, CircleCI, GitLab CI)")]
    NoCiProvider,

    #[error("missing environment variable: {0}")]
    MissingEnv(&'static str),

    #[error("invalid environment variable {name}: {reason}")]
    InvalidEnv { name: &'static str, reason: String },

    #[error("`{command}` failed with status {status}: {stderr}")]
    CommandFailed {
        command: String,
        status: String,
        stderr: String,
    },

    #[error("io error: {0}")]
    Io(#[from] std::io::Error),
}

pub type PublishResult<T> = Result<T, PublishError>;
