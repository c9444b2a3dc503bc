use thiserror::Error;

/// Errors produced by type operations.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum TypeError {
    #[error("expected a JSON object at the fragment root, found {found}")]
    NotAnObject { found: &'static str },

    #[error("invalid ticket id: {0}")]
    InvalidTicket(String),
}
