//! Shared error types for the services crate.

use thiserror::Error;

/// Failures fetching the question resource itself.
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum SourceError {
    #[error("request for questions failed with status {0}")]
    HttpStatus(reqwest::StatusCode),
    #[error(transparent)]
    Http(#[from] reqwest::Error),
    #[error(transparent)]
    Io(#[from] std::io::Error),
}

/// Errors emitted by `QuestionBankService`.
///
/// All of these are terminal for the triggering operation: nothing retries,
/// nothing panics, and the service stays usable afterwards.
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum QuestionBankError {
    #[error("questions resource is unavailable: {0}")]
    Source(#[from] SourceError),
    #[error("the questions resource contained no usable questions")]
    EmptyPool,
}
