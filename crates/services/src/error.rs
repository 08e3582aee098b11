//! Shared error types for the services crate.

use thiserror::Error;

use quiz_core::DataFormatError;
use storage::StorageError;

/// Errors emitted by quiz sessions.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
#[non_exhaustive]
pub enum SessionError {
    /// The settings filtered the pool down to nothing. Pick different settings.
    #[error("no questions available with the selected settings")]
    EmptyPool,

    /// Results were requested before every question was answered.
    #[error("session incomplete: {answered} of {total} questions answered")]
    Incomplete { answered: usize, total: usize },
}

/// Errors emitted while loading the question bank or starting sessions.
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum QuizServiceError {
    #[error(transparent)]
    Storage(#[from] StorageError),
    #[error(transparent)]
    DataFormat(#[from] DataFormatError),
    #[error(transparent)]
    Session(#[from] SessionError),
}
