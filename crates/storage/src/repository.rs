use async_trait::async_trait;
use quiz_core::RawExam;
use std::sync::Arc;
use thiserror::Error;

/// Errors surfaced by exam sources.
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum StorageError {
    #[error("not found: {0}")]
    NotFound(String),

    #[error("io error: {0}")]
    Io(#[from] std::io::Error),

    #[error("serialization error: {0}")]
    Serialization(String),

    #[error("connection error: {0}")]
    Connection(String),
}

/// Provider of the raw exam corpus.
///
/// The pool is fetched once at startup; implementations do not need to cache.
#[async_trait]
pub trait ExamSource: Send + Sync {
    /// Fetch every exam group, in provider order.
    ///
    /// # Errors
    ///
    /// Returns `StorageError` if the corpus cannot be read or decoded.
    async fn fetch_exams(&self) -> Result<Vec<RawExam>, StorageError>;
}

/// Fixed in-memory corpus for tests and embedding.
#[derive(Debug, Clone, Default)]
pub struct InMemorySource {
    exams: Arc<[RawExam]>,
}

impl InMemorySource {
    #[must_use]
    pub fn new(exams: Vec<RawExam>) -> Self {
        Self {
            exams: exams.into(),
        }
    }
}

#[async_trait]
impl ExamSource for InMemorySource {
    async fn fetch_exams(&self) -> Result<Vec<RawExam>, StorageError> {
        Ok(self.exams.to_vec())
    }
}
