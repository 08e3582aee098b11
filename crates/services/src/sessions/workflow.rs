use rand::Rng;
use std::sync::Arc;
use tracing::info;

use quiz_core::QuestionBank;
use quiz_core::model::{DifficultyFilter, QuestionPool, QuizSettings};
use storage::ExamSource;

use super::service::QuizSession;
use crate::error::{QuizServiceError, SessionError};

/// Owns the loaded question pool and hands out sessions.
///
/// A `QuizService` only exists once the corpus has been fetched and validated, so
/// no session can start before the load resolves.
#[derive(Debug, Clone)]
pub struct QuizService {
    pool: Arc<QuestionPool>,
}

impl QuizService {
    /// Fetch the corpus from `source` and build the pool.
    ///
    /// # Errors
    ///
    /// Returns `QuizServiceError::Storage` if the source fails and
    /// `QuizServiceError::DataFormat` if the corpus is malformed.
    pub async fn load(source: &dyn ExamSource) -> Result<Self, QuizServiceError> {
        let exams = source.fetch_exams().await?;
        let exam_count = exams.len();
        let pool = QuestionBank::load(exams)?;
        info!(exams = exam_count, questions = pool.len(), "question bank loaded");
        Ok(Self::from_pool(pool))
    }

    #[must_use]
    pub fn from_pool(pool: QuestionPool) -> Self {
        Self {
            pool: Arc::new(pool),
        }
    }

    #[must_use]
    pub fn pool(&self) -> &QuestionPool {
        &self.pool
    }

    /// Number of questions a difficulty filter can offer.
    #[must_use]
    pub fn available(&self, filter: DifficultyFilter) -> usize {
        self.pool.count_matching(filter)
    }

    /// Start a session using the thread-local random generator.
    ///
    /// # Errors
    ///
    /// Returns `SessionError::EmptyPool` if the settings leave no questions.
    pub fn start_session(&self, settings: QuizSettings) -> Result<QuizSession, SessionError> {
        let mut rng = rand::rng();
        self.start_session_with_rng(settings, &mut rng)
    }

    /// Start a session with a caller-provided random source.
    ///
    /// # Errors
    ///
    /// Returns `SessionError::EmptyPool` if the settings leave no questions.
    pub fn start_session_with_rng<R: Rng + ?Sized>(
        &self,
        settings: QuizSettings,
        rng: &mut R,
    ) -> Result<QuizSession, SessionError> {
        QuizSession::start(&self.pool, settings, rng)
    }
}
