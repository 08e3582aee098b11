use quiz_core::model::QuizSettings;
use services::{QuizService, QuizSession, SessionError};

use crate::views::ViewError;

/// Start a session, mapping service errors to something the user can act on.
///
/// # Errors
///
/// Returns `ViewError::EmptySession` when the settings match no questions.
/// Returns `ViewError::Unknown` for other failures.
pub fn start_session(
    service: &QuizService,
    settings: QuizSettings,
) -> Result<QuizSession, ViewError> {
    match service.start_session(settings) {
        Ok(session) => Ok(session),
        Err(SessionError::EmptyPool) => Err(ViewError::EmptySession),
        Err(_) => Err(ViewError::Unknown),
    }
}
