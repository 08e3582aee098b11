#![forbid(unsafe_code)]

pub mod error;
pub mod sessions;

pub use error::{QuizServiceError, SessionError};

pub use sessions::{
    Advance, AnswerResult, ChoiceFeedback, Explanation, QuizService, QuizSession, ReviewEntry,
    SessionProgress,
};
