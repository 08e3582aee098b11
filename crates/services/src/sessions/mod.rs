mod plan;
mod progress;
mod service;
mod view;
mod workflow;

// Public API of the session subsystem.
pub use crate::error::SessionError;
pub use plan::{SessionBuilder, SessionPlan, shuffle};
pub use progress::SessionProgress;
pub use service::{Advance, QuizSession};
pub use view::{AnswerResult, ChoiceFeedback, Explanation, ReviewEntry};
pub use workflow::QuizService;
