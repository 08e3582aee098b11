mod answer;
mod ids;
mod pool;
mod question;
mod settings;
mod summary;

pub use ids::ChoiceId;

pub use answer::{AnsweredRecord, ChoiceMark};
pub use pool::QuestionPool;
pub use question::{
    AmdStage, Choice, Difficulty, ParseLabelError, Question, QuestionDraft, QuestionError,
    QuestionType,
};
pub use settings::{DifficultyFilter, QuestionCount, QuizSettings, SettingsError};
pub use summary::{
    Breakdown, DifficultyTally, PerformanceTier, ResultSummary, percent_half_up,
};
