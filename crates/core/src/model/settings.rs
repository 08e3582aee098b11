use serde::{Deserialize, Serialize};
use std::fmt;
use std::num::NonZeroUsize;
use std::str::FromStr;
use thiserror::Error;

use crate::model::question::Difficulty;

//
// ─── ERRORS ────────────────────────────────────────────────────────────────────
//

#[derive(Debug, Error, Clone, PartialEq, Eq)]
#[non_exhaustive]
pub enum SettingsError {
    #[error("question count must be > 0")]
    ZeroQuestionCount,

    #[error("invalid question count: {0:?} (expected a positive number or \"all\")")]
    InvalidQuestionCount(String),

    #[error("invalid difficulty filter: {0:?} (expected basic, intermediate, advanced or \"all\")")]
    InvalidDifficulty(String),
}

//
// ─── QUESTION COUNT ────────────────────────────────────────────────────────────
//

/// How many questions a session should contain.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum QuestionCount {
    Limited(NonZeroUsize),
    All,
}

impl QuestionCount {
    /// # Errors
    ///
    /// Returns `SettingsError::ZeroQuestionCount` for `0`.
    pub fn limited(count: usize) -> Result<Self, SettingsError> {
        NonZeroUsize::new(count)
            .map(Self::Limited)
            .ok_or(SettingsError::ZeroQuestionCount)
    }

    /// Number of questions to take out of `available`.
    #[must_use]
    pub fn take_from(self, available: usize) -> usize {
        match self {
            Self::Limited(n) => n.get().min(available),
            Self::All => available,
        }
    }
}

impl fmt::Display for QuestionCount {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Limited(n) => write!(f, "{n}"),
            Self::All => f.write_str("all"),
        }
    }
}

impl FromStr for QuestionCount {
    type Err = SettingsError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let s = s.trim();
        if s.eq_ignore_ascii_case("all") {
            return Ok(Self::All);
        }
        let parsed: usize = s
            .parse()
            .map_err(|_| SettingsError::InvalidQuestionCount(s.to_owned()))?;
        Self::limited(parsed)
    }
}

//
// ─── DIFFICULTY FILTER ─────────────────────────────────────────────────────────
//

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum DifficultyFilter {
    #[default]
    All,
    Only(Difficulty),
}

impl DifficultyFilter {
    #[must_use]
    pub fn accepts(self, difficulty: Difficulty) -> bool {
        match self {
            Self::All => true,
            Self::Only(wanted) => wanted == difficulty,
        }
    }
}

impl fmt::Display for DifficultyFilter {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::All => f.write_str("all"),
            Self::Only(d) => write!(f, "{d}"),
        }
    }
}

impl FromStr for DifficultyFilter {
    type Err = SettingsError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let s = s.trim();
        if s.eq_ignore_ascii_case("all") {
            return Ok(Self::All);
        }
        s.to_ascii_lowercase()
            .parse::<Difficulty>()
            .map(Self::Only)
            .map_err(|_| SettingsError::InvalidDifficulty(s.to_owned()))
    }
}

//
// ─── SETTINGS ──────────────────────────────────────────────────────────────────
//

/// User choices made before a session starts.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct QuizSettings {
    question_count: QuestionCount,
    difficulty: DifficultyFilter,
}

impl QuizSettings {
    pub const DEFAULT_QUESTION_COUNT: usize = 10;

    #[must_use]
    pub fn new(question_count: QuestionCount, difficulty: DifficultyFilter) -> Self {
        Self {
            question_count,
            difficulty,
        }
    }

    #[must_use]
    pub fn question_count(&self) -> QuestionCount {
        self.question_count
    }

    #[must_use]
    pub fn difficulty(&self) -> DifficultyFilter {
        self.difficulty
    }

    #[must_use]
    pub fn with_question_count(mut self, question_count: QuestionCount) -> Self {
        self.question_count = question_count;
        self
    }

    #[must_use]
    pub fn with_difficulty(mut self, difficulty: DifficultyFilter) -> Self {
        self.difficulty = difficulty;
        self
    }
}

impl Default for QuizSettings {
    /// Ten questions across every difficulty.
    fn default() -> Self {
        let ten = NonZeroUsize::new(Self::DEFAULT_QUESTION_COUNT).unwrap_or(NonZeroUsize::MIN);
        Self::new(QuestionCount::Limited(ten), DifficultyFilter::All)
    }
}
