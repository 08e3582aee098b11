use serde::{Deserialize, Serialize};
use std::collections::{BTreeSet, HashSet};
use std::fmt;
use std::str::FromStr;
use thiserror::Error;

use crate::model::ids::ChoiceId;

//
// ─── ERRORS ────────────────────────────────────────────────────────────────────
//

#[derive(Debug, Error, Clone, PartialEq, Eq)]
#[non_exhaustive]
pub enum QuestionError {
    #[error("question text cannot be empty")]
    EmptyText,

    #[error("question has no choices")]
    NoChoices,

    #[error("choice id cannot be empty")]
    EmptyChoiceId,

    #[error("duplicate choice id: {0}")]
    DuplicateChoice(ChoiceId),

    #[error("single-choice question must have exactly one correct choice, found {found}")]
    SingleChoiceKey { found: usize },

    #[error("multiple-choice question must have at least one correct choice")]
    MissingAnswerKey,
}

/// Returned when a label does not name a known variant.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
#[error("unknown {kind}: {value:?}")]
pub struct ParseLabelError {
    pub kind: &'static str,
    pub value: String,
}

impl ParseLabelError {
    fn new(kind: &'static str, value: &str) -> Self {
        Self {
            kind,
            value: value.to_owned(),
        }
    }
}

//
// ─── ENUMS ─────────────────────────────────────────────────────────────────────
//

/// Difficulty tier of a question.
///
/// Ordering follows the tiers (`Basic < Intermediate < Advanced`), which is also the
/// order breakdowns are reported in.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Difficulty {
    Basic,
    Intermediate,
    Advanced,
}

impl Difficulty {
    pub const ALL: [Difficulty; 3] = [Self::Basic, Self::Intermediate, Self::Advanced];

    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Basic => "basic",
            Self::Intermediate => "intermediate",
            Self::Advanced => "advanced",
        }
    }
}

impl fmt::Display for Difficulty {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Difficulty {
    type Err = ParseLabelError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim() {
            "basic" => Ok(Self::Basic),
            "intermediate" => Ok(Self::Intermediate),
            "advanced" => Ok(Self::Advanced),
            other => Err(ParseLabelError::new("difficulty", other)),
        }
    }
}

/// Whether a question accepts one answer or a set of answers.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum QuestionType {
    #[default]
    Single,
    Multiple,
}

impl QuestionType {
    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Single => "single",
            Self::Multiple => "multiple",
        }
    }

    /// Badge text shown next to the question.
    #[must_use]
    pub fn label(self) -> &'static str {
        match self {
            Self::Single => "Single Choice",
            Self::Multiple => "Multiple Choice (Select all that apply)",
        }
    }
}

impl FromStr for QuestionType {
    type Err = ParseLabelError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim() {
            "single" => Ok(Self::Single),
            "multiple" => Ok(Self::Multiple),
            other => Err(ParseLabelError::new("question type", other)),
        }
    }
}

/// Age-related macular degeneration stage of the exam a question belongs to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum AmdStage {
    Healthy,
    EarlyIntermediate,
    LateDry,
    LateWet,
}

impl AmdStage {
    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Healthy => "Healthy",
            Self::EarlyIntermediate => "EarlyIntermediate",
            Self::LateDry => "LateDry",
            Self::LateWet => "LateWet",
        }
    }

    /// Human readable stage name.
    #[must_use]
    pub fn label(self) -> &'static str {
        match self {
            Self::Healthy => "Healthy",
            Self::EarlyIntermediate => "Early/Intermediate",
            Self::LateDry => "Late Dry AMD",
            Self::LateWet => "Late Wet AMD",
        }
    }
}

impl FromStr for AmdStage {
    type Err = ParseLabelError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim() {
            "Healthy" => Ok(Self::Healthy),
            "EarlyIntermediate" => Ok(Self::EarlyIntermediate),
            "LateDry" => Ok(Self::LateDry),
            "LateWet" => Ok(Self::LateWet),
            other => Err(ParseLabelError::new("AMD stage", other)),
        }
    }
}

//
// ─── CHOICE ────────────────────────────────────────────────────────────────────
//

/// One answer option of a question.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Choice {
    id: ChoiceId,
    text: String,
    is_correct: bool,
    reason: String,
}

impl Choice {
    #[must_use]
    pub fn new(
        id: impl Into<ChoiceId>,
        text: impl Into<String>,
        is_correct: bool,
        reason: impl Into<String>,
    ) -> Self {
        Self {
            id: id.into(),
            text: text.into(),
            is_correct,
            reason: reason.into(),
        }
    }

    #[must_use]
    pub fn id(&self) -> &ChoiceId {
        &self.id
    }

    #[must_use]
    pub fn text(&self) -> &str {
        &self.text
    }

    #[must_use]
    pub fn is_correct(&self) -> bool {
        self.is_correct
    }

    #[must_use]
    pub fn reason(&self) -> &str {
        &self.reason
    }
}

//
// ─── QUESTION ──────────────────────────────────────────────────────────────────
//

/// Unvalidated question fields, merged with the exam they came from.
#[derive(Debug, Clone, PartialEq)]
pub struct QuestionDraft {
    pub text: String,
    pub topic: String,
    pub difficulty: Difficulty,
    pub question_type: QuestionType,
    pub choices: Vec<Choice>,
    pub image_file: String,
    pub amd_stage: AmdStage,
    pub biomarkers: serde_json::Value,
}

impl QuestionDraft {
    /// Check the answer-key invariants and produce an immutable `Question`.
    ///
    /// # Errors
    ///
    /// Returns `QuestionError` if the text is blank, there are no choices, choice ids
    /// are empty or repeated, or the answer key does not fit the question type.
    pub fn validate(self) -> Result<Question, QuestionError> {
        if self.text.trim().is_empty() {
            return Err(QuestionError::EmptyText);
        }
        if self.choices.is_empty() {
            return Err(QuestionError::NoChoices);
        }

        let mut seen = HashSet::with_capacity(self.choices.len());
        for choice in &self.choices {
            if choice.id.as_str().trim().is_empty() {
                return Err(QuestionError::EmptyChoiceId);
            }
            if !seen.insert(choice.id.as_str()) {
                return Err(QuestionError::DuplicateChoice(choice.id.clone()));
            }
        }

        let correct = self.choices.iter().filter(|c| c.is_correct).count();
        match self.question_type {
            QuestionType::Single if correct != 1 => {
                return Err(QuestionError::SingleChoiceKey { found: correct });
            }
            QuestionType::Multiple if correct == 0 => {
                return Err(QuestionError::MissingAnswerKey);
            }
            _ => {}
        }

        Ok(Question {
            text: self.text,
            topic: self.topic,
            difficulty: self.difficulty,
            question_type: self.question_type,
            choices: self.choices,
            image_file: self.image_file,
            amd_stage: self.amd_stage,
            biomarkers: self.biomarkers,
        })
    }
}

/// A validated question, carrying the image and annotations of its exam.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Question {
    text: String,
    topic: String,
    difficulty: Difficulty,
    question_type: QuestionType,
    choices: Vec<Choice>,
    image_file: String,
    amd_stage: AmdStage,
    biomarkers: serde_json::Value,
}

impl Question {
    #[must_use]
    pub fn text(&self) -> &str {
        &self.text
    }

    #[must_use]
    pub fn topic(&self) -> &str {
        &self.topic
    }

    #[must_use]
    pub fn difficulty(&self) -> Difficulty {
        self.difficulty
    }

    #[must_use]
    pub fn question_type(&self) -> QuestionType {
        self.question_type
    }

    #[must_use]
    pub fn is_multiple(&self) -> bool {
        self.question_type == QuestionType::Multiple
    }

    #[must_use]
    pub fn choices(&self) -> &[Choice] {
        &self.choices
    }

    #[must_use]
    pub fn choice(&self, id: &str) -> Option<&Choice> {
        self.choices.iter().find(|c| c.id.as_str() == id)
    }

    #[must_use]
    pub fn has_choice(&self, id: &str) -> bool {
        self.choice(id).is_some()
    }

    /// Ids of every choice flagged correct. This set is the answer key.
    #[must_use]
    pub fn correct_ids(&self) -> BTreeSet<ChoiceId> {
        self.choices
            .iter()
            .filter(|c| c.is_correct)
            .map(|c| c.id.clone())
            .collect()
    }

    #[must_use]
    pub fn correct_choices(&self) -> Vec<&Choice> {
        self.choices.iter().filter(|c| c.is_correct).collect()
    }

    #[must_use]
    pub fn image_file(&self) -> &str {
        &self.image_file
    }

    /// Relative path the image is served from.
    #[must_use]
    pub fn image_path(&self) -> String {
        format!("images/{}", self.image_file)
    }

    #[must_use]
    pub fn amd_stage(&self) -> AmdStage {
        self.amd_stage
    }

    /// Opaque biomarker annotations, passed through untouched.
    #[must_use]
    pub fn biomarkers(&self) -> &serde_json::Value {
        &self.biomarkers
    }
}

//
// ─── TESTS ─────────────────────────────────────────────────────────────────────
//

#[cfg(test)]
mod tests {
    use super::*;

    fn draft(question_type: QuestionType, choices: Vec<Choice>) -> QuestionDraft {
        QuestionDraft {
            text: "Which layer is disrupted?".into(),
            topic: "Anatomy".into(),
            difficulty: Difficulty::Basic,
            question_type,
            choices,
            image_file: "scan_001.png".into(),
            amd_stage: AmdStage::LateWet,
            biomarkers: serde_json::Value::Null,
        }
    }

    #[test]
    fn single_requires_exactly_one_correct() {
        let none = draft(
            QuestionType::Single,
            vec![Choice::new("A", "a", false, ""), Choice::new("B", "b", false, "")],
        );
        assert_eq!(
            none.validate().unwrap_err(),
            QuestionError::SingleChoiceKey { found: 0 }
        );

        let two = draft(
            QuestionType::Single,
            vec![Choice::new("A", "a", true, ""), Choice::new("B", "b", true, "")],
        );
        assert_eq!(
            two.validate().unwrap_err(),
            QuestionError::SingleChoiceKey { found: 2 }
        );
    }

    #[test]
    fn multiple_requires_an_answer_key() {
        let err = draft(QuestionType::Multiple, vec![Choice::new("A", "a", false, "")])
            .validate()
            .unwrap_err();
        assert_eq!(err, QuestionError::MissingAnswerKey);
    }

    #[test]
    fn duplicate_choice_ids_are_rejected() {
        let err = draft(
            QuestionType::Single,
            vec![Choice::new("A", "a", true, ""), Choice::new("A", "b", false, "")],
        )
        .validate()
        .unwrap_err();
        assert_eq!(err, QuestionError::DuplicateChoice(ChoiceId::new("A")));
    }

    #[test]
    fn correct_ids_collects_answer_key() {
        let question = draft(
            QuestionType::Multiple,
            vec![
                Choice::new("A", "drusen", true, "visible"),
                Choice::new("B", "fluid", false, "absent"),
                Choice::new("C", "atrophy", true, "visible"),
            ],
        )
        .validate()
        .unwrap();

        let ids: Vec<_> = question.correct_ids().into_iter().collect();
        assert_eq!(ids, vec![ChoiceId::new("A"), ChoiceId::new("C")]);
        assert!(question.is_multiple());
        assert_eq!(question.image_path(), "images/scan_001.png");
        assert_eq!(question.choice("B").map(Choice::text), Some("fluid"));
    }

    #[test]
    fn labels_parse_and_display() {
        assert_eq!("advanced".parse::<Difficulty>().unwrap(), Difficulty::Advanced);
        assert!("expert".parse::<Difficulty>().is_err());
        assert_eq!(
            "EarlyIntermediate".parse::<AmdStage>().unwrap().label(),
            "Early/Intermediate"
        );
        assert_eq!(QuestionType::Multiple.label(), "Multiple Choice (Select all that apply)");
        assert!(Difficulty::Basic < Difficulty::Advanced);
    }
}
