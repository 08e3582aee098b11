//! Raw exam records and their conversion into a [`QuestionPool`].
//!
//! The raw types mirror the provider schema field for field. Fields the pool cannot
//! live without are `Option`s here so their absence surfaces as a
//! [`DataFormatError`] with a location instead of a bare deserializer message.

use serde::{Deserialize, Serialize};

use crate::error::{DataFormatError, RecordLocation};
use crate::model::{AmdStage, Choice, Difficulty, QuestionDraft, QuestionPool, QuestionType};

//
// ─── RAW RECORDS ───────────────────────────────────────────────────────────────
//

/// Top-level document: `{ "exams": [...] }`. The `exams` key is required.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct RawExamFile {
    pub exams: Vec<RawExam>,
}

/// One imaged exam and the questions asked about it.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct RawExam {
    pub image_file: Option<String>,
    pub amd_stage: Option<String>,
    #[serde(default)]
    pub biomarkers: serde_json::Value,
    pub questions: Option<Vec<RawQuestion>>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct RawQuestion {
    pub question_text: Option<String>,
    pub topic: Option<String>,
    pub difficulty: Option<String>,
    pub question_type: Option<String>,
    pub choices: Option<Vec<RawChoice>>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct RawChoice {
    pub id: Option<String>,
    pub text: Option<String>,
    /// Missing or `null` reads as `false`.
    pub is_correct: Option<bool>,
    /// Missing or `null` reads as empty.
    pub reason: Option<String>,
}

//
// ─── LOADER ────────────────────────────────────────────────────────────────────
//

/// Flattens exam groups into the question pool.
pub struct QuestionBank;

impl QuestionBank {
    /// Build the pool: exam order, then question order inside each exam.
    ///
    /// Each question inherits its exam's image, AMD stage and biomarkers. No
    /// deduplication is performed.
    ///
    /// # Errors
    ///
    /// Returns `DataFormatError` for the first missing required field, unknown enum
    /// label, or question that breaks the answer-key invariants.
    pub fn load(exams: Vec<RawExam>) -> Result<QuestionPool, DataFormatError> {
        let mut questions = Vec::new();

        for (exam_index, exam) in exams.into_iter().enumerate() {
            let exam_at = RecordLocation {
                exam: exam_index,
                question: None,
            };
            let image_file = require(exam.image_file, exam_at, "image_file")?;
            let amd_stage: AmdStage =
                parse_label(&require(exam.amd_stage, exam_at, "amd_stage")?, exam_at)?;
            let raw_questions = require(exam.questions, exam_at, "questions")?;

            for (question_index, raw) in raw_questions.into_iter().enumerate() {
                let at = RecordLocation {
                    exam: exam_index,
                    question: Some(question_index),
                };
                let draft = QuestionDraft {
                    text: require(raw.question_text, at, "question_text")?,
                    topic: raw.topic.unwrap_or_default(),
                    difficulty: parse_label::<Difficulty>(
                        &require(raw.difficulty, at, "difficulty")?,
                        at,
                    )?,
                    question_type: match raw.question_type.as_deref() {
                        None | Some("") => QuestionType::default(),
                        Some(label) => parse_label(label, at)?,
                    },
                    choices: convert_choices(require(raw.choices, at, "choices")?, at)?,
                    image_file: image_file.clone(),
                    amd_stage,
                    biomarkers: exam.biomarkers.clone(),
                };
                let question = draft
                    .validate()
                    .map_err(|source| DataFormatError::InvalidQuestion { at, source })?;
                questions.push(question);
            }
        }

        Ok(QuestionPool::new(questions))
    }

    /// Convenience wrapper over [`QuestionBank::load`] for a whole document.
    ///
    /// # Errors
    ///
    /// See [`QuestionBank::load`].
    pub fn load_file(file: RawExamFile) -> Result<QuestionPool, DataFormatError> {
        Self::load(file.exams)
    }
}

fn require<T>(
    value: Option<T>,
    at: RecordLocation,
    field: &'static str,
) -> Result<T, DataFormatError> {
    value.ok_or(DataFormatError::MissingField { at, field })
}

fn parse_label<T>(raw: &str, at: RecordLocation) -> Result<T, DataFormatError>
where
    T: std::str::FromStr<Err = crate::model::ParseLabelError>,
{
    raw.parse()
        .map_err(|source| DataFormatError::InvalidValue { at, source })
}

fn convert_choices(raw: Vec<RawChoice>, at: RecordLocation) -> Result<Vec<Choice>, DataFormatError> {
    raw.into_iter()
        .map(|c| {
            let id = require(c.id, at, "choices.id")?;
            let text = require(c.text, at, "choices.text")?;
            Ok(Choice::new(
                id,
                text,
                c.is_correct.unwrap_or_default(),
                c.reason.unwrap_or_default(),
            ))
        })
        .collect()
}

//
// ─── TESTS ─────────────────────────────────────────────────────────────────────
//
