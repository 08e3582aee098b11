use serde::Serialize;
use std::collections::BTreeSet;

use quiz_core::model::{AnsweredRecord, Choice, ChoiceId, ChoiceMark, Question};

/// Per-choice highlight after submission.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ChoiceFeedback {
    pub id: ChoiceId,
    pub mark: ChoiceMark,
    pub selected: bool,
}

/// Reason text shown for a choice that was picked or belongs to the answer key.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Explanation {
    pub id: ChoiceId,
    pub is_correct: bool,
    pub reason: String,
}

/// Presentation-agnostic outcome of one submission.
///
/// Derived from the question and its `AnsweredRecord`; never stored in the session.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct AnswerResult {
    pub question_index: usize,
    pub is_correct: bool,
    pub choices: Vec<ChoiceFeedback>,
    pub explanations: Vec<Explanation>,
}

impl AnswerResult {
    #[must_use]
    pub fn project(question: &Question, record: &AnsweredRecord) -> Self {
        let selected = record.selected();

        let choices = question
            .choices()
            .iter()
            .map(|choice| ChoiceFeedback {
                id: choice.id().clone(),
                mark: ChoiceMark::classify(choice, selected),
                selected: selected.contains(choice.id()),
            })
            .collect();

        let explanations = question
            .choices()
            .iter()
            .filter(|choice| choice.is_correct() || selected.contains(choice.id()))
            .map(|choice| Explanation {
                id: choice.id().clone(),
                is_correct: choice.is_correct(),
                reason: choice.reason().to_owned(),
            })
            .collect();

        Self {
            question_index: record.question_index(),
            is_correct: record.is_correct(),
            choices,
            explanations,
        }
    }
}

/// One row of the post-quiz review.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ReviewEntry<'a> {
    pub index: usize,
    pub question: &'a Question,
    pub selected: &'a BTreeSet<ChoiceId>,
    pub correct: &'a BTreeSet<ChoiceId>,
    pub is_correct: bool,
}

impl<'a> ReviewEntry<'a> {
    #[must_use]
    pub fn new(index: usize, question: &'a Question, record: &'a AnsweredRecord) -> Self {
        Self {
            index,
            question,
            selected: record.selected(),
            correct: record.correct(),
            is_correct: record.is_correct(),
        }
    }

    /// Picked choices in question order.
    #[must_use]
    pub fn selected_choices(&self) -> Vec<&'a Choice> {
        self.question
            .choices()
            .iter()
            .filter(|c| self.selected.contains(c.id()))
            .collect()
    }

    #[must_use]
    pub fn correct_choices(&self) -> Vec<&'a Choice> {
        self.question.correct_choices()
    }

    /// Reasons attached to the correct choices.
    #[must_use]
    pub fn explanation(&self) -> Vec<&'a str> {
        self.correct_choices().into_iter().map(Choice::reason).collect()
    }
}
