use serde::Serialize;
use std::collections::BTreeSet;

use crate::model::ids::ChoiceId;
use crate::model::question::{Choice, Question};

/// How a choice is highlighted once its question has been submitted.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum ChoiceMark {
    /// Part of the answer key, whether or not it was picked.
    Correct,
    /// Picked by the user but not part of the answer key.
    IncorrectSelected,
    Unselected,
}

impl ChoiceMark {
    #[must_use]
    pub fn classify(choice: &Choice, selected: &BTreeSet<ChoiceId>) -> Self {
        if choice.is_correct() {
            Self::Correct
        } else if selected.contains(choice.id()) {
            Self::IncorrectSelected
        } else {
            Self::Unselected
        }
    }
}

/// Frozen result of submitting one question.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct AnsweredRecord {
    question_index: usize,
    selected: BTreeSet<ChoiceId>,
    correct: BTreeSet<ChoiceId>,
    is_correct: bool,
}

impl AnsweredRecord {
    /// Grade `selected` against the question's answer key.
    ///
    /// Correct only when the selection equals the key exactly: a missing correct
    /// choice or an extra incorrect one both fail, and there is no partial credit.
    #[must_use]
    pub fn grade(question_index: usize, question: &Question, selected: BTreeSet<ChoiceId>) -> Self {
        let correct = question.correct_ids();
        let is_correct = selected == correct;
        Self {
            question_index,
            selected,
            correct,
            is_correct,
        }
    }

    #[must_use]
    pub fn question_index(&self) -> usize {
        self.question_index
    }

    #[must_use]
    pub fn selected(&self) -> &BTreeSet<ChoiceId> {
        &self.selected
    }

    #[must_use]
    pub fn correct(&self) -> &BTreeSet<ChoiceId> {
        &self.correct
    }

    #[must_use]
    pub fn is_correct(&self) -> bool {
        self.is_correct
    }
}
