use crate::model::question::{Difficulty, Question};
use crate::model::settings::DifficultyFilter;

/// Flat, immutable set of every loaded question.
///
/// Built once by `QuestionBank::load`; sessions sample clones out of it and never
/// mutate it.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct QuestionPool {
    questions: Vec<Question>,
}

impl QuestionPool {
    #[must_use]
    pub fn new(questions: Vec<Question>) -> Self {
        Self { questions }
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.questions.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.questions.is_empty()
    }

    #[must_use]
    pub fn questions(&self) -> &[Question] {
        &self.questions
    }

    pub fn iter(&self) -> impl Iterator<Item = &Question> {
        self.questions.iter()
    }

    /// Questions that pass `filter`, in pool order.
    pub fn matching(&self, filter: DifficultyFilter) -> impl Iterator<Item = &Question> {
        self.questions
            .iter()
            .filter(move |q| filter.accepts(q.difficulty()))
    }

    /// How many questions a difficulty filter can offer.
    #[must_use]
    pub fn count_matching(&self, filter: DifficultyFilter) -> usize {
        self.matching(filter).count()
    }

    #[must_use]
    pub fn count_by_difficulty(&self, difficulty: Difficulty) -> usize {
        self.count_matching(DifficultyFilter::Only(difficulty))
    }
}

impl<'a> IntoIterator for &'a QuestionPool {
    type Item = &'a Question;
    type IntoIter = std::slice::Iter<'a, Question>;

    fn into_iter(self) -> Self::IntoIter {
        self.questions.iter()
    }
}
