use rand::Rng;
use tracing::debug;

use quiz_core::model::{Question, QuestionPool, QuizSettings};

/// Selection result for a session build.
#[derive(Debug, Clone, PartialEq)]
pub struct SessionPlan {
    pub questions: Vec<Question>,
    /// How many pool questions passed the difficulty filter.
    pub eligible: usize,
}

impl SessionPlan {
    #[must_use]
    pub fn total(&self) -> usize {
        self.questions.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.questions.is_empty()
    }
}

/// Shuffle in place with Fisher–Yates.
///
/// Walks from the last index down to 1, swapping each slot with a uniformly drawn
/// index in `0..=i`, so every permutation is equally likely.
pub fn shuffle<T, R: Rng + ?Sized>(items: &mut [T], rng: &mut R) {
    for i in (1..items.len()).rev() {
        let j = rng.random_range(0..=i);
        items.swap(i, j);
    }
}

/// Builds a session by filtering, shuffling and truncating the pool.
pub struct SessionBuilder {
    settings: QuizSettings,
}

impl SessionBuilder {
    #[must_use]
    pub fn new(settings: QuizSettings) -> Self {
        Self { settings }
    }

    /// Build a plan from the pool.
    ///
    /// - questions are kept when their difficulty passes the settings filter;
    /// - the survivors are shuffled;
    /// - the first `min(count, survivors)` are taken, or all of them for `All`.
    ///
    /// The pool itself is left untouched; the plan holds clones.
    pub fn build<R: Rng + ?Sized>(self, pool: &QuestionPool, rng: &mut R) -> SessionPlan {
        let mut candidates: Vec<&Question> = pool.matching(self.settings.difficulty()).collect();
        let eligible = candidates.len();

        shuffle(&mut candidates, rng);

        let take = self.settings.question_count().take_from(eligible);
        let questions: Vec<Question> = candidates.into_iter().take(take).cloned().collect();

        debug!(
            eligible,
            selected = questions.len(),
            difficulty = %self.settings.difficulty(),
            count = %self.settings.question_count(),
            "built session plan"
        );

        SessionPlan {
            questions,
            eligible,
        }
    }
}
