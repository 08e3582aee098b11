use rand::Rng;
use std::collections::BTreeSet;
use std::fmt;
use tracing::{debug, info, warn};

use quiz_core::model::{
    AnsweredRecord, Breakdown, ChoiceId, Question, QuestionPool, QuizSettings, ResultSummary,
    percent_half_up,
};

use super::plan::{SessionBuilder, SessionPlan};
use super::progress::SessionProgress;
use super::view::{AnswerResult, ReviewEntry};
use crate::error::SessionError;

//
// ─── ADVANCE ───────────────────────────────────────────────────────────────────
//

/// Outcome of asking the session to move on.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Advance {
    /// Moved to the next question.
    Next,
    /// Already on the last question; show the results.
    Finished,
    /// The current question has not been submitted yet. Nothing changed.
    Unanswered,
}

impl Advance {
    #[must_use]
    pub fn has_next(self) -> bool {
        matches!(self, Self::Next)
    }
}

//
// ─── SESSION ───────────────────────────────────────────────────────────────────
//

/// One quiz run over a sampled, fixed sequence of questions.
///
/// Invariant: question `i` has been submitted iff `i < answers.len()`. Answers are
/// only ever appended for the current question, and the index only moves forward
/// after a submission, so the list stays parallel to `questions`.
///
/// Calls that do not fit the current state (selecting after submitting, submitting
/// an empty selection, advancing before submitting) are ignored.
pub struct QuizSession {
    questions: Vec<Question>,
    current: usize,
    score: usize,
    answers: Vec<AnsweredRecord>,
    selection: BTreeSet<ChoiceId>,
}

impl QuizSession {
    /// Sample a new session from the pool.
    ///
    /// # Errors
    ///
    /// Returns `SessionError::EmptyPool` if the settings leave no questions.
    pub fn start<R: Rng + ?Sized>(
        pool: &QuestionPool,
        settings: QuizSettings,
        rng: &mut R,
    ) -> Result<Self, SessionError> {
        let plan = SessionBuilder::new(settings).build(pool, rng);
        Self::from_plan(plan)
    }

    /// Start a session over questions in the given order, without sampling.
    ///
    /// # Errors
    ///
    /// Returns `SessionError::EmptyPool` if `questions` is empty.
    pub fn from_questions(questions: Vec<Question>) -> Result<Self, SessionError> {
        if questions.is_empty() {
            warn!("refusing to start a session without questions");
            return Err(SessionError::EmptyPool);
        }

        info!(total = questions.len(), "quiz session started");
        Ok(Self {
            questions,
            current: 0,
            score: 0,
            answers: Vec::new(),
            selection: BTreeSet::new(),
        })
    }

    pub(crate) fn from_plan(plan: SessionPlan) -> Result<Self, SessionError> {
        if plan.is_empty() {
            warn!(eligible = plan.eligible, "settings left no questions to sample");
            return Err(SessionError::EmptyPool);
        }
        Self::from_questions(plan.questions)
    }

    #[must_use]
    pub fn questions(&self) -> &[Question] {
        &self.questions
    }

    #[must_use]
    pub fn answers(&self) -> &[AnsweredRecord] {
        &self.answers
    }

    /// Total number of questions in this session.
    #[must_use]
    pub fn total(&self) -> usize {
        self.questions.len()
    }

    #[must_use]
    pub fn current_index(&self) -> usize {
        self.current
    }

    #[must_use]
    pub fn current_question(&self) -> &Question {
        &self.questions[self.current]
    }

    #[must_use]
    pub fn score(&self) -> usize {
        self.score
    }

    #[must_use]
    pub fn answered_count(&self) -> usize {
        self.answers.len()
    }

    #[must_use]
    pub fn selection(&self) -> &BTreeSet<ChoiceId> {
        &self.selection
    }

    #[must_use]
    pub fn is_current_submitted(&self) -> bool {
        self.current < self.answers.len()
    }

    /// Every question has an answer record.
    #[must_use]
    pub fn is_complete(&self) -> bool {
        self.answers.len() == self.questions.len()
    }

    /// Whether `advance` would move to another question.
    #[must_use]
    pub fn has_next(&self) -> bool {
        self.current + 1 < self.questions.len()
    }

    #[must_use]
    pub fn progress(&self) -> SessionProgress {
        let position = self.current + 1;
        SessionProgress {
            position,
            total: self.total(),
            answered: self.answered_count(),
            score: self.score,
            percent: percent_half_up(position, self.total()),
            is_complete: self.is_complete(),
        }
    }

    //
    // ── input ──
    //

    /// Update the in-progress selection.
    ///
    /// Single-choice questions replace the selection; multiple-choice questions
    /// toggle membership. Returns `false` when nothing changed: the question is
    /// already submitted or `choice_id` is not one of its choices.
    pub fn select(&mut self, choice_id: &str) -> bool {
        if self.is_current_submitted() {
            return false;
        }
        let question = &self.questions[self.current];
        let Some(choice) = question.choice(choice_id) else {
            debug!(choice_id, "ignoring selection of unknown choice");
            return false;
        };
        let id = choice.id().clone();

        if question.is_multiple() {
            if !self.selection.remove(&id) {
                self.selection.insert(id);
            }
        } else {
            self.selection.clear();
            self.selection.insert(id);
        }
        true
    }

    #[must_use]
    pub fn can_submit(&self) -> bool {
        !self.selection.is_empty() && !self.is_current_submitted()
    }

    /// Grade the current selection.
    ///
    /// Returns `None` without touching the score when the selection is empty or the
    /// question was already submitted, so repeated calls never double count.
    pub fn submit(&mut self) -> Option<AnswerResult> {
        if !self.can_submit() {
            return None;
        }

        let question = &self.questions[self.current];
        let record = AnsweredRecord::grade(self.current, question, self.selection.clone());
        if record.is_correct() {
            self.score += 1;
        }
        debug!(
            index = self.current,
            is_correct = record.is_correct(),
            score = self.score,
            "answer submitted"
        );

        let result = AnswerResult::project(question, &record);
        self.answers.push(record);
        if self.is_complete() {
            info!(score = self.score, total = self.total(), "quiz session finished");
        }
        Some(result)
    }

    /// Recompute the feedback for the current question, if it has been submitted.
    #[must_use]
    pub fn last_result(&self) -> Option<AnswerResult> {
        let record = self.answers.get(self.current)?;
        Some(AnswerResult::project(&self.questions[self.current], record))
    }

    /// Move to the next question once the current one is submitted.
    pub fn advance(&mut self) -> Advance {
        if !self.is_current_submitted() {
            return Advance::Unanswered;
        }
        if !self.has_next() {
            return Advance::Finished;
        }
        self.current += 1;
        self.selection.clear();
        Advance::Next
    }

    //
    // ── results ──
    //

    fn ensure_complete(&self) -> Result<(), SessionError> {
        if self.is_complete() {
            Ok(())
        } else {
            Err(SessionError::Incomplete {
                answered: self.answers.len(),
                total: self.questions.len(),
            })
        }
    }

    /// Final score.
    ///
    /// # Errors
    ///
    /// Returns `SessionError::Incomplete` if any question is unanswered.
    pub fn summary(&self) -> Result<ResultSummary, SessionError> {
        self.ensure_complete()?;
        Ok(ResultSummary::from_counts(self.total(), self.score))
    }

    /// Score per difficulty, omitting difficulties that were not sampled.
    ///
    /// # Errors
    ///
    /// Returns `SessionError::Incomplete` if any question is unanswered.
    pub fn breakdown(&self) -> Result<Breakdown, SessionError> {
        self.ensure_complete()?;
        Ok(Breakdown::from_outcomes(
            self.questions
                .iter()
                .zip(&self.answers)
                .map(|(q, a)| (q.difficulty(), a.is_correct())),
        ))
    }

    /// One entry per question, in session order.
    ///
    /// # Errors
    ///
    /// Returns `SessionError::Incomplete` if any question is unanswered.
    pub fn review(&self) -> Result<Vec<ReviewEntry<'_>>, SessionError> {
        self.ensure_complete()?;
        Ok(self
            .questions
            .iter()
            .zip(&self.answers)
            .enumerate()
            .map(|(index, (question, record))| ReviewEntry::new(index, question, record))
            .collect())
    }
}

impl fmt::Debug for QuizSession {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("QuizSession")
            .field("questions_len", &self.questions.len())
            .field("current", &self.current)
            .field("score", &self.score)
            .field("answers_len", &self.answers.len())
            .field("selection", &self.selection)
            .finish_non_exhaustive()
    }
}

//
// ─── TESTS ─────────────────────────────────────────────────────────────────────
//

#[cfg(test)]
mod tests {
    use super::*;
    use quiz_core::model::{
        AmdStage, Choice, Difficulty, DifficultyFilter, DifficultyTally, QuestionCount,
        QuestionDraft, QuestionType,
    };
    use rand::SeedableRng;
    use rand::rngs::StdRng;

    fn build_question(
        text: &str,
        difficulty: Difficulty,
        question_type: QuestionType,
        correct: &[&str],
    ) -> Question {
        let choices = ["A", "B", "C", "D"]
            .into_iter()
            .map(|id| Choice::new(id, format!("{text} {id}"), correct.contains(&id), "why"))
            .collect();
        QuestionDraft {
            text: text.into(),
            topic: "Staging".into(),
            difficulty,
            question_type,
            choices,
            image_file: "scan.png".into(),
            amd_stage: AmdStage::EarlyIntermediate,
            biomarkers: serde_json::Value::Null,
        }
        .validate()
        .unwrap()
    }

    fn single(text: &str, difficulty: Difficulty, correct: &str) -> Question {
        build_question(text, difficulty, QuestionType::Single, &[correct])
    }

    fn multiple(text: &str, difficulty: Difficulty, correct: &[&str]) -> Question {
        build_question(text, difficulty, QuestionType::Multiple, correct)
    }

    fn answer(session: &mut QuizSession, ids: &[&str]) -> AnswerResult {
        for id in ids {
            session.select(id);
        }
        session.submit().expect("submittable")
    }

    #[test]
    fn empty_session_returns_error() {
        let err = QuizSession::from_questions(Vec::new()).unwrap_err();
        assert_eq!(err, SessionError::EmptyPool);
    }

    #[test]
    fn start_fails_when_filter_matches_nothing() {
        let pool = QuestionPool::new(vec![single("q1", Difficulty::Basic, "A")]);
        let settings = QuizSettings::new(
            QuestionCount::All,
            DifficultyFilter::Only(Difficulty::Advanced),
        );
        let mut rng = StdRng::seed_from_u64(5);
        let err = QuizSession::start(&pool, settings, &mut rng).unwrap_err();
        assert_eq!(err, SessionError::EmptyPool);
    }

    #[test]
    fn fresh_session_starts_at_zero() {
        let session =
            QuizSession::from_questions(vec![single("q1", Difficulty::Basic, "A")]).unwrap();
        assert_eq!(session.current_index(), 0);
        assert_eq!(session.score(), 0);
        assert!(session.answers().is_empty());
        assert!(session.selection().is_empty());
        assert!(!session.can_submit());
    }

    #[test]
    fn single_choice_selection_replaces() {
        let mut session =
            QuizSession::from_questions(vec![single("q1", Difficulty::Basic, "B")]).unwrap();
        assert!(session.select("A"));
        assert!(session.select("C"));
        let selected: Vec<_> = session.selection().iter().map(ChoiceId::as_str).collect();
        assert_eq!(selected, vec!["C"]);
    }

    #[test]
    fn multiple_choice_selection_toggles() {
        let mut session =
            QuizSession::from_questions(vec![multiple("q1", Difficulty::Basic, &["A", "C"])])
                .unwrap();
        session.select("A");
        session.select("C");
        session.select("A");
        let selected: Vec<_> = session.selection().iter().map(ChoiceId::as_str).collect();
        assert_eq!(selected, vec!["C"]);
    }

    #[test]
    fn unknown_choice_is_ignored() {
        let mut session =
            QuizSession::from_questions(vec![single("q1", Difficulty::Basic, "A")]).unwrap();
        assert!(!session.select("Z"));
        assert!(session.selection().is_empty());
    }

    #[test]
    fn single_choice_correctness_law() {
        let mut session = QuizSession::from_questions(vec![
            single("q1", Difficulty::Basic, "B"),
            single("q2", Difficulty::Basic, "B"),
        ])
        .unwrap();

        assert!(answer(&mut session, &["B"]).is_correct);
        session.advance();
        assert!(!answer(&mut session, &["D"]).is_correct);
        assert_eq!(session.score(), 1);
    }

    #[test]
    fn multiple_choice_requires_exact_set() {
        let mut session = QuizSession::from_questions(vec![
            multiple("q1", Difficulty::Basic, &["A", "C"]),
            multiple("q2", Difficulty::Basic, &["A", "C"]),
            multiple("q3", Difficulty::Basic, &["A", "C"]),
        ])
        .unwrap();

        assert!(!answer(&mut session, &["A"]).is_correct);
        session.advance();
        assert!(answer(&mut session, &["C", "A"]).is_correct);
        session.advance();
        assert!(!answer(&mut session, &["A", "B", "C"]).is_correct);
        assert_eq!(session.score(), 1);
    }

    #[test]
    fn submit_is_idempotent() {
        let mut session =
            QuizSession::from_questions(vec![single("q1", Difficulty::Basic, "A")]).unwrap();
        session.select("A");
        assert!(session.submit().is_some());
        assert!(session.submit().is_none());
        assert_eq!(session.score(), 1);
        assert_eq!(session.answers().len(), 1);
    }

    #[test]
    fn submit_with_empty_selection_is_a_noop() {
        let mut session =
            QuizSession::from_questions(vec![single("q1", Difficulty::Basic, "A")]).unwrap();
        assert!(session.submit().is_none());
        assert!(session.answers().is_empty());
    }

    #[test]
    fn selection_is_frozen_after_submit() {
        let mut session =
            QuizSession::from_questions(vec![multiple("q1", Difficulty::Basic, &["A", "B"])])
                .unwrap();
        session.select("A");
        session.submit();
        assert!(!session.select("B"));
        let selected: Vec<_> = session.selection().iter().map(ChoiceId::as_str).collect();
        assert_eq!(selected, vec!["A"]);
        assert_eq!(
            session.last_result().map(|r| r.is_correct),
            Some(false)
        );
    }

    #[test]
    fn advance_requires_submission_and_stops_at_end() {
        let mut session = QuizSession::from_questions(vec![
            single("q1", Difficulty::Basic, "A"),
            single("q2", Difficulty::Basic, "A"),
        ])
        .unwrap();

        assert_eq!(session.advance(), Advance::Unanswered);
        assert_eq!(session.current_index(), 0);

        answer(&mut session, &["A"]);
        assert!(session.has_next());
        assert_eq!(session.advance(), Advance::Next);
        assert_eq!(session.current_index(), 1);
        assert!(session.selection().is_empty());
        assert!(!session.is_current_submitted());

        answer(&mut session, &["B"]);
        assert!(!session.has_next());
        assert_eq!(session.advance(), Advance::Finished);
        assert!(!Advance::Finished.has_next());
        assert_eq!(session.current_index(), 1);
    }

    #[test]
    fn results_require_every_answer() {
        let mut session = QuizSession::from_questions(vec![
            single("q1", Difficulty::Basic, "A"),
            single("q2", Difficulty::Basic, "A"),
        ])
        .unwrap();
        answer(&mut session, &["A"]);

        let expected = SessionError::Incomplete {
            answered: 1,
            total: 2,
        };
        assert_eq!(session.summary().unwrap_err(), expected);
        assert_eq!(session.breakdown().unwrap_err(), expected);
        assert_eq!(session.review().unwrap_err(), expected);
    }

    #[test]
    fn summary_and_breakdown_after_completion() {
        let mut session = QuizSession::from_questions(vec![
            single("b1", Difficulty::Basic, "A"),
            single("a1", Difficulty::Advanced, "A"),
            single("b2", Difficulty::Basic, "A"),
        ])
        .unwrap();

        answer(&mut session, &["A"]);
        session.advance();
        answer(&mut session, &["B"]);
        session.advance();
        answer(&mut session, &["A"]);

        let summary = session.summary().unwrap();
        assert_eq!(summary.total(), 3);
        assert_eq!(summary.correct(), 2);
        assert_eq!(summary.incorrect(), 1);
        assert_eq!(summary.percentage(), 67);

        let breakdown = session.breakdown().unwrap();
        assert!(breakdown.get(Difficulty::Intermediate).is_none());
        assert_eq!(
            breakdown.get(Difficulty::Basic),
            Some(&DifficultyTally {
                correct: 2,
                total: 2
            })
        );
        assert_eq!(
            breakdown.get(Difficulty::Advanced),
            Some(&DifficultyTally {
                correct: 0,
                total: 1
            })
        );
        assert_eq!(breakdown.total_questions(), session.total());

        let review = session.review().unwrap();
        assert_eq!(review.len(), 3);
        assert_eq!(review[1].question.text(), "a1");
        assert!(!review[1].is_correct);
        assert_eq!(review[1].selected.iter().map(ChoiceId::as_str).collect::<Vec<_>>(), vec!["B"]);
    }

    #[test]
    fn progress_tracks_position_and_score() {
        let mut session = QuizSession::from_questions(vec![
            single("q1", Difficulty::Basic, "A"),
            single("q2", Difficulty::Basic, "A"),
            single("q3", Difficulty::Basic, "A"),
            single("q4", Difficulty::Basic, "A"),
        ])
        .unwrap();
        answer(&mut session, &["A"]);
        session.advance();

        let progress = session.progress();
        assert_eq!(progress.position, 2);
        assert_eq!(progress.total, 4);
        assert_eq!(progress.answered, 1);
        assert_eq!(progress.score, 1);
        assert_eq!(progress.percent, 50);
        assert!(!progress.is_complete);
    }
}
