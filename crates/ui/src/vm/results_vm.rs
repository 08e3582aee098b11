use quiz_core::model::PerformanceTier;
use services::{QuizSession, SessionError};

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct BreakdownRowVm {
    pub label: &'static str,
    pub correct: usize,
    pub total: usize,
    pub percent: u32,
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ResultsVm {
    pub percentage: u32,
    pub correct: usize,
    pub incorrect: usize,
    pub total: usize,
    pub tier: PerformanceTier,
    pub message: &'static str,
    pub breakdown: Vec<BreakdownRowVm>,
}

impl ResultsVm {
    /// # Errors
    ///
    /// Returns `SessionError::Incomplete` if the session still has unanswered questions.
    pub fn from_session(session: &QuizSession) -> Result<Self, SessionError> {
        let summary = session.summary()?;
        let breakdown = session
            .breakdown()?
            .iter()
            .map(|(difficulty, tally)| BreakdownRowVm {
                label: difficulty.as_str(),
                correct: tally.correct,
                total: tally.total,
                percent: tally.percentage(),
            })
            .collect();

        let tier = summary.tier();
        Ok(Self {
            percentage: summary.percentage(),
            correct: summary.correct(),
            incorrect: summary.incorrect(),
            total: summary.total(),
            tier,
            message: tier.message(),
            breakdown,
        })
    }
}
