use serde::Serialize;
use std::collections::BTreeMap;

use crate::model::question::Difficulty;

/// `round(100 * part / total)` with halves rounded up, in integer arithmetic.
///
/// Returns 0 when `total` is 0.
#[must_use]
pub fn percent_half_up(part: usize, total: usize) -> u32 {
    if total == 0 {
        return 0;
    }
    let pct = (part.saturating_mul(200) + total) / (total * 2);
    u32::try_from(pct).unwrap_or(u32::MAX)
}

//
// ─── RESULT SUMMARY ────────────────────────────────────────────────────────────
//

/// Final score of a completed session.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct ResultSummary {
    total: usize,
    correct: usize,
    incorrect: usize,
    percentage: u32,
}

impl ResultSummary {
    /// Build a summary from the number of questions and how many were answered correctly.
    ///
    /// `correct` is clamped to `total`.
    #[must_use]
    pub fn from_counts(total: usize, correct: usize) -> Self {
        let correct = correct.min(total);
        Self {
            total,
            correct,
            incorrect: total - correct,
            percentage: percent_half_up(correct, total),
        }
    }

    #[must_use]
    pub fn total(&self) -> usize {
        self.total
    }

    #[must_use]
    pub fn correct(&self) -> usize {
        self.correct
    }

    #[must_use]
    pub fn incorrect(&self) -> usize {
        self.incorrect
    }

    #[must_use]
    pub fn percentage(&self) -> u32 {
        self.percentage
    }

    #[must_use]
    pub fn tier(&self) -> PerformanceTier {
        PerformanceTier::from_percentage(self.percentage)
    }
}

//
// ─── PERFORMANCE TIER ──────────────────────────────────────────────────────────
//

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum PerformanceTier {
    /// 90% and above.
    Excellent,
    /// 70% to 89%.
    Good,
    /// 50% to 69%.
    Fair,
    NeedsImprovement,
}

impl PerformanceTier {
    #[must_use]
    pub fn from_percentage(percentage: u32) -> Self {
        match percentage {
            90.. => Self::Excellent,
            70..=89 => Self::Good,
            50..=69 => Self::Fair,
            _ => Self::NeedsImprovement,
        }
    }

    #[must_use]
    pub fn message(self) -> &'static str {
        match self {
            Self::Excellent => "Excellent! Outstanding performance!",
            Self::Good => "Good job! Solid understanding.",
            Self::Fair => "Fair performance. Keep practicing!",
            Self::NeedsImprovement => "Keep studying. You can improve!",
        }
    }
}

//
// ─── BREAKDOWN ─────────────────────────────────────────────────────────────────
//

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize)]
pub struct DifficultyTally {
    pub correct: usize,
    pub total: usize,
}

impl DifficultyTally {
    #[must_use]
    pub fn percentage(&self) -> u32 {
        percent_half_up(self.correct, self.total)
    }
}

/// Per-difficulty score. Only difficulties that were actually sampled appear.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize)]
pub struct Breakdown {
    tallies: BTreeMap<Difficulty, DifficultyTally>,
}

impl Breakdown {
    /// Build from `(difficulty, is_correct)` pairs, one per question.
    pub fn from_outcomes(outcomes: impl IntoIterator<Item = (Difficulty, bool)>) -> Self {
        let mut tallies: BTreeMap<Difficulty, DifficultyTally> = BTreeMap::new();
        for (difficulty, is_correct) in outcomes {
            let tally = tallies.entry(difficulty).or_default();
            tally.total += 1;
            if is_correct {
                tally.correct += 1;
            }
        }
        Self { tallies }
    }

    #[must_use]
    pub fn get(&self, difficulty: Difficulty) -> Option<&DifficultyTally> {
        self.tallies.get(&difficulty)
    }

    /// Tallies ordered basic, intermediate, advanced.
    pub fn iter(&self) -> impl Iterator<Item = (Difficulty, &DifficultyTally)> {
        self.tallies.iter().map(|(d, t)| (*d, t))
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.tallies.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.tallies.is_empty()
    }

    #[must_use]
    pub fn total_questions(&self) -> usize {
        self.tallies.values().map(|t| t.total).sum()
    }
}

//
// ─── TESTS ─────────────────────────────────────────────────────────────────────
//
