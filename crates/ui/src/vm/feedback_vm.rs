use services::AnswerResult;

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct FeedbackVm {
    pub is_correct: bool,
    pub headline: &'static str,
    /// One line per picked or correct choice, e.g. `"B. ✓ Correct: ..."`.
    pub lines: Vec<String>,
}

impl From<&AnswerResult> for FeedbackVm {
    fn from(result: &AnswerResult) -> Self {
        let lines = result
            .explanations
            .iter()
            .map(|e| {
                let verdict = if e.is_correct {
                    "✓ Correct"
                } else {
                    "✗ Incorrect"
                };
                format!("{}. {verdict}: {}", e.id, e.reason)
            })
            .collect();

        Self {
            is_correct: result.is_correct,
            headline: if result.is_correct {
                "Correct!"
            } else {
                "Incorrect"
            },
            lines,
        }
    }
}
