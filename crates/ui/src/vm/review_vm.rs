use services::ReviewEntry;

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ReviewItemVm {
    pub number: usize,
    pub question: String,
    pub is_correct: bool,
    pub status: &'static str,
    pub image_path: String,
    /// Only present for incorrect answers.
    pub your_answer: Option<Vec<String>>,
    pub correct_answer: Vec<String>,
    pub explanation: Vec<String>,
}

impl From<&ReviewEntry<'_>> for ReviewItemVm {
    fn from(entry: &ReviewEntry<'_>) -> Self {
        let label = |id: &str, text: &str| format!("{id}. {text}");

        let your_answer = (!entry.is_correct).then(|| {
            entry
                .selected_choices()
                .iter()
                .map(|c| label(c.id().as_str(), c.text()))
                .collect()
        });

        Self {
            number: entry.index + 1,
            question: entry.question.text().to_owned(),
            is_correct: entry.is_correct,
            status: if entry.is_correct {
                "Correct"
            } else {
                "Incorrect"
            },
            image_path: entry.question.image_path(),
            your_answer,
            correct_answer: entry
                .correct_choices()
                .iter()
                .map(|c| label(c.id().as_str(), c.text()))
                .collect(),
            explanation: entry
                .explanation()
                .into_iter()
                .map(str::to_owned)
                .collect(),
        }
    }
}

#[must_use]
pub fn map_review_items(entries: &[ReviewEntry<'_>]) -> Vec<ReviewItemVm> {
    entries.iter().map(ReviewItemVm::from).collect()
}
