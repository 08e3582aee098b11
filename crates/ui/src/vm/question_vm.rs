use quiz_core::model::ChoiceMark;
use services::QuizSession;

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ChoiceVm {
    pub id: String,
    pub text: String,
    pub selected: bool,
    /// Set once the question has been submitted.
    pub mark: Option<ChoiceMark>,
}

/// Everything the question screen shows for the current question.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct QuestionVm {
    pub position: usize,
    pub total: usize,
    pub progress_percent: u32,
    pub score: usize,
    pub answered: usize,
    pub difficulty: &'static str,
    pub topic: String,
    pub stage_label: &'static str,
    pub type_label: &'static str,
    pub image_path: String,
    pub text: String,
    pub choices: Vec<ChoiceVm>,
    pub can_submit: bool,
    pub submitted: bool,
    /// `None` until submitted, then "Next Question" or "View Results".
    pub next_label: Option<&'static str>,
}

impl QuestionVm {
    #[must_use]
    pub fn from_session(session: &QuizSession) -> Self {
        let question = session.current_question();
        let progress = session.progress();
        let feedback = session.last_result();
        let submitted = feedback.is_some();

        let choices = question
            .choices()
            .iter()
            .enumerate()
            .map(|(i, choice)| ChoiceVm {
                id: choice.id().to_string(),
                text: choice.text().to_owned(),
                selected: session.selection().contains(choice.id()),
                mark: feedback
                    .as_ref()
                    .and_then(|result| result.choices.get(i))
                    .map(|c| c.mark),
            })
            .collect();

        let next_label = submitted.then(|| {
            if session.has_next() {
                "Next Question"
            } else {
                "View Results"
            }
        });

        Self {
            position: progress.position,
            total: progress.total,
            progress_percent: progress.percent,
            score: progress.score,
            answered: progress.answered,
            difficulty: question.difficulty().as_str(),
            topic: question.topic().to_owned(),
            stage_label: question.amd_stage().label(),
            type_label: question.question_type().label(),
            image_path: question.image_path(),
            text: question.text().to_owned(),
            choices,
            can_submit: session.can_submit(),
            submitted,
            next_label,
        }
    }
}
