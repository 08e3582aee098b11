use quiz_core::model::{
    AmdStage, Choice, ChoiceMark, Difficulty, Question, QuestionDraft, QuestionType,
};
use services::QuizSession;

use crate::views::{render_feedback, render_question, render_results, render_review};
use crate::vm::{FeedbackVm, QuestionVm, ResultsVm, map_review_items};

fn build_question(text: &str, difficulty: Difficulty, question_type: QuestionType) -> Question {
    QuestionDraft {
        text: text.into(),
        topic: "Biomarkers".into(),
        difficulty,
        question_type,
        choices: vec![
            Choice::new("A", "Drusen", true, "Deposits beneath the RPE."),
            Choice::new("B", "Subretinal fluid", false, "No hyporeflective space."),
            Choice::new(
                "C",
                "Hyperreflective foci",
                question_type == QuestionType::Multiple,
                "Small bright dots in the outer retina.",
            ),
        ],
        image_file: "exam_007.png".into(),
        amd_stage: AmdStage::EarlyIntermediate,
        biomarkers: serde_json::Value::Null,
    }
    .validate()
    .unwrap()
}

fn render<F>(f: F) -> String
where
    F: FnOnce(&mut Vec<u8>) -> std::io::Result<()>,
{
    let mut buf = Vec::new();
    f(&mut buf).expect("render");
    String::from_utf8(buf).expect("utf8")
}

fn two_question_session() -> QuizSession {
    QuizSession::from_questions(vec![
        build_question("Which deposits are shown?", Difficulty::Basic, QuestionType::Single),
        build_question(
            "Which biomarkers are present?",
            Difficulty::Advanced,
            QuestionType::Multiple,
        ),
    ])
    .unwrap()
}

#[test]
fn question_view_renders_header_and_choices() {
    let mut session = two_question_session();
    session.select("B");

    let vm = QuestionVm::from_session(&session);
    assert_eq!(vm.position, 1);
    assert_eq!(vm.progress_percent, 50);
    assert!(vm.can_submit);
    assert!(!vm.submitted);
    assert_eq!(vm.next_label, None);

    let text = render(|out| render_question(out, &vm));
    assert!(text.contains("Question 1/2"), "{text}");
    assert!(text.contains("Early/Intermediate"), "{text}");
    assert!(text.contains("Single Choice"), "{text}");
    assert!(text.contains("images/exam_007.png"), "{text}");
    assert!(text.contains("* B. Subretinal fluid"), "{text}");
}

#[test]
fn submitted_question_shows_marks_and_feedback() {
    let mut session = two_question_session();
    session.select("B");
    let result = session.submit().unwrap();

    let vm = QuestionVm::from_session(&session);
    assert!(vm.submitted);
    assert_eq!(vm.next_label, Some("Next Question"));
    let marks: Vec<_> = vm.choices.iter().map(|c| c.mark).collect();
    assert_eq!(
        marks,
        vec![
            Some(ChoiceMark::Correct),
            Some(ChoiceMark::IncorrectSelected),
            Some(ChoiceMark::Unselected)
        ]
    );

    let feedback = FeedbackVm::from(&result);
    let text = render(|out| render_feedback(out, &feedback));
    assert!(text.starts_with("Incorrect"), "{text}");
    assert!(text.contains("A. ✓ Correct: Deposits beneath the RPE."), "{text}");
    assert!(text.contains("B. ✗ Incorrect: No hyporeflective space."), "{text}");
    assert!(!text.contains("C."), "{text}");
}

#[test]
fn results_and_review_render_after_completion() {
    let mut session = two_question_session();
    session.select("A");
    session.submit();
    session.advance();
    assert_eq!(
        QuestionVm::from_session(&session).next_label,
        None,
        "fresh question has no next label"
    );
    session.select("A");
    session.submit();
    assert_eq!(
        QuestionVm::from_session(&session).next_label,
        Some("View Results")
    );

    let results = ResultsVm::from_session(&session).unwrap();
    assert_eq!(results.percentage, 50);
    assert_eq!(results.message, "Fair performance. Keep practicing!");
    let labels: Vec<_> = results.breakdown.iter().map(|r| r.label).collect();
    assert_eq!(labels, vec!["basic", "advanced"]);

    let text = render(|out| render_results(out, &results));
    assert!(text.contains("Score: 50%"), "{text}");
    assert!(text.contains("1/1 (100%)"), "{text}");
    assert!(text.contains("0/1 (0%)"), "{text}");

    let review = session.review().unwrap();
    let items = map_review_items(&review);
    assert!(items[0].your_answer.is_none());
    assert_eq!(items[1].your_answer, Some(vec!["A. Drusen".to_owned()]));
    assert_eq!(
        items[1].correct_answer,
        vec!["A. Drusen".to_owned(), "C. Hyperreflective foci".to_owned()]
    );

    let text = render(|out| render_review(out, &items));
    assert!(text.contains("2. Which biomarkers are present? [Incorrect]"), "{text}");
    assert!(text.contains("Your Answer:"), "{text}");
}

#[test]
fn results_before_completion_is_an_error() {
    let session = two_question_session();
    assert!(ResultsVm::from_session(&session).is_err());
}
