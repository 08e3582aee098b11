use std::io::{self, Write};

use quiz_core::model::ChoiceMark;

use crate::vm::{FeedbackVm, QuestionVm};

const BAR_WIDTH: usize = 20;

fn progress_bar(percent: u32) -> String {
    let filled = (percent.min(100) as usize * BAR_WIDTH) / 100;
    format!("[{}{}]", "#".repeat(filled), "-".repeat(BAR_WIDTH - filled))
}

fn choice_marker(selected: bool, mark: Option<ChoiceMark>) -> &'static str {
    match (mark, selected) {
        (Some(ChoiceMark::Correct), _) => "✓",
        (Some(ChoiceMark::IncorrectSelected), _) => "✗",
        (_, true) => "*",
        _ => " ",
    }
}

/// Render the question screen.
///
/// # Errors
///
/// Propagates write failures from `out`.
pub fn render_question(out: &mut impl Write, vm: &QuestionVm) -> io::Result<()> {
    writeln!(
        out,
        "Question {}/{} {}   Score: {}/{}",
        vm.position,
        vm.total,
        progress_bar(vm.progress_percent),
        vm.score,
        vm.answered
    )?;
    writeln!(
        out,
        "[{}] {} | {} | {}",
        vm.difficulty, vm.stage_label, vm.topic, vm.type_label
    )?;
    writeln!(out, "Image: {}", vm.image_path)?;
    writeln!(out)?;
    writeln!(out, "{}", vm.text)?;
    for choice in &vm.choices {
        writeln!(
            out,
            "  {} {}. {}",
            choice_marker(choice.selected, choice.mark),
            choice.id,
            choice.text
        )?;
    }
    writeln!(out)?;

    match vm.next_label {
        Some(label) => writeln!(out, "Enter `next` ({label})")?,
        None if vm.can_submit => writeln!(out, "Pick choices by id, then `submit`")?,
        None => writeln!(out, "Pick choices by id")?,
    }
    Ok(())
}

/// Render the feedback panel shown after a submission.
///
/// # Errors
///
/// Propagates write failures from `out`.
pub fn render_feedback(out: &mut impl Write, vm: &FeedbackVm) -> io::Result<()> {
    writeln!(out, "{}", vm.headline)?;
    for line in &vm.lines {
        writeln!(out, "  {line}")?;
    }
    writeln!(out)
}
