use std::io::{self, Write};

use crate::vm::{ResultsVm, ReviewItemVm};

/// Render the results screen: score, counts, tier message and per-difficulty rows.
///
/// # Errors
///
/// Propagates write failures from `out`.
pub fn render_results(out: &mut impl Write, vm: &ResultsVm) -> io::Result<()> {
    writeln!(out, "Score: {}%", vm.percentage)?;
    writeln!(out, "{}", vm.message)?;
    writeln!(
        out,
        "Correct: {}  Incorrect: {}  Total: {}",
        vm.correct, vm.incorrect, vm.total
    )?;
    if !vm.breakdown.is_empty() {
        writeln!(out)?;
        writeln!(out, "Performance by difficulty")?;
        for row in &vm.breakdown {
            writeln!(
                out,
                "  {:<13}{}/{} ({}%)",
                row.label, row.correct, row.total, row.percent
            )?;
        }
    }
    writeln!(out)
}

/// Render the full review list.
///
/// # Errors
///
/// Propagates write failures from `out`.
pub fn render_review(out: &mut impl Write, items: &[ReviewItemVm]) -> io::Result<()> {
    for item in items {
        writeln!(out, "{}. {} [{}]", item.number, item.question, item.status)?;
        writeln!(out, "   Image: {}", item.image_path)?;
        if let Some(answer) = &item.your_answer {
            writeln!(out, "   Your Answer:")?;
            for line in answer {
                writeln!(out, "     {line}")?;
            }
        }
        writeln!(out, "   Correct Answer:")?;
        for line in &item.correct_answer {
            writeln!(out, "     {line}")?;
        }
        writeln!(out, "   Explanation:")?;
        for line in &item.explanation {
            writeln!(out, "     {line}")?;
        }
        writeln!(out)?;
    }
    Ok(())
}
