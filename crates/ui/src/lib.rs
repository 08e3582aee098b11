pub mod views;
pub mod vm;

pub use views::{ViewError, render_feedback, render_question, render_results, render_review};
