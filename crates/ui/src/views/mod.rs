mod question;
mod results;
mod state;

#[cfg(test)]
mod view_smoke;

pub use question::{render_feedback, render_question};
pub use results::{render_results, render_review};
pub use state::ViewError;
