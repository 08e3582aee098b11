mod feedback_vm;
mod question_vm;
mod results_vm;
mod review_vm;
mod session_vm;

pub use feedback_vm::FeedbackVm;
pub use question_vm::{ChoiceVm, QuestionVm};
pub use results_vm::{BreakdownRowVm, ResultsVm};
pub use review_vm::{ReviewItemVm, map_review_items};
pub use session_vm::start_session;
