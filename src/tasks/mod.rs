mod interactive_evaluator;
mod run_session;

pub use interactive_evaluator::{EvaluatorState, InteractiveEvaluator, SENTINEL};
pub use run_session::run_session;
