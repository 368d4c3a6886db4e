mod accuracy_evaluator;
mod performance_evaluator;

pub use accuracy_evaluator::AccuracyEvaluator;
pub use performance_evaluator::PerformanceEvaluator;
