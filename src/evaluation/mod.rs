mod error;
mod estimators;
mod evaluators;
mod measurement;
mod report;
mod session;

pub use error::EvaluationError;
pub use estimators::{BasicEstimator, Estimator};
pub use evaluators::{AccuracyEvaluator, PerformanceEvaluator};
pub use measurement::Measurement;
pub use report::AccuracyReport;
pub use session::SessionTally;
