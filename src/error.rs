use crate::classifiers::{PredictionError, TrainingError};
use crate::config::ConfigError;
use crate::dataset::DatasetError;
use crate::evaluation::EvaluationError;
use crate::features::FeatureError;
use crate::silhouette::ExtractionError;
use thiserror::Error;

/// Any failure the library can report, one variant per stage.
#[derive(Debug, Error)]
pub enum Error {
    #[error(transparent)]
    Config(#[from] ConfigError),

    #[error(transparent)]
    Extraction(#[from] ExtractionError),

    #[error(transparent)]
    Feature(#[from] FeatureError),

    #[error(transparent)]
    Dataset(#[from] DatasetError),

    #[error(transparent)]
    Training(#[from] TrainingError),

    #[error(transparent)]
    Prediction(#[from] PredictionError),

    #[error(transparent)]
    Evaluation(#[from] EvaluationError),
}

impl Error {
    /// Configuration-class failures, wherever they surface. A session that
    /// scored nothing counts as one.
    pub fn is_config(&self) -> bool {
        matches!(
            self,
            Error::Config(_)
                | Error::Dataset(DatasetError::Config(_))
                | Error::Training(TrainingError::Config(_))
                | Error::Evaluation(EvaluationError::Config(_))
                | Error::Evaluation(EvaluationError::NoSamplesScored)
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn wraps_stage_errors() {
        let e: Error = ConfigError::Missing("path").into();
        assert!(e.is_config());
        assert_eq!(e.to_string(), ConfigError::Missing("path").to_string());

        let e: Error = EvaluationError::NoSamplesScored.into();
        assert!(e.is_config());

        let e: Error = TrainingError::Empty.into();
        assert!(!e.is_config());

        let e: Error = DatasetError::Config(ConfigError::Missing("threshold")).into();
        assert!(e.is_config());

        let e: Error = FeatureError::EmptyShape.into();
        assert!(matches!(e, Error::Feature(FeatureError::EmptyShape)));
    }
}
