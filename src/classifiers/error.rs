use crate::config::ConfigError;
use thiserror::Error;

#[derive(Debug, Error, Clone, PartialEq)]
pub enum TrainingError {
    #[error("training set has no rows")]
    Empty,

    #[error("{features} feature rows but {labels} labels")]
    LengthMismatch { features: usize, labels: usize },

    #[error("feature rows have no components")]
    ZeroDimensions,

    #[error("row {row} has {found} features, expected {expected}")]
    RaggedRow {
        row: usize,
        expected: usize,
        found: usize,
    },

    #[error("row {row} feature {index} is not finite")]
    NonFinite { row: usize, index: usize },

    #[error("row {row} has label {label}, but only {classes} classes are known")]
    LabelOutOfRange {
        row: usize,
        label: usize,
        classes: usize,
    },

    #[error(transparent)]
    Config(#[from] ConfigError),
}

#[derive(Debug, Error, Clone, PartialEq)]
pub enum PredictionError {
    #[error("query has {found} features, model was trained on {expected}")]
    DimensionMismatch { expected: usize, found: usize },

    #[error("query feature {index} is not finite")]
    NonFinite { index: usize },
}
