use crate::config::ConfigError;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum EvaluationError {
    #[error("no query was scored, so accuracy is undefined")]
    NoSamplesScored,

    #[error(transparent)]
    Config(#[from] ConfigError),

    #[error(transparent)]
    Io(#[from] std::io::Error),

    #[error(transparent)]
    Json(#[from] serde_json::Error),
}
