use crate::features::FeatureMethod;
use thiserror::Error;

#[derive(Debug, Error, Clone, PartialEq)]
pub enum FeatureError {
    #[error("mask has no foreground pixels")]
    EmptyShape,

    #[error("shape is too small to describe: {0}")]
    DegenerateShape(String),

    #[error("{method} descriptor {index} is not finite")]
    NonFinite { method: FeatureMethod, index: usize },
}
