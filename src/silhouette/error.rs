use thiserror::Error;

#[derive(Debug, Error, Clone, PartialEq)]
pub enum ExtractionError {
    #[error(
        "subject is {subject_width}x{subject_height} but background is {background_width}x{background_height}"
    )]
    DimensionMismatch {
        subject_width: u32,
        subject_height: u32,
        background_width: u32,
        background_height: u32,
    },

    #[error("threshold must be finite and non-negative, got {0}")]
    InvalidThreshold(f64),

    #[error("no foreground detected (cutoff {cutoff:.3})")]
    NoForeground { cutoff: f64 },
}
