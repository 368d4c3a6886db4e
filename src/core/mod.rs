pub mod estimators;
pub mod labels;
mod mask;

pub use labels::LabelEncoding;
pub use mask::BinaryMask;

/// Fixed-length shape descriptor; the length is set by the extraction method.
pub type FeatureVector = Vec<f64>;
