mod config;
mod error;
mod extractor;

pub use config::{ColorMode, SilhouetteConfig, ThresholdMode, ThresholdType};
pub use error::ExtractionError;
pub use extractor::{SilhouetteExtractor, extract_silhouette};
