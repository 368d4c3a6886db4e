use crate::config::ConfigError;
use crate::dataset::ImageLoadError;
use crate::features::FeatureError;
use crate::silhouette::ExtractionError;
use std::path::PathBuf;
use thiserror::Error;

/// Why a single sample could not become a feature row.
#[derive(Debug, Error, Clone, PartialEq)]
pub enum SampleError {
    #[error(transparent)]
    Load(#[from] ImageLoadError),

    #[error(transparent)]
    Extraction(#[from] ExtractionError),

    #[error(transparent)]
    Features(#[from] FeatureError),
}

#[derive(Debug, Error)]
pub enum DatasetError {
    #[error("`{}` is not a directory", .0.display())]
    NotADirectory(PathBuf),

    #[error("subject `{}` has no background image", .subject.display())]
    MissingBackground { subject: PathBuf },

    #[error("sample `{origin}`: {source}")]
    Sample {
        origin: String,
        #[source]
        source: SampleError,
    },

    #[error("no usable samples")]
    Empty,

    #[error(transparent)]
    Config(#[from] ConfigError),

    #[error(transparent)]
    Io(#[from] std::io::Error),
}
