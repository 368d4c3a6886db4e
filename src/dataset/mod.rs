mod builder;
mod dataset;
mod directory_source;
mod error;
mod image_loader;
mod sample_source;

pub use builder::{DatasetBuilder, SamplePolicy};
pub use dataset::{Dataset, SkippedSample};
pub use directory_source::{DirectorySource, IMAGE_EXTENSIONS};
pub use error::{DatasetError, SampleError};
pub use image_loader::{FileImageLoader, ImageLoadError, ImageLoader};
pub use sample_source::{InMemorySource, LabeledSample, SampleSource};
