use image::DynamicImage;
use std::path::{Path, PathBuf};
use thiserror::Error;

#[derive(Debug, Error, Clone, PartialEq)]
#[error("cannot load image `{}`: {reason}", .path.display())]
pub struct ImageLoadError {
    pub path: PathBuf,
    pub reason: String,
}

/// Source of decoded images, addressed by path.
pub trait ImageLoader {
    fn load(&self, path: &Path) -> Result<DynamicImage, ImageLoadError>;
}

/// Decodes images from the filesystem; the format follows the extension.
#[derive(Debug, Default, Clone, Copy)]
pub struct FileImageLoader;

impl ImageLoader for FileImageLoader {
    fn load(&self, path: &Path) -> Result<DynamicImage, ImageLoadError> {
        image::open(path).map_err(|e| ImageLoadError {
            path: path.to_path_buf(),
            reason: e.to_string(),
        })
    }
}
