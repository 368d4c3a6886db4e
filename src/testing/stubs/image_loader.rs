use crate::dataset::{ImageLoadError, ImageLoader};
use image::DynamicImage;
use std::collections::HashMap;
use std::path::{Path, PathBuf};

/// Serves images registered under made-up paths.
#[derive(Debug, Clone, Default)]
pub struct InMemoryImageLoader {
    images: HashMap<PathBuf, DynamicImage>,
}

impl InMemoryImageLoader {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn insert(&mut self, path: impl Into<PathBuf>, image: DynamicImage) {
        self.images.insert(path.into(), image);
    }

    pub fn with_image(mut self, path: impl Into<PathBuf>, image: DynamicImage) -> Self {
        self.insert(path, image);
        self
    }
}

impl ImageLoader for InMemoryImageLoader {
    fn load(&self, path: &Path) -> Result<DynamicImage, ImageLoadError> {
        self.images.get(path).cloned().ok_or_else(|| ImageLoadError {
            path: path.to_path_buf(),
            reason: "no such image".into(),
        })
    }
}
