//! Category-per-folder sample layout.
//!
//! ```text
//! root/
//!   circle/
//!     background.png      shared background of the folder
//!     c1.png              subject
//!     c2.png
//!     c2_bg.png           background used by c2 only
//!     c2.threshold        per-sample threshold (when enabled)
//!   square/
//!     ...
//! ```

use crate::config::ConfigError;
use crate::dataset::{
    DatasetError, FileImageLoader, ImageLoader, LabeledSample, SampleError, SampleSource,
};
use std::collections::BTreeMap;
use std::fs;
use std::path::{Path, PathBuf};
use tracing::{debug, info};

pub const IMAGE_EXTENSIONS: [&str; 6] = ["png", "jpg", "jpeg", "bmp", "pgm", "ppm"];
const BACKGROUND_STEM: &str = "background";
const BACKGROUND_SUFFIX: &str = "_bg";
const THRESHOLD_EXTENSION: &str = "threshold";

#[derive(Debug, Clone, PartialEq)]
struct SampleEntry {
    label: String,
    subject: PathBuf,
    background: PathBuf,
    threshold: Option<f64>,
}

/// Walks category folders under a root directory.
///
/// The layout is resolved when the source is opened; images are decoded as
/// samples are pulled.
pub struct DirectorySource {
    entries: Vec<SampleEntry>,
    loader: Box<dyn ImageLoader>,
    idx: usize,
}

impl DirectorySource {
    pub fn open(root: impl AsRef<Path>, per_sample_thresholds: bool) -> Result<Self, DatasetError> {
        let root = root.as_ref();
        if !root.is_dir() {
            return Err(DatasetError::NotADirectory(root.to_path_buf()));
        }

        let mut categories: Vec<PathBuf> = fs::read_dir(root)?
            .filter_map(Result::ok)
            .map(|e| e.path())
            .filter(|p| p.is_dir() && !is_hidden(p))
            .collect();
        categories.sort();

        let mut entries = Vec::new();
        for dir in &categories {
            let label = file_name(dir);
            let found = scan_category(dir, &label, per_sample_thresholds)?;
            debug!(category = %label, samples = found.len(), "scanned category");
            entries.extend(found);
        }
        info!(
            root = %root.display(),
            categories = categories.len(),
            samples = entries.len(),
            "opened sample directory"
        );

        Ok(Self {
            entries,
            loader: Box::new(FileImageLoader),
            idx: 0,
        })
    }

    /// Replaces the image decoder.
    pub fn with_loader(mut self, loader: Box<dyn ImageLoader>) -> Self {
        self.loader = loader;
        self
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    fn load(&self, entry: &SampleEntry) -> Result<LabeledSample, SampleError> {
        let subject = self.loader.load(&entry.subject)?;
        let background = self.loader.load(&entry.background)?;
        Ok(LabeledSample {
            label: entry.label.clone(),
            subject,
            background,
            threshold: entry.threshold,
            origin: entry.subject.display().to_string(),
        })
    }
}

impl SampleSource for DirectorySource {
    fn has_more_samples(&self) -> bool {
        self.idx < self.entries.len()
    }

    fn next_sample(&mut self) -> Option<Result<LabeledSample, DatasetError>> {
        let entry = self.entries.get(self.idx)?;
        self.idx += 1;
        Some(self.load(entry).map_err(|source| DatasetError::Sample {
            origin: entry.subject.display().to_string(),
            source,
        }))
    }

    fn restart(&mut self) -> Result<(), DatasetError> {
        self.idx = 0;
        Ok(())
    }
}

fn scan_category(
    dir: &Path,
    label: &str,
    per_sample_thresholds: bool,
) -> Result<Vec<SampleEntry>, DatasetError> {
    let mut shared_background = None;
    let mut own_backgrounds = BTreeMap::new();
    let mut subjects = BTreeMap::new();

    for entry in fs::read_dir(dir)? {
        let path = entry?.path();
        if !path.is_file() || is_hidden(&path) || !is_image(&path) {
            continue;
        }
        let Some(stem) = path.file_stem().map(|s| s.to_string_lossy().into_owned()) else {
            continue;
        };
        if stem == BACKGROUND_STEM {
            // Several encodings of the shared background: keep the first by name.
            if shared_background.as_ref().is_none_or(|p: &PathBuf| path < *p) {
                shared_background = Some(path);
            }
        } else if let Some(subject_stem) = stem.strip_suffix(BACKGROUND_SUFFIX) {
            own_backgrounds.insert(subject_stem.to_string(), path);
        } else {
            subjects.insert(stem, path);
        }
    }

    let mut out = Vec::with_capacity(subjects.len());
    for (stem, subject) in subjects {
        let background = own_backgrounds
            .get(&stem)
            .or(shared_background.as_ref())
            .cloned()
            .ok_or_else(|| DatasetError::MissingBackground {
                subject: subject.clone(),
            })?;
        let threshold = if per_sample_thresholds {
            Some(read_threshold(&dir.join(format!("{stem}.{THRESHOLD_EXTENSION}")))?)
        } else {
            None
        };
        out.push(SampleEntry {
            label: label.to_string(),
            subject,
            background,
            threshold,
        });
    }
    Ok(out)
}

fn read_threshold(path: &Path) -> Result<f64, ConfigError> {
    let origin = path.display().to_string();
    let text = fs::read_to_string(path).map_err(|e| ConfigError::SampleThreshold {
        origin: origin.clone(),
        reason: e.to_string(),
    })?;
    let trimmed = text.trim();
    trimmed
        .parse::<f64>()
        .ok()
        .filter(|t| t.is_finite())
        .ok_or_else(|| ConfigError::SampleThreshold {
            origin,
            reason: format!("`{trimmed}` is not a number"),
        })
}

fn is_image(path: &Path) -> bool {
    path.extension()
        .map(|e| e.to_string_lossy().to_ascii_lowercase())
        .is_some_and(|e| IMAGE_EXTENSIONS.contains(&e.as_str()))
}

fn is_hidden(path: &Path) -> bool {
    path.file_name()
        .is_some_and(|n| n.to_string_lossy().starts_with('.'))
}

fn file_name(path: &Path) -> String {
    path.file_name()
        .map(|n| n.to_string_lossy().into_owned())
        .unwrap_or_default()
}

#[cfg(test)]
mod tests {
    use super::*;
    use image::{GrayImage, Luma};
    use std::fs;

    fn write_png(path: &Path, value: u8) {
        GrayImage::from_pixel(8, 8, Luma([value])).save(path).unwrap();
    }

    fn labels_and_names(src: &mut DirectorySource) -> Vec<(String, String)> {
        std::iter::from_fn(|| src.next_sample())
            .map(|s| {
                let s = s.unwrap();
                let name = Path::new(&s.origin)
                    .file_name()
                    .unwrap()
                    .to_string_lossy()
                    .into_owned();
                (s.label, name)
            })
            .collect()
    }

    #[test]
    fn pairs_subjects_with_backgrounds() {
        let root = tempfile::tempdir().unwrap();
        let square = root.path().join("square");
        let circle = root.path().join("circle");
        fs::create_dir(&square).unwrap();
        fs::create_dir(&circle).unwrap();

        write_png(&square.join("background.png"), 10);
        write_png(&square.join("s2.png"), 200);
        write_png(&square.join("s1.png"), 200);
        write_png(&circle.join("c1.png"), 200);
        write_png(&circle.join("c1_bg.png"), 30);
        fs::write(circle.join("notes.txt"), "ignored").unwrap();

        let mut src = DirectorySource::open(root.path(), false).unwrap();
        assert_eq!(src.len(), 3);
        assert_eq!(
            labels_and_names(&mut src),
            vec![
                ("circle".to_string(), "c1.png".to_string()),
                ("square".to_string(), "s1.png".to_string()),
                ("square".to_string(), "s2.png".to_string()),
            ]
        );

        src.restart().unwrap();
        let first = src.next_sample().unwrap().unwrap();
        assert_eq!(first.background.to_luma8().get_pixel(0, 0)[0], 30);
        assert_eq!(first.threshold, None);
    }

    #[test]
    fn subject_without_background_is_an_error() {
        let root = tempfile::tempdir().unwrap();
        let dir = root.path().join("cup");
        fs::create_dir(&dir).unwrap();
        write_png(&dir.join("lonely.png"), 200);

        assert!(matches!(
            DirectorySource::open(root.path(), false),
            Err(DatasetError::MissingBackground { .. })
        ));
    }

    #[test]
    fn per_sample_thresholds_are_read_from_sidecars() {
        let root = tempfile::tempdir().unwrap();
        let dir = root.path().join("cup");
        fs::create_dir(&dir).unwrap();
        write_png(&dir.join("background.png"), 0);
        write_png(&dir.join("a.png"), 200);
        fs::write(dir.join("a.threshold"), "42.5\n").unwrap();

        let mut src = DirectorySource::open(root.path(), true).unwrap();
        assert_eq!(src.next_sample().unwrap().unwrap().threshold, Some(42.5));
    }

    #[test]
    fn missing_or_garbled_threshold_is_a_config_error() {
        let root = tempfile::tempdir().unwrap();
        let dir = root.path().join("cup");
        fs::create_dir(&dir).unwrap();
        write_png(&dir.join("background.png"), 0);
        write_png(&dir.join("a.png"), 200);

        assert!(matches!(
            DirectorySource::open(root.path(), true),
            Err(DatasetError::Config(ConfigError::SampleThreshold { .. }))
        ));

        fs::write(dir.join("a.threshold"), "high").unwrap();
        assert!(matches!(
            DirectorySource::open(root.path(), true),
            Err(DatasetError::Config(ConfigError::SampleThreshold { .. }))
        ));
    }

    #[test]
    fn unreadable_image_is_a_sample_error() {
        let root = tempfile::tempdir().unwrap();
        let dir = root.path().join("cup");
        fs::create_dir(&dir).unwrap();
        write_png(&dir.join("background.png"), 0);
        fs::write(dir.join("broken.png"), b"not a png").unwrap();

        let mut src = DirectorySource::open(root.path(), false).unwrap();
        assert!(matches!(
            src.next_sample(),
            Some(Err(DatasetError::Sample {
                source: SampleError::Load(_),
                ..
            }))
        ));
        assert!(src.next_sample().is_none());
    }

    #[test]
    fn root_must_be_a_directory() {
        let root = tempfile::tempdir().unwrap();
        let file = root.path().join("file.png");
        write_png(&file, 0);
        assert!(matches!(
            DirectorySource::open(&file, false),
            Err(DatasetError::NotADirectory(_))
        ));
    }
}
