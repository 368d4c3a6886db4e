use crate::core::BinaryMask;
use crate::silhouette::{ColorMode, ExtractionError, SilhouetteConfig, ThresholdMode, ThresholdType};
use image::{DynamicImage, GenericImageView, RgbImage};
use tracing::debug;

/// Separates a subject from a known background by thresholding their
/// per-pixel difference.
#[derive(Debug, Clone, Copy)]
pub struct SilhouetteExtractor {
    config: SilhouetteConfig,
}

impl SilhouetteExtractor {
    pub fn new(config: SilhouetteConfig) -> Self {
        Self { config }
    }

    pub fn extract(
        &self,
        subject: &DynamicImage,
        background: &DynamicImage,
    ) -> Result<BinaryMask, ExtractionError> {
        extract_silhouette(subject, background, &self.config)
    }

    /// Like [`extract`](Self::extract) but with a threshold supplied for this
    /// pair only.
    pub fn extract_with_threshold(
        &self,
        subject: &DynamicImage,
        background: &DynamicImage,
        threshold: f64,
    ) -> Result<BinaryMask, ExtractionError> {
        extract_silhouette(subject, background, &self.config.with_threshold(threshold))
    }
}

pub fn extract_silhouette(
    subject: &DynamicImage,
    background: &DynamicImage,
    config: &SilhouetteConfig,
) -> Result<BinaryMask, ExtractionError> {
    if !config.threshold.is_finite() || config.threshold < 0.0 {
        return Err(ExtractionError::InvalidThreshold(config.threshold));
    }

    let (width, height) = subject.dimensions();
    let (bg_width, bg_height) = background.dimensions();
    if (width, height) != (bg_width, bg_height) {
        return Err(ExtractionError::DimensionMismatch {
            subject_width: width,
            subject_height: height,
            background_width: bg_width,
            background_height: bg_height,
        });
    }

    let diff = difference_map(&subject.to_rgb8(), &background.to_rgb8(), config.color_mode);
    let cutoff = match config.threshold_mode {
        ThresholdMode::Fixed => config.threshold,
        ThresholdMode::Auto(statistic) => summarize(&diff, statistic) * config.threshold,
    };

    let mut mask = BinaryMask::new(width, height);
    for (i, &d) in diff.iter().enumerate() {
        if d > cutoff {
            mask.set(i as u32 % width, i as u32 / width, true);
        }
    }

    let foreground = mask.foreground_count();
    debug!(
        width,
        height,
        cutoff,
        foreground,
        "extracted silhouette"
    );

    if foreground == 0 {
        return Err(ExtractionError::NoForeground { cutoff });
    }
    Ok(mask)
}

/// Row-major absolute difference on the 0..=255 scale.
fn difference_map(subject: &RgbImage, background: &RgbImage, mode: ColorMode) -> Vec<f64> {
    subject
        .pixels()
        .zip(background.pixels())
        .map(|(s, b)| match mode {
            ColorMode::Color => s
                .0
                .iter()
                .zip(b.0.iter())
                .map(|(&a, &c)| (a as f64 - c as f64).abs())
                .fold(0.0, f64::max),
            ColorMode::Gray => (luma(s.0) - luma(b.0)).abs(),
        })
        .collect()
}

#[inline]
fn luma([r, g, b]: [u8; 3]) -> f64 {
    0.299 * r as f64 + 0.587 * g as f64 + 0.114 * b as f64
}

fn summarize(values: &[f64], statistic: ThresholdType) -> f64 {
    if values.is_empty() {
        return 0.0;
    }
    match statistic {
        ThresholdType::Mean => values.iter().sum::<f64>() / values.len() as f64,
        ThresholdType::Median => {
            let mut sorted = values.to_vec();
            sorted.sort_unstable_by(f64::total_cmp);
            let mid = sorted.len() / 2;
            if sorted.len() % 2 == 0 {
                (sorted[mid - 1] + sorted[mid]) / 2.0
            } else {
                sorted[mid]
            }
        }
    }
}
