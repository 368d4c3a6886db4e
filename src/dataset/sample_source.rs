use crate::dataset::DatasetError;
use image::DynamicImage;

/// One labelled subject image with its background.
#[derive(Debug, Clone)]
pub struct LabeledSample {
    pub label: String,
    pub subject: DynamicImage,
    pub background: DynamicImage,
    /// Overrides the configured threshold for this sample only.
    pub threshold: Option<f64>,
    /// Where the sample came from, for logs and errors.
    pub origin: String,
}

/// Pull-based supplier of labelled samples.
///
/// A failing sample is reported as [`DatasetError::Sample`] so the caller
/// can decide whether to skip it; any other error ends the pull.
pub trait SampleSource {
    /// `false` once exhausted; [`next_sample`](Self::next_sample) then returns `None`.
    fn has_more_samples(&self) -> bool;

    fn next_sample(&mut self) -> Option<Result<LabeledSample, DatasetError>>;

    /// Rewinds to the first sample.
    fn restart(&mut self) -> Result<(), DatasetError>;
}

/// Serves samples held in memory, in insertion order.
#[derive(Debug, Clone, Default)]
pub struct InMemorySource {
    samples: Vec<LabeledSample>,
    idx: usize,
}

impl InMemorySource {
    pub fn new(samples: Vec<LabeledSample>) -> Self {
        Self { samples, idx: 0 }
    }

    pub fn push(&mut self, sample: LabeledSample) {
        self.samples.push(sample);
    }
}

impl SampleSource for InMemorySource {
    fn has_more_samples(&self) -> bool {
        self.idx < self.samples.len()
    }

    fn next_sample(&mut self) -> Option<Result<LabeledSample, DatasetError>> {
        let sample = self.samples.get(self.idx)?.clone();
        self.idx += 1;
        Some(Ok(sample))
    }

    fn restart(&mut self) -> Result<(), DatasetError> {
        self.idx = 0;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use image::GrayImage;

    fn sample(label: &str) -> LabeledSample {
        let img = DynamicImage::ImageLuma8(GrayImage::new(2, 2));
        LabeledSample {
            label: label.into(),
            subject: img.clone(),
            background: img,
            threshold: None,
            origin: label.into(),
        }
    }

    #[test]
    fn yields_in_order_and_restarts() {
        let mut src = InMemorySource::new(vec![sample("a"), sample("b")]);
        let labels: Vec<String> = std::iter::from_fn(|| src.next_sample())
            .map(|s| s.unwrap().label)
            .collect();
        assert_eq!(labels, vec!["a", "b"]);
        assert!(!src.has_more_samples());
        assert!(src.next_sample().is_none());

        src.restart().unwrap();
        assert!(src.has_more_samples());
        assert_eq!(src.next_sample().unwrap().unwrap().label, "a");
    }
}
