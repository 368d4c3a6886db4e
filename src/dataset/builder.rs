use crate::core::LabelEncoding;
use crate::dataset::{
    Dataset, DatasetError, LabeledSample, SampleError, SampleSource, SkippedSample,
};
use crate::features::FeatureMethod;
use crate::silhouette::{SilhouetteConfig, SilhouetteExtractor};
use serde::{Deserialize, Serialize};
use strum_macros::{Display, EnumString};
use tracing::{debug, info, warn};

/// What to do with a sample whose images cannot be loaded or described.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize, Display, EnumString,
)]
#[serde(rename_all = "kebab-case")]
#[strum(serialize_all = "kebab-case")]
pub enum SamplePolicy {
    /// Fail the whole build.
    #[default]
    Abort,
    /// Log it, record it in [`Dataset::skipped`], and carry on.
    Skip,
}

/// Turns labelled image pairs into a feature dataset.
#[derive(Debug, Clone, Copy)]
pub struct DatasetBuilder {
    method: FeatureMethod,
    extractor: SilhouetteExtractor,
    policy: SamplePolicy,
}

impl DatasetBuilder {
    pub fn new(method: FeatureMethod, config: SilhouetteConfig, policy: SamplePolicy) -> Self {
        Self {
            method,
            extractor: SilhouetteExtractor::new(config),
            policy,
        }
    }

    pub fn build(&self, source: &mut dyn SampleSource) -> Result<Dataset, DatasetError> {
        let mut features = Vec::new();
        let mut labels = Vec::new();
        let mut encoding = LabelEncoding::new();
        let mut skipped = Vec::new();

        while source.has_more_samples() {
            let Some(next) = source.next_sample() else {
                break;
            };
            let outcome = next.and_then(|sample| {
                self.describe(&sample)
                    .map(|row| (sample.label, row))
                    .map_err(|source| DatasetError::Sample {
                        origin: sample.origin,
                        source,
                    })
            });

            match outcome {
                Ok((label, row)) => {
                    labels.push(encoding.encode_or_insert(&label));
                    features.push(row);
                }
                Err(DatasetError::Sample { origin, source }) if self.policy == SamplePolicy::Skip => {
                    warn!(%origin, error = %source, "skipping sample");
                    skipped.push(SkippedSample {
                        origin,
                        reason: source.to_string(),
                    });
                }
                Err(e) => return Err(e),
            }
        }

        if features.is_empty() {
            return Err(DatasetError::Empty);
        }
        info!(
            rows = features.len(),
            classes = encoding.len(),
            skipped = skipped.len(),
            method = %self.method,
            "built dataset"
        );
        Ok(Dataset {
            features,
            labels,
            encoding,
            method: self.method,
            skipped,
        })
    }

    fn describe(&self, sample: &LabeledSample) -> Result<Vec<f64>, SampleError> {
        let mask = match sample.threshold {
            Some(t) => self
                .extractor
                .extract_with_threshold(&sample.subject, &sample.background, t)?,
            None => self.extractor.extract(&sample.subject, &sample.background)?,
        };
        let row = self.method.extract(&mask)?;
        debug!(origin = %sample.origin, foreground = mask.foreground_count(), "described sample");
        Ok(row)
    }
}
