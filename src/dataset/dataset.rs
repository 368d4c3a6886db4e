use crate::classifiers::{TrainingError, TrainingSet};
use crate::core::{FeatureVector, LabelEncoding};
use crate::features::FeatureMethod;
use serde::{Deserialize, Serialize};

/// A sample left out of the dataset under [`SamplePolicy::Skip`](crate::dataset::SamplePolicy::Skip).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SkippedSample {
    pub origin: String,
    pub reason: String,
}

/// Index-aligned feature rows and class ids, plus the decode table.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Dataset {
    pub(crate) features: Vec<FeatureVector>,
    pub(crate) labels: Vec<usize>,
    pub(crate) encoding: LabelEncoding,
    pub(crate) method: FeatureMethod,
    pub(crate) skipped: Vec<SkippedSample>,
}

impl Dataset {
    pub fn features(&self) -> &[FeatureVector] {
        &self.features
    }

    pub fn labels(&self) -> &[usize] {
        &self.labels
    }

    pub fn encoding(&self) -> &LabelEncoding {
        &self.encoding
    }

    pub fn method(&self) -> FeatureMethod {
        self.method
    }

    pub fn skipped(&self) -> &[SkippedSample] {
        &self.skipped
    }

    pub fn len(&self) -> usize {
        self.features.len()
    }

    pub fn is_empty(&self) -> bool {
        self.features.is_empty()
    }

    /// Training view with one class per encoded label.
    pub fn training_set(&self) -> Result<TrainingSet<'_>, TrainingError> {
        TrainingSet::with_classes(&self.features, &self.labels, self.encoding.len())
    }
}
