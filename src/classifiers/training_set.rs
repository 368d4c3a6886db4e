use crate::classifiers::TrainingError;
use crate::core::FeatureVector;

/// Validated, borrowed view of feature rows and their class ids.
///
/// Every row has the same length, every value is finite, and every label is
/// below [`num_classes`](Self::num_classes).
#[derive(Debug, Clone, Copy)]
pub struct TrainingSet<'a> {
    features: &'a [FeatureVector],
    labels: &'a [usize],
    dimensions: usize,
    num_classes: usize,
}

impl<'a> TrainingSet<'a> {
    /// The class count is taken as one more than the largest label.
    pub fn new(features: &'a [FeatureVector], labels: &'a [usize]) -> Result<Self, TrainingError> {
        let num_classes = labels.iter().max().map_or(0, |&m| m + 1);
        Self::with_classes(features, labels, num_classes)
    }

    pub fn with_classes(
        features: &'a [FeatureVector],
        labels: &'a [usize],
        num_classes: usize,
    ) -> Result<Self, TrainingError> {
        if features.is_empty() {
            return Err(TrainingError::Empty);
        }
        if features.len() != labels.len() {
            return Err(TrainingError::LengthMismatch {
                features: features.len(),
                labels: labels.len(),
            });
        }

        let dimensions = features[0].len();
        if dimensions == 0 {
            return Err(TrainingError::ZeroDimensions);
        }
        for (row, (x, &y)) in features.iter().zip(labels).enumerate() {
            if x.len() != dimensions {
                return Err(TrainingError::RaggedRow {
                    row,
                    expected: dimensions,
                    found: x.len(),
                });
            }
            if let Some(index) = x.iter().position(|v| !v.is_finite()) {
                return Err(TrainingError::NonFinite { row, index });
            }
            if y >= num_classes {
                return Err(TrainingError::LabelOutOfRange {
                    row,
                    label: y,
                    classes: num_classes,
                });
            }
        }

        Ok(Self {
            features,
            labels,
            dimensions,
            num_classes,
        })
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.features.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.features.is_empty()
    }

    #[inline]
    pub fn dimensions(&self) -> usize {
        self.dimensions
    }

    #[inline]
    pub fn num_classes(&self) -> usize {
        self.num_classes
    }

    pub fn features(&self) -> &'a [FeatureVector] {
        self.features
    }

    pub fn labels(&self) -> &'a [usize] {
        self.labels
    }

    pub fn rows(&self) -> impl Iterator<Item = (&'a [f64], usize)> + 'a {
        self.features
            .iter()
            .map(Vec::as_slice)
            .zip(self.labels.iter().copied())
    }

    /// Number of rows carrying each class id.
    pub fn class_counts(&self) -> Vec<usize> {
        let mut counts = vec![0usize; self.num_classes];
        for &y in self.labels {
            counts[y] += 1;
        }
        counts
    }
}
