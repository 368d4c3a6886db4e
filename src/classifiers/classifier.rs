use crate::classifiers::PredictionError;
use serde::{Deserialize, Serialize};
use strum_macros::{Display, EnumIter, IntoStaticStr};

/// The three model families, in the order they are trained and reported.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Display, EnumIter, IntoStaticStr,
)]
pub enum ClassifierKind {
    #[strum(to_string = "Bayes")]
    Bayes,
    #[strum(to_string = "KNN")]
    Knn,
    #[strum(to_string = "Tree")]
    Tree,
}

/// A trained model. Training happens in each model's own constructor, so a
/// value of this trait is always ready to answer queries.
pub trait Classifier {
    fn kind(&self) -> ClassifierKind;

    /// Length of the feature vectors the model was trained on.
    fn dimensions(&self) -> usize;

    fn num_classes(&self) -> usize;

    /// One score per class; higher means more likely.
    fn votes(&self, features: &[f64]) -> Result<Vec<f64>, PredictionError>;

    fn predict(&self, features: &[f64]) -> Result<usize, PredictionError> {
        let votes = self.votes(features)?;
        Ok(argmax(&votes).unwrap_or(0))
    }
}

/// Index of the largest finite score. Ties go to the lowest index.
#[inline]
pub fn argmax(v: &[f64]) -> Option<usize> {
    let mut best = None;
    let mut best_value = f64::NEG_INFINITY;
    for (i, &x) in v.iter().enumerate() {
        if !x.is_finite() {
            continue;
        }
        if best.is_none() || x > best_value {
            best = Some(i);
            best_value = x;
        }
    }
    best
}

/// Rejects queries a model of `dimensions` features cannot score.
pub(crate) fn check_query(features: &[f64], dimensions: usize) -> Result<(), PredictionError> {
    if features.len() != dimensions {
        return Err(PredictionError::DimensionMismatch {
            expected: dimensions,
            found: features.len(),
        });
    }
    if let Some(index) = features.iter().position(|v| !v.is_finite()) {
        return Err(PredictionError::NonFinite { index });
    }
    Ok(())
}
