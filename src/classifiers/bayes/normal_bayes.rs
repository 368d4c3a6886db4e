use crate::classifiers::bayes::GaussianClassObserver;
use crate::classifiers::classifier::check_query;
use crate::classifiers::{Classifier, ClassifierKind, PredictionError, TrainingError, TrainingSet};
use tracing::debug;

/// Absolute floor added to every variance so constant features stay usable.
pub const MIN_VARIANCE: f64 = 1e-9;
/// Fraction of the largest feature variance added to every variance.
pub const VAR_SMOOTHING: f64 = 1e-9;

/// Gaussian class-conditional model with independent features.
///
/// The score of class `c` is `ln P(c) + sum_j ln N(x_j; mean_cj, var_cj)`.
/// Classes absent from the training rows score negative infinity.
#[derive(Debug, Clone)]
pub struct NormalBayes {
    log_priors: Vec<f64>,
    observers: Vec<GaussianClassObserver>,
    variance_offset: f64,
    dimensions: usize,
}

impl NormalBayes {
    pub fn train(set: &TrainingSet<'_>) -> Result<Self, TrainingError> {
        let dimensions = set.dimensions();
        let mut observers = vec![GaussianClassObserver::new(); dimensions];
        for (x, y) in set.rows() {
            for (observer, &value) in observers.iter_mut().zip(x) {
                observer.observe(value, y, 1.0);
            }
        }

        let total = set.len() as f64;
        let log_priors = set
            .class_counts()
            .into_iter()
            .map(|count| {
                if count == 0 {
                    f64::NEG_INFINITY
                } else {
                    (count as f64 / total).ln()
                }
            })
            .collect();

        let max_variance = observers
            .iter()
            .map(GaussianClassObserver::max_variance)
            .fold(0.0, f64::max);
        let variance_offset = VAR_SMOOTHING * max_variance + MIN_VARIANCE;
        debug!(
            classes = set.num_classes(),
            dimensions, variance_offset, "trained normal Bayes"
        );

        Ok(Self {
            log_priors,
            observers,
            variance_offset,
            dimensions,
        })
    }
}

impl Classifier for NormalBayes {
    fn kind(&self) -> ClassifierKind {
        ClassifierKind::Bayes
    }

    fn dimensions(&self) -> usize {
        self.dimensions
    }

    fn num_classes(&self) -> usize {
        self.log_priors.len()
    }

    fn votes(&self, features: &[f64]) -> Result<Vec<f64>, PredictionError> {
        check_query(features, self.dimensions)?;
        let votes = self
            .log_priors
            .iter()
            .enumerate()
            .map(|(class, &log_prior)| {
                if !log_prior.is_finite() {
                    return f64::NEG_INFINITY;
                }
                let mut score = log_prior;
                for (observer, &value) in self.observers.iter().zip(features) {
                    let Some(est) = observer.estimator(class) else {
                        return f64::NEG_INFINITY;
                    };
                    let variance = est.variance() + self.variance_offset;
                    score += est.log_density_with_variance(value, variance);
                }
                score
            })
            .collect();
        Ok(votes)
    }
}
