use crate::core::estimators::GaussianEstimator;

/// Per-class normal estimate of one feature.
#[derive(Debug, Clone, Default)]
pub struct GaussianClassObserver {
    per_class: Vec<Option<GaussianEstimator>>,
}

impl GaussianClassObserver {
    pub fn new() -> Self {
        Self::default()
    }

    #[inline]
    fn ensure_class(&mut self, class: usize) {
        if class >= self.per_class.len() {
            self.per_class.resize_with(class + 1, || None);
        }
    }

    pub fn observe(&mut self, value: f64, class: usize, weight: f64) {
        if value.is_nan() || !weight.is_finite() || weight <= 0.0 {
            return;
        }
        self.ensure_class(class);
        self.per_class[class]
            .get_or_insert_with(GaussianEstimator::new)
            .add_observation(value, weight);
    }

    /// `None` until the class has been observed at least once.
    pub fn estimator(&self, class: usize) -> Option<&GaussianEstimator> {
        self.per_class.get(class).and_then(Option::as_ref)
    }

    /// Largest per-class variance seen by this observer.
    pub fn max_variance(&self) -> f64 {
        self.per_class
            .iter()
            .flatten()
            .map(GaussianEstimator::variance)
            .fold(0.0, f64::max)
    }
}
