use std::f64::consts::PI;

/// Weighted running estimate of a normal distribution (West/Welford update).
#[derive(Debug, Default, Clone, Copy)]
pub struct GaussianEstimator {
    weight_sum: f64,
    mean: f64,
    variance_sum: f64,
}

impl GaussianEstimator {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn add_observation(&mut self, value: f64, weight: f64) {
        if value.is_nan() || !(weight > 0.0) || !weight.is_finite() {
            return;
        }
        if self.weight_sum > 0.0 {
            self.weight_sum += weight;
            let last_mean = self.mean;
            self.mean += weight * (value - last_mean) / self.weight_sum;
            self.variance_sum += weight * (value - last_mean) * (value - self.mean);
        } else {
            self.mean = value;
            self.weight_sum = weight;
        }
    }

    #[inline]
    pub fn total_weight(&self) -> f64 {
        self.weight_sum
    }

    #[inline]
    pub fn mean(&self) -> f64 {
        self.mean
    }

    /// Population variance of the observations seen so far.
    pub fn variance(&self) -> f64 {
        if self.weight_sum > 0.0 {
            (self.variance_sum / self.weight_sum).max(0.0)
        } else {
            0.0
        }
    }

    /// Log of the normal density at `value`, using `variance` in place of the
    /// observed one.
    pub fn log_density_with_variance(&self, value: f64, variance: f64) -> f64 {
        let diff = value - self.mean;
        -0.5 * ((2.0 * PI * variance).ln() + diff * diff / variance)
    }
}
