use crate::evaluation::{Estimator, PerformanceEvaluator};

/// Accuracy of one classifier over a session.
#[derive(Debug, Default, Clone)]
pub struct AccuracyEvaluator<E: Estimator + Default> {
    correct: E,
}

impl<E: Estimator + Default> AccuracyEvaluator<E> {
    pub fn new() -> Self {
        Self {
            correct: E::default(),
        }
    }
}

impl<E: Estimator + Default> PerformanceEvaluator for AccuracyEvaluator<E> {
    fn add_result(&mut self, true_class: usize, predicted_class: usize) {
        let hit = if true_class == predicted_class { 1.0 } else { 0.0 };
        self.correct.add(hit);
    }

    fn scored(&self) -> u64 {
        self.correct.count()
    }

    #[inline]
    fn accuracy(&self) -> f64 {
        self.correct.estimation()
    }
}
