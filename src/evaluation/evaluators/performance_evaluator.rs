/// Accumulates scored predictions of one classifier.
///
/// Feed it the ground-truth class id and the predicted id of every query the
/// classifier answered.
pub trait PerformanceEvaluator {
    fn add_result(&mut self, true_class: usize, predicted_class: usize);

    /// Number of results fed so far.
    fn scored(&self) -> u64;

    /// Share of correct predictions; NaN before the first result.
    fn accuracy(&self) -> f64;
}
