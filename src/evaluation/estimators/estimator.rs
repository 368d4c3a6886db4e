/// Online scalar estimator (e.g., streaming mean).
///
/// Implementations accept values incrementally via [`add`](Estimator::add)
/// and expose the current estimate via [`estimation`](Estimator::estimation).
pub trait Estimator {
    /// Incorporates a new observation. NaN observations are ignored.
    fn add(&mut self, v: f64);

    /// Returns the current estimate, NaN before any observation.
    fn estimation(&self) -> f64;

    /// Number of observations incorporated so far.
    fn count(&self) -> u64;
}
