/// Scores candidate splits from class distributions.
pub trait SplitCriterion {
    /// Higher is better.
    fn merit_of_split(&self, pre_split_distribution: &[f64], post_split_dists: &[Vec<f64>])
    -> f64;
}
