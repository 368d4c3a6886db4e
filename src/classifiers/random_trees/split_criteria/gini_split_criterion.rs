use crate::classifiers::random_trees::split_criteria::SplitCriterion;

#[derive(Debug, Default, Clone, Copy)]
pub struct GiniSplitCriterion;

impl GiniSplitCriterion {
    pub fn new() -> Self {
        Self
    }

    pub fn compute_gini(&self, distribution: &[f64], distribution_sum_of_weights: f64) -> f64 {
        if distribution_sum_of_weights <= 0.0 {
            return 0.0;
        }
        let mut gini = 1.0;
        for &count in distribution {
            let rel_freq = count / distribution_sum_of_weights;
            gini -= rel_freq * rel_freq;
        }
        gini
    }
}

impl SplitCriterion for GiniSplitCriterion {
    /// `1 - sum_i (w_i / w) * gini_i` over the branches.
    fn merit_of_split(
        &self,
        _pre_split_distribution: &[f64],
        post_split_dists: &[Vec<f64>],
    ) -> f64 {
        let weights: Vec<f64> = post_split_dists.iter().map(|d| d.iter().sum()).collect();
        let total: f64 = weights.iter().sum();
        if total <= 0.0 {
            return 0.0;
        }
        let impurity: f64 = post_split_dists
            .iter()
            .zip(&weights)
            .map(|(dist, &w)| (w / total) * self.compute_gini(dist, w))
            .sum();
        1.0 - impurity
    }
}
