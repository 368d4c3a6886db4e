use crate::classifiers::classifier::{argmax, check_query};
use crate::classifiers::random_trees::decision_tree::{DecisionTree, TreeLimits};
use crate::classifiers::random_trees::params::{EPSILON_TREE_LIMIT, RandomTreesParams};
use crate::classifiers::{Classifier, ClassifierKind, PredictionError, TrainingError, TrainingSet};
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use tracing::{debug, info};

/// Bagged CART trees with a majority vote.
///
/// Each tree is grown on a bootstrap sample of the training rows. Rows left
/// out of a tree's sample vote on that tree, which gives the out-of-bag
/// error watched by the `Epsilon` stopping rule.
#[derive(Debug, Clone)]
pub struct RandomTrees {
    trees: Vec<DecisionTree>,
    oob_error: Option<f64>,
    dimensions: usize,
    num_classes: usize,
}

impl RandomTrees {
    pub fn train(set: &TrainingSet<'_>, params: &RandomTreesParams) -> Result<Self, TrainingError> {
        params.validate()?;

        let n = set.len();
        let num_classes = set.num_classes();
        let limits = TreeLimits {
            max_depth: params.max_depth,
            min_sample_count: params.min_sample_count,
            active_features: params.active_features,
        };
        let mut rng = StdRng::seed_from_u64(params.seed);
        let mut oob_votes = vec![vec![0usize; num_classes]; n];
        let mut trees = Vec::new();
        let mut oob_error = None;

        loop {
            if params.criteria.counts_trees() && trees.len() >= params.max_trees {
                break;
            }
            if trees.len() >= EPSILON_TREE_LIMIT {
                break;
            }

            let sample: Vec<usize> = (0..n).map(|_| rng.random_range(0..n)).collect();
            let mut in_bag = vec![false; n];
            for &r in &sample {
                in_bag[r] = true;
            }

            let tree = DecisionTree::grow(
                set.features(),
                set.labels(),
                &sample,
                num_classes,
                limits,
                &mut rng,
            );
            for (row, x) in set.features().iter().enumerate() {
                if !in_bag[row] {
                    oob_votes[row][tree.predict(x)] += 1;
                }
            }
            trees.push(tree);

            oob_error = out_of_bag_error(&oob_votes, set.labels());
            debug!(trees = trees.len(), ?oob_error, "grew tree");
            if params.criteria.watches_error()
                && oob_error.is_some_and(|e| e <= params.max_error)
            {
                break;
            }
        }

        info!(
            trees = trees.len(),
            criteria = %params.criteria,
            ?oob_error,
            "trained random trees"
        );
        Ok(Self {
            trees,
            oob_error,
            dimensions: set.dimensions(),
            num_classes,
        })
    }

    pub fn tree_count(&self) -> usize {
        self.trees.len()
    }

    /// Out-of-bag error after the last tree, if any row was ever left out.
    pub fn oob_error(&self) -> Option<f64> {
        self.oob_error
    }
}

/// Share of rows, among those with at least one out-of-bag vote, whose
/// majority vote is wrong.
fn out_of_bag_error(oob_votes: &[Vec<usize>], labels: &[usize]) -> Option<f64> {
    let mut scored = 0usize;
    let mut wrong = 0usize;
    for (votes, &label) in oob_votes.iter().zip(labels) {
        if votes.iter().all(|&v| v == 0) {
            continue;
        }
        scored += 1;
        let as_f64: Vec<f64> = votes.iter().map(|&v| v as f64).collect();
        if argmax(&as_f64) != Some(label) {
            wrong += 1;
        }
    }
    (scored > 0).then(|| wrong as f64 / scored as f64)
}

impl Classifier for RandomTrees {
    fn kind(&self) -> ClassifierKind {
        ClassifierKind::Tree
    }

    fn dimensions(&self) -> usize {
        self.dimensions
    }

    fn num_classes(&self) -> usize {
        self.num_classes
    }

    /// Fraction of trees voting for each class.
    fn votes(&self, features: &[f64]) -> Result<Vec<f64>, PredictionError> {
        check_query(features, self.dimensions)?;
        let mut votes = vec![0.0; self.num_classes];
        for tree in &self.trees {
            votes[tree.predict(features)] += 1.0;
        }
        let total = self.trees.len() as f64;
        if total > 0.0 {
            for v in &mut votes {
                *v /= total;
            }
        }
        Ok(votes)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::classifiers::random_trees::TermCriteria;

    fn blobs() -> (Vec<Vec<f64>>, Vec<usize>) {
        let mut x = Vec::new();
        let mut y = Vec::new();
        for i in 0..10 {
            let jitter = (i as f64) * 0.05;
            x.push(vec![1.0 + jitter, 2.0 - jitter]);
            y.push(0);
            x.push(vec![4.0 - jitter, 5.0 + jitter]);
            y.push(1);
        }
        (x, y)
    }

    #[test]
    fn iteration_criterion_grows_exactly_max_trees() {
        let (x, y) = blobs();
        let set = TrainingSet::new(&x, &y).unwrap();
        let params = RandomTreesParams {
            criteria: TermCriteria::Iterations,
            max_trees: 7,
            ..RandomTreesParams::default()
        };
        let model = RandomTrees::train(&set, &params).unwrap();
        assert_eq!(model.tree_count(), 7);
        for (row, &label) in x.iter().zip(&y) {
            assert_eq!(model.predict(row).unwrap(), label);
        }
    }

    #[test]
    fn epsilon_criterion_stops_once_error_is_low() {
        let (x, y) = blobs();
        let set = TrainingSet::new(&x, &y).unwrap();
        let params = RandomTreesParams {
            criteria: TermCriteria::Epsilon,
            max_error: 0.0,
            ..RandomTreesParams::default()
        };
        let model = RandomTrees::train(&set, &params).unwrap();
        assert!(model.tree_count() < EPSILON_TREE_LIMIT);
        assert_eq!(model.oob_error(), Some(0.0));
    }

    #[test]
    fn both_criteria_never_exceed_max_trees() {
        let x: Vec<Vec<f64>> = (0..20).map(|i| vec![(i % 4) as f64]).collect();
        let y: Vec<usize> = (0..20).map(|i| (i / 2) % 2).collect();
        let set = TrainingSet::new(&x, &y).unwrap();
        let params = RandomTreesParams {
            criteria: TermCriteria::Both,
            max_trees: 5,
            max_error: 0.0,
            ..RandomTreesParams::default()
        };
        let model = RandomTrees::train(&set, &params).unwrap();
        assert!(model.tree_count() <= 5);
    }

    #[test]
    fn same_seed_same_forest() {
        let (x, y) = blobs();
        let set = TrainingSet::new(&x, &y).unwrap();
        let params = RandomTreesParams {
            seed: 42,
            active_features: Some(1),
            ..RandomTreesParams::default()
        };
        let a = RandomTrees::train(&set, &params).unwrap();
        let b = RandomTrees::train(&set, &params).unwrap();
        assert_eq!(a.tree_count(), b.tree_count());
        for q in [[0.0, 0.0], [2.5, 3.5], [5.0, 6.0]] {
            assert_eq!(a.votes(&q).unwrap(), b.votes(&q).unwrap());
        }
    }

    #[test]
    fn invalid_params_fail_training() {
        let (x, y) = blobs();
        let set = TrainingSet::new(&x, &y).unwrap();
        let params = RandomTreesParams {
            max_depth: 0,
            ..RandomTreesParams::default()
        };
        assert!(matches!(
            RandomTrees::train(&set, &params),
            Err(TrainingError::Config(_))
        ));
    }

    #[test]
    fn votes_are_fractions_of_trees() {
        let (x, y) = blobs();
        let set = TrainingSet::new(&x, &y).unwrap();
        let model = RandomTrees::train(&set, &RandomTreesParams::default()).unwrap();
        let votes = model.votes(&[1.0, 2.0]).unwrap();
        assert!((votes.iter().sum::<f64>() - 1.0).abs() < 1e-12);
        assert_eq!(model.kind(), ClassifierKind::Tree);
    }
}
