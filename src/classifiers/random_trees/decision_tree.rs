//! Binary CART tree on numeric features.

use crate::classifiers::classifier::argmax;
use crate::classifiers::random_trees::split_criteria::{GiniSplitCriterion, SplitCriterion};
use crate::core::FeatureVector;
use rand::Rng;
use std::cmp::Ordering;

/// Growth limits for a single tree.
#[derive(Debug, Clone, Copy)]
pub struct TreeLimits {
    pub max_depth: usize,
    pub min_sample_count: usize,
    pub active_features: Option<usize>,
}

#[derive(Debug, Clone)]
enum Node {
    Leaf {
        class: usize,
    },
    Split {
        feature: usize,
        threshold: f64,
        left: Box<Node>,
        right: Box<Node>,
    },
}

#[derive(Debug, Clone)]
struct SplitSuggestion {
    feature: usize,
    threshold: f64,
    merit: f64,
}

#[derive(Debug, Clone)]
pub struct DecisionTree {
    root: Node,
}

struct Grower<'a, R: Rng> {
    features: &'a [FeatureVector],
    labels: &'a [usize],
    num_classes: usize,
    dimensions: usize,
    limits: TreeLimits,
    criterion: GiniSplitCriterion,
    rng: &'a mut R,
}

impl DecisionTree {
    /// Grows a tree on `rows`, which index into `features`/`labels` and may
    /// repeat (bootstrap samples).
    pub fn grow<R: Rng>(
        features: &[FeatureVector],
        labels: &[usize],
        rows: &[usize],
        num_classes: usize,
        limits: TreeLimits,
        rng: &mut R,
    ) -> Self {
        let dimensions = features.first().map_or(0, Vec::len);
        let mut grower = Grower {
            features,
            labels,
            num_classes,
            dimensions,
            limits,
            criterion: GiniSplitCriterion::new(),
            rng,
        };
        let root = grower.build(rows.to_vec(), 0);
        Self { root }
    }

    pub fn predict(&self, features: &[f64]) -> usize {
        let mut node = &self.root;
        loop {
            match node {
                Node::Leaf { class } => return *class,
                Node::Split {
                    feature,
                    threshold,
                    left,
                    right,
                } => {
                    node = if features[*feature] <= *threshold {
                        left
                    } else {
                        right
                    };
                }
            }
        }
    }

    pub fn depth(&self) -> usize {
        fn depth_of(node: &Node) -> usize {
            match node {
                Node::Leaf { .. } => 0,
                Node::Split { left, right, .. } => 1 + depth_of(left).max(depth_of(right)),
            }
        }
        depth_of(&self.root)
    }
}

impl<R: Rng> Grower<'_, R> {
    fn distribution(&self, rows: &[usize]) -> Vec<f64> {
        let mut dist = vec![0.0; self.num_classes];
        for &r in rows {
            dist[self.labels[r]] += 1.0;
        }
        dist
    }

    fn build(&mut self, rows: Vec<usize>, depth: usize) -> Node {
        let dist = self.distribution(&rows);
        let majority = argmax(&dist).unwrap_or(0);
        let is_pure = dist.iter().filter(|&&c| c > 0.0).count() <= 1;

        if is_pure || depth >= self.limits.max_depth || rows.len() < self.limits.min_sample_count {
            return Node::Leaf { class: majority };
        }

        let Some(best) = self.best_split(&rows, &dist) else {
            return Node::Leaf { class: majority };
        };

        let (left, right): (Vec<usize>, Vec<usize>) = rows
            .into_iter()
            .partition(|&r| self.features[r][best.feature] <= best.threshold);

        Node::Split {
            feature: best.feature,
            threshold: best.threshold,
            left: Box::new(self.build(left, depth + 1)),
            right: Box::new(self.build(right, depth + 1)),
        }
    }

    /// Features searched at this node, in ascending order.
    fn candidate_features(&mut self) -> Vec<usize> {
        match self.limits.active_features {
            Some(m) if m < self.dimensions => {
                let mut picked = rand::seq::index::sample(&mut *self.rng, self.dimensions, m).into_vec();
                picked.sort_unstable();
                picked
            }
            _ => (0..self.dimensions).collect(),
        }
    }

    /// Best threshold over the candidate features, or `None` when no split
    /// beats leaving the node whole.
    fn best_split(&mut self, rows: &[usize], dist: &[f64]) -> Option<SplitSuggestion> {
        let total: f64 = dist.iter().sum();
        let unsplit_merit = 1.0 - self.criterion.compute_gini(dist, total);
        let mut best: Option<SplitSuggestion> = None;

        for feature in self.candidate_features() {
            let mut sorted: Vec<(f64, usize)> = rows
                .iter()
                .map(|&r| (self.features[r][feature], self.labels[r]))
                .collect();
            sorted.sort_by(|a, b| a.0.partial_cmp(&b.0).unwrap_or(Ordering::Equal));

            let mut left = vec![0.0; self.num_classes];
            let mut right = dist.to_vec();
            for pair in sorted.windows(2) {
                let ((value, label), (next, _)) = (pair[0], pair[1]);
                left[label] += 1.0;
                right[label] -= 1.0;
                if next <= value {
                    continue;
                }
                let merit = self
                    .criterion
                    .merit_of_split(dist, &[left.clone(), right.clone()]);
                if merit > unsplit_merit && best.as_ref().is_none_or(|b| merit > b.merit) {
                    best = Some(SplitSuggestion {
                        feature,
                        threshold: value + (next - value) / 2.0,
                        merit,
                    });
                }
            }
        }
        best
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::SeedableRng;
    use rand::rngs::StdRng;

    const ALL: TreeLimits = TreeLimits {
        max_depth: 8,
        min_sample_count: 1,
        active_features: None,
    };

    fn grow(x: &[Vec<f64>], y: &[usize], limits: TreeLimits) -> DecisionTree {
        let rows: Vec<usize> = (0..x.len()).collect();
        let classes = y.iter().max().unwrap() + 1;
        let mut rng = StdRng::seed_from_u64(7);
        DecisionTree::grow(x, y, &rows, classes, limits, &mut rng)
    }

    #[test]
    fn separates_on_the_informative_feature() {
        let x = vec![
            vec![9.0, 0.1],
            vec![1.0, 0.2],
            vec![5.0, 0.3],
            vec![3.0, 0.8],
            vec![7.0, 0.9],
        ];
        let y = vec![0, 0, 0, 1, 1];
        let tree = grow(&x, &y, ALL);
        for (row, &label) in x.iter().zip(&y) {
            assert_eq!(tree.predict(row), label);
        }
        assert_eq!(tree.depth(), 1);
        assert_eq!(tree.predict(&[0.0, 0.7]), 1);
    }

    #[test]
    fn depth_limit_is_respected() {
        let x: Vec<Vec<f64>> = (0..8).map(|i| vec![i as f64]).collect();
        let y = vec![0, 1, 0, 1, 0, 1, 0, 1];
        let tree = grow(
            &x,
            &y,
            TreeLimits {
                max_depth: 2,
                ..ALL
            },
        );
        assert!(tree.depth() <= 2);
    }

    #[test]
    fn pure_or_constant_input_is_a_leaf() {
        let pure = grow(&[vec![1.0], vec![2.0]], &[1, 1], ALL);
        assert_eq!(pure.depth(), 0);
        assert_eq!(pure.predict(&[10.0]), 1);

        let constant = grow(&[vec![1.0], vec![1.0], vec![1.0]], &[0, 1, 1], ALL);
        assert_eq!(constant.depth(), 0);
        assert_eq!(constant.predict(&[1.0]), 1);
    }

    #[test]
    fn min_sample_count_stops_splitting() {
        let x = vec![vec![0.0], vec![1.0], vec![2.0]];
        let y = vec![0, 1, 1];
        let tree = grow(
            &x,
            &y,
            TreeLimits {
                min_sample_count: 4,
                ..ALL
            },
        );
        assert_eq!(tree.depth(), 0);
    }

    #[test]
    fn random_feature_subsets_still_fit() {
        // Every feature separates the classes, whichever one is drawn.
        let x: Vec<Vec<f64>> = (0..12)
            .map(|i| vec![i as f64, 2.0 * i as f64, 12.0 - i as f64])
            .collect();
        let y: Vec<usize> = (0..12).map(|i| usize::from(i >= 6)).collect();
        let tree = grow(
            &x,
            &y,
            TreeLimits {
                active_features: Some(1),
                ..ALL
            },
        );
        for (row, &label) in x.iter().zip(&y) {
            assert_eq!(tree.predict(row), label);
        }
        assert_eq!(tree.depth(), 1);
    }
}
