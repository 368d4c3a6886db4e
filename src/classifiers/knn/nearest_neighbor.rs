use crate::classifiers::classifier::check_query;
use crate::classifiers::knn::KnnParams;
use crate::classifiers::{Classifier, ClassifierKind, PredictionError, TrainingError, TrainingSet};
use crate::core::FeatureVector;
use std::cmp::Ordering;
use tracing::debug;

/// Majority vote among the `k` closest training rows (Euclidean distance).
///
/// `k` is `min(class_neighbors, training rows)`. When several classes tie on
/// the vote count, the one owning the closest neighbour wins.
#[derive(Debug, Clone)]
pub struct NearestNeighbor {
    features: Vec<FeatureVector>,
    labels: Vec<usize>,
    k: usize,
    dimensions: usize,
    num_classes: usize,
}

impl NearestNeighbor {
    pub fn train(set: &TrainingSet<'_>, params: KnnParams) -> Result<Self, TrainingError> {
        let k = params.class_neighbors().min(set.len());
        debug!(rows = set.len(), k, "stored nearest-neighbour training rows");
        Ok(Self {
            features: set.features().to_vec(),
            labels: set.labels().to_vec(),
            k,
            dimensions: set.dimensions(),
            num_classes: set.num_classes(),
        })
    }

    /// Effective neighbour count.
    pub fn k(&self) -> usize {
        self.k
    }

    /// Labels of the `k` closest rows, nearest first. Equal distances keep
    /// training order.
    fn neighbors(&self, query: &[f64]) -> Vec<usize> {
        let mut ranked: Vec<(f64, usize)> = self
            .features
            .iter()
            .zip(&self.labels)
            .map(|(row, &label)| (squared_distance(row, query), label))
            .collect();
        ranked.sort_by(|a, b| a.0.partial_cmp(&b.0).unwrap_or(Ordering::Equal));
        ranked.truncate(self.k);
        ranked.into_iter().map(|(_, label)| label).collect()
    }
}

#[inline]
fn squared_distance(a: &[f64], b: &[f64]) -> f64 {
    a.iter().zip(b).map(|(x, y)| (x - y) * (x - y)).sum()
}

impl Classifier for NearestNeighbor {
    fn kind(&self) -> ClassifierKind {
        ClassifierKind::Knn
    }

    fn dimensions(&self) -> usize {
        self.dimensions
    }

    fn num_classes(&self) -> usize {
        self.num_classes
    }

    /// Neighbour counts per class.
    fn votes(&self, features: &[f64]) -> Result<Vec<f64>, PredictionError> {
        check_query(features, self.dimensions)?;
        let mut votes = vec![0.0; self.num_classes];
        for label in self.neighbors(features) {
            votes[label] += 1.0;
        }
        Ok(votes)
    }

    fn predict(&self, features: &[f64]) -> Result<usize, PredictionError> {
        check_query(features, self.dimensions)?;
        let neighbors = self.neighbors(features);
        let mut counts = vec![0usize; self.num_classes];
        for &label in &neighbors {
            counts[label] += 1;
        }
        let best = counts.iter().copied().max().unwrap_or(0);
        // Neighbours are sorted, so the first tied label met is the closest.
        Ok(neighbors
            .into_iter()
            .find(|&label| counts[label] == best)
            .unwrap_or(0))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn train(x: &[Vec<f64>], y: &[usize], k: usize) -> NearestNeighbor {
        let set = TrainingSet::new(x, y).unwrap();
        NearestNeighbor::train(&set, KnnParams::new(32, k).unwrap()).unwrap()
    }

    #[test]
    fn single_neighbor_recalls_training_rows() {
        let x = vec![vec![0.0, 0.0], vec![1.0, 1.0], vec![0.1, 0.9], vec![3.0, 0.0]];
        let y = vec![0, 1, 2, 1];
        let model = train(&x, &y, 1);
        for (row, &label) in x.iter().zip(&y) {
            assert_eq!(model.predict(row).unwrap(), label);
        }
    }

    #[test]
    fn majority_of_k_wins() {
        let x = vec![vec![0.0], vec![0.2], vec![0.3], vec![0.1]];
        let y = vec![0, 1, 1, 0];
        // Neighbours of 0.25: 0.2 (1), 0.3 (1), 0.1 (0).
        let model = train(&x, &y, 3);
        assert_eq!(model.predict(&[0.25]).unwrap(), 1);
        assert_eq!(model.votes(&[0.25]).unwrap(), vec![1.0, 2.0]);
    }

    #[test]
    fn ties_go_to_the_closest_neighbour() {
        let x = vec![vec![0.0], vec![1.0], vec![5.0], vec![5.5]];
        let y = vec![0, 0, 1, 1];
        let model = train(&x, &y, 4);
        // Two votes each; the nearest row to 4.0 is class 1.
        assert_eq!(model.predict(&[4.0]).unwrap(), 1);
        assert_eq!(model.predict(&[0.6]).unwrap(), 0);
    }

    #[test]
    fn k_is_capped_by_training_rows() {
        let x = vec![vec![0.0], vec![1.0]];
        let y = vec![0, 1];
        let model = train(&x, &y, 7);
        assert_eq!(model.k(), 2);
        assert_eq!(model.votes(&[0.0]).unwrap().iter().sum::<f64>(), 2.0);
    }

    #[test]
    fn rejects_wrong_dimensions() {
        let model = train(&[vec![0.0, 1.0]], &[0], 1);
        assert!(matches!(
            model.predict(&[0.0]),
            Err(PredictionError::DimensionMismatch { .. })
        ));
    }
}
