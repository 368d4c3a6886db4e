use crate::classifiers::bayes::NormalBayes;
use crate::classifiers::knn::{KnnParams, NearestNeighbor};
use crate::classifiers::random_trees::{RandomTrees, RandomTreesParams};
use crate::classifiers::{Classifier, ClassifierKind, PredictionError, TrainingError, TrainingSet};
use crate::dataset::Dataset;
use serde::{Deserialize, Serialize};
use tracing::info;

#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct EnsembleParams {
    pub knn: KnnParams,
    pub trees: RandomTreesParams,
}

/// The three trained models, always reported as Bayes, KNN, Tree.
#[derive(Debug, Clone)]
pub struct ClassifierEnsemble {
    bayes: NormalBayes,
    knn: NearestNeighbor,
    trees: RandomTrees,
}

impl ClassifierEnsemble {
    pub fn train(dataset: &Dataset, params: &EnsembleParams) -> Result<Self, TrainingError> {
        Self::train_on(&dataset.training_set()?, params)
    }

    pub fn train_on(set: &TrainingSet<'_>, params: &EnsembleParams) -> Result<Self, TrainingError> {
        info!(
            rows = set.len(),
            classes = set.num_classes(),
            dimensions = set.dimensions(),
            "training classifiers"
        );

        let bayes = NormalBayes::train(set)?;
        info!(model = %ClassifierKind::Bayes, "trained");
        let knn = NearestNeighbor::train(set, params.knn)?;
        info!(model = %ClassifierKind::Knn, k = knn.k(), "trained");
        let trees = RandomTrees::train(set, &params.trees)?;
        info!(model = %ClassifierKind::Tree, trees = trees.tree_count(), "trained");

        Ok(Self { bayes, knn, trees })
    }

    pub fn models(&self) -> [&dyn Classifier; 3] {
        [&self.bayes, &self.knn, &self.trees]
    }

    pub fn bayes(&self) -> &NormalBayes {
        &self.bayes
    }

    pub fn knn(&self) -> &NearestNeighbor {
        &self.knn
    }

    pub fn trees(&self) -> &RandomTrees {
        &self.trees
    }

    /// Every model's answer for one query, in report order.
    pub fn predict_all(
        &self,
        features: &[f64],
    ) -> Vec<(ClassifierKind, Result<usize, PredictionError>)> {
        self.models()
            .into_iter()
            .map(|model| (model.kind(), model.predict(features)))
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::classifiers::random_trees::TermCriteria;

    #[test]
    fn trains_all_three_in_report_order() {
        let x = vec![
            vec![0.0, 0.0],
            vec![0.1, 0.2],
            vec![0.2, 0.1],
            vec![3.0, 3.0],
            vec![3.1, 2.9],
            vec![2.9, 3.2],
        ];
        let y = vec![0, 0, 0, 1, 1, 1];
        let set = TrainingSet::new(&x, &y).unwrap();
        let params = EnsembleParams {
            knn: KnnParams::new(32, 1).unwrap(),
            trees: RandomTreesParams {
                criteria: TermCriteria::Iterations,
                ..RandomTreesParams::default()
            },
        };
        let ensemble = ClassifierEnsemble::train_on(&set, &params).unwrap();

        let kinds: Vec<ClassifierKind> = ensemble.models().iter().map(|m| m.kind()).collect();
        assert_eq!(
            kinds,
            vec![ClassifierKind::Bayes, ClassifierKind::Knn, ClassifierKind::Tree]
        );

        for (row, &label) in x.iter().zip(&y) {
            for (kind, prediction) in ensemble.predict_all(row) {
                assert_eq!(prediction, Ok(label), "{kind} missed a training row");
            }
        }
    }

    #[test]
    fn prediction_errors_are_per_model() {
        let x = vec![vec![0.0], vec![1.0]];
        let y = vec![0, 1];
        let set = TrainingSet::new(&x, &y).unwrap();
        let ensemble = ClassifierEnsemble::train_on(&set, &EnsembleParams::default()).unwrap();
        let answers = ensemble.predict_all(&[0.0, 1.0]);
        assert_eq!(answers.len(), 3);
        assert!(answers.iter().all(|(_, r)| r.is_err()));
    }

    #[test]
    fn deserialized_params_keep_neighbour_bounds() {
        let mut value = serde_json::to_value(EnsembleParams::default()).unwrap();
        assert_eq!(
            serde_json::from_value::<EnsembleParams>(value.clone()).unwrap(),
            EnsembleParams::default()
        );

        value["knn"]["class_neighbors"] = 40.into();
        assert!(serde_json::from_value::<EnsembleParams>(value).is_err());
    }
}
