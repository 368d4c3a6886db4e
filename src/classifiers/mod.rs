pub mod bayes;
pub mod classifier;
mod ensemble;
mod error;
pub mod knn;
pub mod random_trees;
mod training_set;

pub use classifier::{Classifier, ClassifierKind, argmax};
pub use ensemble::{ClassifierEnsemble, EnsembleParams};
pub use error::{PredictionError, TrainingError};
pub use training_set::TrainingSet;
