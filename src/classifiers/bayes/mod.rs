mod gaussian_class_observer;
mod normal_bayes;

pub use gaussian_class_observer::GaussianClassObserver;
pub use normal_bayes::{MIN_VARIANCE, NormalBayes, VAR_SMOOTHING};
