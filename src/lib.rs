pub mod classifiers;
pub mod config;
pub mod core;
pub mod dataset;
mod error;
pub mod evaluation;
pub mod features;
pub mod silhouette;
pub mod tasks;

pub use error::Error;

#[cfg(any(test, feature = "test-support"))]
pub mod testing;
