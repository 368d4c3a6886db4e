use crate::config::ConfigError;
use serde::{Deserialize, Serialize};
use strum_macros::{Display, EnumIter, EnumString, IntoStaticStr};

pub const DEFAULT_MAX_DEPTH: usize = 4;
pub const DEFAULT_MAX_TREES: usize = 10;
pub const DEFAULT_MAX_ERROR: f64 = 0.1;
pub const DEFAULT_MIN_SAMPLE_COUNT: usize = 2;
/// Upper bound on forest size when only the error target can stop growth.
pub const EPSILON_TREE_LIMIT: usize = 500;

/// When the forest stops adding trees.
#[derive(
    Debug,
    Clone,
    Copy,
    PartialEq,
    Eq,
    Default,
    Serialize,
    Deserialize,
    EnumString,
    Display,
    EnumIter,
    IntoStaticStr,
)]
#[serde(rename_all = "kebab-case")]
#[strum(ascii_case_insensitive)]
pub enum TermCriteria {
    /// After `max_trees` trees.
    #[serde(alias = "iteration", alias = "0")]
    #[strum(to_string = "iterations", serialize = "iteration", serialize = "0")]
    Iterations,
    /// Once the out-of-bag error reaches `max_error`.
    #[serde(alias = "1")]
    #[strum(to_string = "epsilon", serialize = "1")]
    Epsilon,
    /// Whichever of the two comes first.
    #[default]
    #[serde(alias = "2")]
    #[strum(to_string = "both", serialize = "2")]
    Both,
}

impl TermCriteria {
    #[inline]
    pub fn counts_trees(self) -> bool {
        matches!(self, TermCriteria::Iterations | TermCriteria::Both)
    }

    #[inline]
    pub fn watches_error(self) -> bool {
        matches!(self, TermCriteria::Epsilon | TermCriteria::Both)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct RandomTreesParams {
    pub max_depth: usize,
    pub max_trees: usize,
    pub criteria: TermCriteria,
    pub max_error: f64,
    /// Nodes with fewer rows become leaves.
    pub min_sample_count: usize,
    /// Features drawn at each node; `None` searches all of them.
    pub active_features: Option<usize>,
    pub seed: u64,
}

impl Default for RandomTreesParams {
    fn default() -> Self {
        Self {
            max_depth: DEFAULT_MAX_DEPTH,
            max_trees: DEFAULT_MAX_TREES,
            criteria: TermCriteria::default(),
            max_error: DEFAULT_MAX_ERROR,
            min_sample_count: DEFAULT_MIN_SAMPLE_COUNT,
            active_features: None,
            seed: 0,
        }
    }
}

impl RandomTreesParams {
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.max_depth == 0 {
            return Err(ConfigError::invalid("maxdepth", self.max_depth, "must be at least 1"));
        }
        if self.criteria.counts_trees() && self.max_trees == 0 {
            return Err(ConfigError::invalid("maxtrees", self.max_trees, "must be at least 1"));
        }
        if self.criteria.watches_error() && !(0.0..=1.0).contains(&self.max_error) {
            return Err(ConfigError::invalid(
                "maxerror",
                self.max_error,
                "must be a fraction between 0 and 1",
            ));
        }
        if self.min_sample_count == 0 {
            return Err(ConfigError::invalid(
                "min_sample_count",
                self.min_sample_count,
                "must be at least 1",
            ));
        }
        if self.active_features == Some(0) {
            return Err(ConfigError::invalid("active_features", 0, "must be at least 1"));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::str::FromStr;

    #[test]
    fn criteria_accept_names_and_codes() {
        assert_eq!(TermCriteria::from_str("0").unwrap(), TermCriteria::Iterations);
        assert_eq!(TermCriteria::from_str("iteration").unwrap(), TermCriteria::Iterations);
        assert_eq!(TermCriteria::from_str("1").unwrap(), TermCriteria::Epsilon);
        assert_eq!(TermCriteria::from_str("Both").unwrap(), TermCriteria::Both);
        assert!(TermCriteria::from_str("3").is_err());
        assert_eq!(TermCriteria::default(), TermCriteria::Both);
    }

    #[test]
    fn defaults_are_valid() {
        assert!(RandomTreesParams::default().validate().is_ok());
    }

    #[test]
    fn rejects_degenerate_settings() {
        let base = RandomTreesParams::default();
        assert!(RandomTreesParams { max_depth: 0, ..base }.validate().is_err());
        assert!(RandomTreesParams { max_trees: 0, ..base }.validate().is_err());
        assert!(RandomTreesParams { max_error: 1.5, ..base }.validate().is_err());
        assert!(RandomTreesParams { max_error: f64::NAN, ..base }.validate().is_err());
        assert!(
            RandomTreesParams { active_features: Some(0), ..base }
                .validate()
                .is_err()
        );
        // Tree count is irrelevant when only the error target stops growth.
        assert!(
            RandomTreesParams {
                max_trees: 0,
                criteria: TermCriteria::Epsilon,
                ..base
            }
            .validate()
            .is_ok()
        );
    }
}
