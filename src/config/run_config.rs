use crate::classifiers::EnsembleParams;
use crate::classifiers::knn::{DEFAULT_CLASS_NEIGHBORS, DEFAULT_MAX_NEIGHBORS, KnnParams};
use crate::classifiers::random_trees::{
    DEFAULT_MAX_DEPTH, DEFAULT_MAX_ERROR, DEFAULT_MAX_TREES, DEFAULT_MIN_SAMPLE_COUNT,
    RandomTreesParams, TermCriteria,
};
use crate::config::ConfigError;
use crate::dataset::SamplePolicy;
use crate::features::FeatureMethod;
use crate::silhouette::{ColorMode, SilhouetteConfig, ThresholdMode, ThresholdType};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

fn default_nmax() -> usize {
    DEFAULT_MAX_NEIGHBORS
}

fn default_nclass() -> usize {
    DEFAULT_CLASS_NEIGHBORS
}

fn default_maxdepth() -> usize {
    DEFAULT_MAX_DEPTH
}

fn default_maxtrees() -> usize {
    DEFAULT_MAX_TREES
}

fn default_maxerror() -> f64 {
    DEFAULT_MAX_ERROR
}

/// Every option of a run, as given on the command line or in a JSON file.
///
/// Resolve it once with [`validate`](Self::validate) before training; the
/// accessors below hand out the typed parameters of each stage.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RunConfig {
    #[serde(default)]
    pub path: Option<PathBuf>,
    #[serde(default)]
    pub method: Option<FeatureMethod>,
    #[serde(default)]
    pub threshold: Option<f64>,
    /// Per-sample thresholds replace `threshold`.
    #[serde(default)]
    pub param_flag: bool,
    #[serde(default)]
    pub approach: ColorMode,
    #[serde(default)]
    pub threshtype: ThresholdType,
    #[serde(default)]
    pub auto_threshold: bool,
    #[serde(default = "default_nmax")]
    pub nmax: usize,
    #[serde(default = "default_nclass")]
    pub nclass: usize,
    #[serde(default = "default_maxdepth")]
    pub maxdepth: usize,
    #[serde(default)]
    pub criteria: TermCriteria,
    #[serde(default = "default_maxtrees")]
    pub maxtrees: usize,
    #[serde(default = "default_maxerror")]
    pub maxerror: f64,
    #[serde(default)]
    pub seed: u64,
    #[serde(default)]
    pub skip_bad_samples: bool,
}

impl Default for RunConfig {
    fn default() -> Self {
        Self {
            path: None,
            method: None,
            threshold: None,
            param_flag: false,
            approach: ColorMode::default(),
            threshtype: ThresholdType::default(),
            auto_threshold: false,
            nmax: default_nmax(),
            nclass: default_nclass(),
            maxdepth: default_maxdepth(),
            criteria: TermCriteria::default(),
            maxtrees: default_maxtrees(),
            maxerror: default_maxerror(),
            seed: 0,
            skip_bad_samples: false,
        }
    }
}

impl RunConfig {
    /// Checks every option at once, so later accessors cannot fail on a
    /// validated config.
    pub fn validate(&self) -> Result<(), ConfigError> {
        self.path()?;
        self.method()?;
        self.silhouette_config()?;
        self.ensemble_params()?;
        Ok(())
    }

    pub fn path(&self) -> Result<&Path, ConfigError> {
        self.path.as_deref().ok_or(ConfigError::Missing("path"))
    }

    pub fn method(&self) -> Result<FeatureMethod, ConfigError> {
        self.method.ok_or(ConfigError::Missing("method"))
    }

    /// With per-sample thresholds on, the global threshold is only a
    /// placeholder and may be absent.
    pub fn silhouette_config(&self) -> Result<SilhouetteConfig, ConfigError> {
        let threshold = match (self.threshold, self.param_flag) {
            (Some(t), _) => t,
            (None, true) => 0.0,
            (None, false) => return Err(ConfigError::Missing("threshold")),
        };
        if !threshold.is_finite() || threshold < 0.0 {
            return Err(ConfigError::invalid(
                "threshold",
                threshold,
                "must be a finite, non-negative number",
            ));
        }

        let mode = if self.auto_threshold {
            ThresholdMode::Auto(self.threshtype)
        } else {
            ThresholdMode::Fixed
        };
        Ok(SilhouetteConfig::new(threshold)
            .with_threshold_mode(mode)
            .with_color_mode(self.approach))
    }

    pub fn knn_params(&self) -> Result<KnnParams, ConfigError> {
        KnnParams::new(self.nmax, self.nclass)
    }

    pub fn random_trees_params(&self) -> Result<RandomTreesParams, ConfigError> {
        let params = RandomTreesParams {
            max_depth: self.maxdepth,
            max_trees: self.maxtrees,
            criteria: self.criteria,
            max_error: self.maxerror,
            min_sample_count: DEFAULT_MIN_SAMPLE_COUNT,
            active_features: None,
            seed: self.seed,
        };
        params.validate()?;
        Ok(params)
    }

    pub fn ensemble_params(&self) -> Result<EnsembleParams, ConfigError> {
        Ok(EnsembleParams {
            knn: self.knn_params()?,
            trees: self.random_trees_params()?,
        })
    }

    pub fn sample_policy(&self) -> SamplePolicy {
        if self.skip_bad_samples {
            SamplePolicy::Skip
        } else {
            SamplePolicy::Abort
        }
    }
}
