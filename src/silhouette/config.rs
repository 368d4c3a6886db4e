use serde::{Deserialize, Serialize};
use strum_macros::{Display, EnumIter, EnumString, IntoStaticStr};

/// How subject and background pixels are compared.
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
pub enum ColorMode {
    /// Largest per-channel RGB difference.
    #[default]
    #[serde(alias = "c")]
    #[strum(to_string = "color", serialize = "c")]
    Color,
    /// Difference of luma values.
    #[serde(alias = "g")]
    #[strum(to_string = "gray", serialize = "g", serialize = "grey")]
    Gray,
}

/// Statistic of the difference map used for automatic cutoffs.
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
pub enum ThresholdType {
    #[default]
    #[serde(alias = "m")]
    #[strum(to_string = "median", serialize = "m")]
    Median,
    #[serde(alias = "a")]
    #[strum(to_string = "mean", serialize = "a")]
    Mean,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(tag = "type", content = "statistic", rename_all = "kebab-case")]
pub enum ThresholdMode {
    /// The threshold is the cutoff.
    #[default]
    Fixed,
    /// The cutoff is the statistic of the difference map times the threshold.
    Auto(ThresholdType),
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct SilhouetteConfig {
    pub threshold: f64,
    pub threshold_mode: ThresholdMode,
    pub color_mode: ColorMode,
}

impl SilhouetteConfig {
    pub fn new(threshold: f64) -> Self {
        Self {
            threshold,
            threshold_mode: ThresholdMode::Fixed,
            color_mode: ColorMode::Color,
        }
    }

    pub fn with_threshold_mode(mut self, mode: ThresholdMode) -> Self {
        self.threshold_mode = mode;
        self
    }

    pub fn with_color_mode(mut self, mode: ColorMode) -> Self {
        self.color_mode = mode;
        self
    }

    /// Same configuration with a different threshold, for per-sample overrides.
    pub fn with_threshold(mut self, threshold: f64) -> Self {
        self.threshold = threshold;
        self
    }
}
