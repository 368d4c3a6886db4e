use crate::core::{BinaryMask, FeatureVector};
use crate::features::granlund::{GRANLUND_DESCRIPTORS, granlund_descriptors};
use crate::features::hu::{HU_INVARIANTS, hu_invariants};
use crate::features::FeatureError;
use serde::{Deserialize, Serialize};
use strum_macros::{Display, EnumIter, EnumString, IntoStaticStr};

/// Shape descriptor family. A run uses exactly one of them for every sample.
#[derive(
    Debug,
    Clone,
    Copy,
    PartialEq,
    Eq,
    Hash,
    Serialize,
    Deserialize,
    EnumString,
    Display,
    EnumIter,
    IntoStaticStr,
)]
#[serde(rename_all = "snake_case")]
#[strum(ascii_case_insensitive)]
pub enum FeatureMethod {
    #[serde(alias = "hu")]
    #[strum(
        to_string = "classical_moments",
        serialize = "hu",
        serialize = "classical-moments"
    )]
    ClassicalMoments,
    #[strum(to_string = "granlund")]
    Granlund,
}

impl FeatureMethod {
    /// Length of every vector this method produces.
    pub fn dimensions(self) -> usize {
        match self {
            FeatureMethod::ClassicalMoments => HU_INVARIANTS,
            FeatureMethod::Granlund => GRANLUND_DESCRIPTORS,
        }
    }

    pub fn extract(self, mask: &BinaryMask) -> Result<FeatureVector, FeatureError> {
        extract_features(mask, self)
    }
}

/// Computes the invariant descriptor of `mask` with `method`.
///
/// Vectors containing non-finite values are rejected so they never reach a
/// classifier.
pub fn extract_features(
    mask: &BinaryMask,
    method: FeatureMethod,
) -> Result<FeatureVector, FeatureError> {
    if mask.is_empty() {
        return Err(FeatureError::EmptyShape);
    }

    let features = match method {
        FeatureMethod::ClassicalMoments => hu_invariants(mask)?.to_vec(),
        FeatureMethod::Granlund => granlund_descriptors(mask)?.to_vec(),
    };

    if let Some(index) = features.iter().position(|v| !v.is_finite()) {
        return Err(FeatureError::NonFinite { method, index });
    }
    debug_assert_eq!(features.len(), method.dimensions());
    Ok(features)
}
