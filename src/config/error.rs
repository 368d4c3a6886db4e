use thiserror::Error;

/// Problems with the run configuration. All of them are fatal and surface
/// before any training starts.
#[derive(Debug, Error, Clone, PartialEq)]
pub enum ConfigError {
    #[error("missing required option `{0}`")]
    Missing(&'static str),

    #[error("invalid value `{value}` for `{option}`: {reason}")]
    Invalid {
        option: &'static str,
        value: String,
        reason: String,
    },

    #[error(
        "class neighbours ({class_neighbors}) must be between 1 and the maximum neighbours ({max_neighbors})"
    )]
    NeighborBounds {
        max_neighbors: usize,
        class_neighbors: usize,
    },

    #[error("sample `{origin}` has no usable threshold: {reason}")]
    SampleThreshold { origin: String, reason: String },
}

impl ConfigError {
    pub(crate) fn invalid(
        option: &'static str,
        value: impl ToString,
        reason: impl Into<String>,
    ) -> Self {
        ConfigError::Invalid {
            option,
            value: value.to_string(),
            reason: reason.into(),
        }
    }
}
