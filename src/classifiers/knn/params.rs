use crate::config::ConfigError;
use serde::{Deserialize, Serialize};

pub const DEFAULT_MAX_NEIGHBORS: usize = 32;
pub const DEFAULT_CLASS_NEIGHBORS: usize = 7;

/// Neighbour counts for [`NearestNeighbor`](super::NearestNeighbor).
///
/// `class_neighbors` is the `k` used for voting and must lie in
/// `1..=max_neighbors`. Out-of-range values are rejected, never clamped,
/// including when deserialized.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "RawKnnParams")]
pub struct KnnParams {
    max_neighbors: usize,
    class_neighbors: usize,
}

#[derive(Deserialize)]
struct RawKnnParams {
    max_neighbors: usize,
    class_neighbors: usize,
}

impl TryFrom<RawKnnParams> for KnnParams {
    type Error = ConfigError;

    fn try_from(raw: RawKnnParams) -> Result<Self, Self::Error> {
        Self::new(raw.max_neighbors, raw.class_neighbors)
    }
}

impl KnnParams {
    pub fn new(max_neighbors: usize, class_neighbors: usize) -> Result<Self, ConfigError> {
        if class_neighbors == 0 || class_neighbors > max_neighbors {
            return Err(ConfigError::NeighborBounds {
                max_neighbors,
                class_neighbors,
            });
        }
        Ok(Self {
            max_neighbors,
            class_neighbors,
        })
    }

    #[inline]
    pub fn max_neighbors(&self) -> usize {
        self.max_neighbors
    }

    #[inline]
    pub fn class_neighbors(&self) -> usize {
        self.class_neighbors
    }
}

impl Default for KnnParams {
    fn default() -> Self {
        Self {
            max_neighbors: DEFAULT_MAX_NEIGHBORS,
            class_neighbors: DEFAULT_CLASS_NEIGHBORS,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn accepts_bounds() {
        assert!(KnnParams::new(32, 7).is_ok());
        assert!(KnnParams::new(1, 1).is_ok());
        assert!(KnnParams::new(5, 5).is_ok());
        assert_eq!(KnnParams::default(), KnnParams::new(32, 7).unwrap());
    }

    #[test]
    fn rejects_out_of_range_class_neighbors() {
        assert_eq!(
            KnnParams::new(4, 5),
            Err(ConfigError::NeighborBounds {
                max_neighbors: 4,
                class_neighbors: 5
            })
        );
        assert!(KnnParams::new(4, 0).is_err());
    }

    #[test]
    fn deserializing_checks_bounds_too() {
        let ok: KnnParams =
            serde_json::from_str(r#"{"max_neighbors":8,"class_neighbors":3}"#).unwrap();
        assert_eq!(ok, KnnParams::new(8, 3).unwrap());

        let err = serde_json::from_str::<KnnParams>(r#"{"max_neighbors":4,"class_neighbors":5}"#)
            .unwrap_err();
        assert!(err.to_string().contains("class neighbours (5)"), "{err}");
        assert!(serde_json::from_str::<KnnParams>(r#"{"max_neighbors":4,"class_neighbors":0}"#).is_err());

        let text = serde_json::to_string(&KnnParams::default()).unwrap();
        assert_eq!(text, r#"{"max_neighbors":32,"class_neighbors":7}"#);
    }
}
