mod nearest_neighbor;
mod params;

pub use nearest_neighbor::NearestNeighbor;
pub use params::{DEFAULT_CLASS_NEIGHBORS, DEFAULT_MAX_NEIGHBORS, KnnParams};
