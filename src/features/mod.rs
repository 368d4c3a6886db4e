pub mod contour;
mod error;
pub mod granlund;
pub mod hu;
mod method;
pub mod moments;

pub use error::FeatureError;
pub use granlund::{GRANLUND_DESCRIPTORS, granlund_descriptors};
pub use hu::{HU_INVARIANTS, hu_invariants};
pub use method::{FeatureMethod, extract_features};
pub use moments::{CentralMoments, NormalizedMoments};
