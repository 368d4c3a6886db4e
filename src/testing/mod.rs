pub mod shapes;
pub mod stubs;

pub use shapes::{BACKGROUND_LEVEL, SUBJECT_LEVEL, Shape, shape_pair, shape_pair_at};
pub use stubs::InMemoryImageLoader;
