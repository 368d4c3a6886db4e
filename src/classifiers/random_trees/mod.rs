mod decision_tree;
mod forest;
mod params;
pub mod split_criteria;

pub use decision_tree::{DecisionTree, TreeLimits};
pub use forest::RandomTrees;
pub use params::{
    DEFAULT_MAX_DEPTH, DEFAULT_MAX_ERROR, DEFAULT_MAX_TREES, DEFAULT_MIN_SAMPLE_COUNT,
    EPSILON_TREE_LIMIT, RandomTreesParams, TermCriteria,
};
