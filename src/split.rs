//! Split evaluators.
//!
//! Each evaluator looks at one dimension of the samples of a node and reports a split
//! only if it beats the gain the node already has. The chosen split is stored on the
//! node as a [`SplitInfo`], which routes a value to the index of a child.

pub mod categorical;
pub mod numeric;

pub use self::categorical::CategoricalSplitInfo;
pub use self::numeric::NumericSplitInfo;

/// Split stored on an internal node. The variant is the type of the split dimension.
#[derive(Debug, Serialize, Deserialize, Clone, PartialEq)]
pub enum SplitInfo {
    Numeric(NumericSplitInfo),
    Categorical(CategoricalSplitInfo),
}

impl SplitInfo {
    pub fn n_children(&self) -> usize {
        match self {
            SplitInfo::Numeric(info) => info.n_children(),
            SplitInfo::Categorical(info) => info.n_children(),
        }
    }

    /// Index of the child a value goes to. Always lower than `n_children()`.
    pub fn direction(&self, value: f64) -> usize {
        match self {
            SplitInfo::Numeric(info) => info.direction(value),
            SplitInfo::Categorical(info) => info.direction(value),
        }
    }
}

/// Result of a split that beats the current gain.
#[derive(Debug, Clone, PartialEq)]
pub struct SplitResult {
    pub gain: f64,
    pub info: SplitInfo,
}
