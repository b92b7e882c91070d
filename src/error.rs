use thiserror::Error;

/// Error returned when the inputs of a fit break the training contract.
///
/// Training itself never fails: a node that can't be split becomes a leaf. Every
/// variant is raised by the checks done before the recursion starts.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum FitError {
    #[error("invalid tree parameters: {0}")]
    InvalidParams(String),

    #[error("the dataset contains no samples")]
    EmptyDataset,

    #[error("{what}: expected {expected}, got {got}")]
    ShapeMismatch {
        what: &'static str,
        expected: usize,
        got: usize,
    },

    #[error("NAN found in {0}")]
    NanValue(&'static str),

    #[error("invalid category {value} for dimension {dimension} (sample {sample}, {n_categories} categories)")]
    InvalidCategory {
        dimension: usize,
        sample: usize,
        value: f64,
        n_categories: usize,
    },
}

impl std::convert::From<&str> for FitError {
    fn from(msg: &str) -> Self {
        FitError::InvalidParams(msg.to_string())
    }
}

impl std::convert::From<String> for FitError {
    fn from(msg: String) -> Self {
        FitError::InvalidParams(msg)
    }
}

pub type FitResult<T> = Result<T, FitError>;
