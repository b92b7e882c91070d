use crate::{ColumnMajorMatrix, FitError, FitResult};

/// Type of a dimension of the dataset.
#[derive(Debug, Serialize, Deserialize, Clone, Copy, PartialEq)]
pub enum Datatype {
    Numeric,
    /// Values are category codes in `0..n_categories`.
    Categorical { n_categories: usize },
}

/// Per-dimension metadata of a dataset. It's shared read-only by every node during
/// the training.
#[derive(Debug, Serialize, Deserialize, Clone, PartialEq)]
pub struct DatasetInfo {
    types: Vec<Datatype>,
}

impl DatasetInfo {
    /// All the dimensions are numeric.
    pub fn numeric(n_dims: usize) -> Self {
        Self {
            types: vec![Datatype::Numeric; n_dims],
        }
    }

    pub fn from_types(types: Vec<Datatype>) -> Self {
        Self { types }
    }

    /// Mark a dimension as categorical.
    pub fn with_categorical(mut self, dimension: usize, n_categories: usize) -> Self {
        self.types[dimension] = Datatype::Categorical { n_categories };
        self
    }

    pub fn dimensionality(&self) -> usize {
        self.types.len()
    }

    pub fn datatype(&self, dimension: usize) -> Datatype {
        self.types[dimension]
    }

    /// Number of categories of a dimension, 0 for the numeric ones.
    pub fn num_mappings(&self, dimension: usize) -> usize {
        match self.types[dimension] {
            Datatype::Numeric => 0,
            Datatype::Categorical { n_categories } => n_categories,
        }
    }

    /// Check that a feature matrix can be trained with this descriptor.
    pub fn check(&self, features: &ColumnMajorMatrix<f64>) -> FitResult<()> {
        if features.n_rows() != self.dimensionality() {
            return Err(FitError::ShapeMismatch {
                what: "number of dimensions",
                expected: self.dimensionality(),
                got: features.n_rows(),
            });
        }
        for (dimension, datatype) in self.types.iter().enumerate() {
            let n_categories = match datatype {
                Datatype::Numeric => continue,
                Datatype::Categorical { n_categories } => *n_categories,
            };
            for (sample, &value) in features.row(dimension).iter().enumerate() {
                if !is_category(value, n_categories) {
                    return Err(FitError::InvalidCategory {
                        dimension,
                        sample,
                        value,
                        n_categories,
                    });
                }
            }
        }
        Ok(())
    }
}

/// True if the value is an integer code in `0..n_categories`.
pub(crate) fn is_category(value: f64, n_categories: usize) -> bool {
    value >= 0. && value < n_categories as f64 && value.fract() == 0.
}

/// Store the raw data.
#[derive(Debug, Clone)]
pub struct Dataset {
    /// Predictors, one row per dimension and one column per sample
    pub features: ColumnMajorMatrix<f64>,
    /// Target, used for the learning
    pub target: Vec<f64>,
}

impl Dataset {
    pub fn n_samples(&self) -> usize {
        self.target.len()
    }
}

/// Mutable buffers of one training.
///
/// The recursion reorders the samples so that every node owns a contiguous range of
/// columns. Features, responses and weights are always moved together.
pub struct TrainSet<'a> {
    pub(crate) features: &'a mut ColumnMajorMatrix<f64>,
    pub(crate) responses: &'a mut [f64],
    // Empty when the caller has no weights
    pub(crate) weights: &'a mut [f64],
}

impl<'a> TrainSet<'a> {
    pub fn new(
        features: &'a mut ColumnMajorMatrix<f64>,
        responses: &'a mut [f64],
        weights: &'a mut [f64],
    ) -> Self {
        assert_eq!(features.n_cols(), responses.len());
        assert!(weights.is_empty() || weights.len() == responses.len());
        TrainSet {
            features,
            responses,
            weights,
        }
    }

    pub fn n_samples(&self) -> usize {
        self.responses.len()
    }

    pub fn features(&self) -> &ColumnMajorMatrix<f64> {
        &*self.features
    }

    pub fn responses(&self) -> &[f64] {
        &*self.responses
    }

    pub fn weights(&self) -> &[f64] {
        &*self.weights
    }

    /// Exchange two samples.
    pub(crate) fn swap(&mut self, a: usize, b: usize) {
        self.features.swap_cols(a, b);
        self.responses.swap(a, b);
        if !self.weights.is_empty() {
            self.weights.swap(a, b);
        }
    }
}
