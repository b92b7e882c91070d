use crate::{
    AllDimensionSelect, ColumnMajorMatrix, Dataset, DatasetInfo, DimensionSelect, FitError,
    FitResult, GainFunction, ImportanceSink, MSEGain, Node, TrainSet, DEFAULT_MAX_DEPTH,
    DEFAULT_MIN_LEAF_SIZE, DEFAULT_MIN_SPLIT_GAIN,
};
use rayon::prelude::*;

/// Hyper-parameters of a tree.
///
/// Missing fields take the default values when deserialized.
#[derive(Debug, Serialize, Deserialize, Clone, PartialEq)]
#[serde(default)]
pub struct TreeParams {
    /// Minimum number of samples in a leaf
    pub min_leaf_size: usize,
    /// Minimum improvement of the gain for splitting a node
    pub min_gain_split: f64,
    /// Maximum number of levels, the root included: 1 is a single leaf
    pub max_depth: usize,
}

impl Default for TreeParams {
    fn default() -> Self {
        Self {
            min_leaf_size: DEFAULT_MIN_LEAF_SIZE,
            min_gain_split: DEFAULT_MIN_SPLIT_GAIN,
            max_depth: DEFAULT_MAX_DEPTH,
        }
    }
}

impl TreeParams {
    pub fn validate(&self) -> FitResult<()> {
        if self.max_depth == 0 {
            return Err("max_depth must be at least 1".into());
        }
        if self.min_leaf_size == 0 {
            return Err("min_leaf_size must be at least 1".into());
        }
        if !(self.min_gain_split >= 0.) {
            return Err(format!(
                "min_gain_split must be positive, got {}",
                self.min_gain_split
            )
            .into());
        }
        Ok(())
    }
}

/// Regression tree trained on the squared error.
#[derive(Debug, Serialize, Deserialize, Clone, PartialEq)]
pub struct DecisionTree {
    root: Node,
    params: TreeParams,
    n_dims: usize,
}

impl DecisionTree {
    /// Train a tree on a copy of the dataset, trying all the dimensions at every node.
    pub fn build(dataset: &Dataset, info: &DatasetInfo, params: &TreeParams) -> FitResult<Self> {
        let mut features = dataset.features.clone();
        let mut responses = dataset.target.clone();
        let mut selector = AllDimensionSelect::new(info.dimensionality());
        Self::fit_in_place(
            &mut features,
            &mut responses,
            &mut [],
            info,
            params,
            &mut selector,
            &MSEGain::default(),
            None,
        )
    }

    /// Train a tree directly on the buffers of the caller.
    ///
    /// The columns of `features`, and the items of `responses` and `weights`, are
    /// reordered: after the training the samples of every leaf are contiguous, in the
    /// order of `Node::leaves`. `weights` can be empty.
    pub fn fit_in_place<G: GainFunction, S: DimensionSelect + ?Sized>(
        features: &mut ColumnMajorMatrix<f64>,
        responses: &mut [f64],
        weights: &mut [f64],
        info: &DatasetInfo,
        params: &TreeParams,
        selector: &mut S,
        gain_fn: &G,
        importance: Option<&mut dyn ImportanceSink>,
    ) -> FitResult<Self> {
        params.validate()?;
        check_inputs(features, responses, weights, info)?;

        let n_samples = responses.len();
        let mut root = Node::default();
        let mut data = TrainSet::new(features, responses, weights);
        root.train(
            &mut data,
            0,
            n_samples,
            info,
            params.min_leaf_size,
            params.min_gain_split,
            params.max_depth,
            selector,
            gain_fn,
            importance,
        );

        let tree = DecisionTree {
            root,
            params: params.clone(),
            n_dims: info.dimensionality(),
        };
        debug!(
            "tree trained on {} samples: {} leaves, depth {}",
            n_samples,
            tree.n_leaves(),
            tree.depth()
        );
        Ok(tree)
    }

    /// Prediction for one sample, with one value per dimension.
    pub fn predict(&self, point: &[f64]) -> f64 {
        debug_assert_eq!(point.len(), self.n_dims);
        self.root.predict(point)
    }

    /// Predictions for all the samples (columns) of a matrix.
    pub fn par_predict(&self, features: &ColumnMajorMatrix<f64>) -> Vec<f64> {
        (0..features.n_cols())
            .into_par_iter()
            .map(|col| self.root.predict(features.column(col)))
            .collect()
    }

    /// Collapse the subtrees whose gain is lower than `threshold`. If the root itself is
    /// below the threshold, the tree becomes a single leaf.
    pub fn prune(&mut self, threshold: f64) {
        let n_leaves = self.n_leaves();
        if self.root.prune(threshold) {
            self.root.collapse();
        }
        debug!(
            "pruning at {}: {} leaves -> {} leaves",
            threshold,
            n_leaves,
            self.n_leaves()
        );
    }

    /// Multiply all the predictions by `alpha`.
    pub fn apply_shrinking(&mut self, alpha: f64) {
        self.root.apply_shrinking(alpha)
    }

    pub fn root(&self) -> &Node {
        &self.root
    }

    pub fn params(&self) -> &TreeParams {
        &self.params
    }

    pub fn n_leaves(&self) -> usize {
        self.root.leaves().len()
    }

    pub fn depth(&self) -> usize {
        self.root.depth()
    }
}

fn check_inputs(
    features: &ColumnMajorMatrix<f64>,
    responses: &[f64],
    weights: &[f64],
    info: &DatasetInfo,
) -> FitResult<()> {
    if responses.is_empty() {
        return Err(FitError::EmptyDataset);
    }
    if features.n_cols() != responses.len() {
        return Err(FitError::ShapeMismatch {
            what: "number of samples",
            expected: responses.len(),
            got: features.n_cols(),
        });
    }
    if !weights.is_empty() && weights.len() != responses.len() {
        return Err(FitError::ShapeMismatch {
            what: "number of weights",
            expected: responses.len(),
            got: weights.len(),
        });
    }
    if features.flat().iter().any(|x| x.is_nan()) {
        return Err(FitError::NanValue("the features"));
    }
    if responses.iter().any(|x| x.is_nan()) {
        return Err(FitError::NanValue("the responses"));
    }
    info.check(features)
}
