use rand::prelude::Rng;
use rand::seq::index::sample;

/// Choose the dimensions tried at every node.
pub trait DimensionSelect {
    /// Candidate dimensions for the next node, in the order they are tried.
    fn dimensions(&mut self) -> Vec<usize>;
}

/// Try every dimension, in order.
#[derive(Debug, Serialize, Deserialize, Clone)]
pub struct AllDimensionSelect {
    n_dims: usize,
}

impl AllDimensionSelect {
    pub fn new(n_dims: usize) -> Self {
        Self { n_dims }
    }
}

impl DimensionSelect for AllDimensionSelect {
    fn dimensions(&mut self) -> Vec<usize> {
        (0..self.n_dims).collect()
    }
}

/// Try a random subset of the dimensions at each node.
pub struct RandomDimensionSelect<R: Rng> {
    n_dims: usize,
    ratio: f64,
    rng: R,
}

impl<R: Rng> RandomDimensionSelect<R> {
    /// `ratio` is the share of the dimensions drawn at every node. At least one
    /// dimension is always drawn.
    pub fn new(n_dims: usize, ratio: f64, rng: R) -> Self {
        assert!(ratio > 0. && ratio <= 1., "ratio must be in ]0, 1]");
        Self { n_dims, ratio, rng }
    }
}

impl<R: Rng> DimensionSelect for RandomDimensionSelect<R> {
    fn dimensions(&mut self) -> Vec<usize> {
        sample_indices_ratio(&mut self.rng, self.n_dims, self.ratio)
    }
}

/// Sorted random indices in `0..length`, `ratio * length` of them (at least one).
pub(crate) fn sample_indices_ratio(rng: &mut impl Rng, length: usize, ratio: f64) -> Vec<usize> {
    if length == 0 {
        return Vec::new();
    }
    let n = ((length as f64 * ratio).round() as usize).max(1).min(length);
    let mut indices = sample(rng, length, n).into_vec();
    indices.sort_unstable();
    indices
}
