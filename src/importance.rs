use itertools::Itertools;

/// Receive a notification every time a dimension is used to split a node.
pub trait ImportanceSink {
    fn increase_frequency(&mut self, dimension: usize, amount: usize);
    fn increase_cover(&mut self, dimension: usize, amount: f64);
}

/// Accumulate, per dimension, how many splits use it and the sum of the gains of
/// these splits. It can be shared by all the trees of an ensemble.
#[derive(Debug, Serialize, Deserialize, Clone, Default, PartialEq)]
pub struct FeatureImportance {
    frequency: Vec<usize>,
    cover: Vec<f64>,
}

impl FeatureImportance {
    pub fn new(n_dims: usize) -> Self {
        Self {
            frequency: vec![0; n_dims],
            cover: vec![0.; n_dims],
        }
    }

    fn grow(&mut self, dimension: usize) {
        if dimension >= self.frequency.len() {
            self.frequency.resize(dimension + 1, 0);
            self.cover.resize(dimension + 1, 0.);
        }
    }

    pub fn frequency(&self) -> &[usize] {
        &self.frequency
    }

    pub fn cover(&self) -> &[f64] {
        &self.cover
    }

    /// Share of the splits done on every dimension. All zeros if there was no split.
    pub fn normalized_frequency(&self) -> Vec<f64> {
        let total: usize = self.frequency.iter().sum();
        if total == 0 {
            return vec![0.; self.frequency.len()];
        }
        self.frequency
            .iter()
            .map(|&f| f as f64 / total as f64)
            .collect()
    }

    /// Dimension used by the most splits (the last one on ties), if any split was done.
    pub fn most_important(&self) -> Option<usize> {
        if self.frequency.iter().all(|&f| f == 0) {
            return None;
        }
        self.frequency.iter().position_max()
    }
}

impl ImportanceSink for FeatureImportance {
    fn increase_frequency(&mut self, dimension: usize, amount: usize) {
        self.grow(dimension);
        self.frequency[dimension] += amount;
    }

    fn increase_cover(&mut self, dimension: usize, amount: f64) {
        self.grow(dimension);
        self.cover[dimension] += amount;
    }
}
