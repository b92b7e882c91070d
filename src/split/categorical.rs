use crate::data::is_category;
use crate::split::{SplitInfo, SplitResult};
use crate::GainFunction;
use itertools::Itertools;

// Tolerance on the gain improvement, against the floating point errors
static EPSILON: f64 = 1e-7;

/// Split with one child per category.
#[derive(Debug, Serialize, Deserialize, Clone, PartialEq)]
pub struct CategoricalSplitInfo {
    pub n_categories: usize,
    /// Child of the values that are not a known category: the most populated one at
    /// training time.
    pub default_child: usize,
}

impl CategoricalSplitInfo {
    pub fn n_children(&self) -> usize {
        self.n_categories
    }

    pub fn direction(&self, value: f64) -> usize {
        if is_category(value, self.n_categories) {
            value as usize
        } else {
            self.default_child
        }
    }
}

/// Split of a categorical dimension into one child per category, if it's better than
/// `best_gain` by more than `min_gain_split`.
///
/// `values` must be category codes in `0..n_categories`. Every category must hold at
/// least `min_leaf_size` samples, so a category absent from the node forbids the split.
///
/// # Panics
/// If a value is `n_categories` or more. Negative and fractional values are truncated
/// to a code instead, so they must be rejected by the caller (see `DatasetInfo::check`).
pub fn split_if_better(
    best_gain: f64,
    values: &[f64],
    n_categories: usize,
    responses: &[f64],
    min_leaf_size: usize,
    min_gain_split: f64,
    gain_fn: &impl GainFunction,
) -> Option<SplitResult> {
    debug_assert_eq!(values.len(), responses.len());
    if n_categories == 0 || values.is_empty() {
        return None;
    }

    let mut children_responses: Vec<Vec<f64>> = vec![Vec::new(); n_categories];
    for (&value, &response) in values.iter().zip(responses) {
        children_responses[value as usize].push(response);
    }

    let minimum = min_leaf_size.max(1);
    if children_responses.iter().any(|child| child.len() < minimum) {
        return None;
    }

    let n = values.len() as f64;
    let gain: f64 = children_responses
        .iter()
        .map(|child| child.len() as f64 / n * gain_fn.evaluate(child))
        .sum();

    if gain > best_gain + min_gain_split + EPSILON {
        let default_child = children_responses
            .iter()
            .position_max_by_key(|child| child.len())
            .unwrap_or(0);
        Some(SplitResult {
            gain,
            info: SplitInfo::Categorical(CategoricalSplitInfo {
                n_categories,
                default_child,
            }),
        })
    } else {
        None
    }
}
