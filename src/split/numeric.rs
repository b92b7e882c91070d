use crate::split::{SplitInfo, SplitResult};
use crate::GainFunction;
use ordered_float::OrderedFloat;

/// Binary split on a threshold: values lower or equal go to the first child.
#[derive(Debug, Serialize, Deserialize, Clone, PartialEq)]
pub struct NumericSplitInfo {
    pub threshold: f64,
}

impl NumericSplitInfo {
    pub fn n_children(&self) -> usize {
        2
    }

    pub fn direction(&self, value: f64) -> usize {
        if value <= self.threshold {
            0
        } else {
            1
        }
    }
}

/// Threshold between two sorted distinct values: `last_val <= threshold < val`, so
/// `direction` sends `val` to the second child even when the values are infinite or
/// adjacent floats.
fn midpoint(last_val: f64, val: f64) -> f64 {
    let threshold = last_val + (val - last_val) / 2.;
    if threshold < val {
        threshold
    } else {
        last_val
    }
}

/// Best binary split of a numeric dimension, if it's better than `best_gain`.
///
/// The samples are sorted by value and every cut between two different values is
/// tried. A cut must leave at least `min_leaf_size` samples on each side, and
/// improve the gain by more than `min_gain_split`. A cut reaching the best possible
/// gain (0) is taken as soon as it's found.
pub fn split_if_better(
    best_gain: f64,
    values: &[f64],
    responses: &[f64],
    min_leaf_size: usize,
    min_gain_split: f64,
    gain_fn: &impl GainFunction,
) -> Option<SplitResult> {
    debug_assert_eq!(values.len(), responses.len());
    let n = values.len();
    // Empty children don't make sense
    let minimum = min_leaf_size.max(1);
    if n < 2 * minimum {
        return None;
    }
    if best_gain == 0. {
        // Already optimal, it can't be outperformed
        return None;
    }

    let mut sorted_ids: Vec<usize> = (0..n).collect();
    sorted_ids.sort_by_key(|&i| OrderedFloat(values[i]));
    let sorted_responses: Vec<f64> = sorted_ids.iter().map(|&i| responses[i]).collect();
    let gains = gain_fn.binary_gains(&sorted_responses);

    let mut best_found_gain = (best_gain + min_gain_split).min(0.);
    let mut best_threshold = None;
    // `cut` is the number of samples on the left
    for cut in minimum..=(n - minimum) {
        let (last_val, val) = (values[sorted_ids[cut - 1]], values[sorted_ids[cut]]);
        // We can only split when the value changes
        if val == last_val {
            continue;
        }
        let (left_gain, right_gain) = gains[cut];
        let gain = (cut as f64 / n as f64) * left_gain + ((n - cut) as f64 / n as f64) * right_gain;
        let threshold = midpoint(last_val, val);

        if gain >= 0. {
            // Nothing can do better
            return Some(SplitResult {
                gain,
                info: SplitInfo::Numeric(NumericSplitInfo { threshold }),
            });
        }
        if gain > best_found_gain {
            best_found_gain = gain;
            best_threshold = Some(threshold);
        }
    }

    best_threshold.map(|threshold| SplitResult {
        gain: best_found_gain,
        info: SplitInfo::Numeric(NumericSplitInfo { threshold }),
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::MSEGain;

    fn threshold_of(result: &SplitResult) -> f64 {
        match &result.info {
            SplitInfo::Numeric(info) => info.threshold,
            other => panic!("expected a numeric split, got {:?}", other),
        }
    }

    #[test]
    fn test_perfect_split() {
        let gain = MSEGain::default();
        let responses = [0., 0., 10., 10.];
        let base = gain.evaluate(&responses);
        let result = split_if_better(base, &[1., 2., 3., 4.], &responses, 1, 0., &gain)
            .expect("a split");
        assert_eq!(result.gain, 0.);
        assert_eq!(threshold_of(&result), 2.5);
        assert_eq!(result.info.n_children(), 2);
    }

    #[test]
    fn test_unsorted_values() {
        let gain = MSEGain::default();
        let values = [4., 1., 3., 2., 5.];
        let responses = [10., 0., 10., 0., 11.];
        let base = gain.evaluate(&responses);
        let result = split_if_better(base, &values, &responses, 1, 0., &gain).expect("a split");
        assert_eq!(threshold_of(&result), 2.5);
        assert!(result.gain > base);
        assert!(result.gain < 0.);
    }

    #[test]
    fn test_min_leaf_size() {
        let gain = MSEGain::default();
        let values = [1., 2., 3., 4., 5., 6.];
        let responses = [100., 0., 0., 0., 0., 0.];
        let base = gain.evaluate(&responses);

        let result = split_if_better(base, &values, &responses, 1, 0., &gain).expect("a split");
        assert_eq!(threshold_of(&result), 1.5);

        // The outlier can't be alone anymore
        let result = split_if_better(base, &values, &responses, 2, 0., &gain).expect("a split");
        assert_eq!(threshold_of(&result), 2.5);

        assert!(split_if_better(base, &values, &responses, 4, 0., &gain).is_none());
    }

    #[test]
    fn test_min_gain_split() {
        let gain = MSEGain::default();
        let values = [1., 2., 3., 4.];
        let responses = [0., 1., 0., 1.];
        let base = gain.evaluate(&responses);
        let result = split_if_better(base, &values, &responses, 1, 0., &gain).expect("a split");
        let improvement = result.gain - base;
        assert!(improvement > 0.);

        assert!(split_if_better(base, &values, &responses, 1, improvement + 1e-6, &gain).is_none());
    }

    #[test]
    fn test_no_split() {
        let gain = MSEGain::default();
        // Constant values: nowhere to cut
        let responses = [0., 1., 2.];
        let base = gain.evaluate(&responses);
        assert!(split_if_better(base, &[7., 7., 7.], &responses, 1, 0., &gain).is_none());
        // Already optimal
        assert!(split_if_better(0., &[1., 2., 3.], &[4., 4., 4.], 1, 0., &gain).is_none());
        // One sample
        assert!(split_if_better(-1., &[1.], &[4.], 1, 0., &gain).is_none());
    }

    #[test]
    fn test_extreme_values() {
        let gain = MSEGain::default();
        let responses = [0., 10.];
        let base = gain.evaluate(&responses);
        let adjacent = 1. + std::f64::EPSILON;
        let cases = [
            [adjacent, adjacent + std::f64::EPSILON],
            [1.7e308, 1.75e308],
            [-1.7e308, 1.7e308],
            [1., std::f64::INFINITY],
            [std::f64::NEG_INFINITY, 1.],
        ];
        for values in cases.iter() {
            let result = split_if_better(base, values, &responses, 1, 0., &gain)
                .expect("a split");
            assert_eq!(result.info.direction(values[0]), 0, "{:?}", values);
            assert_eq!(result.info.direction(values[1]), 1, "{:?}", values);
            let threshold = threshold_of(&result);
            assert!(values[0] <= threshold && threshold < values[1], "{:?}", values);
        }
    }

    #[test]
    fn test_direction() {
        let info = NumericSplitInfo { threshold: 2.5 };
        assert_eq!(info.direction(1.), 0);
        assert_eq!(info.direction(2.5), 0);
        assert_eq!(info.direction(2.6), 1);
        assert_eq!(info.direction(std::f64::NAN), 1);
    }
}
