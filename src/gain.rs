use crate::mean;
use itertools::Itertools;

/// General interface for the criterion used to grow the trees.
///
/// The gain is a score of a set of responses where higher is better. The splitters
/// compare the weighted gains of the children to the gain of the parent.
pub trait GainFunction: std::marker::Sync {
    /// Gain of a set of responses. The gain of an empty set is 0.
    fn evaluate(&self, responses: &[f64]) -> f64;

    /// Prediction of a leaf holding these responses.
    fn output_leaf_value(&self, responses: &[f64]) -> f64;

    /// Gains of both sides of every cut of the responses: the item `i` holds the
    /// gains of `responses[..i]` and `responses[i..]`, for `i` in `0..=responses.len()`.
    fn binary_gains(&self, responses: &[f64]) -> Vec<(f64, f64)> {
        (0..=responses.len())
            .map(|i| {
                (
                    self.evaluate(&responses[..i]),
                    self.evaluate(&responses[i..]),
                )
            })
            .collect()
    }
}

/// Squared error, ie the usual criterion for a regression.
///
/// The gain is minus the mean squared deviation from the mean, so 0 is the best
/// possible gain and is only reached when all the responses are equal.
#[derive(Debug, Serialize, Deserialize, Clone)]
pub struct MSEGain {
    // Nothing inside
}

impl Default for MSEGain {
    fn default() -> Self {
        MSEGain {}
    }
}

/// Minus the mean squared error from running sums.
fn neg_mse(sum: f64, sum_squares: f64, n: usize) -> f64 {
    if n == 0 {
        return 0.;
    }
    let n = n as f64;
    let mean = sum / n;
    // Rounding errors can make the variance slightly negative
    -(sum_squares / n - mean * mean).max(0.)
}

impl GainFunction for MSEGain {
    fn evaluate(&self, responses: &[f64]) -> f64 {
        // The mean of equal values is rounded, their error must still be exactly 0
        if responses.iter().all_equal() {
            return 0.;
        }
        let mean = mean(responses);
        let squares: f64 = responses.iter().map(|&y| (y - mean).powi(2)).sum();
        -squares / responses.len() as f64
    }

    fn output_leaf_value(&self, responses: &[f64]) -> f64 {
        mean(responses)
    }

    fn binary_gains(&self, responses: &[f64]) -> Vec<(f64, f64)> {
        let n = responses.len();
        // The sums are centered on the mean to limit the cancellation errors
        let shift = mean(responses);
        let (mut total, mut total_squares) = (0., 0.);
        for &y in responses {
            total += y - shift;
            total_squares += (y - shift).powi(2);
        }

        let mut gains = Vec::with_capacity(n + 1);
        let (mut left, mut left_squares) = (0., 0.);
        for i in 0..=n {
            if i > 0 {
                let d = responses[i - 1] - shift;
                left += d;
                left_squares += d * d;
            }
            gains.push((
                neg_mse(left, left_squares, i),
                neg_mse(total - left, total_squares - left_squares, n - i),
            ));
        }
        gains
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    macro_rules! assert_close {
        ($a : expr, $b: expr, $delta: expr) => {{
            let (a, b, delta) = ($a, $b, $delta);
            assert!(
                (a - b).abs() <= delta,
                "Difference = {:.6} > {:.6} too important between {:.6} and {:.6}",
                a - b,
                delta,
                a,
                b
            );
        }};
    }

    /// Same criterion, without the fast scan.
    struct SlowMSEGain;

    impl GainFunction for SlowMSEGain {
        fn evaluate(&self, responses: &[f64]) -> f64 {
            MSEGain::default().evaluate(responses)
        }
        fn output_leaf_value(&self, responses: &[f64]) -> f64 {
            MSEGain::default().output_leaf_value(responses)
        }
    }

    #[test]
    fn test_evaluate() {
        let gain = MSEGain::default();
        assert_close!(gain.evaluate(&[0., 0., 10., 10.]), -25., 1e-12);
        assert_close!(gain.evaluate(&[3.]), 0., 1e-12);
        assert_close!(gain.evaluate(&[]), 0., 1e-12);
        assert_eq!(gain.evaluate(&[5., 5., 5.]), 0.);
        assert_eq!(gain.evaluate(&[0.1; 7]), 0.);
        assert_eq!(gain.evaluate(&[-1.3; 25]), 0.);
    }

    #[test]
    fn test_output_leaf_value() {
        let gain = MSEGain::default();
        assert_close!(gain.output_leaf_value(&[0., 0., 10., 10.]), 5., 1e-12);
        assert_close!(gain.output_leaf_value(&[-1.5]), -1.5, 1e-12);
    }

    #[test]
    fn test_binary_gains_match_evaluate() {
        let responses = vec![0.1, 0.4, 1.3, 0.2, -3., 12.5, 12.5, 0.];
        let fast = MSEGain::default().binary_gains(&responses);
        let slow = SlowMSEGain.binary_gains(&responses);
        assert_eq!(fast.len(), responses.len() + 1);
        assert_eq!(fast.len(), slow.len());
        for ((fast_left, fast_right), (slow_left, slow_right)) in fast.into_iter().zip(slow) {
            assert_close!(fast_left, slow_left, 1e-9);
            assert_close!(fast_right, slow_right, 1e-9);
        }
    }

    #[test]
    fn test_binary_gains_pure_sides() {
        let gains = MSEGain::default().binary_gains(&[0., 0., 10., 10.]);
        assert_eq!(gains[2], (0., 0.));
        assert!(gains[2].0 >= 0. && gains[2].1 >= 0.);
        assert_close!(gains[0].1, -25., 1e-12);
        assert_close!(gains[4].0, -25., 1e-12);
    }
}
