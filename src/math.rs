pub fn sum(v: &[f64]) -> f64 {
    let mut o = 0.;
    for e in v.iter() {
        o += *e;
    }
    o
}

/// Mean of a slice. The mean of nothing is 0.
pub fn mean(v: &[f64]) -> f64 {
    if v.is_empty() {
        return 0.;
    }
    sum(v) / (v.len() as f64)
}

pub fn rmse(target: &[f64], yhat: &[f64]) -> f64 {
    let rmse: f64 = yhat
        .iter()
        .zip(target.iter())
        .map(|(&a, &b)| (a - b).powi(2))
        .sum();
    (rmse / target.len() as f64).sqrt()
}
