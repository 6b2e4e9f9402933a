//! Pearson correlation of price series aligned by index.

/// Minimum number of paired observations required for a correlation.
pub const MIN_OBSERVATIONS: usize = 2;

/// Pearson correlation coefficient of two series aligned by position.
///
/// Returns `None` if the series differ in length or hold fewer than [`MIN_OBSERVATIONS`]
/// points. A series with zero variance yields `NaN`, otherwise the value lies in `[-1.0, 1.0]`.
pub fn pearson(series_a: &[f64], series_b: &[f64]) -> Option<f64> {
    if series_a.len() != series_b.len() || series_a.len() < MIN_OBSERVATIONS {
        return None;
    }

    let n = series_a.len() as f64;
    let mean_a = series_a.iter().sum::<f64>() / n;
    let mean_b = series_b.iter().sum::<f64>() / n;

    let (cov, var_a, var_b) = series_a.iter().zip(series_b).fold(
        (0.0, 0.0, 0.0),
        |(cov, var_a, var_b), (a, b)| {
            let diff_a = a - mean_a;
            let diff_b = b - mean_b;
            (
                cov + diff_a * diff_b,
                var_a + diff_a * diff_a,
                var_b + diff_b * diff_b,
            )
        },
    );

    // 0.0 / 0.0 is NaN for constant series
    let correlation = cov / (var_a.sqrt() * var_b.sqrt());

    // Rounding can push perfectly (anti)correlated series fractionally outside the range
    Some(if correlation.is_nan() {
        correlation
    } else {
        correlation.clamp(-1.0, 1.0)
    })
}
