//! Position of a client within a population sample.

/// Share of `values` at or below `client`, in percent.
///
/// Returns 0 for an empty sample.
pub fn percentile_of(values: &[f64], client: f64) -> f64 {
    if values.is_empty() {
        return 0.0;
    }
    let at_or_below = values.iter().filter(|v| **v <= client).count();
    at_or_below as f64 / values.len() as f64 * 100.0
}

/// Pearson correlation of two index-aligned samples.
///
/// Only the common prefix is used. Returns 0 with fewer than two points
/// or when either sample has zero variance.
pub fn pearson_correlation(x: &[f64], y: &[f64]) -> f64 {
    let n = x.len().min(y.len());
    if n < 2 {
        return 0.0;
    }
    let (x, y) = (&x[..n], &y[..n]);
    let mean_x = x.iter().sum::<f64>() / n as f64;
    let mean_y = y.iter().sum::<f64>() / n as f64;

    let mut cov = 0.0;
    let mut var_x = 0.0;
    let mut var_y = 0.0;
    for (a, b) in x.iter().zip(y) {
        let dx = a - mean_x;
        let dy = b - mean_y;
        cov += dx * dy;
        var_x += dx * dx;
        var_y += dy * dy;
    }

    let denom = (var_x * var_y).sqrt();
    if denom == 0.0 || !denom.is_finite() {
        return 0.0;
    }
    (cov / denom).clamp(-1.0, 1.0)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn percentile_counts_ties_as_below() {
        let values = [1.0, 2.0, 2.0, 3.0];
        assert_eq!(percentile_of(&values, 2.0), 75.0);
        assert_eq!(percentile_of(&values, 0.5), 0.0);
        assert_eq!(percentile_of(&values, 10.0), 100.0);
    }

    #[test]
    fn percentile_of_empty_sample_is_zero() {
        assert_eq!(percentile_of(&[], 1.0), 0.0);
    }

    #[test]
    fn perfectly_linear_samples_correlate() {
        let x = [1.0, 2.0, 3.0, 4.0];
        let y = [2.0, 4.0, 6.0, 8.0];
        assert!((pearson_correlation(&x, &y) - 1.0).abs() < 1e-12);

        let inverse = [8.0, 6.0, 4.0, 2.0];
        assert!((pearson_correlation(&x, &inverse) + 1.0).abs() < 1e-12);
    }

    #[test]
    fn degenerate_samples_have_zero_correlation() {
        assert_eq!(pearson_correlation(&[1.0], &[2.0]), 0.0);
        assert_eq!(pearson_correlation(&[1.0, 1.0, 1.0], &[1.0, 2.0, 3.0]), 0.0);
    }
}
