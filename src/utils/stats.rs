use log::*;
use statrs::statistics::Statistics;

/// Calculates Pearson correlation coefficient between two variables.
///
/// Returns `NaN` when the inputs differ in length, are empty, or either of
/// them has zero variance.
pub fn pearson_r<X, Y>(
    x: &[X],
    y: &[Y],
) -> f64
where
    X: num::ToPrimitive + Copy,
    Y: num::ToPrimitive + Copy, {
    if x.len() != y.len() {
        warn!(
            "Cannot calculate Pearson's r: x length ({}) doesn't match y \
             length ({})",
            x.len(),
            y.len()
        );
        return f64::NAN;
    }

    if x.is_empty() {
        warn!("Cannot calculate Pearson's r: empty arrays");
        return f64::NAN;
    }

    let x_f64 = x
        .iter()
        .map(|x| x.to_f64().unwrap_or(f64::NAN))
        .collect::<Vec<_>>();
    let y_f64 = y
        .iter()
        .map(|y| y.to_f64().unwrap_or(f64::NAN))
        .collect::<Vec<_>>();

    let x_mean = x_f64.iter().mean();
    let y_mean = y_f64.iter().mean();

    // Covariance
    let numerator = x_f64
        .iter()
        .zip(y_f64.iter())
        .map(|(valx, valy)| (valx - x_mean) * (valy - y_mean))
        .sum::<f64>();

    // Product of standard deviations
    let denominator = {
        let x_dev: f64 = x_f64
            .iter()
            .map(|valx| (valx - x_mean).powi(2))
            .sum();
        let y_dev: f64 = y_f64
            .iter()
            .map(|valy| (valy - y_mean).powi(2))
            .sum();
        (x_dev * y_dev).sqrt()
    };

    if denominator == 0.0 {
        warn!("Cannot calculate Pearson's r: zero variance");
        return f64::NAN;
    }

    let r = numerator / denominator;
    debug!("Pearson's r = {:.4}", r);
    r
}

#[cfg(test)]
mod tests {
    use assert_approx_eq::assert_approx_eq;

    use super::*;

    #[test]
    fn test_pearson_perfect_positive() {
        assert_approx_eq!(pearson_r(&[1u64, 2, 3, 4], &[2u64, 4, 6, 8]), 1.0);
    }

    #[test]
    fn test_pearson_perfect_negative() {
        assert_approx_eq!(pearson_r(&[1.0, 2.0, 3.0], &[3.0, 2.0, 1.0]), -1.0);
    }

    #[test]
    fn test_pearson_known_value() {
        // numpy.corrcoef([1, 2, 3, 4, 5], [2, 1, 4, 3, 5])[0, 1] == 0.8
        assert_approx_eq!(
            pearson_r(&[1u32, 2, 3, 4, 5], &[2u32, 1, 4, 3, 5]),
            0.8,
            1e-12
        );
    }

    #[test]
    fn test_pearson_degenerate_inputs() {
        assert!(pearson_r(&[1u64, 1, 1], &[1u64, 2, 3]).is_nan());
        assert!(pearson_r::<u64, u64>(&[], &[]).is_nan());
        assert!(pearson_r(&[1u64, 2], &[1u64, 2, 3]).is_nan());
    }
}
