//! Stateless numeric transforms over histogram arrays.

use log::debug;
use ndarray::{
    Array1,
    Array2,
    ArrayView1,
};
use num::ToPrimitive;
use serde::Serialize;

use crate::error::{
    MethCompError,
    Result,
};
use crate::utils::pearson_r;

/// Returns a copy of `counts` with one added to every cell.
///
/// Each call adds another count; applying it twice adds two. Cells already
/// at `u64::MAX` stay there.
pub fn add_pseudo_counts(counts: &Array2<u64>) -> Array2<u64> {
    counts.mapv(|v| v.saturating_add(1))
}

/// Element-wise natural logarithm.
pub fn log_transform<T>(array: &Array2<T>) -> Array2<f64>
where
    T: ToPrimitive + Clone, {
    array.mapv(|v| v.to_f64().unwrap_or(f64::NAN).ln())
}

/// Halves both sides of a square array by averaging each 2×2 block.
///
/// Output cell `(i, j)` is the mean of input cells `(2i, 2j)`,
/// `(2i, 2j+1)`, `(2i+1, 2j)` and `(2i+1, 2j+1)`.
pub fn block_average<T>(array: &Array2<T>) -> Result<Array2<f64>>
where
    T: ToPrimitive, {
    let (rows, cols) = array.dim();
    if rows != cols {
        return Err(MethCompError::InvalidDimension(format!(
            "block averaging needs a square array, got {rows}x{cols}"
        )));
    }
    if rows % 2 != 0 {
        return Err(MethCompError::InvalidDimension(format!(
            "block averaging needs an even side, got {rows}"
        )));
    }

    let half = rows / 2;
    let value = |i: usize, j: usize| array[[i, j]].to_f64().unwrap_or(f64::NAN);
    let averaged = Array2::from_shape_fn((half, half), |(i, j)| {
        let (r, c) = (2 * i, 2 * j);
        (value(r, c) + value(r, c + 1) + value(r + 1, c) + value(r + 1, c + 1)) / 4.0
    });
    debug!("Block averaged {rows}x{cols} to {half}x{half}");
    Ok(averaged)
}

/// Pearson correlation of the nanopore and bisulfite marginals.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct MarginalCorrelation {
    /// Correlation between the two marginals.
    pub coefficient: f64,
    /// Full 2×2 coefficient matrix, nanopore first.
    pub matrix:      [[f64; 2]; 2],
}

fn view_to_vec<T: ToPrimitive + Clone>(view: ArrayView1<T>) -> Vec<f64> {
    view.iter()
        .map(|v| v.to_f64().unwrap_or(f64::NAN))
        .collect()
}

/// Correlates the two read-depth weighted marginals.
pub fn marginal_correlation(
    ont: &Array1<u64>,
    bis: &Array1<u64>,
) -> MarginalCorrelation {
    let ont = view_to_vec(ont.view());
    let bis = view_to_vec(bis.view());
    let coefficient = pearson_r(&ont, &bis);
    let matrix = [
        [pearson_r(&ont, &ont), coefficient],
        [coefficient, pearson_r(&bis, &bis)],
    ];
    MarginalCorrelation {
        coefficient,
        matrix,
    }
}

/// Row-wise Pearson correlation matrix: each row is one variable.
pub fn correlation_matrix<T>(array: &Array2<T>) -> Array2<f64>
where
    T: ToPrimitive + Clone, {
    let rows = array
        .rows()
        .into_iter()
        .map(view_to_vec)
        .collect::<Vec<_>>();
    let n = rows.len();
    let mut matrix = Array2::zeros((n, n));
    for i in 0..n {
        for j in i..n {
            let r = pearson_r(&rows[i], &rows[j]);
            matrix[[i, j]] = r;
            matrix[[j, i]] = r;
        }
    }
    matrix
}

#[cfg(test)]
mod tests {
    use assert_approx_eq::assert_approx_eq;
    use ndarray::array;

    use super::*;

    #[test]
    fn test_pseudo_counts_are_not_idempotent() {
        let zeros = Array2::<u64>::zeros((4, 4));
        let twice = add_pseudo_counts(&add_pseudo_counts(&zeros));
        assert!(twice.iter().all(|&v| v == 2));
        assert!(zeros.iter().all(|&v| v == 0));
    }

    #[test]
    fn test_pseudo_counts_saturate() {
        let smoothed = add_pseudo_counts(&array![[u64::MAX, 0]]);
        assert_eq!(smoothed, array![[u64::MAX, 1]]);
    }

    #[test]
    fn test_log_transform() {
        let logged = log_transform(&array![[1u64, 10], [100, 1]]);
        assert_approx_eq!(logged[[0, 0]], 0.0);
        assert_approx_eq!(logged[[0, 1]], 10f64.ln());
        assert_approx_eq!(logged[[1, 0]], 100f64.ln());
        assert!(log_transform(&array![[0u64]])[[0, 0]].is_infinite());
    }

    #[test]
    fn test_block_average_constant_input() {
        let constant = Array2::from_elem((102, 102), 3.5f64);
        let half = block_average(&constant).unwrap();
        assert_eq!(half.dim(), (51, 51));
        assert!(half.iter().all(|&v| v == 3.5));
    }

    #[test]
    fn test_block_average_values() {
        let input = array![
            [1u64, 2, 0, 0],
            [3, 4, 0, 8],
            [0, 0, 1, 1],
            [0, 4, 1, 1]
        ];
        let half = block_average(&input).unwrap();
        assert_eq!(half, array![[2.5, 2.0], [1.0, 1.0]]);
    }

    #[test]
    fn test_block_average_rejects_odd_and_non_square() {
        let odd = Array2::<f64>::zeros((101, 101));
        assert!(matches!(
            block_average(&odd),
            Err(MethCompError::InvalidDimension(_))
        ));
        let rect = Array2::<f64>::zeros((4, 6));
        assert!(matches!(
            block_average(&rect),
            Err(MethCompError::InvalidDimension(_))
        ));
    }

    #[test]
    fn test_marginal_correlation_matrix_is_symmetric() {
        let ont = Array1::from(vec![1u64, 2, 3, 4, 5]);
        let bis = Array1::from(vec![2u64, 1, 4, 3, 5]);
        let corr = marginal_correlation(&ont, &bis);
        assert_approx_eq!(corr.coefficient, 0.8, 1e-12);
        assert_approx_eq!(corr.matrix[0][0], 1.0);
        assert_approx_eq!(corr.matrix[1][1], 1.0);
        assert_eq!(corr.matrix[0][1], corr.matrix[1][0]);
    }

    #[test]
    fn test_marginal_correlation_empty_bisulfite() {
        let ont = Array1::from(vec![1u64, 2, 3]);
        let bis = Array1::<u64>::zeros(3);
        assert!(marginal_correlation(&ont, &bis).coefficient.is_nan());
    }

    #[test]
    fn test_correlation_matrix_rows() {
        let input = array![[1u64, 2, 3], [2, 4, 6], [3, 2, 1]];
        let corr = correlation_matrix(&input);
        assert_eq!(corr.dim(), (3, 3));
        assert_approx_eq!(corr[[0, 1]], 1.0);
        assert_approx_eq!(corr[[0, 2]], -1.0);
        assert_approx_eq!(corr[[2, 0]], -1.0);
        assert_approx_eq!(corr[[1, 1]], 1.0);
    }
}
