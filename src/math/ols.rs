//! Least squares line fit.
//!
//! The linear pipeline reports the fitted line next to the true relationship:
//!
//! ```text
//! minimize Σ (y_i - (a + b x_i))^2
//! ```
//!
//! We build the two-column design matrix `[1, x]` and solve with SVD, which
//! stays well defined for tall matrices (many more rows than columns).

use nalgebra::{DMatrix, DVector};

use crate::domain::LineFit;
use crate::error::AppError;

/// Solve a least squares problem using SVD.
///
/// Returns `None` if the system is too ill-conditioned to solve robustly.
pub fn solve_least_squares(x: &DMatrix<f64>, y: &DVector<f64>) -> Option<DVector<f64>> {
    let svd = x.clone().svd(true, true);

    for &tol in &[1e-12, 1e-10, 1e-8] {
        if let Ok(beta) = svd.solve(y, tol) {
            if beta.iter().all(|v| v.is_finite()) {
                return Some(beta);
            }
        }
    }

    None
}

/// Fit `y = intercept + slope * x`.
///
/// Needs at least two rows and a non-constant x column.
pub fn fit_line(xs: &[f64], ys: &[f64]) -> Result<LineFit, AppError> {
    if xs.len() != ys.len() || xs.len() < 2 {
        return Err(AppError::insufficient(
            "line fit",
            format!("{} x / {} y value(s), need at least 2 pairs", xs.len(), ys.len()),
        ));
    }
    let spread = xs.iter().copied().fold(f64::NEG_INFINITY, f64::max)
        - xs.iter().copied().fold(f64::INFINITY, f64::min);
    if !(spread.is_finite() && spread > 0.0) {
        return Err(AppError::insufficient("line fit", "x column has zero spread"));
    }

    let n = xs.len();
    let design = DMatrix::from_fn(n, 2, |i, j| if j == 0 { 1.0 } else { xs[i] });
    let target = DVector::from_column_slice(ys);

    let beta = solve_least_squares(&design, &target)
        .ok_or_else(|| AppError::insufficient("line fit", "ill-conditioned design matrix"))?;

    Ok(LineFit {
        intercept: beta[0],
        slope: beta[1],
    })
}
