//! Least-squares helpers shared by the regression-based forecasters.
//!
//! Design matrices are `ndarray` arrays; the normal equations are solved with
//! `nalgebra`'s Cholesky factorisation.

use crate::engines::evaluation::EvaluationFailure;
use nalgebra::{DMatrix, DVector};
use ndarray::{Array1, Array2, ArrayView1, ArrayView2, Axis};

/// Affine model `y = intercept + coef . x`
#[derive(Debug, Clone, PartialEq)]
pub struct LinearModel {
    pub intercept: f64,
    pub coef: Array1<f64>,
}

impl LinearModel {
    pub fn predict(&self, x: &[f64]) -> f64 {
        self.intercept + self.coef.dot(&ArrayView1::from(x))
    }
}

/// Ridge regression with an unpenalized intercept
///
/// Columns are centered, `(Xc'Xc + alpha I) coef = Xc'yc` is solved, and the
/// intercept restores the means. `alpha = 0` is ordinary least squares.
pub fn fit_linear(
    x: ArrayView2<f64>,
    y: ArrayView1<f64>,
    alpha: f64,
) -> Result<LinearModel, EvaluationFailure> {
    if x.nrows() != y.len() {
        return Err(EvaluationFailure::ShapeMismatch {
            expected: y.len(),
            actual: x.nrows(),
        });
    }
    let (y_mean, x_mean) = match (y.mean(), x.mean_axis(Axis(0))) {
        (Some(y_mean), Some(x_mean)) => (y_mean, x_mean),
        _ => {
            return Err(EvaluationFailure::InvalidParameters(
                "no rows to fit".to_string(),
            ))
        }
    };

    if x.ncols() == 0 {
        return Ok(LinearModel {
            intercept: y_mean,
            coef: Array1::zeros(0),
        });
    }

    let centered = &x - &x_mean;
    let target = y.mapv(|v| v - y_mean);

    let mut gram = centered.t().dot(&centered);
    gram.diag_mut().mapv_inplace(|d| d + alpha);
    let rhs = centered.t().dot(&target);

    let coef = solve(&gram, &rhs)?;
    let intercept = y_mean - coef.dot(&x_mean);

    Ok(LinearModel { intercept, coef })
}

/// Solve `a x = b` for a symmetric positive-definite `a`
///
/// Only the lower triangle of `a` is read. Near-singular systems are
/// rejected rather than solved into huge coefficients.
pub fn solve(a: &Array2<f64>, b: &Array1<f64>) -> Result<Array1<f64>, EvaluationFailure> {
    let n = b.len();
    if a.nrows() != n || a.ncols() != n {
        return Err(EvaluationFailure::ShapeMismatch {
            expected: n,
            actual: if a.nrows() != n { a.nrows() } else { a.ncols() },
        });
    }

    let scale = a.iter().fold(0.0_f64, |acc, v| acc.max(v.abs())).max(1.0);
    let matrix = DMatrix::from_fn(n, n, |i, j| a[[i, j]]);
    let rhs = DVector::from_iterator(n, b.iter().copied());

    let cholesky = matrix.cholesky().ok_or_else(|| {
        EvaluationFailure::NonConvergence("normal equations not positive definite".to_string())
    })?;

    // Squared diagonal entries of the factor are the elimination pivots
    let smallest_pivot = cholesky
        .l_dirty()
        .diagonal()
        .iter()
        .fold(f64::INFINITY, |acc, d| acc.min(d * d));
    if smallest_pivot <= 1e-12 * scale {
        return Err(EvaluationFailure::NonConvergence(
            "singular normal equations".to_string(),
        ));
    }

    let solution = Array1::from_iter(cholesky.solve(&rhs).iter().copied());
    if solution.iter().any(|v| !v.is_finite()) {
        return Err(EvaluationFailure::NonFinite(
            "least-squares solution".to_string(),
        ));
    }

    Ok(solution)
}
