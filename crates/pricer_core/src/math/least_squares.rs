//! Polynomial least squares via normal equations.

use crate::types::SolverError;

/// Result of a polynomial least-squares fit.
///
/// Coefficients apply to the internally standardised abscissa; use
/// [`PolyFit::eval`] to evaluate the fitted polynomial at raw `x`. The
/// standardisation keeps the normal equations well conditioned for the
/// near-degenerate regressor ranges a low-volatility simulation produces.
#[derive(Debug, Clone)]
pub struct PolyFit {
    /// Coefficients in the standardised variable, constant term first.
    coeffs: Vec<f64>,
    /// Abscissa mean removed before fitting.
    mean: f64,
    /// Abscissa scale divided out before fitting.
    scale: f64,
    /// True when the requested order was reduced to obtain a stable fit.
    degraded: bool,
}

impl PolyFit {
    /// Evaluates the fitted polynomial at `x`.
    pub fn eval(&self, x: f64) -> f64 {
        let z = (x - self.mean) / self.scale;
        // Horner in the standardised variable.
        let mut acc = 0.0;
        for &c in self.coeffs.iter().rev() {
            acc = acc * z + c;
        }
        acc
    }

    /// Effective polynomial order of the fit.
    pub fn order(&self) -> usize {
        self.coeffs.len() - 1
    }

    /// True when the fit fell back to a lower order than requested.
    pub fn degraded(&self) -> bool {
        self.degraded
    }
}

/// Fits `y ≈ p(x)` with a polynomial of the requested order.
///
/// Solves the normal equations on a standardised abscissa with partial
/// pivoting. A rank-deficient system (for example, all regressors equal)
/// is retried at successively lower orders; the result is flagged
/// [`PolyFit::degraded`] so callers can surface a warning rather than
/// fail.
///
/// # Errors
///
/// `SolverError::DimensionMismatch` when `x` and `y` differ in length or
/// contain fewer points than `order + 1`.
///
/// # Example
///
/// ```
/// use pricer_core::math::polyfit;
///
/// let x: Vec<f64> = (0..50).map(|i| i as f64 * 0.1).collect();
/// let y: Vec<f64> = x.iter().map(|&v| 1.0 + 2.0 * v - 0.5 * v * v).collect();
/// let fit = polyfit(&x, &y, 2).unwrap();
/// assert!(!fit.degraded());
/// assert!((fit.eval(1.7) - (1.0 + 2.0 * 1.7 - 0.5 * 1.7 * 1.7)).abs() < 1e-8);
/// ```
pub fn polyfit(x: &[f64], y: &[f64], order: usize) -> Result<PolyFit, SolverError> {
    if x.len() != y.len() || x.len() < order + 1 {
        return Err(SolverError::DimensionMismatch {
            what: format!("{} points for order {}", x.len().min(y.len()), order),
        });
    }

    let n = x.len() as f64;
    let mean = x.iter().sum::<f64>() / n;
    let var = x.iter().map(|&v| (v - mean) * (v - mean)).sum::<f64>() / n;
    let scale = if var.sqrt() > f64::EPSILON { var.sqrt() } else { 1.0 };

    let mut k = order;
    loop {
        if let Some(coeffs) = try_fit(x, y, mean, scale, k) {
            return Ok(PolyFit {
                coeffs,
                mean,
                scale,
                degraded: k < order,
            });
        }
        if k == 0 {
            // Order zero cannot be deficient unless inputs are non-finite.
            return Err(SolverError::DimensionMismatch {
                what: "non-finite regression inputs".to_string(),
            });
        }
        k -= 1;
    }
}

/// Normal-equation solve at a fixed order; `None` signals rank deficiency.
fn try_fit(x: &[f64], y: &[f64], mean: f64, scale: f64, order: usize) -> Option<Vec<f64>> {
    let m = order + 1;
    let mut gram = vec![vec![0.0; m]; m];
    let mut rhs = vec![0.0; m];

    let mut powers = vec![0.0; m];
    for (&xi, &yi) in x.iter().zip(y.iter()) {
        let z = (xi - mean) / scale;
        powers[0] = 1.0;
        for j in 1..m {
            powers[j] = powers[j - 1] * z;
        }
        for i in 0..m {
            for j in 0..m {
                gram[i][j] += powers[i] * powers[j];
            }
            rhs[i] += powers[i] * yi;
        }
    }

    // Gaussian elimination with partial pivoting; a pivot collapsing
    // relative to the column scale marks the basis as rank deficient.
    let pivot_floor = 1e-10 * x.len() as f64;
    for col in 0..m {
        let (pivot_row, pivot_abs) = (col..m)
            .map(|r| (r, gram[r][col].abs()))
            .max_by(|a, b| a.1.total_cmp(&b.1))?;
        if !pivot_abs.is_finite() || pivot_abs < pivot_floor {
            return None;
        }
        gram.swap(col, pivot_row);
        rhs.swap(col, pivot_row);

        for row in col + 1..m {
            let factor = gram[row][col] / gram[col][col];
            for j in col..m {
                gram[row][j] -= factor * gram[col][j];
            }
            rhs[row] -= factor * rhs[col];
        }
    }

    let mut coeffs = vec![0.0; m];
    for i in (0..m).rev() {
        let mut acc = rhs[i];
        for j in i + 1..m {
            acc -= gram[i][j] * coeffs[j];
        }
        coeffs[i] = acc / gram[i][i];
    }
    coeffs.iter().all(|c| c.is_finite()).then_some(coeffs)
}
