//! Direct tridiagonal solver (Thomas algorithm).

use crate::types::SolverError;

/// Factored tridiagonal system, solved directly (no iteration).
///
/// The Crank-Nicolson time-marcher factors its implicit operator once per
/// time step and back-substitutes in O(n). Factorisation rejects zero
/// pivots instead of dividing through them.
///
/// # Example
///
/// ```
/// use pricer_core::math::TridiagonalSolver;
///
/// // [2 1 0; 1 2 1; 0 1 2] x = [4, 8, 8]  =>  x = [1, 2, 3]
/// let solver = TridiagonalSolver::new(
///     vec![1.0, 1.0],
///     vec![2.0, 2.0, 2.0],
///     vec![1.0, 1.0],
/// ).unwrap();
/// let x = solver.solve(&[4.0, 8.0, 8.0]).unwrap();
/// assert!((x[0] - 1.0).abs() < 1e-12);
/// assert!((x[1] - 2.0).abs() < 1e-12);
/// assert!((x[2] - 3.0).abs() < 1e-12);
/// ```
#[derive(Debug, Clone)]
pub struct TridiagonalSolver {
    /// Elimination multipliers, length n-1.
    lower: Vec<f64>,
    /// Modified pivots, length n.
    pivots: Vec<f64>,
    /// Original super-diagonal, length n-1.
    upper: Vec<f64>,
}

impl TridiagonalSolver {
    /// Factors the system given its sub-, main and super-diagonals.
    ///
    /// `sub` and `sup` must have length `diag.len() - 1`.
    ///
    /// # Errors
    ///
    /// - `SolverError::DimensionMismatch` for inconsistent band lengths
    /// - `SolverError::SingularSystem` if a pivot vanishes
    pub fn new(sub: Vec<f64>, diag: Vec<f64>, sup: Vec<f64>) -> Result<Self, SolverError> {
        let n = diag.len();
        if n == 0 || sub.len() != n - 1 || sup.len() != n - 1 {
            return Err(SolverError::DimensionMismatch {
                what: format!(
                    "diag {} with sub {} / sup {}",
                    n,
                    sub.len(),
                    sup.len()
                ),
            });
        }

        let mut lower = vec![0.0; n - 1];
        let mut pivots = vec![0.0; n];
        pivots[0] = diag[0];
        if pivots[0] == 0.0 {
            return Err(SolverError::SingularSystem { row: 0 });
        }
        for i in 1..n {
            lower[i - 1] = sub[i - 1] / pivots[i - 1];
            pivots[i] = diag[i] - lower[i - 1] * sup[i - 1];
            if pivots[i] == 0.0 {
                return Err(SolverError::SingularSystem { row: i });
            }
        }

        Ok(Self {
            lower,
            pivots,
            upper: sup,
        })
    }

    /// System dimension.
    pub fn len(&self) -> usize {
        self.pivots.len()
    }

    /// Returns true for an empty system (never constructed in practice).
    pub fn is_empty(&self) -> bool {
        self.pivots.is_empty()
    }

    /// Solves `A x = rhs` using the stored factorisation.
    ///
    /// # Errors
    ///
    /// `SolverError::DimensionMismatch` if `rhs` has the wrong length.
    pub fn solve(&self, rhs: &[f64]) -> Result<Vec<f64>, SolverError> {
        let n = self.pivots.len();
        if rhs.len() != n {
            return Err(SolverError::DimensionMismatch {
                what: format!("rhs {} for system {}", rhs.len(), n),
            });
        }

        let mut x = rhs.to_vec();
        for i in 1..n {
            x[i] = x[i] - self.lower[i - 1] * x[i - 1];
        }
        x[n - 1] = x[n - 1] / self.pivots[n - 1];
        for i in (0..n - 1).rev() {
            x[i] = (x[i] - self.upper[i] * x[i + 1]) / self.pivots[i];
        }
        Ok(x)
    }
}

/// Multiplies a tridiagonal matrix by a vector: `out = A v`.
///
/// Band layout matches [`TridiagonalSolver::new`]. Used for the explicit
/// half of the Crank-Nicolson step.
pub fn tridiagonal_mul(sub: &[f64], diag: &[f64], sup: &[f64], v: &[f64], out: &mut [f64]) {
    let n = diag.len();
    debug_assert_eq!(sub.len(), n - 1);
    debug_assert_eq!(sup.len(), n - 1);
    debug_assert_eq!(v.len(), n);
    debug_assert_eq!(out.len(), n);

    for i in 0..n {
        let mut acc = diag[i] * v[i];
        if i > 0 {
            acc += sub[i - 1] * v[i - 1];
        }
        if i + 1 < n {
            acc += sup[i] * v[i + 1];
        }
        out[i] = acc;
    }
}
