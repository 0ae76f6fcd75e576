//! Scalar numerical building blocks.

pub mod least_squares;
pub mod solvers;
pub mod tridiagonal;

pub use least_squares::{polyfit, PolyFit};
pub use solvers::{BrentSolver, SolverConfig};
pub use tridiagonal::TridiagonalSolver;
