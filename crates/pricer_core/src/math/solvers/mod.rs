//! Root-finding solvers.

mod brent;
mod config;

pub use brent::BrentSolver;
pub use config::SolverConfig;
