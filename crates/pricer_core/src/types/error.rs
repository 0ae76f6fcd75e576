//! Foundation error types.

use thiserror::Error;

/// Date construction and parsing errors.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum DateError {
    /// The year/month/day combination does not form a valid calendar date.
    #[error("Invalid date: {year}-{month:02}-{day:02}")]
    InvalidDate {
        /// Year component.
        year: i32,
        /// Month component (1-12).
        month: u32,
        /// Day component (1-31).
        day: u32,
    },

    /// The string could not be parsed as an ISO 8601 date.
    #[error("Date parse error: {0}")]
    ParseError(String),
}

/// Errors raised by the scalar solvers in [`crate::math`].
#[derive(Error, Debug, Clone, PartialEq)]
pub enum SolverError {
    /// The iteration limit was reached before convergence.
    #[error("Failed to converge after {iterations} iterations")]
    MaxIterationsExceeded {
        /// Number of iterations performed.
        iterations: usize,
    },

    /// The supplied bracket does not contain a sign change.
    #[error("No bracket: f({a}) and f({b}) have same sign")]
    NoBracket {
        /// Left bracket endpoint.
        a: f64,
        /// Right bracket endpoint.
        b: f64,
    },

    /// The linear system is singular (zero pivot during elimination).
    #[error("Singular system: zero pivot at row {row}")]
    SingularSystem {
        /// Row index of the vanishing pivot.
        row: usize,
    },

    /// The system dimensions are inconsistent.
    #[error("Dimension mismatch: {what}")]
    DimensionMismatch {
        /// Description of the mismatch.
        what: String,
    },
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_invalid_date_display() {
        let err = DateError::InvalidDate {
            year: 2024,
            month: 2,
            day: 30,
        };
        assert_eq!(format!("{}", err), "Invalid date: 2024-02-30");
    }

    #[test]
    fn test_no_bracket_display() {
        let err = SolverError::NoBracket { a: 0.0, b: 1.0 };
        assert!(format!("{}", err).contains("same sign"));
    }

    #[test]
    fn test_singular_system_display() {
        let err = SolverError::SingularSystem { row: 3 };
        assert!(format!("{}", err).contains("row 3"));
    }

    #[test]
    fn test_error_trait_implementation() {
        let err = SolverError::MaxIterationsExceeded { iterations: 100 };
        let _: &dyn std::error::Error = &err;
    }
}
