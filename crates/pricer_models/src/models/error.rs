//! Model parameter validation errors.

use thiserror::Error;

/// Errors raised when model parameters are outside their admissible range.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum ModelError {
    /// A parameter violates its admissibility constraint.
    #[error("{model}: parameter {name} = {value} violates '{constraint}'")]
    InvalidParameter {
        /// Model name ("hull_white", "black_karasinski", "cir").
        model: &'static str,
        /// Parameter name.
        name: &'static str,
        /// Rejected value.
        value: f64,
        /// Human-readable constraint.
        constraint: &'static str,
    },
}

impl ModelError {
    pub(crate) fn invalid(
        model: &'static str,
        name: &'static str,
        value: f64,
        constraint: &'static str,
    ) -> Self {
        ModelError::InvalidParameter {
            model,
            name,
            value,
            constraint,
        }
    }
}
