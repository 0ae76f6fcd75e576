//! Market data error types.

use thiserror::Error;

/// Yield curve construction and lookup errors.
///
/// # Examples
///
/// ```
/// use pricer_core::market_data::MarketDataError;
///
/// let err = MarketDataError::InvalidMaturity { t: -1.0 };
/// assert!(format!("{}", err).contains("-1"));
/// ```
#[derive(Error, Debug, Clone, PartialEq)]
pub enum MarketDataError {
    /// Negative time to maturity.
    #[error("Invalid maturity: t = {t}")]
    InvalidMaturity {
        /// The invalid maturity value.
        t: f64,
    },

    /// The supplied discount factors are not positive and non-increasing.
    ///
    /// A discount curve must satisfy `0 < P(0,t2) <= P(0,t1) <= 1` for
    /// `t1 <= t2`; anything else implies negative forward rates beyond what
    /// the input data supports, or corrupt input.
    #[error("Non-monotone discount curve at pillar {index}: P = {df} after {prev}")]
    NonMonotoneDiscount {
        /// Index of the offending pillar.
        index: usize,
        /// Discount factor at the offending pillar.
        df: f64,
        /// Discount factor at the preceding pillar.
        prev: f64,
    },

    /// Pillar times are not strictly increasing.
    #[error("Pillar times not strictly increasing at index {index}")]
    UnsortedPillars {
        /// Index of the offending pillar.
        index: usize,
    },

    /// Not enough pillar points to build the curve.
    #[error("Insufficient data: got {got}, need {need}")]
    InsufficientData {
        /// Number of points provided.
        got: usize,
        /// Minimum number of points required.
        need: usize,
    },
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_invalid_maturity_display() {
        let err = MarketDataError::InvalidMaturity { t: -1.5 };
        assert_eq!(format!("{}", err), "Invalid maturity: t = -1.5");
    }

    #[test]
    fn test_non_monotone_display() {
        let err = MarketDataError::NonMonotoneDiscount {
            index: 3,
            df: 0.99,
            prev: 0.95,
        };
        let msg = format!("{}", err);
        assert!(msg.contains("pillar 3"));
        assert!(msg.contains("0.99"));
    }

    #[test]
    fn test_insufficient_data_display() {
        let err = MarketDataError::InsufficientData { got: 1, need: 2 };
        assert_eq!(format!("{}", err), "Insufficient data: got 1, need 2");
    }

    #[test]
    fn test_error_trait_implementation() {
        let err = MarketDataError::UnsortedPillars { index: 1 };
        let _: &dyn std::error::Error = &err;
    }
}
