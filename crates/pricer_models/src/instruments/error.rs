//! Instrument validation errors.

use pricer_core::types::time::Date;
use thiserror::Error;

/// Errors raised when a bond specification is inconsistent.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum InstrumentError {
    /// Face value must be strictly positive.
    #[error("face value must be positive, got {face}")]
    NonPositiveFace {
        /// The rejected face value.
        face: f64,
    },

    /// Coupon rate must be non-negative and finite.
    #[error("invalid coupon rate {rate}")]
    InvalidCouponRate {
        /// The rejected annual coupon rate.
        rate: f64,
    },

    /// Maturity must fall strictly after the issue date.
    #[error("maturity {maturity} is not after issue {issue}")]
    InvalidMaturity {
        /// Issue date.
        issue: Date,
        /// Maturity date.
        maturity: Date,
    },

    /// A call date falls outside the bond's life.
    #[error("call date {date} outside (issue, maturity]")]
    CallDateOutOfRange {
        /// The offending call date.
        date: Date,
    },

    /// Call schedule dates must be strictly increasing.
    #[error("call schedule not strictly increasing at index {index}")]
    UnsortedCallSchedule {
        /// Index of the first out-of-order entry.
        index: usize,
    },

    /// Call prices must be strictly positive.
    #[error("call price must be positive, got {price}")]
    NonPositiveCallPrice {
        /// The rejected call price.
        price: f64,
    },

    /// The option-adjusted spread must be finite.
    #[error("option-adjusted spread {oas} is not finite")]
    NonFiniteSpread {
        /// The rejected spread (decimal).
        oas: f64,
    },
}
