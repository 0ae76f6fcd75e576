//! Yield curve trait definition.

use crate::market_data::error::MarketDataError;
use num_traits::Float;

/// Generic yield curve trait: the term-structure provider interface.
///
/// Implementations are generic over `T: Float`; the pricing engines use
/// `f64`. Curves are immutable once constructed and shared read-only.
///
/// # Contract
///
/// - `discount_factor(t)` returns the discount factor `P(0,t)`
/// - `zero_rate(t)` returns the continuously compounded zero rate
/// - `forward_rate(t1, t2)` returns the forward rate between `t1` and `t2`
/// - `instantaneous_forward(t)` returns `f(0,t)`, approximated over a
///   short interval by default
///
/// # Invariants
///
/// - `P(0,0) = 1`
/// - `P(0,t) > 0` for all `t >= 0`
/// - `P(0,t1) >= P(0,t2)` for `t1 <= t2` (no-arbitrage)
///
/// # Example
///
/// ```
/// use pricer_core::market_data::curves::{YieldCurve, FlatCurve};
///
/// let curve = FlatCurve::new(0.05_f64);
/// let df = curve.discount_factor(1.0).unwrap();
/// assert!((df - 0.951229).abs() < 1e-5);
/// let fwd = curve.instantaneous_forward(2.0).unwrap();
/// assert!((fwd - 0.05).abs() < 1e-8);
/// ```
pub trait YieldCurve<T: Float> {
    /// Returns the discount factor for maturity `t`.
    ///
    /// # Errors
    ///
    /// `MarketDataError::InvalidMaturity` if `t < 0`.
    fn discount_factor(&self, t: T) -> Result<T, MarketDataError>;

    /// Returns the continuously compounded zero rate for maturity `t`.
    ///
    /// Default: `r(t) = -ln(P(0,t)) / t`.
    ///
    /// # Errors
    ///
    /// `MarketDataError::InvalidMaturity` if `t <= 0`.
    fn zero_rate(&self, t: T) -> Result<T, MarketDataError> {
        if t <= T::zero() {
            return Err(MarketDataError::InvalidMaturity {
                t: t.to_f64().unwrap_or(0.0),
            });
        }
        let df = self.discount_factor(t)?;
        Ok(-df.ln() / t)
    }

    /// Returns the forward rate between `t1` and `t2`.
    ///
    /// Default: `f(t1,t2) = -ln(P(0,t2)/P(0,t1)) / (t2 - t1)`.
    ///
    /// # Errors
    ///
    /// `MarketDataError::InvalidMaturity` if `t2 <= t1`.
    fn forward_rate(&self, t1: T, t2: T) -> Result<T, MarketDataError> {
        let dt = t2 - t1;
        if dt <= T::zero() {
            return Err(MarketDataError::InvalidMaturity {
                t: dt.to_f64().unwrap_or(0.0),
            });
        }
        let df1 = self.discount_factor(t1)?;
        let df2 = self.discount_factor(t2)?;
        Ok(-(df2 / df1).ln() / dt)
    }

    /// Returns the instantaneous forward rate `f(0,t)`.
    ///
    /// Default implementation approximates over a 1bp-of-a-year interval,
    /// matching the resolution the drift-fitting routines need.
    fn instantaneous_forward(&self, t: T) -> Result<T, MarketDataError> {
        let h = T::from(1e-4).unwrap_or_else(T::epsilon);
        let t0 = if t < T::zero() { T::zero() } else { t };
        self.forward_rate(t0, t0 + h)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    // Mock implementation exercising the default methods.
    struct MockCurve {
        rate: f64,
    }

    impl YieldCurve<f64> for MockCurve {
        fn discount_factor(&self, t: f64) -> Result<f64, MarketDataError> {
            if t < 0.0 {
                return Err(MarketDataError::InvalidMaturity { t });
            }
            Ok((-self.rate * t).exp())
        }
    }

    #[test]
    fn test_default_zero_rate() {
        let curve = MockCurve { rate: 0.05 };
        let r = curve.zero_rate(1.0).unwrap();
        assert!((r - 0.05).abs() < 1e-10);
    }

    #[test]
    fn test_default_zero_rate_invalid_maturity() {
        let curve = MockCurve { rate: 0.05 };
        assert!(curve.zero_rate(0.0).is_err());
    }

    #[test]
    fn test_default_forward_rate() {
        let curve = MockCurve { rate: 0.05 };
        let f = curve.forward_rate(1.0, 2.0).unwrap();
        assert!((f - 0.05).abs() < 1e-10);
    }

    #[test]
    fn test_default_forward_rate_invalid() {
        let curve = MockCurve { rate: 0.05 };
        assert!(curve.forward_rate(2.0, 1.0).is_err());
    }

    #[test]
    fn test_default_instantaneous_forward() {
        let curve = MockCurve { rate: 0.03 };
        let f = curve.instantaneous_forward(0.0).unwrap();
        assert!((f - 0.03).abs() < 1e-8);
    }
}
