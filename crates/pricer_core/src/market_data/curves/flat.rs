//! Flat yield curve implementation.

use super::YieldCurve;
use crate::market_data::error::MarketDataError;
use num_traits::Float;

/// Flat yield curve with a constant continuously compounded rate.
///
/// Used for the end-to-end comparison scenario and throughout the tests.
///
/// # Example
///
/// ```
/// use pricer_core::market_data::curves::{YieldCurve, FlatCurve};
///
/// let curve = FlatCurve::new(0.04_f64);
/// assert_eq!(curve.zero_rate(1.0).unwrap(), 0.04);
/// assert_eq!(curve.zero_rate(10.0).unwrap(), 0.04);
/// ```
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct FlatCurve<T: Float> {
    rate: T,
}

impl<T: Float> FlatCurve<T> {
    /// Constructs a flat curve with the given constant rate.
    #[inline]
    pub fn new(rate: T) -> Self {
        Self { rate }
    }

    /// Returns the constant rate.
    #[inline]
    pub fn rate(&self) -> T {
        self.rate
    }
}

impl<T: Float> YieldCurve<T> for FlatCurve<T> {
    fn discount_factor(&self, t: T) -> Result<T, MarketDataError> {
        if t < T::zero() {
            return Err(MarketDataError::InvalidMaturity {
                t: t.to_f64().unwrap_or(0.0),
            });
        }
        Ok((-self.rate * t).exp())
    }

    fn zero_rate(&self, t: T) -> Result<T, MarketDataError> {
        if t <= T::zero() {
            return Err(MarketDataError::InvalidMaturity {
                t: t.to_f64().unwrap_or(0.0),
            });
        }
        Ok(self.rate)
    }

    fn forward_rate(&self, t1: T, t2: T) -> Result<T, MarketDataError> {
        if t2 <= t1 {
            return Err(MarketDataError::InvalidMaturity {
                t: (t2 - t1).to_f64().unwrap_or(0.0),
            });
        }
        Ok(self.rate)
    }

    fn instantaneous_forward(&self, _t: T) -> Result<T, MarketDataError> {
        Ok(self.rate)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_discount_factor_at_zero() {
        let curve = FlatCurve::new(0.05_f64);
        assert!((curve.discount_factor(0.0).unwrap() - 1.0).abs() < 1e-12);
    }

    #[test]
    fn test_discount_factor_values() {
        let curve = FlatCurve::new(0.05_f64);
        for t in [0.5, 1.0, 2.0, 5.0, 10.0] {
            let df = curve.discount_factor(t).unwrap();
            assert!((df - (-0.05 * t).exp()).abs() < 1e-12, "t={}", t);
        }
    }

    #[test]
    fn test_negative_maturity_rejected() {
        let curve = FlatCurve::new(0.05_f64);
        assert!(curve.discount_factor(-1.0).is_err());
    }

    #[test]
    fn test_negative_rate_allowed() {
        let curve = FlatCurve::new(-0.01_f64);
        let df = curve.discount_factor(1.0).unwrap();
        assert!((df - 0.01_f64.exp()).abs() < 1e-12);
    }

    #[test]
    fn test_forward_and_zero_equal_rate() {
        let curve = FlatCurve::new(0.03_f64);
        assert_eq!(curve.zero_rate(4.0).unwrap(), 0.03);
        assert_eq!(curve.forward_rate(1.0, 2.0).unwrap(), 0.03);
        assert_eq!(curve.instantaneous_forward(7.0).unwrap(), 0.03);
    }
}
