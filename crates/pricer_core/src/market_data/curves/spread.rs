//! Zero-spreaded curve: base curve plus a constant continuously
//! compounded spread.

use super::YieldCurve;
use crate::market_data::error::MarketDataError;
use num_traits::Float;

/// A curve equal to a borrowed base curve shifted by a constant zero
/// spread.
///
/// Two uses in this workspace:
///
/// - applying the bond's OAS on top of the risk-free curve, and
/// - the ±Δ parallel shifts of the bump-and-reprice risk metrics.
///
/// The base curve is shared read-only; stacking two `SpreadedCurve`s
/// composes the spreads, which is how a bump is applied on top of an OAS.
///
/// # Example
///
/// ```
/// use pricer_core::market_data::curves::{FlatCurve, SpreadedCurve, YieldCurve};
///
/// let base = FlatCurve::new(0.04_f64);
/// let risky = SpreadedCurve::new(&base, 0.0073);
/// assert!((risky.zero_rate(5.0).unwrap() - 0.0473).abs() < 1e-12);
/// ```
#[derive(Debug, Clone, Copy)]
pub struct SpreadedCurve<'a, T: Float, C: YieldCurve<T>> {
    base: &'a C,
    spread: T,
}

impl<'a, T: Float, C: YieldCurve<T>> SpreadedCurve<'a, T, C> {
    /// Wraps `base` with a constant zero spread (decimal, e.g. 10bp = 0.001).
    #[inline]
    pub fn new(base: &'a C, spread: T) -> Self {
        Self { base, spread }
    }

    /// Returns the spread.
    #[inline]
    pub fn spread(&self) -> T {
        self.spread
    }
}

impl<T: Float, C: YieldCurve<T>> YieldCurve<T> for SpreadedCurve<'_, T, C> {
    fn discount_factor(&self, t: T) -> Result<T, MarketDataError> {
        let base_df = self.base.discount_factor(t)?;
        Ok(base_df * (-self.spread * t).exp())
    }

    fn forward_rate(&self, t1: T, t2: T) -> Result<T, MarketDataError> {
        Ok(self.base.forward_rate(t1, t2)? + self.spread)
    }

    fn instantaneous_forward(&self, t: T) -> Result<T, MarketDataError> {
        Ok(self.base.instantaneous_forward(t)? + self.spread)
    }
}
