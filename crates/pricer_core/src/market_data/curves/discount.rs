//! Discount-factor pillar curve with log-linear interpolation.

use super::YieldCurve;
use crate::market_data::error::MarketDataError;
use num_traits::Float;

/// Yield curve built from discount-factor pillars.
///
/// Stores `(t, P(0,t))` pillars and interpolates `ln P(0,t)` linearly
/// between them, which is equivalent to assuming a constant forward rate
/// within each interval. An implicit `(0, 1)` anchor is always present.
/// Beyond the last pillar the final forward rate is extrapolated flat.
///
/// Construction validates the no-arbitrage shape of the input: pillar
/// times must be strictly increasing and discount factors must be in
/// `(0, 1]` and non-increasing. A non-monotone input is rejected with
/// [`MarketDataError::NonMonotoneDiscount`]; this is the hard failure mode
/// behind the Hull-White calibration contract.
///
/// # Example
///
/// ```
/// use pricer_core::market_data::curves::{DiscountCurve, YieldCurve};
///
/// let curve = DiscountCurve::new(
///     &[1.0_f64, 2.0, 5.0, 10.0],
///     &[0.96, 0.92, 0.81, 0.66],
/// ).unwrap();
///
/// assert!((curve.discount_factor(0.0).unwrap() - 1.0).abs() < 1e-12);
/// assert!((curve.discount_factor(2.0).unwrap() - 0.92).abs() < 1e-12);
/// // Interpolated point sits between its neighbours
/// let df = curve.discount_factor(3.0).unwrap();
/// assert!(df < 0.92 && df > 0.81);
/// ```
#[derive(Debug, Clone)]
pub struct DiscountCurve<T: Float> {
    /// Pillar times, strictly increasing, first > 0.
    times: Vec<T>,
    /// ln P(0,t) at each pillar, non-increasing from 0.
    log_dfs: Vec<T>,
}

impl<T: Float> DiscountCurve<T> {
    /// Builds a discount curve from pillar times and discount factors.
    ///
    /// # Errors
    ///
    /// - `InsufficientData` with fewer than 2 pillars
    /// - `UnsortedPillars` if times are not strictly increasing or the
    ///   first time is not positive
    /// - `NonMonotoneDiscount` if factors leave `(0, 1]` or increase
    pub fn new(times: &[T], dfs: &[T]) -> Result<Self, MarketDataError> {
        if times.len() < 2 || times.len() != dfs.len() {
            return Err(MarketDataError::InsufficientData {
                got: times.len().min(dfs.len()),
                need: 2,
            });
        }

        let mut prev_t = T::zero();
        let mut prev_df = T::one();
        for (i, (&t, &df)) in times.iter().zip(dfs.iter()).enumerate() {
            if t <= prev_t {
                return Err(MarketDataError::UnsortedPillars { index: i });
            }
            if df <= T::zero() || df > prev_df {
                return Err(MarketDataError::NonMonotoneDiscount {
                    index: i,
                    df: df.to_f64().unwrap_or(f64::NAN),
                    prev: prev_df.to_f64().unwrap_or(f64::NAN),
                });
            }
            prev_t = t;
            prev_df = df;
        }

        Ok(Self {
            times: times.to_vec(),
            log_dfs: dfs.iter().map(|df| df.ln()).collect(),
        })
    }

    /// Returns the pillar times.
    pub fn times(&self) -> &[T] {
        &self.times
    }

    /// Linear interpolation of ln P(0,t); flat-forward extrapolation.
    fn log_df(&self, t: T) -> T {
        let n = self.times.len();

        // Before the first pillar: interpolate against the (0, 1) anchor.
        if t <= self.times[0] {
            return self.log_dfs[0] * (t / self.times[0]);
        }

        // Beyond the last pillar: extrapolate the final forward rate.
        if t >= self.times[n - 1] {
            let fwd = (self.log_dfs[n - 1] - self.log_dfs[n - 2])
                / (self.times[n - 1] - self.times[n - 2]);
            return self.log_dfs[n - 1] + fwd * (t - self.times[n - 1]);
        }

        // Bracketed interval search.
        let mut lo = 0;
        let mut hi = n - 1;
        while hi - lo > 1 {
            let mid = (lo + hi) / 2;
            if self.times[mid] <= t {
                lo = mid;
            } else {
                hi = mid;
            }
        }
        let w = (t - self.times[lo]) / (self.times[hi] - self.times[lo]);
        self.log_dfs[lo] + w * (self.log_dfs[hi] - self.log_dfs[lo])
    }
}

impl<T: Float> YieldCurve<T> for DiscountCurve<T> {
    fn discount_factor(&self, t: T) -> Result<T, MarketDataError> {
        if t < T::zero() {
            return Err(MarketDataError::InvalidMaturity {
                t: t.to_f64().unwrap_or(0.0),
            });
        }
        if t == T::zero() {
            return Ok(T::one());
        }
        Ok(self.log_df(t).exp())
    }
}
