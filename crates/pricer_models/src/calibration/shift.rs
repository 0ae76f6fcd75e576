//! Grid-sampled deterministic shift function.

use pricer_core::market_data::MarketDataError;

/// A deterministic shift function sampled on a time grid.
///
/// Fitted shifts (`α(t)` for Hull-White, `φ(t)` for CIR++) are evaluated
/// once on the engine's own grid at calibration time and interpolated
/// linearly in between. The shift is pure with respect to the curve it was
/// fitted to: bumping the curve and refitting yields the bumped shift.
#[derive(Debug, Clone, PartialEq)]
pub struct FittedShift {
    times: Vec<f64>,
    values: Vec<f64>,
}

impl FittedShift {
    /// Samples `f` on `grid` (strictly increasing, starting at or near 0).
    ///
    /// # Errors
    ///
    /// Propagates the first error `f` returns, typically a curve lookup
    /// failure.
    pub fn sample<F>(grid: &[f64], mut f: F) -> Result<Self, MarketDataError>
    where
        F: FnMut(f64) -> Result<f64, MarketDataError>,
    {
        let mut values = Vec::with_capacity(grid.len());
        for &t in grid {
            values.push(f(t)?);
        }
        Ok(Self {
            times: grid.to_vec(),
            values,
        })
    }

    /// Shift value at `t`, linearly interpolated, clamped to the end
    /// samples outside the grid.
    pub fn value(&self, t: f64) -> f64 {
        match self.times.binary_search_by(|x| x.total_cmp(&t)) {
            Ok(i) => self.values[i],
            Err(0) => self.values[0],
            Err(i) if i == self.times.len() => self.values[self.values.len() - 1],
            Err(i) => {
                let (t0, t1) = (self.times[i - 1], self.times[i]);
                let w = (t - t0) / (t1 - t0);
                self.values[i - 1] * (1.0 - w) + self.values[i] * w
            }
        }
    }

    /// The sample grid.
    pub fn times(&self) -> &[f64] {
        &self.times
    }

    /// The sampled shift values, aligned with [`FittedShift::times`].
    pub fn values(&self) -> &[f64] {
        &self.values
    }
}
