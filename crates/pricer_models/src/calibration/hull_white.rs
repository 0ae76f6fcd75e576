//! Hull-White curve fit: closed-form fitted shift and affine bond price.

use pricer_core::market_data::curves::YieldCurve;
use tracing::debug;

use crate::models::HullWhiteParams;

use super::{CalibrationError, FittedShift};

/// Fitted shift `α(t) = f(0,t) + σ²/(2a²)(1 − e^{−at})²` sampled on `grid`.
///
/// The simulated short rate is `r(t) = x(t) + α(t)` with `x` a zero-mean
/// Ornstein-Uhlenbeck factor; this choice reproduces the input discount
/// curve exactly. For `a → 0` the convexity term degenerates to `σ²t²/2`.
///
/// # Errors
///
/// [`CalibrationError::NonMonotoneCurve`] when the curve cannot supply a
/// forward at a grid time.
pub fn fitted_alpha<C: YieldCurve<f64>>(
    curve: &C,
    params: &HullWhiteParams,
    grid: &[f64],
) -> Result<FittedShift, CalibrationError> {
    let HullWhiteParams { a, sigma } = *params;
    let shift = FittedShift::sample(grid, |t| {
        let fwd = curve.instantaneous_forward(t)?;
        let convexity = if a.abs() < 1e-10 {
            0.5 * sigma * sigma * t * t
        } else {
            let b = (1.0 - (-a * t).exp()) / a;
            0.5 * sigma * sigma * b * b
        };
        Ok(fwd + convexity)
    })?;
    debug!(
        points = grid.len(),
        horizon = grid.last().copied().unwrap_or(0.0),
        "fitted Hull-White shift"
    );
    Ok(shift)
}

/// Model zero-coupon bond price `P(t,T)` given the factor value `x(t)`.
///
/// Affine reconstruction under the fitted shift:
/// `P(t,T) = P(0,T)/P(0,t) · exp(−B·x − B·c(t) − σ²/(4a)(1−e^{−2at})B²)`
/// where `c(t) = α(t) − f(0,t)` is the convexity part of the shift and
/// `B = B(t,T)`. At `t = 0`, `x = 0` this returns the curve's own discount
/// factor, which is the calibration recovery check.
///
/// # Errors
///
/// [`CalibrationError::NonMonotoneCurve`] on curve lookup failure.
pub fn discount_bond<C: YieldCurve<f64>>(
    curve: &C,
    params: &HullWhiteParams,
    t: f64,
    maturity: f64,
    x: f64,
) -> Result<f64, CalibrationError> {
    let HullWhiteParams { a, sigma } = *params;
    let b = params.b_factor(t, maturity);
    let ratio = curve.discount_factor(maturity)? / curve.discount_factor(t)?;
    let convexity_shift = if a.abs() < 1e-10 {
        0.5 * sigma * sigma * t * t
    } else {
        let bt = (1.0 - (-a * t).exp()) / a;
        0.5 * sigma * sigma * bt * bt
    };
    let variance_term = if a.abs() < 1e-10 {
        0.5 * sigma * sigma * t * b * b
    } else {
        sigma * sigma / (4.0 * a) * (1.0 - (-2.0 * a * t).exp()) * b * b
    };
    Ok(ratio * (-b * (x + convexity_shift) - variance_term).exp())
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;
    use pricer_core::market_data::curves::{DiscountCurve, FlatCurve};
    use proptest::prelude::*;

    #[test]
    fn test_flat_curve_shift_at_zero_is_short_rate() {
        let curve = FlatCurve::new(0.04);
        let params = HullWhiteParams::new(0.1, 0.01).unwrap();
        let shift = fitted_alpha(&curve, &params, &[0.0, 1.0, 5.0]).unwrap();
        assert_relative_eq!(shift.value(0.0), 0.04, epsilon = 1e-9);
        // Convexity adds to the forward at longer horizons.
        assert!(shift.value(5.0) > 0.04);
    }

    #[test]
    fn test_curve_recovery_at_time_zero() {
        let times = [0.5, 1.0, 2.0, 5.0, 10.0];
        let dfs = [0.98, 0.955, 0.91, 0.78, 0.61];
        let curve = DiscountCurve::new(&times, &dfs).unwrap();
        let params = HullWhiteParams::new(0.08, 0.012).unwrap();
        for &maturity in &times {
            let p = discount_bond(&curve, &params, 0.0, maturity, 0.0).unwrap();
            let market = curve.discount_factor(maturity).unwrap();
            assert_relative_eq!(p, market, epsilon = 1e-9);
        }
    }

    #[test]
    fn test_zero_mean_reversion_limit() {
        let curve = FlatCurve::new(0.03);
        let params = HullWhiteParams::new(0.0, 0.01).unwrap();
        let shift = fitted_alpha(&curve, &params, &[0.0, 2.0]).unwrap();
        assert_relative_eq!(shift.value(2.0), 0.03 + 0.5 * 0.01f64.powi(2) * 4.0, epsilon = 1e-7);

        let p = discount_bond(&curve, &params, 0.0, 3.0, 0.0).unwrap();
        assert_relative_eq!(p, (-0.03f64 * 3.0).exp(), epsilon = 1e-9);
    }

    proptest! {
        #[test]
        fn prop_time_zero_recovery_flat(rate in 0.001f64..0.10, a in 0.01f64..0.5,
                                        sigma in 0.001f64..0.05, t in 0.25f64..30.0) {
            let curve = FlatCurve::new(rate);
            let params = HullWhiteParams::new(a, sigma).unwrap();
            let p = discount_bond(&curve, &params, 0.0, t, 0.0).unwrap();
            let market = curve.discount_factor(t).unwrap();
            prop_assert!((p - market).abs() / market < 1e-6);
        }
    }
}
