//! CIR++ curve fit: closed-form CIR bond, forward and deterministic shift.

use pricer_core::market_data::curves::YieldCurve;
use tracing::debug;

use crate::models::CirParams;

use super::{CalibrationError, FittedShift};

/// `h = sqrt(κ² + 2σ²)`, the rate appearing throughout the CIR closed
/// forms.
fn h(params: &CirParams) -> f64 {
    (params.kappa * params.kappa + 2.0 * params.sigma * params.sigma).sqrt()
}

/// Closed-form zero-coupon bond price of the homogeneous CIR factor,
/// `P_x(0,τ) = A(τ)·e^{−B(τ)·x0}`.
pub fn bond_price(params: &CirParams, x0: f64, tau: f64) -> f64 {
    if tau <= 0.0 {
        return 1.0;
    }
    let CirParams { kappa, theta, sigma } = *params;
    let h = h(params);
    let e = (tau * h).exp();
    let denom = 2.0 * h + (kappa + h) * (e - 1.0);
    let a = (2.0 * h * ((kappa + h) * tau / 2.0).exp() / denom)
        .powf(2.0 * kappa * theta / (sigma * sigma));
    let b = 2.0 * (e - 1.0) / denom;
    a * (-b * x0).exp()
}

/// Closed-form instantaneous forward of the homogeneous CIR factor,
/// `f_x(0,t) = −∂_t ln P_x(0,t)`.
pub fn forward(params: &CirParams, x0: f64, t: f64) -> f64 {
    let CirParams { kappa, theta, .. } = *params;
    let h = h(params);
    let e = (t * h).exp();
    let denom = 2.0 * h + (kappa + h) * (e - 1.0);
    2.0 * kappa * theta * (e - 1.0) / denom + x0 * 4.0 * h * h * e / (denom * denom)
}

/// Deterministic shift `φ(t) = f(0,t) − f_x(0,t)` sampled on `grid`.
///
/// The engine prices on the factor `x` (started at `x0`) and discounts at
/// `x + φ(t)`; by construction `exp(−∫φ)·P_x(0,t)` reproduces the input
/// curve exactly, for any admissible `(κ, θ, σ)`. `φ(0) = 0` when `x0`
/// equals the curve's short rate.
///
/// # Errors
///
/// [`CalibrationError::NonMonotoneCurve`] when the curve cannot supply a
/// forward at a grid time.
pub fn fitted_phi<C: YieldCurve<f64>>(
    curve: &C,
    params: &CirParams,
    x0: f64,
    grid: &[f64],
) -> Result<FittedShift, CalibrationError> {
    let shift = FittedShift::sample(grid, |t| {
        let fwd = curve.instantaneous_forward(t)?;
        Ok(fwd - forward(params, x0, t))
    })?;
    debug!(
        points = grid.len(),
        feller = params.feller(),
        "fitted CIR++ shift"
    );
    Ok(shift)
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;
    use pricer_core::market_data::curves::{FlatCurve, YieldCurve};

    fn params() -> CirParams {
        CirParams::new(0.3, 0.04, 0.08).unwrap()
    }

    #[test]
    fn test_bond_price_at_zero_tau() {
        assert_relative_eq!(bond_price(&params(), 0.03, 0.0), 1.0);
    }

    #[test]
    fn test_forward_matches_log_bond_derivative() {
        let p = params();
        let x0 = 0.03;
        let eps = 1e-6;
        for &t in &[0.5, 2.0, 7.0, 15.0] {
            let numeric =
                -(bond_price(&p, x0, t + eps).ln() - bond_price(&p, x0, t - eps).ln()) / (2.0 * eps);
            assert_relative_eq!(forward(&p, x0, t), numeric, epsilon = 1e-7);
        }
    }

    #[test]
    fn test_forward_at_zero_is_x0() {
        let p = params();
        assert_relative_eq!(forward(&p, 0.025, 0.0), 0.025, epsilon = 1e-12);
    }

    #[test]
    fn test_shift_recovers_flat_curve() {
        // exp(-∫φ) · P_x(0,t) must equal the market discount factor; the
        // trapezoid quadrature on a daily grid keeps the error well inside
        // the calibration tolerance.
        let curve = FlatCurve::new(0.04);
        let p = params();
        let x0 = 0.04;
        let horizon = 10.0;
        let n = 3650;
        let grid: Vec<f64> = (0..=n).map(|i| horizon * i as f64 / n as f64).collect();
        let phi = fitted_phi(&curve, &p, x0, &grid).unwrap();

        let mut integral = 0.0;
        for w in grid.windows(2) {
            integral += 0.5 * (phi.value(w[0]) + phi.value(w[1])) * (w[1] - w[0]);
        }
        let recovered = (-integral).exp() * bond_price(&p, x0, horizon);
        let market = curve.discount_factor(horizon).unwrap();
        assert_relative_eq!(recovered, market, epsilon = 1e-6);
    }

    #[test]
    fn test_shift_is_zero_at_origin_when_x0_matches_short_rate() {
        let curve = FlatCurve::new(0.035);
        let phi = fitted_phi(&curve, &params(), 0.035, &[0.0, 1.0]).unwrap();
        assert_relative_eq!(phi.value(0.0), 0.0, epsilon = 1e-9);
    }
}
