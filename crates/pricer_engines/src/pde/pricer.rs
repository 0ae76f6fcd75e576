//! Crank-Nicolson march and price extraction.

use pricer_core::market_data::curves::{SpreadedCurve, YieldCurve};
use pricer_core::math::tridiagonal::tridiagonal_mul;
use pricer_core::math::TridiagonalSolver;
use pricer_core::types::time::Date;
use pricer_models::calibration::cir::fitted_phi;
use pricer_models::{CalibrationError, CallableBondSpec, CirParams};
use tracing::{info, warn};

use crate::error::EngineError;
use crate::grid::TimeGrid;
use crate::result::PriceEstimate;

use super::PdeConfig;

/// Price plus the warnings collected by the run.
#[derive(Debug, Clone)]
pub struct PdeOutcome {
    /// The deterministic price (no standard error).
    pub estimate: PriceEstimate,
    /// Feller and self-convergence caveats.
    pub warnings: Vec<String>,
}

/// Fits the CIR++ shift to `curve` plus the bond's OAS and prices on the
/// finite-difference grid.
///
/// # Errors
///
/// - `Configuration` for an invalid config, a matured bond, or an initial
///   short rate outside the factor grid
/// - `Calibration` when the shift fit fails
/// - `NumericalInstability` when a tridiagonal solve breaks down or the
///   value surface turns non-finite
pub fn price<C: YieldCurve<f64>>(
    curve: &C,
    bond: &CallableBondSpec,
    valuation: Date,
    params: &CirParams,
    config: &PdeConfig,
) -> Result<PdeOutcome, EngineError> {
    config.validate()?;
    let horizon = bond.maturity_time(valuation);
    if horizon <= 0.0 {
        return Err(EngineError::Configuration {
            what: format!("bond matured at valuation (horizon {horizon})"),
        });
    }
    let spread_curve = SpreadedCurve::new(curve, bond.oas());

    let mut warnings = Vec::new();
    if !params.feller() {
        let msg = CalibrationError::FellerViolation {
            kappa: params.kappa,
            theta: params.theta,
            sigma: params.sigma,
        }
        .to_string();
        warn!("{msg}");
        warnings.push(msg);
    }

    let dirty = solve(&spread_curve, bond, valuation, params, config)?;

    if config.convergence_check {
        let half = PdeConfig {
            grid_size: (config.grid_size / 2).max(16),
            steps_per_year: (config.steps_per_year / 2).max(1),
            convergence_check: false,
            ..*config
        };
        let dirty_half = solve(&spread_curve, bond, valuation, params, &half)?;
        let disagreement = (dirty - dirty_half).abs() / dirty.abs().max(1.0);
        if disagreement > config.convergence_tolerance {
            let msg = format!(
                "self-convergence check failed: full {dirty:.6} vs half-resolution \
                 {dirty_half:.6} (relative {disagreement:.2e})"
            );
            warn!("{msg}");
            warnings.push(msg);
        }
    }

    info!(
        engine = "cir_pde",
        dirty,
        grid_size = config.grid_size,
        "pde price"
    );
    Ok(PdeOutcome {
        estimate: PriceEstimate {
            dirty,
            clean: dirty - bond.accrued(valuation),
            std_error: None,
        },
        warnings,
    })
}

/// One full backward march at the configured resolution.
fn solve<C: YieldCurve<f64>>(
    curve: &C,
    bond: &CallableBondSpec,
    valuation: Date,
    params: &CirParams,
    config: &PdeConfig,
) -> Result<f64, EngineError> {
    let horizon = bond.maturity_time(valuation);
    let grid = TimeGrid::new(horizon, config.steps_per_year);

    let x0 = curve.instantaneous_forward(0.0)?;
    if x0 < config.r_min || x0 > config.r_max {
        return Err(EngineError::Configuration {
            what: format!(
                "initial short rate {x0} outside factor grid [{}, {}]",
                config.r_min, config.r_max
            ),
        });
    }
    let phi = fitted_phi(curve, params, x0, &grid.times())?;
    let phi = phi.values();

    let n = config.grid_size;
    let dx = (config.r_max - config.r_min) / (n - 1) as f64;
    let xs: Vec<f64> = (0..n).map(|i| config.r_min + i as f64 * dx).collect();

    let coupons = grid.bucket_amounts(&bond.coupons(valuation));
    let calls = grid.bucket_levels(&bond.call_times(valuation));

    // Spatial operator bands without the discount diagonal; the `x + φ(t)`
    // term is added per step.
    let mut sub = vec![0.0; n - 1];
    let mut diag0 = vec![0.0; n];
    let mut sup = vec![0.0; n - 1];
    for i in 1..n - 1 {
        let diffusion = 0.5 * params.sigma * params.sigma * xs[i] / (dx * dx);
        let drift = params.kappa * (params.theta - xs[i]) / (2.0 * dx);
        sub[i - 1] = diffusion - drift;
        diag0[i] = -2.0 * diffusion;
        sup[i] = diffusion + drift;
    }
    // Reflecting lower edge: degenerate diffusion folded through the ghost
    // node, one-sided (outgoing) drift.
    let diffusion0 = 0.5 * params.sigma * params.sigma * xs[0] / (dx * dx);
    let drift0 = params.kappa * (params.theta - xs[0]) / dx;
    diag0[0] = -2.0 * diffusion0 - drift0;
    sup[0] = 2.0 * diffusion0 + drift0;
    // Zero-curvature upper edge, one-sided (incoming) drift.
    let drift_top = params.kappa * (params.theta - xs[n - 1]) / dx;
    sub[n - 2] = -drift_top;
    diag0[n - 1] = drift_top;

    let half_dt = 0.5 * grid.dt;
    let instability = |e: pricer_core::types::SolverError| EngineError::NumericalInstability {
        what: e.to_string(),
    };

    let mut values = vec![bond.face() + coupons[grid.n_steps]; n];
    let mut rhs = vec![0.0; n];
    for step in (0..grid.n_steps).rev() {
        // Explicit half at the later time level.
        let sub_e: Vec<f64> = sub.iter().map(|v| half_dt * v).collect();
        let sup_e: Vec<f64> = sup.iter().map(|v| half_dt * v).collect();
        let diag_e: Vec<f64> = diag0
            .iter()
            .zip(&xs)
            .map(|(d, x)| 1.0 + half_dt * (d - (x + phi[step + 1])))
            .collect();
        tridiagonal_mul(&sub_e, &diag_e, &sup_e, &values, &mut rhs);

        // Implicit half at the earlier time level.
        let sub_i: Vec<f64> = sub.iter().map(|v| -half_dt * v).collect();
        let sup_i: Vec<f64> = sup.iter().map(|v| -half_dt * v).collect();
        let diag_i: Vec<f64> = diag0
            .iter()
            .zip(&xs)
            .map(|(d, x)| 1.0 - half_dt * (d - (x + phi[step])))
            .collect();
        let solver = TridiagonalSolver::new(sub_i, diag_i, sup_i).map_err(instability)?;
        values = solver.solve(&rhs).map_err(instability)?;

        if step > 0 {
            let coupon = coupons[step];
            if coupon != 0.0 {
                for v in values.iter_mut() {
                    *v += coupon;
                }
            }
            if let Some(strike) = calls[step] {
                let cap = strike + coupon;
                for v in values.iter_mut() {
                    *v = v.min(cap);
                }
            }
        }
    }

    // The factor starts at x0 since φ(0) = 0 by construction.
    let pos = (x0 - config.r_min) / dx;
    let idx = (pos.floor() as usize).min(n - 2);
    let w = pos - idx as f64;
    let dirty = values[idx] * (1.0 - w) + values[idx + 1] * w;
    if !dirty.is_finite() {
        return Err(EngineError::NumericalInstability {
            what: "non-finite value surface after time march".to_string(),
        });
    }
    Ok(dirty)
}

#[cfg(test)]
mod tests {
    use super::*;
    use pricer_core::market_data::curves::FlatCurve;
    use pricer_core::types::time::DayCount;
    use pricer_models::instruments::CallTerm;
    use pricer_models::schedules::Frequency;

    fn d(s: &str) -> Date {
        Date::parse(s).unwrap()
    }

    fn bond(calls: Vec<CallTerm>) -> CallableBondSpec {
        CallableBondSpec::new(
            100.0,
            0.05,
            Frequency::Semiannual,
            d("2025-12-02"),
            d("2035-12-02"),
            calls,
            0.0,
            DayCount::Thirty360US,
        )
        .unwrap()
    }

    fn params() -> CirParams {
        CirParams::new(0.3, 0.04, 0.08).unwrap()
    }

    #[test]
    fn test_straight_bond_near_analytic() {
        let curve = FlatCurve::new(0.04);
        let valuation = d("2025-12-02");
        let straight = bond(vec![]);
        let out = price(&curve, &straight, valuation, &params(), &PdeConfig::default()).unwrap();
        let analytic: f64 = straight
            .cashflows(valuation)
            .iter()
            .map(|cf| cf.amount * curve.discount_factor(cf.time).unwrap())
            .sum();
        assert!(
            (out.estimate.dirty - analytic).abs() < 0.15,
            "pde {} vs analytic {}",
            out.estimate.dirty,
            analytic
        );
    }

    #[test]
    fn test_default_run_passes_self_convergence() {
        let curve = FlatCurve::new(0.04);
        let out = price(
            &curve,
            &bond(vec![]),
            d("2025-12-02"),
            &params(),
            &PdeConfig::default(),
        )
        .unwrap();
        assert!(out.warnings.iter().all(|w| !w.contains("self-convergence")));
    }

    #[test]
    fn test_callable_below_straight() {
        let curve = FlatCurve::new(0.04);
        let valuation = d("2025-12-02");
        let cfg = PdeConfig::default();
        let p_s = price(&curve, &bond(vec![]), valuation, &params(), &cfg).unwrap();
        let callable = bond(vec![CallTerm { date: d("2030-12-02"), price: 100.0 }]);
        let p_c = price(&curve, &callable, valuation, &params(), &cfg).unwrap();
        assert!(p_c.estimate.dirty <= p_s.estimate.dirty + 1e-9);
        assert!(p_c.estimate.dirty < p_s.estimate.dirty - 0.01);
    }

    #[test]
    fn test_feller_violation_is_warned_not_fatal() {
        let curve = FlatCurve::new(0.04);
        let weak = CirParams::new(0.05, 0.02, 0.15).unwrap();
        assert!(!weak.feller());
        let out = price(&curve, &bond(vec![]), d("2025-12-02"), &weak, &PdeConfig::default())
            .unwrap();
        let expected = CalibrationError::FellerViolation {
            kappa: weak.kappa,
            theta: weak.theta,
            sigma: weak.sigma,
        }
        .to_string();
        assert!(out.warnings.contains(&expected));
    }

    #[test]
    fn test_rate_outside_grid_rejected() {
        let curve = FlatCurve::new(0.04);
        let cfg = PdeConfig { r_min: 0.1, r_max: 0.5, ..Default::default() };
        let r = price(&curve, &bond(vec![]), d("2025-12-02"), &params(), &cfg);
        assert!(matches!(r, Err(EngineError::Configuration { .. })));
    }
}
