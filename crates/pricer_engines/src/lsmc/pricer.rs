//! LSMC simulation, regression and backward induction.

use pricer_core::market_data::curves::{SpreadedCurve, YieldCurve};
use pricer_core::math::{polyfit, PolyFit};
use pricer_core::types::time::Date;
use pricer_models::calibration::hull_white::fitted_alpha;
use pricer_models::{CallableBondSpec, HullWhiteParams};
use tracing::{debug, info};

use crate::error::EngineError;
use crate::grid::TimeGrid;
use crate::result::PriceEstimate;
use crate::rng::PathRng;

use super::LsmcConfig;

/// Stochastic state captured by a pricing run for common-random-number
/// reprices: the full draw matrix and the regression coefficients at each
/// call step.
#[derive(Debug, Clone)]
pub struct FrozenState {
    draws: Vec<f64>,
    betas: Vec<(usize, PolyFit)>,
}

/// Price plus the frozen state and any non-fatal warnings.
#[derive(Debug, Clone)]
pub struct LsmcOutcome {
    /// The price estimate with its Monte Carlo standard error.
    pub estimate: PriceEstimate,
    /// State to reuse for curve-bumped reprices.
    pub state: FrozenState,
    /// Degeneracies recovered during the run.
    pub warnings: Vec<String>,
}

/// Prices the bond, drawing a fresh normal matrix from the configured seed
/// and fitting the continuation regressions.
///
/// # Errors
///
/// - `Configuration` for an invalid config or a matured bond
/// - `Calibration` when the curve rejects the shift fit
/// - `NumericalInstability` when the regression or the path average
///   produces non-finite values
pub fn price<C: YieldCurve<f64>>(
    curve: &C,
    bond: &CallableBondSpec,
    valuation: Date,
    params: &HullWhiteParams,
    config: &LsmcConfig,
) -> Result<LsmcOutcome, EngineError> {
    config.validate()?;
    let horizon = bond.maturity_time(valuation);
    if horizon <= 0.0 {
        return Err(EngineError::Configuration {
            what: format!("bond matured at valuation (horizon {horizon})"),
        });
    }
    let grid = TimeGrid::new(horizon, config.steps_per_year);
    let draws = PathRng::new(config.seed).normal_matrix(config.n_paths, grid.n_steps);

    let mut betas = Vec::new();
    let mut warnings = Vec::new();
    let estimate = solve(
        curve,
        bond,
        valuation,
        params,
        config,
        grid,
        &draws,
        Regression::Fit(&mut betas, &mut warnings),
    )?;
    info!(
        engine = "hull_white_lsmc",
        dirty = estimate.dirty,
        std_error = estimate.std_error,
        n_paths = config.n_paths,
        "lsmc price"
    );
    Ok(LsmcOutcome {
        estimate,
        state: FrozenState { draws, betas },
        warnings,
    })
}

/// Reprices under a different curve with frozen draws and regression
/// coefficients. The shift `α(t)` is refitted to the new curve; nothing
/// stochastic changes.
///
/// # Errors
///
/// As [`price`], plus `NumericalInstability` if the frozen state does not
/// cover a call step (state from a different bond or grid).
pub fn reprice<C: YieldCurve<f64>>(
    curve: &C,
    bond: &CallableBondSpec,
    valuation: Date,
    params: &HullWhiteParams,
    config: &LsmcConfig,
    state: &FrozenState,
) -> Result<PriceEstimate, EngineError> {
    config.validate()?;
    let horizon = bond.maturity_time(valuation);
    if horizon <= 0.0 {
        return Err(EngineError::Configuration {
            what: format!("bond matured at valuation (horizon {horizon})"),
        });
    }
    let grid = TimeGrid::new(horizon, config.steps_per_year);
    if state.draws.len() != config.n_paths * grid.n_steps {
        return Err(EngineError::Configuration {
            what: "frozen state does not match the simulation grid".to_string(),
        });
    }
    solve(
        curve,
        bond,
        valuation,
        params,
        config,
        grid,
        &state.draws,
        Regression::Frozen(&state.betas),
    )
}

/// Regression handling during backward induction: fit and record, or look
/// up previously fitted coefficients.
enum Regression<'a> {
    Fit(&'a mut Vec<(usize, PolyFit)>, &'a mut Vec<String>),
    Frozen(&'a [(usize, PolyFit)]),
}

#[allow(clippy::too_many_arguments)]
fn solve<C: YieldCurve<f64>>(
    curve: &C,
    bond: &CallableBondSpec,
    valuation: Date,
    params: &HullWhiteParams,
    config: &LsmcConfig,
    grid: TimeGrid,
    draws: &[f64],
    mut regression: Regression<'_>,
) -> Result<PriceEstimate, EngineError> {
    let spread_curve = SpreadedCurve::new(curve, bond.oas());
    let times = grid.times();
    let alpha = fitted_alpha(&spread_curve, params, &times)?;
    let alpha = alpha.values();

    let coupons = grid.bucket_amounts(&bond.coupons(valuation));
    let calls = grid.bucket_levels(&bond.call_times(valuation));

    let (n_paths, n_steps) = (config.n_paths, grid.n_steps);
    let dt = grid.dt;
    let decay = (-params.a * dt).exp();
    let diff_std = if params.a.abs() < 1e-10 {
        params.sigma * dt.sqrt()
    } else {
        params.sigma * ((1.0 - (-2.0 * params.a * dt).exp()) / (2.0 * params.a)).sqrt()
    };

    // Exact Ornstein-Uhlenbeck transition; x starts at zero so the shift
    // alone carries the curve.
    let mut paths = vec![0.0; n_paths * (n_steps + 1)];
    for p in 0..n_paths {
        let row = p * (n_steps + 1);
        for i in 0..n_steps {
            let z = draws[p * n_steps + i];
            paths[row + i + 1] = paths[row + i] * decay + diff_std * z;
        }
    }

    let mut values = vec![bond.face() + coupons[n_steps]; n_paths];
    for i in (0..n_steps).rev() {
        for (p, v) in values.iter_mut().enumerate() {
            let r = paths[p * (n_steps + 1) + i] + alpha[i];
            *v *= (-r * dt).exp();
        }
        if i == 0 {
            break;
        }
        let coupon = coupons[i];
        if coupon != 0.0 {
            for v in values.iter_mut() {
                *v += coupon;
            }
        }
        if let Some(strike) = calls[i] {
            let states: Vec<f64> = (0..n_paths).map(|p| paths[p * (n_steps + 1) + i]).collect();
            let fit = match &mut regression {
                Regression::Fit(betas, warnings) => {
                    let fit = polyfit(&states, &values, config.basis_order).map_err(|e| {
                        EngineError::NumericalInstability { what: e.to_string() }
                    })?;
                    if fit.degraded() {
                        let msg = format!(
                            "regression basis degraded to order {} at t={:.4}",
                            fit.order(),
                            grid.time(i)
                        );
                        debug!("{msg}");
                        warnings.push(msg);
                    }
                    betas.push((i, fit.clone()));
                    fit
                }
                Regression::Frozen(betas) => betas
                    .iter()
                    .find(|(step, _)| *step == i)
                    .map(|(_, fit)| fit.clone())
                    .ok_or_else(|| EngineError::NumericalInstability {
                        what: format!("frozen regression missing call step {i}"),
                    })?,
            };
            // The issuer calls when the fitted continuation (net of the
            // coupon just paid) is worth more than the redemption price.
            for (p, v) in values.iter_mut().enumerate() {
                let continuation = fit.eval(states[p]);
                if continuation - coupon > strike {
                    *v = strike + coupon;
                }
            }
        }
    }

    let n = n_paths as f64;
    let dirty = values.iter().sum::<f64>() / n;
    if !dirty.is_finite() {
        return Err(EngineError::NumericalInstability {
            what: "non-finite path average".to_string(),
        });
    }
    let var = values.iter().map(|v| (v - dirty) * (v - dirty)).sum::<f64>() / (n - 1.0);
    let std_error = (var / n).sqrt();

    Ok(PriceEstimate {
        dirty,
        clean: dirty - bond.accrued(valuation),
        std_error: Some(std_error),
    })
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

    fn params() -> HullWhiteParams {
        HullWhiteParams::new(0.1, 0.01).unwrap()
    }

    fn analytic_price(curve: &FlatCurve<f64>, bond: &CallableBondSpec, valuation: Date) -> f64 {
        bond.cashflows(valuation)
            .iter()
            .map(|cf| cf.amount * curve.discount_factor(cf.time).unwrap())
            .sum()
    }

    #[test]
    fn test_straight_bond_near_analytic() {
        let curve = FlatCurve::new(0.04);
        let bond = bond(vec![]);
        let valuation = d("2025-12-02");
        let config = LsmcConfig { steps_per_year: 50, ..Default::default() };
        let out = price(&curve, &bond, valuation, &params(), &config).unwrap();
        let analytic = analytic_price(&curve, &bond, valuation);
        let tol = 4.0 * out.estimate.std_error.unwrap() + 0.3;
        assert!(
            (out.estimate.dirty - analytic).abs() < tol,
            "mc {} vs analytic {}",
            out.estimate.dirty,
            analytic
        );
    }

    #[test]
    fn test_callable_not_above_straight() {
        let curve = FlatCurve::new(0.04);
        let valuation = d("2025-12-02");
        let straight = bond(vec![]);
        let callable = bond(vec![CallTerm { date: d("2030-12-02"), price: 100.0 }]);
        let config = LsmcConfig::default();
        let p_straight = price(&curve, &straight, valuation, &params(), &config).unwrap();
        let p_callable = price(&curve, &callable, valuation, &params(), &config).unwrap();
        let slack = 3.0 * p_callable.estimate.std_error.unwrap();
        assert!(p_callable.estimate.dirty <= p_straight.estimate.dirty + slack);
    }

    #[test]
    fn test_same_seed_is_deterministic() {
        let curve = FlatCurve::new(0.04);
        let valuation = d("2025-12-02");
        let callable = bond(vec![CallTerm { date: d("2030-12-02"), price: 100.0 }]);
        let config = LsmcConfig { n_paths: 2_000, ..Default::default() };
        let a = price(&curve, &callable, valuation, &params(), &config).unwrap();
        let b = price(&curve, &callable, valuation, &params(), &config).unwrap();
        assert_eq!(a.estimate.dirty, b.estimate.dirty);
    }

    #[test]
    fn test_zero_bump_reprice_is_exact() {
        let curve = FlatCurve::new(0.04);
        let valuation = d("2025-12-02");
        let callable = bond(vec![CallTerm { date: d("2030-12-02"), price: 100.0 }]);
        let config = LsmcConfig { n_paths: 2_000, ..Default::default() };
        let out = price(&curve, &callable, valuation, &params(), &config).unwrap();
        let again = reprice(&curve, &callable, valuation, &params(), &config, &out.state).unwrap();
        assert_eq!(out.estimate.dirty, again.dirty);
    }

    #[test]
    fn test_rejects_thin_config() {
        let curve = FlatCurve::new(0.04);
        let config = LsmcConfig { n_paths: 10, ..Default::default() };
        let r = price(&curve, &bond(vec![]), d("2025-12-02"), &params(), &config);
        assert!(matches!(r, Err(EngineError::Configuration { .. })));
    }
}
