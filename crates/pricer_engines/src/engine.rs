//! Common engine surface: one sum type, one result shape.

use pricer_core::market_data::curves::{SpreadedCurve, YieldCurve};
use pricer_core::types::time::Date;
use pricer_models::{
    BlackKarasinskiParams, CallableBondSpec, CirParams, HullWhiteParams, ShortRateModel,
};
use tracing::warn;

use crate::error::EngineError;
use crate::lsmc::{self, LsmcConfig};
use crate::pde::{self, PdeConfig};
use crate::result::{PriceEstimate, PricingResult, ValidationStatus};
use crate::tree::{self, TreeConfig};

/// Settings of a full model-risk run.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct RunSettings {
    /// Optional reference price for the divergence check.
    pub reference: Option<f64>,
    /// Relative tolerance against the reference (default 1%).
    pub tolerance: f64,
    /// Parallel curve bump for duration/convexity (default 10bp).
    pub bump: f64,
}

impl Default for RunSettings {
    fn default() -> Self {
        Self {
            reference: None,
            tolerance: 0.01,
            bump: 0.001,
        }
    }
}

/// A pricing engine: model parameters plus numerical configuration.
///
/// Static dispatch over the three supported engines. [`Engine::price`]
/// returns a single estimate; [`Engine::run`] adds frozen-state risk
/// metrics and the validation verdict and never returns an error (a
/// failure becomes a `Failed` result row).
#[derive(Debug, Clone, PartialEq)]
pub enum Engine {
    /// Hull-White one-factor via least-squares Monte Carlo.
    HullWhiteLsmc {
        /// Model parameters.
        params: HullWhiteParams,
        /// Simulation configuration.
        config: LsmcConfig,
    },
    /// Black-Karasinski on a recombining trinomial tree.
    BlackKarasinskiTree {
        /// Model parameters.
        params: BlackKarasinskiParams,
        /// Lattice configuration.
        config: TreeConfig,
    },
    /// Shift-extended CIR via Crank-Nicolson finite differences.
    CirPde {
        /// Model parameters.
        params: CirParams,
        /// Grid configuration.
        config: PdeConfig,
    },
}

impl Engine {
    /// Stable engine identifier, as used in reports and logs.
    pub fn name(&self) -> &'static str {
        match self {
            Engine::HullWhiteLsmc { .. } => "hull_white_lsmc",
            Engine::BlackKarasinskiTree { .. } => "black_karasinski_tree",
            Engine::CirPde { .. } => "cir_pde",
        }
    }

    /// The short-rate model this engine prices under.
    pub fn model(&self) -> ShortRateModel {
        match self {
            Engine::HullWhiteLsmc { params, .. } => ShortRateModel::HullWhite(*params),
            Engine::BlackKarasinskiTree { params, .. } => ShortRateModel::BlackKarasinski(*params),
            Engine::CirPde { params, .. } => ShortRateModel::Cir(*params),
        }
    }

    /// Prices the bond on `curve` plus the bond's OAS.
    ///
    /// # Errors
    ///
    /// Any [`EngineError`] of the underlying engine.
    pub fn price<C: YieldCurve<f64> + Sync>(
        &self,
        curve: &C,
        bond: &CallableBondSpec,
        valuation: Date,
    ) -> Result<PriceEstimate, EngineError> {
        match self {
            Engine::HullWhiteLsmc { params, config } => {
                Ok(lsmc::price(curve, bond, valuation, params, config)?.estimate)
            }
            Engine::BlackKarasinskiTree { params, config } => {
                Ok(tree::price(curve, bond, valuation, params, config)?.estimate)
            }
            Engine::CirPde { params, config } => {
                Ok(pde::price(curve, bond, valuation, params, config)?.estimate)
            }
        }
    }

    /// Full model-risk run: price, effective duration/convexity from ±bump
    /// reprices with frozen numerical state, and the divergence check
    /// against the optional reference.
    ///
    /// Never fails: errors become a `Failed` result row for this engine
    /// only.
    pub fn run<C: YieldCurve<f64> + Sync>(
        &self,
        curve: &C,
        bond: &CallableBondSpec,
        valuation: Date,
        settings: &RunSettings,
    ) -> PricingResult {
        let model = self.model();
        let (estimate, mut warnings, up, down) = match self.base_and_bumps(
            curve, bond, valuation, settings.bump,
        ) {
            Ok(parts) => parts,
            Err(e) => return PricingResult::failed(self.name(), model.name(), e.to_string()),
        };

        let (duration, convexity) = match (up, down) {
            (Ok(up), Ok(down)) => {
                let p0 = estimate.dirty;
                let delta = settings.bump;
                let duration = (down.dirty - up.dirty) / (2.0 * p0 * delta);
                let convexity = (up.dirty + down.dirty - 2.0 * p0) / (p0 * delta * delta);
                (Some(duration), Some(convexity))
            }
            (up, down) => {
                for e in [up.err(), down.err()].into_iter().flatten() {
                    let msg = format!("risk reprice failed: {e}");
                    warn!(engine = self.name(), "{msg}");
                    warnings.push(msg);
                }
                (None, None)
            }
        };

        let status = match settings.reference {
            Some(reference) if reference != 0.0 => {
                let divergence = (estimate.dirty - reference).abs() / reference.abs();
                if divergence > settings.tolerance {
                    ValidationStatus::Divergent
                } else {
                    ValidationStatus::Validated
                }
            }
            _ => ValidationStatus::Validated,
        };

        PricingResult {
            engine: self.name().to_string(),
            model: model.name().to_string(),
            price: Some(estimate.dirty),
            clean_price: Some(estimate.clean),
            duration,
            convexity,
            std_error: estimate.std_error,
            status,
            warnings,
            error: None,
        }
    }

    /// Base price plus the two bumped reprices, run in parallel. The bump
    /// reprices reuse the engine's frozen numerical state: the LSMC draws
    /// and regression coefficients, the lattice/grid geometry of the
    /// deterministic schemes.
    #[allow(clippy::type_complexity)]
    fn base_and_bumps<C: YieldCurve<f64> + Sync>(
        &self,
        curve: &C,
        bond: &CallableBondSpec,
        valuation: Date,
        bump: f64,
    ) -> Result<
        (
            PriceEstimate,
            Vec<String>,
            Result<PriceEstimate, EngineError>,
            Result<PriceEstimate, EngineError>,
        ),
        EngineError,
    > {
        let up_curve = SpreadedCurve::new(curve, bump);
        let down_curve = SpreadedCurve::new(curve, -bump);
        match self {
            Engine::HullWhiteLsmc { params, config } => {
                let out = lsmc::price(curve, bond, valuation, params, config)?;
                let state = &out.state;
                let (up, down) = rayon::join(
                    || lsmc::reprice(&up_curve, bond, valuation, params, config, state),
                    || lsmc::reprice(&down_curve, bond, valuation, params, config, state),
                );
                Ok((out.estimate, out.warnings, up, down))
            }
            Engine::BlackKarasinskiTree { params, config } => {
                let out = tree::price(curve, bond, valuation, params, config)?;
                let (up, down) = rayon::join(
                    || tree::price(&up_curve, bond, valuation, params, config).map(|o| o.estimate),
                    || {
                        tree::price(&down_curve, bond, valuation, params, config)
                            .map(|o| o.estimate)
                    },
                );
                Ok((out.estimate, out.warnings, up, down))
            }
            Engine::CirPde { params, config } => {
                let out = pde::price(curve, bond, valuation, params, config)?;
                // Bump reprices skip the convergence re-solve.
                let bump_config = PdeConfig {
                    convergence_check: false,
                    ..*config
                };
                let (up, down) = rayon::join(
                    || {
                        pde::price(&up_curve, bond, valuation, params, &bump_config)
                            .map(|o| o.estimate)
                    },
                    || {
                        pde::price(&down_curve, bond, valuation, params, &bump_config)
                            .map(|o| o.estimate)
                    },
                );
                Ok((out.estimate, out.warnings, up, down))
            }
        }
    }
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

    fn callable() -> CallableBondSpec {
        CallableBondSpec::new(
            100.0,
            0.05,
            Frequency::Semiannual,
            d("2025-12-02"),
            d("2035-12-02"),
            vec![CallTerm { date: d("2030-12-02"), price: 100.0 }],
            0.0,
            DayCount::Thirty360US,
        )
        .unwrap()
    }

    fn engines() -> Vec<Engine> {
        vec![
            Engine::HullWhiteLsmc {
                params: HullWhiteParams::new(0.1, 0.01).unwrap(),
                config: LsmcConfig { n_paths: 4_000, ..Default::default() },
            },
            Engine::BlackKarasinskiTree {
                params: BlackKarasinskiParams::new(0.1, 0.2).unwrap(),
                config: TreeConfig::default(),
            },
            Engine::CirPde {
                params: CirParams::new(0.3, 0.04, 0.08).unwrap(),
                config: PdeConfig::default(),
            },
        ]
    }

    #[test]
    fn test_run_produces_positive_duration() {
        let curve = FlatCurve::new(0.04);
        let bond = callable();
        for engine in engines() {
            let result = engine.run(&curve, &bond, d("2025-12-02"), &RunSettings::default());
            assert_eq!(result.status, ValidationStatus::Validated, "{}", engine.name());
            let duration = result.duration.unwrap();
            assert!(
                duration > 0.0 && duration < 10.0,
                "{}: duration {duration}",
                engine.name()
            );
            // Callable convexity can go negative; it must at least be finite.
            assert!(result.convexity.unwrap().is_finite());
        }
    }

    #[test]
    fn test_divergent_reference_flags_status() {
        let curve = FlatCurve::new(0.04);
        let bond = callable();
        let engine = &engines()[1];
        let settings = RunSettings { reference: Some(50.0), ..Default::default() };
        let result = engine.run(&curve, &bond, d("2025-12-02"), &settings);
        assert_eq!(result.status, ValidationStatus::Divergent);
    }

    #[test]
    fn test_failure_is_isolated_into_result() {
        let curve = FlatCurve::new(0.04);
        let bond = callable();
        let broken = Engine::HullWhiteLsmc {
            params: HullWhiteParams::new(0.1, 0.01).unwrap(),
            config: LsmcConfig { n_paths: 10, ..Default::default() },
        };
        let result = broken.run(&curve, &bond, d("2025-12-02"), &RunSettings::default());
        assert_eq!(result.status, ValidationStatus::Failed);
        assert!(result.price.is_none());
        assert!(result.error.unwrap().contains("n_paths"));
    }

    #[test]
    fn test_engine_names_and_models_align() {
        for engine in engines() {
            match engine.model() {
                ShortRateModel::HullWhite(_) => assert_eq!(engine.name(), "hull_white_lsmc"),
                ShortRateModel::BlackKarasinski(_) => {
                    assert_eq!(engine.name(), "black_karasinski_tree")
                }
                ShortRateModel::Cir(_) => assert_eq!(engine.name(), "cir_pde"),
            }
        }
    }
}
