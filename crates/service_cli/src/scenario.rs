//! Scenario file schema and its conversion into domain objects.

use pricer_core::market_data::curves::{DiscountCurve, FlatCurve, YieldCurve};
use pricer_core::market_data::MarketDataError;
use pricer_core::types::time::{Date, DayCount};
use pricer_engines::lsmc::LsmcConfig;
use pricer_engines::pde::PdeConfig;
use pricer_engines::tree::TreeConfig;
use pricer_engines::{Engine, RunSettings};
use pricer_models::instruments::CallTerm;
use pricer_models::schedules::Frequency;
use pricer_models::{
    BlackKarasinskiParams, CallableBondSpec, CirParams, HullWhiteParams,
};
use serde::{Deserialize, Serialize};
use std::path::Path;

use crate::error::CliError;

/// A full pricing scenario as read from TOML.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct Scenario {
    /// Valuation date for all year fractions.
    pub valuation_date: Date,
    /// Discount curve input.
    pub curve: CurveSection,
    /// Bond terms.
    pub bond: BondSection,
    /// Model parameters; each present model contributes one engine.
    pub models: ModelsSection,
    /// Numerical engine knobs.
    #[serde(default)]
    pub engines: EnginesSection,
    /// Validation settings for the comparison.
    #[serde(default)]
    pub validation: ValidationSection,
}

/// Either a flat rate or discount factor pillars.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct CurveSection {
    /// Constant continuously compounded zero rate.
    pub flat_rate: Option<f64>,
    /// Pillar maturities in years, strictly increasing.
    pub times: Option<Vec<f64>>,
    /// Discount factors aligned with `times`.
    pub discount_factors: Option<Vec<f64>>,
}

/// Bond terms as written in the scenario file.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct BondSection {
    /// Face value.
    pub face: f64,
    /// Annual coupon rate (decimal).
    pub coupon_rate: f64,
    /// Coupon frequency.
    pub frequency: Frequency,
    /// Issue date.
    pub issue: Date,
    /// Maturity date.
    pub maturity: Date,
    /// Call schedule, ascending; empty for a straight bond.
    #[serde(default)]
    pub calls: Vec<CallTerm>,
    /// Option-adjusted spread (decimal).
    #[serde(default)]
    pub oas: f64,
    /// Day-count convention.
    #[serde(default = "default_day_count")]
    pub day_count: DayCount,
}

fn default_day_count() -> DayCount {
    DayCount::Thirty360US
}

/// Model parameter sections; absent models are skipped.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct ModelsSection {
    /// Hull-White parameters.
    pub hull_white: Option<HullWhiteParams>,
    /// Black-Karasinski parameters.
    pub black_karasinski: Option<BlackKarasinskiParams>,
    /// CIR parameters.
    pub cir: Option<CirParams>,
}

/// Per-engine numerical configuration, all defaulted.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct EnginesSection {
    /// LSMC knobs.
    pub lsmc: LsmcConfig,
    /// Tree knobs.
    pub tree: TreeConfig,
    /// PDE knobs.
    pub pde: PdeConfig,
}

/// Validation settings for the comparison run.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct ValidationSection {
    /// Optional reference price for the divergence check.
    pub reference_price: Option<f64>,
    /// Relative divergence tolerance.
    pub tolerance: f64,
    /// Curve bump for duration/convexity (decimal).
    pub bump: f64,
}

impl Default for ValidationSection {
    fn default() -> Self {
        let defaults = RunSettings::default();
        Self {
            reference_price: None,
            tolerance: defaults.tolerance,
            bump: defaults.bump,
        }
    }
}

/// A concrete curve built from a [`CurveSection`].
#[derive(Debug, Clone)]
pub enum ScenarioCurve {
    /// Flat zero rate.
    Flat(FlatCurve<f64>),
    /// Interpolated discount factor pillars.
    Pillars(DiscountCurve<f64>),
}

impl YieldCurve<f64> for ScenarioCurve {
    fn discount_factor(&self, t: f64) -> Result<f64, MarketDataError> {
        match self {
            ScenarioCurve::Flat(c) => c.discount_factor(t),
            ScenarioCurve::Pillars(c) => c.discount_factor(t),
        }
    }

    fn zero_rate(&self, t: f64) -> Result<f64, MarketDataError> {
        match self {
            ScenarioCurve::Flat(c) => c.zero_rate(t),
            ScenarioCurve::Pillars(c) => c.zero_rate(t),
        }
    }

    fn forward_rate(&self, t1: f64, t2: f64) -> Result<f64, MarketDataError> {
        match self {
            ScenarioCurve::Flat(c) => c.forward_rate(t1, t2),
            ScenarioCurve::Pillars(c) => c.forward_rate(t1, t2),
        }
    }

    fn instantaneous_forward(&self, t: f64) -> Result<f64, MarketDataError> {
        match self {
            ScenarioCurve::Flat(c) => c.instantaneous_forward(t),
            ScenarioCurve::Pillars(c) => c.instantaneous_forward(t),
        }
    }
}

impl Scenario {
    /// Loads and parses a scenario file.
    ///
    /// # Errors
    ///
    /// `CliError::Io` or `CliError::Parse`.
    pub fn load(path: &Path) -> Result<Self, CliError> {
        let text = std::fs::read_to_string(path)?;
        Ok(toml::from_str(&text)?)
    }

    /// Builds the discount curve.
    ///
    /// # Errors
    ///
    /// `CliError::Scenario` when the section is ambiguous or incomplete;
    /// `CliError::Market` when the pillars are arbitrageable.
    pub fn build_curve(&self) -> Result<ScenarioCurve, CliError> {
        match (&self.curve.flat_rate, &self.curve.times, &self.curve.discount_factors) {
            (Some(rate), None, None) => Ok(ScenarioCurve::Flat(FlatCurve::new(*rate))),
            (None, Some(times), Some(dfs)) => {
                Ok(ScenarioCurve::Pillars(DiscountCurve::new(times, dfs)?))
            }
            (Some(_), _, _) => Err(CliError::Scenario(
                "curve: give either flat_rate or times/discount_factors, not both".to_string(),
            )),
            _ => Err(CliError::Scenario(
                "curve: need flat_rate, or times with discount_factors".to_string(),
            )),
        }
    }

    /// Builds and validates the bond.
    ///
    /// # Errors
    ///
    /// `CliError::Instrument` for inconsistent terms.
    pub fn build_bond(&self) -> Result<CallableBondSpec, CliError> {
        let b = &self.bond;
        Ok(CallableBondSpec::new(
            b.face,
            b.coupon_rate,
            b.frequency,
            b.issue,
            b.maturity,
            b.calls.clone(),
            b.oas,
            b.day_count,
        )?)
    }

    /// Builds one engine per configured model, re-validating parameters.
    ///
    /// # Errors
    ///
    /// `CliError::Model` for inadmissible parameters, `CliError::Scenario`
    /// when no model is configured.
    pub fn build_engines(&self) -> Result<Vec<Engine>, CliError> {
        let mut engines = Vec::new();
        if let Some(p) = &self.models.hull_white {
            engines.push(Engine::HullWhiteLsmc {
                params: HullWhiteParams::new(p.a, p.sigma)?,
                config: self.engines.lsmc,
            });
        }
        if let Some(p) = &self.models.black_karasinski {
            engines.push(Engine::BlackKarasinskiTree {
                params: BlackKarasinskiParams::new(p.a, p.sigma)?,
                config: self.engines.tree,
            });
        }
        if let Some(p) = &self.models.cir {
            engines.push(Engine::CirPde {
                params: CirParams::new(p.kappa, p.theta, p.sigma)?,
                config: self.engines.pde,
            });
        }
        if engines.is_empty() {
            return Err(CliError::Scenario(
                "models: configure at least one of hull_white, black_karasinski, cir".to_string(),
            ));
        }
        Ok(engines)
    }

    /// The run settings of the comparison.
    pub fn run_settings(&self) -> RunSettings {
        RunSettings {
            reference: self.validation.reference_price,
            tolerance: self.validation.tolerance,
            bump: self.validation.bump,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const SAMPLE: &str = r#"
valuation_date = "2025-12-02"

[curve]
flat_rate = 0.04

[bond]
face = 100.0
coupon_rate = 0.05
frequency = "semiannual"
issue = "2025-12-02"
maturity = "2035-12-02"
oas = 0.0073

[[bond.calls]]
date = "2030-12-02"
price = 100.0

[models.hull_white]
a = 0.1
sigma = 0.01

[models.cir]
kappa = 0.3
theta = 0.04
sigma = 0.08

[engines.lsmc]
n_paths = 5000

[validation]
reference_price = 105.0
tolerance = 0.02
"#;

    #[test]
    fn test_parse_and_build() {
        let scenario: Scenario = toml::from_str(SAMPLE).unwrap();
        assert!(matches!(scenario.build_curve().unwrap(), ScenarioCurve::Flat(_)));

        let bond = scenario.build_bond().unwrap();
        assert!(bond.is_callable());
        assert!((bond.oas() - 0.0073).abs() < 1e-15);

        let engines = scenario.build_engines().unwrap();
        assert_eq!(engines.len(), 2);
        assert_eq!(engines[0].name(), "hull_white_lsmc");
        if let Engine::HullWhiteLsmc { config, .. } = &engines[0] {
            assert_eq!(config.n_paths, 5000);
        }

        let settings = scenario.run_settings();
        assert_eq!(settings.reference, Some(105.0));
        assert!((settings.tolerance - 0.02).abs() < 1e-15);
        assert!((settings.bump - 0.001).abs() < 1e-15);
    }

    #[test]
    fn test_pillar_curve() {
        let toml = r#"
valuation_date = "2025-12-02"
[curve]
times = [0.5, 1.0, 5.0, 10.0]
discount_factors = [0.98, 0.96, 0.82, 0.67]
[bond]
face = 100.0
coupon_rate = 0.05
frequency = "annual"
issue = "2025-12-02"
maturity = "2030-12-02"
[models.cir]
kappa = 0.3
theta = 0.04
sigma = 0.08
"#;
        let scenario: Scenario = toml::from_str(toml).unwrap();
        let curve = scenario.build_curve().unwrap();
        assert!(matches!(curve, ScenarioCurve::Pillars(_)));
        assert!((curve.discount_factor(1.0).unwrap() - 0.96).abs() < 1e-12);
    }

    #[test]
    fn test_no_models_rejected() {
        let toml = r#"
valuation_date = "2025-12-02"
[curve]
flat_rate = 0.04
[bond]
face = 100.0
coupon_rate = 0.05
frequency = "annual"
issue = "2025-12-02"
maturity = "2030-12-02"
[models]
"#;
        let scenario: Scenario = toml::from_str(toml).unwrap();
        assert!(matches!(
            scenario.build_engines(),
            Err(CliError::Scenario(_))
        ));
    }

    #[test]
    fn test_bad_model_parameters_rejected() {
        let toml = r#"
valuation_date = "2025-12-02"
[curve]
flat_rate = 0.04
[bond]
face = 100.0
coupon_rate = 0.05
frequency = "annual"
issue = "2025-12-02"
maturity = "2030-12-02"
[models.hull_white]
a = 0.1
sigma = -0.01
"#;
        let scenario: Scenario = toml::from_str(toml).unwrap();
        assert!(matches!(scenario.build_engines(), Err(CliError::Model(_))));
    }
}
