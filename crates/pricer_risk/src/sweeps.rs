//! Parameter sensitivity sweeps.

use pricer_core::market_data::curves::{SpreadedCurve, YieldCurve};
use pricer_core::types::time::Date;
use pricer_engines::Engine;
use pricer_models::CallableBondSpec;
use serde::{Deserialize, Serialize};
use std::fmt;
use tracing::warn;

/// Which parameter a sweep varies.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SweepKind {
    /// Multiplies every engine's volatility parameter.
    Volatility,
    /// Shifts the discount curve in parallel (decimal).
    RateShift,
    /// Replaces the bond's option-adjusted spread (decimal).
    Oas,
}

impl SweepKind {
    /// The default sweep grid for this parameter.
    pub fn default_points(&self) -> Vec<f64> {
        match self {
            SweepKind::Volatility => vec![0.5, 0.75, 1.0, 1.25, 1.5],
            SweepKind::RateShift => (-4..=4).map(|i| i as f64 * 0.005).collect(),
            SweepKind::Oas => (0..=6).map(|i| i as f64 * 0.005).collect(),
        }
    }
}

impl fmt::Display for SweepKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            SweepKind::Volatility => "volatility",
            SweepKind::RateShift => "rate_shift",
            SweepKind::Oas => "oas",
        };
        write!(f, "{s}")
    }
}

/// One sweep row: the parameter value and the dirty price per engine
/// (`None` when that engine failed at that point).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SweepRow {
    /// Swept parameter value.
    pub parameter: f64,
    /// Dirty prices aligned with [`SweepResult::engines`].
    pub prices: Vec<Option<f64>>,
}

/// A completed sensitivity sweep, wide rows suitable for CSV export.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SweepResult {
    /// The swept parameter.
    pub kind: SweepKind,
    /// Engine names, one column per engine.
    pub engines: Vec<String>,
    /// One row per grid point.
    pub rows: Vec<SweepRow>,
}

/// Runs a sweep of `kind` over `points` for every engine.
///
/// Individual pricing failures are logged and leave a hole in the row
/// instead of aborting the sweep.
pub fn run_sweep<C: YieldCurve<f64> + Sync>(
    kind: SweepKind,
    engines: &[Engine],
    curve: &C,
    bond: &CallableBondSpec,
    valuation: Date,
    points: &[f64],
) -> SweepResult {
    let mut rows = Vec::with_capacity(points.len());
    for &point in points {
        let prices = engines
            .iter()
            .map(|engine| price_at(kind, engine, curve, bond, valuation, point))
            .collect();
        rows.push(SweepRow { parameter: point, prices });
    }
    SweepResult {
        kind,
        engines: engines.iter().map(|e| e.name().to_string()).collect(),
        rows,
    }
}

fn price_at<C: YieldCurve<f64> + Sync>(
    kind: SweepKind,
    engine: &Engine,
    curve: &C,
    bond: &CallableBondSpec,
    valuation: Date,
    point: f64,
) -> Option<f64> {
    let outcome = match kind {
        SweepKind::Volatility => scale_volatility(engine, point)
            .price(curve, bond, valuation),
        SweepKind::RateShift => {
            let shifted = SpreadedCurve::new(curve, point);
            engine.price(&shifted, bond, valuation)
        }
        SweepKind::Oas => match bond.with_oas(point) {
            Ok(spread_bond) => engine.price(curve, &spread_bond, valuation),
            Err(e) => {
                warn!(engine = engine.name(), point, "invalid sweep spread: {e}");
                return None;
            }
        },
    };
    match outcome {
        Ok(estimate) => Some(estimate.dirty),
        Err(e) => {
            warn!(engine = engine.name(), point, "sweep point failed: {e}");
            None
        }
    }
}

/// The engine with its volatility parameter scaled by `multiplier`.
fn scale_volatility(engine: &Engine, multiplier: f64) -> Engine {
    let mut scaled = engine.clone();
    match &mut scaled {
        Engine::HullWhiteLsmc { params, .. } => params.sigma *= multiplier,
        Engine::BlackKarasinskiTree { params, .. } => params.sigma *= multiplier,
        Engine::CirPde { params, .. } => params.sigma *= multiplier,
    }
    scaled
}
