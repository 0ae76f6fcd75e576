//! Parallel model comparison with per-engine failure isolation.

use pricer_core::market_data::curves::YieldCurve;
use pricer_core::types::time::Date;
use pricer_engines::{Engine, PricingResult, RunSettings, ValidationStatus};
use pricer_models::CallableBondSpec;
use rayon::prelude::*;
use std::fmt::Write as _;
use tracing::info;

/// Results of pricing one bond through a set of engines.
///
/// One row per engine, in the order the engines were supplied. A failing
/// engine contributes a `Failed` row and never aborts its siblings.
#[derive(Debug, Clone, PartialEq)]
pub struct ModelComparison {
    results: Vec<PricingResult>,
}

impl ModelComparison {
    /// Runs every engine against the same curve and bond, in parallel.
    pub fn run<C: YieldCurve<f64> + Sync>(
        engines: &[Engine],
        curve: &C,
        bond: &CallableBondSpec,
        valuation: Date,
        settings: &RunSettings,
    ) -> Self {
        let results: Vec<PricingResult> = engines
            .par_iter()
            .map(|engine| engine.run(curve, bond, valuation, settings))
            .collect();
        info!(
            engines = results.len(),
            failed = results
                .iter()
                .filter(|r| r.status == ValidationStatus::Failed)
                .count(),
            "model comparison complete"
        );
        Self { results }
    }

    /// The result rows.
    pub fn results(&self) -> &[PricingResult] {
        &self.results
    }

    /// True when every engine completed and passed the divergence check.
    pub fn all_validated(&self) -> bool {
        self.results
            .iter()
            .all(|r| r.status == ValidationStatus::Validated)
    }

    /// Renders the comparison as a fixed-width text table.
    pub fn render_table(&self) -> String {
        let mut out = String::new();
        let _ = writeln!(
            out,
            "{:<24} {:<18} {:>10} {:>10} {:>9} {:>10} {:>9}  {:<10} {}",
            "engine", "model", "dirty", "clean", "duration", "convexity", "std_err", "status",
            "notes"
        );
        let _ = writeln!(out, "{}", "-".repeat(118));
        for r in &self.results {
            let num = |v: Option<f64>| match v {
                Some(v) => format!("{v:.4}"),
                None => "-".to_string(),
            };
            let notes = match &r.error {
                Some(e) => e.clone(),
                None if r.warnings.is_empty() => String::new(),
                None => r.warnings.join("; "),
            };
            let _ = writeln!(
                out,
                "{:<24} {:<18} {:>10} {:>10} {:>9} {:>10} {:>9}  {:<10} {}",
                r.engine,
                r.model,
                num(r.price),
                num(r.clean_price),
                num(r.duration),
                num(r.convexity),
                num(r.std_error),
                r.status.to_string(),
                notes
            );
        }
        out
    }
}
