//! Engine output types.

use serde::{Deserialize, Serialize};
use std::fmt;

/// A single price observation from one engine.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct PriceEstimate {
    /// Dirty (invoice) price including accrued interest.
    pub dirty: f64,
    /// Clean price, dirty less accrued at the valuation date.
    pub clean: f64,
    /// Monte Carlo standard error; `None` for deterministic schemes.
    pub std_error: Option<f64>,
}

/// Outcome of the model-risk validation checks on one engine run.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ValidationStatus {
    /// The run completed and is consistent with the reference, or no
    /// reference was supplied.
    Validated,
    /// The run completed but diverges from the reference price beyond the
    /// configured tolerance.
    Divergent,
    /// The engine failed; see the `error` field.
    Failed,
}

impl fmt::Display for ValidationStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            ValidationStatus::Validated => "validated",
            ValidationStatus::Divergent => "divergent",
            ValidationStatus::Failed => "failed",
        };
        write!(f, "{s}")
    }
}

/// Full model-risk output of one engine: price, curve risk and validation
/// verdict. One row of the comparison table.
///
/// Numeric fields are `None` when the engine failed (`status == Failed`)
/// or, for duration/convexity, when only the risk reprices failed (a
/// warning records why).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PricingResult {
    /// Engine identifier ("hull_white_lsmc", "black_karasinski_tree",
    /// "cir_pde").
    pub engine: String,
    /// Model identifier ("hull_white", "black_karasinski", "cir").
    pub model: String,
    /// Dirty price.
    pub price: Option<f64>,
    /// Clean price.
    pub clean_price: Option<f64>,
    /// Effective duration from ±bump curve reprices, in years.
    pub duration: Option<f64>,
    /// Effective convexity from ±bump curve reprices.
    pub convexity: Option<f64>,
    /// Monte Carlo standard error, when the engine is stochastic.
    pub std_error: Option<f64>,
    /// Validation verdict.
    pub status: ValidationStatus,
    /// Non-fatal degeneracies recorded during the run.
    pub warnings: Vec<String>,
    /// Failure description when `status == Failed`.
    pub error: Option<String>,
}

impl PricingResult {
    /// A failed row carrying only the error description.
    pub fn failed(engine: &str, model: &str, error: String) -> Self {
        Self {
            engine: engine.to_string(),
            model: model.to_string(),
            price: None,
            clean_price: None,
            duration: None,
            convexity: None,
            std_error: None,
            status: ValidationStatus::Failed,
            warnings: Vec::new(),
            error: Some(error),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_status_serde_and_display() {
        assert_eq!(ValidationStatus::Divergent.to_string(), "divergent");
        let s: ValidationStatus = serde_json::from_str("\"failed\"").unwrap();
        assert_eq!(s, ValidationStatus::Failed);
    }

    #[test]
    fn test_failed_row() {
        let r = PricingResult::failed("cir_pde", "cir", "boom".to_string());
        assert_eq!(r.status, ValidationStatus::Failed);
        assert!(r.price.is_none());
        assert_eq!(r.error.as_deref(), Some("boom"));
    }

    #[test]
    fn test_result_roundtrip() {
        let r = PricingResult {
            engine: "hull_white_lsmc".into(),
            model: "hull_white".into(),
            price: Some(101.2),
            clean_price: Some(100.9),
            duration: Some(6.3),
            convexity: Some(51.0),
            std_error: Some(0.04),
            status: ValidationStatus::Validated,
            warnings: vec!["regression basis degraded to order 1".into()],
            error: None,
        };
        let json = serde_json::to_string(&r).unwrap();
        let back: PricingResult = serde_json::from_str(&json).unwrap();
        assert_eq!(back, r);
    }
}
