//! CLI error type.

use pricer_core::market_data::MarketDataError;
use pricer_core::types::error::DateError;
use pricer_models::{InstrumentError, ModelError};
use pricer_risk::ReportError;
use thiserror::Error;

/// Anything that can stop a `modelrisk` invocation.
#[derive(Debug, Error)]
pub enum CliError {
    /// Filesystem failure.
    #[error("io: {0}")]
    Io(#[from] std::io::Error),

    /// The scenario file is not valid TOML.
    #[error("scenario parse: {0}")]
    Parse(#[from] toml::de::Error),

    /// The scenario is well-formed but inconsistent.
    #[error("scenario: {0}")]
    Scenario(String),

    /// Invalid date in the scenario.
    #[error("scenario date: {0}")]
    Date(#[from] DateError),

    /// Invalid bond terms in the scenario.
    #[error("scenario bond: {0}")]
    Instrument(#[from] InstrumentError),

    /// Invalid model parameters in the scenario.
    #[error("scenario model: {0}")]
    Model(#[from] ModelError),

    /// Invalid curve data in the scenario.
    #[error("scenario curve: {0}")]
    Market(#[from] MarketDataError),

    /// Report writing failed.
    #[error("report: {0}")]
    Report(#[from] ReportError),

    /// Output serialization failed.
    #[error("output: {0}")]
    Json(#[from] serde_json::Error),
}
