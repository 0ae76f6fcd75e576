//! Engine failure taxonomy.

use pricer_core::market_data::MarketDataError;
use pricer_models::CalibrationError;
use thiserror::Error;

/// Errors an engine can raise during calibration or pricing.
///
/// Errors never cross engine boundaries: the comparison runner converts
/// them into a `Failed` status on the owning engine's result row.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum EngineError {
    /// The model could not be fitted to the input curve.
    #[error("calibration: {0}")]
    Calibration(#[from] CalibrationError),

    /// The numerical scheme produced a non-finite or unusable value.
    #[error("numerical instability: {what}")]
    NumericalInstability {
        /// Description of the detected instability.
        what: String,
    },

    /// The engine configuration is inconsistent with the request.
    #[error("configuration: {what}")]
    Configuration {
        /// Description of the rejected configuration.
        what: String,
    },

    /// The input curve rejected a lookup.
    #[error("market data: {0}")]
    Market(#[from] MarketDataError),
}
