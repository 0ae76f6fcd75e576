//! Calibration failure taxonomy.

use pricer_core::market_data::MarketDataError;
use thiserror::Error;

/// Errors raised while fitting a model to the input curve.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum CalibrationError {
    /// The input curve violates no-arbitrage (negative implied forwards).
    #[error("input curve is not arbitrage-free: {0}")]
    NonMonotoneCurve(#[from] MarketDataError),

    /// Forward induction produced a negative Arrow-Debreu state price.
    #[error("negative state price at layer {layer}, node {node}")]
    NegativeStatePrice {
        /// Tree layer (time index).
        layer: usize,
        /// Node offset within the layer.
        node: usize,
    },

    /// The layer-drift root could not be bracketed or converged.
    #[error("drift solve failed to bracket at layer {layer}")]
    DriftBracketFailed {
        /// Tree layer (time index).
        layer: usize,
    },

    /// The CIR Feller condition does not hold; the fit proceeds but the
    /// origin is attainable.
    #[error("Feller condition violated: 2*{kappa}*{theta} < {sigma}^2")]
    FellerViolation {
        /// Mean-reversion speed.
        kappa: f64,
        /// Long-run level.
        theta: f64,
        /// Volatility.
        sigma: f64,
    },
}
