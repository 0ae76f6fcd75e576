//! Black-Karasinski model parameters.

use serde::{Deserialize, Serialize};

use super::ModelError;

/// Parameters of the Black-Karasinski lognormal short-rate model,
/// `d ln r = (θ(t) − a·ln r) dt + σ dW`.
///
/// Rates are positive by construction; `sigma` is the volatility of the
/// *log* rate.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct BlackKarasinskiParams {
    /// Mean-reversion speed of the log rate, `a >= 0`.
    pub a: f64,
    /// Lognormal volatility, `sigma > 0`.
    pub sigma: f64,
}

impl BlackKarasinskiParams {
    /// Validates and constructs Black-Karasinski parameters.
    ///
    /// # Errors
    ///
    /// `ModelError::InvalidParameter` unless `a >= 0` and `sigma > 0`,
    /// both finite.
    pub fn new(a: f64, sigma: f64) -> Result<Self, ModelError> {
        if !(a >= 0.0) || !a.is_finite() {
            return Err(ModelError::invalid("black_karasinski", "a", a, "a >= 0"));
        }
        if !(sigma > 0.0) || !sigma.is_finite() {
            return Err(ModelError::invalid(
                "black_karasinski",
                "sigma",
                sigma,
                "sigma > 0",
            ));
        }
        Ok(Self { a, sigma })
    }
}
