//! Cox-Ingersoll-Ross model parameters.

use serde::{Deserialize, Serialize};

use super::ModelError;

/// Parameters of the Cox-Ingersoll-Ross square-root diffusion,
/// `dx = κ(θ − x) dt + σ√x dW`.
///
/// Used in its shift-extended (CIR++) form: the engine prices on the
/// homogeneous factor `x` and adds a deterministic shift fitted to the
/// input curve.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct CirParams {
    /// Mean-reversion speed, `kappa > 0`.
    pub kappa: f64,
    /// Long-run level of the factor, `theta > 0`.
    pub theta: f64,
    /// Volatility coefficient, `sigma > 0`.
    pub sigma: f64,
}

impl CirParams {
    /// Validates and constructs CIR parameters.
    ///
    /// The Feller condition is *not* enforced here; violating it keeps the
    /// process well defined (the origin becomes attainable) and is reported
    /// by the engine as a warning. See [`CirParams::feller`].
    ///
    /// # Errors
    ///
    /// `ModelError::InvalidParameter` unless all three parameters are
    /// strictly positive and finite.
    pub fn new(kappa: f64, theta: f64, sigma: f64) -> Result<Self, ModelError> {
        if !(kappa > 0.0) || !kappa.is_finite() {
            return Err(ModelError::invalid("cir", "kappa", kappa, "kappa > 0"));
        }
        if !(theta > 0.0) || !theta.is_finite() {
            return Err(ModelError::invalid("cir", "theta", theta, "theta > 0"));
        }
        if !(sigma > 0.0) || !sigma.is_finite() {
            return Err(ModelError::invalid("cir", "sigma", sigma, "sigma > 0"));
        }
        Ok(Self { kappa, theta, sigma })
    }

    /// Whether the Feller condition `2κθ ≥ σ²` holds (origin unattainable).
    pub fn feller(&self) -> bool {
        2.0 * self.kappa * self.theta >= self.sigma * self.sigma
    }
}
