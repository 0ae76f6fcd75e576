//! Hull-White one-factor model parameters.

use serde::{Deserialize, Serialize};

use super::ModelError;

/// Parameters of the Hull-White one-factor Gaussian short-rate model,
/// `dr = (θ(t) − a·r) dt + σ dW`.
///
/// The time-dependent drift `θ(t)` is implied by the fitted shift, not
/// stored here; see [`crate::calibration::hull_white`].
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct HullWhiteParams {
    /// Mean-reversion speed `a >= 0`.
    pub a: f64,
    /// Absolute volatility of the short rate, `sigma > 0`.
    pub sigma: f64,
}

impl HullWhiteParams {
    /// Validates and constructs Hull-White parameters.
    ///
    /// # Errors
    ///
    /// `ModelError::InvalidParameter` unless `a >= 0` and `sigma > 0`,
    /// both finite.
    pub fn new(a: f64, sigma: f64) -> Result<Self, ModelError> {
        if !(a >= 0.0) || !a.is_finite() {
            return Err(ModelError::invalid("hull_white", "a", a, "a >= 0"));
        }
        if !(sigma > 0.0) || !sigma.is_finite() {
            return Err(ModelError::invalid("hull_white", "sigma", sigma, "sigma > 0"));
        }
        Ok(Self { a, sigma })
    }

    /// Affine bond exposure `B(t,T) = (1 − e^{−a(T−t)})/a`, with the
    /// `a → 0` limit `T − t`.
    pub fn b_factor(&self, t: f64, maturity: f64) -> f64 {
        let tau = maturity - t;
        if self.a.abs() < 1e-10 {
            tau
        } else {
            (1.0 - (-self.a * tau).exp()) / self.a
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    #[test]
    fn test_validation() {
        assert!(HullWhiteParams::new(0.1, 0.01).is_ok());
        assert!(HullWhiteParams::new(0.0, 0.01).is_ok());
        assert!(HullWhiteParams::new(-0.1, 0.01).is_err());
        assert!(HullWhiteParams::new(0.1, 0.0).is_err());
        assert!(HullWhiteParams::new(0.1, f64::NAN).is_err());
    }

    #[test]
    fn test_b_factor_limit() {
        let p = HullWhiteParams::new(0.0, 0.01).unwrap();
        assert_relative_eq!(p.b_factor(0.0, 5.0), 5.0);

        let p = HullWhiteParams::new(0.1, 0.01).unwrap();
        assert_relative_eq!(p.b_factor(0.0, 5.0), (1.0 - (-0.5f64).exp()) / 0.1);
    }
}
