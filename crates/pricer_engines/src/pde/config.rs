//! PDE engine configuration.

use serde::{Deserialize, Serialize};

use crate::error::EngineError;

/// Configuration of the CIR++ Crank-Nicolson engine.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct PdeConfig {
    /// Lower edge of the factor grid.
    pub r_min: f64,
    /// Upper edge of the factor grid; must dominate the factor's reachable
    /// range (the convergence check flags a grid that is too tight).
    pub r_max: f64,
    /// Number of spatial grid nodes.
    pub grid_size: usize,
    /// Time steps per year.
    pub steps_per_year: usize,
    /// Re-solve at half resolution and warn when the two prices disagree
    /// beyond [`PdeConfig::convergence_tolerance`].
    pub convergence_check: bool,
    /// Relative disagreement tolerated by the self-convergence check.
    pub convergence_tolerance: f64,
}

impl Default for PdeConfig {
    fn default() -> Self {
        Self {
            r_min: 0.0,
            r_max: 0.5,
            grid_size: 400,
            steps_per_year: 60,
            convergence_check: true,
            convergence_tolerance: 1e-3,
        }
    }
}

impl PdeConfig {
    /// Rejects configurations the scheme cannot run on.
    ///
    /// # Errors
    ///
    /// `EngineError::Configuration` describing the violated limit.
    pub fn validate(&self) -> Result<(), EngineError> {
        if !(self.r_min >= 0.0) || !(self.r_max > self.r_min) {
            return Err(EngineError::Configuration {
                what: format!("factor grid [{}, {}] is invalid", self.r_min, self.r_max),
            });
        }
        if self.grid_size < 16 {
            return Err(EngineError::Configuration {
                what: format!("grid_size {} too coarse", self.grid_size),
            });
        }
        if self.steps_per_year == 0 {
            return Err(EngineError::Configuration {
                what: "steps_per_year must be at least 1".to_string(),
            });
        }
        if !(self.convergence_tolerance > 0.0) {
            return Err(EngineError::Configuration {
                what: "convergence_tolerance must be positive".to_string(),
            });
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_is_valid() {
        assert!(PdeConfig::default().validate().is_ok());
    }

    #[test]
    fn test_rejects_inverted_grid() {
        let cfg = PdeConfig { r_min: 0.5, r_max: 0.1, ..Default::default() };
        assert!(cfg.validate().is_err());
    }

    #[test]
    fn test_rejects_coarse_grid() {
        let cfg = PdeConfig { grid_size: 4, ..Default::default() };
        assert!(cfg.validate().is_err());
    }
}
