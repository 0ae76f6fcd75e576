//! LSMC engine configuration.

use serde::{Deserialize, Serialize};

use crate::error::EngineError;

/// Smallest admissible path count; below this the regression estimates are
/// too noisy to act on.
pub const MIN_PATHS: usize = 1_000;

/// Configuration of the least-squares Monte Carlo engine.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct LsmcConfig {
    /// Number of simulated paths. Must be at least [`MIN_PATHS`].
    pub n_paths: usize,
    /// Time steps per year of the simulation grid.
    pub steps_per_year: usize,
    /// RNG seed; identical seeds reproduce the run exactly.
    pub seed: u64,
    /// Polynomial order of the continuation regression basis (1..=4).
    pub basis_order: usize,
}

impl Default for LsmcConfig {
    fn default() -> Self {
        Self {
            n_paths: 20_000,
            steps_per_year: 12,
            seed: 42,
            basis_order: 2,
        }
    }
}

impl LsmcConfig {
    /// Rejects configurations the engine cannot price with.
    ///
    /// # Errors
    ///
    /// `EngineError::Configuration` describing the first violated limit.
    pub fn validate(&self) -> Result<(), EngineError> {
        if self.n_paths < MIN_PATHS {
            return Err(EngineError::Configuration {
                what: format!("n_paths {} below minimum {}", self.n_paths, MIN_PATHS),
            });
        }
        if self.steps_per_year == 0 {
            return Err(EngineError::Configuration {
                what: "steps_per_year must be at least 1".to_string(),
            });
        }
        if !(1..=4).contains(&self.basis_order) {
            return Err(EngineError::Configuration {
                what: format!("basis_order {} outside 1..=4", self.basis_order),
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
        assert!(LsmcConfig::default().validate().is_ok());
    }

    #[test]
    fn test_rejects_thin_simulation() {
        let cfg = LsmcConfig { n_paths: 100, ..Default::default() };
        assert!(matches!(
            cfg.validate(),
            Err(EngineError::Configuration { .. })
        ));
    }

    #[test]
    fn test_rejects_bad_basis_order() {
        let cfg = LsmcConfig { basis_order: 0, ..Default::default() };
        assert!(cfg.validate().is_err());
        let cfg = LsmcConfig { basis_order: 7, ..Default::default() };
        assert!(cfg.validate().is_err());
    }
}
