//! Trinomial tree configuration.

use serde::{Deserialize, Serialize};

use crate::error::EngineError;

/// Configuration of the Black-Karasinski tree engine.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct TreeConfig {
    /// Tree layers per year.
    pub steps_per_year: usize,
    /// Hard cap on the lattice half-width. Low mean reversion would
    /// otherwise let the truncation width grow without bound.
    pub j_cap: usize,
}

impl Default for TreeConfig {
    fn default() -> Self {
        Self {
            steps_per_year: 50,
            j_cap: 150,
        }
    }
}

impl TreeConfig {
    /// Rejects configurations the engine cannot build a lattice from.
    ///
    /// # Errors
    ///
    /// `EngineError::Configuration` describing the violated limit.
    pub fn validate(&self) -> Result<(), EngineError> {
        if self.steps_per_year == 0 {
            return Err(EngineError::Configuration {
                what: "steps_per_year must be at least 1".to_string(),
            });
        }
        if self.j_cap < 2 {
            return Err(EngineError::Configuration {
                what: format!("j_cap {} too small for trinomial branching", self.j_cap),
            });
        }
        Ok(())
    }
}
