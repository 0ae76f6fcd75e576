//! Bump-and-reprice curve risk metrics.

use pricer_engines::EngineError;

/// Default parallel curve bump: 10bp.
pub const DEFAULT_BUMP: f64 = 0.001;

/// Effective duration and convexity from symmetric curve bumps.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct EffectiveMetrics {
    /// `(P₋ − P₊) / (2 · P₀ · Δ)`, in years.
    pub duration: f64,
    /// `(P₊ + P₋ − 2P₀) / (P₀ · Δ²)`.
    pub convexity: f64,
}

/// Computes effective metrics from any pricing function.
///
/// `reprice` receives the signed parallel shift and returns the price
/// under that shift; the up and down legs run in parallel. The caller is
/// responsible for making the two legs comparable (frozen draws for a
/// Monte Carlo pricer).
///
/// # Errors
///
/// Propagates the first failing reprice.
pub fn effective_metrics<F>(
    base: f64,
    bump: f64,
    reprice: F,
) -> Result<EffectiveMetrics, EngineError>
where
    F: Fn(f64) -> Result<f64, EngineError> + Sync,
{
    let (up, down) = rayon::join(|| reprice(bump), || reprice(-bump));
    let (up, down) = (up?, down?);
    Ok(EffectiveMetrics {
        duration: (down - up) / (2.0 * base * bump),
        convexity: (up + down - 2.0 * base) / (base * bump * bump),
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    #[test]
    fn test_exponential_price_recovers_known_metrics() {
        // P(s) = 100·e^{−5s}: duration 5, convexity 25.
        let base = 100.0;
        let metrics = effective_metrics(base, 0.0001, |s| Ok(100.0 * (-5.0 * s).exp())).unwrap();
        assert_relative_eq!(metrics.duration, 5.0, epsilon = 1e-6);
        assert_relative_eq!(metrics.convexity, 25.0, epsilon = 1e-2);
    }

    #[test]
    fn test_reprice_failure_propagates() {
        let r = effective_metrics(100.0, DEFAULT_BUMP, |_| {
            Err(EngineError::NumericalInstability { what: "test".to_string() })
        });
        assert!(r.is_err());
    }
}
