//! Lattice geometry and Arrow-Debreu drift calibration.

use pricer_core::market_data::curves::YieldCurve;
use pricer_core::math::{BrentSolver, SolverConfig};
use pricer_core::types::error::SolverError;
use pricer_models::{BlackKarasinskiParams, CalibrationError};
use tracing::{debug, warn};

use crate::error::EngineError;

use super::TreeConfig;

/// Bracket for the per-layer drift solve, in log-rate units. Covers rates
/// from a few millionths to well above any market level.
const ALPHA_BRACKET: (f64, f64) = (-12.0, 12.0);

/// A calibrated Black-Karasinski lattice.
///
/// Layers are dense arrays indexed by offset from the central node; layer
/// `i` has half-width `min(i, j_max)`. The short rate at node `(i, j)` is
/// `exp(α_i + j·dx)`.
#[derive(Debug, Clone)]
pub struct BkLattice {
    pub(crate) dt: f64,
    pub(crate) dx: f64,
    pub(crate) j_max: i64,
    pub(crate) n_steps: usize,
    pub(crate) a: f64,
    /// Fitted drift per layer, applying over `[t_i, t_{i+1})`.
    pub(crate) alphas: Vec<f64>,
    /// Arrow-Debreu totals per layer: the model discount factors.
    state_price_sums: Vec<f64>,
    warnings: Vec<String>,
}

impl BkLattice {
    /// Layer spacing in years.
    pub fn dt(&self) -> f64 {
        self.dt
    }

    /// Number of layers after the root.
    pub fn n_steps(&self) -> usize {
        self.n_steps
    }

    /// Truncation half-width.
    pub fn j_max(&self) -> usize {
        self.j_max as usize
    }

    /// Number of reachable nodes in `layer`.
    pub fn width(&self, layer: usize) -> usize {
        2 * layer.min(self.j_max as usize) + 1
    }

    /// Sum of Arrow-Debreu prices at `layer`, equal to the fitted discount
    /// factor `P(0, t_layer)`.
    pub fn state_price_sum(&self, layer: usize) -> f64 {
        self.state_price_sums[layer]
    }

    /// Short rate at node `(layer, j)`.
    pub fn rate(&self, layer: usize, j: i64) -> f64 {
        (self.alphas[layer] + j as f64 * self.dx).exp()
    }

    /// Warnings recorded during calibration (probability clipping).
    pub fn warnings(&self) -> &[String] {
        &self.warnings
    }
}

/// Trinomial branching from node `j` into a layer of half-width `m_next`:
/// central child and `(p_down, p_mid, p_up)`.
///
/// The central child is the node nearest the mean-reverted expectation,
/// clamped so all three children stay inside the next layer. Probabilities
/// that go negative at the truncation edge are clipped to zero and
/// renormalized; the caller counts these.
pub(crate) fn branch(j: i64, m_next: i64, a: f64, dt: f64) -> (i64, [f64; 3], bool) {
    let eta0 = -a * j as f64 * dt;
    let k = (eta0.round() as i64).clamp(-(m_next - 1) - j, (m_next - 1) - j);
    let eta = eta0 - k as f64;

    let mut pu = 1.0 / 6.0 + (eta * eta + eta) / 2.0;
    let mut pd = 1.0 / 6.0 + (eta * eta - eta) / 2.0;
    let mut pm = 2.0 / 3.0 - eta * eta;

    let clipped = pu < 0.0 || pd < 0.0 || pm < 0.0;
    if clipped {
        pu = pu.max(0.0);
        pd = pd.max(0.0);
        pm = pm.max(0.0);
        let total = pu + pm + pd;
        pu /= total;
        pm /= total;
        pd /= total;
    }
    (j + k, [pd, pm, pu], clipped)
}

/// Fits the layer drifts to `curve` by forward induction.
///
/// # Errors
///
/// - `Calibration(DriftBracketFailed)` when a layer's root leaves the
///   bracket
/// - `Calibration(NegativeStatePrice)` when forward induction produces a
///   negative Arrow-Debreu price
/// - `Market` when the curve rejects a discount factor lookup
pub(crate) fn calibrate<C: YieldCurve<f64>>(
    curve: &C,
    params: &BlackKarasinskiParams,
    config: &TreeConfig,
    horizon: f64,
) -> Result<BkLattice, EngineError> {
    config.validate()?;
    let n_steps = ((horizon * config.steps_per_year as f64).ceil() as usize).max(1);
    let dt = horizon / n_steps as f64;
    let dx = params.sigma * (3.0 * dt).sqrt();
    let j_max = if params.a * dt < 1e-12 {
        config.j_cap as i64
    } else {
        (((6.0 / (params.a * dt)).ceil() as i64) + 1).min(config.j_cap as i64)
    };

    let solver = BrentSolver::new(SolverConfig::high_precision());
    let mut alphas = Vec::with_capacity(n_steps);
    let mut state_price_sums = Vec::with_capacity(n_steps + 1);
    state_price_sums.push(1.0);

    let mut q = vec![1.0];
    let mut clipped_nodes = 0usize;

    for i in 0..n_steps {
        let m = (i as i64).min(j_max);
        let m_next = ((i + 1) as i64).min(j_max);
        let target = curve.discount_factor((i + 1) as f64 * dt)?;

        // One-unknown exact fit: the layer drift that reprices the market
        // discount factor through the Arrow-Debreu prices.
        let objective = |alpha: f64| {
            let mut sum = 0.0;
            for (idx, qv) in q.iter().enumerate() {
                let j = idx as i64 - m;
                sum += qv * (-(alpha + j as f64 * dx).exp() * dt).exp();
            }
            sum - target
        };
        let alpha = solver
            .find_root(objective, ALPHA_BRACKET.0, ALPHA_BRACKET.1)
            .map_err(|e| match e {
                SolverError::NoBracket { .. } => {
                    EngineError::Calibration(CalibrationError::DriftBracketFailed { layer: i })
                }
                other => EngineError::NumericalInstability {
                    what: format!("drift solve at layer {i}: {other}"),
                },
            })?;

        let mut q_next = vec![0.0; (2 * m_next + 1) as usize];
        for (idx, qv) in q.iter().enumerate() {
            let j = idx as i64 - m;
            let disc = (-(alpha + j as f64 * dx).exp() * dt).exp();
            let (center, probs, clipped) = branch(j, m_next, params.a, dt);
            if clipped {
                clipped_nodes += 1;
            }
            for (c, p) in [(center - 1, probs[0]), (center, probs[1]), (center + 1, probs[2])] {
                q_next[(c + m_next) as usize] += qv * p * disc;
            }
        }
        for (node, qv) in q_next.iter().enumerate() {
            if *qv < -1e-14 {
                return Err(EngineError::Calibration(
                    CalibrationError::NegativeStatePrice { layer: i + 1, node },
                ));
            }
        }
        state_price_sums.push(q_next.iter().sum());
        alphas.push(alpha);
        q = q_next;
    }

    let mut warnings = Vec::new();
    if clipped_nodes > 0 {
        let msg = format!(
            "clipped negative branching probabilities at {clipped_nodes} truncation nodes"
        );
        warn!("{msg}");
        warnings.push(msg);
    }
    debug!(n_steps, j_max, dx, "calibrated Black-Karasinski lattice");

    Ok(BkLattice {
        dt,
        dx,
        j_max,
        n_steps,
        a: params.a,
        alphas,
        state_price_sums,
        warnings,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;
    use pricer_core::market_data::curves::FlatCurve;

    fn params() -> BlackKarasinskiParams {
        BlackKarasinskiParams::new(0.1, 0.2).unwrap()
    }

    #[test]
    fn test_state_prices_recover_curve() {
        let curve = FlatCurve::new(0.04);
        let lattice = calibrate(&curve, &params(), &TreeConfig::default(), 5.0).unwrap();
        for layer in 0..=lattice.n_steps() {
            let t = layer as f64 * lattice.dt();
            let market = curve.discount_factor(t).unwrap();
            assert_relative_eq!(lattice.state_price_sum(layer), market, epsilon = 1e-8);
        }
    }

    #[test]
    fn test_width_growth_is_linear_then_capped() {
        let curve = FlatCurve::new(0.04);
        let config = TreeConfig { steps_per_year: 100, j_cap: 20 };
        let lattice = calibrate(&curve, &params(), &config, 5.0).unwrap();
        assert_eq!(lattice.width(0), 1);
        assert_eq!(lattice.width(7), 15);
        let j_max = lattice.j_max();
        assert_eq!(lattice.width(j_max + 50), 2 * j_max + 1);
    }

    #[test]
    fn test_branch_probabilities_sum_to_one() {
        for j in -10..=10 {
            let (_, probs, _) = branch(j, 11, 0.15, 0.02);
            assert_relative_eq!(probs.iter().sum::<f64>(), 1.0, epsilon = 1e-12);
            assert!(probs.iter().all(|p| *p >= 0.0));
        }
    }

    #[test]
    fn test_branch_keeps_children_in_next_layer() {
        let (center, _, _) = branch(10, 10, 0.001, 0.02);
        assert!(center + 1 <= 10);
        let (center, _, clipped) = branch(-10, 10, 0.001, 0.02);
        assert!(center - 1 >= -10);
        // Forcing the center inward at a soft cap distorts probabilities.
        assert!(clipped);
    }

    #[test]
    fn test_tight_cap_records_clipping_warning() {
        let curve = FlatCurve::new(0.04);
        // Cap far below the natural truncation width for this reversion.
        let config = TreeConfig { steps_per_year: 50, j_cap: 5 };
        let lattice = calibrate(&curve, &params(), &config, 10.0).unwrap();
        assert!(!lattice.warnings().is_empty());
    }
}
