//! Uniform time grid with cashflow snapping, shared by the engines.

use pricer_models::instruments::Cashflow;

/// A uniform grid of `n_steps` intervals covering `[0, horizon]`.
#[derive(Debug, Clone, Copy, PartialEq)]
pub(crate) struct TimeGrid {
    pub dt: f64,
    pub n_steps: usize,
}

impl TimeGrid {
    /// Builds a grid whose last point lands exactly on `horizon`.
    pub fn new(horizon: f64, steps_per_year: usize) -> Self {
        let n_steps = ((horizon * steps_per_year as f64).ceil() as usize).max(1);
        Self {
            dt: horizon / n_steps as f64,
            n_steps,
        }
    }

    /// Grid time of step `i`.
    pub fn time(&self, i: usize) -> f64 {
        i as f64 * self.dt
    }

    /// All grid times, `0..=n_steps`.
    pub fn times(&self) -> Vec<f64> {
        (0..=self.n_steps).map(|i| self.time(i)).collect()
    }

    /// Nearest grid index for time `t`, clamped into `[1, n_steps]` so no
    /// flow lands on the valuation point itself.
    pub fn snap(&self, t: f64) -> usize {
        let i = (t / self.dt).round() as i64;
        i.clamp(1, self.n_steps as i64) as usize
    }

    /// Sums flow amounts into per-step buckets (length `n_steps + 1`).
    pub fn bucket_amounts(&self, flows: &[Cashflow]) -> Vec<f64> {
        let mut out = vec![0.0; self.n_steps + 1];
        for flow in flows {
            out[self.snap(flow.time)] += flow.amount;
        }
        out
    }

    /// Maps call opportunities to per-step strike levels. When two calls
    /// snap to the same step the later (lower-priority) entry wins.
    pub fn bucket_levels(&self, calls: &[Cashflow]) -> Vec<Option<f64>> {
        let mut out = vec![None; self.n_steps + 1];
        for call in calls {
            out[self.snap(call.time)] = Some(call.amount);
        }
        out
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_grid_covers_horizon_exactly() {
        let grid = TimeGrid::new(10.0, 12);
        assert_eq!(grid.n_steps, 120);
        assert!((grid.time(grid.n_steps) - 10.0).abs() < 1e-12);

        // Fractional horizon still lands on the last point.
        let grid = TimeGrid::new(7.3, 12);
        assert!((grid.time(grid.n_steps) - 7.3).abs() < 1e-12);
    }

    #[test]
    fn test_snap_clamps() {
        let grid = TimeGrid::new(5.0, 2);
        assert_eq!(grid.snap(0.0), 1);
        assert_eq!(grid.snap(2.49), 5);
        assert_eq!(grid.snap(99.0), grid.n_steps);
    }

    #[test]
    fn test_bucket_amounts_sum() {
        let grid = TimeGrid::new(2.0, 2);
        let flows = vec![
            Cashflow { time: 0.5, amount: 2.5 },
            Cashflow { time: 1.0, amount: 2.5 },
            Cashflow { time: 2.0, amount: 102.5 },
        ];
        let buckets = grid.bucket_amounts(&flows);
        assert_eq!(buckets.len(), 5);
        assert_eq!(buckets[1], 2.5);
        assert_eq!(buckets[2], 2.5);
        assert_eq!(buckets[4], 102.5);
    }

    #[test]
    fn test_bucket_levels() {
        let grid = TimeGrid::new(10.0, 1);
        let calls = vec![Cashflow { time: 5.0, amount: 100.0 }];
        let levels = grid.bucket_levels(&calls);
        assert_eq!(levels[5], Some(100.0));
        assert_eq!(levels[4], None);
    }
}
