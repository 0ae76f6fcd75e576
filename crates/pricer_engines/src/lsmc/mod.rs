//! Hull-White one-factor engine via least-squares Monte Carlo.
//!
//! The short rate is `r(t) = x(t) + α(t)` with `x` a zero-mean
//! Ornstein-Uhlenbeck factor stepped with its exact transition and `α` the
//! closed-form shift fitted to the input curve. The call decision at each
//! call date comes from regressing the path continuation value on a low
//! order polynomial in the factor.
//!
//! Risk reprices freeze the whole stochastic state: the same draw matrix
//! *and* the same regression coefficients are reused under the bumped
//! curve, so duration and convexity see only the curve move, not Monte
//! Carlo noise.

mod config;
mod pricer;

pub use config::{LsmcConfig, MIN_PATHS};
pub use pricer::{price, reprice, FrozenState, LsmcOutcome};
