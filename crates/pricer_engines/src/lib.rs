//! Numerical pricing engines for callable fixed-rate bonds.
//!
//! Three engines price the same instrument under different short-rate
//! dynamics and numerical methods:
//!
//! - [`lsmc`]: Hull-White one-factor via least-squares Monte Carlo with
//!   common random numbers for risk reprices
//! - [`tree`]: Black-Karasinski on a recombining trinomial tree with
//!   Arrow-Debreu forward-induction drift calibration
//! - [`pde`]: shift-extended CIR (CIR++) via a Crank-Nicolson finite
//!   difference scheme with a direct tridiagonal solve
//!
//! The [`Engine`] sum type gives them a common surface: `price` for a
//! single valuation and `run` for the full model-risk output (price,
//! effective duration/convexity from frozen-state reprices, divergence
//! check against an optional reference).
//!
//! All engines discount on the input curve plus the bond's option-adjusted
//! spread; an engine failure is reported in its own [`PricingResult`] and
//! never aborts a sibling engine.

#![deny(missing_docs)]
#![deny(rustdoc::broken_intra_doc_links)]

pub mod engine;
pub mod error;
pub(crate) mod grid;
pub mod lsmc;
pub mod pde;
pub mod result;
pub mod rng;
pub mod tree;

pub use engine::{Engine, RunSettings};
pub use error::EngineError;
pub use result::{PriceEstimate, PricingResult, ValidationStatus};
pub use rng::PathRng;
