//! Black-Karasinski engine on a recombining trinomial tree.
//!
//! The log rate lives on a lattice with spacing `dx = σ√(3Δt)` and a
//! truncated half-width `j_max`. The time-dependent drift is fitted layer
//! by layer during forward induction: Arrow-Debreu state prices are rolled
//! from the root and a one-unknown Brent solve per layer matches the model
//! discount factor to the market curve exactly. Backward induction then
//! prices the bond with the call right applied as a cap at each call
//! layer.
//!
//! The scheme is deterministic: risk reprices rebuild the drift on the
//! bumped curve over the identical lattice geometry.

mod config;
mod lattice;
mod pricer;

pub use config::TreeConfig;
pub use lattice::BkLattice;
pub use pricer::{price, TreeOutcome};
