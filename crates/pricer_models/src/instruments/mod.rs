//! Instrument definitions.

mod callable_bond;
mod error;

pub use callable_bond::{CallTerm, CallableBondSpec, Cashflow};
pub use error::InstrumentError;
