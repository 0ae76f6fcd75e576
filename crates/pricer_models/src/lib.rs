//! Instrument definitions, short-rate model parameters and curve
//! calibration for the callable-bond model-risk library.
//!
//! This crate sits between the market-data/math layer (`pricer_core`) and
//! the numerical engines (`pricer_engines`). It knows nothing about how a
//! bond is priced; it knows what a callable bond *is*, which short-rate
//! dynamics the engines may assume, and how the deterministic part of each
//! model is fitted to an input discount curve.

#![deny(missing_docs)]
#![deny(rustdoc::broken_intra_doc_links)]

pub mod calibration;
pub mod instruments;
pub mod models;
pub mod schedules;

pub use calibration::{CalibrationError, FittedShift};
pub use instruments::{CallTerm, CallableBondSpec, Cashflow, InstrumentError};
pub use models::{
    BlackKarasinskiParams, CirParams, HullWhiteParams, ModelError, ShortRateModel,
};
pub use schedules::Frequency;
