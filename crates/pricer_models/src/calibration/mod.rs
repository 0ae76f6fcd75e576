//! Fitting the deterministic part of each model to an input discount curve.
//!
//! Hull-White and CIR++ admit closed-form fitted shifts; both are sampled
//! onto a grid as a [`FittedShift`]. The Black-Karasinski drift has no
//! closed form and is fitted layer by layer inside the tree engine, which
//! reports failures through the shared [`CalibrationError`].

pub mod cir;
pub mod hull_white;

mod error;
mod shift;

pub use error::CalibrationError;
pub use shift::FittedShift;
