//! # pricer_core: foundation layer for the callable-bond model-risk study
//!
//! This crate is the bottom layer of the workspace and carries no
//! dependency on any other `pricer_*` crate. It provides:
//!
//! - Yield curves and the term-structure provider interface
//!   (`market_data::curves`)
//! - Scalar numerical building blocks: Brent root finding, a tridiagonal
//!   direct solver and polynomial least squares (`math`)
//! - Time types: `Date` and `DayCount` year-fraction conventions
//!   (`types::time`)
//! - Shared error types (`types::error`, `market_data::error`)
//!
//! All curve implementations are generic over `num_traits::Float`; the
//! numerical engines upstream instantiate them with `f64`.
//!
//! ## Usage
//!
//! ```rust
//! use pricer_core::market_data::curves::{FlatCurve, YieldCurve};
//! use pricer_core::types::time::{Date, DayCount};
//!
//! let curve = FlatCurve::new(0.04_f64);
//! let df = curve.discount_factor(10.0).unwrap();
//! assert!((df - (-0.4_f64).exp()).abs() < 1e-12);
//!
//! let start = Date::from_ymd(2025, 12, 2).unwrap();
//! let end = Date::from_ymd(2035, 12, 2).unwrap();
//! let t = DayCount::Thirty360US.year_fraction(start, end);
//! assert!((t - 10.0).abs() < 1e-12);
//! ```

#![deny(missing_docs)]
#![deny(rustdoc::broken_intra_doc_links)]

pub mod market_data;
pub mod math;
pub mod types;
