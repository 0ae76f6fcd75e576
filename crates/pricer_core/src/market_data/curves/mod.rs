//! Yield curve implementations.
//!
//! The [`YieldCurve`] trait is the term-structure provider interface shared
//! read-only by all pricing engines. Concrete curves:
//!
//! - [`FlatCurve`]: constant continuously compounded rate
//! - [`DiscountCurve`]: log-linear interpolation of discount-factor pillars
//! - [`SpreadedCurve`]: base curve plus a constant zero spread (OAS,
//!   parallel bump scenarios)

mod discount;
mod flat;
mod spread;
mod traits;

pub use discount::DiscountCurve;
pub use flat::FlatCurve;
pub use spread::SpreadedCurve;
pub use traits::YieldCurve;
