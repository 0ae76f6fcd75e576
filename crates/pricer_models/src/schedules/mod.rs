//! Coupon frequencies and schedule generation.

mod frequency;
mod schedule;

pub use frequency::Frequency;
pub use schedule::generate_backward;
