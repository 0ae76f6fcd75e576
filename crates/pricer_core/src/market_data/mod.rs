//! Market data layer: yield curves and their error types.

pub mod curves;
pub mod error;

pub use error::MarketDataError;
