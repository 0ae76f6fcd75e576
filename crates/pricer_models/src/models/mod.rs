//! Short-rate model parameters.

mod black_karasinski;
mod cir;
mod error;
mod hull_white;
mod model_enum;

pub use black_karasinski::BlackKarasinskiParams;
pub use cir::CirParams;
pub use error::ModelError;
pub use hull_white::HullWhiteParams;
pub use model_enum::ShortRateModel;
