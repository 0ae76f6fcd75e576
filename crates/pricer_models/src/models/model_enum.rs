//! Tagged union over the supported short-rate models.

use serde::{Deserialize, Serialize};
use std::fmt;

use super::{BlackKarasinskiParams, CirParams, HullWhiteParams};

/// A short-rate model together with its validated parameters.
///
/// Static dispatch: each engine matches on the variant it prices and
/// rejects the others at configuration time.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(tag = "model", rename_all = "snake_case")]
pub enum ShortRateModel {
    /// Gaussian one-factor Hull-White.
    HullWhite(HullWhiteParams),
    /// Lognormal Black-Karasinski.
    BlackKarasinski(BlackKarasinskiParams),
    /// Square-root CIR (shift-extended by the engine).
    Cir(CirParams),
}

impl ShortRateModel {
    /// Stable snake_case model identifier, as used in reports and logs.
    pub fn name(&self) -> &'static str {
        match self {
            ShortRateModel::HullWhite(_) => "hull_white",
            ShortRateModel::BlackKarasinski(_) => "black_karasinski",
            ShortRateModel::Cir(_) => "cir",
        }
    }
}

impl fmt::Display for ShortRateModel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.name())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_names() {
        let hw = ShortRateModel::HullWhite(HullWhiteParams::new(0.1, 0.01).unwrap());
        assert_eq!(hw.name(), "hull_white");
        assert_eq!(hw.to_string(), "hull_white");
    }

    #[test]
    fn test_serde_tagged() {
        let m = ShortRateModel::Cir(CirParams::new(0.3, 0.04, 0.08).unwrap());
        let json = serde_json::to_string(&m).unwrap();
        assert!(json.contains("\"model\":\"cir\""));
        let back: ShortRateModel = serde_json::from_str(&json).unwrap();
        assert_eq!(back, m);
    }
}
