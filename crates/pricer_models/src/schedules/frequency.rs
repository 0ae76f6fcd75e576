//! Coupon payment frequency.

use serde::{Deserialize, Serialize};
use std::fmt;

/// Coupon payment frequency of a fixed-rate bond.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Frequency {
    /// One coupon per year.
    Annual,
    /// Two coupons per year (US corporate bond standard).
    Semiannual,
    /// Four coupons per year.
    Quarterly,
    /// Twelve coupons per year.
    Monthly,
}

impl Frequency {
    /// Number of coupon payments per year.
    pub fn periods_per_year(&self) -> u32 {
        match self {
            Frequency::Annual => 1,
            Frequency::Semiannual => 2,
            Frequency::Quarterly => 4,
            Frequency::Monthly => 12,
        }
    }

    /// Whole months per coupon period.
    pub fn months_per_period(&self) -> u32 {
        12 / self.periods_per_year()
    }
}

impl fmt::Display for Frequency {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            Frequency::Annual => "annual",
            Frequency::Semiannual => "semiannual",
            Frequency::Quarterly => "quarterly",
            Frequency::Monthly => "monthly",
        };
        write!(f, "{s}")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_periods_and_months_consistent() {
        for freq in [
            Frequency::Annual,
            Frequency::Semiannual,
            Frequency::Quarterly,
            Frequency::Monthly,
        ] {
            assert_eq!(freq.periods_per_year() * freq.months_per_period(), 12);
        }
    }

    #[test]
    fn test_serde_snake_case() {
        let f: Frequency = serde_json::from_str("\"semiannual\"").unwrap();
        assert_eq!(f, Frequency::Semiannual);
    }
}
