//! Callable fixed-rate bond specification.

use pricer_core::types::time::{Date, DayCount};
use serde::{Deserialize, Serialize};

use crate::schedules::{generate_backward, Frequency};

use super::InstrumentError;

/// A single entry in a discrete (Bermudan) call schedule.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct CallTerm {
    /// Date on which the issuer may redeem.
    pub date: Date,
    /// Redemption price paid per unit face (clean strike).
    pub price: f64,
}

/// A dated cashflow expressed in year fractions from the valuation date.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Cashflow {
    /// Payment time in years.
    pub time: f64,
    /// Payment amount in currency units.
    pub amount: f64,
}

/// Terms of a callable fixed-rate bond.
///
/// Immutable once constructed; the three engines share it by reference and
/// read the same schedule. Times handed to the engines are year fractions
/// from a valuation date under the bond's own day count.
///
/// # Examples
///
/// ```
/// use pricer_core::types::time::{Date, DayCount};
/// use pricer_models::instruments::{CallTerm, CallableBondSpec};
/// use pricer_models::schedules::Frequency;
///
/// let bond = CallableBondSpec::new(
///     100.0,
///     0.05,
///     Frequency::Semiannual,
///     Date::from_ymd(2025, 12, 2).unwrap(),
///     Date::from_ymd(2035, 12, 2).unwrap(),
///     vec![CallTerm { date: Date::from_ymd(2030, 12, 2).unwrap(), price: 100.0 }],
///     0.0,
///     DayCount::Thirty360US,
/// )
/// .unwrap();
/// assert_eq!(bond.coupon_amount(), 2.5);
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CallableBondSpec {
    face: f64,
    coupon_rate: f64,
    frequency: Frequency,
    issue: Date,
    maturity: Date,
    call_schedule: Vec<CallTerm>,
    oas: f64,
    day_count: DayCount,
}

impl CallableBondSpec {
    /// Validates and constructs a bond specification.
    ///
    /// # Arguments
    ///
    /// * `face` - Face value, strictly positive.
    /// * `coupon_rate` - Annual coupon rate as a decimal (0.05 = 5%).
    /// * `frequency` - Coupon payment frequency.
    /// * `issue` - Issue date (start of the first accrual period).
    /// * `maturity` - Redemption date, strictly after `issue`.
    /// * `call_schedule` - Strictly increasing call dates in
    ///   `(issue, maturity]` with positive prices; empty for a straight bond.
    /// * `oas` - Option-adjusted spread as a decimal, applied by the engines
    ///   on top of the discount curve.
    /// * `day_count` - Convention for all year fractions of this bond.
    ///
    /// # Errors
    ///
    /// Returns an [`InstrumentError`] describing the first violated term.
    #[allow(clippy::too_many_arguments)]
    pub fn new(
        face: f64,
        coupon_rate: f64,
        frequency: Frequency,
        issue: Date,
        maturity: Date,
        call_schedule: Vec<CallTerm>,
        oas: f64,
        day_count: DayCount,
    ) -> Result<Self, InstrumentError> {
        if !(face > 0.0) || !face.is_finite() {
            return Err(InstrumentError::NonPositiveFace { face });
        }
        if !(coupon_rate >= 0.0) || !coupon_rate.is_finite() {
            return Err(InstrumentError::InvalidCouponRate { rate: coupon_rate });
        }
        if maturity <= issue {
            return Err(InstrumentError::InvalidMaturity { issue, maturity });
        }
        if !oas.is_finite() {
            return Err(InstrumentError::NonFiniteSpread { oas });
        }
        for (i, term) in call_schedule.iter().enumerate() {
            if term.date <= issue || term.date > maturity {
                return Err(InstrumentError::CallDateOutOfRange { date: term.date });
            }
            if !(term.price > 0.0) || !term.price.is_finite() {
                return Err(InstrumentError::NonPositiveCallPrice { price: term.price });
            }
            if i > 0 && term.date <= call_schedule[i - 1].date {
                return Err(InstrumentError::UnsortedCallSchedule { index: i });
            }
        }
        Ok(Self {
            face,
            coupon_rate,
            frequency,
            issue,
            maturity,
            call_schedule,
            oas,
            day_count,
        })
    }

    /// Face value.
    pub fn face(&self) -> f64 {
        self.face
    }

    /// Annual coupon rate (decimal).
    pub fn coupon_rate(&self) -> f64 {
        self.coupon_rate
    }

    /// Coupon payment frequency.
    pub fn frequency(&self) -> Frequency {
        self.frequency
    }

    /// Issue date.
    pub fn issue(&self) -> Date {
        self.issue
    }

    /// Maturity date.
    pub fn maturity(&self) -> Date {
        self.maturity
    }

    /// The call schedule, ascending by date. Empty for a straight bond.
    pub fn call_schedule(&self) -> &[CallTerm] {
        &self.call_schedule
    }

    /// Option-adjusted spread (decimal).
    pub fn oas(&self) -> f64 {
        self.oas
    }

    /// Day-count convention for this bond's year fractions.
    pub fn day_count(&self) -> DayCount {
        self.day_count
    }

    /// The same bond terms with a different option-adjusted spread.
    ///
    /// # Errors
    ///
    /// `InstrumentError::NonFiniteSpread` for a non-finite `oas`.
    pub fn with_oas(&self, oas: f64) -> Result<Self, InstrumentError> {
        if !oas.is_finite() {
            return Err(InstrumentError::NonFiniteSpread { oas });
        }
        Ok(Self {
            oas,
            ..self.clone()
        })
    }

    /// True when the bond carries at least one call right.
    pub fn is_callable(&self) -> bool {
        !self.call_schedule.is_empty()
    }

    /// Amount of a single coupon payment.
    pub fn coupon_amount(&self) -> f64 {
        self.face * self.coupon_rate / self.frequency.periods_per_year() as f64
    }

    /// Time to maturity in years from `valuation`.
    pub fn maturity_time(&self, valuation: Date) -> f64 {
        self.day_count.year_fraction(valuation, self.maturity)
    }

    /// Coupon payments strictly after `valuation`, as times and amounts.
    pub fn coupons(&self, valuation: Date) -> Vec<Cashflow> {
        let amount = self.coupon_amount();
        generate_backward(self.issue, self.maturity, self.frequency)
            .into_iter()
            .filter(|d| *d > valuation)
            .map(|d| Cashflow {
                time: self.day_count.year_fraction(valuation, d),
                amount,
            })
            .collect()
    }

    /// Remaining cashflows from `valuation`: coupons, with the face value
    /// folded into the final (maturity) payment.
    ///
    /// This is the straight-bond view used for analytic discounting.
    pub fn cashflows(&self, valuation: Date) -> Vec<Cashflow> {
        let mut flows = self.coupons(valuation);
        match flows.last_mut() {
            Some(last) => last.amount += self.face,
            // Past the final coupon date but not yet at maturity: only the
            // principal remains.
            None => {
                if self.maturity > valuation {
                    flows.push(Cashflow {
                        time: self.maturity_time(valuation),
                        amount: self.face,
                    });
                }
            }
        }
        flows
    }

    /// Call opportunities strictly after `valuation`, as times and prices.
    pub fn call_times(&self, valuation: Date) -> Vec<Cashflow> {
        self.call_schedule
            .iter()
            .filter(|term| term.date > valuation)
            .map(|term| Cashflow {
                time: self.day_count.year_fraction(valuation, term.date),
                amount: term.price,
            })
            .collect()
    }

    /// Coupon interest accrued from the previous coupon date to `valuation`.
    ///
    /// Zero on coupon dates and outside the bond's life.
    pub fn accrued(&self, valuation: Date) -> f64 {
        if valuation <= self.issue || valuation >= self.maturity {
            return 0.0;
        }
        let schedule = generate_backward(self.issue, self.maturity, self.frequency);
        let period_start = schedule
            .iter()
            .rev()
            .find(|d| **d <= valuation)
            .copied()
            .unwrap_or(self.issue);
        self.face * self.coupon_rate * self.day_count.year_fraction(period_start, valuation)
    }
}
