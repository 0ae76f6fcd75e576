//! Time types and day-count conventions.
//!
//! Provides:
//! - `Date`: type-safe wrapper around `chrono::NaiveDate`
//! - `DayCount`: the year-fraction conventions used by the bond and the
//!   discount curve (30/360 US for corporate bond cashflows, ACT/360 for
//!   SOFR-style discounting, ACT/365 for generic derivative time)
//!
//! # Examples
//!
//! ```
//! use pricer_core::types::time::{Date, DayCount};
//!
//! let start = Date::from_ymd(2024, 1, 1).unwrap();
//! let end = Date::from_ymd(2024, 7, 1).unwrap();
//! let yf = DayCount::Act365.year_fraction(start, end);
//! assert!((yf - 0.4986).abs() < 0.001);
//! ```

use chrono::{Datelike, Months, NaiveDate};
use std::fmt;
use std::ops::Sub;
use std::str::FromStr;

use super::error::DateError;

/// Type-safe date wrapper around `chrono::NaiveDate`.
///
/// Provides ISO 8601 parsing/formatting and the date arithmetic needed by
/// coupon schedules and year fractions.
///
/// # Examples
///
/// ```
/// use pricer_core::types::time::Date;
///
/// let date = Date::from_ymd(2025, 12, 2).unwrap();
/// assert_eq!(date.year(), 2025);
///
/// let parsed: Date = "2025-12-02".parse().unwrap();
/// assert_eq!(date, parsed);
///
/// let start = Date::from_ymd(2024, 1, 1).unwrap();
/// let end = Date::from_ymd(2024, 1, 11).unwrap();
/// assert_eq!(end - start, 10);
/// ```
#[derive(Copy, Clone, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(transparent))]
pub struct Date(NaiveDate);

impl Date {
    /// Creates a `Date` from year, month and day components.
    ///
    /// # Errors
    ///
    /// Returns `DateError::InvalidDate` for impossible calendar dates.
    pub fn from_ymd(year: i32, month: u32, day: u32) -> Result<Self, DateError> {
        NaiveDate::from_ymd_opt(year, month, day)
            .map(Date)
            .ok_or(DateError::InvalidDate { year, month, day })
    }

    /// Parses a date from an ISO 8601 string (YYYY-MM-DD).
    pub fn parse(s: &str) -> Result<Self, DateError> {
        NaiveDate::parse_from_str(s, "%Y-%m-%d")
            .map(Date)
            .map_err(|e| DateError::ParseError(e.to_string()))
    }

    /// Returns the year component.
    pub fn year(&self) -> i32 {
        self.0.year()
    }

    /// Returns the month component (1-12).
    pub fn month(&self) -> u32 {
        self.0.month()
    }

    /// Returns the day component (1-31).
    pub fn day(&self) -> u32 {
        self.0.day()
    }

    /// Returns the date shifted back by a whole number of months.
    ///
    /// Used for backward coupon-schedule generation; lands on the last
    /// valid day when the nominal day does not exist in the target month.
    ///
    /// # Examples
    ///
    /// ```
    /// use pricer_core::types::time::Date;
    ///
    /// let d = Date::from_ymd(2024, 3, 31).unwrap();
    /// assert_eq!(d.minus_months(1), Date::from_ymd(2024, 2, 29).unwrap());
    /// ```
    pub fn minus_months(&self, months: u32) -> Self {
        Date(self.0 - Months::new(months))
    }

    /// Returns the underlying `NaiveDate` for access to chrono's full API.
    pub fn inner(&self) -> NaiveDate {
        self.0
    }
}

impl Sub for Date {
    type Output = i64;

    /// Number of days between two dates (positive when `self` is later).
    fn sub(self, other: Self) -> i64 {
        (self.0 - other.0).num_days()
    }
}

impl FromStr for Date {
    type Err = DateError;

    fn from_str(s: &str) -> Result<Self, DateError> {
        Date::parse(s)
    }
}

impl fmt::Display for Date {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0.format("%Y-%m-%d"))
    }
}

/// Day-count convention for year-fraction calculations.
///
/// # Variants
///
/// - `Thirty360US`: 30/360 US bond basis (US corporate bond cashflows)
/// - `Act360`: actual days / 360 (money markets, SOFR discounting)
/// - `Act365`: actual days / 365 (generic derivative time)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum DayCount {
    /// 30/360 US bond basis: each month counts 30 days, the year 360.
    Thirty360US,
    /// Actual/360.
    Act360,
    /// Actual/365 fixed.
    Act365,
}

impl DayCount {
    /// Returns the year fraction between two dates under this convention.
    ///
    /// Negative when `end` precedes `start`.
    ///
    /// # Examples
    ///
    /// ```
    /// use pricer_core::types::time::{Date, DayCount};
    ///
    /// let start = Date::from_ymd(2025, 6, 1).unwrap();
    /// let end = Date::from_ymd(2025, 12, 1).unwrap();
    /// let yf = DayCount::Thirty360US.year_fraction(start, end);
    /// assert!((yf - 0.5).abs() < 1e-12);
    /// ```
    pub fn year_fraction(&self, start: Date, end: Date) -> f64 {
        match self {
            DayCount::Thirty360US => {
                let mut d1 = start.day() as i64;
                let mut d2 = end.day() as i64;
                if d1 == 31 {
                    d1 = 30;
                }
                if d2 == 31 && d1 == 30 {
                    d2 = 30;
                }
                let days = 360 * (end.year() as i64 - start.year() as i64)
                    + 30 * (end.month() as i64 - start.month() as i64)
                    + (d2 - d1);
                days as f64 / 360.0
            }
            DayCount::Act360 => (end - start) as f64 / 360.0,
            DayCount::Act365 => (end - start) as f64 / 365.0,
        }
    }
}
