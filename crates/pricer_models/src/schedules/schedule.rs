//! Backward coupon-schedule generation.

use pricer_core::types::time::Date;

use super::Frequency;

/// Generates coupon payment dates backward from maturity.
///
/// Dates are rolled back in whole coupon periods from `maturity` until the
/// next roll would land on or before `issue`, then returned in ascending
/// order. The final element is always `maturity`; a short first stub is
/// absorbed into the first period (no date is emitted at or before `issue`).
///
/// # Examples
///
/// ```
/// use pricer_core::types::time::Date;
/// use pricer_models::schedules::{generate_backward, Frequency};
///
/// let issue = Date::from_ymd(2024, 1, 15).unwrap();
/// let maturity = Date::from_ymd(2026, 1, 15).unwrap();
/// let dates = generate_backward(issue, maturity, Frequency::Semiannual);
/// assert_eq!(dates.len(), 4);
/// assert_eq!(*dates.last().unwrap(), maturity);
/// ```
pub fn generate_backward(issue: Date, maturity: Date, frequency: Frequency) -> Vec<Date> {
    let step = frequency.months_per_period();
    let mut dates = Vec::new();
    // Roll by cumulative months from maturity so month-end dates do not
    // drift through short months.
    let mut k = 0;
    loop {
        let d = maturity.minus_months(k * step);
        if d <= issue {
            break;
        }
        dates.push(d);
        k += 1;
    }
    dates.reverse();
    dates
}
