use chrono::{Datelike, NaiveDate};

use crate::errors::{PayoffError, Result};
use crate::types::{PaymentDay, YearMonth};

/// number of days in `month` (1-based) of `year`
pub fn days_in_month(year: i32, month: u32) -> u32 {
    match month {
        1 | 3 | 5 | 7 | 8 | 10 | 12 => 31,
        4 | 6 | 9 | 11 => 30,
        2 => {
            if is_leap_year(year) {
                29
            } else {
                28
            }
        }
        _ => 0,
    }
}

pub fn is_leap_year(year: i32) -> bool {
    (year % 4 == 0 && year % 100 != 0) || (year % 400 == 0)
}

/// payment date in the given month: `day`, or the month's last day if shorter
pub fn payment_date_for_month(year: i32, month: u32, day: PaymentDay) -> Result<NaiveDate> {
    let clamped = day.get().min(days_in_month(year, month));
    NaiveDate::from_ymd_opt(year, month, clamped).ok_or_else(|| PayoffError::InvalidDate {
        message: format!("no payment date in {:04}-{:02}", year, month),
    })
}

/// payment date for a [`YearMonth`]
pub fn payment_date_in(month: YearMonth, day: PaymentDay) -> Result<NaiveDate> {
    payment_date_for_month(month.year(), month.month(), day)
}

/// step `delta` months from `date` and reapply the clamp rule
///
/// Only the month of `date` matters, its day is discarded. A clamped
/// Feb 29 stepped forward with day 31 lands on Mar 31, not Mar 29.
pub fn add_months_keeping_rule(date: NaiveDate, delta: i32, day: PaymentDay) -> Result<NaiveDate> {
    let index = i64::from(date.year()) * 12 + i64::from(date.month0()) + i64::from(delta);
    let year = i32::try_from(index.div_euclid(12)).map_err(|_| PayoffError::InvalidDate {
        message: format!("{} shifted by {} months is out of range", date, delta),
    })?;
    // rem_euclid(12) is always in 0..12
    let month = index.rem_euclid(12) as u32 + 1;
    payment_date_for_month(year, month, day)
}

/// parse a `YYYY-MM-DD` date, rejecting impossible days such as Feb 30
pub fn parse_date(text: &str) -> Result<NaiveDate> {
    NaiveDate::parse_from_str(text.trim(), "%Y-%m-%d").map_err(|e| PayoffError::InvalidDate {
        message: format!("{:?} is not a valid YYYY-MM-DD date: {}", text, e),
    })
}

/// e.g. "May 15, 2024"
pub fn format_full_date(date: NaiveDate) -> String {
    date.format("%B %-d, %Y").to_string()
}

/// e.g. "May 2024"
pub fn format_month_year(date: NaiveDate) -> String {
    date.format("%B %Y").to_string()
}
