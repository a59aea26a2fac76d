use chrono::{Datelike, NaiveDate};
use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::calendar::{add_months_keeping_rule, payment_date_for_month, payment_date_in};
use crate::errors::{PayoffError, Result};
use crate::schedule::MAX_SCHEDULE_MONTHS;
use crate::types::{PaymentDay, YearMonth};

/// inclusive range of payment dates that still fall under the promotion
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct PaymentWindow {
    pub first_payment: NaiveDate,
    pub last_eligible_payment: NaiveDate,
    pub payment_day: PaymentDay,
}

impl PaymentWindow {
    /// window from the payment date in `start` up to the last date strictly
    /// before `promo_expiry`
    pub fn resolve(start: YearMonth, promo_expiry: NaiveDate, payment_day: PaymentDay) -> Result<Self> {
        let first_payment = payment_date_in(start, payment_day)?;
        let last_eligible_payment = last_eligible_payment(promo_expiry, payment_day)?;

        debug!(
            %first_payment,
            %last_eligible_payment,
            %promo_expiry,
            payment_day = payment_day.get(),
            "resolved payment window"
        );

        Ok(Self {
            first_payment,
            last_eligible_payment,
            payment_day,
        })
    }

    /// no payment date fits before expiry
    pub fn is_empty(&self) -> bool {
        self.last_eligible_payment < self.first_payment
    }

    /// number of monthly payments in the window
    pub fn payment_count(&self) -> Result<u32> {
        count_payments_inclusive(self.first_payment, self.last_eligible_payment, self.payment_day)
    }

    /// whether `date` is inside the window
    pub fn contains(&self, date: NaiveDate) -> bool {
        self.first_payment <= date && date <= self.last_eligible_payment
    }
}

/// last payment date strictly before `promo_expiry`
///
/// Payments on or after the expiry date no longer qualify, so a candidate
/// that lands on the expiry day falls back one month.
pub fn last_eligible_payment(promo_expiry: NaiveDate, payment_day: PaymentDay) -> Result<NaiveDate> {
    let candidate = payment_date_for_month(promo_expiry.year(), promo_expiry.month(), payment_day)?;
    if candidate < promo_expiry {
        return Ok(candidate);
    }
    add_months_keeping_rule(candidate, -1, payment_day)
}

/// count monthly payment dates from `first` through `last`, both inclusive
pub fn count_payments_inclusive(first: NaiveDate, last: NaiveDate, payment_day: PaymentDay) -> Result<u32> {
    if last < first {
        return Ok(0);
    }

    let mut count = 0;
    let mut current = first;
    while current <= last {
        if count == MAX_SCHEDULE_MONTHS {
            return Err(PayoffError::IterationLimitExceeded {
                limit: MAX_SCHEDULE_MONTHS,
            });
        }
        count += 1;
        current = add_months_keeping_rule(current, 1, payment_day)?;
    }
    Ok(count)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn ymd(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    fn day(d: u32) -> PaymentDay {
        PaymentDay::new(d).unwrap()
    }

    #[test]
    fn test_expiry_on_payment_day_falls_back() {
        let last = last_eligible_payment(ymd(2024, 3, 15), day(15)).unwrap();
        assert_eq!(last, ymd(2024, 2, 15));
    }

    #[test]
    fn test_expiry_after_payment_day_keeps_month() {
        let last = last_eligible_payment(ymd(2024, 3, 20), day(15)).unwrap();
        assert_eq!(last, ymd(2024, 3, 15));
    }

    #[test]
    fn test_expiry_before_payment_day_falls_back() {
        let last = last_eligible_payment(ymd(2024, 3, 10), day(15)).unwrap();
        assert_eq!(last, ymd(2024, 2, 15));
    }

    #[test]
    fn test_fallback_applies_clamp() {
        // Mar 31 == expiry, previous month clamps to Feb 29
        let last = last_eligible_payment(ymd(2024, 3, 31), day(31)).unwrap();
        assert_eq!(last, ymd(2024, 2, 29));

        // Feb expiry on the 28th with day 30: candidate clamps to the 28th
        let last = last_eligible_payment(ymd(2023, 2, 28), day(30)).unwrap();
        assert_eq!(last, ymd(2023, 1, 30));
    }

    #[test]
    fn test_fallback_across_year() {
        let last = last_eligible_payment(ymd(2025, 1, 1), day(1)).unwrap();
        assert_eq!(last, ymd(2024, 12, 1));
    }

    #[test]
    fn test_count_inclusive() {
        assert_eq!(count_payments_inclusive(ymd(2024, 1, 15), ymd(2024, 4, 15), day(15)).unwrap(), 4);
        assert_eq!(count_payments_inclusive(ymd(2024, 1, 15), ymd(2024, 1, 15), day(15)).unwrap(), 1);
        assert_eq!(count_payments_inclusive(ymd(2024, 1, 15), ymd(2025, 1, 14), day(15)).unwrap(), 12);
    }

    #[test]
    fn test_count_empty_when_reversed() {
        assert_eq!(count_payments_inclusive(ymd(2024, 5, 15), ymd(2024, 4, 15), day(15)).unwrap(), 0);
    }

    #[test]
    fn test_count_with_clamped_months() {
        // Jan 31, Feb 29, Mar 31, Apr 30
        assert_eq!(count_payments_inclusive(ymd(2024, 1, 31), ymd(2024, 4, 30), day(31)).unwrap(), 4);
    }

    #[test]
    fn test_count_hits_safety_limit() {
        let err = count_payments_inclusive(ymd(2000, 1, 1), ymd(2100, 1, 1), day(1)).unwrap_err();
        assert_eq!(err, PayoffError::IterationLimitExceeded { limit: MAX_SCHEDULE_MONTHS });

        // exactly 600 payments is still fine
        assert_eq!(
            count_payments_inclusive(ymd(2000, 1, 1), ymd(2049, 12, 1), day(1)).unwrap(),
            MAX_SCHEDULE_MONTHS
        );
    }

    #[test]
    fn test_resolve_window() {
        let start = YearMonth::new(2024, 1).unwrap();
        let window = PaymentWindow::resolve(start, ymd(2024, 5, 15), day(15)).unwrap();
        assert_eq!(window.first_payment, ymd(2024, 1, 15));
        assert_eq!(window.last_eligible_payment, ymd(2024, 4, 15));
        assert!(!window.is_empty());
        assert_eq!(window.payment_count().unwrap(), 4);
        assert!(window.contains(ymd(2024, 3, 1)));
        assert!(!window.contains(ymd(2024, 4, 16)));
    }

    #[test]
    fn test_resolve_empty_window() {
        let start = YearMonth::new(2024, 5).unwrap();
        let window = PaymentWindow::resolve(start, ymd(2024, 5, 15), day(15)).unwrap();
        assert!(window.is_empty());
        assert_eq!(window.payment_count().unwrap(), 0);
    }
}
