use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use tracing::{trace, warn};

use crate::calendar::add_months_keeping_rule;
use crate::errors::{PayoffError, Result};
use crate::money::Money;
use crate::schedule::window::PaymentWindow;
use crate::schedule::MAX_SCHEDULE_MONTHS;

/// one month of the payoff schedule
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct ScheduleRow {
    /// 1-based payment number
    pub index: u32,
    pub date: NaiveDate,
    pub payment: Money,
    /// balance left after this payment
    pub remaining: Money,
}

/// simulated month-by-month payoff
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct PayoffSchedule {
    rows: Vec<ScheduleRow>,
}

impl PayoffSchedule {
    /// pay `total_monthly` on each payment date in `window` until the balance
    /// is gone or the window ends
    ///
    /// The zero-balance check runs before each payment, so the schedule never
    /// ends with a zero payment row.
    pub fn simulate(balance: Money, window: &PaymentWindow, total_monthly: Money) -> Result<Self> {
        if !total_monthly.is_positive() {
            return Err(PayoffError::InvalidArgument {
                message: format!("total monthly payment must be positive, got {}", total_monthly),
            });
        }

        let mut rows = Vec::new();
        let mut remaining = balance;
        let mut current = window.first_payment;

        for step in 0..MAX_SCHEDULE_MONTHS {
            if current > window.last_eligible_payment || !remaining.is_positive() {
                return Ok(Self::finish(rows, window));
            }

            let payment = total_monthly.min(remaining);
            remaining = (remaining - payment).max(Money::ZERO);

            let row = ScheduleRow {
                index: step + 1,
                date: current,
                payment,
                remaining,
            };
            trace!(index = row.index, date = %row.date, payment = %row.payment, remaining = %row.remaining, "schedule row");
            rows.push(row);

            current = add_months_keeping_rule(current, 1, window.payment_day)?;
        }

        // the loop body has run the maximum number of times; the stop
        // conditions still get one final check here
        if current > window.last_eligible_payment || !remaining.is_positive() {
            return Ok(Self::finish(rows, window));
        }
        Err(PayoffError::IterationLimitExceeded {
            limit: MAX_SCHEDULE_MONTHS,
        })
    }

    fn finish(rows: Vec<ScheduleRow>, window: &PaymentWindow) -> Self {
        let schedule = Self { rows };
        if !schedule.payoff_happened() {
            warn!(
                remaining = %schedule.final_balance().unwrap_or(Money::ZERO),
                last_eligible_payment = %window.last_eligible_payment,
                "schedule does not reach zero inside the window"
            );
        }
        schedule
    }

    pub fn rows(&self) -> &[ScheduleRow] {
        &self.rows
    }

    pub fn into_rows(self) -> Vec<ScheduleRow> {
        self.rows
    }

    pub fn len(&self) -> usize {
        self.rows.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    /// row for a 1-based payment number
    pub fn get_row(&self, index: u32) -> Option<&ScheduleRow> {
        index
            .checked_sub(1)
            .and_then(|i| self.rows.get(i as usize))
    }

    /// balance after the last row, if any row exists
    pub fn final_balance(&self) -> Option<Money> {
        self.rows.last().map(|r| r.remaining)
    }

    /// last row left exactly zero owed
    pub fn payoff_happened(&self) -> bool {
        self.final_balance() == Some(Money::ZERO)
    }

    /// date of the payment that cleared the balance
    pub fn payoff_date(&self) -> Option<NaiveDate> {
        if self.payoff_happened() {
            self.rows.last().map(|r| r.date)
        } else {
            None
        }
    }

    /// paid off strictly before `last_eligible_payment`
    pub fn finished_early(&self, last_eligible_payment: NaiveDate) -> bool {
        self.payoff_date()
            .map(|d| d < last_eligible_payment)
            .unwrap_or(false)
    }

    pub fn total_paid(&self) -> Money {
        self.rows
            .iter()
            .map(|r| r.payment)
            .fold(Money::ZERO, |acc, x| acc + x)
    }
}
