use chrono::{Datelike, NaiveDate};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use crate::errors::{PayoffError, Result};
use crate::money::Money;

/// desired day of month for payments, always in `1..=31`
///
/// This is a policy input rather than a date: months shorter than the
/// requested day clamp down to their last day.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(try_from = "u32", into = "u32")]
pub struct PaymentDay(u32);

impl PaymentDay {
    pub const FIRST: PaymentDay = PaymentDay(1);
    pub const LAST: PaymentDay = PaymentDay(31);

    pub fn new(day: u32) -> Result<Self> {
        if (1..=31).contains(&day) {
            Ok(PaymentDay(day))
        } else {
            Err(PayoffError::InvalidPaymentDay {
                input: day.to_string(),
            })
        }
    }

    pub fn get(&self) -> u32 {
        self.0
    }
}

impl fmt::Display for PaymentDay {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl FromStr for PaymentDay {
    type Err = PayoffError;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        let s = s.trim();
        let invalid = || PayoffError::InvalidPaymentDay {
            input: s.to_string(),
        };
        if s.is_empty() || !s.bytes().all(|b| b.is_ascii_digit()) {
            return Err(invalid());
        }
        let day: u32 = s.parse().map_err(|_| invalid())?;
        PaymentDay::new(day)
    }
}

impl TryFrom<u32> for PaymentDay {
    type Error = PayoffError;

    fn try_from(day: u32) -> std::result::Result<Self, Self::Error> {
        PaymentDay::new(day)
    }
}

impl From<PaymentDay> for u32 {
    fn from(day: PaymentDay) -> Self {
        day.0
    }
}

/// calendar month, 1-based (`1` is January)
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct YearMonth {
    year: i32,
    month: u32,
}

impl YearMonth {
    pub fn new(year: i32, month: u32) -> Result<Self> {
        if !(1..=12).contains(&month) {
            return Err(PayoffError::InvalidDate {
                message: format!("month {} is outside 1 to 12", month),
            });
        }
        // reject years chrono cannot represent so every month has a first day
        if NaiveDate::from_ymd_opt(year, month, 1).is_none() {
            return Err(PayoffError::InvalidDate {
                message: format!("year {} is out of range", year),
            });
        }
        Ok(YearMonth { year, month })
    }

    /// month containing the given date
    pub fn of(date: NaiveDate) -> Self {
        YearMonth {
            year: date.year(),
            month: date.month(),
        }
    }

    pub fn year(&self) -> i32 {
        self.year
    }

    pub fn month(&self) -> u32 {
        self.month
    }
}

impl fmt::Display for YearMonth {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:04}-{:02}", self.year, self.month)
    }
}

impl FromStr for YearMonth {
    type Err = PayoffError;

    /// parse `YYYY-MM`
    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        let first_day = NaiveDate::parse_from_str(&format!("{}-01", s.trim()), "%Y-%m-%d").map_err(|e| {
            PayoffError::InvalidDate {
                message: format!("{:?} is not a YYYY-MM month: {}", s, e),
            }
        })?;
        Ok(YearMonth::of(first_day))
    }
}

impl TryFrom<String> for YearMonth {
    type Error = PayoffError;

    fn try_from(s: String) -> std::result::Result<Self, Self::Error> {
        s.parse()
    }
}

impl From<YearMonth> for String {
    fn from(ym: YearMonth) -> Self {
        ym.to_string()
    }
}

/// how a simulated schedule ended
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum PayoffStatus {
    /// balance reached zero on `date`
    PaidOff { date: NaiveDate, early: bool },
    /// window ran out with `remaining` still owed
    NotPaidOff { remaining: Money },
}

impl PayoffStatus {
    pub fn is_paid_off(&self) -> bool {
        matches!(self, PayoffStatus::PaidOff { .. })
    }
}

/// explanatory note shown alongside a plan
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum PlanNote {
    /// the total monthly payment still left a balance at the end of the window
    NotPaidOff,
    /// the extra payment alone retires the balance
    ExtraCoversBalance,
    /// payoff lands before the last eligible payment date
    FinishedEarly,
    /// equal payments through the whole window
    Standard,
}

impl fmt::Display for PlanNote {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let text = match self {
            PlanNote::NotPaidOff => {
                "Note: With the entered extra payment, the computed total monthly payment still didn't reach $0.00 by the last eligible payment date. Double-check inputs or increase the monthly payment."
            }
            PlanNote::ExtraCoversBalance => {
                "Note: Your extra payment alone is enough to pay off the balance within the eligible window. The required minimum payment (besides extra) is $0.00."
            }
            PlanNote::FinishedEarly => {
                "Note: With your extra payment, you may finish earlier than the last eligible payment date. The schedule stops once the remaining balance reaches $0.00."
            }
            PlanNote::Standard => {
                "Assumes 0% APR for the entire period and equal monthly payments on the chosen day (with short months clamped to the last day)."
            }
        };
        f.write_str(text)
    }
}
