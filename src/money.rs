use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::ops::{Add, AddAssign, Sub, SubAssign};
use std::str::FromStr;

use crate::errors::{PayoffError, Result};

/// Money amount held as a whole number of cents
///
/// Arithmetic never leaves integer space. Conversion to [`Decimal`] only
/// happens for display and serialization, where the amount is written as a
/// two-place decimal string such as `"1234.50"`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Default, Serialize, Deserialize)]
#[serde(into = "Decimal", try_from = "Decimal")]
pub struct Money(i64);

impl Money {
    pub const ZERO: Money = Money(0);
    pub const CENT: Money = Money(1);

    /// create from a count of cents
    pub const fn from_cents(cents: i64) -> Self {
        Money(cents)
    }

    /// create from whole dollars
    pub const fn from_major(amount: i64) -> Self {
        Money(amount * 100)
    }

    /// cents as an integer
    pub const fn as_cents(&self) -> i64 {
        self.0
    }

    /// exact two-place decimal value
    pub fn to_decimal(&self) -> Decimal {
        Decimal::new(self.0, 2)
    }

    /// parse user-entered text
    ///
    /// Blank input means "not provided" and yields `Ok(None)`, which is not
    /// the same as zero. Commas are dropped as thousands separators. The rest
    /// must be digits with an optional `.` and at most two fractional digits.
    pub fn parse_input(text: &str) -> Result<Option<Self>> {
        let trimmed = text.trim();
        if trimmed.is_empty() {
            return Ok(None);
        }

        let invalid = || PayoffError::InvalidAmount {
            input: text.to_string(),
        };

        let cleaned: String = trimmed.chars().filter(|c| *c != ',').collect();
        let (whole, frac) = match cleaned.split_once('.') {
            Some((whole, frac)) => (whole, frac),
            None => (cleaned.as_str(), ""),
        };

        let all_digits = |s: &str| s.bytes().all(|b| b.is_ascii_digit());
        if whole.is_empty() || !all_digits(whole) || frac.len() > 2 || !all_digits(frac) {
            return Err(invalid());
        }

        let whole: i64 = whole.parse().map_err(|_| invalid())?;
        let frac_cents = match frac.len() {
            0 => 0,
            1 => i64::from(frac.as_bytes()[0] - b'0') * 10,
            _ => frac.parse::<i64>().map_err(|_| invalid())?,
        };

        whole
            .checked_mul(100)
            .and_then(|c| c.checked_add(frac_cents))
            .map(|cents| Some(Money(cents)))
            .ok_or_else(invalid)
    }

    /// check if zero
    pub fn is_zero(&self) -> bool {
        self.0 == 0
    }

    /// check if strictly positive
    pub fn is_positive(&self) -> bool {
        self.0 > 0
    }

    /// check if negative
    pub fn is_negative(&self) -> bool {
        self.0 < 0
    }

    /// minimum of two values
    pub fn min(self, other: Self) -> Self {
        Money(self.0.min(other.0))
    }

    /// maximum of two values
    pub fn max(self, other: Self) -> Self {
        Money(self.0.max(other.0))
    }

    /// multiply by a whole count, failing on overflow
    pub fn checked_mul(self, count: u32) -> Option<Self> {
        self.0.checked_mul(i64::from(count)).map(Money)
    }

    pub fn checked_add(self, other: Self) -> Option<Self> {
        self.0.checked_add(other.0).map(Money)
    }

    pub fn saturating_sub(self, other: Self) -> Self {
        Money(self.0.saturating_sub(other.0))
    }

    /// render as a dollar amount, e.g. `$1,234.50`
    pub fn format_currency(&self) -> String {
        let abs = self.0.unsigned_abs();
        let dollars = (abs / 100).to_string();
        let cents = abs % 100;

        let mut grouped = String::with_capacity(dollars.len() + dollars.len() / 3);
        for (i, ch) in dollars.chars().enumerate() {
            if i > 0 && (dollars.len() - i) % 3 == 0 {
                grouped.push(',');
            }
            grouped.push(ch);
        }

        let sign = if self.0 < 0 { "-" } else { "" };
        format!("{}${}.{:02}", sign, grouped, cents)
    }
}

/// smallest `q` with `q * denominator >= numerator`
///
/// Callers guarantee `numerator >= 0` and `denominator > 0`.
pub fn ceil_div_cents(numerator: i64, denominator: i64) -> i64 {
    debug_assert!(numerator >= 0, "ceil_div_cents: negative numerator {}", numerator);
    debug_assert!(denominator > 0, "ceil_div_cents: non-positive denominator {}", denominator);
    let quotient = numerator / denominator;
    if numerator % denominator == 0 {
        quotient
    } else {
        quotient + 1
    }
}

impl fmt::Display for Money {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.to_decimal())
    }
}

impl FromStr for Money {
    type Err = PayoffError;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        Money::parse_input(s)?.ok_or_else(|| PayoffError::InvalidAmount {
            input: s.to_string(),
        })
    }
}

impl From<Money> for Decimal {
    fn from(m: Money) -> Self {
        m.to_decimal()
    }
}

impl TryFrom<Decimal> for Money {
    type Error = PayoffError;

    fn try_from(d: Decimal) -> std::result::Result<Self, Self::Error> {
        if d.round_dp(2) != d {
            return Err(PayoffError::InvalidAmount {
                input: d.to_string(),
            });
        }
        let mut scaled = d;
        scaled.rescale(2);
        let mantissa = scaled.mantissa();
        i64::try_from(mantissa)
            .map(Money)
            .map_err(|_| PayoffError::Arithmetic {
                message: format!("amount {} does not fit in cents", d),
            })
    }
}

impl Add for Money {
    type Output = Money;

    fn add(self, other: Money) -> Money {
        Money(self.0 + other.0)
    }
}

impl AddAssign for Money {
    fn add_assign(&mut self, other: Money) {
        self.0 += other.0;
    }
}

impl Sub for Money {
    type Output = Money;

    fn sub(self, other: Money) -> Money {
        Money(self.0 - other.0)
    }
}

impl SubAssign for Money {
    fn sub_assign(&mut self, other: Money) {
        self.0 -= other.0;
    }
}
