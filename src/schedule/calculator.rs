use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::errors::{PayoffError, Result};
use crate::money::{ceil_div_cents, Money};

/// payment amounts needed to clear a balance over a fixed number of months
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct PaymentQuote {
    pub num_payments: u32,
    pub extra: Money,
    pub total_extra: Money,
    /// smallest equal payment, before extra, that clears the balance
    pub min_required: Money,
    /// `min_required + extra`
    pub total_monthly: Money,
}

/// minimum equal monthly payment at 0% interest
pub struct PaymentCalculator;

impl PaymentCalculator {
    /// quote the payment for `balance` over `num_payments` months
    ///
    /// `min_required` is the smallest amount with
    /// `num_payments * min_required + extra * num_payments >= balance`.
    pub fn quote(balance: Money, extra: Money, num_payments: u32) -> Result<PaymentQuote> {
        if num_payments == 0 {
            return Err(PayoffError::InvalidArgument {
                message: "payment count must be positive".to_string(),
            });
        }
        if !balance.is_positive() {
            return Err(PayoffError::InvalidArgument {
                message: format!("balance must be positive, got {}", balance),
            });
        }
        if extra.is_negative() {
            return Err(PayoffError::InvalidArgument {
                message: format!("extra payment must not be negative, got {}", extra),
            });
        }

        let total_extra = extra.checked_mul(num_payments).ok_or_else(|| PayoffError::Arithmetic {
            message: format!("extra {} over {} payments overflows", extra, num_payments),
        })?;
        let remaining_after_extra = balance.saturating_sub(total_extra).max(Money::ZERO);

        let min_required = if remaining_after_extra.is_zero() {
            Money::ZERO
        } else {
            Money::from_cents(ceil_div_cents(
                remaining_after_extra.as_cents(),
                i64::from(num_payments),
            ))
        };
        let total_monthly = min_required.checked_add(extra).ok_or_else(|| PayoffError::Arithmetic {
            message: "total monthly payment overflows".to_string(),
        })?;

        debug!(
            %balance,
            %extra,
            num_payments,
            %min_required,
            %total_monthly,
            "quoted monthly payment"
        );

        Ok(PaymentQuote {
            num_payments,
            extra,
            total_extra,
            min_required,
            total_monthly,
        })
    }
}
