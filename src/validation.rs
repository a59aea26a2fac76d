//! Validation of user-entered text into typed planner inputs.
//!
//! Every field is checked and all failures are reported together, so a form
//! layer can mark each offending field at once.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use std::fmt;
use thiserror::Error;

use crate::calendar::parse_date;
use crate::money::Money;
use crate::types::{PaymentDay, YearMonth};

/// inputs exactly as typed, suitable for persisting between sessions
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct RawInputs {
    pub balance: String,
    /// `YYYY-MM-DD`
    pub promo_expiry: String,
    pub payment_day: String,
    /// `YYYY-MM`
    pub start_month: String,
    /// blank means no extra payment
    pub extra_payment: String,
}

/// validated planner inputs
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct PayoffInputs {
    pub balance: Money,
    pub promo_expiry: NaiveDate,
    pub payment_day: PaymentDay,
    pub start_month: YearMonth,
    pub extra_payment: Money,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum InputField {
    Balance,
    PromoExpiry,
    PaymentDay,
    StartMonth,
    ExtraPayment,
}

impl fmt::Display for InputField {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            InputField::Balance => "balance",
            InputField::PromoExpiry => "promo_expiry",
            InputField::PaymentDay => "payment_day",
            InputField::StartMonth => "start_month",
            InputField::ExtraPayment => "extra_payment",
        };
        f.write_str(name)
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FieldError {
    pub field: InputField,
    pub message: String,
}

#[derive(Error, Debug, Clone, PartialEq, Eq)]
#[error("{} invalid input field(s): {}", .errors.len(), summarize(.errors))]
pub struct ValidationErrors {
    pub errors: Vec<FieldError>,
}

fn summarize(errors: &[FieldError]) -> String {
    errors
        .iter()
        .map(|e| format!("{}: {}", e.field, e.message))
        .collect::<Vec<_>>()
        .join("; ")
}

impl ValidationErrors {
    /// first failing field in form order
    pub fn first_field(&self) -> Option<InputField> {
        self.errors.first().map(|e| e.field)
    }

    pub fn message_for(&self, field: InputField) -> Option<&str> {
        self.errors
            .iter()
            .find(|e| e.field == field)
            .map(|e| e.message.as_str())
    }
}

const BALANCE_MESSAGE: &str = "Enter a valid balance greater than 0 (up to 2 decimals).";
const PROMO_EXPIRY_MESSAGE: &str = "Choose a valid promo expiration date.";
const PAYMENT_DAY_MESSAGE: &str = "Payment day must be a whole number from 1 to 31.";
const START_MONTH_MESSAGE: &str = "Choose a valid start month.";
const EXTRA_PAYMENT_MESSAGE: &str = "Extra payment must be 0 or a positive amount (up to 2 decimals).";

impl RawInputs {
    pub fn validate(&self) -> Result<PayoffInputs, ValidationErrors> {
        let mut errors = Vec::new();
        let mut fail = |field, message: &str| {
            errors.push(FieldError {
                field,
                message: message.to_string(),
            })
        };

        let balance = match Money::parse_input(&self.balance) {
            Ok(Some(b)) if b.is_positive() => Some(b),
            _ => {
                fail(InputField::Balance, BALANCE_MESSAGE);
                None
            }
        };

        let promo_expiry = parse_date(&self.promo_expiry).ok();
        if promo_expiry.is_none() {
            fail(InputField::PromoExpiry, PROMO_EXPIRY_MESSAGE);
        }

        let payment_day = self.payment_day.parse::<PaymentDay>().ok();
        if payment_day.is_none() {
            fail(InputField::PaymentDay, PAYMENT_DAY_MESSAGE);
        }

        let start_month = self.start_month.parse::<YearMonth>().ok();
        if start_month.is_none() {
            fail(InputField::StartMonth, START_MONTH_MESSAGE);
        }

        let extra_payment = match Money::parse_input(&self.extra_payment) {
            Ok(None) => Some(Money::ZERO),
            Ok(Some(x)) if !x.is_negative() => Some(x),
            _ => {
                fail(InputField::ExtraPayment, EXTRA_PAYMENT_MESSAGE);
                None
            }
        };

        match (balance, promo_expiry, payment_day, start_month, extra_payment) {
            (Some(balance), Some(promo_expiry), Some(payment_day), Some(start_month), Some(extra_payment)) => {
                Ok(PayoffInputs {
                    balance,
                    promo_expiry,
                    payment_day,
                    start_month,
                    extra_payment,
                })
            }
            _ => Err(ValidationErrors { errors }),
        }
    }
}

impl From<&PayoffInputs> for RawInputs {
    fn from(inputs: &PayoffInputs) -> Self {
        RawInputs {
            balance: inputs.balance.to_string(),
            promo_expiry: inputs.promo_expiry.format("%Y-%m-%d").to_string(),
            payment_day: inputs.payment_day.to_string(),
            start_month: inputs.start_month.to_string(),
            extra_payment: if inputs.extra_payment.is_zero() {
                String::new()
            } else {
                inputs.extra_payment.to_string()
            },
        }
    }
}
