use chrono::NaiveDate;
use hourglass_rs::{SafeTimeProvider, TimeSource};
use serde::{Deserialize, Serialize};
use std::fmt;
use tracing::debug;

use crate::errors::{PayoffError, Result};
use crate::money::Money;
use crate::report::PlanView;
use crate::schedule::{PaymentCalculator, PaymentQuote, PaymentWindow, PayoffSchedule};
use crate::types::{PaymentDay, PayoffStatus, PlanNote, YearMonth};
use crate::validation::PayoffInputs;

/// computes 0% APR payoff plans for one set of inputs
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PayoffPlanner {
    inputs: PayoffInputs,
}

/// result of planning: either a plan or no payment date fits before expiry
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum PayoffOutcome {
    NoEligiblePayments { window: PaymentWindow },
    Planned(PayoffPlan),
}

impl PayoffOutcome {
    pub fn plan(&self) -> Option<&PayoffPlan> {
        match self {
            PayoffOutcome::Planned(plan) => Some(plan),
            PayoffOutcome::NoEligiblePayments { .. } => None,
        }
    }

    pub fn into_plan(self) -> Option<PayoffPlan> {
        match self {
            PayoffOutcome::Planned(plan) => Some(plan),
            PayoffOutcome::NoEligiblePayments { .. } => None,
        }
    }

    pub fn is_planned(&self) -> bool {
        matches!(self, PayoffOutcome::Planned(_))
    }

    pub fn window(&self) -> &PaymentWindow {
        match self {
            PayoffOutcome::Planned(plan) => &plan.window,
            PayoffOutcome::NoEligiblePayments { window } => window,
        }
    }
}

impl fmt::Display for PayoffOutcome {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            PayoffOutcome::NoEligiblePayments { .. } => f.write_str(
                "Start month is too late: there are no eligible payments before the promo expiration.",
            ),
            PayoffOutcome::Planned(plan) => write!(
                f,
                "{} per month ({} payments)",
                plan.total_monthly().format_currency(),
                plan.num_payments()
            ),
        }
    }
}

/// payoff plan for a non-empty window
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PayoffPlan {
    pub inputs: PayoffInputs,
    pub window: PaymentWindow,
    pub quote: PaymentQuote,
    pub schedule: PayoffSchedule,
    pub status: PayoffStatus,
    pub note: PlanNote,
}

impl PayoffPlan {
    pub fn min_required(&self) -> Money {
        self.quote.min_required
    }

    pub fn total_monthly(&self) -> Money {
        self.quote.total_monthly
    }

    pub fn extra_payment(&self) -> Money {
        self.quote.extra
    }

    /// payments available in the window, not the number of schedule rows
    pub fn num_payments(&self) -> u32 {
        self.quote.num_payments
    }

    pub fn payoff_happened(&self) -> bool {
        self.status.is_paid_off()
    }

    pub fn finished_early(&self) -> bool {
        matches!(self.status, PayoffStatus::PaidOff { early: true, .. })
    }

    /// payoff date if the balance clears, otherwise the last eligible date
    pub fn payoff_month(&self) -> NaiveDate {
        match self.status {
            PayoffStatus::PaidOff { date, .. } => date,
            PayoffStatus::NotPaidOff { .. } => self.window.last_eligible_payment,
        }
    }

    pub fn to_view(&self) -> PlanView {
        PlanView::from_plan(self)
    }

    /// pretty json of the display view
    pub fn to_json_pretty(&self) -> String {
        let view = self.to_view();
        serde_json::to_string_pretty(&view).unwrap_or_else(|e| format!("JSON error: {}", e))
    }

    /// short alias for json output
    pub fn json(&self) -> String {
        self.to_json_pretty()
    }
}

impl PayoffPlanner {
    pub fn builder<'a>() -> PayoffPlannerBuilder<'a> {
        PayoffPlannerBuilder::new()
    }

    pub fn from_inputs(inputs: PayoffInputs) -> Self {
        Self { inputs }
    }

    pub fn inputs(&self) -> &PayoffInputs {
        &self.inputs
    }

    /// resolve the window, quote the payment and simulate the schedule
    pub fn plan(&self) -> Result<PayoffOutcome> {
        let inputs = &self.inputs;
        let window = PaymentWindow::resolve(inputs.start_month, inputs.promo_expiry, inputs.payment_day)?;
        if window.is_empty() {
            debug!(
                first_payment = %window.first_payment,
                last_eligible_payment = %window.last_eligible_payment,
                "no eligible payments"
            );
            return Ok(PayoffOutcome::NoEligiblePayments { window });
        }

        let num_payments = window.payment_count()?;
        if num_payments == 0 {
            return Ok(PayoffOutcome::NoEligiblePayments { window });
        }

        let quote = PaymentCalculator::quote(inputs.balance, inputs.extra_payment, num_payments)?;
        let schedule = PayoffSchedule::simulate(inputs.balance, &window, quote.total_monthly)?;

        let status = match schedule.payoff_date() {
            Some(date) => PayoffStatus::PaidOff {
                date,
                early: date < window.last_eligible_payment,
            },
            None => PayoffStatus::NotPaidOff {
                remaining: schedule.final_balance().unwrap_or(inputs.balance),
            },
        };
        let note = classify_note(&status, &quote);

        debug!(num_payments, rows = schedule.len(), ?status, ?note, "planned payoff");

        Ok(PayoffOutcome::Planned(PayoffPlan {
            inputs: *inputs,
            window,
            quote,
            schedule,
            status,
            note,
        }))
    }
}

fn classify_note(status: &PayoffStatus, quote: &PaymentQuote) -> PlanNote {
    match status {
        PayoffStatus::NotPaidOff { .. } => PlanNote::NotPaidOff,
        _ if quote.min_required.is_zero() && quote.extra.is_positive() => PlanNote::ExtraCoversBalance,
        PayoffStatus::PaidOff { early: true, .. } => PlanNote::FinishedEarly,
        PayoffStatus::PaidOff { .. } => PlanNote::Standard,
    }
}

/// builder for payoff planners
pub struct PayoffPlannerBuilder<'a> {
    balance: Option<Money>,
    promo_expiry: Option<NaiveDate>,
    payment_day: Option<PaymentDay>,
    start_month: Option<YearMonth>,
    extra_payment: Option<Money>,
    time_provider: Option<&'a SafeTimeProvider>,
}

impl<'a> Default for PayoffPlannerBuilder<'a> {
    fn default() -> Self {
        Self::new()
    }
}

impl<'a> PayoffPlannerBuilder<'a> {
    pub fn new() -> Self {
        Self {
            balance: None,
            promo_expiry: None,
            payment_day: None,
            start_month: None,
            extra_payment: None,
            time_provider: None,
        }
    }

    /// time source used to default the start month
    pub fn set_time(mut self, time: &'a SafeTimeProvider) -> Self {
        self.time_provider = Some(time);
        self
    }

    pub fn balance(mut self, balance: Money) -> Self {
        self.balance = Some(balance);
        self
    }

    pub fn promo_expiry(mut self, date: NaiveDate) -> Self {
        self.promo_expiry = Some(date);
        self
    }

    pub fn payment_day(mut self, day: PaymentDay) -> Self {
        self.payment_day = Some(day);
        self
    }

    pub fn start_month(mut self, month: YearMonth) -> Self {
        self.start_month = Some(month);
        self
    }

    pub fn extra_payment(mut self, extra: Money) -> Self {
        self.extra_payment = Some(extra);
        self
    }

    /// Build with stored time or system time if not set
    pub fn build(self) -> Result<PayoffPlanner> {
        match self.time_provider {
            Some(time) => self.build_with_time(time),
            None => {
                let time = SafeTimeProvider::new(TimeSource::System);
                self.build_with_time(&time)
            }
        }
    }

    /// Build with explicit time provider
    pub fn build_with_time(self, time_provider: &SafeTimeProvider) -> Result<PayoffPlanner> {
        let balance = self.balance.ok_or(PayoffError::InvalidConfiguration {
            message: "Balance required".to_string(),
        })?;
        if !balance.is_positive() {
            return Err(PayoffError::InvalidConfiguration {
                message: format!("Balance must be greater than 0, got {}", balance),
            });
        }

        let promo_expiry = self.promo_expiry.ok_or(PayoffError::InvalidConfiguration {
            message: "Promo expiration date required".to_string(),
        })?;

        let payment_day = self.payment_day.ok_or(PayoffError::InvalidConfiguration {
            message: "Payment day required".to_string(),
        })?;

        let extra_payment = self.extra_payment.unwrap_or(Money::ZERO);
        if extra_payment.is_negative() {
            return Err(PayoffError::InvalidConfiguration {
                message: format!("Extra payment must not be negative, got {}", extra_payment),
            });
        }

        let start_month = self
            .start_month
            .unwrap_or_else(|| YearMonth::of(time_provider.now().date_naive()));

        Ok(PayoffPlanner {
            inputs: PayoffInputs {
                balance,
                promo_expiry,
                payment_day,
                start_month,
                extra_payment,
            },
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{TimeZone, Utc};

    fn ymd(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    fn planner(balance: Money, start: (i32, u32), expiry: NaiveDate, day: u32, extra: Money) -> PayoffPlanner {
        PayoffPlanner::builder()
            .balance(balance)
            .start_month(YearMonth::new(start.0, start.1).unwrap())
            .promo_expiry(expiry)
            .payment_day(PaymentDay::new(day).unwrap())
            .extra_payment(extra)
            .build()
            .unwrap()
    }

    #[test]
    fn test_end_to_end_exact_payoff() {
        let outcome = planner(Money::from_major(1_200), (2024, 1), ymd(2024, 5, 15), 15, Money::ZERO)
            .plan()
            .unwrap();
        let plan = outcome.plan().unwrap();

        assert_eq!(plan.window.first_payment, ymd(2024, 1, 15));
        assert_eq!(plan.window.last_eligible_payment, ymd(2024, 4, 15));
        assert_eq!(plan.num_payments(), 4);
        assert_eq!(plan.min_required(), Money::from_major(300));
        assert_eq!(plan.total_monthly(), Money::from_major(300));
        assert_eq!(plan.schedule.len(), 4);
        assert_eq!(plan.schedule.rows()[3].remaining, Money::ZERO);
        assert_eq!(plan.status, PayoffStatus::PaidOff { date: ymd(2024, 4, 15), early: false });
        assert_eq!(plan.note, PlanNote::Standard);
        assert_eq!(plan.payoff_month(), ymd(2024, 4, 15));
    }

    #[test]
    fn test_start_too_late_is_reported_distinctly() {
        let outcome = planner(Money::from_major(500), (2024, 5), ymd(2024, 5, 15), 15, Money::ZERO)
            .plan()
            .unwrap();

        match &outcome {
            PayoffOutcome::NoEligiblePayments { window } => {
                assert_eq!(window.first_payment, ymd(2024, 5, 15));
                assert_eq!(window.last_eligible_payment, ymd(2024, 4, 15));
            }
            other => panic!("expected empty window, got {:?}", other),
        }
        assert!(!outcome.is_planned());
        assert!(outcome.to_string().contains("no eligible payments"));
    }

    #[test]
    fn test_extra_alone_covers_balance() {
        let outcome = planner(Money::from_major(1_000), (2024, 1), ymd(2024, 12, 31), 1, Money::from_major(250))
            .plan()
            .unwrap();
        let plan = outcome.plan().unwrap();

        assert_eq!(plan.min_required(), Money::ZERO);
        assert_eq!(plan.total_monthly(), Money::from_major(250));
        assert_eq!(plan.schedule.len(), 4);
        assert!(plan.finished_early());
        assert_eq!(plan.note, PlanNote::ExtraCoversBalance);
    }

    #[test]
    fn test_uneven_balance_last_payment_smaller() {
        // 850.00 left after extra rounds up to 283.34 a month, so the last
        // of the three payments is two cents short of the rest
        let outcome = planner(Money::from_major(1_000), (2024, 1), ymd(2024, 4, 1), 15, Money::from_major(50))
            .plan()
            .unwrap();
        let plan = outcome.plan().unwrap();

        assert_eq!(plan.num_payments(), 3);
        assert_eq!(plan.min_required(), Money::from_cents(28_334));
        assert_eq!(plan.total_monthly(), Money::from_cents(33_334));
        assert_eq!(plan.schedule.rows()[2].payment, Money::from_cents(33_332));
        assert!(plan.payoff_happened());
        assert!(!plan.finished_early());
        assert_eq!(plan.note, PlanNote::Standard);
    }

    #[test]
    fn test_plan_is_repeatable() {
        let p = planner(Money::from_cents(777_777), (2024, 1), ymd(2025, 7, 31), 31, Money::from_cents(1_234));
        assert_eq!(p.plan().unwrap(), p.plan().unwrap());
    }

    #[test]
    fn test_more_extra_never_raises_min_required() {
        let mut previous = None;
        for extra in [0, 100, 5_000, 25_000, 100_000, 1_000_000] {
            let plan = planner(Money::from_major(3_000), (2024, 1), ymd(2025, 1, 20), 20, Money::from_cents(extra))
                .plan()
                .unwrap()
                .into_plan()
                .unwrap();
            if let Some(prev) = previous {
                assert!(plan.min_required() <= prev);
            }
            assert!(plan.payoff_happened());
            previous = Some(plan.min_required());
        }
    }

    #[test]
    fn test_builder_requires_fields() {
        let err = PayoffPlanner::builder()
            .promo_expiry(ymd(2024, 5, 15))
            .payment_day(PaymentDay::new(15).unwrap())
            .build()
            .unwrap_err();
        assert!(matches!(err, PayoffError::InvalidConfiguration { .. }));

        let err = PayoffPlanner::builder()
            .balance(Money::from_major(10))
            .promo_expiry(ymd(2024, 5, 15))
            .build()
            .unwrap_err();
        assert!(matches!(err, PayoffError::InvalidConfiguration { .. }));
    }

    #[test]
    fn test_builder_rejects_negative_extra() {
        let err = PayoffPlanner::builder()
            .balance(Money::from_major(10))
            .promo_expiry(ymd(2024, 5, 15))
            .payment_day(PaymentDay::new(15).unwrap())
            .extra_payment(Money::from_cents(-1))
            .build()
            .unwrap_err();
        assert!(matches!(err, PayoffError::InvalidConfiguration { .. }));
    }

    #[test]
    fn test_start_month_defaults_to_time_provider() {
        let time = SafeTimeProvider::new(TimeSource::Test(
            Utc.with_ymd_and_hms(2024, 3, 9, 12, 0, 0).unwrap(),
        ));

        let planner = PayoffPlanner::builder()
            .balance(Money::from_major(600))
            .promo_expiry(ymd(2024, 9, 1))
            .payment_day(PaymentDay::new(10).unwrap())
            .set_time(&time)
            .build()
            .unwrap();
        assert_eq!(planner.inputs().start_month, YearMonth::new(2024, 3).unwrap());

        let plan = planner.plan().unwrap().into_plan().unwrap();
        assert_eq!(plan.window.first_payment, ymd(2024, 3, 10));
        assert_eq!(plan.window.last_eligible_payment, ymd(2024, 8, 10));
        assert_eq!(plan.num_payments(), 6);
        assert_eq!(plan.min_required(), Money::from_major(100));
    }
}
