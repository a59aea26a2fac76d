//! Display view of a payoff plan.
use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use crate::calendar::{format_full_date, format_month_year};
use crate::money::Money;
use crate::planner::PayoffPlan;
use crate::schedule::ScheduleRow;

/// what a results panel shows, with amounts and dates already formatted
#[derive(Debug, Serialize, Deserialize)]
pub struct PlanView {
    pub summary: SummaryView,
    pub window: WindowView,
    pub outcome: OutcomeView,
    pub schedule: Vec<RowView>,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct SummaryView {
    pub min_required: Money,
    pub total_monthly: Money,
    pub extra_payment: Money,
    pub min_required_display: String,
    pub total_monthly_display: String,
    pub extra_line: String,
    pub num_payments: u32,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct WindowView {
    pub first_payment: NaiveDate,
    pub last_eligible_payment: NaiveDate,
    pub promo_expiry: NaiveDate,
    pub description: String,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct OutcomeView {
    pub payoff_happened: bool,
    pub finished_early: bool,
    pub final_month: String,
    pub final_date_line: String,
    pub note: String,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct RowView {
    pub index: u32,
    pub date: String,
    pub payment: String,
    pub remaining: String,
}

impl From<&ScheduleRow> for RowView {
    fn from(row: &ScheduleRow) -> Self {
        RowView {
            index: row.index,
            date: format_full_date(row.date),
            payment: row.payment.format_currency(),
            remaining: row.remaining.format_currency(),
        }
    }
}

impl PlanView {
    pub fn from_plan(plan: &PayoffPlan) -> Self {
        let extra = plan.extra_payment();
        let extra_line = if extra.is_positive() {
            format!("Includes {} extra per month.", extra.format_currency())
        } else {
            "No extra payment included.".to_string()
        };

        let window = &plan.window;
        let description = format!(
            "Eligible payment window: {} to {} (strictly before {}).",
            format_full_date(window.first_payment),
            format_full_date(window.last_eligible_payment),
            format_full_date(plan.inputs.promo_expiry),
        );

        let payoff = plan.payoff_month();
        let final_date_line = if plan.payoff_happened() {
            format!("Estimated payoff date: {}", format_full_date(payoff))
        } else {
            format!(
                "Not fully paid off by {} with this total monthly payment.",
                format_full_date(window.last_eligible_payment)
            )
        };

        PlanView {
            summary: SummaryView {
                min_required: plan.min_required(),
                total_monthly: plan.total_monthly(),
                extra_payment: extra,
                min_required_display: plan.min_required().format_currency(),
                total_monthly_display: plan.total_monthly().format_currency(),
                extra_line,
                num_payments: plan.num_payments(),
            },
            window: WindowView {
                first_payment: window.first_payment,
                last_eligible_payment: window.last_eligible_payment,
                promo_expiry: plan.inputs.promo_expiry,
                description,
            },
            outcome: OutcomeView {
                payoff_happened: plan.payoff_happened(),
                finished_early: plan.finished_early(),
                final_month: format_month_year(payoff),
                final_date_line,
                note: plan.note.to_string(),
            },
            schedule: plan.schedule.rows().iter().map(RowView::from).collect(),
        }
    }
}
