/// extra payment - how a fixed extra amount changes the required minimum
use promo_payoff::chrono::NaiveDate;
use promo_payoff::{Money, PaymentDay, PayoffPlanner, YearMonth};
use tracing_subscriber::EnvFilter;

fn main() -> Result<(), Box<dyn std::error::Error>> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .init();

    println!("=== extra payment comparison ===\n");

    let expiry = NaiveDate::from_ymd_opt(2025, 6, 30).ok_or("bad date")?;

    for extra in [0, 50, 150, 400] {
        let plan = PayoffPlanner::builder()
            .balance(Money::from_cents(487_519))
            .promo_expiry(expiry)
            .payment_day(PaymentDay::new(31)?)
            .start_month(YearMonth::new(2024, 7)?)
            .extra_payment(Money::from_major(extra))
            .build()?
            .plan()?
            .into_plan()
            .ok_or("no eligible payments")?;

        println!(
            "extra {:>9}: minimum {:>10}, total {:>10}, {} of {} payments, {}",
            Money::from_major(extra).format_currency(),
            plan.min_required().format_currency(),
            plan.total_monthly().format_currency(),
            plan.schedule.len(),
            plan.num_payments(),
            plan.note,
        );
    }

    Ok(())
}
