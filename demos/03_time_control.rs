/// time control - defaulting the start month from a test clock
use promo_payoff::chrono::{Months, NaiveDate, TimeZone, Utc};
use promo_payoff::{Money, PaymentDay, PayoffOutcome, PayoffPlanner, SafeTimeProvider, TimeSource};

fn main() -> Result<(), Box<dyn std::error::Error>> {
    let expiry = NaiveDate::from_ymd_opt(2024, 7, 10).ok_or("bad date")?;
    let first_run = Utc.with_ymd_and_hms(2024, 1, 20, 9, 0, 0).unwrap();

    // each month the same balance has one fewer payment to be spread over
    for offset in 0..8 {
        let now = first_run + Months::new(offset);
        let time = SafeTimeProvider::new(TimeSource::Test(now));

        let planner = PayoffPlanner::builder()
            .balance(Money::from_major(2_400))
            .promo_expiry(expiry)
            .payment_day(PaymentDay::new(5)?)
            .set_time(&time)
            .build()?;

        let month = planner.inputs().start_month;
        match planner.plan()? {
            PayoffOutcome::Planned(plan) => println!(
                "start {}: {} payments of {}",
                month,
                plan.num_payments(),
                plan.min_required().format_currency()
            ),
            empty => println!("start {}: {}", month, empty),
        }
    }

    Ok(())
}
