/// quick start - minimal example to get started
use promo_payoff::chrono::NaiveDate;
use promo_payoff::{Money, PaymentDay, PayoffOutcome, PayoffPlanner, YearMonth};

fn main() -> Result<(), Box<dyn std::error::Error>> {
    // $1,200 on a promo that expires May 15, 2024, paying on the 15th
    let planner = PayoffPlanner::builder()
        .balance(Money::from_major(1_200))
        .promo_expiry(NaiveDate::from_ymd_opt(2024, 5, 15).ok_or("bad date")?)
        .payment_day(PaymentDay::new(15)?)
        .start_month(YearMonth::new(2024, 1)?)
        .build()?;

    match planner.plan()? {
        PayoffOutcome::Planned(plan) => println!("{}", plan.json()),
        empty @ PayoffOutcome::NoEligiblePayments { .. } => println!("{}", empty),
    }

    Ok(())
}
