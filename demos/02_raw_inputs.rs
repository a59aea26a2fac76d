/// raw inputs - validating form text and persisting it as json
use promo_payoff::{PayoffOutcome, PayoffPlanner, RawInputs};

fn main() -> Result<(), Box<dyn std::error::Error>> {
    println!("=== raw input validation ===\n");

    let bad = RawInputs {
        balance: "12.345".to_string(),
        promo_expiry: "2024-02-30".to_string(),
        payment_day: "0".to_string(),
        start_month: "2024-01".to_string(),
        extra_payment: String::new(),
    };
    if let Err(errors) = bad.validate() {
        for e in &errors.errors {
            println!("{:>14}: {}", e.field.to_string(), e.message);
        }
    }

    println!("\n=== saved inputs ===\n");

    let saved = r#"{
        "balance": "3,250.00",
        "promo_expiry": "2025-03-01",
        "payment_day": "28",
        "start_month": "2024-04",
        "extra_payment": ""
    }"#;
    let raw: RawInputs = serde_json::from_str(saved)?;
    let inputs = raw.validate()?;

    match PayoffPlanner::from_inputs(inputs).plan()? {
        PayoffOutcome::Planned(plan) => {
            println!("{}", plan.to_view().window.description);
            for row in plan.to_view().schedule {
                println!("{:>3}  {:<20} {:>10} {:>12}", row.index, row.date, row.payment, row.remaining);
            }
            println!("\n{}", plan.note);
        }
        empty => println!("{}", empty),
    }

    // what a form layer would write back
    println!("\n{}", serde_json::to_string_pretty(&RawInputs::from(&inputs))?);

    Ok(())
}
