pub mod calendar;
pub mod errors;
pub mod money;
pub mod planner;
pub mod report;
pub mod schedule;
pub mod types;
pub mod validation;

// re-export key types
pub use errors::{PayoffError, Result};
pub use money::{ceil_div_cents, Money};
pub use planner::{PayoffOutcome, PayoffPlan, PayoffPlanner, PayoffPlannerBuilder};
pub use report::PlanView;
pub use schedule::{
    count_payments_inclusive, last_eligible_payment, PaymentCalculator, PaymentQuote,
    PaymentWindow, PayoffSchedule, ScheduleRow, MAX_SCHEDULE_MONTHS,
};
pub use types::{PaymentDay, PayoffStatus, PlanNote, YearMonth};
pub use validation::{FieldError, InputField, PayoffInputs, RawInputs, ValidationErrors};

// re-export external dependencies that users will need
pub use chrono;
pub use hourglass_rs::{SafeTimeProvider, TimeSource};
pub use rust_decimal::Decimal;
