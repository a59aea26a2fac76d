pub mod calculator;
pub mod simulator;
pub mod window;

pub use calculator::{PaymentCalculator, PaymentQuote};
pub use simulator::{PayoffSchedule, ScheduleRow};
pub use window::{count_payments_inclusive, last_eligible_payment, PaymentWindow};

/// upper bound on monthly steps in any window or schedule (50 years)
pub const MAX_SCHEDULE_MONTHS: u32 = 600;
