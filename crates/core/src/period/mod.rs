//! Closed calendar ranges and the calendar helpers built on them.

pub mod range;

pub use gastrofin_shared::types::WeekStart;
pub use range::{DateRange, days_in_month, start_of_week};
