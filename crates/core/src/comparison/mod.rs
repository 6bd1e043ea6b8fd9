//! Period-over-period comparison (week over week, month over month).

pub mod service;
pub mod types;

pub use service::ComparisonService;
pub use types::PeriodComparison;
