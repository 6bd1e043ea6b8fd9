//! Period summary calculation.
//!
//! Reduces ledger entries filtered by date range and company set into
//! revenue, COGS, fixed/variable costs and profit.

pub mod service;
pub mod types;


pub use service::SummaryService;
pub use types::{CogsMode, CogsSource, CompanySummaries, CompanySummary, PeriodSummary};
