//! Core aggregation logic for Gastrofin.
//!
//! This crate turns ledger entries and monthly targets into the figures a
//! restaurant-group dashboard shows. It has ZERO database or async dependencies.
//!
//! # Modules
//!
//! - `ledger` - Revenue, expense and COGS entries
//! - `target` - Monthly goals per company
//! - `period` - Closed date ranges and calendar helpers
//! - `summary` - Period totals and profit
//! - `kpi` - Ratios, goal attainment, variances and health status
//! - `projection` - Run-rate and scenario projections
//! - `bucket` - Day/week/month chart series and category grouping
//! - `dre` - Income statement
//! - `comparison` - Period-over-period variances
//! - `money` - Amount bounds and overflow-safe arithmetic

pub mod bucket;
pub mod comparison;
pub mod dre;
pub mod error;
pub mod kpi;
pub mod ledger;
pub mod money;
pub mod period;
pub mod projection;
pub mod summary;
pub mod target;

pub use error::AggregationError;
