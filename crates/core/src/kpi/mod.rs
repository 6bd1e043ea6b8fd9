//! Ratio, goal-attainment and variance KPIs.
//!
//! Every ratio here is zero-guarded: a zero denominator yields zero, never
//! NaN or a panic, so dashboards render zeros for companies with no activity.

pub mod service;
pub mod types;

#[cfg(test)]
mod tests;

pub use service::{CRITICAL_COGS_PERCENT, KpiService, WARNING_GOAL_RATIO};
pub use types::{
    Direction, HealthStatus, Ratios, Scorecard, TargetComparison, Variance, VarianceStatus,
};
