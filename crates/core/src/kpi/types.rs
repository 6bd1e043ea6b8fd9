//! KPI data types.

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::summary::PeriodSummary;

/// Percentage KPIs derived from a summary (fractions, 0.42 = 42%).
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Ratios {
    /// COGS over revenue.
    pub cogs_percent: Decimal,
    /// Profit over revenue.
    pub margin_percent: Decimal,
}

/// Which side of a target is good news.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Direction {
    /// Revenue, profit.
    HigherIsBetter,
    /// Expenses.
    LowerIsBetter,
}

/// Variance status classification.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum VarianceStatus {
    /// Better than target.
    Favorable,
    /// Worse than target.
    Unfavorable,
    /// Exactly on target.
    OnTarget,
}

/// Actual versus target for one metric.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Variance {
    /// Actual amount.
    pub actual: Decimal,
    /// Target amount.
    pub target: Decimal,
    /// `actual - target`.
    pub variance: Decimal,
    /// `variance / target`, zero when the target is zero.
    pub variance_percent: Decimal,
    /// Favorable or not, given the metric's direction.
    pub status: VarianceStatus,
}

/// Variances for every paired actual/target metric.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct TargetComparison {
    /// Revenue against its goal.
    pub revenue: Variance,
    /// Profit against its goal.
    pub profit: Variance,
    /// Total expense (COGS + fixed + variable) against its ceiling.
    pub expense: Variance,
}

/// Three-tier health classification used by alert banners.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum HealthStatus {
    /// Loss, or COGS above 40% of revenue.
    Critical,
    /// Profitable but below 80% of the revenue goal.
    Warning,
    /// Neither of the above.
    Stable,
}

/// Everything a KPI card needs for one scope and period.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct Scorecard {
    /// Underlying totals.
    pub summary: PeriodSummary,
    /// COGS and margin ratios.
    pub ratios: Ratios,
    /// Revenue over revenue goal (zero without a goal).
    pub goal_attainment: Decimal,
    /// Health tier.
    pub status: HealthStatus,
    /// Per-metric variances when a target exists.
    pub comparison: Option<TargetComparison>,
}
