//! Comparison types.

use serde::Serialize;

use crate::kpi::Variance;
use crate::summary::PeriodSummary;

/// Current period measured against the previous one.
///
/// Each variance uses the previous period as its target.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct PeriodComparison {
    /// Current period totals.
    pub current: PeriodSummary,
    /// Previous period totals.
    pub previous: PeriodSummary,
    /// Revenue change.
    pub revenue: Variance,
    /// Profit change.
    pub profit: Variance,
    /// Total expense change.
    pub expense: Variance,
}
