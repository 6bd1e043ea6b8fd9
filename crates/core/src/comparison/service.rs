//! Comparison service.

use super::types::PeriodComparison;
use crate::kpi::{Direction, KpiService};
use crate::summary::PeriodSummary;

/// Service for period-over-period comparisons.
pub struct ComparisonService;

impl ComparisonService {
    /// Compares `current` against `previous`.
    #[must_use]
    pub fn compare(current: &PeriodSummary, previous: &PeriodSummary) -> PeriodComparison {
        PeriodComparison {
            current: *current,
            previous: *previous,
            revenue: KpiService::variance(
                current.revenue(),
                previous.revenue(),
                Direction::HigherIsBetter,
            ),
            profit: KpiService::variance(
                current.profit(),
                previous.profit(),
                Direction::HigherIsBetter,
            ),
            expense: KpiService::variance(
                current.total_expense(),
                previous.total_expense(),
                Direction::LowerIsBetter,
            ),
        }
    }
}
