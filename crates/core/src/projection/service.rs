//! Projection service.

use chrono::{Datelike, NaiveDate};
use rust_decimal::Decimal;

use super::types::{
    ProjectionHorizon, RunRateProjection, Scenario, ScenarioKind, ScenarioProjection,
};
use crate::error::AggregationError;
use crate::period::{DateRange, days_in_month};
use crate::summary::PeriodSummary;

/// Months of history averaged into the scenario baseline.
pub const TRAILING_MONTHS: usize = 6;

/// Decimal places kept on the scenario baseline.
const BASELINE_DP: u32 = 4;

/// Service for revenue projections.
pub struct ProjectionService;

impl ProjectionService {
    /// Extrapolates revenue to date by its daily average.
    ///
    /// With no elapsed days the projection is zero rather than a division by zero.
    ///
    /// # Errors
    ///
    /// Returns `AggregationError::InvalidProjectionHorizon` when a total period
    /// length is shorter than the elapsed days.
    pub fn run_rate(
        summary_to_date: &PeriodSummary,
        days_elapsed: u32,
        horizon: ProjectionHorizon,
    ) -> Result<RunRateProjection, AggregationError> {
        let days_remaining = match horizon {
            ProjectionHorizon::DaysRemaining(days) => days,
            ProjectionHorizon::TotalDays(total_days) => total_days
                .checked_sub(days_elapsed)
                .ok_or(AggregationError::InvalidProjectionHorizon {
                    days_elapsed,
                    total_days,
                })?,
        };

        Ok(Self::extrapolate(
            summary_to_date.revenue(),
            days_elapsed,
            days_remaining,
        ))
    }

    /// Run-rate for the calendar month of `as_of`, counting `as_of` as elapsed.
    ///
    /// # Errors
    ///
    /// Propagates calendar errors for out-of-range dates.
    pub fn month_to_date(
        summary_to_date: &PeriodSummary,
        as_of: NaiveDate,
    ) -> Result<RunRateProjection, AggregationError> {
        let total = days_in_month(as_of.year(), as_of.month())?;
        Self::run_rate(summary_to_date, as_of.day(), ProjectionHorizon::TotalDays(total))
    }

    /// Run-rate for an arbitrary range observed up to `as_of` (inclusive).
    #[must_use]
    pub fn for_range(
        summary_to_date: &PeriodSummary,
        range: &DateRange,
        as_of: NaiveDate,
    ) -> RunRateProjection {
        Self::extrapolate(
            summary_to_date.revenue(),
            range.elapsed_days(as_of),
            range.remaining_days(as_of),
        )
    }

    fn extrapolate(actual: Decimal, days_elapsed: u32, days_remaining: u32) -> RunRateProjection {
        if days_elapsed == 0 {
            return RunRateProjection {
                actual,
                days_elapsed,
                days_remaining,
                daily_average: Decimal::ZERO,
                projected_total: Decimal::ZERO,
            };
        }

        let daily_average = actual / Decimal::from(days_elapsed);
        let projected_total =
            actual.saturating_add(daily_average.saturating_mul(Decimal::from(days_remaining)));

        RunRateProjection {
            actual,
            days_elapsed,
            days_remaining,
            daily_average,
            projected_total,
        }
    }

    /// Mean of the last six values (fewer if fewer are given, zero if none).
    ///
    /// The sum saturates at the decimal range.
    #[must_use]
    pub fn trailing_baseline(monthly_revenues: &[Decimal]) -> Decimal {
        let skip = monthly_revenues.len().saturating_sub(TRAILING_MONTHS);
        let window = &monthly_revenues[skip..];
        if window.is_empty() {
            return Decimal::ZERO;
        }
        let sum = window
            .iter()
            .fold(Decimal::ZERO, |acc, revenue| acc.saturating_add(*revenue));
        (sum / Decimal::from(window.len())).round_dp(BASELINE_DP)
    }

    /// The `TRAILING_MONTHS` whole calendar months before `year`/`month`.
    ///
    /// # Errors
    ///
    /// Returns `AggregationError::InvalidMonth` for a month outside 1-12.
    pub fn history_range(year: i32, month: u32) -> Result<DateRange, AggregationError> {
        let current = DateRange::month(year, month)?;
        let end = current
            .start()
            .pred_opt()
            .ok_or(AggregationError::InvalidMonth(month))?;

        let mut first = current.start();
        for _ in 0..TRAILING_MONTHS {
            let last_of_previous = first.pred_opt().ok_or(AggregationError::InvalidMonth(month))?;
            first = DateRange::month_containing(last_of_previous).start();
        }
        DateRange::new(first, end)
    }

    /// Conservative/realistic/optimistic projections over the trailing baseline.
    ///
    /// `monthly_revenues` is ordered oldest first.
    #[must_use]
    pub fn scenarios(monthly_revenues: &[Decimal]) -> ScenarioProjection {
        let baseline = Self::trailing_baseline(monthly_revenues);
        let scenarios = ScenarioKind::ALL
            .iter()
            .map(|&kind| Scenario {
                kind,
                multiplier: kind.multiplier(),
                projected_revenue: baseline.saturating_mul(kind.multiplier()),
            })
            .collect();

        ScenarioProjection {
            months_considered: monthly_revenues.len().min(TRAILING_MONTHS),
            baseline,
            scenarios,
        }
    }
}
