//! Summary data types.

use gastrofin_shared::types::CompanyId;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::error::AggregationError;
use crate::target::Goals;
use crate::target::types::validate_percent;

/// Where the COGS figure of a summary came from.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum CogsSource {
    /// Summed from COGS ledger entries.
    #[default]
    Actual,
    /// Revenue multiplied by an assumed ratio.
    Estimated,
}

/// How COGS is obtained for a period. Callers always pick one explicitly.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "mode", rename_all = "snake_case")]
pub enum CogsMode {
    /// Sum of COGS entries.
    Actual,
    /// `revenue × percent`; COGS entries are ignored.
    Estimated {
        /// Assumed ratio (fraction).
        percent: Decimal,
    },
    /// Actual COGS when any COGS entry exists for the filter, else the estimate.
    ActualOrEstimated {
        /// Ratio used when no COGS entry exists.
        percent: Decimal,
    },
}

impl CogsMode {
    /// Estimate from the target's COGS ratio, or `default_percent` when none is configured.
    #[must_use]
    pub fn estimated_for(goals: Option<&Goals>, default_percent: Decimal) -> Self {
        Self::Estimated {
            percent: Self::fallback_percent(goals, default_percent),
        }
    }

    /// Actual COGS, falling back to the target's ratio (or `default_percent`).
    #[must_use]
    pub fn actual_or_estimated_for(goals: Option<&Goals>, default_percent: Decimal) -> Self {
        Self::ActualOrEstimated {
            percent: Self::fallback_percent(goals, default_percent),
        }
    }

    fn fallback_percent(goals: Option<&Goals>, default_percent: Decimal) -> Decimal {
        goals
            .and_then(|g| g.target_cogs_percent)
            .unwrap_or(default_percent)
    }

    /// Checks the ratio of estimating modes.
    ///
    /// # Errors
    ///
    /// Returns `AggregationError::InvalidPercent` for a ratio outside `[0, 1]`.
    pub fn validate(&self) -> Result<(), AggregationError> {
        match self {
            Self::Actual => Ok(()),
            Self::Estimated { percent } | Self::ActualOrEstimated { percent } => {
                validate_percent(*percent)
            }
        }
    }
}

/// Derived totals for one period and company scope.
///
/// `profit` is never stored independently: the only constructor computes it
/// as `revenue - cogs - fixed_costs - variable_costs`, saturating at the
/// decimal range.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct PeriodSummary {
    revenue: Decimal,
    cogs: Decimal,
    fixed_costs: Decimal,
    variable_costs: Decimal,
    profit: Decimal,
    cogs_source: CogsSource,
}

impl PeriodSummary {
    /// Builds a summary, deriving profit.
    #[must_use]
    pub fn new(
        revenue: Decimal,
        cogs: Decimal,
        fixed_costs: Decimal,
        variable_costs: Decimal,
        cogs_source: CogsSource,
    ) -> Self {
        Self {
            revenue,
            cogs,
            fixed_costs,
            variable_costs,
            profit: revenue
                .saturating_sub(cogs)
                .saturating_sub(fixed_costs)
                .saturating_sub(variable_costs),
            cogs_source,
        }
    }

    /// Summary with every amount zero.
    #[must_use]
    pub fn zero() -> Self {
        Self::default()
    }

    /// Revenue.
    #[must_use]
    pub const fn revenue(&self) -> Decimal {
        self.revenue
    }

    /// Cost of goods sold.
    #[must_use]
    pub const fn cogs(&self) -> Decimal {
        self.cogs
    }

    /// Fixed operating costs.
    #[must_use]
    pub const fn fixed_costs(&self) -> Decimal {
        self.fixed_costs
    }

    /// Variable operating costs.
    #[must_use]
    pub const fn variable_costs(&self) -> Decimal {
        self.variable_costs
    }

    /// Profit, possibly negative.
    #[must_use]
    pub const fn profit(&self) -> Decimal {
        self.profit
    }

    /// Where `cogs` came from.
    #[must_use]
    pub const fn cogs_source(&self) -> CogsSource {
        self.cogs_source
    }

    /// COGS plus fixed and variable costs.
    #[must_use]
    pub fn total_expense(&self) -> Decimal {
        self.cogs
            .saturating_add(self.fixed_costs)
            .saturating_add(self.variable_costs)
    }

    /// Returns true if every amount is zero.
    #[must_use]
    pub fn is_zero(&self) -> bool {
        self.revenue.is_zero() && self.total_expense().is_zero()
    }
}

impl std::ops::Add for PeriodSummary {
    type Output = Self;

    fn add(self, rhs: Self) -> Self {
        let cogs_source = if self.cogs_source == CogsSource::Estimated
            || rhs.cogs_source == CogsSource::Estimated
        {
            CogsSource::Estimated
        } else {
            CogsSource::Actual
        };
        Self::new(
            self.revenue.saturating_add(rhs.revenue),
            self.cogs.saturating_add(rhs.cogs),
            self.fixed_costs.saturating_add(rhs.fixed_costs),
            self.variable_costs.saturating_add(rhs.variable_costs),
            cogs_source,
        )
    }
}

impl std::iter::Sum for PeriodSummary {
    fn sum<I: Iterator<Item = Self>>(iter: I) -> Self {
        iter.fold(Self::zero(), |acc, s| acc + s)
    }
}

/// One company's summary.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct CompanySummary {
    /// Company.
    pub company_id: CompanyId,
    /// Its summary.
    pub summary: PeriodSummary,
}

/// Per-company summaries in the order the companies were requested.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(transparent)]
pub struct CompanySummaries {
    rows: Vec<CompanySummary>,
}

impl CompanySummaries {
    pub(crate) fn push(&mut self, company_id: CompanyId, summary: PeriodSummary) {
        self.rows.push(CompanySummary {
            company_id,
            summary,
        });
    }

    /// Summary for one company, if it was requested.
    #[must_use]
    pub fn get(&self, company_id: CompanyId) -> Option<&PeriodSummary> {
        self.rows
            .iter()
            .find(|r| r.company_id == company_id)
            .map(|r| &r.summary)
    }

    /// Iterates in request order.
    pub fn iter(&self) -> impl Iterator<Item = &CompanySummary> {
        self.rows.iter()
    }

    /// Company ids in request order.
    pub fn company_ids(&self) -> impl Iterator<Item = CompanyId> + '_ {
        self.rows.iter().map(|r| r.company_id)
    }

    /// Number of companies.
    #[must_use]
    pub fn len(&self) -> usize {
        self.rows.len()
    }

    /// Returns true if no company was requested.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    /// Consolidated summary across all companies.
    #[must_use]
    pub fn total(&self) -> PeriodSummary {
        self.rows.iter().map(|r| r.summary).sum()
    }
}

impl<'a> IntoIterator for &'a CompanySummaries {
    type Item = &'a CompanySummary;
    type IntoIter = std::slice::Iter<'a, CompanySummary>;

    fn into_iter(self) -> Self::IntoIter {
        self.rows.iter()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;

    #[test]
    fn test_profit_is_derived() {
        let s = PeriodSummary::new(
            dec!(10000),
            dec!(3500),
            dec!(2000),
            dec!(1000),
            CogsSource::Actual,
        );
        assert_eq!(s.profit(), dec!(3500));
        assert_eq!(s.total_expense(), dec!(6500));
    }

    #[test]
    fn test_add_keeps_conservation() {
        let a = PeriodSummary::new(dec!(100), dec!(30), dec!(20), dec!(10), CogsSource::Actual);
        let b = PeriodSummary::new(dec!(50), dec!(60), dec!(0), dec!(5), CogsSource::Estimated);
        let sum = a + b;
        assert_eq!(sum.revenue(), dec!(150));
        assert_eq!(sum.profit(), dec!(25));
        assert_eq!(sum.cogs_source(), CogsSource::Estimated);
    }

    #[test]
    fn test_extreme_amounts_saturate() {
        let s = PeriodSummary::new(Decimal::MIN, Decimal::MAX, Decimal::MAX, dec!(0), CogsSource::Actual);
        assert_eq!(s.profit(), Decimal::MIN);
        assert_eq!(s.total_expense(), Decimal::MAX);

        let big = PeriodSummary::new(Decimal::MAX, dec!(0), dec!(0), dec!(0), CogsSource::Actual);
        assert_eq!((big + big).revenue(), Decimal::MAX);
    }

    #[test]
    fn test_estimated_for_prefers_target() {
        let goals = Goals {
            target_cogs_percent: Some(dec!(0.28)),
            ..Goals::default()
        };
        assert_eq!(
            CogsMode::estimated_for(Some(&goals), dec!(0.35)),
            CogsMode::Estimated { percent: dec!(0.28) }
        );
        assert_eq!(
            CogsMode::estimated_for(None, dec!(0.35)),
            CogsMode::Estimated { percent: dec!(0.35) }
        );
        assert_eq!(
            CogsMode::actual_or_estimated_for(Some(&Goals::default()), dec!(0.35)),
            CogsMode::ActualOrEstimated { percent: dec!(0.35) }
        );
    }

    #[test]
    fn test_mode_validation() {
        assert!(CogsMode::Actual.validate().is_ok());
        assert!(CogsMode::Estimated { percent: dec!(1) }.validate().is_ok());
        assert_eq!(
            CogsMode::Estimated { percent: dec!(-0.1) }.validate(),
            Err(AggregationError::InvalidPercent(dec!(-0.1)))
        );
    }
}
