//! Target data types.

use gastrofin_shared::types::CompanyId;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::error::AggregationError;
use crate::money::{MAX_AMOUNT, ratio};
use crate::period::DateRange;

/// Goal values configured for a period.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Goals {
    /// Revenue goal.
    #[serde(default)]
    pub target_revenue: Decimal,
    /// Expense ceiling (COGS plus operating expenses).
    #[serde(default)]
    pub target_expense: Decimal,
    /// Profit goal.
    #[serde(default)]
    pub target_profit: Decimal,
    /// Expected COGS ratio (fraction); `None` when not configured.
    #[serde(default)]
    pub target_cogs_percent: Option<Decimal>,
}

impl Goals {
    /// Sums the goals of several companies into one consolidated set.
    ///
    /// The consolidated COGS ratio is weighted by each company's revenue
    /// goal and only considers companies that configured one. Sums saturate
    /// at the decimal range.
    pub fn combine<'a>(goals: impl IntoIterator<Item = &'a Goals>) -> Self {
        let mut combined = Self::default();
        let mut weighted_cogs = Decimal::ZERO;
        let mut cogs_weight = Decimal::ZERO;
        let mut any_cogs = false;

        for g in goals {
            combined.target_revenue = combined.target_revenue.saturating_add(g.target_revenue);
            combined.target_expense = combined.target_expense.saturating_add(g.target_expense);
            combined.target_profit = combined.target_profit.saturating_add(g.target_profit);
            if let Some(pct) = g.target_cogs_percent {
                any_cogs = true;
                weighted_cogs = weighted_cogs.saturating_add(pct.saturating_mul(g.target_revenue));
                cogs_weight = cogs_weight.saturating_add(g.target_revenue);
            }
        }

        if any_cogs {
            combined.target_cogs_percent = Some(ratio(weighted_cogs, cogs_weight));
        }
        combined
    }

    /// Checks that goal values are usable.
    ///
    /// # Errors
    ///
    /// Returns an error for negative revenue/expense goals, any goal beyond
    /// [`MAX_AMOUNT`] in magnitude, or a COGS ratio outside `[0, 1]`.
    pub fn validate(&self) -> Result<(), AggregationError> {
        for (field, value) in [
            ("target_revenue", self.target_revenue),
            ("target_expense", self.target_expense),
        ] {
            if value < Decimal::ZERO {
                return Err(AggregationError::NegativeTarget { field, value });
            }
        }
        for (field, value) in [
            ("target_revenue", self.target_revenue),
            ("target_expense", self.target_expense),
            ("target_profit", self.target_profit),
        ] {
            if value.abs() > MAX_AMOUNT {
                return Err(AggregationError::TargetOutOfRange { field, value });
            }
        }
        if let Some(pct) = self.target_cogs_percent {
            validate_percent(pct)?;
        }
        Ok(())
    }
}

/// Monthly target for one company.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Target {
    /// Company the target applies to.
    pub company_id: CompanyId,
    /// Calendar month (1-12).
    pub month: u32,
    /// Calendar year.
    pub year: i32,
    /// Goal values.
    #[serde(flatten)]
    pub goals: Goals,
}

impl Target {
    /// Calendar range the target covers.
    pub fn range(&self) -> Result<DateRange, AggregationError> {
        DateRange::month(self.year, self.month)
    }

    /// Validates month and goal values.
    ///
    /// # Errors
    ///
    /// Returns an error if the month is out of range or the goals are invalid.
    pub fn validate(&self) -> Result<(), AggregationError> {
        if !(1..=12).contains(&self.month) {
            return Err(AggregationError::InvalidMonth(self.month));
        }
        self.goals.validate()
    }
}

/// Rejects ratios outside `[0, 1]`.
pub(crate) fn validate_percent(pct: Decimal) -> Result<(), AggregationError> {
    if pct < Decimal::ZERO || pct > Decimal::ONE {
        tracing::warn!(%pct, "rejected percentage outside [0, 1]");
        return Err(AggregationError::InvalidPercent(pct));
    }
    Ok(())
}
