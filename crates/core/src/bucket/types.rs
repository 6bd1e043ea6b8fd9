//! Bucket data types.

use chrono::NaiveDate;
use gastrofin_shared::types::WeekStart;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// Width of a time bucket.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "unit", content = "week_start", rename_all = "snake_case")]
pub enum Granularity {
    /// One bucket per calendar day.
    Day,
    /// One bucket per week under the given convention.
    Week(WeekStart),
    /// One bucket per calendar month.
    Month,
}

/// Amounts for one chart point.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TimeBucket {
    /// First day covered (clipped to the requested range).
    pub start: NaiveDate,
    /// Last day covered (clipped to the requested range).
    pub end: NaiveDate,
    /// Display label.
    pub label: String,
    /// Revenue entries.
    pub revenue: Decimal,
    /// Expense entries (fixed and variable).
    pub expense: Decimal,
    /// COGS entries.
    pub cogs: Decimal,
}

impl TimeBucket {
    pub(crate) fn empty(start: NaiveDate, end: NaiveDate, label: String) -> Self {
        Self {
            start,
            end,
            label,
            revenue: Decimal::ZERO,
            expense: Decimal::ZERO,
            cogs: Decimal::ZERO,
        }
    }

    /// Expense plus COGS.
    #[must_use]
    pub fn outflow(&self) -> Decimal {
        self.expense.saturating_add(self.cogs)
    }

    /// Revenue minus outflow.
    #[must_use]
    pub fn net(&self) -> Decimal {
        self.revenue.saturating_sub(self.outflow())
    }
}

/// Total of one category within a kind.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CategoryTotal {
    /// Category name.
    pub category: String,
    /// Sum of amounts.
    pub amount: Decimal,
    /// Share of the kind's total (fraction, zero when the total is zero).
    pub share: Decimal,
}
