//! Income statement types.

use rust_decimal::Decimal;
use serde::Serialize;

use crate::bucket::CategoryTotal;
use crate::period::DateRange;
use crate::summary::PeriodSummary;

/// Income statement for a period and company scope.
///
/// Percentages are fractions of gross revenue and are zero when revenue is zero.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct DreStatement {
    /// Period covered.
    pub range: DateRange,
    /// Underlying summary.
    pub summary: PeriodSummary,
    /// Gross revenue.
    pub gross_revenue: Decimal,
    /// Cost of goods sold.
    pub cogs: Decimal,
    /// Revenue minus COGS.
    pub gross_profit: Decimal,
    /// Gross profit over revenue.
    pub gross_margin_percent: Decimal,
    /// Variable expenses.
    pub variable_costs: Decimal,
    /// Gross profit minus variable expenses.
    pub contribution_margin: Decimal,
    /// Contribution margin over revenue.
    pub contribution_margin_percent: Decimal,
    /// Fixed expenses.
    pub fixed_costs: Decimal,
    /// Contribution margin minus fixed expenses. Equals the summary profit.
    pub operating_result: Decimal,
    /// Operating result over revenue.
    pub net_margin_percent: Decimal,
    /// Expense entries grouped by category.
    pub expense_lines: Vec<CategoryTotal>,
}
