//! DRE assembly.

use gastrofin_shared::types::CompanyId;

use super::types::DreStatement;
use crate::bucket::{BucketService, CategoryTotal};
use crate::error::AggregationError;
use crate::kpi::KpiService;
use crate::ledger::{EntryKind, LedgerEntry};
use crate::period::DateRange;
use crate::summary::{CogsMode, PeriodSummary, SummaryService};

/// Service for building income statements.
pub struct DreService;

impl DreService {
    /// Builds the DRE for `companies` over `range`.
    ///
    /// # Errors
    ///
    /// Returns an error if an entry has a negative amount or the COGS ratio is invalid.
    pub fn build(
        entries: &[LedgerEntry],
        range: &DateRange,
        companies: &[CompanyId],
        cogs_mode: CogsMode,
    ) -> Result<DreStatement, AggregationError> {
        let summary = SummaryService::summarize(entries, range, companies, cogs_mode)?;

        let scoped: Vec<LedgerEntry> = entries
            .iter()
            .filter(|e| companies.contains(&e.company_id))
            .cloned()
            .collect();
        let expense_lines = BucketService::group_by_category(&scoped, range, EntryKind::Expense)?;

        Ok(Self::from_summary(range, summary, expense_lines))
    }

    /// Lays out an already computed summary as a DRE.
    #[must_use]
    pub fn from_summary(
        range: &DateRange,
        summary: PeriodSummary,
        expense_lines: Vec<CategoryTotal>,
    ) -> DreStatement {
        let gross_revenue = summary.revenue();
        let gross_profit = gross_revenue.saturating_sub(summary.cogs());
        let contribution_margin = gross_profit.saturating_sub(summary.variable_costs());
        let operating_result = contribution_margin.saturating_sub(summary.fixed_costs());

        DreStatement {
            range: *range,
            gross_revenue,
            cogs: summary.cogs(),
            gross_profit,
            gross_margin_percent: KpiService::share_of_revenue(gross_profit, &summary),
            variable_costs: summary.variable_costs(),
            contribution_margin,
            contribution_margin_percent: KpiService::share_of_revenue(contribution_margin, &summary),
            fixed_costs: summary.fixed_costs(),
            operating_result,
            net_margin_percent: KpiService::share_of_revenue(operating_result, &summary),
            expense_lines,
            summary,
        }
    }
}
