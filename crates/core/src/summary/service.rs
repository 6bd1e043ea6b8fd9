//! Summary service for period reduction.

use std::collections::hash_map::Entry;
use std::collections::{HashMap, HashSet};

use gastrofin_shared::types::CompanyId;
use rust_decimal::Decimal;

use super::types::{CogsMode, CogsSource, CompanySummaries, PeriodSummary};
use crate::error::AggregationError;
use crate::ledger::{EntryKind, LedgerEntry, validate_entries};
use crate::money::accumulate;
use crate::period::DateRange;

/// Decimal places kept on estimated COGS (cents).
const MONEY_DP: u32 = 2;

/// Service for reducing ledger entries into period summaries.
pub struct SummaryService;

#[derive(Default)]
struct Totals {
    revenue: Decimal,
    cogs: Decimal,
    fixed: Decimal,
    variable: Decimal,
    has_cogs: bool,
}

impl SummaryService {
    /// Summarizes entries dated within `range` that belong to one of `companies`.
    ///
    /// Entries outside the filter are ignored; an empty result is a zero summary.
    ///
    /// # Errors
    ///
    /// Returns an error if an entry has a negative amount, the COGS ratio is
    /// invalid or a total leaves the decimal range.
    pub fn summarize(
        entries: &[LedgerEntry],
        range: &DateRange,
        companies: &[CompanyId],
        cogs_mode: CogsMode,
    ) -> Result<PeriodSummary, AggregationError> {
        validate_entries(entries)?;
        cogs_mode.validate()?;

        let scope: HashSet<CompanyId> = companies.iter().copied().collect();
        let matched = entries
            .iter()
            .filter(|e| range.contains(e.date) && scope.contains(&e.company_id));
        let summary = Self::reduce(matched, cogs_mode)?;

        tracing::debug!(
            %range,
            companies = scope.len(),
            revenue = %summary.revenue(),
            profit = %summary.profit(),
            "period summarized"
        );
        Ok(summary)
    }

    /// Runs the same reduction once per company.
    ///
    /// Output follows the order of `companies`; repeated ids keep their first
    /// position. Companies without entries get a zero summary.
    ///
    /// # Errors
    ///
    /// Returns an error if an entry has a negative amount or the COGS ratio is invalid.
    pub fn summarize_by_company(
        entries: &[LedgerEntry],
        range: &DateRange,
        companies: &[CompanyId],
        cogs_mode: CogsMode,
    ) -> Result<CompanySummaries, AggregationError> {
        Self::summarize_by_company_with(entries, range, companies, |_| cogs_mode)
    }

    /// Like [`Self::summarize_by_company`], with a COGS mode chosen per company
    /// (typically from each company's own target).
    ///
    /// # Errors
    ///
    /// Returns an error if an entry has a negative amount, any COGS ratio is
    /// invalid or a total leaves the decimal range.
    pub fn summarize_by_company_with<F>(
        entries: &[LedgerEntry],
        range: &DateRange,
        companies: &[CompanyId],
        mut cogs_mode_for: F,
    ) -> Result<CompanySummaries, AggregationError>
    where
        F: FnMut(CompanyId) -> CogsMode,
    {
        validate_entries(entries)?;

        let mut order = Vec::with_capacity(companies.len());
        let mut per_company: HashMap<CompanyId, Vec<&LedgerEntry>> = HashMap::new();
        for &id in companies {
            if let Entry::Vacant(slot) = per_company.entry(id) {
                slot.insert(Vec::new());
                order.push(id);
            }
        }

        for entry in entries.iter().filter(|e| range.contains(e.date)) {
            if let Some(bucket) = per_company.get_mut(&entry.company_id) {
                bucket.push(entry);
            }
        }

        let mut summaries = CompanySummaries::default();
        for id in order {
            let mode = cogs_mode_for(id);
            mode.validate()?;
            let rows = per_company.remove(&id).unwrap_or_default();
            summaries.push(id, Self::reduce(rows.into_iter(), mode)?);
        }

        tracing::debug!(%range, companies = summaries.len(), "period summarized per company");
        Ok(summaries)
    }

    /// Reduces already-filtered entries.
    fn reduce<'a>(
        entries: impl Iterator<Item = &'a LedgerEntry>,
        cogs_mode: CogsMode,
    ) -> Result<PeriodSummary, AggregationError> {
        let mut t = Totals::default();
        for entry in entries {
            match entry.kind {
                EntryKind::Revenue => accumulate(&mut t.revenue, entry.amount, "summing revenue")?,
                EntryKind::Cogs => {
                    accumulate(&mut t.cogs, entry.amount, "summing COGS")?;
                    t.has_cogs = true;
                }
                EntryKind::Expense if entry.is_fixed_expense() => {
                    accumulate(&mut t.fixed, entry.amount, "summing fixed costs")?;
                }
                EntryKind::Expense => {
                    accumulate(&mut t.variable, entry.amount, "summing variable costs")?;
                }
            }
        }

        let estimate = |percent: Decimal| {
            t.revenue
                .checked_mul(percent)
                .map(|cogs| cogs.round_dp(MONEY_DP))
                .ok_or(AggregationError::Overflow("estimating COGS"))
        };
        let (cogs, source) = match cogs_mode {
            CogsMode::Actual => (t.cogs, CogsSource::Actual),
            CogsMode::Estimated { percent } => (estimate(percent)?, CogsSource::Estimated),
            CogsMode::ActualOrEstimated { percent } => {
                if t.has_cogs {
                    (t.cogs, CogsSource::Actual)
                } else {
                    (estimate(percent)?, CogsSource::Estimated)
                }
            }
        };

        Ok(PeriodSummary::new(t.revenue, cogs, t.fixed, t.variable, source))
    }
}
