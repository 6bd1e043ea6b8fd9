//! Dashboard assembly: concurrent fetches feeding the pure engine.

use std::collections::HashMap;
use std::sync::Arc;

use chrono::{Datelike, NaiveDate};
use futures::future::try_join_all;
use gastrofin_core::bucket::{BucketService, TimeBucket};
use gastrofin_core::comparison::{ComparisonService, PeriodComparison};
use gastrofin_core::dre::{DreService, DreStatement};
use gastrofin_core::kpi::{KpiService, Scorecard};
use gastrofin_core::ledger::EntryKind;
use gastrofin_core::period::DateRange;
use gastrofin_core::projection::{ProjectionService, RunRateProjection, ScenarioProjection};
use gastrofin_core::summary::{CogsMode, SummaryService};
use gastrofin_core::target::Goals;
use gastrofin_shared::AggregationConfig;
use gastrofin_shared::types::CompanyId;
use serde::Serialize;

use crate::error::StoreError;
use crate::store::LedgerStore;

/// One company's KPI card.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct CompanyScorecard {
    /// Company.
    pub company_id: CompanyId,
    /// Display name, when the company is registered.
    pub name: Option<String>,
    /// KPIs against the company's own target.
    pub scorecard: Scorecard,
}

/// Everything the financial dashboard shows for a period.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct DashboardReport {
    /// Period covered.
    pub range: DateRange,
    /// Day the report was observed.
    pub as_of: NaiveDate,
    /// Group-level KPIs against the combined targets.
    pub consolidated: Scorecard,
    /// Per-company KPIs in request order.
    pub companies: Vec<CompanyScorecard>,
    /// Revenue run-rate to the end of the range.
    pub projection: RunRateProjection,
    /// Change against the previous period of equal length.
    pub comparison: Option<PeriodComparison>,
    /// Daily chart series.
    pub daily: Vec<TimeBucket>,
    /// Weekly chart series.
    pub weekly: Vec<TimeBucket>,
    /// Consolidated income statement.
    pub dre: DreStatement,
}

/// Builds dashboard reports from a [`LedgerStore`].
#[derive(Debug)]
pub struct DashboardService<S> {
    store: Arc<S>,
    config: AggregationConfig,
}

impl<S: LedgerStore> DashboardService<S> {
    /// Creates a service over `store`.
    #[must_use]
    pub const fn new(store: Arc<S>, config: AggregationConfig) -> Self {
        Self { store, config }
    }

    /// Full dashboard for `companies` over `range`, observed on `as_of`.
    ///
    /// Targets are those of the month `range` starts in. Each company's COGS
    /// comes from its entries, or from its target ratio (else the configured
    /// default) when it recorded none.
    ///
    /// # Errors
    ///
    /// Returns an error if a fetch fails or the store returns invalid data.
    #[tracing::instrument(skip(self, companies), fields(companies = companies.len()))]
    pub async fn overview(
        &self,
        companies: &[CompanyId],
        range: DateRange,
        as_of: NaiveDate,
    ) -> Result<DashboardReport, StoreError> {
        let store = self.store.as_ref();
        let previous_range = range.previous();
        let (year, month) = (range.start().year(), range.start().month());

        let previous_fetch = async {
            match previous_range {
                Some(prev) => store.fetch_ledger_entries(companies, prev, None).await,
                None => Ok(Vec::new()),
            }
        };
        let target_fetch = try_join_all(
            companies
                .iter()
                .map(|&company| store.fetch_target(company, month, year)),
        );

        let (directory, entries, previous_entries, targets) = tokio::try_join!(
            store.companies(),
            store.fetch_ledger_entries(companies, range, None),
            previous_fetch,
            target_fetch,
        )?;

        let goals: HashMap<CompanyId, Goals> = targets
            .into_iter()
            .flatten()
            .map(|t| (t.company_id, t.goals))
            .collect();
        let names: HashMap<CompanyId, String> =
            directory.into_iter().map(|c| (c.id, c.name)).collect();
        let default_percent = self.config.default_cogs_percent;
        let cogs_mode_for = |company: CompanyId| {
            CogsMode::actual_or_estimated_for(goals.get(&company), default_percent)
        };

        let current =
            SummaryService::summarize_by_company_with(&entries, &range, companies, cogs_mode_for)?;
        let per_company = current
            .iter()
            .map(|row| CompanyScorecard {
                company_id: row.company_id,
                name: names.get(&row.company_id).cloned(),
                scorecard: KpiService::scorecard(&row.summary, goals.get(&row.company_id)),
            })
            .collect();

        let total = current.total();
        let combined_goals = (!goals.is_empty())
            .then(|| Goals::combine(current.company_ids().filter_map(|id| goals.get(&id))));
        let consolidated = KpiService::scorecard(&total, combined_goals.as_ref());

        let comparison = match previous_range {
            Some(prev) => {
                let previous = SummaryService::summarize_by_company_with(
                    &previous_entries,
                    &prev,
                    companies,
                    cogs_mode_for,
                )?
                .total();
                Some(ComparisonService::compare(&total, &previous))
            }
            None => None,
        };

        let expense_lines = BucketService::group_by_category(&entries, &range, EntryKind::Expense)?;
        let report = DashboardReport {
            range,
            as_of,
            projection: ProjectionService::for_range(&total, &range, as_of),
            daily: BucketService::by_day(&entries, &range)?,
            weekly: BucketService::by_week(&entries, &range, self.config.week_start)?,
            dre: DreService::from_summary(&range, total, expense_lines),
            consolidated,
            companies: per_company,
            comparison,
        };

        tracing::info!(
            entries = entries.len(),
            targets = goals.len(),
            status = ?report.consolidated.status,
            "dashboard assembled"
        );
        Ok(report)
    }

    /// Scenario projections for `company` from the six months before `year`/`month`.
    ///
    /// Leading months without revenue are not history yet and are left out
    /// of the average.
    ///
    /// # Errors
    ///
    /// Returns an error for an invalid month or a failed fetch.
    #[tracing::instrument(skip(self))]
    pub async fn forecast(
        &self,
        company: CompanyId,
        year: i32,
        month: u32,
    ) -> Result<ScenarioProjection, StoreError> {
        let history = ProjectionService::history_range(year, month)?;
        let entries = self
            .store
            .fetch_ledger_entries(&[company], history, Some(EntryKind::Revenue))
            .await?;

        let monthly: Vec<_> = BucketService::by_month(&entries, &history)?
            .into_iter()
            .map(|b| b.revenue)
            .skip_while(|revenue| revenue.is_zero())
            .collect();

        let projection = ProjectionService::scenarios(&monthly);
        tracing::debug!(
            months = projection.months_considered,
            baseline = %projection.baseline,
            "forecast built"
        );
        Ok(projection)
    }
}
