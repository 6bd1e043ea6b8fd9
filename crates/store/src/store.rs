//! The data-store seam consumed by the dashboard.

use gastrofin_core::ledger::{Company, EntryKind, LedgerEntry};
use gastrofin_core::period::DateRange;
use gastrofin_core::target::Target;
use gastrofin_shared::types::CompanyId;

use crate::error::StoreError;

/// Read/write access to companies, ledger entries and monthly targets.
///
/// Implementations return already validated domain types; rows that fail
/// validation never leave the store.
#[async_trait::async_trait]
pub trait LedgerStore: Send + Sync {
    /// All registered companies, in registration order.
    async fn companies(&self) -> Result<Vec<Company>, StoreError>;

    /// Entries of `companies` dated within `range`, optionally of one kind.
    async fn fetch_ledger_entries(
        &self,
        companies: &[CompanyId],
        range: DateRange,
        kind_filter: Option<EntryKind>,
    ) -> Result<Vec<LedgerEntry>, StoreError>;

    /// Target of `company` for the given month, if one is configured.
    async fn fetch_target(
        &self,
        company: CompanyId,
        month: u32,
        year: i32,
    ) -> Result<Option<Target>, StoreError>;

    /// Creates or replaces the target for its company and month.
    async fn upsert_target(&self, target: Target) -> Result<(), StoreError>;

    /// Records a new ledger entry.
    async fn insert_ledger_entry(&self, entry: LedgerEntry) -> Result<(), StoreError>;
}
