//! In-memory [`LedgerStore`].

use std::collections::HashMap;

use gastrofin_core::ledger::{Company, EntryKind, LedgerEntry, validate_entries};
use gastrofin_core::period::DateRange;
use gastrofin_core::target::Target;
use gastrofin_shared::types::CompanyId;
use tokio::sync::RwLock;

use crate::error::StoreError;
use crate::store::LedgerStore;

#[derive(Debug, Default)]
struct State {
    companies: Vec<Company>,
    entries: Vec<LedgerEntry>,
    targets: HashMap<(CompanyId, i32, u32), Target>,
}

impl State {
    fn ensure_company(&self, id: CompanyId) -> Result<(), StoreError> {
        if self.companies.iter().any(|c| c.id == id) {
            Ok(())
        } else {
            Err(StoreError::CompanyNotFound(id))
        }
    }
}

/// Store backed by process memory, guarded by an async `RwLock`.
#[derive(Debug, Default)]
pub struct MemoryStore {
    state: RwLock<State>,
}

impl MemoryStore {
    /// Creates an empty store.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Registers a company, replacing the name if the id is known.
    pub async fn add_company(&self, company: Company) {
        let mut state = self.state.write().await;
        if let Some(existing) = state.companies.iter_mut().find(|c| c.id == company.id) {
            existing.name = company.name;
        } else {
            state.companies.push(company);
        }
    }

    /// Number of stored ledger entries.
    pub async fn entry_count(&self) -> usize {
        self.state.read().await.entries.len()
    }
}

#[async_trait::async_trait]
impl LedgerStore for MemoryStore {
    async fn companies(&self) -> Result<Vec<Company>, StoreError> {
        Ok(self.state.read().await.companies.clone())
    }

    async fn fetch_ledger_entries(
        &self,
        companies: &[CompanyId],
        range: DateRange,
        kind_filter: Option<EntryKind>,
    ) -> Result<Vec<LedgerEntry>, StoreError> {
        let state = self.state.read().await;
        let entries: Vec<LedgerEntry> = state
            .entries
            .iter()
            .filter(|e| {
                range.contains(e.date)
                    && companies.contains(&e.company_id)
                    && kind_filter.is_none_or(|k| e.kind == k)
            })
            .cloned()
            .collect();

        tracing::debug!(
            %range,
            companies = companies.len(),
            ?kind_filter,
            fetched = entries.len(),
            "ledger entries fetched"
        );
        Ok(entries)
    }

    async fn fetch_target(
        &self,
        company: CompanyId,
        month: u32,
        year: i32,
    ) -> Result<Option<Target>, StoreError> {
        Ok(self
            .state
            .read()
            .await
            .targets
            .get(&(company, year, month))
            .cloned())
    }

    async fn upsert_target(&self, target: Target) -> Result<(), StoreError> {
        target.validate()?;
        let mut state = self.state.write().await;
        state.ensure_company(target.company_id)?;
        state
            .targets
            .insert((target.company_id, target.year, target.month), target);
        Ok(())
    }

    async fn insert_ledger_entry(&self, entry: LedgerEntry) -> Result<(), StoreError> {
        validate_entries(std::slice::from_ref(&entry))?;
        let mut state = self.state.write().await;
        state.ensure_company(entry.company_id)?;
        state.entries.push(entry);
        Ok(())
    }
}
