//! JSON snapshot of a company group's data.

use std::path::Path;

use gastrofin_core::ledger::{Company, LedgerEntry};
use gastrofin_core::target::Target;
use serde::{Deserialize, Serialize};

use crate::error::StoreError;
use crate::memory::MemoryStore;
use crate::raw::{RawLedgerRow, RawTargetRow};
use crate::store::LedgerStore;

/// Companies, raw ledger rows and raw target rows as exported by the data client.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Snapshot {
    /// Registered companies.
    #[serde(default)]
    pub companies: Vec<Company>,
    /// Ledger rows, validated on import.
    #[serde(default)]
    pub entries: Vec<RawLedgerRow>,
    /// Target rows, validated on import.
    #[serde(default)]
    pub targets: Vec<RawTargetRow>,
}

impl Snapshot {
    /// Reads a snapshot file.
    ///
    /// # Errors
    ///
    /// Returns an error if the file cannot be read or is not a snapshot.
    pub async fn load(path: impl AsRef<Path>) -> Result<Self, StoreError> {
        let path = path.as_ref();
        let raw = tokio::fs::read_to_string(path)
            .await
            .map_err(|source| StoreError::Io {
                path: path.display().to_string(),
                source,
            })?;
        let snapshot = Self::from_json(&raw)?;
        tracing::info!(
            path = %path.display(),
            companies = snapshot.companies.len(),
            entries = snapshot.entries.len(),
            targets = snapshot.targets.len(),
            "snapshot loaded"
        );
        Ok(snapshot)
    }

    /// Parses a snapshot from JSON text.
    ///
    /// # Errors
    ///
    /// Returns an error if the text is not a snapshot.
    pub fn from_json(raw: &str) -> Result<Self, StoreError> {
        Ok(serde_json::from_str(raw)?)
    }

    /// Validates every row and loads it into a fresh [`MemoryStore`].
    ///
    /// # Errors
    ///
    /// Fails on the first invalid row, or on rows of unregistered companies.
    pub async fn into_store(self) -> Result<MemoryStore, StoreError> {
        let store = MemoryStore::new();
        for company in self.companies {
            store.add_company(company).await;
        }

        for (index, row) in self.entries.into_iter().enumerate() {
            let entry = LedgerEntry::try_from(row).map_err(|source| {
                tracing::warn!(index, error = %source, "rejected ledger row");
                StoreError::InvalidRow {
                    collection: "entries",
                    index,
                    source,
                }
            })?;
            store.insert_ledger_entry(entry).await?;
        }

        for (index, row) in self.targets.into_iter().enumerate() {
            let target = Target::try_from(row).map_err(|source| {
                tracing::warn!(index, error = %source, "rejected target row");
                StoreError::InvalidRow {
                    collection: "targets",
                    index,
                    source,
                }
            })?;
            store.upsert_target(target).await?;
        }

        Ok(store)
    }
}
