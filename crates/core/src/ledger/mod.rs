//! Ledger rows consumed by the aggregation layer.
//!
//! Entries are produced upstream (received receivables, paid payables,
//! chat-ingested quick entries) and are read-only here.

pub mod entry;
pub mod validation;

pub use entry::{Company, CostClass, EntryKind, LedgerEntry};
pub use validation::validate_entries;
