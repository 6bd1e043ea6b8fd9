//! Data-store boundary for Gastrofin.
//!
//! The aggregation engine in `gastrofin-core` is pure; this crate supplies
//! what it is fed with. It defines the [`LedgerStore`] trait, an in-memory
//! implementation, validation of loosely-typed rows and the
//! [`DashboardService`] that fetches concurrently and aggregates.

pub mod dashboard;
pub mod error;
pub mod memory;
pub mod raw;
pub mod snapshot;
pub mod store;

pub use dashboard::{CompanyScorecard, DashboardReport, DashboardService};
pub use error::{RowError, StoreError};
pub use memory::MemoryStore;
pub use raw::{RawLedgerRow, RawTargetRow};
pub use snapshot::Snapshot;
pub use store::LedgerStore;
