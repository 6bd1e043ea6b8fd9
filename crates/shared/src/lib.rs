//! Shared ids, errors, and configuration for Gastrofin.
//!
//! This crate provides common types used across all other crates:
//! - Typed IDs for companies and ledger entries
//! - The week-start convention shared by calendar bucketing
//! - Application-wide error types
//! - Configuration management

pub mod config;
pub mod error;
pub mod types;

pub use config::{AggregationConfig, AppConfig, SnapshotConfig};
pub use error::{AppError, AppResult};
