//! Store error types.

use gastrofin_core::AggregationError;
use gastrofin_shared::AppError;
use gastrofin_shared::types::CompanyId;
use thiserror::Error;

/// Reasons a raw row is rejected at the boundary.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum RowError {
    /// Required field is null or absent.
    #[error("Missing field: {0}")]
    MissingField(&'static str),

    /// Field holds a value that does not parse.
    #[error("Malformed {field}: {value}")]
    Malformed {
        /// Field name.
        field: &'static str,
        /// Rejected value.
        value: String,
    },

    /// Amount is below zero.
    #[error("Field {field} is negative: {value}")]
    Negative {
        /// Field name.
        field: &'static str,
        /// Rejected value.
        value: String,
    },

    /// Entry kind is not recognised.
    #[error("Unknown entry kind: {0}")]
    UnknownKind(String),

    /// Cost class is not recognised.
    #[error("Unknown cost class: {0}")]
    UnknownCostClass(String),

    /// Row converted but failed domain validation.
    #[error(transparent)]
    Invalid(#[from] AggregationError),
}

/// Data-store errors.
#[derive(Debug, Error)]
pub enum StoreError {
    /// Company is not registered.
    #[error("Company not found: {0}")]
    CompanyNotFound(CompanyId),

    /// A row of a collection was rejected.
    #[error("Invalid {collection} row {index}: {source}")]
    InvalidRow {
        /// Collection name (`entries`, `targets`).
        collection: &'static str,
        /// Zero-based row position.
        index: usize,
        /// Rejection reason.
        source: RowError,
    },

    /// Aggregation rejected the data.
    #[error(transparent)]
    Aggregation(#[from] AggregationError),

    /// Snapshot file could not be read.
    #[error("Failed to read {path}: {source}")]
    Io {
        /// File path.
        path: String,
        /// Underlying error.
        source: std::io::Error,
    },

    /// Snapshot file is not valid JSON for the expected shape.
    #[error("Malformed snapshot: {0}")]
    Json(#[from] serde_json::Error),
}

impl From<StoreError> for AppError {
    fn from(err: StoreError) -> Self {
        match err {
            StoreError::CompanyNotFound(_) => Self::NotFound(err.to_string()),
            StoreError::Aggregation(inner) => inner.into(),
            StoreError::InvalidRow { .. } | StoreError::Json(_) => Self::Validation(err.to_string()),
            StoreError::Io { .. } => Self::DataStore(err.to_string()),
        }
    }
}
