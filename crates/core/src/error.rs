//! Aggregation error types.

use chrono::NaiveDate;
use gastrofin_shared::AppError;
use gastrofin_shared::types::LedgerEntryId;
use rust_decimal::Decimal;
use thiserror::Error;

/// Malformed input rejected at the boundary of the aggregation layer, or a
/// total that left the decimal range.
///
/// "No data" is never an error: empty collections and missing targets
/// reduce to zero-valued results instead.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum AggregationError {
    /// Date range start is after its end.
    #[error("Invalid date range: start {start} is after end {end}")]
    InvalidDateRange {
        /// Start date.
        start: NaiveDate,
        /// End date.
        end: NaiveDate,
    },

    /// Ledger entry carries a negative amount.
    #[error("Ledger entry {entry_id} has negative amount {amount}")]
    NegativeAmount {
        /// Offending entry.
        entry_id: LedgerEntryId,
        /// Amount as recorded.
        amount: Decimal,
    },

    /// Ledger entry amount exceeds the accepted money bound.
    #[error("Ledger entry {entry_id} amount {amount} exceeds the maximum of {max}")]
    AmountOutOfRange {
        /// Offending entry.
        entry_id: LedgerEntryId,
        /// Amount as recorded.
        amount: Decimal,
        /// Accepted maximum.
        max: Decimal,
    },

    /// Target goal value exceeds the accepted money bound.
    #[error("Target field {field} is out of range: {value}")]
    TargetOutOfRange {
        /// Field name.
        field: &'static str,
        /// Value as recorded.
        value: Decimal,
    },

    /// A sum left the decimal range.
    #[error("Arithmetic overflow while {0}")]
    Overflow(&'static str),

    /// Target carries a negative goal value.
    #[error("Target field {field} cannot be negative: {value}")]
    NegativeTarget {
        /// Field name.
        field: &'static str,
        /// Value as recorded.
        value: Decimal,
    },

    /// Percentage outside the closed interval [0, 1].
    #[error("Percentage must be between 0 and 1, got {0}")]
    InvalidPercent(Decimal),

    /// Calendar month outside 1..=12.
    #[error("Month must be between 1 and 12, got {0}")]
    InvalidMonth(u32),

    /// Period length shorter than the days already elapsed.
    #[error("Projection period of {total_days} days is shorter than {days_elapsed} elapsed days")]
    InvalidProjectionHorizon {
        /// Days already elapsed.
        days_elapsed: u32,
        /// Total days requested for the period.
        total_days: u32,
    },
}

impl From<AggregationError> for AppError {
    fn from(err: AggregationError) -> Self {
        match err {
            AggregationError::Overflow(_) => Self::Internal(err.to_string()),
            _ => Self::Validation(err.to_string()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;

    #[test]
    fn test_status_mapping() {
        let invalid: AppError = AggregationError::InvalidPercent(dec!(1.5)).into();
        assert_eq!(invalid.status_code(), 400);
        assert_eq!(invalid.error_code(), "VALIDATION_ERROR");

        let overflow: AppError = AggregationError::Overflow("summing revenue").into();
        assert_eq!(overflow.status_code(), 500);
        assert_eq!(overflow.error_code(), "INTERNAL_ERROR");
        assert_eq!(
            overflow.to_string(),
            "Internal error: Arithmetic overflow while summing revenue"
        );
    }
}
