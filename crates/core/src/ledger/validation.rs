//! Boundary validation for ledger entries.

use rust_decimal::Decimal;

use super::entry::LedgerEntry;
use crate::error::AggregationError;
use crate::money::MAX_AMOUNT;

/// Rejects entries the aggregation layer cannot interpret.
///
/// # Errors
///
/// Returns `AggregationError::NegativeAmount` for the first entry with an
/// amount below zero, or `AggregationError::AmountOutOfRange` for one above
/// [`MAX_AMOUNT`].
pub fn validate_entries(entries: &[LedgerEntry]) -> Result<(), AggregationError> {
    for entry in entries {
        if entry.amount < Decimal::ZERO {
            tracing::warn!(entry_id = %entry.id, amount = %entry.amount, "negative ledger amount");
            return Err(AggregationError::NegativeAmount {
                entry_id: entry.id,
                amount: entry.amount,
            });
        }
        if entry.amount > MAX_AMOUNT {
            tracing::warn!(entry_id = %entry.id, amount = %entry.amount, "ledger amount out of range");
            return Err(AggregationError::AmountOutOfRange {
                entry_id: entry.id,
                amount: entry.amount,
                max: MAX_AMOUNT,
            });
        }
    }
    Ok(())
}
