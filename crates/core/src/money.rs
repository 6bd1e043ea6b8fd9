//! Bounds and overflow-safe helpers for money arithmetic.
//!
//! Aggregation never panics on decimal overflow: reductions over entries
//! fail with [`AggregationError::Overflow`], while derived figures on
//! already built summaries saturate.

use rust_decimal::Decimal;

use crate::error::AggregationError;

/// Largest magnitude accepted for a ledger amount or goal value (10^15).
pub const MAX_AMOUNT: Decimal = Decimal::from_parts(2_764_472_320, 232_830, 0, false, 0);

/// `numerator / denominator`, zero when the denominator is zero.
///
/// A quotient outside the decimal range saturates at `Decimal::MAX` or
/// `Decimal::MIN` according to its sign.
#[must_use]
pub fn ratio(numerator: Decimal, denominator: Decimal) -> Decimal {
    if denominator.is_zero() {
        return Decimal::ZERO;
    }
    numerator.checked_div(denominator).unwrap_or_else(|| {
        tracing::warn!(%numerator, %denominator, "ratio outside decimal range, saturated");
        if numerator.is_sign_negative() == denominator.is_sign_negative() {
            Decimal::MAX
        } else {
            Decimal::MIN
        }
    })
}

/// Adds `amount` into `total`.
pub(crate) fn accumulate(
    total: &mut Decimal,
    amount: Decimal,
    context: &'static str,
) -> Result<(), AggregationError> {
    *total = total
        .checked_add(amount)
        .ok_or(AggregationError::Overflow(context))?;
    Ok(())
}
