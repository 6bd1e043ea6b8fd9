//! Loosely-typed rows as delivered by the data client.
//!
//! Every field is optional. Null amounts coalesce to zero here and nowhere
//! else; anything that cannot be trusted is rejected with a [`RowError`].
//! Amounts accept JSON numbers and numeric strings and are read as exact
//! decimals, never through a binary float.

use std::str::FromStr;

use chrono::NaiveDate;
use gastrofin_core::ledger::{CostClass, EntryKind, LedgerEntry};
use gastrofin_core::target::{Goals, Target};
use gastrofin_shared::types::{CompanyId, LedgerEntryId};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::error::RowError;

/// Ledger row before validation.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct RawLedgerRow {
    /// Entry id; a fresh one is assigned when absent.
    #[serde(default)]
    pub id: Option<String>,
    /// Owning company.
    #[serde(default)]
    pub company_id: Option<String>,
    /// Competence date (`YYYY-MM-DD`).
    #[serde(default)]
    pub date: Option<String>,
    /// Amount; null counts as zero.
    #[serde(default, with = "rust_decimal::serde::arbitrary_precision_option")]
    pub amount: Option<Decimal>,
    /// `revenue`, `expense` or `cogs`.
    #[serde(default)]
    pub kind: Option<String>,
    /// DRE category.
    #[serde(default)]
    pub category: Option<String>,
    /// `fixed` or `variable`; defaults to variable.
    #[serde(default)]
    pub cost_class: Option<String>,
}

/// Monthly target row before validation.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct RawTargetRow {
    /// Owning company.
    #[serde(default)]
    pub company_id: Option<String>,
    /// Month (1-12).
    #[serde(default)]
    pub month: Option<u32>,
    /// Year.
    #[serde(default)]
    pub year: Option<i32>,
    /// Revenue goal; null counts as zero.
    #[serde(default, with = "rust_decimal::serde::arbitrary_precision_option")]
    pub target_revenue: Option<Decimal>,
    /// Expense ceiling; null counts as zero.
    #[serde(default, with = "rust_decimal::serde::arbitrary_precision_option")]
    pub target_expense: Option<Decimal>,
    /// Profit goal; null counts as zero.
    #[serde(default, with = "rust_decimal::serde::arbitrary_precision_option")]
    pub target_profit: Option<Decimal>,
    /// COGS ratio; null means not configured.
    #[serde(default, with = "rust_decimal::serde::arbitrary_precision_option")]
    pub target_cogs_percent: Option<Decimal>,
}

impl TryFrom<RawLedgerRow> for LedgerEntry {
    type Error = RowError;

    fn try_from(row: RawLedgerRow) -> Result<Self, Self::Error> {
        let id = match row.id.as_deref() {
            Some(raw) => parse("id", raw, LedgerEntryId::from_str)?,
            None => LedgerEntryId::new(),
        };
        let company_id = parse(
            "company_id",
            required("company_id", row.company_id.as_deref())?,
            CompanyId::from_str,
        )?;
        let date = parse("date", required("date", row.date.as_deref())?, NaiveDate::from_str)?;
        let amount = non_negative("amount", row.amount.unwrap_or_default())?;

        let kind_raw = required("kind", row.kind.as_deref())?;
        let kind = EntryKind::from_str(kind_raw)
            .map_err(|_| RowError::UnknownKind(kind_raw.to_string()))?;
        let cost_class = match row.cost_class.as_deref() {
            Some(raw) => {
                CostClass::from_str(raw).map_err(|_| RowError::UnknownCostClass(raw.to_string()))?
            }
            None => CostClass::default(),
        };
        let category = row
            .category
            .map(|c| c.trim().to_string())
            .filter(|c| !c.is_empty());

        Ok(Self {
            id,
            company_id,
            date,
            amount,
            kind,
            category,
            cost_class,
        })
    }
}

impl TryFrom<RawTargetRow> for Target {
    type Error = RowError;

    fn try_from(row: RawTargetRow) -> Result<Self, Self::Error> {
        let company_id = parse(
            "company_id",
            required("company_id", row.company_id.as_deref())?,
            CompanyId::from_str,
        )?;
        let month = row.month.ok_or(RowError::MissingField("month"))?;
        let year = row.year.ok_or(RowError::MissingField("year"))?;

        let goals = Goals {
            target_revenue: non_negative(
                "target_revenue",
                row.target_revenue.unwrap_or_default(),
            )?,
            target_expense: non_negative(
                "target_expense",
                row.target_expense.unwrap_or_default(),
            )?,
            target_profit: row.target_profit.unwrap_or_default(),
            target_cogs_percent: row.target_cogs_percent,
        };

        let target = Self {
            company_id,
            month,
            year,
            goals,
        };
        target.validate()?;
        Ok(target)
    }
}

fn required<'a>(field: &'static str, value: Option<&'a str>) -> Result<&'a str, RowError> {
    value
        .map(str::trim)
        .filter(|v| !v.is_empty())
        .ok_or(RowError::MissingField(field))
}

fn parse<T, E>(
    field: &'static str,
    raw: &str,
    f: impl FnOnce(&str) -> Result<T, E>,
) -> Result<T, RowError> {
    f(raw.trim()).map_err(|_| RowError::Malformed {
        field,
        value: raw.to_string(),
    })
}

fn non_negative(field: &'static str, value: Decimal) -> Result<Decimal, RowError> {
    if value < Decimal::ZERO {
        return Err(RowError::Negative {
            field,
            value: value.to_string(),
        });
    }
    Ok(value)
}

#[cfg(test)]
mod tests {
    use super::*;
    use gastrofin_core::AggregationError;
    use rust_decimal_macros::dec;

    const COMPANY: &str = "0190a8b2-7c1e-7d3a-9f00-000000000001";

    fn ledger_row() -> RawLedgerRow {
        RawLedgerRow {
            id: None,
            company_id: Some(COMPANY.to_string()),
            date: Some("2024-01-15".to_string()),
            amount: Some(dec!(1250.5)),
            kind: Some("receita".to_string()),
            category: Some("  salao ".to_string()),
            cost_class: None,
        }
    }

    #[test]
    fn test_ledger_row_converts() {
        let entry = LedgerEntry::try_from(ledger_row()).unwrap();
        assert_eq!(entry.amount, dec!(1250.5));
        assert_eq!(entry.kind, EntryKind::Revenue);
        assert_eq!(entry.category.as_deref(), Some("salao"));
        assert_eq!(entry.cost_class, CostClass::Variable);
        assert_eq!(entry.company_id.to_string(), COMPANY);
    }

    #[test]
    fn test_null_amount_is_zero() {
        let row = RawLedgerRow {
            amount: None,
            ..ledger_row()
        };
        assert!(LedgerEntry::try_from(row).unwrap().amount.is_zero());
    }

    #[test]
    fn test_large_amount_keeps_every_cent() {
        let json = format!(
            r#"{{ "company_id": "{COMPANY}", "date": "2024-01-15", "amount": 98765432109876.54, "kind": "revenue" }}"#
        );
        let row: RawLedgerRow = serde_json::from_str(&json).unwrap();
        let entry = LedgerEntry::try_from(row).unwrap();
        assert_eq!(entry.amount, dec!(98765432109876.54));
        assert_eq!(entry.amount.to_string(), "98765432109876.54");
    }

    #[test]
    fn test_numeric_string_amount_is_exact() {
        let json = format!(
            r#"{{ "company_id": "{COMPANY}", "date": "2024-01-15", "amount": "10.50", "kind": "cogs" }}"#
        );
        let row: RawLedgerRow = serde_json::from_str(&json).unwrap();
        let entry = LedgerEntry::try_from(row).unwrap();
        assert_eq!(entry.amount.to_string(), "10.50");
    }

    #[test]
    fn test_null_amount_field_is_zero() {
        let json = format!(
            r#"{{ "company_id": "{COMPANY}", "date": "2024-01-15", "amount": null, "kind": "expense" }}"#
        );
        let row: RawLedgerRow = serde_json::from_str(&json).unwrap();
        assert_eq!(row.amount, None);
        assert!(LedgerEntry::try_from(row).unwrap().amount.is_zero());
    }

    #[test]
    fn test_negative_amount_rejected() {
        let row = RawLedgerRow {
            amount: Some(dec!(-10)),
            ..ledger_row()
        };
        assert!(matches!(
            LedgerEntry::try_from(row),
            Err(RowError::Negative { field: "amount", .. })
        ));
    }

    #[test]
    fn test_missing_and_malformed_fields() {
        let no_company = RawLedgerRow {
            company_id: None,
            ..ledger_row()
        };
        assert_eq!(
            LedgerEntry::try_from(no_company),
            Err(RowError::MissingField("company_id"))
        );

        let bad_date = RawLedgerRow {
            date: Some("15/01/2024".to_string()),
            ..ledger_row()
        };
        assert!(matches!(
            LedgerEntry::try_from(bad_date),
            Err(RowError::Malformed { field: "date", .. })
        ));

        let bad_kind = RawLedgerRow {
            kind: Some("transfer".to_string()),
            ..ledger_row()
        };
        assert_eq!(
            LedgerEntry::try_from(bad_kind),
            Err(RowError::UnknownKind("transfer".to_string()))
        );
    }

    #[test]
    fn test_target_row_converts() {
        let row = RawTargetRow {
            company_id: Some(COMPANY.to_string()),
            month: Some(3),
            year: Some(2024),
            target_revenue: Some(dec!(50000)),
            target_expense: None,
            target_profit: Some(dec!(-1000)),
            target_cogs_percent: Some(dec!(0.32)),
        };
        let target = Target::try_from(row).unwrap();
        assert_eq!(target.goals.target_revenue, dec!(50000));
        assert!(target.goals.target_expense.is_zero());
        assert_eq!(target.goals.target_profit, dec!(-1000));
        assert_eq!(target.goals.target_cogs_percent, Some(dec!(0.32)));
    }

    #[test]
    fn test_target_row_rejects_bad_values() {
        let base = RawTargetRow {
            company_id: Some(COMPANY.to_string()),
            month: Some(13),
            year: Some(2024),
            ..RawTargetRow::default()
        };
        assert_eq!(
            Target::try_from(base.clone()),
            Err(RowError::Invalid(AggregationError::InvalidMonth(13)))
        );

        let bad_pct = RawTargetRow {
            month: Some(1),
            target_cogs_percent: Some(dec!(1.5)),
            ..base
        };
        assert!(matches!(
            Target::try_from(bad_pct),
            Err(RowError::Invalid(AggregationError::InvalidPercent(_)))
        ));
    }
}
