//! Ledger entry domain types.

use chrono::NaiveDate;
use gastrofin_shared::types::{CompanyId, LedgerEntryId};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// What a ledger amount represents in the income statement.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum EntryKind {
    /// Sales and other operating income.
    Revenue,
    /// Operating expense (fixed or variable, see [`CostClass`]).
    Expense,
    /// Cost of goods sold (CMV).
    Cogs,
}

impl EntryKind {
    /// Stable lowercase name.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Revenue => "revenue",
            Self::Expense => "expense",
            Self::Cogs => "cogs",
        }
    }
}

impl std::fmt::Display for EntryKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl std::str::FromStr for EntryKind {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "revenue" | "receita" => Ok(Self::Revenue),
            "expense" | "despesa" => Ok(Self::Expense),
            "cogs" | "cmv" => Ok(Self::Cogs),
            _ => Err(format!("Unknown entry kind: {s}")),
        }
    }
}

/// Behaviour of an expense against sales volume.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum CostClass {
    /// Rent, salaries, subscriptions.
    Fixed,
    /// Card fees, delivery commissions, packaging.
    #[default]
    Variable,
}

impl std::str::FromStr for CostClass {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "fixed" | "fixa" | "fixo" => Ok(Self::Fixed),
            "variable" | "variavel" | "variável" => Ok(Self::Variable),
            _ => Err(format!("Unknown cost class: {s}")),
        }
    }
}

/// A single recorded amount for one company on one day.
///
/// Amounts are magnitudes; `kind` decides whether they add to or subtract
/// from profit.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LedgerEntry {
    /// Unique identifier for this entry.
    pub id: LedgerEntryId,
    /// Company the entry belongs to.
    pub company_id: CompanyId,
    /// Competence date.
    pub date: NaiveDate,
    /// Non-negative amount.
    pub amount: Decimal,
    /// Income-statement classification.
    pub kind: EntryKind,
    /// Optional DRE category (e.g. "aluguel", "ifood").
    #[serde(default)]
    pub category: Option<String>,
    /// Fixed/variable split; only meaningful for expenses.
    #[serde(default)]
    pub cost_class: CostClass,
}

impl LedgerEntry {
    /// Creates an uncategorised entry with a fresh id.
    #[must_use]
    pub fn new(company_id: CompanyId, date: NaiveDate, amount: Decimal, kind: EntryKind) -> Self {
        Self {
            id: LedgerEntryId::new(),
            company_id,
            date,
            amount,
            kind,
            category: None,
            cost_class: CostClass::default(),
        }
    }

    /// Sets the DRE category.
    #[must_use]
    pub fn with_category(mut self, category: impl Into<String>) -> Self {
        self.category = Some(category.into());
        self
    }

    /// Sets the fixed/variable classification.
    #[must_use]
    pub const fn with_cost_class(mut self, cost_class: CostClass) -> Self {
        self.cost_class = cost_class;
        self
    }

    /// Returns true for expenses classified as fixed.
    #[must_use]
    pub fn is_fixed_expense(&self) -> bool {
        self.kind == EntryKind::Expense && self.cost_class == CostClass::Fixed
    }
}

/// A company (restaurant unit) in the group.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Company {
    /// Company id, the scoping key for every aggregation.
    pub id: CompanyId,
    /// Display name.
    pub name: String,
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    #[rstest]
    #[case("revenue", EntryKind::Revenue)]
    #[case("Receita", EntryKind::Revenue)]
    #[case(" despesa ", EntryKind::Expense)]
    #[case("CMV", EntryKind::Cogs)]
    fn test_entry_kind_from_str(#[case] raw: &str, #[case] expected: EntryKind) {
        assert_eq!(raw.parse::<EntryKind>().unwrap(), expected);
    }

    #[rstest]
    #[case("fixed", CostClass::Fixed)]
    #[case("Fixa", CostClass::Fixed)]
    #[case("variavel", CostClass::Variable)]
    fn test_cost_class_from_str(#[case] raw: &str, #[case] expected: CostClass) {
        assert_eq!(raw.parse::<CostClass>().unwrap(), expected);
    }

    #[test]
    fn test_unknown_names_rejected() {
        assert!("transfer".parse::<EntryKind>().is_err());
        assert!("sometimes".parse::<CostClass>().is_err());
    }

    #[test]
    fn test_is_fixed_expense() {
        let date = NaiveDate::from_ymd_opt(2024, 1, 1).unwrap();
        let company = CompanyId::new();
        let rent = LedgerEntry::new(company, date, Decimal::ONE, EntryKind::Expense)
            .with_cost_class(CostClass::Fixed);
        let sale = LedgerEntry::new(company, date, Decimal::ONE, EntryKind::Revenue)
            .with_cost_class(CostClass::Fixed);
        assert!(rent.is_fixed_expense());
        assert!(!sale.is_fixed_expense());
    }
}
