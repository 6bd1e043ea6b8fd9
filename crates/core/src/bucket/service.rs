//! Bucketing service.

use std::collections::HashMap;

use chrono::{Datelike, Days, NaiveDate};
use gastrofin_shared::types::WeekStart;
use rust_decimal::Decimal;

use super::types::{CategoryTotal, Granularity, TimeBucket};
use crate::error::AggregationError;
use crate::ledger::{EntryKind, LedgerEntry, validate_entries};
use crate::money::{accumulate, ratio};
use crate::period::{DateRange, start_of_week};

/// Category name for entries recorded without one.
pub const UNCATEGORIZED: &str = "uncategorized";

/// Service for chart time series.
pub struct BucketService;

impl BucketService {
    /// One bucket per day of `range`, zero-filled.
    ///
    /// # Errors
    ///
    /// Returns an error if an entry has a negative amount.
    pub fn by_day(
        entries: &[LedgerEntry],
        range: &DateRange,
    ) -> Result<Vec<TimeBucket>, AggregationError> {
        Self::bucket(entries, range, Granularity::Day)
    }

    /// One bucket per week overlapping `range`, zero-filled and clipped to it.
    ///
    /// # Errors
    ///
    /// Returns an error if an entry has a negative amount.
    pub fn by_week(
        entries: &[LedgerEntry],
        range: &DateRange,
        week_start: WeekStart,
    ) -> Result<Vec<TimeBucket>, AggregationError> {
        Self::bucket(entries, range, Granularity::Week(week_start))
    }

    /// One bucket per month overlapping `range`, zero-filled and clipped to it.
    ///
    /// # Errors
    ///
    /// Returns an error if an entry has a negative amount.
    pub fn by_month(
        entries: &[LedgerEntry],
        range: &DateRange,
    ) -> Result<Vec<TimeBucket>, AggregationError> {
        Self::bucket(entries, range, Granularity::Month)
    }

    /// Buckets entries at the given granularity.
    ///
    /// # Errors
    ///
    /// Returns an error if an entry has a negative amount or a bucket total
    /// leaves the decimal range.
    pub fn bucket(
        entries: &[LedgerEntry],
        range: &DateRange,
        granularity: Granularity,
    ) -> Result<Vec<TimeBucket>, AggregationError> {
        validate_entries(entries)?;

        let mut buckets = Self::empty_buckets(range, granularity);
        for entry in entries.iter().filter(|e| range.contains(e.date)) {
            let idx = buckets.partition_point(|b| b.start <= entry.date);
            // idx >= 1: the first bucket starts at range.start.
            let Some(bucket) = idx.checked_sub(1).and_then(|i| buckets.get_mut(i)) else {
                continue;
            };
            match entry.kind {
                EntryKind::Revenue => accumulate(&mut bucket.revenue, entry.amount, "bucketing revenue")?,
                EntryKind::Expense => accumulate(&mut bucket.expense, entry.amount, "bucketing expenses")?,
                EntryKind::Cogs => accumulate(&mut bucket.cogs, entry.amount, "bucketing COGS")?,
            }
        }

        tracing::trace!(%range, ?granularity, buckets = buckets.len(), "entries bucketed");
        Ok(buckets)
    }

    fn empty_buckets(range: &DateRange, granularity: Granularity) -> Vec<TimeBucket> {
        match granularity {
            Granularity::Day => range
                .iter_days()
                .map(|day| TimeBucket::empty(day, day, day.format("%Y-%m-%d").to_string()))
                .collect(),
            Granularity::Week(week_start) => {
                let mut out = Vec::new();
                let mut cursor = Some(start_of_week(range.start(), week_start));
                while let Some(week) = cursor.filter(|c| *c <= range.end()) {
                    let week_end = week.checked_add_days(Days::new(6)).unwrap_or(NaiveDate::MAX);
                    out.push(TimeBucket::empty(
                        week.max(range.start()),
                        week_end.min(range.end()),
                        week.format("%Y-%m-%d").to_string(),
                    ));
                    cursor = week.checked_add_days(Days::new(7));
                }
                out
            }
            Granularity::Month => {
                let mut out = Vec::new();
                let mut cursor = Some(DateRange::month_containing(range.start()));
                while let Some(month) = cursor.filter(|m| m.start() <= range.end()) {
                    let label = format!("{:04}-{:02}", month.start().year(), month.start().month());
                    if let Some(clipped) = month.intersect(range) {
                        out.push(TimeBucket::empty(clipped.start(), clipped.end(), label));
                    }
                    cursor = month
                        .end()
                        .checked_add_days(Days::new(1))
                        .map(DateRange::month_containing);
                }
                out
            }
        }
    }

    /// Totals of `kind` per category within `range`, largest first.
    ///
    /// # Errors
    ///
    /// Returns an error if an entry has a negative amount.
    pub fn group_by_category(
        entries: &[LedgerEntry],
        range: &DateRange,
        kind: EntryKind,
    ) -> Result<Vec<CategoryTotal>, AggregationError> {
        validate_entries(entries)?;

        let mut totals: HashMap<&str, Decimal> = HashMap::new();
        for entry in entries
            .iter()
            .filter(|e| e.kind == kind && range.contains(e.date))
        {
            let category = entry.category.as_deref().unwrap_or(UNCATEGORIZED);
            accumulate(totals.entry(category).or_default(), entry.amount, "summing a category")?;
        }

        let mut grand_total = Decimal::ZERO;
        for amount in totals.values() {
            accumulate(&mut grand_total, *amount, "summing categories")?;
        }
        let mut rows: Vec<CategoryTotal> = totals
            .into_iter()
            .map(|(category, amount)| CategoryTotal {
                category: category.to_string(),
                amount,
                share: ratio(amount, grand_total),
            })
            .collect();
        rows.sort_by(|a, b| b.amount.cmp(&a.amount).then_with(|| a.category.cmp(&b.category)));
        Ok(rows)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use gastrofin_shared::types::CompanyId;
    use rust_decimal_macros::dec;

    fn d(m: u32, day: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(2024, m, day).unwrap()
    }

    #[test]
    fn test_by_day_zero_fills_a_week() {
        let range = DateRange::new(d(1, 1), d(1, 7)).unwrap();
        let buckets = BucketService::by_day(&[], &range).unwrap();
        assert_eq!(buckets.len(), 7);
        assert!(buckets
            .iter()
            .all(|b| b.revenue.is_zero() && b.expense.is_zero() && b.cogs.is_zero()));
        assert_eq!(buckets[0].label, "2024-01-01");
        assert_eq!(buckets[6].label, "2024-01-07");
    }

    #[test]
    fn test_by_day_places_amounts() {
        let company = CompanyId::new();
        let entries = vec![
            LedgerEntry::new(company, d(1, 3), dec!(100), EntryKind::Revenue),
            LedgerEntry::new(company, d(1, 3), dec!(40), EntryKind::Expense),
            LedgerEntry::new(company, d(1, 3), dec!(30), EntryKind::Cogs),
            LedgerEntry::new(company, d(1, 9), dec!(999), EntryKind::Revenue),
        ];
        let range = DateRange::new(d(1, 1), d(1, 7)).unwrap();
        let buckets = BucketService::by_day(&entries, &range).unwrap();
        assert_eq!(buckets[2].revenue, dec!(100));
        assert_eq!(buckets[2].outflow(), dec!(70));
        assert_eq!(buckets[2].net(), dec!(30));
        let total: Decimal = buckets.iter().map(|b| b.revenue).sum();
        assert_eq!(total, dec!(100));
    }

    #[test]
    fn test_by_week_monday_and_sunday() {
        // 2024-01-01 is a Monday; 2024-01-07 a Sunday.
        let company = CompanyId::new();
        let entries = vec![LedgerEntry::new(company, d(1, 7), dec!(50), EntryKind::Revenue)];
        let range = DateRange::new(d(1, 1), d(1, 14)).unwrap();

        let monday = BucketService::by_week(&entries, &range, WeekStart::Monday).unwrap();
        assert_eq!(monday.len(), 2);
        assert_eq!(monday[0].revenue, dec!(50));
        assert_eq!(monday[1].label, "2024-01-08");

        let sunday = BucketService::by_week(&entries, &range, WeekStart::Sunday).unwrap();
        assert_eq!(sunday.len(), 3);
        assert_eq!(sunday[0].label, "2023-12-31");
        assert_eq!(sunday[0].start, d(1, 1));
        assert_eq!(sunday[0].end, d(1, 6));
        assert!(sunday[0].revenue.is_zero());
        assert_eq!(sunday[1].revenue, dec!(50));
        assert_eq!(sunday[2].start, d(1, 14));
        assert_eq!(sunday[2].end, d(1, 14));
    }

    #[test]
    fn test_by_month_clips_and_labels() {
        let company = CompanyId::new();
        let entries = vec![
            LedgerEntry::new(company, d(1, 20), dec!(10), EntryKind::Revenue),
            LedgerEntry::new(company, d(3, 5), dec!(30), EntryKind::Expense),
        ];
        let range = DateRange::new(d(1, 15), d(3, 10)).unwrap();
        let buckets = BucketService::by_month(&entries, &range).unwrap();
        let labels: Vec<&str> = buckets.iter().map(|b| b.label.as_str()).collect();
        assert_eq!(labels, vec!["2024-01", "2024-02", "2024-03"]);
        assert_eq!(buckets[0].start, d(1, 15));
        assert_eq!(buckets[1].end, d(2, 29));
        assert_eq!(buckets[2].end, d(3, 10));
        assert_eq!(buckets[0].revenue, dec!(10));
        assert!(buckets[1].revenue.is_zero());
        assert_eq!(buckets[2].expense, dec!(30));
    }

    #[test]
    fn test_group_by_category() {
        let company = CompanyId::new();
        let entries = vec![
            LedgerEntry::new(company, d(1, 2), dec!(600), EntryKind::Expense).with_category("aluguel"),
            LedgerEntry::new(company, d(1, 3), dec!(300), EntryKind::Expense).with_category("energia"),
            LedgerEntry::new(company, d(1, 4), dec!(100), EntryKind::Expense),
            LedgerEntry::new(company, d(1, 4), dec!(5000), EntryKind::Revenue).with_category("salao"),
        ];
        let range = DateRange::month(2024, 1).unwrap();
        let rows = BucketService::group_by_category(&entries, &range, EntryKind::Expense).unwrap();

        assert_eq!(rows.len(), 3);
        assert_eq!(rows[0].category, "aluguel");
        assert_eq!(rows[0].share, dec!(0.6));
        assert_eq!(rows[2].category, UNCATEGORIZED);
        assert_eq!(rows[2].share, dec!(0.1));
    }

    #[test]
    fn test_group_by_category_share_with_tiny_total() {
        let company = CompanyId::new();
        let entries = vec![
            LedgerEntry::new(company, d(1, 2), dec!(0.00000000000000000001), EntryKind::Cogs)
                .with_category("gelo"),
            LedgerEntry::new(company, d(1, 2), dec!(0), EntryKind::Cogs).with_category("agua"),
        ];
        let range = DateRange::month(2024, 1).unwrap();
        let rows = BucketService::group_by_category(&entries, &range, EntryKind::Cogs).unwrap();
        assert_eq!(rows[0].share, dec!(1));
        assert_eq!(rows[1].share, dec!(0));
    }

    #[test]
    fn test_bucket_outflow_saturates() {
        let mut bucket = TimeBucket::empty(d(1, 1), d(1, 1), "2024-01-01".to_string());
        bucket.expense = Decimal::MAX;
        bucket.cogs = Decimal::MAX;
        assert_eq!(bucket.outflow(), Decimal::MAX);
        assert_eq!(bucket.net(), -Decimal::MAX);
    }

    #[test]
    fn test_group_by_category_empty() {
        let range = DateRange::month(2024, 1).unwrap();
        assert!(BucketService::group_by_category(&[], &range, EntryKind::Expense)
            .unwrap()
            .is_empty());
    }
}
