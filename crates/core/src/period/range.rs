//! Closed-closed date ranges.

use chrono::{Datelike, Days, NaiveDate};
use serde::{Deserialize, Serialize};

use crate::error::AggregationError;
use gastrofin_shared::types::WeekStart;

/// Inclusive `[start, end]` calendar range.
///
/// The only constructors validate `start <= end`, so every `DateRange` in
/// circulation is well formed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "DateRangeParts")]
pub struct DateRange {
    start: NaiveDate,
    end: NaiveDate,
}

#[derive(Deserialize)]
struct DateRangeParts {
    start: NaiveDate,
    end: NaiveDate,
}

impl TryFrom<DateRangeParts> for DateRange {
    type Error = AggregationError;

    fn try_from(parts: DateRangeParts) -> Result<Self, Self::Error> {
        Self::new(parts.start, parts.end)
    }
}

impl DateRange {
    /// Creates a range, rejecting `start > end`.
    pub fn new(start: NaiveDate, end: NaiveDate) -> Result<Self, AggregationError> {
        if start > end {
            tracing::warn!(%start, %end, "rejected inverted date range");
            return Err(AggregationError::InvalidDateRange { start, end });
        }
        Ok(Self { start, end })
    }

    /// Range covering a single day.
    #[must_use]
    pub const fn single_day(date: NaiveDate) -> Self {
        Self {
            start: date,
            end: date,
        }
    }

    /// Full calendar month.
    pub fn month(year: i32, month: u32) -> Result<Self, AggregationError> {
        let start =
            NaiveDate::from_ymd_opt(year, month, 1).ok_or(AggregationError::InvalidMonth(month))?;
        let end = start
            .checked_add_days(Days::new(u64::from(days_in_month(year, month)?) - 1))
            .ok_or(AggregationError::InvalidMonth(month))?;
        Ok(Self { start, end })
    }

    /// Calendar month containing `date`.
    #[must_use]
    pub fn month_containing(date: NaiveDate) -> Self {
        let start = date.with_day(1).unwrap_or(date);
        let end = Self::month(date.year(), date.month()).map_or(date, |m| m.end);
        Self { start, end }
    }

    /// Seven-day week containing `date` under the given convention.
    #[must_use]
    pub fn week_containing(date: NaiveDate, week_start: WeekStart) -> Self {
        let start = start_of_week(date, week_start);
        let end = start.checked_add_days(Days::new(6)).unwrap_or(NaiveDate::MAX);
        Self { start, end }
    }

    /// First day of the range.
    #[must_use]
    pub const fn start(&self) -> NaiveDate {
        self.start
    }

    /// Last day of the range (inclusive).
    #[must_use]
    pub const fn end(&self) -> NaiveDate {
        self.end
    }

    /// Returns true if `date` falls within the range, bounds included.
    #[must_use]
    pub fn contains(&self, date: NaiveDate) -> bool {
        date >= self.start && date <= self.end
    }

    /// Number of calendar days in the range, both ends counted.
    #[must_use]
    pub fn days(&self) -> u32 {
        let span = (self.end - self.start).num_days() + 1;
        u32::try_from(span).unwrap_or(u32::MAX)
    }

    /// Iterates every day of the range in order.
    pub fn iter_days(&self) -> impl Iterator<Item = NaiveDate> + use<> {
        self.start.iter_days().take(self.days() as usize)
    }

    /// Days of the range on or before `as_of` (0 if the range has not started).
    #[must_use]
    pub fn elapsed_days(&self, as_of: NaiveDate) -> u32 {
        if as_of < self.start {
            return 0;
        }
        let last = as_of.min(self.end);
        u32::try_from((last - self.start).num_days() + 1).unwrap_or(u32::MAX)
    }

    /// Days of the range strictly after `as_of`.
    #[must_use]
    pub fn remaining_days(&self, as_of: NaiveDate) -> u32 {
        self.days() - self.elapsed_days(as_of)
    }

    /// Range of equal length ending the day before this one starts.
    ///
    /// Returns `None` only at the lower edge of the calendar.
    #[must_use]
    pub fn previous(&self) -> Option<Self> {
        let len = u64::from(self.days());
        let end = self.start.checked_sub_days(Days::new(1))?;
        let start = self.start.checked_sub_days(Days::new(len))?;
        Some(Self { start, end })
    }

    /// Intersection with `other`, if any.
    #[must_use]
    pub fn intersect(&self, other: &Self) -> Option<Self> {
        let start = self.start.max(other.start);
        let end = self.end.min(other.end);
        (start <= end).then_some(Self { start, end })
    }
}

impl std::fmt::Display for DateRange {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}..={}", self.start, self.end)
    }
}

/// Number of days in a calendar month.
pub fn days_in_month(year: i32, month: u32) -> Result<u32, AggregationError> {
    let first = NaiveDate::from_ymd_opt(year, month, 1).ok_or(AggregationError::InvalidMonth(month))?;
    let (next_year, next_month) = if month == 12 {
        (year + 1, 1)
    } else {
        (year, month + 1)
    };
    let next = NaiveDate::from_ymd_opt(next_year, next_month, 1)
        .ok_or(AggregationError::InvalidMonth(month))?;
    u32::try_from((next - first).num_days()).map_err(|_| AggregationError::InvalidMonth(month))
}

/// First day of the week containing `date`.
#[must_use]
pub fn start_of_week(date: NaiveDate, week_start: WeekStart) -> NaiveDate {
    let offset = week_start.days_into_week(date.weekday());
    date.checked_sub_days(Days::new(u64::from(offset)))
        .unwrap_or(NaiveDate::MIN)
}
