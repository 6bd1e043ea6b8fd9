//! Week-start convention for calendar bucketing.
//!
//! Reports across the back-office disagree on whether a week starts on
//! Sunday or Monday, so every weekly computation takes this explicitly.

use chrono::Weekday;
use serde::{Deserialize, Serialize};

/// First day of a reporting week.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum WeekStart {
    /// ISO weeks, Monday through Sunday.
    #[default]
    Monday,
    /// Sunday through Saturday.
    Sunday,
}

impl WeekStart {
    /// Returns the chrono weekday that opens the week.
    #[must_use]
    pub const fn weekday(self) -> Weekday {
        match self {
            Self::Monday => Weekday::Mon,
            Self::Sunday => Weekday::Sun,
        }
    }

    /// Number of days between the start of the week and `day`.
    #[must_use]
    pub const fn days_into_week(self, day: Weekday) -> u32 {
        match self {
            Self::Monday => day.num_days_from_monday(),
            Self::Sunday => day.num_days_from_sunday(),
        }
    }
}

impl std::fmt::Display for WeekStart {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Monday => write!(f, "monday"),
            Self::Sunday => write!(f, "sunday"),
        }
    }
}

impl std::str::FromStr for WeekStart {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "monday" | "mon" => Ok(Self::Monday),
            "sunday" | "sun" => Ok(Self::Sunday),
            _ => Err(format!("Unknown week start: {s}")),
        }
    }
}
