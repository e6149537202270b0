use crate::error::PeriodParseError;
use chrono::Month;
use serde::{Deserialize, Serialize};
use std::{cmp::Ordering, fmt, str::FromStr};

/// One observation interval: a calendar month of a given year.
///
/// Periods order chronologically (`year * 12 + month`), never by their
/// textual form, so `2024-9` sorts before `2024-10`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Period {
    pub year: i32,
    /// Month of the year, 1 through 12
    pub month: u32,
}

impl Period {
    /// Build a period, rejecting months outside 1..=12.
    pub fn new(year: i32, month: u32) -> Option<Self> {
        if (1..=12).contains(&month) {
            Some(Period { year, month })
        } else {
            None
        }
    }

    /// Months elapsed since year 0, used as the chronological sort key.
    pub fn ordinal(&self) -> i64 {
        i64::from(self.year) * 12 + i64::from(self.month)
    }

    /// English month name, e.g. "September".
    pub fn month_name(&self) -> &'static str {
        month_name(self.month).unwrap_or("Unknown")
    }

    /// Display label used by selection controls, e.g. "September 2024".
    pub fn label(&self) -> String {
        format!("{} {}", self.month_name(), self.year)
    }
}

/// English name for a 1-based month number.
pub fn month_name(month: u32) -> Option<&'static str> {
    let month = u8::try_from(month).ok()?;
    Month::try_from(month).ok().map(|m| m.name())
}

impl Ord for Period {
    fn cmp(&self, other: &Self) -> Ordering {
        self.ordinal().cmp(&other.ordinal())
    }
}

impl PartialOrd for Period {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl fmt::Display for Period {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}-{}", self.year, self.month)
    }
}

impl FromStr for Period {
    type Err = PeriodParseError;

    /// Accepts `2024-9` as well as zero-padded `2024-09`.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let malformed = || PeriodParseError::Malformed(s.to_string());
        let (year, month) = s.trim().split_once('-').ok_or_else(malformed)?;
        let year: i32 = year.trim().parse().map_err(|_| malformed())?;
        let month: u32 = month.trim().parse().map_err(|_| malformed())?;
        Period::new(year, month).ok_or(PeriodParseError::MonthOutOfRange(month))
    }
}

/// Inclusive range of years, e.g. the 2024–2026 window shown on the map.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct YearRange {
    pub start: i32,
    pub end: i32,
}

impl YearRange {
    pub fn new(start: i32, end: i32) -> Self {
        YearRange { start, end }
    }

    pub fn contains(&self, year: i32) -> bool {
        self.start <= year && year <= self.end
    }

    pub fn is_valid(&self) -> bool {
        self.start <= self.end
    }
}

impl Default for YearRange {
    fn default() -> Self {
        YearRange {
            start: 2024,
            end: 2026,
        }
    }
}
