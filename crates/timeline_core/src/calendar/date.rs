//! Day-granular calendar values.
//!
//! # Responsibility
//! - Wrap `chrono::NaiveDate` with the identity rules used by the timeline.
//! - Normalize arbitrary (year, month) pairs and clamp day-of-month overflow.
//!
//! # Invariants
//! - Equality and ordering are calendar-day granular; there is no time part.
//! - `CalendarDate::key` is the stable identity used by layout and task lookups.
//! - Keys always carry a four-digit year: dates live in `MIN_YEAR..=MAX_YEAR`.
//! - Months normalize into `YearMonth::MIN..=YearMonth::MAX`, so every date of
//!   a month grid, padding days included, is itself a valid date.

use chrono::{Datelike, Duration, NaiveDate, Weekday};
use serde::de::{self, Deserializer};
use serde::{Deserialize, Serialize, Serializer};
use std::error::Error;
use std::fmt::{Display, Formatter};
use std::str::FromStr;

/// Smallest year reachable through normalization.
pub const MIN_YEAR: i32 = 1;
/// Largest year reachable through normalization.
pub const MAX_YEAR: i32 = 9999;

/// One calendar day.
///
/// Serialized as its canonical `YYYY-MM-DD` key.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct CalendarDate(NaiveDate);

impl CalendarDate {
    /// Creates a date from exact components.
    ///
    /// Returns `None` when the triple does not name a real day.
    pub fn new(year: i32, month: u32, day: u32) -> Option<Self> {
        if !(MIN_YEAR..=MAX_YEAR).contains(&year) {
            return None;
        }
        NaiveDate::from_ymd_opt(year, month, day).map(Self)
    }

    /// Creates a date, normalizing `month` and clamping `day`.
    ///
    /// Month 13 rolls to January of the next year, month 0 to December of the
    /// previous one. Day 0 becomes 1 and a day past the end of the month
    /// becomes the month's last day (Jan 31 + 1 month -> Feb 28/29).
    pub fn from_ymd_clamped(year: i32, month: i32, day: u32) -> Self {
        YearMonth::new(year, month).clamped_day(day)
    }

    /// Parses a canonical `YYYY-MM-DD` key.
    pub fn parse_key(value: &str) -> Result<Self, DateKeyError> {
        let trimmed = value.trim();
        if trimmed.is_empty() {
            return Err(DateKeyError::Empty);
        }

        let mut parts = trimmed.split('-');
        let (Some(year), Some(month), Some(day), None) =
            (parts.next(), parts.next(), parts.next(), parts.next())
        else {
            return Err(DateKeyError::Malformed(trimmed.to_string()));
        };
        if year.len() != 4 || month.len() != 2 || day.len() != 2 {
            return Err(DateKeyError::Malformed(trimmed.to_string()));
        }

        let parse = |raw: &str| {
            raw.parse::<u32>()
                .map_err(|_| DateKeyError::Malformed(trimmed.to_string()))
        };
        let (year, month, day) = (parse(year)?, parse(month)?, parse(day)?);

        i32::try_from(year)
            .ok()
            .and_then(|year| Self::new(year, month, day))
            .ok_or_else(|| DateKeyError::OutOfRange(trimmed.to_string()))
    }

    /// Canonical identity key, `YYYY-MM-DD`.
    pub fn key(&self) -> String {
        format!("{:04}-{:02}-{:02}", self.year(), self.month(), self.day())
    }

    pub fn year(&self) -> i32 {
        self.0.year()
    }

    pub fn month(&self) -> u32 {
        self.0.month()
    }

    pub fn day(&self) -> u32 {
        self.0.day()
    }

    pub fn weekday(&self) -> Weekday {
        self.0.weekday()
    }

    /// Month this date belongs to, clamped into the supported month range.
    pub fn year_month(&self) -> YearMonth {
        YearMonth::new(self.year(), self.month() as i32)
    }

    /// Clamps into the days of `YearMonth::MIN..=YearMonth::MAX`.
    pub fn clamped_to_supported(self) -> Self {
        self.clamp(YearMonth::MIN.first_day(), YearMonth::MAX.last_day())
    }

    /// Returns the date `days` away (negative moves backward).
    ///
    /// Saturates at the representable range instead of overflowing.
    pub fn add_days(&self, days: i64) -> Self {
        Duration::try_days(days)
            .and_then(|delta| self.0.checked_add_signed(delta))
            .map(Self)
            .unwrap_or(*self)
    }

    /// Signed day distance from `self` to `other` (`other - self`).
    pub fn days_until(&self, other: &CalendarDate) -> i64 {
        other.0.signed_duration_since(self.0).num_days()
    }
}

/// Host clock dates outside the supported months are clamped.
impl From<NaiveDate> for CalendarDate {
    fn from(value: NaiveDate) -> Self {
        Self(value).clamped_to_supported()
    }
}

impl Display for CalendarDate {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.key())
    }
}

impl FromStr for CalendarDate {
    type Err = DateKeyError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse_key(s)
    }
}

impl Serialize for CalendarDate {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(&self.key())
    }
}

impl<'de> Deserialize<'de> for CalendarDate {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let raw = String::deserialize(deserializer)?;
        Self::parse_key(&raw).map_err(de::Error::custom)
    }
}

/// A (year, month) pair, always normalized into `MIN..=MAX`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize)]
pub struct YearMonth {
    year: i32,
    month: u32,
}

impl YearMonth {
    /// Earliest supported month. Its grid still starts inside `MIN_YEAR`.
    pub const MIN: YearMonth = YearMonth {
        year: MIN_YEAR,
        month: 2,
    };
    /// Latest supported month. Its grid still ends inside `MAX_YEAR`.
    pub const MAX: YearMonth = YearMonth {
        year: MAX_YEAR,
        month: 11,
    };

    /// Normalizes any integer month with standard calendar arithmetic, then
    /// clamps into `MIN..=MAX`.
    pub fn new(year: i32, month: i32) -> Self {
        let absolute = i64::from(year) * 12 + i64::from(month) - 1;
        let lower = Self::MIN.absolute();
        let upper = Self::MAX.absolute();
        let absolute = absolute.clamp(lower, upper);

        Self {
            year: absolute.div_euclid(12) as i32,
            month: (absolute.rem_euclid(12) + 1) as u32,
        }
    }

    const fn absolute(&self) -> i64 {
        self.year as i64 * 12 + self.month as i64 - 1
    }

    pub fn year(&self) -> i32 {
        self.year
    }

    pub fn month(&self) -> u32 {
        self.month
    }

    /// Moves by `delta` months.
    pub fn offset(&self, delta: i32) -> Self {
        Self::new(self.year, self.month as i32 + delta)
    }

    pub fn days_in_month(&self) -> u32 {
        match self.month {
            1 | 3 | 5 | 7 | 8 | 10 | 12 => 31,
            4 | 6 | 9 | 11 => 30,
            _ if is_leap_year(self.year) => 29,
            _ => 28,
        }
    }

    pub fn first_day(&self) -> CalendarDate {
        self.clamped_day(1)
    }

    pub fn last_day(&self) -> CalendarDate {
        self.clamped_day(self.days_in_month())
    }

    /// Returns `day` of this month, clamped into `1..=days_in_month`.
    pub fn clamped_day(&self, day: u32) -> CalendarDate {
        let day = day.clamp(1, self.days_in_month());
        // Normalized components always name a real day.
        CalendarDate(NaiveDate::from_ymd_opt(self.year, self.month, day).unwrap_or_default())
    }

    pub fn contains(&self, date: &CalendarDate) -> bool {
        date.year() == self.year && date.month() == self.month
    }

    /// `YYYY-MM` key.
    pub fn key(&self) -> String {
        format!("{:04}-{:02}", self.year, self.month)
    }
}

impl Display for YearMonth {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.key())
    }
}

fn is_leap_year(year: i32) -> bool {
    (year % 4 == 0 && year % 100 != 0) || year % 400 == 0
}

/// Errors from parsing a `YYYY-MM-DD` key.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DateKeyError {
    /// Input is blank after trim.
    Empty,
    /// Input is not shaped like `YYYY-MM-DD`.
    Malformed(String),
    /// Shape is valid but the components do not name a real day.
    OutOfRange(String),
}

impl Display for DateKeyError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Empty => write!(f, "date key must not be blank"),
            Self::Malformed(value) => write!(f, "date key must be YYYY-MM-DD, got `{value}`"),
            Self::OutOfRange(value) => write!(f, "date key is not a real day: `{value}`"),
        }
    }
}

impl Error for DateKeyError {}
