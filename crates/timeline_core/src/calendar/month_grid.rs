//! Month grid generation.
//!
//! # Responsibility
//! - Produce the 6-week matrix of dates shown for one (year, month).
//!
//! # Invariants
//! - Output is exactly `GRID_WEEKS * DAYS_PER_WEEK` consecutive dates.
//! - The first row starts on the configured week start and contains day 1.
//! - Generation is pure: same input, same grid.

use crate::calendar::date::{CalendarDate, YearMonth};
use chrono::Weekday;
use serde::{Deserialize, Serialize};

pub const DAYS_PER_WEEK: usize = 7;
pub const GRID_WEEKS: usize = 6;
pub const GRID_DAYS: usize = DAYS_PER_WEEK * GRID_WEEKS;

/// First column of every grid row.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum WeekStart {
    #[default]
    Sunday,
    Monday,
}

impl WeekStart {
    /// Column index of `weekday` in a row starting on `self`.
    pub fn column_of(self, weekday: Weekday) -> u32 {
        match self {
            Self::Sunday => weekday.num_days_from_sunday(),
            Self::Monday => weekday.num_days_from_monday(),
        }
    }
}

/// Immutable 6x7 date matrix for one month.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MonthGrid {
    month: YearMonth,
    week_start: WeekStart,
    weeks: [[CalendarDate; DAYS_PER_WEEK]; GRID_WEEKS],
}

impl MonthGrid {
    /// Generates the grid for any integer (year, month) with Sunday rows.
    pub fn generate(year: i32, month: i32) -> Self {
        Self::generate_for(YearMonth::new(year, month), WeekStart::default())
    }

    /// Generates the grid for a normalized month and week start.
    pub fn generate_for(month: YearMonth, week_start: WeekStart) -> Self {
        let first = month.first_day();
        let leading = i64::from(week_start.column_of(first.weekday()));
        let origin = first.add_days(-leading);

        let weeks = std::array::from_fn(|week| {
            std::array::from_fn(|column| origin.add_days((week * DAYS_PER_WEEK + column) as i64))
        });

        Self {
            month,
            week_start,
            weeks,
        }
    }

    pub fn month(&self) -> YearMonth {
        self.month
    }

    pub fn week_start(&self) -> WeekStart {
        self.week_start
    }

    pub fn weeks(&self) -> &[[CalendarDate; DAYS_PER_WEEK]; GRID_WEEKS] {
        &self.weeks
    }

    /// All dates in row-major (chronological) order.
    pub fn dates(&self) -> impl Iterator<Item = CalendarDate> + '_ {
        self.weeks.iter().flat_map(|week| week.iter().copied())
    }

    pub fn first_date(&self) -> CalendarDate {
        self.weeks[0][0]
    }

    pub fn last_date(&self) -> CalendarDate {
        self.weeks[GRID_WEEKS - 1][DAYS_PER_WEEK - 1]
    }

    /// Whether `date` appears anywhere in the grid, including padding days.
    pub fn contains(&self, date: &CalendarDate) -> bool {
        (self.first_date()..=self.last_date()).contains(date)
    }

    /// Whether `date` belongs to the grid's own month.
    pub fn is_in_month(&self, date: &CalendarDate) -> bool {
        self.month.contains(date)
    }

    /// Zero-based row holding `date`.
    pub fn week_of(&self, date: &CalendarDate) -> Option<usize> {
        if !self.contains(date) {
            return None;
        }
        let index = self.first_date().days_until(date);
        Some(index as usize / DAYS_PER_WEEK)
    }
}
