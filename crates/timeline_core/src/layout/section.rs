//! Day sections and their derived heights.

use crate::calendar::date::CalendarDate;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;

/// Lower bound applied to every computed section height.
pub const MIN_SECTION_HEIGHT: f64 = 1.0;

/// Pixel metrics used to size one day section.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SectionMetrics {
    /// Date header shown for every day.
    pub base_header_height: f64,
    /// One task row.
    pub row_height: f64,
    /// Placeholder shown when the day has no tasks.
    pub empty_state_height: f64,
}

impl Default for SectionMetrics {
    fn default() -> Self {
        Self {
            base_header_height: 56.0,
            row_height: 72.0,
            empty_state_height: 160.0,
        }
    }
}

impl SectionMetrics {
    /// `base + (count > 0 ? count * row : empty)`, never below `MIN_SECTION_HEIGHT`.
    pub fn height_for(&self, task_count: u32) -> f64 {
        let body = if task_count > 0 {
            f64::from(task_count) * self.row_height
        } else {
            self.empty_state_height
        };
        (self.base_header_height + body).max(MIN_SECTION_HEIGHT)
    }
}

/// Read-only task counts keyed by `YYYY-MM-DD`.
///
/// Supplied by the data collaborator; missing keys count as zero.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct TaskCounts(HashMap<String, u32>);

impl TaskCounts {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn get(&self, date: &CalendarDate) -> u32 {
        self.get_key(&date.key())
    }

    pub fn get_key(&self, key: &str) -> u32 {
        self.0.get(key).copied().unwrap_or(0)
    }

    pub fn set(&mut self, date: &CalendarDate, count: u32) {
        self.0.insert(date.key(), count);
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

impl FromIterator<(String, u32)> for TaskCounts {
    fn from_iter<T: IntoIterator<Item = (String, u32)>>(iter: T) -> Self {
        Self(iter.into_iter().collect())
    }
}

impl From<HashMap<String, u32>> for TaskCounts {
    fn from(value: HashMap<String, u32>) -> Self {
        Self(value)
    }
}

/// One date's renderable slice of the day list.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct DaySection {
    date: CalendarDate,
    task_count: u32,
    height: f64,
}

impl DaySection {
    pub fn new(date: CalendarDate, task_count: u32, metrics: &SectionMetrics) -> Self {
        Self {
            date,
            task_count,
            height: metrics.height_for(task_count),
        }
    }

    pub fn date(&self) -> CalendarDate {
        self.date
    }

    pub fn task_count(&self) -> u32 {
        self.task_count
    }

    pub fn height(&self) -> f64 {
        self.height
    }
}

/// Derives one section per date, in the order given.
pub fn build_sections(
    dates: impl IntoIterator<Item = CalendarDate>,
    counts: &TaskCounts,
    metrics: &SectionMetrics,
) -> Vec<DaySection> {
    dates
        .into_iter()
        .map(|date| DaySection::new(date, counts.get(&date), metrics))
        .collect()
}
