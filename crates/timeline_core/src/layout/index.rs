//! Cumulative offset index over day sections.
//!
//! # Responsibility
//! - Map each materialized date to the offset its section starts at.
//! - Answer the reverse query: which section covers a given offset.
//!
//! # Invariants
//! - Entries are in strictly chronological order, one per date.
//! - Offsets start at zero and strictly increase (heights are positive).
//! - An index is built in one pass over the full materialized range.

use crate::calendar::date::CalendarDate;
use crate::layout::section::DaySection;
use log::debug;
use std::collections::HashMap;

/// One date's position in the day list.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct LayoutEntry {
    pub date: CalendarDate,
    /// Start offset of the section.
    pub offset: f64,
    pub height: f64,
}

impl LayoutEntry {
    pub fn end(&self) -> f64 {
        self.offset + self.height
    }
}

/// Immutable date -> offset mapping.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct LayoutIndex {
    entries: Vec<LayoutEntry>,
    positions: HashMap<String, usize>,
    total_height: f64,
}

impl LayoutIndex {
    /// Index with no materialized dates; every lookup misses.
    pub fn empty() -> Self {
        Self::default()
    }

    /// Builds offsets from sections in any order.
    ///
    /// Sections are sorted chronologically first; when a date repeats, the
    /// first occurrence wins.
    pub fn build(sections: impl IntoIterator<Item = DaySection>) -> Self {
        let mut sections = sections.into_iter().collect::<Vec<_>>();
        sections.sort_by_key(DaySection::date);
        let supplied = sections.len();
        sections.dedup_by_key(|section| section.date());
        if sections.len() != supplied {
            debug!(
                "event=layout_dedup module=layout status=ok dropped={}",
                supplied - sections.len()
            );
        }

        let mut entries = Vec::with_capacity(sections.len());
        let mut positions = HashMap::with_capacity(sections.len());
        let mut running = 0.0_f64;
        for section in sections {
            positions.insert(section.date().key(), entries.len());
            entries.push(LayoutEntry {
                date: section.date(),
                offset: running.max(0.0),
                height: section.height(),
            });
            running += section.height();
        }

        Self {
            entries,
            positions,
            total_height: running,
        }
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn entries(&self) -> &[LayoutEntry] {
        &self.entries
    }

    /// Sum of all section heights.
    pub fn total_height(&self) -> f64 {
        self.total_height
    }

    pub fn first_date(&self) -> Option<CalendarDate> {
        self.entries.first().map(|entry| entry.date)
    }

    pub fn last_date(&self) -> Option<CalendarDate> {
        self.entries.last().map(|entry| entry.date)
    }

    pub fn contains(&self, date: &CalendarDate) -> bool {
        self.positions.contains_key(&date.key())
    }

    pub fn entry(&self, date: &CalendarDate) -> Option<&LayoutEntry> {
        self.entry_for_key(&date.key())
    }

    pub fn entry_for_key(&self, key: &str) -> Option<&LayoutEntry> {
        self.positions
            .get(key)
            .and_then(|position| self.entries.get(*position))
    }

    /// Start offset of `date`'s section, if materialized.
    pub fn offset_of(&self, date: &CalendarDate) -> Option<f64> {
        self.entry(date).map(|entry| entry.offset)
    }

    pub fn offset_of_key(&self, key: &str) -> Option<f64> {
        self.entry_for_key(key).map(|entry| entry.offset)
    }

    /// Entry with the largest start offset that is still `<= probe`.
    ///
    /// Returns `None` for an empty index, a non-finite probe, or a probe
    /// before the first section.
    pub fn entry_at(&self, probe: f64) -> Option<&LayoutEntry> {
        if !probe.is_finite() {
            return None;
        }
        let after = self.entries.partition_point(|entry| entry.offset <= probe);
        after.checked_sub(1).and_then(|last| self.entries.get(last))
    }

    pub fn date_at(&self, probe: f64) -> Option<CalendarDate> {
        self.entry_at(probe).map(|entry| entry.date)
    }
}
