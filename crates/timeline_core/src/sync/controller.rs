//! Sync state machine.
//!
//! # Responsibility
//! - Apply taps, month navigation and scroll events to the sync state.
//! - Decide when a selection change may move the list, and where to.
//! - Defer scrolls whose target section is not materialized yet.
//!
//! # Invariants
//! - A new tap or month navigation cancels any pending scroll and open
//!   debounce window before installing its own.
//! - A pending scroll is consumed by the first layout pass that knows its
//!   date and is never issued twice.
//! - Selection scrolls never land below the backward floor unless the
//!   target is more than one day earlier or the month changed.
//! - A tap that issues no scroll still opens a debounce window, so scroll
//!   events from an earlier programmatic scroll cannot override it.
//! - Dates entering the state are clamped into the supported month range.
//! - Missing layout data is never an error; the event becomes a no-op.

use crate::calendar::date::{CalendarDate, YearMonth};
use crate::layout::index::LayoutIndex;
use crate::sync::state::{PendingScroll, ScrollReason, SyncState};
use log::{debug, info};
use serde::{Deserialize, Serialize};

/// Tuning constants for selection/scroll reconciliation.
///
/// Defaults are empirically tuned; hosts may override any of them.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SyncConfig {
    /// How far behind the last known offset a selection scroll may land.
    pub backward_tolerance: f64,
    /// Distance below the viewport top still treated as "visible" when
    /// mapping a scroll offset back to a date.
    pub lookahead_band: f64,
    /// Window after a programmatic scroll or a tap during which scroll events
    /// do not change the selection.
    pub debounce_ms: u64,
    /// Backward scroll selections crossing into another month must span more
    /// than this many days.
    pub cross_boundary_days: u32,
}

impl Default for SyncConfig {
    fn default() -> Self {
        Self {
            backward_tolerance: 50.0,
            lookahead_band: 100.0,
            debounce_ms: 120,
            cross_boundary_days: 2,
        }
    }
}

/// Absolute scroll request for the host list.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct ScrollCommand {
    pub offset: f64,
    /// Always `false`: scrolls are applied instantly to keep state consistent.
    pub animated: bool,
}

impl ScrollCommand {
    fn instant(offset: f64) -> Self {
        Self {
            offset,
            animated: false,
        }
    }
}

/// Side effects of one sync transition.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct SyncOutput {
    /// Scroll the host list now.
    pub scroll: Option<ScrollCommand>,
    /// The visible month changed; the grid and layout must be regenerated.
    pub visible_month_changed: bool,
}

impl SyncOutput {
    fn none() -> Self {
        Self::default()
    }

    fn scroll(command: ScrollCommand) -> Self {
        Self {
            scroll: Some(command),
            visible_month_changed: false,
        }
    }

    fn month_changed() -> Self {
        Self {
            scroll: None,
            visible_month_changed: true,
        }
    }

    pub fn is_empty(&self) -> bool {
        self.scroll.is_none() && !self.visible_month_changed
    }
}

/// Owner of the sync state.
///
/// Timestamps are host-monotonic milliseconds. Each handler first expires
/// an elapsed debounce window, so `tick` is only needed when the host wants
/// the in-flight flag cleared between events.
#[derive(Debug, Clone)]
pub struct SyncController {
    config: SyncConfig,
    selected_date: CalendarDate,
    visible_month: YearMonth,
    last_known_scroll_offset: f64,
    debounce_deadline_ms: Option<u64>,
    pending: Option<PendingScroll>,
}

impl SyncController {
    /// Creates the controller with `initial` selected.
    ///
    /// The list is asked to reveal `initial` on the first layout pass.
    pub fn new(initial: CalendarDate, config: SyncConfig) -> Self {
        let initial = initial.clamped_to_supported();
        Self {
            config,
            selected_date: initial,
            visible_month: initial.year_month(),
            last_known_scroll_offset: 0.0,
            debounce_deadline_ms: None,
            pending: Some(PendingScroll::to_date(initial, 0.0, ScrollReason::Initial)),
        }
    }

    pub fn config(&self) -> &SyncConfig {
        &self.config
    }

    pub fn state(&self) -> SyncState {
        SyncState {
            selected_date: self.selected_date,
            visible_month: self.visible_month,
            last_known_scroll_offset: self.last_known_scroll_offset,
            is_programmatic_scroll_in_flight: self.debounce_deadline_ms.is_some(),
        }
    }

    pub fn selected_date(&self) -> CalendarDate {
        self.selected_date
    }

    pub fn visible_month(&self) -> YearMonth {
        self.visible_month
    }

    pub fn pending_scroll(&self) -> Option<&PendingScroll> {
        self.pending.as_ref()
    }

    /// Closes the debounce window once `now_ms` reaches its deadline.
    pub fn tick(&mut self, now_ms: u64) {
        if let Some(deadline) = self.debounce_deadline_ms {
            if now_ms >= deadline {
                self.debounce_deadline_ms = None;
                debug!("event=debounce_expired module=sync status=ok at_ms={now_ms}");
            }
        }
    }

    /// Moves the visible month by `delta` and keeps the selected day-of-month,
    /// clamped to the new month's length.
    ///
    /// The scroll to the new selection waits for the next layout pass.
    pub fn navigate_month(&mut self, delta: i32, now_ms: u64) -> SyncOutput {
        self.tick(now_ms);
        let target_month = self.visible_month.offset(delta);
        if target_month == self.visible_month {
            return SyncOutput::none();
        }
        self.cancel_outstanding();

        self.visible_month = target_month;
        self.selected_date = target_month.clamped_day(self.selected_date.day());
        self.pending = Some(PendingScroll::to_date(
            self.selected_date,
            0.0,
            ScrollReason::MonthNavigation,
        ));
        info!(
            "event=month_navigate module=sync status=ok delta={} month={} selected={}",
            delta, self.visible_month, self.selected_date
        );
        SyncOutput::month_changed()
    }

    /// Selects `date` immediately and scrolls to it.
    ///
    /// A date outside the visible month switches the month first and defers
    /// the scroll; otherwise the scroll is issued against `layout` right away
    /// when the directional floor allows it.
    pub fn tap_date(&mut self, date: CalendarDate, layout: &LayoutIndex, now_ms: u64) -> SyncOutput {
        self.tick(now_ms);
        self.cancel_outstanding();

        let date = date.clamped_to_supported();
        let previous = self.selected_date;
        self.selected_date = date;

        let target_month = date.year_month();
        if target_month != self.visible_month {
            self.visible_month = target_month;
            self.pending = Some(PendingScroll::to_date(date, 0.0, ScrollReason::DateTap));
            info!(
                "event=date_tap module=sync status=deferred selected={} month={}",
                date, target_month
            );
            return SyncOutput::month_changed();
        }

        let floor = if date.days_until(&previous) > 1 {
            0.0
        } else {
            self.backward_floor()
        };

        let Some(target) = layout.offset_of(&date) else {
            self.pending = Some(PendingScroll::to_date(date, floor, ScrollReason::DateTap));
            self.arm_debounce(now_ms);
            debug!("event=date_tap module=sync status=waiting_layout selected={date}");
            return SyncOutput::none();
        };

        if target < floor {
            self.arm_debounce(now_ms);
            debug!(
                "event=date_tap module=sync status=suppressed selected={} target={:.1} floor={:.1}",
                date, target, floor
            );
            return SyncOutput::none();
        }

        SyncOutput::scroll(self.issue_scroll(target, now_ms))
    }

    /// Maps a host scroll offset back to the selection.
    ///
    /// The topmost visible header (start offset `<= offset + lookahead`)
    /// becomes the selection. Crossing into another month backward only
    /// follows when the jump is longer than `cross_boundary_days`.
    pub fn on_scroll(&mut self, offset: f64, layout: &LayoutIndex, now_ms: u64) -> SyncOutput {
        self.tick(now_ms);
        if !offset.is_finite() {
            return SyncOutput::none();
        }
        let offset = offset.max(0.0);
        self.last_known_scroll_offset = offset;

        if self.debounce_deadline_ms.is_some() {
            debug!("event=scroll module=sync status=debounced offset={offset:.1}");
            return SyncOutput::none();
        }
        if self.pending.is_some() {
            // The list range is about to change; offsets here are stale.
            return SyncOutput::none();
        }

        let Some(entry) = layout.entry_at(offset + self.config.lookahead_band) else {
            return SyncOutput::none();
        };
        let candidate = entry.date.clamped_to_supported();
        if candidate == self.selected_date {
            return SyncOutput::none();
        }

        let candidate_month = candidate.year_month();
        if candidate_month == self.visible_month {
            self.selected_date = candidate;
            return SyncOutput::none();
        }

        let forward = candidate > self.selected_date;
        let span = self.selected_date.days_until(&candidate).unsigned_abs();
        if !forward && span <= u64::from(self.config.cross_boundary_days) {
            debug!(
                "event=scroll module=sync status=jitter_ignored candidate={} selected={}",
                candidate, self.selected_date
            );
            return SyncOutput::none();
        }

        self.selected_date = candidate;
        self.visible_month = candidate_month;
        self.pending = Some(PendingScroll {
            date: candidate,
            floor: 0.0,
            anchor_delta: offset - entry.offset,
            reason: ScrollReason::MonthFollow,
        });
        info!(
            "event=month_follow module=sync status=ok selected={} month={}",
            candidate, candidate_month
        );
        SyncOutput::month_changed()
    }

    /// Fulfills the pending scroll if `layout` knows its date.
    ///
    /// Call once per layout pass; without a pending scroll this is a no-op.
    pub fn on_layout_ready(&mut self, layout: &LayoutIndex, now_ms: u64) -> SyncOutput {
        self.tick(now_ms);
        let Some(pending) = self.pending else {
            return SyncOutput::none();
        };
        let Some(offset) = layout.offset_of(&pending.date) else {
            debug!(
                "event=pending_scroll module=sync status=waiting_layout date={} reason={}",
                pending.date,
                pending.reason.as_str()
            );
            return SyncOutput::none();
        };
        self.pending = None;

        let target = (offset + pending.anchor_delta).max(0.0);
        if target < pending.floor {
            debug!(
                "event=pending_scroll module=sync status=suppressed date={} target={:.1} floor={:.1}",
                pending.date, target, pending.floor
            );
            return SyncOutput::none();
        }

        debug!(
            "event=pending_scroll module=sync status=fulfilled date={} reason={} target={:.1}",
            pending.date,
            pending.reason.as_str(),
            target
        );
        SyncOutput::scroll(self.issue_scroll(target, now_ms))
    }

    fn backward_floor(&self) -> f64 {
        (self.last_known_scroll_offset - self.config.backward_tolerance).max(0.0)
    }

    fn cancel_outstanding(&mut self) {
        if let Some(pending) = self.pending.take() {
            debug!(
                "event=pending_scroll module=sync status=cancelled date={} reason={}",
                pending.date,
                pending.reason.as_str()
            );
        }
        self.debounce_deadline_ms = None;
    }

    fn issue_scroll(&mut self, target: f64, now_ms: u64) -> ScrollCommand {
        let offset = target.max(0.0);
        self.last_known_scroll_offset = offset;
        self.arm_debounce(now_ms);
        ScrollCommand::instant(offset)
    }

    fn arm_debounce(&mut self, now_ms: u64) {
        self.debounce_deadline_ms = Some(now_ms.saturating_add(self.config.debounce_ms));
    }
}

#[cfg(test)]
mod tests {
    use super::{SyncConfig, SyncController};
    use crate::calendar::date::CalendarDate;
    use crate::layout::index::LayoutIndex;

    #[test]
    fn new_controller_waits_to_reveal_initial_date() {
        let initial = CalendarDate::new(2024, 5, 10).expect("valid date");
        let mut controller = SyncController::new(initial, SyncConfig::default());
        assert!(controller.pending_scroll().is_some());

        let output = controller.on_layout_ready(&LayoutIndex::empty(), 0);
        assert!(output.is_empty());
        assert!(controller.pending_scroll().is_some());
    }

    #[test]
    fn tick_closes_debounce_window_at_deadline() {
        let initial = CalendarDate::new(2024, 5, 10).expect("valid date");
        let mut controller = SyncController::new(initial, SyncConfig::default());
        controller.debounce_deadline_ms = Some(120);

        controller.tick(119);
        assert!(controller.state().is_programmatic_scroll_in_flight);
        controller.tick(120);
        assert!(!controller.state().is_programmatic_scroll_in_flight);
    }
}
