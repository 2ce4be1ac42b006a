//! Sync state snapshots and deferred scroll requests.

use crate::calendar::date::{CalendarDate, YearMonth};
use serde::Serialize;

/// Point-in-time view of the sync state.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct SyncState {
    pub selected_date: CalendarDate,
    pub visible_month: YearMonth,
    pub last_known_scroll_offset: f64,
    pub is_programmatic_scroll_in_flight: bool,
}

/// What installed a pending scroll. Used for diagnostics only.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum ScrollReason {
    Initial,
    DateTap,
    MonthNavigation,
    MonthFollow,
}

impl ScrollReason {
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Initial => "initial",
            Self::DateTap => "date_tap",
            Self::MonthNavigation => "month_navigation",
            Self::MonthFollow => "month_follow",
        }
    }
}

/// A scroll target waiting for a layout pass that materializes its date.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PendingScroll {
    pub date: CalendarDate,
    /// Smallest offset the fulfilled scroll may target.
    pub floor: f64,
    /// Added to the date's offset; keeps the viewport anchored inside the
    /// section when the list range regenerates under the user.
    pub anchor_delta: f64,
    pub reason: ScrollReason,
}

impl PendingScroll {
    pub fn to_date(date: CalendarDate, floor: f64, reason: ScrollReason) -> Self {
        Self {
            date,
            floor,
            anchor_delta: 0.0,
            reason,
        }
    }
}
