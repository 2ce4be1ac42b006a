//! Host event and command vocabulary.

use crate::calendar::date::{CalendarDate, YearMonth};
use crate::layout::section::TaskCounts;
use crate::sheet::animation::Easing;
use crate::sheet::controller::SheetSnap;
use crate::sheet::geometry::Rect;
use serde::{Deserialize, Serialize};

/// Host regions whose measured layout the engine consumes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Region {
    /// Screen header; its bottom edge is the sheet's expanded top.
    Header,
    /// Month grid; its bottom edge is the sheet's collapsed top.
    MonthGrid,
    /// Scrollable day list; a measurement marks a completed layout pass.
    DayList,
}

/// Tap targets.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", content = "date", rename_all = "snake_case")]
pub enum TapTarget {
    Date(CalendarDate),
    PreviousMonth,
    NextMonth,
    Today,
    SheetHandle,
}

/// Input delivered by the host, in event-loop order.
///
/// `at_ms` is a host-monotonic timestamp in milliseconds.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum HostEvent {
    LayoutMeasured { region: Region, rect: Rect, at_ms: u64 },
    Scroll { offset: f64, at_ms: u64 },
    /// Cumulative vertical movement since touch-down on the sheet.
    DragMove { dy: f64, at_ms: u64 },
    /// `velocity` is in units per second; negative moves up.
    DragRelease { dy: f64, velocity: f64, at_ms: u64 },
    Tap { target: TapTarget, at_ms: u64 },
    TaskCountsChanged { counts: TaskCounts },
    Tick { at_ms: u64 },
}

/// Output for the host, in the order it should be applied.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum HostCommand {
    /// The month grid and day list changed; re-render them.
    RenderMonth { month: YearMonth },
    /// Set the day list's absolute scroll offset.
    ScrollTo { offset: f64, animated: bool },
    /// Follow an active drag without animation.
    MoveSheet { position: f64, top: f64 },
    /// Animate the sheet toward a snap.
    AnimateSheet {
        target: SheetSnap,
        position: f64,
        top: Option<f64>,
        duration_ms: u64,
        easing: Easing,
    },
}
