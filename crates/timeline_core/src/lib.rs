//! Calendar timeline synchronization engine.
//! This crate is the single source of truth for selection, scroll and sheet
//! invariants; hosts only render and report events.

pub mod calendar;
pub mod config;
pub mod engine;
pub mod layout;
pub mod logging;
pub mod sheet;
pub mod sync;

pub use calendar::date::{CalendarDate, DateKeyError, YearMonth};
pub use calendar::month_grid::{MonthGrid, WeekStart, DAYS_PER_WEEK, GRID_DAYS, GRID_WEEKS};
pub use config::{ConfigError, TimelineConfig};
pub use engine::event::{HostCommand, HostEvent, Region, TapTarget};
pub use engine::timeline::{TimelineEngine, TimelineSnapshot};
pub use layout::index::{LayoutEntry, LayoutIndex};
pub use layout::section::{build_sections, DaySection, SectionMetrics, TaskCounts};
pub use logging::{default_log_level, init_logging, logging_status};
pub use sheet::animation::{Easing, SettleAnimation};
pub use sheet::controller::{
    choose_snap, SheetConfig, SheetGestureController, SheetSnap, SheetState, SnapCommand,
};
pub use sheet::geometry::{Rect, SheetGeometry};
pub use sync::controller::{ScrollCommand, SyncConfig, SyncController, SyncOutput};
pub use sync::state::{PendingScroll, ScrollReason, SyncState};

/// Minimal health-check API for early integration.
pub fn ping() -> &'static str {
    "pong"
}

/// Returns the core crate version.
pub fn core_version() -> &'static str {
    env!("CARGO_PKG_VERSION")
}

#[cfg(test)]
mod tests {
    use super::{core_version, ping};

    #[test]
    fn ping_returns_pong() {
        assert_eq!(ping(), "pong");
    }

    #[test]
    fn version_is_not_empty() {
        assert!(!core_version().is_empty());
    }
}
