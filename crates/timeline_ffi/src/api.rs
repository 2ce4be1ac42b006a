//! FFI use-case API for Flutter-facing calls.
//!
//! # Responsibility
//! - Expose the timeline engine to Dart via FRB as one opaque session per
//!   mounted calendar screen.
//! - Flatten engine commands into simple, stable DTOs.
//!
//! # Invariants
//! - Exported functions must not panic across FFI boundary.
//! - Invalid host input (bad date keys, unknown controls or regions)
//!   degrades to an empty command list.
//! - Negative timestamps are treated as zero.

use log::warn;
use std::collections::HashMap;
use timeline_core::{
    core_version as core_version_inner, init_logging as init_logging_inner, ping as ping_inner,
    CalendarDate, HostCommand, HostEvent, Rect, Region, TapTarget, TaskCounts, TimelineConfig,
    TimelineEngine,
};

/// Minimal health-check API for FRB smoke integration.
///
/// # FFI contract
/// - Sync call, non-blocking.
/// - Never throws; always returns a UTF-8 string.
#[flutter_rust_bridge::frb(sync)]
pub fn ping() -> String {
    ping_inner().to_owned()
}

/// Expose core crate version through FFI.
///
/// # FFI contract
/// - Sync call, non-blocking.
/// - Never throws; always returns a UTF-8 string.
#[flutter_rust_bridge::frb(sync)]
pub fn core_version() -> String {
    core_version_inner().to_owned()
}

/// Initializes Rust core logging once per process.
///
/// Input semantics:
/// - `level`: one of `trace|debug|info|warn|error` (case-insensitive).
/// - `log_dir`: absolute directory path where rolling logs are written.
///
/// # FFI contract
/// - Safe to call repeatedly with the same `level + log_dir` (idempotent).
/// - Never panics; returns empty string on success and error message on failure.
#[flutter_rust_bridge::frb(sync)]
pub fn init_logging(level: String, log_dir: String) -> String {
    match init_logging_inner(level.as_str(), log_dir.as_str()) {
        Ok(()) => String::new(),
        Err(err) => err,
    }
}

/// One host command in flattened form.
///
/// `kind` is `render_month|scroll_to|move_sheet|animate_sheet`; only the
/// fields relevant to that kind are set.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct TimelineCommand {
    pub kind: String,
    /// `YYYY-MM` for `render_month`.
    pub month_key: Option<String>,
    /// Absolute list offset for `scroll_to`.
    pub scroll_offset: Option<f64>,
    /// `collapsed|expanded` for `animate_sheet`.
    pub sheet_target: Option<String>,
    /// Normalized sheet position (0 collapsed, 1 expanded).
    pub sheet_position: Option<f64>,
    /// Sheet top edge in host pixels, when geometry is known.
    pub sheet_top: Option<f64>,
    pub duration_ms: Option<u32>,
    pub easing: Option<String>,
}

/// Point-in-time session state.
#[derive(Debug, Clone, PartialEq)]
pub struct TimelineSnapshotView {
    pub selected_date: String,
    pub visible_month: String,
    pub scroll_offset: f64,
    pub is_programmatic_scroll_in_flight: bool,
    pub pending_scroll_date: Option<String>,
    pub sheet_position: f64,
    pub sheet_is_dragging: bool,
}

/// One rendered day section.
#[derive(Debug, Clone, PartialEq)]
pub struct TimelineSection {
    pub date_key: String,
    pub in_visible_month: bool,
    pub offset: f64,
    pub height: f64,
}

/// Interaction session for one mounted calendar screen.
///
/// Dropping the session on the Dart side is the remount boundary.
#[flutter_rust_bridge::frb(opaque)]
pub struct TimelineSession {
    engine: TimelineEngine,
}

impl TimelineSession {
    /// Mounts a session with `today_key` (`YYYY-MM-DD`) selected.
    ///
    /// `config_json` overrides any subset of the engine tuning constants.
    #[flutter_rust_bridge::frb(sync)]
    pub fn open(today_key: String, config_json: Option<String>) -> Result<Self, String> {
        let today = CalendarDate::parse_key(&today_key).map_err(|err| err.to_string())?;
        let config = match config_json {
            Some(raw) => TimelineConfig::from_json(&raw).map_err(|err| err.to_string())?,
            None => TimelineConfig::default(),
        };
        Ok(Self {
            engine: TimelineEngine::new(today, config),
        })
    }

    /// Reports a measured region: `header|month_grid|day_list`.
    #[flutter_rust_bridge::frb(sync)]
    pub fn layout_measured(
        &mut self,
        region: String,
        x: f64,
        y: f64,
        width: f64,
        height: f64,
        at_ms: i64,
    ) -> Vec<TimelineCommand> {
        let Some(region) = parse_region(&region) else {
            warn!("event=ffi_input module=ffi status=rejected field=region");
            return Vec::new();
        };
        self.dispatch(HostEvent::LayoutMeasured {
            region,
            rect: Rect::new(x, y, width, height),
            at_ms: to_millis(at_ms),
        })
    }

    #[flutter_rust_bridge::frb(sync)]
    pub fn scroll(&mut self, offset: f64, at_ms: i64) -> Vec<TimelineCommand> {
        self.dispatch(HostEvent::Scroll {
            offset,
            at_ms: to_millis(at_ms),
        })
    }

    #[flutter_rust_bridge::frb(sync)]
    pub fn drag_move(&mut self, dy: f64, at_ms: i64) -> Vec<TimelineCommand> {
        self.dispatch(HostEvent::DragMove {
            dy,
            at_ms: to_millis(at_ms),
        })
    }

    #[flutter_rust_bridge::frb(sync)]
    pub fn drag_release(&mut self, dy: f64, velocity: f64, at_ms: i64) -> Vec<TimelineCommand> {
        self.dispatch(HostEvent::DragRelease {
            dy,
            velocity,
            at_ms: to_millis(at_ms),
        })
    }

    /// Taps a date cell by `YYYY-MM-DD` key.
    #[flutter_rust_bridge::frb(sync)]
    pub fn tap_date(&mut self, date_key: String, at_ms: i64) -> Vec<TimelineCommand> {
        match CalendarDate::parse_key(&date_key) {
            Ok(date) => self.dispatch(HostEvent::Tap {
                target: TapTarget::Date(date),
                at_ms: to_millis(at_ms),
            }),
            Err(err) => {
                warn!("event=ffi_input module=ffi status=rejected field=date_key reason={err}");
                Vec::new()
            }
        }
    }

    /// Taps a control: `previous_month|next_month|today|sheet_handle`.
    #[flutter_rust_bridge::frb(sync)]
    pub fn tap_control(&mut self, control: String, at_ms: i64) -> Vec<TimelineCommand> {
        let Some(target) = parse_control(&control) else {
            warn!("event=ffi_input module=ffi status=rejected field=control");
            return Vec::new();
        };
        self.dispatch(HostEvent::Tap {
            target,
            at_ms: to_millis(at_ms),
        })
    }

    /// Replaces task counts keyed by `YYYY-MM-DD`.
    #[flutter_rust_bridge::frb(sync)]
    pub fn set_task_counts(&mut self, counts: HashMap<String, u32>) -> Vec<TimelineCommand> {
        self.dispatch(HostEvent::TaskCountsChanged {
            counts: TaskCounts::from(counts),
        })
    }

    /// Moves the date behind the `today` control, e.g. after midnight.
    ///
    /// Returns empty string on success and error message on a bad key.
    #[flutter_rust_bridge::frb(sync)]
    pub fn set_today(&mut self, today_key: String) -> String {
        match CalendarDate::parse_key(&today_key) {
            Ok(today) => {
                self.engine.set_today(today);
                String::new()
            }
            Err(err) => {
                warn!("event=ffi_input module=ffi status=rejected field=today_key reason={err}");
                err.to_string()
            }
        }
    }

    /// Timer hook: closes elapsed debounce windows and advances the sheet.
    #[flutter_rust_bridge::frb(sync)]
    pub fn tick(&mut self, at_ms: i64) {
        self.engine.handle(HostEvent::Tick {
            at_ms: to_millis(at_ms),
        });
    }

    #[flutter_rust_bridge::frb(sync)]
    pub fn snapshot(&self) -> TimelineSnapshotView {
        let snapshot = self.engine.snapshot();
        TimelineSnapshotView {
            selected_date: snapshot.selected_date.key(),
            visible_month: snapshot.visible_month.key(),
            scroll_offset: snapshot.scroll_offset,
            is_programmatic_scroll_in_flight: snapshot.is_programmatic_scroll_in_flight,
            pending_scroll_date: snapshot.pending_scroll_date.map(|date| date.key()),
            sheet_position: snapshot.sheet_position,
            sheet_is_dragging: snapshot.sheet_is_dragging,
        }
    }

    /// 42 grid dates in row-major order.
    #[flutter_rust_bridge::frb(sync)]
    pub fn grid_date_keys(&self) -> Vec<String> {
        self.engine.month_grid().dates().map(|date| date.key()).collect()
    }

    /// Day sections with offsets, in list order.
    #[flutter_rust_bridge::frb(sync)]
    pub fn sections(&self) -> Vec<TimelineSection> {
        let grid = self.engine.month_grid();
        self.engine
            .layout()
            .entries()
            .iter()
            .map(|entry| TimelineSection {
                date_key: entry.date.key(),
                in_visible_month: grid.is_in_month(&entry.date),
                offset: entry.offset,
                height: entry.height,
            })
            .collect()
    }

    fn dispatch(&mut self, event: HostEvent) -> Vec<TimelineCommand> {
        self.engine
            .handle(event)
            .into_iter()
            .map(to_timeline_command)
            .collect()
    }
}

fn to_millis(at_ms: i64) -> u64 {
    u64::try_from(at_ms).unwrap_or(0)
}

fn parse_region(value: &str) -> Option<Region> {
    match value.trim() {
        "header" => Some(Region::Header),
        "month_grid" => Some(Region::MonthGrid),
        "day_list" => Some(Region::DayList),
        _ => None,
    }
}

fn parse_control(value: &str) -> Option<TapTarget> {
    match value.trim() {
        "previous_month" => Some(TapTarget::PreviousMonth),
        "next_month" => Some(TapTarget::NextMonth),
        "today" => Some(TapTarget::Today),
        "sheet_handle" => Some(TapTarget::SheetHandle),
        _ => None,
    }
}

fn to_timeline_command(command: HostCommand) -> TimelineCommand {
    match command {
        HostCommand::RenderMonth { month } => TimelineCommand {
            kind: "render_month".to_string(),
            month_key: Some(month.key()),
            ..TimelineCommand::default()
        },
        HostCommand::ScrollTo { offset, .. } => TimelineCommand {
            kind: "scroll_to".to_string(),
            scroll_offset: Some(offset),
            ..TimelineCommand::default()
        },
        HostCommand::MoveSheet { position, top } => TimelineCommand {
            kind: "move_sheet".to_string(),
            sheet_position: Some(position),
            sheet_top: Some(top),
            ..TimelineCommand::default()
        },
        HostCommand::AnimateSheet {
            target,
            position,
            top,
            duration_ms,
            easing,
        } => TimelineCommand {
            kind: "animate_sheet".to_string(),
            sheet_target: Some(target.as_str().to_string()),
            sheet_position: Some(position),
            sheet_top: top,
            duration_ms: Some(u32::try_from(duration_ms).unwrap_or(u32::MAX)),
            easing: Some(easing.as_str().to_string()),
            ..TimelineCommand::default()
        },
    }
}
