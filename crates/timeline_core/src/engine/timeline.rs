//! Host-facing timeline engine.
//!
//! # Responsibility
//! - Own every derived structure (grid, sections, layout) and both
//!   controllers for one mounted calendar screen.
//! - Route host events to the owning controller and translate their outputs
//!   into ordered host commands.
//!
//! # Invariants
//! - The layout always covers the current grid and task counts; it is rebuilt
//!   whenever either changes.
//! - Pending scrolls are fulfilled only on a day-list layout pass, after the
//!   host has rendered the rebuilt range.
//! - Handling an event never panics and never fails.

use crate::calendar::date::{CalendarDate, YearMonth};
use crate::calendar::month_grid::MonthGrid;
use crate::config::TimelineConfig;
use crate::engine::event::{HostCommand, HostEvent, Region, TapTarget};
use crate::layout::index::LayoutIndex;
use crate::layout::section::{build_sections, TaskCounts};
use crate::sheet::controller::{SheetGestureController, SnapCommand};
use crate::sheet::geometry::{Rect, SheetGeometry};
use crate::sync::controller::{SyncController, SyncOutput};
use crate::sync::state::SyncState;
use log::{debug, info};
use serde::Serialize;

/// Consistent read of both controllers.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct TimelineSnapshot {
    pub selected_date: CalendarDate,
    pub visible_month: YearMonth,
    pub scroll_offset: f64,
    pub is_programmatic_scroll_in_flight: bool,
    pub pending_scroll_date: Option<CalendarDate>,
    pub sheet_position: f64,
    pub sheet_is_dragging: bool,
}

/// Interaction engine for one calendar screen.
///
/// State resets only by constructing a new engine (a full remount).
#[derive(Debug, Clone)]
pub struct TimelineEngine {
    config: TimelineConfig,
    today: CalendarDate,
    grid: MonthGrid,
    task_counts: TaskCounts,
    layout: LayoutIndex,
    sync: SyncController,
    sheet: SheetGestureController,
    header_rect: Option<Rect>,
    month_grid_rect: Option<Rect>,
}

impl TimelineEngine {
    /// Mounts the engine with `today` selected.
    pub fn new(today: CalendarDate, config: TimelineConfig) -> Self {
        let today = today.clamped_to_supported();
        let grid = MonthGrid::generate_for(today.year_month(), config.week_start);
        let task_counts = TaskCounts::new();
        let layout = LayoutIndex::build(build_sections(
            grid.dates(),
            &task_counts,
            &config.sections,
        ));
        info!(
            "event=timeline_mount module=engine status=ok today={} month={}",
            today,
            grid.month()
        );

        Self {
            sync: SyncController::new(today, config.sync),
            sheet: SheetGestureController::new(config.sheet),
            config,
            today,
            grid,
            task_counts,
            layout,
            header_rect: None,
            month_grid_rect: None,
        }
    }

    pub fn config(&self) -> &TimelineConfig {
        &self.config
    }

    pub fn today(&self) -> CalendarDate {
        self.today
    }

    /// Updates the date the "today" control jumps to.
    ///
    /// Hosts call this when the local date rolls over during a session.
    pub fn set_today(&mut self, today: CalendarDate) {
        self.today = today.clamped_to_supported();
        debug!("event=today_update module=engine status=ok today={}", self.today);
    }

    pub fn month_grid(&self) -> &MonthGrid {
        &self.grid
    }

    pub fn layout(&self) -> &LayoutIndex {
        &self.layout
    }

    pub fn task_counts(&self) -> &TaskCounts {
        &self.task_counts
    }

    pub fn sync_state(&self) -> SyncState {
        self.sync.state()
    }

    pub fn selected_date(&self) -> CalendarDate {
        self.sync.selected_date()
    }

    pub fn sheet_position(&self) -> f64 {
        self.sheet.position()
    }

    pub fn snapshot(&self) -> TimelineSnapshot {
        let sync = self.sync.state();
        let sheet = self.sheet.state();
        TimelineSnapshot {
            selected_date: sync.selected_date,
            visible_month: sync.visible_month,
            scroll_offset: sync.last_known_scroll_offset,
            is_programmatic_scroll_in_flight: sync.is_programmatic_scroll_in_flight,
            pending_scroll_date: self.sync.pending_scroll().map(|pending| pending.date),
            sheet_position: sheet.position,
            sheet_is_dragging: sheet.is_dragging,
        }
    }

    /// Applies one host event and returns the commands it produced.
    pub fn handle(&mut self, event: HostEvent) -> Vec<HostCommand> {
        let mut commands = Vec::new();
        match event {
            HostEvent::LayoutMeasured { region, rect, at_ms } => {
                self.on_layout_measured(region, rect, at_ms, &mut commands);
            }
            HostEvent::Scroll { offset, at_ms } => {
                let output = self.sync.on_scroll(offset, &self.layout, at_ms);
                self.apply_sync_output(output, &mut commands);
            }
            HostEvent::DragMove { dy, at_ms } => {
                if self.sheet.on_drag_move(dy, at_ms) {
                    if let Some(top) = self.sheet.top() {
                        commands.push(HostCommand::MoveSheet {
                            position: self.sheet.position(),
                            top,
                        });
                    }
                }
            }
            HostEvent::DragRelease {
                dy,
                velocity,
                at_ms,
            } => {
                if let Some(snap) = self.sheet.on_release(dy, velocity, at_ms) {
                    commands.push(self.animate_sheet(snap));
                }
            }
            HostEvent::Tap { target, at_ms } => self.on_tap(target, at_ms, &mut commands),
            HostEvent::TaskCountsChanged { counts } => {
                self.task_counts = counts;
                self.rebuild_layout();
            }
            HostEvent::Tick { at_ms } => {
                self.sync.tick(at_ms);
                self.sheet.advance(at_ms);
            }
        }
        commands
    }

    fn on_tap(&mut self, target: TapTarget, at_ms: u64, commands: &mut Vec<HostCommand>) {
        let output = match target {
            TapTarget::Date(date) => self.sync.tap_date(date, &self.layout, at_ms),
            TapTarget::Today => self.sync.tap_date(self.today, &self.layout, at_ms),
            TapTarget::PreviousMonth => self.sync.navigate_month(-1, at_ms),
            TapTarget::NextMonth => self.sync.navigate_month(1, at_ms),
            TapTarget::SheetHandle => {
                if let Some(snap) = self.sheet.on_handle_tap(at_ms) {
                    commands.push(self.animate_sheet(snap));
                }
                return;
            }
        };
        self.apply_sync_output(output, commands);
    }

    fn on_layout_measured(
        &mut self,
        region: Region,
        rect: Rect,
        at_ms: u64,
        commands: &mut Vec<HostCommand>,
    ) {
        match region {
            Region::Header => self.header_rect = Some(rect),
            Region::MonthGrid => self.month_grid_rect = Some(rect),
            Region::DayList => {
                let output = self.sync.on_layout_ready(&self.layout, at_ms);
                self.apply_sync_output(output, commands);
                return;
            }
        }

        if let (Some(header), Some(grid)) = (self.header_rect, self.month_grid_rect) {
            let geometry = SheetGeometry::from_regions(&header, &grid);
            if geometry.is_none() {
                debug!("event=sheet_geometry module=engine status=degraded reason=no_travel");
            }
            self.sheet.set_geometry(geometry);
        }
    }

    fn apply_sync_output(&mut self, output: SyncOutput, commands: &mut Vec<HostCommand>) {
        if output.visible_month_changed {
            let month = self.sync.visible_month();
            if month != self.grid.month() {
                self.grid = MonthGrid::generate_for(month, self.config.week_start);
                self.rebuild_layout();
            }
            commands.push(HostCommand::RenderMonth { month });
        }
        if let Some(scroll) = output.scroll {
            commands.push(HostCommand::ScrollTo {
                offset: scroll.offset,
                animated: scroll.animated,
            });
        }
    }

    fn rebuild_layout(&mut self) {
        self.layout = LayoutIndex::build(build_sections(
            self.grid.dates(),
            &self.task_counts,
            &self.config.sections,
        ));
        debug!(
            "event=layout_rebuild module=engine status=ok month={} sections={} total_height={:.1}",
            self.grid.month(),
            self.layout.len(),
            self.layout.total_height()
        );
    }

    fn animate_sheet(&self, snap: SnapCommand) -> HostCommand {
        let position = snap.target.position();
        HostCommand::AnimateSheet {
            target: snap.target,
            position,
            top: self.sheet.geometry().map(|geometry| geometry.top_for(position)),
            duration_ms: snap.duration_ms,
            easing: snap.easing,
        }
    }
}
