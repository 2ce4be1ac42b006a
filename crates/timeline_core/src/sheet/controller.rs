//! Drag-to-snap state machine for the sheet.
//!
//! # Responsibility
//! - Start drags past a dead zone, follow them, and pick a snap on release.
//! - Toggle between the two snaps on handle taps.
//! - Advance the settle interpolation that backs the authoritative position.
//!
//! # Invariants
//! - Drags compose: each drag moves relative to the position captured when
//!   it started, including a position captured mid-settle.
//! - Without measured geometry, drags are ignored.

use crate::sheet::animation::{Easing, SettleAnimation};
use crate::sheet::geometry::SheetGeometry;
use log::debug;
use serde::{Deserialize, Serialize};

/// Tuning constants for the sheet gesture.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SheetConfig {
    /// Vertical movement required before a touch becomes a drag.
    pub dead_zone: f64,
    /// Release speed (units/s) above which direction alone picks the snap.
    pub velocity_threshold: f64,
    /// Slow releases past this position expand.
    pub expand_threshold: f64,
    pub snap_duration_ms: u64,
    pub easing: Easing,
}

impl Default for SheetConfig {
    fn default() -> Self {
        Self {
            dead_zone: 10.0,
            velocity_threshold: 500.0,
            expand_threshold: 0.5,
            snap_duration_ms: 250,
            easing: Easing::default(),
        }
    }
}

/// Discrete settle target.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SheetSnap {
    Collapsed,
    Expanded,
}

impl SheetSnap {
    pub fn position(self) -> f64 {
        match self {
            Self::Collapsed => 0.0,
            Self::Expanded => 1.0,
        }
    }

    pub fn toggled(self) -> Self {
        match self {
            Self::Collapsed => Self::Expanded,
            Self::Expanded => Self::Collapsed,
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            Self::Collapsed => "collapsed",
            Self::Expanded => "expanded",
        }
    }
}

/// Point-in-time view of the sheet.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct SheetState {
    pub position: f64,
    pub is_dragging: bool,
}

/// Request to animate the sheet toward a snap.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct SnapCommand {
    pub target: SheetSnap,
    pub duration_ms: u64,
    pub easing: Easing,
}

/// Picks the snap for a release.
///
/// Fast releases follow their direction (negative velocity moves up and
/// expands); slow ones go to the nearer edge.
pub fn choose_snap(position: f64, velocity: f64, config: &SheetConfig) -> SheetSnap {
    if velocity.is_finite() && velocity.abs() > config.velocity_threshold {
        return if velocity < 0.0 {
            SheetSnap::Expanded
        } else {
            SheetSnap::Collapsed
        };
    }
    if position > config.expand_threshold {
        SheetSnap::Expanded
    } else {
        SheetSnap::Collapsed
    }
}

/// Owner of the sheet state.
#[derive(Debug, Clone)]
pub struct SheetGestureController {
    config: SheetConfig,
    geometry: Option<SheetGeometry>,
    position: f64,
    is_dragging: bool,
    drag_origin: f64,
    settle: Option<SettleAnimation>,
}

impl SheetGestureController {
    /// Starts collapsed and idle.
    pub fn new(config: SheetConfig) -> Self {
        Self {
            config,
            geometry: None,
            position: SheetSnap::Collapsed.position(),
            is_dragging: false,
            drag_origin: 0.0,
            settle: None,
        }
    }

    pub fn config(&self) -> &SheetConfig {
        &self.config
    }

    pub fn state(&self) -> SheetState {
        SheetState {
            position: self.position,
            is_dragging: self.is_dragging,
        }
    }

    /// Authoritative position as of the last event or `advance`.
    pub fn position(&self) -> f64 {
        self.position
    }

    pub fn is_dragging(&self) -> bool {
        self.is_dragging
    }

    pub fn is_settling(&self) -> bool {
        self.settle.is_some()
    }

    pub fn geometry(&self) -> Option<&SheetGeometry> {
        self.geometry.as_ref()
    }

    pub fn set_geometry(&mut self, geometry: Option<SheetGeometry>) {
        self.geometry = geometry;
    }

    /// Top edge in host pixels for the current position.
    pub fn top(&self) -> Option<f64> {
        self.geometry.map(|geometry| geometry.top_for(self.position))
    }

    /// Snap the sheet is at or heading to.
    pub fn resting_snap(&self) -> SheetSnap {
        match self.settle {
            Some(settle) if settle.to >= 1.0 => SheetSnap::Expanded,
            Some(_) => SheetSnap::Collapsed,
            None if self.position > self.config.expand_threshold => SheetSnap::Expanded,
            None => SheetSnap::Collapsed,
        }
    }

    /// Moves the settle interpolation to `now_ms`.
    pub fn advance(&mut self, now_ms: u64) {
        let Some(settle) = self.settle else {
            return;
        };
        self.position = settle.value_at(now_ms);
        if settle.is_finished(now_ms) {
            self.settle = None;
        }
    }

    /// Applies cumulative vertical movement `dy` since touch-down.
    ///
    /// Returns whether the gesture is (now) a drag. Downward movement
    /// (positive `dy`) collapses.
    pub fn on_drag_move(&mut self, dy: f64, now_ms: u64) -> bool {
        let Some(geometry) = self.geometry else {
            return false;
        };
        if !dy.is_finite() {
            return self.is_dragging;
        }

        if !self.is_dragging {
            if dy.abs() <= self.config.dead_zone {
                return false;
            }
            self.advance(now_ms);
            self.settle = None;
            self.is_dragging = true;
            self.drag_origin = self.position;
            debug!(
                "event=sheet_drag_start module=sheet status=ok origin={:.3}",
                self.drag_origin
            );
        }

        self.position = (self.drag_origin - dy / geometry.travel()).clamp(0.0, 1.0);
        true
    }

    /// Ends a drag with its final movement and release velocity (units/s).
    ///
    /// Returns `None` when no drag was active.
    pub fn on_release(&mut self, dy: f64, velocity: f64, now_ms: u64) -> Option<SnapCommand> {
        if !self.is_dragging {
            return None;
        }
        self.on_drag_move(dy, now_ms);
        self.is_dragging = false;

        let target = choose_snap(self.position, velocity, &self.config);
        debug!(
            "event=sheet_release module=sheet status=ok position={:.3} velocity={:.1} target={}",
            self.position,
            velocity,
            target.as_str()
        );
        Some(self.settle_to(target, now_ms))
    }

    /// Toggles between the snaps. Ignored mid-drag.
    pub fn on_handle_tap(&mut self, now_ms: u64) -> Option<SnapCommand> {
        if self.is_dragging {
            debug!("event=sheet_tap module=sheet status=ignored reason=dragging");
            return None;
        }
        self.advance(now_ms);
        let target = self.resting_snap().toggled();
        Some(self.settle_to(target, now_ms))
    }

    fn settle_to(&mut self, target: SheetSnap, now_ms: u64) -> SnapCommand {
        let settle = SettleAnimation {
            from: self.position,
            to: target.position(),
            started_at_ms: now_ms,
            duration_ms: self.config.snap_duration_ms,
            easing: self.config.easing,
        };
        if settle.is_finished(now_ms) {
            self.position = settle.to;
            self.settle = None;
        } else {
            self.settle = Some(settle);
        }

        SnapCommand {
            target,
            duration_ms: self.config.snap_duration_ms,
            easing: self.config.easing,
        }
    }
}
