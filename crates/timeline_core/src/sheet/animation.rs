//! Settle interpolation for the sheet.
//!
//! Presentation only: the curve decides how the host animates between two
//! positions, never which position is chosen.

use serde::{Deserialize, Serialize};

/// Interpolation curve for snap animations.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Easing {
    Linear,
    #[default]
    EaseOutCubic,
}

impl Easing {
    /// Maps linear progress in `[0, 1]` onto the curve.
    pub fn apply(self, progress: f64) -> f64 {
        let t = progress.clamp(0.0, 1.0);
        match self {
            Self::Linear => t,
            Self::EaseOutCubic => 1.0 - (1.0 - t).powi(3),
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            Self::Linear => "linear",
            Self::EaseOutCubic => "ease_out_cubic",
        }
    }
}

/// An in-progress move from `from` to `to`.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SettleAnimation {
    pub from: f64,
    pub to: f64,
    pub started_at_ms: u64,
    pub duration_ms: u64,
    pub easing: Easing,
}

impl SettleAnimation {
    pub fn is_finished(&self, now_ms: u64) -> bool {
        now_ms.saturating_sub(self.started_at_ms) >= self.duration_ms
    }

    /// Interpolated value at `now_ms`.
    pub fn value_at(&self, now_ms: u64) -> f64 {
        if self.is_finished(now_ms) {
            return self.to;
        }
        let elapsed = now_ms.saturating_sub(self.started_at_ms) as f64;
        let progress = elapsed / self.duration_ms as f64;
        self.from + (self.to - self.from) * self.easing.apply(progress)
    }
}
