//! Engine configuration.
//!
//! # Responsibility
//! - Group every tunable constant of the timeline in one host-overridable
//!   document.
//! - Reject values that would break geometry or gesture invariants.
//!
//! # Invariants
//! - Omitted JSON fields fall back to defaults.
//! - A validated config yields positive section heights and a usable snap
//!   threshold.

use crate::calendar::month_grid::WeekStart;
use crate::layout::section::SectionMetrics;
use crate::sheet::controller::SheetConfig;
use crate::sync::controller::SyncConfig;
use serde::{Deserialize, Serialize};
use std::error::Error;
use std::fmt::{Display, Formatter};

/// Complete engine configuration.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct TimelineConfig {
    pub week_start: WeekStart,
    pub sections: SectionMetrics,
    pub sync: SyncConfig,
    pub sheet: SheetConfig,
}

impl TimelineConfig {
    /// Parses and validates a JSON override document.
    ///
    /// Blank input yields the defaults.
    pub fn from_json(raw: &str) -> Result<Self, ConfigError> {
        if raw.trim().is_empty() {
            return Ok(Self::default());
        }
        let config: Self =
            serde_json::from_str(raw).map_err(|err| ConfigError::Parse(err.to_string()))?;
        config.validate()?;
        Ok(config)
    }

    /// Checks value-level invariants.
    pub fn validate(&self) -> Result<(), ConfigError> {
        non_negative("sections.base_header_height", self.sections.base_header_height)?;
        positive("sections.row_height", self.sections.row_height)?;
        positive("sections.empty_state_height", self.sections.empty_state_height)?;

        non_negative("sync.backward_tolerance", self.sync.backward_tolerance)?;
        non_negative("sync.lookahead_band", self.sync.lookahead_band)?;

        non_negative("sheet.dead_zone", self.sheet.dead_zone)?;
        positive("sheet.velocity_threshold", self.sheet.velocity_threshold)?;
        let threshold = self.sheet.expand_threshold;
        if !threshold.is_finite() || threshold <= 0.0 || threshold >= 1.0 {
            return Err(ConfigError::InvalidValue {
                field: "sheet.expand_threshold",
                reason: "must be strictly between 0 and 1",
            });
        }
        Ok(())
    }
}

fn non_negative(field: &'static str, value: f64) -> Result<(), ConfigError> {
    if !value.is_finite() || value < 0.0 {
        return Err(ConfigError::InvalidValue {
            field,
            reason: "must be a finite value >= 0",
        });
    }
    Ok(())
}

fn positive(field: &'static str, value: f64) -> Result<(), ConfigError> {
    if !value.is_finite() || value <= 0.0 {
        return Err(ConfigError::InvalidValue {
            field,
            reason: "must be a finite value > 0",
        });
    }
    Ok(())
}

/// Errors from loading configuration.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ConfigError {
    /// JSON could not be decoded.
    Parse(String),
    /// A field holds a value outside its allowed range.
    InvalidValue {
        field: &'static str,
        reason: &'static str,
    },
}

impl Display for ConfigError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Parse(message) => write!(f, "invalid timeline config: {message}"),
            Self::InvalidValue { field, reason } => write!(f, "config `{field}` {reason}"),
        }
    }
}

impl Error for ConfigError {}
