//! Calendar math for the timeline.
//!
//! # Responsibility
//! - Define day-granular date values and their canonical `YYYY-MM-DD` keys.
//! - Generate the fixed 6x7 month grid shown above the day list.
//!
//! # Invariants
//! - Out-of-range inputs are normalized or clamped, never rejected.
//! - A `MonthGrid` always holds 42 consecutive dates.

pub mod date;
pub mod month_grid;
