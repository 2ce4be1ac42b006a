//! Two-position draggable sheet.
//!
//! # Responsibility
//! - Track the sheet's normalized position (0 = collapsed, 1 = expanded).
//! - Turn drags, releases and handle taps into snap targets.
//! - Convert between normalized positions and host pixels via measured
//!   layout boundaries.
//!
//! # Invariants
//! - Position is always within `[0, 1]`.
//! - A handle tap is ignored while a drag is active.

pub mod animation;
pub mod controller;
pub mod geometry;
