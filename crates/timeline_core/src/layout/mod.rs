//! Day-list geometry.
//!
//! # Responsibility
//! - Derive per-day section heights from task counts.
//! - Map every materialized date to the scroll offset its section starts at.
//!
//! # Invariants
//! - Section heights are always positive.
//! - Offsets are rebuilt in one full pass; there is no incremental patching.

pub mod index;
pub mod section;
