//! Flutter bridge for the timeline core.

pub mod api;
