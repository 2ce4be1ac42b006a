//! Selected-date / visible-month / scroll-offset reconciliation.
//!
//! # Responsibility
//! - Own the sync state and apply the three input channels to it: month
//!   navigation, date taps, and scroll events.
//! - Turn selection changes into absolute scroll commands for the host.
//!
//! # Invariants
//! - Only `SyncController` mutates sync state; readers get snapshots.
//! - The selected date's month equals the visible month unless a cross-month
//!   jump is still waiting for its layout pass.
//! - A programmatic scroll never feeds back into selection while its
//!   debounce window is open.

pub mod controller;
pub mod state;
