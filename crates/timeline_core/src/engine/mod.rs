//! Host integration facade.
//!
//! # Responsibility
//! - Define the event/command vocabulary shared with the rendering host.
//! - Wire grid generation, layout indexing and both controllers together.
//!
//! # See also
//! - `crate::sync` for the selection/scroll rules.
//! - `crate::sheet` for the drag-to-snap rules.

pub mod event;
pub mod timeline;
