//! Pointer input for the dotfield backdrop
//!
//! Turns raw winit cursor events into [`dotfield_core::PointerEvent`]s.

mod pointer_tracker;

pub use pointer_tracker::{PointerTracker, TrackedEvents, DEFAULT_IDLE_TIMEOUT};
