//! Application systems
//!
//! Window, GPU rendering and frame scheduling, kept out of main.rs.

mod frame_scheduler;
mod render;
mod window;

pub use frame_scheduler::WinitScheduler;
pub use render::{RenderError, RenderSystem};
pub use window::{WindowError, WindowSystem};
