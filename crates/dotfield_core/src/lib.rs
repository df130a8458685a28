//! Core types for the dotfield particle backdrop
//!
//! This crate ties the particle physics to a drawing surface and a frame
//! scheduler without depending on any windowing or GPU library.
//!
//! ## Key Components
//!
//! - [`ParticleField`] - Grid of particles, attractors and the per-frame tick
//! - [`DrawSurface`] - The 2D surface particles are drawn onto
//! - [`RenderLoop`] - Start/stop/frame driver over a [`FrameScheduler`]
//! - [`Listeners`] - Injected event callbacks with drop-to-unsubscribe handles
//! - [`Backdrop`] - Field + loop + input bindings, safe to resize mid-animation

mod backdrop;
mod events;
mod field;
mod listeners;
mod render_loop;
mod surface;

pub use backdrop::{Backdrop, Bindings};
pub use events::PointerEvent;
pub use field::{
    FieldConfig, FieldError, ParticleField, DEFAULT_ACTIVE_RADIUS, DEFAULT_GAP,
    DEFAULT_POINTER_RADIUS,
};
pub use listeners::{ListenerKey, Listeners, Subscription};
pub use render_loop::{FrameHandle, FrameScheduler, ManualScheduler, RenderLoop, Tick};
pub use surface::DrawSurface;

// Re-export physics and math types for convenience
pub use dotfield_math::{Color, Vec2};
pub use dotfield_physics::{Attractor, OrbitParams, Particle, ParticleParams, Square, WaveParams};
