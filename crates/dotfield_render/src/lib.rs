//! Drawing surfaces for the dotfield backdrop
//!
//! This crate provides the wgpu-based pipeline that draws particle squares
//! as instanced quads, plus a CPU framebuffer for headless use.
//!
//! ## Key Components
//!
//! - [`context::RenderContext`] - WGPU device, queue, and surface management
//! - [`batch::SquareBatch`] - `DrawSurface` that collects GPU instances
//! - [`pipeline::SquarePipeline`] - Instanced square rendering
//! - [`framebuffer::Framebuffer`] - `DrawSurface` that rasterises on the CPU

pub mod batch;
pub mod context;
pub mod framebuffer;
pub mod pipeline;

pub use batch::SquareBatch;
pub use context::{ContextError, RenderContext};
pub use framebuffer::Framebuffer;

// Re-export core types for convenience
pub use dotfield_core::{DrawSurface, Square};
