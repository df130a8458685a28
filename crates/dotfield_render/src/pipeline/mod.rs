//! Rendering pipeline components
//!
//! Particles are drawn as instanced quads: one six-vertex quad expanded in
//! the vertex shader, one instance per particle.

pub mod types;
pub mod square_pipeline;

// Re-export types
pub use types::{SquareInstance, ViewportUniforms, QUAD_VERTEX_COUNT};

// Re-export pipelines
pub use square_pipeline::SquarePipeline;
