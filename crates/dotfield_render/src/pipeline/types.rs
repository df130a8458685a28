//! GPU-compatible data types for the square pipeline
//!
//! These types are designed to match the shader layouts exactly.
//! All types derive Pod and Zeroable for safe GPU buffer operations.

use bytemuck::{Pod, Zeroable};
use dotfield_core::Square;

/// Vertices per quad (two triangles, no index buffer)
pub const QUAD_VERTEX_COUNT: u32 = 6;

/// One particle square, uploaded per instance
#[repr(C)]
#[derive(Clone, Copy, Debug, PartialEq, Pod, Zeroable)]
pub struct SquareInstance {
    /// Top-left corner in pixels
    pub origin: [f32; 2],
    /// Edge length in pixels
    pub size: f32,
    /// Straight-alpha RGBA
    pub color: [f32; 4],
}

impl From<&Square> for SquareInstance {
    fn from(square: &Square) -> Self {
        Self {
            origin: square.position.to_array(),
            size: square.size,
            color: square.color,
        }
    }
}

impl SquareInstance {
    /// Instance buffer layout (locations 0..=2)
    pub fn buffer_layout() -> wgpu::VertexBufferLayout<'static> {
        wgpu::VertexBufferLayout {
            array_stride: std::mem::size_of::<SquareInstance>() as wgpu::BufferAddress,
            step_mode: wgpu::VertexStepMode::Instance,
            attributes: &[
                // origin: vec2<f32>
                wgpu::VertexAttribute {
                    format: wgpu::VertexFormat::Float32x2,
                    offset: 0,
                    shader_location: 0,
                },
                // size: f32
                wgpu::VertexAttribute {
                    format: wgpu::VertexFormat::Float32,
                    offset: 8,
                    shader_location: 1,
                },
                // color: vec4<f32>
                wgpu::VertexAttribute {
                    format: wgpu::VertexFormat::Float32x4,
                    offset: 12,
                    shader_location: 2,
                },
            ],
        }
    }
}

/// Viewport uniforms for pixel → clip space conversion
#[repr(C)]
#[derive(Clone, Copy, Debug, PartialEq, Pod, Zeroable)]
pub struct ViewportUniforms {
    /// Viewport size in pixels
    pub size: [f32; 2],
    /// Padding to align to 16 bytes
    pub _padding: [f32; 2],
}

impl ViewportUniforms {
    pub fn new(width: u32, height: u32) -> Self {
        Self {
            size: [width.max(1) as f32, height.max(1) as f32],
            _padding: [0.0; 2],
        }
    }
}

impl Default for ViewportUniforms {
    fn default() -> Self {
        Self::new(1, 1)
    }
}
