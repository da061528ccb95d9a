//! Colored vertex fed to the triangle-list pipeline
//!
//! Positions stay in viewport CSS pixels (origin top-left, y down), the
//! same space the simulation draws in. The shader maps them to clip space
//! through the `Globals` resolution uniform, so resizing never touches
//! already-tessellated geometry.

use bytemuck::{Pod, Zeroable};
use glam::Vec2;

#[repr(C)]
#[derive(Copy, Clone, Debug, PartialEq, Pod, Zeroable)]
pub struct Vertex {
    /// Viewport pixels
    pub position: [f32; 2],
    /// Straight (non-premultiplied) RGBA; the pipeline alpha-blends
    pub color: [f32; 4],
}

impl Vertex {
    const ATTRIBUTES: [wgpu::VertexAttribute; 2] =
        wgpu::vertex_attr_array![0 => Float32x2, 1 => Float32x4];

    pub const fn new(x: f32, y: f32, color: [f32; 4]) -> Self {
        Self {
            position: [x, y],
            color,
        }
    }

    pub fn at(p: Vec2, color: [f32; 4]) -> Self {
        Self::new(p.x, p.y, color)
    }

    pub fn desc() -> wgpu::VertexBufferLayout<'static> {
        wgpu::VertexBufferLayout {
            array_stride: std::mem::size_of::<Vertex>() as wgpu::BufferAddress,
            step_mode: wgpu::VertexStepMode::Vertex,
            attributes: &Self::ATTRIBUTES,
        }
    }
}

/// Fixed colors outside the simulation palette
pub mod colors {
    /// Render-pass clear color, under the sky gradient
    pub const SPACE: [f32; 4] = [0.02, 0.016, 0.024, 1.0];
}
