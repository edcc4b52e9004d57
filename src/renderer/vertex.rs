//! Vertex types for 2D rendering

use bytemuck::{Pod, Zeroable};

pub type Color = [f32; 4];

/// Textured, tinted 2D vertex in field pixels
#[repr(C)]
#[derive(Copy, Clone, Debug, PartialEq, Pod, Zeroable)]
pub struct Vertex {
    pub position: [f32; 2],
    pub uv: [f32; 2],
    pub color: Color,
}

impl Vertex {
    pub const fn new(x: f32, y: f32, u: f32, v: f32, color: Color) -> Self {
        Self {
            position: [x, y],
            uv: [u, v],
            color,
        }
    }

    pub fn desc() -> wgpu::VertexBufferLayout<'static> {
        const ATTRIBUTES: [wgpu::VertexAttribute; 3] =
            wgpu::vertex_attr_array![0 => Float32x2, 1 => Float32x2, 2 => Float32x4];
        wgpu::VertexBufferLayout {
            array_stride: std::mem::size_of::<Vertex>() as wgpu::BufferAddress,
            step_mode: wgpu::VertexStepMode::Vertex,
            attributes: &ATTRIBUTES,
        }
    }
}

/// Fallback colours for assets that are not loaded
pub mod colors {
    use super::Color;

    /// #87CEEB
    pub const SKY: Color = [0.529, 0.808, 0.922, 1.0];
    pub const RUNNER: Color = [0.0, 0.502, 0.0, 1.0];
    pub const GROUND_OBSTACLE: Color = [1.0, 0.0, 0.0, 1.0];
    pub const FLYING_OBSTACLE: Color = [0.502, 0.0, 0.502, 1.0];
    /// Untinted texture
    pub const WHITE: Color = [1.0, 1.0, 1.0, 1.0];
    pub const CLEAR: Color = [0.0, 0.0, 0.0, 1.0];
}
