//! Vertex types for 3D rendering

use bytemuck::{Pod, Zeroable};

/// Lit 3D vertex. `material` packs (ambient, diffuse, specular, shininess)
/// so the shader can shade armor, cloth and self-lit orbs differently from
/// one pipeline.
#[repr(C)]
#[derive(Copy, Clone, Debug, Pod, Zeroable)]
pub struct Vertex {
    pub position: [f32; 3],
    pub normal: [f32; 3],
    pub color: [f32; 4],
    pub material: [f32; 4],
}

impl Vertex {
    pub const fn new(position: [f32; 3], normal: [f32; 3], color: [f32; 4]) -> Self {
        Self {
            position,
            normal,
            color,
            material: [0.35, 0.8, 0.1, 8.0],
        }
    }

    pub fn desc() -> wgpu::VertexBufferLayout<'static> {
        wgpu::VertexBufferLayout {
            array_stride: std::mem::size_of::<Vertex>() as wgpu::BufferAddress,
            step_mode: wgpu::VertexStepMode::Vertex,
            attributes: &[
                wgpu::VertexAttribute {
                    offset: 0,
                    shader_location: 0,
                    format: wgpu::VertexFormat::Float32x3,
                },
                wgpu::VertexAttribute {
                    offset: std::mem::size_of::<[f32; 3]>() as wgpu::BufferAddress,
                    shader_location: 1,
                    format: wgpu::VertexFormat::Float32x3,
                },
                wgpu::VertexAttribute {
                    offset: std::mem::size_of::<[f32; 6]>() as wgpu::BufferAddress,
                    shader_location: 2,
                    format: wgpu::VertexFormat::Float32x4,
                },
                wgpu::VertexAttribute {
                    offset: std::mem::size_of::<[f32; 10]>() as wgpu::BufferAddress,
                    shader_location: 3,
                    format: wgpu::VertexFormat::Float32x4,
                },
            ],
        }
    }
}

/// Colors for scene elements
pub mod colors {
    pub const BACKGROUND: [f32; 4] = [0.05, 0.05, 0.15, 1.0];
    pub const FLOOR: [f32; 4] = [0.25, 0.22, 0.3, 1.0];
    pub const FLOOR_GRID: [f32; 4] = [0.4, 0.35, 0.5, 1.0];
    pub const RUNE_CIRCLE: [f32; 4] = [0.5, 0.3, 0.9, 0.8];
    pub const PILLAR: [f32; 4] = [0.35, 0.32, 0.4, 1.0];
    pub const DAMAGE_NUMBER: [f32; 4] = [1.0, 0.3, 0.2, 1.0];
    pub const HEAL_NUMBER: [f32; 4] = [0.3, 1.0, 0.4, 1.0];
}
