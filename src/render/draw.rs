//! Draw commands and sinks
//!
//! Model and particle code emits `DrawCommand`s instead of touching the GPU.
//! `VertexBatch` tessellates them for the render pipeline; `Recorder` stores
//! them so assembly logic can be asserted on in tests.

use glam::{Mat3, Mat4, Vec3};

use super::mesh;
use super::transform::TransformStack;
use super::vertex::Vertex;

/// Primitive solids available to model assembly
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Shape {
    Sphere { radius: f32, slices: u32, stacks: u32 },
    Cylinder { base_radius: f32, top_radius: f32, height: f32, slices: u32 },
    Cone { radius: f32, height: f32, slices: u32 },
    Cube { size: f32 },
    Octahedron { size: f32 },
}

/// Per-part shading parameters
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Material {
    pub ambient: f32,
    pub diffuse: f32,
    pub specular: f32,
    pub shininess: f32,
}

impl Default for Material {
    fn default() -> Self {
        Self::matte()
    }
}

impl Material {
    /// Cloth, skin, stone
    pub const fn matte() -> Self {
        Self {
            ambient: 0.35,
            diffuse: 0.8,
            specular: 0.1,
            shininess: 8.0,
        }
    }

    /// Armor, blades, crystals
    pub const fn shiny() -> Self {
        Self {
            ambient: 0.3,
            diffuse: 0.7,
            specular: 0.9,
            shininess: 64.0,
        }
    }

    /// Self-lit parts (eyes, orbs, auras) that ignore scene lighting
    pub const fn emissive() -> Self {
        Self {
            ambient: 1.0,
            diffuse: 0.0,
            specular: 0.0,
            shininess: 1.0,
        }
    }
}

/// One primitive draw with its world transform
#[derive(Debug, Clone)]
pub struct DrawCommand {
    pub shape: Shape,
    pub transform: Mat4,
    pub color: [f32; 4],
    pub material: Material,
}

/// Receiver for draw commands
pub trait DrawSink {
    fn submit(&mut self, cmd: DrawCommand);
}

/// Records commands without tessellating; used by model tests
#[derive(Debug, Default)]
pub struct Recorder {
    pub commands: Vec<DrawCommand>,
}

impl Recorder {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn clear(&mut self) {
        self.commands.clear();
    }
}

impl DrawSink for Recorder {
    fn submit(&mut self, cmd: DrawCommand) {
        self.commands.push(cmd);
    }
}

/// Tessellates commands into a world-space vertex soup for the GPU
#[derive(Debug)]
pub struct VertexBatch {
    pub vertices: Vec<Vertex>,
    /// Slice/stack multiplier from the quality preset
    pub tessellation: f32,
}

impl Default for VertexBatch {
    fn default() -> Self {
        Self {
            vertices: Vec::new(),
            tessellation: 1.0,
        }
    }
}

impl VertexBatch {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn clear(&mut self) {
        self.vertices.clear();
    }

    /// Scaled subdivision count, floored so degenerate meshes can't happen
    fn detail(&self, n: u32, floor: u32) -> u32 {
        ((n as f32 * self.tessellation) as u32).max(floor)
    }
}

impl DrawSink for VertexBatch {
    fn submit(&mut self, cmd: DrawCommand) {
        let local = match cmd.shape {
            Shape::Sphere {
                radius,
                slices,
                stacks,
            } => mesh::sphere(radius, self.detail(slices, 3), self.detail(stacks, 2), cmd.color),
            Shape::Cylinder {
                base_radius,
                top_radius,
                height,
                slices,
            } => mesh::cylinder(
                base_radius,
                top_radius,
                height,
                self.detail(slices, 3),
                cmd.color,
            ),
            Shape::Cone {
                radius,
                height,
                slices,
            } => mesh::cone(radius, height, self.detail(slices, 3), cmd.color),
            Shape::Cube { size } => mesh::cube(size, cmd.color),
            Shape::Octahedron { size } => mesh::octahedron(size, cmd.color),
        };

        // Normals transform by the inverse-transpose to survive scaling
        let normal_mat = Mat3::from_mat4(cmd.transform).inverse().transpose();
        let material = [
            cmd.material.ambient,
            cmd.material.diffuse,
            cmd.material.specular,
            cmd.material.shininess,
        ];

        self.vertices.reserve(local.len());
        for v in local {
            let pos = cmd.transform.transform_point3(Vec3::from_array(v.position));
            let normal = (normal_mat * Vec3::from_array(v.normal)).normalize_or_zero();
            let mut vertex = Vertex::new(pos.to_array(), normal.to_array(), v.color);
            vertex.material = material;
            self.vertices.push(vertex);
        }
    }
}

// === Convenience emitters used by model assembly ===

pub fn sphere(
    sink: &mut dyn DrawSink,
    stack: &TransformStack,
    radius: f32,
    color: [f32; 4],
    slices: u32,
    stacks: u32,
    material: Material,
) {
    sink.submit(DrawCommand {
        shape: Shape::Sphere {
            radius,
            slices,
            stacks,
        },
        transform: stack.current(),
        color,
        material,
    });
}

pub fn cylinder(
    sink: &mut dyn DrawSink,
    stack: &TransformStack,
    base_radius: f32,
    top_radius: f32,
    height: f32,
    color: [f32; 4],
    slices: u32,
    material: Material,
) {
    sink.submit(DrawCommand {
        shape: Shape::Cylinder {
            base_radius,
            top_radius,
            height,
            slices,
        },
        transform: stack.current(),
        color,
        material,
    });
}

pub fn cone(
    sink: &mut dyn DrawSink,
    stack: &TransformStack,
    radius: f32,
    height: f32,
    color: [f32; 4],
    slices: u32,
    material: Material,
) {
    sink.submit(DrawCommand {
        shape: Shape::Cone {
            radius,
            height,
            slices,
        },
        transform: stack.current(),
        color,
        material,
    });
}

pub fn cube(
    sink: &mut dyn DrawSink,
    stack: &TransformStack,
    size: f32,
    color: [f32; 4],
    material: Material,
) {
    sink.submit(DrawCommand {
        shape: Shape::Cube { size },
        transform: stack.current(),
        color,
        material,
    });
}

pub fn octahedron(
    sink: &mut dyn DrawSink,
    stack: &TransformStack,
    size: f32,
    color: [f32; 4],
    material: Material,
) {
    sink.submit(DrawCommand {
        shape: Shape::Octahedron { size },
        transform: stack.current(),
        color,
        material,
    });
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_recorder_stores_commands() {
        let mut recorder = Recorder::new();
        let stack = TransformStack::new();

        sphere(&mut recorder, &stack, 1.0, [1.0; 4], 8, 8, Material::matte());
        cube(&mut recorder, &stack, 0.5, [0.5, 0.5, 0.5, 1.0], Material::shiny());

        assert_eq!(recorder.commands.len(), 2);
        assert!(matches!(recorder.commands[0].shape, Shape::Sphere { .. }));
        assert!(matches!(recorder.commands[1].shape, Shape::Cube { .. }));
    }

    #[test]
    fn test_batch_applies_transform() {
        let mut batch = VertexBatch::new();
        let mut stack = TransformStack::new();
        stack.translate(Vec3::new(10.0, 0.0, 0.0));

        cube(&mut batch, &stack, 2.0, [1.0; 4], Material::matte());

        for v in &batch.vertices {
            assert!(v.position[0] >= 9.0 - 1e-6 && v.position[0] <= 11.0 + 1e-6);
        }
    }

    #[test]
    fn test_batch_scaled_normals_stay_unit() {
        let mut batch = VertexBatch::new();
        let mut stack = TransformStack::new();
        stack.scale(Vec3::new(3.0, 1.0, 0.5));

        sphere(&mut batch, &stack, 1.0, [1.0; 4], 8, 8, Material::matte());

        for v in &batch.vertices {
            let len = Vec3::from_array(v.normal).length();
            assert!((len - 1.0).abs() < 1e-3, "normal not renormalized: {len}");
        }
    }

    #[test]
    fn test_tessellation_scales_vertex_count() {
        let stack = TransformStack::new();

        let mut full = VertexBatch::new();
        sphere(&mut full, &stack, 1.0, [1.0; 4], 16, 12, Material::matte());

        let mut low = VertexBatch::new();
        low.tessellation = 0.5;
        sphere(&mut low, &stack, 1.0, [1.0; 4], 16, 12, Material::matte());

        assert!(!low.vertices.is_empty());
        assert!(low.vertices.len() < full.vertices.len());
    }

    #[test]
    fn test_tessellation_never_degenerates() {
        let stack = TransformStack::new();
        let mut batch = VertexBatch::new();
        batch.tessellation = 0.01;

        sphere(&mut batch, &stack, 1.0, [1.0; 4], 16, 12, Material::matte());
        cone(&mut batch, &stack, 0.5, 1.0, [1.0; 4], 8, Material::matte());

        assert!(!batch.vertices.is_empty());
    }

    #[test]
    fn test_batch_carries_material() {
        let mut batch = VertexBatch::new();
        let stack = TransformStack::new();

        sphere(&mut batch, &stack, 1.0, [1.0; 4], 6, 6, Material::emissive());

        for v in &batch.vertices {
            assert_eq!(v.material[0], 1.0);
            assert_eq!(v.material[1], 0.0);
        }
    }
}
