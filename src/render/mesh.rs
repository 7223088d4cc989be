//! Parametric mesh tessellation
//!
//! All generators emit triangle lists in local space with outward normals.
//! Subdivision counts follow the caller; model parts use coarse meshes
//! (goblin eyes at 6x6) and hero silhouettes finer ones (12x12).

use glam::Vec3;
use std::f32::consts::PI;

use super::vertex::Vertex;

fn push_tri(out: &mut Vec<Vertex>, a: Vec3, b: Vec3, c: Vec3, na: Vec3, nb: Vec3, nc: Vec3, color: [f32; 4]) {
    out.push(Vertex::new(a.to_array(), na.to_array(), color));
    out.push(Vertex::new(b.to_array(), nb.to_array(), color));
    out.push(Vertex::new(c.to_array(), nc.to_array(), color));
}

fn push_flat_tri(out: &mut Vec<Vertex>, a: Vec3, b: Vec3, c: Vec3, color: [f32; 4]) {
    let n = (b - a).cross(c - a).normalize_or_zero();
    push_tri(out, a, b, c, n, n, n, color);
}

/// Point on a unit sphere at the given stack/slice angles
fn sphere_point(theta: f32, phi: f32) -> Vec3 {
    Vec3::new(phi.sin() * theta.cos(), phi.cos(), phi.sin() * theta.sin())
}

/// UV sphere centered at the origin
pub fn sphere(radius: f32, slices: u32, stacks: u32, color: [f32; 4]) -> Vec<Vertex> {
    let slices = slices.max(3);
    let stacks = stacks.max(2);
    let mut vertices = Vec::with_capacity((slices * stacks * 6) as usize);

    for i in 0..stacks {
        let phi1 = (i as f32 / stacks as f32) * PI;
        let phi2 = ((i + 1) as f32 / stacks as f32) * PI;

        for j in 0..slices {
            let theta1 = (j as f32 / slices as f32) * 2.0 * PI;
            let theta2 = ((j + 1) as f32 / slices as f32) * 2.0 * PI;

            let p00 = sphere_point(theta1, phi1);
            let p10 = sphere_point(theta2, phi1);
            let p01 = sphere_point(theta1, phi2);
            let p11 = sphere_point(theta2, phi2);

            // Sphere normals are the unit positions themselves
            push_tri(
                &mut vertices,
                p00 * radius,
                p01 * radius,
                p11 * radius,
                p00,
                p01,
                p11,
                color,
            );
            push_tri(
                &mut vertices,
                p00 * radius,
                p11 * radius,
                p10 * radius,
                p00,
                p11,
                p10,
                color,
            );
        }
    }

    vertices
}

/// Capped cylinder (or truncated cone) along +Y from the origin.
/// `top_radius = 0` produces a cone with an apex point.
pub fn cylinder(base_radius: f32, top_radius: f32, height: f32, slices: u32, color: [f32; 4]) -> Vec<Vertex> {
    let slices = slices.max(3);
    let mut vertices = Vec::with_capacity((slices * 12) as usize);

    // Side normals tilt with the slope of the wall
    let slope = (base_radius - top_radius) / height.max(1e-6);

    for j in 0..slices {
        let theta1 = (j as f32 / slices as f32) * 2.0 * PI;
        let theta2 = ((j + 1) as f32 / slices as f32) * 2.0 * PI;

        let (c1, s1) = (theta1.cos(), theta1.sin());
        let (c2, s2) = (theta2.cos(), theta2.sin());

        let b1 = Vec3::new(base_radius * c1, 0.0, base_radius * s1);
        let b2 = Vec3::new(base_radius * c2, 0.0, base_radius * s2);
        let t1 = Vec3::new(top_radius * c1, height, top_radius * s1);
        let t2 = Vec3::new(top_radius * c2, height, top_radius * s2);

        let n1 = Vec3::new(c1, slope, s1).normalize();
        let n2 = Vec3::new(c2, slope, s2).normalize();

        push_tri(&mut vertices, b1, t1, t2, n1, n1, n2, color);
        push_tri(&mut vertices, b1, t2, b2, n1, n2, n2, color);

        // Base cap
        if base_radius > 0.0 {
            push_tri(
                &mut vertices,
                Vec3::ZERO,
                b2,
                b1,
                Vec3::NEG_Y,
                Vec3::NEG_Y,
                Vec3::NEG_Y,
                color,
            );
        }

        // Top cap (skipped for cones)
        if top_radius > 0.0 {
            push_tri(
                &mut vertices,
                Vec3::new(0.0, height, 0.0),
                t1,
                t2,
                Vec3::Y,
                Vec3::Y,
                Vec3::Y,
                color,
            );
        }
    }

    vertices
}

/// Cone along +Y from the origin (apex at `height`)
pub fn cone(radius: f32, height: f32, slices: u32, color: [f32; 4]) -> Vec<Vertex> {
    cylinder(radius, 0.0, height, slices, color)
}

/// Axis-aligned cube centered at the origin with per-face normals
pub fn cube(size: f32, color: [f32; 4]) -> Vec<Vertex> {
    let h = size / 2.0;
    let mut vertices = Vec::with_capacity(36);

    // Each face: 4 corners CCW from outside
    let faces: [([Vec3; 4], Vec3); 6] = [
        (
            [
                Vec3::new(-h, -h, h),
                Vec3::new(h, -h, h),
                Vec3::new(h, h, h),
                Vec3::new(-h, h, h),
            ],
            Vec3::Z,
        ),
        (
            [
                Vec3::new(h, -h, -h),
                Vec3::new(-h, -h, -h),
                Vec3::new(-h, h, -h),
                Vec3::new(h, h, -h),
            ],
            Vec3::NEG_Z,
        ),
        (
            [
                Vec3::new(h, -h, h),
                Vec3::new(h, -h, -h),
                Vec3::new(h, h, -h),
                Vec3::new(h, h, h),
            ],
            Vec3::X,
        ),
        (
            [
                Vec3::new(-h, -h, -h),
                Vec3::new(-h, -h, h),
                Vec3::new(-h, h, h),
                Vec3::new(-h, h, -h),
            ],
            Vec3::NEG_X,
        ),
        (
            [
                Vec3::new(-h, h, h),
                Vec3::new(h, h, h),
                Vec3::new(h, h, -h),
                Vec3::new(-h, h, -h),
            ],
            Vec3::Y,
        ),
        (
            [
                Vec3::new(-h, -h, -h),
                Vec3::new(h, -h, -h),
                Vec3::new(h, -h, h),
                Vec3::new(-h, -h, h),
            ],
            Vec3::NEG_Y,
        ),
    ];

    for (corners, n) in faces {
        push_tri(&mut vertices, corners[0], corners[1], corners[2], n, n, n, color);
        push_tri(&mut vertices, corners[0], corners[2], corners[3], n, n, n, color);
    }

    vertices
}

/// Regular octahedron centered at the origin (crystals, sparks)
pub fn octahedron(size: f32, color: [f32; 4]) -> Vec<Vertex> {
    let h = size / 2.0;
    let top = Vec3::new(0.0, h, 0.0);
    let bottom = Vec3::new(0.0, -h, 0.0);
    let ring = [
        Vec3::new(h, 0.0, 0.0),
        Vec3::new(0.0, 0.0, h),
        Vec3::new(-h, 0.0, 0.0),
        Vec3::new(0.0, 0.0, -h),
    ];

    let mut vertices = Vec::with_capacity(24);
    for i in 0..4 {
        let a = ring[i];
        let b = ring[(i + 1) % 4];
        push_flat_tri(&mut vertices, top, b, a, color);
        push_flat_tri(&mut vertices, bottom, a, b, color);
    }

    vertices
}

#[cfg(test)]
mod tests {
    use super::*;

    const WHITE: [f32; 4] = [1.0, 1.0, 1.0, 1.0];

    #[test]
    fn test_sphere_vertex_count() {
        let verts = sphere(1.0, 8, 6, WHITE);
        assert_eq!(verts.len(), 8 * 6 * 6);
    }

    #[test]
    fn test_sphere_on_surface() {
        let radius = 2.5;
        for v in sphere(radius, 12, 12, WHITE) {
            let d = Vec3::from_array(v.position).length();
            assert!((d - radius).abs() < 1e-4, "vertex off surface: {d}");
        }
    }

    #[test]
    fn test_sphere_normals_unit_outward() {
        for v in sphere(3.0, 8, 8, WHITE) {
            let n = Vec3::from_array(v.normal);
            assert!((n.length() - 1.0).abs() < 1e-4);
            // Normal must point away from center
            assert!(n.dot(Vec3::from_array(v.position)) > 0.0);
        }
    }

    #[test]
    fn test_cylinder_height_bounds() {
        for v in cylinder(1.0, 1.0, 4.0, 8, WHITE) {
            assert!(v.position[1] >= -1e-6 && v.position[1] <= 4.0 + 1e-6);
        }
    }

    #[test]
    fn test_cone_has_no_top_cap() {
        // Cone: side + base cap only, 6 vertices per slice
        let verts = cone(1.0, 2.0, 10, WHITE);
        assert_eq!(verts.len(), 10 * 9);
    }

    #[test]
    fn test_cube_vertex_count_and_bounds() {
        let verts = cube(2.0, WHITE);
        assert_eq!(verts.len(), 36);
        for v in &verts {
            for c in v.position {
                assert!(c.abs() <= 1.0 + 1e-6);
            }
        }
    }

    #[test]
    fn test_octahedron_faces() {
        assert_eq!(octahedron(1.0, WHITE).len(), 24);
    }
}
