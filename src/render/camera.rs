//! Orbit camera and scene uniforms
//!
//! The camera orbits the arena origin on spherical coordinates. Lighting is
//! a fixed two-light rig: a warm key light from above and a dramatic red
//! fill from the enemy side.

use bytemuck::{Pod, Zeroable};
use glam::{Mat4, Vec3};

use crate::consts::{CAMERA_DIST_MAX, CAMERA_DIST_MIN, CAMERA_PITCH_MAX_DEG};

/// Spherical orbit camera around a fixed look-at target
#[derive(Debug, Clone, Copy)]
pub struct Camera {
    /// Pitch in degrees, clamped to ±80 so the view never flips
    pub angle_x: f32,
    /// Yaw in degrees
    pub angle_y: f32,
    /// Orbit distance, clamped to [5, 30]
    pub distance: f32,
    pub target: Vec3,
}

impl Default for Camera {
    fn default() -> Self {
        Self {
            angle_x: 25.0,
            angle_y: 45.0,
            distance: 18.0,
            target: Vec3::ZERO,
        }
    }
}

impl Camera {
    pub fn new(angle_x: f32, angle_y: f32, distance: f32) -> Self {
        let mut cam = Self {
            target: Vec3::ZERO,
            ..Self::default()
        };
        cam.set_orbit(angle_x, angle_y, distance);
        cam
    }

    /// Set orbit parameters, applying the pitch and distance clamps
    pub fn set_orbit(&mut self, angle_x: f32, angle_y: f32, distance: f32) {
        self.angle_x = angle_x.clamp(-CAMERA_PITCH_MAX_DEG, CAMERA_PITCH_MAX_DEG);
        self.angle_y = angle_y;
        self.distance = distance.clamp(CAMERA_DIST_MIN, CAMERA_DIST_MAX);
    }

    pub fn orbit_by(&mut self, d_pitch: f32, d_yaw: f32) {
        self.set_orbit(self.angle_x + d_pitch, self.angle_y + d_yaw, self.distance);
    }

    pub fn zoom_by(&mut self, d_dist: f32) {
        self.set_orbit(self.angle_x, self.angle_y, self.distance + d_dist);
    }

    /// Eye position from the spherical orbit parameters
    pub fn eye(&self) -> Vec3 {
        let pitch = self.angle_x.to_radians();
        let yaw = self.angle_y.to_radians();
        self.target
            + Vec3::new(
                self.distance * pitch.cos() * yaw.sin(),
                self.distance * pitch.sin(),
                self.distance * pitch.cos() * yaw.cos(),
            )
    }

    pub fn view(&self) -> Mat4 {
        Mat4::look_at_rh(self.eye(), self.target, Vec3::Y)
    }

    pub fn projection(&self, aspect: f32) -> Mat4 {
        Mat4::perspective_rh(45f32.to_radians(), aspect.max(0.01), 0.1, 100.0)
    }

    pub fn view_proj(&self, aspect: f32) -> Mat4 {
        self.projection(aspect) * self.view()
    }
}

/// Warm key light direction (towards the scene)
pub const KEY_LIGHT_DIR: Vec3 = Vec3::new(-0.4, -0.8, -0.45);
pub const KEY_LIGHT_COLOR: [f32; 3] = [1.0, 0.95, 0.8];

/// Dramatic red fill from the enemy side
pub const FILL_LIGHT_DIR: Vec3 = Vec3::new(0.7, -0.2, 0.5);
pub const FILL_LIGHT_COLOR: [f32; 3] = [0.7, 0.15, 0.1];

/// Scene uniforms (matches shader.wgsl `Uniforms`)
#[repr(C)]
#[derive(Copy, Clone, Debug, Pod, Zeroable)]
pub struct Uniforms {
    pub view_proj: [[f32; 4]; 4],
    pub eye: [f32; 3],
    pub time: f32,
    pub key_light_dir: [f32; 3],
    pub _pad0: f32,
    pub key_light_color: [f32; 3],
    pub _pad1: f32,
    pub fill_light_dir: [f32; 3],
    pub _pad2: f32,
    pub fill_light_color: [f32; 3],
    pub _pad3: f32,
}

impl Uniforms {
    pub fn new(camera: &Camera, aspect: f32, time: f32) -> Self {
        Self {
            view_proj: camera.view_proj(aspect).to_cols_array_2d(),
            eye: camera.eye().to_array(),
            time,
            key_light_dir: KEY_LIGHT_DIR.normalize().to_array(),
            _pad0: 0.0,
            key_light_color: KEY_LIGHT_COLOR,
            _pad1: 0.0,
            fill_light_dir: FILL_LIGHT_DIR.normalize().to_array(),
            _pad2: 0.0,
            fill_light_color: FILL_LIGHT_COLOR,
            _pad3: 0.0,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_pitch_clamped() {
        let cam = Camera::new(120.0, 0.0, 18.0);
        assert_eq!(cam.angle_x, 80.0);

        let cam = Camera::new(-95.0, 0.0, 18.0);
        assert_eq!(cam.angle_x, -80.0);
    }

    #[test]
    fn test_distance_clamped() {
        let cam = Camera::new(25.0, 45.0, 100.0);
        assert_eq!(cam.distance, 30.0);

        let cam = Camera::new(25.0, 45.0, 0.5);
        assert_eq!(cam.distance, 5.0);
    }

    #[test]
    fn test_eye_distance_from_target() {
        let cam = Camera::new(25.0, 45.0, 18.0);
        let d = (cam.eye() - cam.target).length();
        assert!((d - 18.0).abs() < 1e-4);
    }

    #[test]
    fn test_zero_pitch_stays_level() {
        let cam = Camera::new(0.0, 90.0, 10.0);
        assert!(cam.eye().y.abs() < 1e-4);
    }
}
