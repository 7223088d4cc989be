//! Arcane Arena - a turn-based 3D battle game
//!
//! Core modules:
//! - `combat`: Deterministic turn engine (damage rolls, phases, typed items)
//! - `particles`: Physics-integrated particle pool with stylized emitters
//! - `character`: Procedural character models built from primitive solids
//! - `render`: Transform stack, mesh tessellation and the WebGPU pipeline
//! - `audio`: Procedural waveform synthesis and fire-and-forget playback

pub mod audio;
pub mod character;
pub mod combat;
pub mod hud;
pub mod particles;
pub mod render;
pub mod settings;

pub use settings::{QualityPreset, Settings};

use glam::Vec3;

/// Game configuration constants
pub mod consts {
    /// Target frame rate for the update loop
    pub const TARGET_FPS: u32 = 60;
    /// Clamp on per-frame delta time (tab-away, debugger pauses)
    pub const MAX_FRAME_DT: f32 = 0.1;

    /// Default particle pool budget; quality presets override it
    pub const MAX_PARTICLES: usize = 1000;

    /// Audio sample rate for synthesis and playback
    pub const SAMPLE_RATE: u32 = 44100;

    /// Stage positions: player fights from the left, enemy from the right
    pub const PLAYER_POS: [f32; 3] = [-4.0, 0.0, 0.0];
    pub const ENEMY_POS: [f32; 3] = [4.0, 0.0, 0.0];

    /// Orbit camera limits
    pub const CAMERA_PITCH_MAX_DEG: f32 = 80.0;
    pub const CAMERA_DIST_MIN: f32 = 5.0;
    pub const CAMERA_DIST_MAX: f32 = 30.0;

    /// Floor disk radius
    pub const FLOOR_RADIUS: f32 = 15.0;
    /// Rune circle radius
    pub const RUNE_CIRCLE_RADIUS: f32 = 8.0;
}

/// Degrees to radians (model assembly uses degree conventions throughout)
#[inline]
pub fn deg(degrees: f32) -> f32 {
    degrees.to_radians()
}

/// Point on the XZ plane at `angle` radians and distance `r` from `center`
#[inline]
pub fn orbit_xz(center: Vec3, r: f32, angle: f32) -> Vec3 {
    Vec3::new(center.x + r * angle.cos(), center.y, center.z + r * angle.sin())
}

/// Clamp each RGB channel to [0, 1], leaving alpha untouched
#[inline]
pub fn clamp_rgb(mut color: [f32; 4]) -> [f32; 4] {
    for c in color.iter_mut().take(3) {
        *c = c.clamp(0.0, 1.0);
    }
    color
}
