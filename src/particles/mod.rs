//! Physics-integrated particle system
//!
//! A bounded pool of particles advanced once per frame, plus stylized
//! emitters (explosion, fire, ice, lightning, healing, blood, aura) that
//! spawn batches with per-style kinematic and color distributions. All
//! randomness comes from an injected seeded RNG so emission is replayable.

use glam::Vec3;
use rand::{Rng, SeedableRng};
use rand_pcg::Pcg32;

use crate::clamp_rgb;
use crate::consts::MAX_PARTICLES;
use crate::render::draw::{self, DrawSink, Material};
use crate::render::transform::TransformStack;

/// A single particle
#[derive(Debug, Clone)]
pub struct Particle {
    pub pos: Vec3,
    pub vel: Vec3,
    pub color: [f32; 4],
    pub life: f32,
    pub max_life: f32,
    pub size: f32,
    pub initial_size: f32,
    pub gravity: f32,
}

/// Default downward acceleration on the Y velocity
pub const DEFAULT_GRAVITY: f32 = -5.0;

impl Particle {
    pub fn new(pos: Vec3, vel: Vec3, color: [f32; 4], life: f32, size: f32) -> Self {
        Self {
            pos,
            vel,
            color,
            life,
            max_life: life,
            size,
            initial_size: size,
            gravity: DEFAULT_GRAVITY,
        }
    }

    /// Integrate one tick: move, fall, fade. Returns false once expired.
    pub fn update(&mut self, dt: f32) -> bool {
        self.pos += self.vel * dt;
        self.vel.y += self.gravity * dt;

        self.life -= dt;
        if self.life <= 0.0 {
            return false;
        }

        let life_ratio = self.life / self.max_life;
        self.color[3] = life_ratio;
        self.size = self.initial_size * (0.5 + 0.5 * life_ratio);
        true
    }
}

/// Bounded particle pool with stylized emitters
pub struct ParticleSystem {
    particles: Vec<Particle>,
    rng: Pcg32,
    cap: usize,
}

impl ParticleSystem {
    pub fn new(seed: u64) -> Self {
        Self {
            particles: Vec::with_capacity(MAX_PARTICLES),
            rng: Pcg32::seed_from_u64(seed),
            cap: MAX_PARTICLES,
        }
    }

    /// Pool budget from the quality preset (0 disables emission entirely)
    pub fn set_cap(&mut self, cap: usize) {
        self.cap = cap;
        self.particles.truncate(cap);
    }

    pub fn len(&self) -> usize {
        self.particles.len()
    }

    pub fn is_empty(&self) -> bool {
        self.particles.is_empty()
    }

    pub fn particles(&self) -> &[Particle] {
        &self.particles
    }

    /// Insert one particle; silently dropped when the pool is full.
    /// Graceful degradation under load beats queueing or erroring here.
    fn add(&mut self, particle: Particle) {
        if self.particles.len() < self.cap {
            self.particles.push(particle);
        }
    }

    fn jitter(&mut self, base: f32, spread: f32) -> f32 {
        base + self.rng.random_range(-spread..=spread)
    }

    /// Isotropic burst with upward bias
    pub fn emit_explosion(&mut self, origin: Vec3, color: (f32, f32, f32), count: usize) {
        for _ in 0..count {
            let vel = Vec3::new(
                self.rng.random_range(-8.0..=8.0),
                self.rng.random_range(2.0..=10.0),
                self.rng.random_range(-8.0..=8.0),
            );

            let particle_color = clamp_rgb([
                self.jitter(color.0, 0.2),
                self.jitter(color.1, 0.2),
                self.jitter(color.2, 0.2),
                1.0,
            ]);

            let life = self.rng.random_range(1.0..=3.0);
            let size = self.rng.random_range(0.05..=0.2);
            self.add(Particle::new(origin, vel, particle_color, life, size));
        }
    }

    /// Upward ember cone; count and spread scale with intensity
    pub fn emit_fire(&mut self, origin: Vec3, intensity: f32) {
        const EMBER_PALETTE: [[f32; 4]; 3] = [
            [1.0, 0.8, 0.2, 1.0],
            [1.0, 0.4, 0.1, 1.0],
            [0.9, 0.2, 0.0, 1.0],
        ];

        let count = (20.0 * intensity) as usize;
        for _ in 0..count {
            let vel = Vec3::new(
                self.rng.random_range(-2.0..=2.0) * intensity,
                self.rng.random_range(3.0..=8.0) * intensity,
                self.rng.random_range(-2.0..=2.0) * intensity,
            );

            let color = EMBER_PALETTE[self.rng.random_range(0..EMBER_PALETTE.len())];

            let pos = origin
                + Vec3::new(
                    self.rng.random_range(-0.5..=0.5),
                    0.0,
                    self.rng.random_range(-0.5..=0.5),
                );

            let life = self.rng.random_range(0.5..=2.0);
            let size = self.rng.random_range(0.1..=0.3);
            let mut p = Particle::new(pos, vel, color, life, size);
            p.gravity = -2.0; // Embers hang in the air
            self.add(p);
        }
    }

    /// Scattering crystal shards, falling
    pub fn emit_ice(&mut self, origin: Vec3, intensity: f32) {
        let count = (30.0 * intensity) as usize;
        for _ in 0..count {
            let vel = Vec3::new(
                self.rng.random_range(-5.0..=5.0) * intensity,
                self.rng.random_range(-2.0..=4.0) * intensity,
                self.rng.random_range(-5.0..=5.0) * intensity,
            );

            let color = clamp_rgb([
                self.jitter(0.7, 0.2),
                self.jitter(0.9, 0.1),
                1.0,
                1.0,
            ]);

            let life = self.rng.random_range(1.5..=3.0);
            let size = self.rng.random_range(0.05..=0.15);
            self.add(Particle::new(origin, vel, color, life, size));
        }
    }

    /// Sparks seeded along a jittered line between two endpoints
    pub fn emit_lightning(&mut self, start: Vec3, end: Vec3) {
        const STEPS: usize = 20;
        const SPARKS_PER_STEP: usize = 3;

        for i in 0..STEPS {
            let t = i as f32 / STEPS as f32;
            let pos = start.lerp(end, t)
                + Vec3::new(
                    self.rng.random_range(-0.5..=0.5),
                    self.rng.random_range(-0.5..=0.5),
                    self.rng.random_range(-0.5..=0.5),
                );

            for _ in 0..SPARKS_PER_STEP {
                let vel = Vec3::new(
                    self.rng.random_range(-3.0..=3.0),
                    self.rng.random_range(-3.0..=3.0),
                    self.rng.random_range(-3.0..=3.0),
                );

                let color = [1.0, 1.0, self.jitter(0.8, 0.2).clamp(0.0, 1.0), 1.0];

                let life = self.rng.random_range(0.2..=0.8);
                let size = self.rng.random_range(0.02..=0.08);
                let mut p = Particle::new(pos, vel, color, life, size);
                p.gravity = 0.0; // Sparks don't fall
                self.add(p);
            }
        }
    }

    /// Green motes spiraling gently upward
    pub fn emit_healing(&mut self, origin: Vec3, intensity: f32) {
        let count = (25.0 * intensity) as usize;
        for _ in 0..count {
            let angle = self.rng.random_range(0.0..std::f32::consts::TAU);
            let radius = self.rng.random_range(0.5..=2.0) * intensity;

            let vel = Vec3::new(
                angle.cos() * 2.0,
                self.rng.random_range(2.0..=6.0) * intensity,
                angle.sin() * 2.0,
            );

            let color = clamp_rgb([
                self.jitter(0.2, 0.1),
                1.0,
                self.jitter(0.3, 0.1),
                1.0,
            ]);

            let pos = Vec3::new(
                origin.x + angle.cos() * radius,
                origin.y + self.rng.random_range(-0.5..=0.5),
                origin.z + angle.sin() * radius,
            );

            let life = self.rng.random_range(1.0..=2.5);
            let size = self.rng.random_range(0.08..=0.15);
            let mut p = Particle::new(pos, vel, color, life, size);
            p.gravity = -1.0; // Drifts more than it falls
            self.add(p);
        }
    }

    /// Droplets sprayed along the hit direction
    pub fn emit_blood(&mut self, origin: Vec3, direction: Vec3, intensity: f32) {
        let count = (15.0 * intensity) as usize;
        for _ in 0..count {
            let vel = Vec3::new(
                direction.x * self.rng.random_range(2.0..=6.0) + self.rng.random_range(-2.0..=2.0),
                self.rng.random_range(1.0..=4.0),
                direction.z * self.rng.random_range(2.0..=6.0) + self.rng.random_range(-2.0..=2.0),
            );

            let color = clamp_rgb([
                0.8 + self.rng.random_range(-0.2..=0.1),
                0.1 + self.rng.random_range(-0.05..=0.05),
                0.1 + self.rng.random_range(-0.05..=0.05),
                1.0,
            ]);

            let life = self.rng.random_range(1.0..=2.0);
            let size = self.rng.random_range(0.03..=0.1);
            self.add(Particle::new(origin, vel, color, life, size));
        }
    }

    /// Slow orbital motes around a point, translucent from birth
    pub fn emit_magic_aura(&mut self, origin: Vec3, color: (f32, f32, f32)) {
        for _ in 0..10 {
            let angle = self.rng.random_range(0.0..std::f32::consts::TAU);
            let radius = self.rng.random_range(1.0..=2.5);

            let vel = Vec3::new(
                angle.cos() * 0.5,
                self.rng.random_range(0.5..=2.0),
                angle.sin() * 0.5,
            );

            let aura_color = clamp_rgb([
                self.jitter(color.0, 0.2),
                self.jitter(color.1, 0.2),
                self.jitter(color.2, 0.2),
                0.6,
            ]);

            let pos = Vec3::new(
                origin.x + angle.cos() * radius,
                origin.y + self.rng.random_range(-1.0..=1.0),
                origin.z + angle.sin() * radius,
            );

            let life = self.rng.random_range(2.0..=4.0);
            let size = self.rng.random_range(0.05..=0.12);
            let mut p = Particle::new(pos, vel, aura_color, life, size);
            p.gravity = 0.0; // Floats
            self.add(p);
        }
    }

    /// Advance every live particle and drop the expired ones. O(n).
    pub fn update(&mut self, dt: f32) {
        self.particles.retain_mut(|p| p.update(dt));
    }

    /// Emit one low-poly sphere per live particle
    pub fn render(&self, sink: &mut dyn DrawSink, stack: &mut TransformStack) {
        for p in &self.particles {
            stack.scoped(|s| {
                s.translate(p.pos);
                draw::sphere(sink, s, p.size, p.color, 4, 4, Material::emissive());
            });
        }
    }

    /// Drop everything (game restart)
    pub fn clear(&mut self) {
        self.particles.clear();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::render::draw::Recorder;
    use proptest::prelude::*;

    #[test]
    fn test_explosion_spawn_contract() {
        let mut system = ParticleSystem::new(7);
        system.emit_explosion(Vec3::ZERO, (1.0, 0.5, 0.0), 30);

        assert_eq!(system.len(), 30);
        for p in system.particles() {
            assert_eq!(p.color[3], 1.0);
            assert!(p.life >= 1.0 && p.life <= 3.0);
            assert!(p.size >= 0.05 && p.size <= 0.2);
            for c in &p.color[..3] {
                assert!(*c >= 0.0 && *c <= 1.0);
            }
        }
    }

    #[test]
    fn test_size_and_alpha_fade() {
        let mut p = Particle::new(Vec3::ZERO, Vec3::ZERO, [1.0; 4], 2.0, 0.2);

        assert!(p.update(0.5));
        let ratio = p.life / p.max_life;
        assert!((p.color[3] - ratio).abs() < 1e-6);
        assert!((p.size - 0.2 * (0.5 + 0.5 * ratio)).abs() < 1e-6);

        assert!(p.update(1.0));
        let ratio = p.life / p.max_life;
        assert!((p.size - 0.2 * (0.5 + 0.5 * ratio)).abs() < 1e-6);
    }

    #[test]
    fn test_particle_dies_exactly_at_expiry() {
        let mut p = Particle::new(Vec3::ZERO, Vec3::ZERO, [1.0; 4], 1.0, 0.1);
        assert!(p.update(0.999));
        assert!(!p.update(0.001));
    }

    #[test]
    fn test_gravity_integration() {
        let mut p = Particle::new(Vec3::ZERO, Vec3::new(1.0, 0.0, 0.0), [1.0; 4], 10.0, 0.1);
        p.update(1.0);

        assert!((p.pos.x - 1.0).abs() < 1e-6);
        assert!((p.vel.y - DEFAULT_GRAVITY).abs() < 1e-6);
    }

    #[test]
    fn test_pool_capacity_cap() {
        let mut system = ParticleSystem::new(1);
        system.emit_explosion(Vec3::ZERO, (1.0, 0.5, 0.0), 5000);
        assert_eq!(system.len(), MAX_PARTICLES);
    }

    #[test]
    fn test_cap_follows_quality_budget() {
        let mut system = ParticleSystem::new(17);
        system.set_cap(50);
        system.emit_explosion(Vec3::ZERO, (1.0, 0.5, 0.0), 5000);
        assert_eq!(system.len(), 50);

        system.set_cap(0);
        assert!(system.is_empty());
        system.emit_fire(Vec3::ZERO, 1.0);
        assert!(system.is_empty());
    }

    #[test]
    fn test_update_culls_expired() {
        let mut system = ParticleSystem::new(3);
        system.emit_lightning(Vec3::ZERO, Vec3::new(8.0, 0.0, 0.0));
        assert_eq!(system.len(), 60);

        // Lightning sparks live at most 0.8s
        system.update(0.9);
        assert!(system.is_empty());
    }

    #[test]
    fn test_fire_count_scales_with_intensity() {
        let mut system = ParticleSystem::new(11);
        system.emit_fire(Vec3::ZERO, 1.5);
        assert_eq!(system.len(), 30);
    }

    #[test]
    fn test_aura_starts_translucent_and_floats() {
        let mut system = ParticleSystem::new(13);
        system.emit_magic_aura(Vec3::ZERO, (0.7, 0.3, 1.0));

        assert_eq!(system.len(), 10);
        for p in system.particles() {
            assert_eq!(p.color[3], 0.6);
            assert_eq!(p.gravity, 0.0);
        }
    }

    #[test]
    fn test_seeded_emission_is_deterministic() {
        let mut a = ParticleSystem::new(42);
        let mut b = ParticleSystem::new(42);

        a.emit_explosion(Vec3::ONE, (0.2, 0.4, 0.9), 25);
        b.emit_explosion(Vec3::ONE, (0.2, 0.4, 0.9), 25);

        assert_eq!(a.len(), b.len());
        for (pa, pb) in a.particles().iter().zip(b.particles()) {
            assert_eq!(pa.pos, pb.pos);
            assert_eq!(pa.vel, pb.vel);
            assert_eq!(pa.color, pb.color);
            assert_eq!(pa.life, pb.life);
            assert_eq!(pa.size, pb.size);
        }
    }

    #[test]
    fn test_render_balances_stack() {
        let mut system = ParticleSystem::new(5);
        system.emit_healing(Vec3::ZERO, 1.0);

        let mut recorder = Recorder::new();
        let mut stack = TransformStack::new();
        system.render(&mut recorder, &mut stack);

        assert_eq!(stack.depth(), 0);
        assert_eq!(recorder.commands.len(), system.len());
    }

    #[test]
    fn test_clear_empties_pool() {
        let mut system = ParticleSystem::new(9);
        system.emit_ice(Vec3::ZERO, 1.0);
        assert!(!system.is_empty());

        system.clear();
        assert!(system.is_empty());
    }

    proptest! {
        #[test]
        fn prop_pool_never_exceeds_capacity(bursts in proptest::collection::vec(1usize..500, 1..20)) {
            let mut system = ParticleSystem::new(99);
            for count in bursts {
                system.emit_explosion(Vec3::ZERO, (1.0, 0.5, 0.0), count);
                prop_assert!(system.len() <= MAX_PARTICLES);
            }
        }

        #[test]
        fn prop_colors_always_in_range(seed in any::<u64>()) {
            let mut system = ParticleSystem::new(seed);
            system.emit_explosion(Vec3::ZERO, (1.0, 0.5, 0.0), 20);
            system.emit_fire(Vec3::ZERO, 1.0);
            system.emit_ice(Vec3::ZERO, 1.0);
            system.emit_healing(Vec3::ZERO, 1.0);
            system.emit_blood(Vec3::ZERO, Vec3::X, 1.0);
            system.emit_magic_aura(Vec3::ZERO, (0.7, 0.3, 1.0));

            for p in system.particles() {
                for c in p.color {
                    prop_assert!((0.0..=1.0).contains(&c));
                }
            }
        }
    }
}
