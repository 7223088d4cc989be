//! Procedural character models
//!
//! Each archetype assembles its silhouette at draw time from primitive
//! solids, nested in transform scopes so sibling limbs never inherit each
//! other's local rotation. Animation is purely phase-driven: accumulated
//! scalars plus elapsed time feed sinusoidal offsets, which is what makes
//! the models breathe and sway without any skeleton.

pub mod dragon;
pub mod goblin;
pub mod knight;
pub mod mage;
pub mod ogre;

pub use dragon::DragonModel;
pub use goblin::GoblinModel;
pub use knight::KnightModel;
pub use mage::MageModel;
pub use ogre::OgreModel;

use glam::Vec3;

use crate::render::draw::{self, DrawSink, Material};
use crate::render::transform::TransformStack;

/// State every archetype shares: placement, accumulated animation time,
/// and the externally driven combat flags.
#[derive(Debug, Clone)]
pub struct CharacterBase {
    pub position: Vec3,
    pub yaw: f32,
    pub scale: f32,
    pub animation_time: f32,
    pub bob_offset: f32,
    pub health_percent: f32,
    pub attacking: bool,
    pub casting: bool,
}

impl CharacterBase {
    pub fn new(position: Vec3) -> Self {
        Self {
            position,
            yaw: 0.0,
            scale: 1.0,
            animation_time: 0.0,
            bob_offset: 0.0,
            health_percent: 1.0,
            attacking: false,
            casting: false,
        }
    }

    /// Advance idle animation: time accumulates, the body bobs gently
    pub fn update(&mut self, dt: f32) {
        self.animation_time += dt;
        self.bob_offset = 0.05 * (self.animation_time * 2.0).sin();
    }

    /// Enter the model's local frame for the duration of the closure
    pub fn scoped_world<R>(
        &self,
        stack: &mut TransformStack,
        f: impl FnOnce(&mut TransformStack) -> R,
    ) -> R {
        stack.scoped(|s| {
            s.translate(self.position + Vec3::new(0.0, self.bob_offset, 0.0));
            s.rotate_y(self.yaw);
            s.scale_uniform(self.scale);
            f(s)
        })
    }
}

/// A drawable, animatable combatant
pub trait CharacterModel {
    fn base(&self) -> &CharacterBase;
    fn base_mut(&mut self) -> &mut CharacterBase;

    /// Advance passive phases; called once per frame whether drawn or not
    fn update(&mut self, dt: f32);

    /// Emit the full silhouette for this frame. Takes `&mut self` because
    /// draw-local phase accumulators advance per emission.
    fn draw(&mut self, time: f32, stack: &mut TransformStack, sink: &mut dyn DrawSink);

    fn set_attacking(&mut self, attacking: bool) {
        self.base_mut().attacking = attacking;
    }

    fn set_casting(&mut self, casting: bool) {
        self.base_mut().casting = casting;
    }

    /// Health fraction drives the aura tint; out-of-range input is clamped
    fn set_health_percent(&mut self, percent: f32) {
        self.base_mut().health_percent = percent.clamp(0.0, 1.0);
    }
}

fn lerp3(a: [f32; 3], b: [f32; 3], t: f32) -> [f32; 3] {
    [
        a[0] + (b[0] - a[0]) * t,
        a[1] + (b[1] - a[1]) * t,
        a[2] + (b[2] - a[2]) * t,
    ]
}

/// Pulsing translucent threat aura plus orbiting malevolent motes, shared
/// by all enemy archetypes. The tint slides toward red as health drops.
pub fn draw_threat_aura(
    sink: &mut dyn DrawSink,
    stack: &mut TransformStack,
    time: f32,
    base_color: [f32; 3],
    alpha_factor: f32,
    health_percent: f32,
) {
    let hurt = 1.0 - health_percent.clamp(0.0, 1.0);
    let tint = lerp3(base_color, [1.0, 0.1, 0.1], hurt);

    let pulse = 0.3 + (time * 4.0).sin() * 0.2;
    let size = 1.5 + (time * 2.0).cos() * 0.3;

    stack.scoped(|s| {
        s.translate(Vec3::new(0.0, 2.5, 0.0));
        s.scale(Vec3::new(size, size * 0.5, size));
        draw::sphere(
            sink,
            s,
            2.0,
            [tint[0], tint[1], tint[2], pulse * alpha_factor],
            16,
            12,
            Material::emissive(),
        );
    });

    // Orbiting energy motes
    for i in 0..12 {
        let i_f = i as f32;
        let orbit_angle = (time * 50.0 + i_f * 30.0).to_radians();
        let orbit_radius = 2.0 + (time * 3.0 + i_f).sin() * 0.5;
        let height = 1.0 + (time * 2.0 + i_f * 0.5).sin() * 2.0;
        let mote_size = 0.05 + (time * 6.0 + i_f).sin() * 0.02;

        stack.scoped(|s| {
            s.translate(Vec3::new(
                orbit_angle.cos() * orbit_radius,
                height,
                orbit_angle.sin() * orbit_radius,
            ));
            draw::sphere(sink, s, mote_size, [1.0, 0.3, 0.1, 0.6], 6, 4, Material::emissive());
        });
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::consts::{ENEMY_POS, PLAYER_POS};
    use crate::render::draw::Recorder;

    fn draw_once(model: &mut dyn CharacterModel) -> (usize, usize) {
        let mut recorder = Recorder::new();
        let mut stack = TransformStack::new();
        model.update(0.016);
        model.draw(1.0, &mut stack, &mut recorder);
        (stack.depth(), recorder.commands.len())
    }

    #[test]
    fn test_all_archetypes_balance_the_stack() {
        let mut models: Vec<Box<dyn CharacterModel>> = vec![
            Box::new(MageModel::new(Vec3::from(PLAYER_POS))),
            Box::new(KnightModel::new(Vec3::from(PLAYER_POS))),
            Box::new(GoblinModel::new(Vec3::from(ENEMY_POS))),
            Box::new(OgreModel::new(Vec3::from(ENEMY_POS))),
            Box::new(DragonModel::new(Vec3::from(ENEMY_POS))),
        ];

        for model in &mut models {
            let (depth, commands) = draw_once(model.as_mut());
            assert_eq!(depth, 0, "unbalanced transform stack");
            assert!(commands > 20, "suspiciously sparse model: {commands} parts");
        }
    }

    #[test]
    fn test_attack_flag_changes_silhouette() {
        let mut knight = KnightModel::new(Vec3::from(PLAYER_POS));
        let (_, idle) = draw_once(&mut knight);

        knight.set_attacking(true);
        let (_, attacking) = draw_once(&mut knight);
        // The glowing sword edge only appears mid-swing
        assert!(attacking > idle);
    }

    #[test]
    fn test_casting_adds_orbital_crystals() {
        let mut mage = MageModel::new(Vec3::from(PLAYER_POS));
        let (_, idle) = draw_once(&mut mage);

        mage.set_casting(true);
        let (_, casting) = draw_once(&mut mage);
        assert_eq!(casting, idle + 6);
    }

    #[test]
    fn test_goblin_aura_runs_on_its_own_clock() {
        use crate::render::draw::Shape;

        let mut goblin = GoblinModel::new(Vec3::from(ENEMY_POS));
        let mut shell_alpha = || {
            let mut recorder = Recorder::new();
            let mut stack = TransformStack::new();
            goblin.draw(1.0, &mut stack, &mut recorder);
            recorder
                .commands
                .iter()
                .find(|c| matches!(c.shape, Shape::Sphere { radius, .. } if radius == 2.0))
                .map(|c| c.color[3])
        };

        // Same frame time twice: the aura shell still advances its pulse
        let first = shell_alpha();
        let second = shell_alpha();
        assert!(first.is_some());
        assert_ne!(first, second);
    }

    #[test]
    fn test_health_percent_is_clamped() {
        let mut goblin = GoblinModel::new(Vec3::from(ENEMY_POS));
        goblin.set_health_percent(1.5);
        assert_eq!(goblin.base().health_percent, 1.0);

        goblin.set_health_percent(-0.2);
        assert_eq!(goblin.base().health_percent, 0.0);
    }

    #[test]
    fn test_aura_colors_stay_in_range() {
        let mut recorder = Recorder::new();
        let mut stack = TransformStack::new();
        for health in [-1.0, 0.0, 0.4, 1.0, 2.0] {
            draw_threat_aura(&mut recorder, &mut stack, 3.2, [0.2, 0.8, 0.2], 0.3, health);
        }
        for cmd in &recorder.commands {
            for c in cmd.color {
                assert!((0.0..=1.0).contains(&c), "aura channel out of range: {c}");
            }
        }
    }

    #[test]
    fn test_update_accumulates_bob() {
        let mut base = CharacterBase::new(Vec3::ZERO);
        base.update(0.25);
        assert!((base.animation_time - 0.25).abs() < 1e-6);
        assert!((base.bob_offset - 0.05 * 0.5f32.sin()).abs() < 1e-6);
    }
}
