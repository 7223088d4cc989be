//! The goblin: small, green, twitchy, armed with twin daggers

use glam::Vec3;

use super::{draw_threat_aura, CharacterBase, CharacterModel};
use crate::render::draw::{self, DrawSink, Material};
use crate::render::transform::TransformStack;

const HIDE: [f32; 4] = [0.2, 0.8, 0.2, 1.0];
const HIDE_DARK: [f32; 4] = [0.13, 0.55, 0.13, 1.0];
const HIDE_DIM: [f32; 4] = [0.15, 0.6, 0.15, 1.0];
const LEATHER: [f32; 4] = [0.4, 0.26, 0.13, 1.0];
const BONE: [f32; 4] = [1.0, 1.0, 0.9, 1.0];
const AURA_GREEN: [f32; 3] = [0.2, 0.8, 0.2];

pub struct GoblinModel {
    base: CharacterBase,
    anchor: Vec3,
    menace: f32,
    aura_phase: f32,
}

impl GoblinModel {
    pub fn new(position: Vec3) -> Self {
        let mut base = CharacterBase::new(position);
        base.scale = 0.8;
        Self {
            base,
            anchor: position,
            menace: 0.0,
            aura_phase: 0.0,
        }
    }

    fn body(&self, stack: &mut TransformStack, sink: &mut dyn DrawSink) {
        stack.scoped(|s| {
            s.translate(Vec3::new(0.0, 1.4, 0.0));
            draw::cylinder(sink, s, 0.7, 0.7, 2.4, HIDE_DARK, 12, Material::matte());
        });

        // Scavenged leather cuirass
        stack.scoped(|s| {
            s.translate(Vec3::new(0.0, 1.6, 0.0));
            draw::cylinder(sink, s, 0.75, 0.75, 1.8, LEATHER, 12, Material::matte());
        });
    }

    fn head(&self, time: f32, stack: &mut TransformStack, sink: &mut dyn DrawSink) {
        stack.scoped(|s| {
            s.translate(Vec3::new(0.0, 3.2, 0.0));
            draw::sphere(sink, s, 0.6, HIDE, 16, 12, Material::shiny());

            // Baleful red eyes
            let glow = 0.8 + 0.2 * (time * 5.0).sin();
            for x in [-0.18, 0.18] {
                s.scoped(|s| {
                    s.translate(Vec3::new(x, 0.1, 0.5));
                    draw::sphere(sink, s, 0.1, [glow, 0.1, 0.1, 1.0], 6, 4, Material::emissive());
                });
            }

            // Hooked nose
            s.scoped(|s| {
                s.translate(Vec3::new(0.0, 0.0, 0.55));
                s.rotate_x(90.0);
                draw::cone(sink, s, 0.08, 0.3, HIDE_DIM, 8, Material::matte());
            });

            // Jagged teeth
            for i in 0..6 {
                s.scoped(|s| {
                    s.translate(Vec3::new(-0.2 + i as f32 * 0.08, -0.2, 0.5));
                    s.rotate_x(180.0);
                    draw::cone(sink, s, 0.02, 0.15, BONE, 6, Material::matte());
                });
            }
        });

        // Long twitching ears
        let sway = (self.menace * 2.0).sin() * 5.0;
        for side in [-1.0f32, 1.0] {
            stack.scoped(|s| {
                s.translate(Vec3::new(side * 0.6, 3.5, 0.0));
                s.rotate_z(side * -(60.0 + side * sway));
                draw::cone(sink, s, 0.2, 0.8, HIDE, 8, Material::matte());
            });
        }
    }

    fn arms(&self, time: f32, stack: &mut TransformStack, sink: &mut dyn DrawSink) {
        let swing = (time * 3.0).sin() * 10.0;

        for side in [-1.0f32, 1.0] {
            stack.scoped(|s| {
                s.translate(Vec3::new(side, 2.2, 0.0));
                s.rotate_z(side * (30.0 + swing));

                draw::cylinder(sink, s, 0.15, 0.15, 1.4, HIDE_DARK, 8, Material::matte());

                s.translate(Vec3::new(0.0, -1.0, 0.0));
                s.rotate_z(side * 20.0);
                draw::cylinder(sink, s, 0.12, 0.12, 1.2, HIDE_DARK, 8, Material::matte());

                // Clawed hand
                s.translate(Vec3::new(0.0, -0.8, 0.0));
                draw::sphere(sink, s, 0.18, HIDE_DIM, 8, 6, Material::matte());
                for claw in 0..4 {
                    s.scoped(|s| {
                        s.rotate_y(claw as f32 * 20.0 - 30.0);
                        s.translate(Vec3::new(0.0, 0.0, 0.15));
                        draw::cone(sink, s, 0.02, 0.2, [0.8, 0.8, 0.8, 1.0], 6, Material::matte());
                    });
                }
            });
        }
    }

    fn daggers(&self, time: f32, stack: &mut TransformStack, sink: &mut dyn DrawSink) {
        let gleam = 0.8 + 0.2 * (time * 4.0).sin();
        let blade = [0.7 * gleam, 0.7 * gleam, 0.8 * gleam, 1.0];

        for side in [-1.0f32, 1.0] {
            stack.scoped(|s| {
                s.translate(Vec3::new(side * 1.4, 1.8, 0.0));
                s.rotate_z(side * -30.0);

                draw::cylinder(sink, s, 0.05, 0.05, 0.4, LEATHER, 8, Material::matte());

                s.translate(Vec3::new(0.0, 0.5, 0.0));
                draw::cone(sink, s, 0.08, 0.8, blade, 8, Material::shiny());
            });
        }
    }

    fn legs(&self, stack: &mut TransformStack, sink: &mut dyn DrawSink) {
        for side in [-1.0f32, 1.0] {
            stack.scoped(|s| {
                s.translate(Vec3::new(side * 0.4, 0.2, 0.0));
                s.rotate_z(side * 10.0);

                draw::cylinder(sink, s, 0.2, 0.2, 1.2, HIDE_DARK, 8, Material::matte());

                s.translate(Vec3::new(0.0, -1.0, 0.0));
                s.rotate_x(-20.0);
                draw::cylinder(sink, s, 0.18, 0.18, 1.0, HIDE_DARK, 8, Material::matte());

                // Oversized foot
                s.translate(Vec3::new(0.0, -0.8, 0.3));
                draw::sphere(sink, s, 0.25, HIDE_DIM, 8, 6, Material::matte());
                for toe in 0..3 {
                    s.scoped(|s| {
                        s.translate(Vec3::new(-0.1 + toe as f32 * 0.1, 0.0, 0.2));
                        draw::cone(sink, s, 0.03, 0.15, [0.8, 0.8, 0.8, 1.0], 6, Material::matte());
                    });
                }
            });
        }
    }
}

impl CharacterModel for GoblinModel {
    fn base(&self) -> &CharacterBase {
        &self.base
    }

    fn base_mut(&mut self) -> &mut CharacterBase {
        &mut self.base
    }

    /// Nervous dodge weave around the anchor point
    fn update(&mut self, dt: f32) {
        self.base.update(dt);
        let t = self.base.animation_time;
        self.base.position = self.anchor + Vec3::new((t * 4.0).sin() * 0.3, 0.0, (t * 3.0).sin() * 0.6);
    }

    fn draw(&mut self, time: f32, stack: &mut TransformStack, sink: &mut dyn DrawSink) {
        self.menace += 0.03;
        self.aura_phase += 1.2 * 0.016;

        let model = &*self;
        model.base.scoped_world(stack, |s| {
            model.body(s, sink);
            model.head(time, s, sink);
            model.arms(time, s, sink);
            model.daggers(time, s, sink);
            model.legs(s, sink);
            // The aura pulses on its own faster clock, twitchy like its owner
            draw_threat_aura(sink, s, model.aura_phase, AURA_GREEN, 0.3, model.base.health_percent);
        });
    }
}
