//! The ogre: a wall of muscle hauling a spiked club

use glam::Vec3;

use super::{draw_threat_aura, CharacterBase, CharacterModel};
use crate::render::draw::{self, DrawSink, Material};
use crate::render::transform::TransformStack;

const MUSCLE: [f32; 4] = [0.6, 0.3, 0.1, 1.0];
const HIDE: [f32; 4] = [0.5, 0.25, 0.08, 1.0];
const WOOD: [f32; 4] = [0.4, 0.2, 0.1, 1.0];
const AURA_ORANGE: [f32; 3] = [0.8, 0.4, 0.2];

pub struct OgreModel {
    base: CharacterBase,
}

impl OgreModel {
    pub fn new(position: Vec3) -> Self {
        let mut base = CharacterBase::new(position);
        base.scale = 1.2;
        Self { base }
    }

    fn body(&self, stack: &mut TransformStack, sink: &mut dyn DrawSink) {
        stack.scoped(|s| {
            s.translate(Vec3::new(0.0, 2.5, 0.0));
            draw::cylinder(sink, s, 1.5, 1.5, 4.0, MUSCLE, 16, Material::matte());

            // Sagging belly
            s.scoped(|s| {
                s.translate(Vec3::new(0.0, -1.0, 0.8));
                s.scale(Vec3::new(1.2, 0.8, 1.0));
                draw::sphere(sink, s, 1.0, HIDE, 12, 10, Material::matte());
            });
        });
    }

    fn head(&self, time: f32, stack: &mut TransformStack, sink: &mut dyn DrawSink) {
        stack.scoped(|s| {
            s.translate(Vec3::new(0.0, 5.8, 0.0));
            draw::sphere(sink, s, 1.0, HIDE, 16, 12, Material::matte());

            // Cruel flickering eyes
            let flicker = 0.6 + 0.1 * (time * 2.0).sin();
            for x in [-0.3, 0.3] {
                s.scoped(|s| {
                    s.translate(Vec3::new(x, 0.2, 0.8));
                    draw::sphere(sink, s, 0.12, [flicker, 0.2, 0.0, 1.0], 6, 4, Material::emissive());
                });
            }

            // Gaping mouth with tusks
            s.scoped(|s| {
                s.translate(Vec3::new(0.0, -0.3, 0.7));
                draw::sphere(sink, s, 0.4, [0.2, 0.1, 0.05, 1.0], 8, 6, Material::matte());

                for x in [-0.2, 0.2] {
                    s.scoped(|s| {
                        s.translate(Vec3::new(x, 0.1, 0.3));
                        s.rotate_x(180.0);
                        draw::cone(sink, s, 0.08, 0.6, [1.0, 1.0, 0.8, 1.0], 8, Material::matte());
                    });
                }
            });
        });
    }

    fn arms(&self, time: f32, stack: &mut TransformStack, sink: &mut dyn DrawSink) {
        let flex = 1.0 + 0.1 * (time * 1.5).sin();

        for side in [-1.0f32, 1.0] {
            stack.scoped(|s| {
                s.translate(Vec3::new(side * 2.0, 4.0, 0.0));
                s.rotate_z(side * -20.0);
                if side > 0.0 {
                    // Club arm cocked back
                    s.rotate_x(45.0);
                }

                draw::sphere(sink, s, 0.6, MUSCLE, 10, 8, Material::matte());

                s.translate(Vec3::new(0.0, -1.2, 0.0));
                s.scoped(|s| {
                    s.scale(Vec3::new(flex, 1.0, flex));
                    draw::cylinder(sink, s, 0.4, 0.4, 2.0, MUSCLE, 10, Material::matte());
                });

                s.translate(Vec3::new(0.0, -1.8, 0.0));
                s.rotate_x(side * 15.0);
                s.scoped(|s| {
                    s.scale(Vec3::new(1.0 / flex, 1.0, 1.0 / flex));
                    draw::cylinder(sink, s, 0.35, 0.35, 1.8, MUSCLE, 10, Material::matte());
                });

                // Massive fist
                s.translate(Vec3::new(0.0, -1.5, 0.0));
                draw::sphere(sink, s, 0.5, HIDE, 10, 8, Material::matte());
                if side < 0.0 {
                    for k in 0..4 {
                        s.scoped(|s| {
                            s.rotate_y(k as f32 * 20.0 - 30.0);
                            s.translate(Vec3::new(0.0, 0.0, 0.4));
                            draw::sphere(sink, s, 0.1, MUSCLE, 6, 4, Material::matte());
                        });
                    }
                }
            });
        }
    }

    fn club(&self, time: f32, stack: &mut TransformStack, sink: &mut dyn DrawSink) {
        stack.scoped(|s| {
            s.translate(Vec3::new(2.5, 2.5, 0.0));
            s.rotate_x(45.0 + (time * 0.8).sin() * 15.0);
            s.rotate_z(-30.0);

            draw::cylinder(sink, s, 0.15, 0.15, 3.0, WOOD, 10, Material::matte());

            s.translate(Vec3::new(0.0, 3.2, 0.0));
            draw::sphere(sink, s, 0.8, [0.3, 0.15, 0.08, 1.0], 12, 10, Material::matte());

            for spike in 0..8 {
                s.scoped(|s| {
                    s.rotate_y(spike as f32 * 45.0);
                    s.translate(Vec3::new(0.0, 0.0, 0.7));
                    s.rotate_x(90.0);
                    draw::cone(sink, s, 0.05, 0.3, [0.6, 0.6, 0.6, 1.0], 6, Material::shiny());
                });
            }
        });
    }

    fn legs(&self, stack: &mut TransformStack, sink: &mut dyn DrawSink) {
        for side in [-1.0f32, 1.0] {
            stack.scoped(|s| {
                s.translate(Vec3::new(side * 0.8, 0.5, 0.0));

                draw::cylinder(sink, s, 0.6, 0.6, 2.5, MUSCLE, 10, Material::matte());

                s.translate(Vec3::new(0.0, -2.2, 0.0));
                draw::sphere(sink, s, 0.7, MUSCLE, 10, 8, Material::matte());

                s.translate(Vec3::new(0.0, -0.8, 0.0));
                draw::cylinder(sink, s, 0.5, 0.5, 2.0, MUSCLE, 10, Material::matte());

                // Flat splayed foot
                s.translate(Vec3::new(0.0, -1.8, 0.5));
                s.scale(Vec3::new(1.5, 0.6, 2.0));
                draw::sphere(sink, s, 0.4, HIDE, 8, 6, Material::matte());
            });
        }
    }
}

impl CharacterModel for OgreModel {
    fn base(&self) -> &CharacterBase {
        &self.base
    }

    fn base_mut(&mut self) -> &mut CharacterBase {
        &mut self.base
    }

    /// Heavy, slow facing adjustments instead of the shared bob
    fn update(&mut self, dt: f32) {
        self.base.update(dt);
        self.base.yaw = (self.base.animation_time * 0.5).sin() * 8.0;
    }

    fn draw(&mut self, time: f32, stack: &mut TransformStack, sink: &mut dyn DrawSink) {
        let model = &*self;
        model.base.scoped_world(stack, |s| {
            model.body(s, sink);
            model.head(time, s, sink);
            model.arms(time, s, sink);
            model.club(time, s, sink);
            model.legs(s, sink);
            draw_threat_aura(sink, s, time, AURA_ORANGE, 0.4, model.base.health_percent);
        });
    }
}
