//! The dragon: serpentine final boss, hovering on beating wings

use glam::Vec3;

use super::{draw_threat_aura, CharacterBase, CharacterModel};
use crate::render::draw::{self, DrawSink, Material};
use crate::render::transform::TransformStack;

const SCALES: [f32; 4] = [0.4, 0.1, 0.2, 1.0];
const SCALES_BRIGHT: [f32; 4] = [0.6, 0.15, 0.3, 1.0];
const HEAD: [f32; 4] = [0.5, 0.12, 0.25, 1.0];
const MEMBRANE: [f32; 4] = [0.2, 0.05, 0.1, 1.0];
const HORN: [f32; 4] = [0.8, 0.8, 0.7, 1.0];
const AURA_CRIMSON: [f32; 3] = [0.8, 0.2, 0.4];

pub struct DragonModel {
    base: CharacterBase,
}

impl DragonModel {
    pub fn new(position: Vec3) -> Self {
        let mut base = CharacterBase::new(position);
        base.scale = 1.5;
        Self { base }
    }

    fn body(&self, time: f32, stack: &mut TransformStack, sink: &mut dyn DrawSink) {
        stack.scoped(|s| {
            s.translate(Vec3::new(0.0, 3.0, 0.0));
            s.rotate_z((time * 2.0).sin() * 3.0);
            draw::cylinder(sink, s, 1.2, 1.2, 5.0, SCALES, 16, Material::shiny());

            // Ridged scale plates wrapping the trunk
            for i in 0..20 {
                s.scoped(|s| {
                    s.rotate_y(i as f32 * 18.0);
                    s.translate(Vec3::new(0.0, -2.0 + (i % 4) as f32, 1.1));
                    s.scale(Vec3::new(0.3, 0.1, 0.2));
                    draw::sphere(sink, s, 0.2, SCALES_BRIGHT, 6, 4, Material::shiny());
                });
            }
        });
    }

    fn head(&self, time: f32, stack: &mut TransformStack, sink: &mut dyn DrawSink) {
        stack.scoped(|s| {
            s.translate(Vec3::new(0.0, 6.5, 0.0));

            s.scoped(|s| {
                s.scale(Vec3::new(1.0, 1.5, 2.0));
                draw::sphere(sink, s, 0.8, HEAD, 16, 12, Material::shiny());
            });

            // Burning eyes
            let intensity = 0.8 + 0.2 * (time * 6.0).sin();
            for x in [-0.25, 0.25] {
                s.scoped(|s| {
                    s.translate(Vec3::new(x, 0.2, 1.3));
                    draw::sphere(
                        sink,
                        s,
                        0.15,
                        [intensity, 0.5 * intensity, 0.0, 1.0],
                        8,
                        6,
                        Material::emissive(),
                    );
                });
            }

            // Snout
            s.scoped(|s| {
                s.translate(Vec3::new(0.0, -0.3, 1.4));
                s.scale(Vec3::new(0.6, 0.4, 1.2));
                draw::sphere(sink, s, 0.5, [0.4, 0.08, 0.2, 1.0], 10, 8, Material::shiny());
            });

            // Curved horns
            let curve = (time * 1.5).sin() * 2.0;
            for side in [-1.0f32, 1.0] {
                s.scoped(|s| {
                    s.translate(Vec3::new(side * 0.4, 0.8, 0.5));
                    s.rotate_z(side * -(30.0 + side * curve));
                    draw::cone(sink, s, 0.12, 1.5, HORN, 8, Material::matte());
                });
            }

            // Rows of fangs
            for i in 0..8 {
                s.scoped(|s| {
                    s.translate(Vec3::new(-0.3 + i as f32 * 0.1, -0.6, 1.8));
                    s.rotate_x(180.0);
                    draw::cone(sink, s, 0.03, 0.25, [1.0, 1.0, 0.9, 1.0], 6, Material::matte());
                });
            }
        });
    }

    fn wings(&self, time: f32, stack: &mut TransformStack, sink: &mut dyn DrawSink) {
        let flap = (time * 3.0).sin() * 15.0;
        let spread = 20.0 + 5.0 * (time * 2.0).cos();

        for side in [-1.0f32, 1.0] {
            stack.scoped(|s| {
                s.translate(Vec3::new(side * 1.5, 4.5, -0.5));
                s.rotate_z(side * -(spread + flap));

                // Wing bone
                draw::cylinder(sink, s, 0.08, 0.08, 2.5, [0.3, 0.2, 0.15, 1.0], 8, Material::matte());

                // Membrane sails
                for k in 0..3 {
                    s.scoped(|s| {
                        s.rotate_y(k as f32 * 25.0 - 25.0);
                        s.translate(Vec3::new(0.0, -1.2, 0.0));
                        s.scale(Vec3::new(0.1, 2.0, 1.5));
                        draw::sphere(sink, s, 1.0, MEMBRANE, 8, 6, Material::matte());
                    });
                }
            });
        }
    }

    fn tail(&self, time: f32, stack: &mut TransformStack, sink: &mut dyn DrawSink) {
        for i in 0..8 {
            let i_f = i as f32;
            let sway = (time * 2.0 + i_f * 0.5).sin() * (0.3 + i_f * 0.1);

            stack.scoped(|s| {
                s.translate(Vec3::new(sway, 0.5 - i_f * 0.8, -1.5 - i_f * 0.3));
                s.rotate_y(sway * 20.0);
                s.scale_uniform(1.0 - i_f * 0.1);

                let shade = [0.4 - i_f * 0.02, 0.1, 0.2 - i_f * 0.01, 1.0];
                draw::cylinder(sink, s, 0.3, 0.3, 0.8, shade, 10, Material::shiny());

                if i < 5 {
                    s.scoped(|s| {
                        s.translate(Vec3::new(0.0, 0.4, 0.0));
                        draw::cone(sink, s, 0.05, 0.3, [0.6, 0.5, 0.4, 1.0], 6, Material::matte());
                    });
                }
            });
        }

        // Barbed tip
        stack.scoped(|s| {
            s.translate(Vec3::new(0.0, -5.5, -4.0));
            draw::cone(sink, s, 0.15, 0.8, HORN, 8, Material::matte());
        });
    }

    fn legs(&self, stack: &mut TransformStack, sink: &mut dyn DrawSink) {
        for side in [-1.0f32, 1.0] {
            stack.scoped(|s| {
                s.translate(Vec3::new(side, 1.0, 0.0));

                draw::cylinder(sink, s, 0.4, 0.4, 2.0, SCALES, 10, Material::shiny());

                s.translate(Vec3::new(0.0, -1.8, 0.0));
                s.rotate_x(-30.0);
                draw::cylinder(sink, s, 0.3, 0.3, 1.5, SCALES, 10, Material::shiny());

                // Taloned foot
                s.translate(Vec3::new(0.0, -1.2, 0.4));
                draw::sphere(sink, s, 0.4, [0.35, 0.08, 0.18, 1.0], 8, 6, Material::shiny());
                for talon in 0..4 {
                    s.scoped(|s| {
                        s.rotate_y(talon as f32 * 30.0 - 45.0);
                        s.translate(Vec3::new(0.0, 0.0, 0.35));
                        draw::cone(sink, s, 0.04, 0.4, [0.9, 0.9, 0.8, 1.0], 6, Material::matte());
                    });
                }
            });
        }
    }
}

impl CharacterModel for DragonModel {
    fn base(&self) -> &CharacterBase {
        &self.base
    }

    fn base_mut(&mut self) -> &mut CharacterBase {
        &mut self.base
    }

    /// The dragon hovers rather than stands: the idle bob is replaced
    /// with a slow vertical drift.
    fn update(&mut self, dt: f32) {
        self.base.animation_time += dt;
        self.base.bob_offset = 2.0 + (self.base.animation_time * 2.0).sin();
    }

    fn draw(&mut self, time: f32, stack: &mut TransformStack, sink: &mut dyn DrawSink) {
        let model = &*self;
        model.base.scoped_world(stack, |s| {
            model.body(time, s, sink);
            model.head(time, s, sink);
            model.wings(time, s, sink);
            model.tail(time, s, sink);
            model.legs(s, sink);
            draw_threat_aura(sink, s, time, AURA_CRIMSON, 0.5, model.base.health_percent);
        });
    }
}
