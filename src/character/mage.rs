//! The mage: robed silhouette with a glowing staff and drifting cape

use glam::Vec3;

use super::{CharacterBase, CharacterModel};
use crate::render::draw::{self, DrawSink, Material};
use crate::render::transform::TransformStack;

const ROBE: [f32; 4] = [0.2, 0.3, 0.8, 1.0];
const GOLD: [f32; 4] = [0.8, 0.6, 0.1, 1.0];
const SKIN: [f32; 4] = [0.9, 0.8, 0.7, 1.0];
const HAT: [f32; 4] = [0.15, 0.15, 0.7, 1.0];
const BEARD: [f32; 4] = [0.85, 0.85, 0.85, 1.0];
const BOOT: [f32; 4] = [0.4, 0.2, 0.1, 1.0];
const WOOD: [f32; 4] = [0.6, 0.4, 0.2, 1.0];

pub struct MageModel {
    base: CharacterBase,
    orb_pulse: f32,
    cape_sway: f32,
}

impl MageModel {
    pub fn new(position: Vec3) -> Self {
        Self {
            base: CharacterBase::new(position),
            orb_pulse: 0.0,
            cape_sway: 0.0,
        }
    }

    fn body(&self, stack: &mut TransformStack, sink: &mut dyn DrawSink) {
        // Main robe
        stack.scoped(|s| {
            s.translate(Vec3::new(0.0, 1.0, 0.0));
            draw::cylinder(sink, s, 0.8, 0.8, 2.0, ROBE, 12, Material::matte());
        });

        // Belt
        stack.scoped(|s| {
            s.translate(Vec3::new(0.0, 0.5, 0.0));
            draw::cylinder(sink, s, 0.85, 0.85, 0.15, GOLD, 12, Material::shiny());
        });

        // Arcane sigils around the robe
        for i in 0..4 {
            let angle = (i as f32 * 90.0).to_radians();
            stack.scoped(|s| {
                s.translate(Vec3::new(0.7 * angle.cos(), 1.2, 0.7 * angle.sin()));
                draw::sphere(sink, s, 0.06, GOLD, 8, 6, Material::shiny());
            });
        }
    }

    fn head(&self, stack: &mut TransformStack, sink: &mut dyn DrawSink) {
        stack.scoped(|s| {
            s.translate(Vec3::new(0.0, 2.2, 0.0));
            draw::sphere(sink, s, 0.4, SKIN, 12, 10, Material::matte());
        });

        // Glowing eyes
        let glow = 0.8 + 0.2 * (self.base.animation_time * 3.0).sin();
        let eye = [0.3 * glow, 0.6 * glow, glow, 1.0];
        for x in [-0.15, 0.15] {
            stack.scoped(|s| {
                s.translate(Vec3::new(x, 2.3, 0.35));
                draw::sphere(sink, s, 0.05, eye, 6, 4, Material::emissive());
            });
        }

        // Beard
        stack.scoped(|s| {
            s.translate(Vec3::new(0.0, 1.8, 0.3));
            draw::sphere(sink, s, 0.3, BEARD, 8, 6, Material::matte());
        });
    }

    fn hat(&self, stack: &mut TransformStack, sink: &mut dyn DrawSink) {
        // Brim
        stack.scoped(|s| {
            s.translate(Vec3::new(0.0, 2.8, 0.0));
            draw::cylinder(sink, s, 0.6, 0.6, 0.2, HAT, 12, Material::matte());
        });

        // Tapered crown
        stack.scoped(|s| {
            s.translate(Vec3::new(0.0, 3.0, 0.0));
            draw::cylinder(sink, s, 0.6, 0.1, 1.5, HAT, 12, Material::matte());
        });

        // Star at the tip
        let star_glow = 0.8 + 0.2 * (self.base.animation_time * 4.0).sin();
        stack.scoped(|s| {
            s.translate(Vec3::new(0.0, 4.5, 0.0));
            draw::octahedron(
                sink,
                s,
                0.15,
                [star_glow, star_glow, 0.2, 1.0],
                Material::emissive(),
            );
        });

        // Mystic symbols spiraling up the crown
        for i in 0..6 {
            let i_f = i as f32;
            let angle = (i_f * 60.0 + self.base.animation_time * 30.0).to_radians();
            let height = 3.2 + i_f * 0.2;
            let radius = 0.5 - i_f * 0.05;
            let pulse = 0.6 + 0.4 * (self.base.animation_time * 2.0 + i_f).sin();

            stack.scoped(|s| {
                s.translate(Vec3::new(radius * angle.cos(), height, radius * angle.sin()));
                draw::sphere(
                    sink,
                    s,
                    0.04,
                    [0.8 * pulse, 0.6 * pulse, 0.1, 1.0],
                    6,
                    4,
                    Material::emissive(),
                );
            });
        }
    }

    fn arms(&self, stack: &mut TransformStack, sink: &mut dyn DrawSink) {
        let sway = (self.base.animation_time * 1.5).sin() * 5.0;

        for side in [-1.0f32, 1.0] {
            stack.scoped(|s| {
                s.translate(Vec3::new(side, 2.0, 0.0));
                s.rotate_z(side * -(20.0 + sway));

                // Shoulder
                draw::sphere(sink, s, 0.25, ROBE, 8, 6, Material::matte());

                // Upper arm
                s.translate(Vec3::new(0.0, -0.6, 0.0));
                draw::cylinder(sink, s, 0.15, 0.15, 1.2, ROBE, 8, Material::matte());

                // Forearm
                s.translate(Vec3::new(0.0, -0.8, 0.0));
                s.rotate_z(side * -10.0);
                draw::cylinder(sink, s, 0.12, 0.12, 1.0, ROBE, 8, Material::matte());

                // Hand
                s.translate(Vec3::new(0.0, -0.7, 0.0));
                draw::sphere(sink, s, 0.18, SKIN, 8, 6, Material::matte());
            });
        }
    }

    fn legs(&self, stack: &mut TransformStack, sink: &mut dyn DrawSink) {
        for side in [-1.0f32, 1.0] {
            stack.scoped(|s| {
                s.translate(Vec3::new(side * 0.4, -0.2, 0.0));

                // Thigh
                draw::cylinder(sink, s, 0.25, 0.25, 1.2, ROBE, 8, Material::matte());

                // Calf
                s.translate(Vec3::new(0.0, -1.0, 0.0));
                draw::cylinder(sink, s, 0.2, 0.2, 1.0, ROBE, 8, Material::matte());

                // Boot
                s.translate(Vec3::new(0.0, -0.8, 0.15));
                draw::cube(sink, s, 0.25, BOOT, Material::matte());
            });
        }
    }

    fn staff(&self, time: f32, stack: &mut TransformStack, sink: &mut dyn DrawSink) {
        stack.scoped(|s| {
            if self.base.casting {
                s.rotate_x((time * 5.0).sin() * 15.0);
            } else if self.base.attacking {
                s.rotate_z((time * 8.0).sin() * 25.0);
            }

            s.translate(Vec3::new(1.2, 1.0, 0.0));
            s.rotate_z(15.0);

            // Shaft
            draw::cylinder(sink, s, 0.08, 0.08, 2.8, WOOD, 12, Material::matte());

            // Decorative rings
            for i in 0..3 {
                s.scoped(|s| {
                    s.translate(Vec3::new(0.0, 0.8 + i as f32 * 0.6, 0.0));
                    draw::cylinder(sink, s, 0.12, 0.12, 0.1, GOLD, 12, Material::shiny());
                });
            }

            // Orb at the tip
            s.scoped(|s| {
                s.translate(Vec3::new(0.0, 2.8, 0.0));

                let orb_scale = if self.base.casting {
                    1.0 + 0.4 * (time * 6.0).sin()
                } else {
                    1.0 + 0.2 * self.orb_pulse.sin()
                };
                s.scale_uniform(orb_scale);

                let intensity = if self.base.casting {
                    1.0
                } else {
                    0.8 + 0.2 * (time * 4.0).sin()
                };
                draw::sphere(
                    sink,
                    s,
                    0.25,
                    [0.3 * intensity, 0.8 * intensity, intensity, 1.0],
                    12,
                    10,
                    Material::emissive(),
                );

                // Bright core
                draw::sphere(sink, s, 0.12, [1.0; 4], 8, 6, Material::emissive());
            });

            // Orbital crystals while casting
            if self.base.casting {
                s.scoped(|s| {
                    s.translate(Vec3::new(0.0, 2.8, 0.0));
                    s.rotate_y(time * 120.0);

                    for i in 0..6 {
                        let i_f = i as f32;
                        let orbit = 0.5 + 0.1 * (time * 3.0 + i_f).sin();
                        let glow = 0.6 + 0.4 * (time * 5.0 + i_f).sin();

                        s.scoped(|s| {
                            s.rotate_y(i_f * 60.0);
                            s.translate(Vec3::new(orbit, (time * 4.0 + i_f).sin() * 0.1, 0.0));
                            draw::sphere(
                                sink,
                                s,
                                0.08,
                                [0.8 * glow, 0.4 * glow, glow, 1.0],
                                6,
                                4,
                                Material::emissive(),
                            );
                        });
                    }
                });
            }
        });
    }

    fn cape(&self, time: f32, stack: &mut TransformStack, sink: &mut dyn DrawSink) {
        stack.scoped(|s| {
            s.translate(Vec3::new(0.0, 1.5, -0.8));
            s.rotate_x(self.cape_sway.sin() * 8.0);

            // Fan of translucent panels standing in for the flowing cloth
            let panels = 9;
            for i in 0..panels {
                let angle = std::f32::consts::PI * i as f32 / (panels - 1) as f32
                    - std::f32::consts::FRAC_PI_2;
                let wave = 0.2 * (angle * 3.0 + time * 2.0).sin();
                let radius = 1.2 + wave;

                s.scoped(|s| {
                    s.translate(Vec3::new(
                        radius * angle.cos() * 0.5,
                        -0.75 + wave * 0.5,
                        radius * angle.sin() * 0.3 - 0.2,
                    ));
                    s.rotate_y(-angle.to_degrees() * 0.5);
                    s.scale(Vec3::new(0.35, 2.5, 0.04));
                    draw::cube(sink, s, 1.0, [0.1, 0.1, 0.6, 0.8], Material::matte());
                });
            }
        });
    }
}

impl CharacterModel for MageModel {
    fn base(&self) -> &CharacterBase {
        &self.base
    }

    fn base_mut(&mut self) -> &mut CharacterBase {
        &mut self.base
    }

    fn update(&mut self, dt: f32) {
        self.base.update(dt);
    }

    fn draw(&mut self, time: f32, stack: &mut TransformStack, sink: &mut dyn DrawSink) {
        self.orb_pulse += 0.05;
        self.cape_sway += 0.03;

        let model = &*self;
        model.base.scoped_world(stack, |s| {
            model.body(s, sink);
            model.head(s, sink);
            model.hat(s, sink);
            model.arms(s, sink);
            model.legs(s, sink);
            model.staff(time, s, sink);
            model.cape(time, s, sink);
        });
    }
}
