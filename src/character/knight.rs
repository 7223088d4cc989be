//! The knight: plate armor, plumed helmet, longsword and heater shield

use glam::Vec3;

use super::{CharacterBase, CharacterModel};
use crate::render::draw::{self, DrawSink, Material};
use crate::render::transform::TransformStack;

const PLATE: [f32; 4] = [0.8, 0.8, 0.9, 1.0];
const PLATE_DARK: [f32; 4] = [0.75, 0.75, 0.85, 1.0];
const STEEL: [f32; 4] = [0.6, 0.6, 0.7, 1.0];
const SKIN: [f32; 4] = [0.9, 0.8, 0.7, 1.0];
const GOLD: [f32; 4] = [0.9, 0.8, 0.1, 1.0];
const PLUME: [f32; 4] = [0.8, 0.2, 0.2, 1.0];
const CAPE: [f32; 4] = [0.6, 0.1, 0.1, 1.0];
const LEATHER: [f32; 4] = [0.4, 0.2, 0.1, 1.0];

pub struct KnightModel {
    base: CharacterBase,
    plume_sway: f32,
}

impl KnightModel {
    pub fn new(position: Vec3) -> Self {
        Self {
            base: CharacterBase::new(position),
            plume_sway: 0.0,
        }
    }

    fn body(&self, stack: &mut TransformStack, sink: &mut dyn DrawSink) {
        // Breastplate
        stack.scoped(|s| {
            s.translate(Vec3::new(0.0, 1.2, 0.0));
            draw::cube(sink, s, 0.9, PLATE, Material::shiny());
        });

        // Pauldrons
        for x in [-0.9, 0.9] {
            stack.scoped(|s| {
                s.translate(Vec3::new(x, 1.8, 0.0));
                draw::sphere(sink, s, 0.35, PLATE_DARK, 8, 6, Material::shiny());
            });
        }

        // Sacred cross on the chest
        stack.scoped(|s| {
            s.translate(Vec3::new(0.0, 1.4, 0.5));
            s.scale(Vec3::new(0.1, 0.6, 0.1));
            draw::cube(sink, s, 1.0, GOLD, Material::shiny());
        });
        stack.scoped(|s| {
            s.translate(Vec3::new(0.0, 1.6, 0.5));
            s.scale(Vec3::new(0.4, 0.1, 0.1));
            draw::cube(sink, s, 1.0, GOLD, Material::shiny());
        });

        // Armored skirt
        stack.scoped(|s| {
            s.translate(Vec3::new(0.0, 0.2, 0.0));
            draw::cylinder(sink, s, 0.9, 0.9, 1.0, [0.7, 0.7, 0.8, 1.0], 12, Material::shiny());
        });
    }

    fn head(&self, stack: &mut TransformStack, sink: &mut dyn DrawSink) {
        stack.scoped(|s| {
            s.translate(Vec3::new(0.0, 2.4, 0.0));
            draw::sphere(sink, s, 0.4, SKIN, 12, 10, Material::matte());

            for x in [-0.12, 0.12] {
                s.scoped(|s| {
                    s.translate(Vec3::new(x, 0.1, 0.35));
                    draw::sphere(sink, s, 0.05, [0.2, 0.4, 0.8, 1.0], 6, 4, Material::emissive());
                });
            }
        });
    }

    fn helmet(&self, stack: &mut TransformStack, sink: &mut dyn DrawSink) {
        // Dome
        stack.scoped(|s| {
            s.translate(Vec3::new(0.0, 2.6, 0.0));
            draw::sphere(sink, s, 0.45, [0.7, 0.7, 0.8, 1.0], 12, 10, Material::shiny());
        });

        // Visor
        stack.scoped(|s| {
            s.translate(Vec3::new(0.0, 2.5, 0.4));
            s.scale(Vec3::new(0.8, 0.3, 0.1));
            draw::cube(sink, s, 0.5, STEEL, Material::shiny());
        });

        // Waving plume of seven feathers
        stack.scoped(|s| {
            s.translate(Vec3::new(0.0, 3.2, -0.2));
            s.rotate_x(self.plume_sway.sin() * 8.0);

            for i in 0..7 {
                let i_f = i as f32;
                s.scoped(|s| {
                    s.translate(Vec3::new((i_f - 3.0) * 0.08, 0.0, 0.0));
                    s.rotate_z(i_f * 8.0 - 24.0);
                    let height = 0.8 + (3.0 - (i_f - 3.0).abs()) * 0.15;
                    draw::cylinder(sink, s, 0.03, 0.03, height, PLUME, 6, Material::matte());
                });
            }
        });
    }

    fn arms(&self, stack: &mut TransformStack, sink: &mut dyn DrawSink) {
        for side in [-1.0f32, 1.0] {
            stack.scoped(|s| {
                s.translate(Vec3::new(side * 1.2, 2.0, 0.0));
                s.rotate_z(side * -25.0);

                // Shoulder
                draw::sphere(sink, s, 0.3, PLATE_DARK, 8, 6, Material::shiny());

                // Upper arm
                s.translate(Vec3::new(0.0, -0.7, 0.0));
                draw::cylinder(sink, s, 0.2, 0.2, 1.4, PLATE_DARK, 8, Material::shiny());

                // Elbow
                s.translate(Vec3::new(0.0, -0.8, 0.0));
                draw::sphere(sink, s, 0.18, PLATE_DARK, 8, 6, Material::shiny());

                // Forearm
                s.translate(Vec3::new(0.0, -0.6, 0.0));
                s.rotate_z(side * -10.0);
                draw::cylinder(sink, s, 0.18, 0.18, 1.2, PLATE_DARK, 8, Material::shiny());

                // Gauntlet
                s.translate(Vec3::new(0.0, -0.8, 0.0));
                draw::cube(sink, s, 0.25, STEEL, Material::shiny());
            });
        }
    }

    fn legs(&self, stack: &mut TransformStack, sink: &mut dyn DrawSink) {
        for side in [-1.0f32, 1.0] {
            stack.scoped(|s| {
                s.translate(Vec3::new(side * 0.5, -0.2, 0.0));

                // Armored thigh
                draw::cylinder(sink, s, 0.3, 0.3, 1.5, PLATE_DARK, 8, Material::shiny());

                // Knee cop
                s.translate(Vec3::new(0.0, -1.2, 0.0));
                draw::sphere(sink, s, 0.25, STEEL, 8, 6, Material::shiny());

                // Greave
                s.translate(Vec3::new(0.0, -0.8, 0.0));
                draw::cylinder(sink, s, 0.25, 0.25, 1.2, PLATE_DARK, 8, Material::shiny());

                // Sabaton
                s.translate(Vec3::new(0.0, -1.0, 0.2));
                draw::cube(sink, s, 0.3, STEEL, Material::shiny());
            });
        }
    }

    fn sword(&self, time: f32, stack: &mut TransformStack, sink: &mut dyn DrawSink) {
        stack.scoped(|s| {
            if self.base.attacking {
                s.rotate_x(45.0 * (time * 8.0).sin());
            }

            s.translate(Vec3::new(1.8, 1.0, 0.0));
            s.rotate_z(10.0);

            // Leather grip
            draw::cylinder(sink, s, 0.06, 0.06, 0.5, LEATHER, 8, Material::matte());

            // Crossguard
            s.scoped(|s| {
                s.translate(Vec3::new(0.0, 0.5, 0.0));
                s.scale(Vec3::new(0.5, 0.08, 0.08));
                draw::cube(sink, s, 1.0, PLATE, Material::shiny());
            });

            // Blade
            s.scoped(|s| {
                s.translate(Vec3::new(0.0, 0.6, 0.0));
                s.scale(Vec3::new(0.08, 2.0, 0.03));
                draw::cube(sink, s, 1.0, [0.9, 0.9, 1.0, 1.0], Material::shiny());
            });

            // Point
            s.scoped(|s| {
                s.translate(Vec3::new(0.0, 2.6, 0.0));
                draw::cone(sink, s, 0.08, 0.3, [0.95, 0.95, 1.0, 1.0], 8, Material::shiny());
            });

            // Glowing edge mid-swing
            if self.base.attacking {
                s.scoped(|s| {
                    s.translate(Vec3::new(0.0, 1.3, 0.04));
                    s.scale(Vec3::new(0.02, 1.6, 0.01));
                    draw::cube(sink, s, 1.0, [0.8, 0.9, 1.0, 1.0], Material::emissive());
                });
            }

            // Pommel with gem
            s.scoped(|s| {
                s.translate(Vec3::new(0.0, -0.2, 0.0));
                draw::sphere(sink, s, 0.12, PLATE, 8, 6, Material::shiny());

                let gem_glow = 0.8 + 0.2 * (time * 3.0).sin();
                draw::sphere(
                    sink,
                    s,
                    0.06,
                    [0.2 * gem_glow, 0.6 * gem_glow, gem_glow, 1.0],
                    6,
                    4,
                    Material::emissive(),
                );
            });
        });
    }

    fn shield(&self, stack: &mut TransformStack, sink: &mut dyn DrawSink) {
        stack.scoped(|s| {
            s.translate(Vec3::new(-1.8, 1.2, 0.0));

            // Shield face
            s.scoped(|s| {
                s.rotate_y(90.0);
                s.scale(Vec3::new(0.15, 1.4, 1.0));
                draw::cylinder(sink, s, 1.0, 1.0, 1.0, [0.8, 0.1, 0.1, 1.0], 12, Material::matte());
            });

            // Metal rim
            s.scoped(|s| {
                s.rotate_y(90.0);
                s.scale(Vec3::new(0.05, 1.5, 1.1));
                draw::cylinder(sink, s, 1.0, 1.0, 1.0, STEEL, 16, Material::shiny());
            });

            // Golden cross emblem
            s.scoped(|s| {
                s.translate(Vec3::new(0.16, 0.0, 0.0));
                s.rotate_y(90.0);

                s.scoped(|s| {
                    s.scale(Vec3::new(0.08, 0.6, 0.02));
                    draw::cube(sink, s, 1.0, GOLD, Material::shiny());
                });
                s.scoped(|s| {
                    s.scale(Vec3::new(0.4, 0.08, 0.02));
                    draw::cube(sink, s, 1.0, GOLD, Material::shiny());
                });
            });

            // Rivets
            for i in 0..8 {
                let angle = (i as f32 * 45.0).to_radians();
                s.scoped(|s| {
                    s.translate(Vec3::new(
                        0.12 + 0.08 * angle.cos(),
                        0.8 * angle.sin(),
                        0.0,
                    ));
                    draw::sphere(sink, s, 0.04, PLATE, 6, 4, Material::shiny());
                });
            }
        });
    }

    fn cape(&self, time: f32, stack: &mut TransformStack, sink: &mut dyn DrawSink) {
        stack.scoped(|s| {
            s.translate(Vec3::new(0.0, 1.8, -0.9));
            s.rotate_x((time * 1.5).sin() * 6.0);

            let panels = 7;
            for i in 0..panels {
                let angle = std::f32::consts::PI * i as f32 / (panels - 1) as f32
                    - std::f32::consts::FRAC_PI_2;
                let wave = 0.1 * (angle * 4.0 + time * 3.0).sin();
                let radius = 1.4 + wave;

                s.scoped(|s| {
                    s.translate(Vec3::new(
                        radius * angle.cos() * 0.5,
                        -1.4 + wave * 0.5,
                        radius * angle.sin() * 0.3 - 0.2,
                    ));
                    s.rotate_y(-angle.to_degrees() * 0.5);
                    s.scale(Vec3::new(0.4, 2.8, 0.04));
                    draw::cube(sink, s, 1.0, CAPE, Material::matte());
                });
            }

            // Golden brooch
            s.scoped(|s| {
                s.translate(Vec3::new(0.0, 0.3, 0.0));
                draw::sphere(sink, s, 0.08, GOLD, 8, 6, Material::shiny());
            });
        });
    }
}

impl CharacterModel for KnightModel {
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
        self.plume_sway += 0.02;

        let model = &*self;
        model.base.scoped_world(stack, |s| {
            model.body(s, sink);
            model.head(s, sink);
            model.helmet(s, sink);
            model.arms(s, sink);
            model.legs(s, sink);
            model.sword(time, s, sink);
            model.shield(s, sink);
            model.cape(time, s, sink);
        });
    }
}
