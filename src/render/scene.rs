//! Arena dressing: floor, rune circle, torch pillars, damage numbers

use glam::Vec3;

use super::draw::{self, DrawSink, Material};
use super::transform::TransformStack;
use super::vertex::colors;
use crate::consts::{FLOOR_RADIUS, RUNE_CIRCLE_RADIUS};

/// Floor plane height
pub const FLOOR_Y: f32 = -2.0;
/// Grid lines hover just above the floor to avoid z-fighting
const GRID_Y: f32 = -1.9;
const GRID_SPACING: f32 = 2.0;
const GRID_LINE_WIDTH: f32 = 0.04;

/// Battle floor: a flat slab with a glowing grid
pub fn draw_floor(sink: &mut dyn DrawSink, stack: &mut TransformStack, size: f32) {
    stack.scoped(|s| {
        s.translate(Vec3::new(0.0, FLOOR_Y - 0.1, 0.0));
        s.scale(Vec3::new(size * 2.0, 0.2, size * 2.0));
        draw::cube(sink, s, 1.0, colors::FLOOR, Material::matte());
    });

    let mut line = -size;
    while line <= size {
        // Lines along X
        stack.scoped(|s| {
            s.translate(Vec3::new(0.0, GRID_Y, line));
            s.scale(Vec3::new(size * 2.0, GRID_LINE_WIDTH, GRID_LINE_WIDTH));
            draw::cube(sink, s, 1.0, colors::FLOOR_GRID, Material::emissive());
        });
        // Lines along Z
        stack.scoped(|s| {
            s.translate(Vec3::new(line, GRID_Y, 0.0));
            s.scale(Vec3::new(GRID_LINE_WIDTH, GRID_LINE_WIDTH, size * 2.0));
            draw::cube(sink, s, 1.0, colors::FLOOR_GRID, Material::emissive());
        });
        line += GRID_SPACING;
    }
}

/// Slowly rotating rune circle between the combatants
pub fn draw_rune_circle(sink: &mut dyn DrawSink, stack: &mut TransformStack, radius: f32, time: f32) {
    // Circle outline from short emissive segments
    let segments = 60;
    for i in 0..segments {
        let angle = std::f32::consts::TAU * i as f32 / segments as f32 + time * 0.5;
        stack.scoped(|s| {
            s.translate(Vec3::new(radius * angle.cos(), -1.8, radius * angle.sin()));
            s.rotate_y(-angle.to_degrees());
            s.scale(Vec3::new(0.08, 0.08, radius * std::f32::consts::TAU / segments as f32));
            draw::cube(sink, s, 1.0, colors::RUNE_CIRCLE, Material::emissive());
        });
    }

    // Eight drifting glyph markers on an inner ring
    for i in 0..8 {
        let angle = (i as f32 * 45.0 + time * 10.0).to_radians();
        stack.scoped(|s| {
            s.translate(Vec3::new(
                radius * 0.7 * angle.cos(),
                -1.7,
                radius * 0.7 * angle.sin(),
            ));
            s.rotate_y(angle.to_degrees());
            draw::cube(sink, s, 0.2, [0.5, 0.2, 0.8, 1.0], Material::emissive());
        });
    }
}

/// Four torch pillars ringing the arena, flames flickering out of phase
pub fn draw_pillars(sink: &mut dyn DrawSink, stack: &mut TransformStack, time: f32) {
    for i in 0..4 {
        let angle = (i as f32 * 90.0).to_radians();
        let x = 12.0 * angle.cos();
        let z = 12.0 * angle.sin();

        stack.scoped(|s| {
            s.translate(Vec3::new(x, FLOOR_Y, z));
            draw::cylinder(sink, s, 0.5, 0.5, 8.0, colors::PILLAR, 12, Material::matte());

            // Torch flame
            let flicker = 0.8 + 0.2 * (time * 3.0 + i as f32).sin();
            s.translate(Vec3::new(0.0, 8.5, 0.0));
            draw::sphere(
                sink,
                s,
                0.3,
                [flicker, 0.7 * flicker, 0.2, 1.0],
                8,
                6,
                Material::emissive(),
            );
        });
    }
}

/// Everything static-ish in one call
pub fn draw_arena(sink: &mut dyn DrawSink, stack: &mut TransformStack, time: f32) {
    draw_floor(sink, stack, FLOOR_RADIUS);
    draw_rune_circle(sink, stack, RUNE_CIRCLE_RADIUS, time);
    draw_pillars(sink, stack, time);
}

/// A floating combat number rising above its target
#[derive(Debug, Clone)]
pub struct DamageNumber {
    pub amount: i32,
    pub origin: Vec3,
    pub age: f32,
    pub healing: bool,
}

/// Damage numbers live for two seconds
const NUMBER_LIFETIME: f32 = 2.0;

/// Pool of active floating numbers
#[derive(Debug, Default)]
pub struct DamageNumbers {
    active: Vec<DamageNumber>,
}

impl DamageNumbers {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn spawn(&mut self, amount: i32, origin: Vec3, healing: bool) {
        self.active.push(DamageNumber {
            amount,
            origin,
            age: 0.0,
            healing,
        });
    }

    pub fn update(&mut self, dt: f32) {
        for n in &mut self.active {
            n.age += dt;
        }
        self.active.retain(|n| n.age < NUMBER_LIFETIME);
    }

    pub fn clear(&mut self) {
        self.active.clear();
    }

    pub fn len(&self) -> usize {
        self.active.len()
    }

    pub fn is_empty(&self) -> bool {
        self.active.is_empty()
    }

    /// Render each number as per-digit cube stacks (digit value = stack
    /// height), drifting upward and fading with age.
    pub fn draw(&self, sink: &mut dyn DrawSink, stack: &mut TransformStack) {
        for n in &self.active {
            let alpha = (1.0 - n.age / NUMBER_LIFETIME).max(0.0);
            let float_y = n.origin.y + n.age * 2.0;

            let mut color = if n.healing {
                colors::HEAL_NUMBER
            } else if n.amount > 50 {
                [1.0, 0.0, 0.0, 1.0]
            } else if n.amount > 20 {
                colors::DAMAGE_NUMBER
            } else {
                [1.0, 1.0, 1.0, 1.0]
            };
            color[3] = alpha;

            stack.scoped(|s| {
                s.translate(Vec3::new(n.origin.x, float_y, n.origin.z));

                let digits: Vec<u32> = n
                    .amount
                    .unsigned_abs()
                    .to_string()
                    .chars()
                    .filter_map(|c| c.to_digit(10))
                    .collect();

                let mut x_offset = -(digits.len() as f32) * 0.1;
                for digit in digits {
                    for i in 0..digit {
                        s.scoped(|s| {
                            s.translate(Vec3::new(x_offset, i as f32 * 0.1, 0.0));
                            draw::cube(sink, s, 0.05, color, Material::emissive());
                        });
                    }
                    x_offset += 0.2;
                }
            });
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::render::draw::Recorder;

    #[test]
    fn test_damage_numbers_expire() {
        let mut numbers = DamageNumbers::new();
        numbers.spawn(42, Vec3::ZERO, false);
        numbers.spawn(7, Vec3::Y, true);
        assert_eq!(numbers.len(), 2);

        numbers.update(1.0);
        assert_eq!(numbers.len(), 2);

        numbers.update(1.5);
        assert!(numbers.is_empty());
    }

    #[test]
    fn test_arena_draw_balances_stack() {
        let mut recorder = Recorder::new();
        let mut stack = TransformStack::new();

        draw_arena(&mut recorder, &mut stack, 1.25);

        assert_eq!(stack.depth(), 0);
        assert!(!recorder.commands.is_empty());
    }

    #[test]
    fn test_numbers_draw_balances_stack() {
        let mut numbers = DamageNumbers::new();
        numbers.spawn(99, Vec3::new(4.0, 0.0, 0.0), false);

        let mut recorder = Recorder::new();
        let mut stack = TransformStack::new();
        numbers.draw(&mut recorder, &mut stack);

        assert_eq!(stack.depth(), 0);
        // 9 + 9 cubes for the two digits
        assert_eq!(recorder.commands.len(), 18);
    }
}
