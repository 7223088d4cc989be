//! Explicit transform stack
//!
//! Replaces an immediate-mode matrix stack with an owned object so model
//! assembly can be exercised without a live graphics context. Every `push`
//! must be matched by a `pop`; `scoped` enforces the pairing structurally.

use glam::{Mat4, Quat, Vec3};

/// Hierarchical model transform stack. Starts at identity; `depth()` counts
/// pushed frames above the root.
#[derive(Debug, Clone)]
pub struct TransformStack {
    stack: Vec<Mat4>,
}

impl Default for TransformStack {
    fn default() -> Self {
        Self::new()
    }
}

impl TransformStack {
    pub fn new() -> Self {
        Self {
            stack: vec![Mat4::IDENTITY],
        }
    }

    /// Current composed transform (top of stack)
    #[inline]
    pub fn current(&self) -> Mat4 {
        *self.stack.last().unwrap_or(&Mat4::IDENTITY)
    }

    /// Number of pushed frames above the root
    #[inline]
    pub fn depth(&self) -> usize {
        self.stack.len() - 1
    }

    /// Duplicate the top frame
    pub fn push(&mut self) {
        self.stack.push(self.current());
    }

    /// Discard the top frame. Popping the root is a logged no-op.
    pub fn pop(&mut self) {
        if self.stack.len() > 1 {
            self.stack.pop();
        } else {
            log::warn!("transform stack pop with no matching push");
        }
    }

    /// Run `f` inside a pushed frame; the frame is popped when `f` returns.
    pub fn scoped<R>(&mut self, f: impl FnOnce(&mut TransformStack) -> R) -> R {
        self.push();
        let result = f(self);
        self.pop();
        result
    }

    fn apply(&mut self, m: Mat4) {
        if let Some(top) = self.stack.last_mut() {
            *top *= m;
        }
    }

    pub fn translate(&mut self, offset: Vec3) {
        self.apply(Mat4::from_translation(offset));
    }

    /// Rotate about X by `degrees` (model assembly uses degree conventions)
    pub fn rotate_x(&mut self, degrees: f32) {
        self.apply(Mat4::from_rotation_x(degrees.to_radians()));
    }

    pub fn rotate_y(&mut self, degrees: f32) {
        self.apply(Mat4::from_rotation_y(degrees.to_radians()));
    }

    pub fn rotate_z(&mut self, degrees: f32) {
        self.apply(Mat4::from_rotation_z(degrees.to_radians()));
    }

    /// Rotate `degrees` about an arbitrary axis
    pub fn rotate_axis(&mut self, degrees: f32, axis: Vec3) {
        self.apply(Mat4::from_quat(Quat::from_axis_angle(
            axis.normalize_or_zero(),
            degrees.to_radians(),
        )));
    }

    pub fn scale(&mut self, factors: Vec3) {
        self.apply(Mat4::from_scale(factors));
    }

    pub fn scale_uniform(&mut self, factor: f32) {
        self.scale(Vec3::splat(factor));
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_push_pop_depth() {
        let mut stack = TransformStack::new();
        assert_eq!(stack.depth(), 0);

        stack.push();
        stack.push();
        assert_eq!(stack.depth(), 2);

        stack.pop();
        stack.pop();
        assert_eq!(stack.depth(), 0);

        // Popping the root must not underflow
        stack.pop();
        assert_eq!(stack.depth(), 0);
        assert_eq!(stack.current(), Mat4::IDENTITY);
    }

    #[test]
    fn test_scoped_restores_transform() {
        let mut stack = TransformStack::new();
        stack.translate(Vec3::new(1.0, 2.0, 3.0));
        let before = stack.current();

        stack.scoped(|s| {
            s.translate(Vec3::X * 10.0);
            s.rotate_y(90.0);
            s.scale_uniform(2.0);
        });

        assert_eq!(stack.depth(), 0);
        assert!(stack.current().abs_diff_eq(before, 1e-6));
    }

    #[test]
    fn test_translate_composes() {
        let mut stack = TransformStack::new();
        stack.translate(Vec3::X);
        stack.translate(Vec3::Y * 2.0);

        let p = stack.current().transform_point3(Vec3::ZERO);
        assert!(p.abs_diff_eq(Vec3::new(1.0, 2.0, 0.0), 1e-6));
    }

    #[test]
    fn test_rotate_degrees() {
        let mut stack = TransformStack::new();
        stack.rotate_z(90.0);

        let p = stack.current().transform_point3(Vec3::X);
        assert!(p.abs_diff_eq(Vec3::Y, 1e-5));
    }
}
