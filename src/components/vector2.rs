//! Mutable 2D value used for rotations and background offsets.

use crate::systems::tween::lerp_v2;

/// Plain 2D vector with value semantics.
#[derive(Clone, Debug, Copy, Default, PartialEq)]
pub struct Vector2 {
    pub x: f32,
    pub y: f32,
}

impl Vector2 {
    pub const ZERO: Vector2 = Vector2 { x: 0.0, y: 0.0 };

    pub fn new(x: f32, y: f32) -> Self {
        Vector2 { x, y }
    }

    pub fn set(&mut self, x: f32, y: f32) {
        self.x = x;
        self.y = y;
    }

    /// Move this vector a fraction `t` of the way toward `target`, in place.
    pub fn lerp(&mut self, target: Vector2, t: f32) {
        *self = lerp_v2(*self, target, t);
    }
}
