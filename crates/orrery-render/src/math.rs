//! Minimal 2D math types for shape tessellation.
//!
//! Only the operations the draw facade needs; the physics engine keeps its
//! own math, and the adapter converts at the boundary.

use std::ops::{Add, Mul, Sub};

/// A 2D position or direction.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct Vec2 {
    /// Horizontal component.
    pub x: f32,
    /// Vertical component.
    pub y: f32,
}

impl Vec2 {
    /// The origin / zero vector.
    pub const ZERO: Vec2 = Vec2 { x: 0.0, y: 0.0 };

    /// Unit vector along +X.
    pub const X: Vec2 = Vec2 { x: 1.0, y: 0.0 };

    pub fn new(x: f32, y: f32) -> Vec2 {
        Vec2 { x, y }
    }

    pub fn to_array(self) -> [f32; 2] {
        [self.x, self.y]
    }
}

impl Add for Vec2 {
    type Output = Vec2;

    fn add(self, rhs: Vec2) -> Vec2 {
        Vec2::new(self.x + rhs.x, self.y + rhs.y)
    }
}

impl Sub for Vec2 {
    type Output = Vec2;

    fn sub(self, rhs: Vec2) -> Vec2 {
        Vec2::new(self.x - rhs.x, self.y - rhs.y)
    }
}

impl Mul<Vec2> for f32 {
    type Output = Vec2;

    fn mul(self, rhs: Vec2) -> Vec2 {
        Vec2::new(self * rhs.x, self * rhs.y)
    }
}

impl From<[f32; 2]> for Vec2 {
    fn from(v: [f32; 2]) -> Vec2 {
        Vec2::new(v[0], v[1])
    }
}

impl From<Vec2> for [f32; 2] {
    fn from(v: Vec2) -> [f32; 2] {
        v.to_array()
    }
}

/// A 2D rotation stored as a precomputed cosine/sine pair.
///
/// Storing the pair lets circle tessellation rotate a unit vector
/// incrementally instead of re-evaluating sin/cos per segment.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Rot2 {
    pub cos: f32,
    pub sin: f32,
}

impl Rot2 {
    /// The identity rotation.
    pub const IDENTITY: Rot2 = Rot2 { cos: 1.0, sin: 0.0 };

    /// Rotation by `angle` radians, counter-clockwise.
    pub fn from_angle(angle: f32) -> Rot2 {
        let (sin, cos) = angle.sin_cos();
        Rot2 { cos, sin }
    }

    /// The rotated +X axis.
    pub fn x_axis(self) -> Vec2 {
        Vec2::new(self.cos, self.sin)
    }

    /// The rotated +Y axis.
    pub fn y_axis(self) -> Vec2 {
        Vec2::new(-self.sin, self.cos)
    }

    /// Apply this rotation to a vector.
    pub fn rotate(self, v: Vec2) -> Vec2 {
        Vec2::new(
            self.cos * v.x - self.sin * v.y,
            self.sin * v.x + self.cos * v.y,
        )
    }
}

/// A 2D rigid transform: translation plus rotation.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Transform2 {
    /// Translation of the frame origin.
    pub position: Vec2,
    /// Orientation of the frame.
    pub rotation: Rot2,
}

impl Transform2 {
    pub fn new(position: Vec2, rotation: Rot2) -> Transform2 {
        Transform2 { position, rotation }
    }

    /// Transform at `position` rotated by `angle` radians.
    pub fn from_angle(position: Vec2, angle: f32) -> Transform2 {
        Transform2::new(position, Rot2::from_angle(angle))
    }
}

/// An axis-aligned bounding box.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Aabb {
    /// Lower-left corner.
    pub min: Vec2,
    /// Upper-right corner.
    pub max: Vec2,
}

impl Aabb {
    pub fn new(min: Vec2, max: Vec2) -> Aabb {
        Aabb { min, max }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn rotation_axes_are_orthogonal() {
        let rot = Rot2::from_angle(0.7);
        let x = rot.x_axis();
        let y = rot.y_axis();
        assert!((x.x * y.x + x.y * y.y).abs() < 1e-6);
    }

    #[test]
    fn quarter_turn_maps_x_to_y() {
        let rot = Rot2::from_angle(std::f32::consts::FRAC_PI_2);
        let v = rot.rotate(Vec2::X);
        assert!(v.x.abs() < 1e-6);
        assert!((v.y - 1.0).abs() < 1e-6);
    }

    #[test]
    fn sixteen_increments_close_the_circle() {
        let step = Rot2::from_angle(std::f32::consts::TAU / 16.0);
        let mut r = Vec2::X;
        for _ in 0..16 {
            r = step.rotate(r);
        }
        // The increment is exact, so accumulated error stays tiny.
        assert!((r.x - 1.0).abs() < 1e-5);
        assert!(r.y.abs() < 1e-5);
    }
}
