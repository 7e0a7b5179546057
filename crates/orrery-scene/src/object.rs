//! One simulation object's serializable snapshot.

use serde::{Deserialize, Serialize};

use crate::material::Material;

/// How the physics engine integrates a body.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum BodyKind {
    /// Fully simulated.
    Dynamic,
    /// Immovable.
    Static,
    /// Moved by game logic, not by the solver.
    Kinematic,
}

/// Collider geometry, in the body's local frame.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum ShapeState {
    /// Circle of the given radius.
    Circle {
        /// Radius in world units.
        radius: f32,
    },
    /// Axis-aligned box with half-extents.
    Box {
        /// Half-width and half-height.
        half_extents: [f32; 2],
    },
    /// Convex polygon given by its vertices in counter-clockwise order.
    Polygon {
        /// Local-space vertices.
        vertices: Vec<[f32; 2]>,
    },
}

/// A snapshot of one simulation object at a point in time.
///
/// Records are written to the scene file exactly in list order. The format
/// carries no version key today; [`version`](Self::version) defaults to 0 on
/// load so older files remain readable if the format ever grows one.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ObjectState {
    /// Identifier unique within one scene (capture order index).
    pub id: u64,
    /// Record format version. Absent in the file means 0.
    #[serde(default, skip_serializing_if = "is_zero")]
    pub version: u32,
    /// Body integration kind.
    pub body: BodyKind,
    /// Collider geometry.
    pub shape: ShapeState,
    /// World position of the body origin.
    pub position: [f32; 2],
    /// Body rotation in radians.
    pub angle: f32,
    /// Linear velocity in world units per second.
    pub linear_velocity: [f32; 2],
    /// Angular velocity in radians per second.
    pub angular_velocity: f32,
    /// Material, which fixes density, restitution, and texture.
    pub material: Material,
}

fn is_zero(version: &u32) -> bool {
    *version == 0
}
