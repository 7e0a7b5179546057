//! Capture a rapier2d world into a scene and rebuild one from it.
//!
//! Capture walks the collider set and snapshots every collider that is
//! attached to a body; colliders with unsupported shapes are skipped with a
//! warning rather than failing the whole capture. Rebuild goes the other
//! way: each record spawns one body plus one collider, with density and
//! restitution taken from the record's material.
//!
//! Materials survive the trip through collider `user_data` (see
//! [`Material::to_user_data`]). rapier's own state is never serialized;
//! the scene records are this crate's stable format.

use rapier2d::prelude::*;

use crate::error::SceneError;
use crate::material::Material;
use crate::object::{BodyKind, ObjectState, ShapeState};
use crate::scene::SceneState;

impl BodyKind {
    fn from_rapier(body_type: RigidBodyType) -> BodyKind {
        match body_type {
            RigidBodyType::Dynamic => BodyKind::Dynamic,
            RigidBodyType::Fixed => BodyKind::Static,
            RigidBodyType::KinematicPositionBased | RigidBodyType::KinematicVelocityBased => {
                BodyKind::Kinematic
            }
        }
    }
}

impl ShapeState {
    /// Snapshot a collider shape, if it is one of the supported kinds.
    pub fn from_shape(shape: &dyn Shape) -> Option<ShapeState> {
        if let Some(ball) = shape.as_ball() {
            return Some(ShapeState::Circle {
                radius: ball.radius,
            });
        }
        if let Some(cuboid) = shape.as_cuboid() {
            return Some(ShapeState::Box {
                half_extents: [cuboid.half_extents.x, cuboid.half_extents.y],
            });
        }
        if let Some(polygon) = shape.as_convex_polygon() {
            return Some(ShapeState::Polygon {
                vertices: polygon.points().iter().map(|p| [p.x, p.y]).collect(),
            });
        }
        None
    }

    fn collider_builder(&self) -> Option<ColliderBuilder> {
        match self {
            ShapeState::Circle { radius } => Some(ColliderBuilder::ball(*radius)),
            ShapeState::Box { half_extents } => {
                Some(ColliderBuilder::cuboid(half_extents[0], half_extents[1]))
            }
            ShapeState::Polygon { vertices } => {
                let points: Vec<Point<Real>> =
                    vertices.iter().map(|v| point![v[0], v[1]]).collect();
                ColliderBuilder::convex_hull(&points)
            }
        }
    }
}

impl SceneState {
    /// Snapshot every collider-bearing body in the given sets.
    ///
    /// Objects are recorded in collider-set iteration order and numbered
    /// sequentially from zero. Colliders without a parent body or with an
    /// unsupported shape are skipped.
    pub fn capture(bodies: &RigidBodySet, colliders: &ColliderSet) -> SceneState {
        let mut scene = SceneState::new();
        for (_, collider) in colliders.iter() {
            let Some(parent) = collider.parent() else {
                continue;
            };
            let Some(body) = bodies.get(parent) else {
                continue;
            };
            let Some(shape) = ShapeState::from_shape(collider.shape()) else {
                tracing::warn!("skipping collider with unsupported shape during capture");
                continue;
            };
            scene.push(ObjectState {
                id: scene.len() as u64,
                version: 0,
                body: BodyKind::from_rapier(body.body_type()),
                shape,
                position: [body.translation().x, body.translation().y],
                angle: body.rotation().angle(),
                linear_velocity: [body.linvel().x, body.linvel().y],
                angular_velocity: body.angvel(),
                material: Material::from_user_data(collider.user_data),
            });
        }
        scene
    }

    /// Rebuild one body and collider per record into the given sets.
    ///
    /// Returns the body handles in record order. Existing contents of the
    /// sets are left alone; callers wanting a full replacement should start
    /// from fresh sets.
    pub fn populate(
        &self,
        bodies: &mut RigidBodySet,
        colliders: &mut ColliderSet,
    ) -> Result<Vec<RigidBodyHandle>, SceneError> {
        let mut handles = Vec::with_capacity(self.len());
        for object in self.iter() {
            let body = match object.body {
                BodyKind::Dynamic => RigidBodyBuilder::dynamic(),
                BodyKind::Static => RigidBodyBuilder::fixed(),
                BodyKind::Kinematic => RigidBodyBuilder::kinematic_position_based(),
            }
            .translation(vector![object.position[0], object.position[1]])
            .rotation(object.angle)
            .linvel(vector![
                object.linear_velocity[0],
                object.linear_velocity[1]
            ])
            .angvel(object.angular_velocity);

            let collider = object
                .shape
                .collider_builder()
                .ok_or(SceneError::DegenerateShape { id: object.id })?
                .density(object.material.density())
                .restitution(object.material.restitution())
                .user_data(object.material.to_user_data());

            let handle = bodies.insert(body);
            colliders.insert_with_parent(collider, handle, bodies);
            handles.push(handle);
        }
        tracing::debug!(objects = handles.len(), "scene populated into physics world");
        Ok(handles)
    }
}
