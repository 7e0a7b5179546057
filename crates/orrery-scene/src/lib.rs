//! Orrery Scene -- serializable snapshots of a 2D physics world.
//!
//! This crate captures the state of every object in a rapier2d simulation
//! into an ordered list of [`ObjectState`](object::ObjectState) records,
//! round-trips that list through a JSON scene file, and rebuilds rapier
//! bodies and colliders from a loaded scene.
//!
//! The scene file format is a JSON array at the document root, one element
//! per object, in list order. Order is preserved on save and load but never
//! interpreted by this crate -- consecutive snapshots of the same world can
//! be diffed by index, or a single snapshot can serve as a scene dump.
//!
//! # Quick Start
//!
//! ```no_run
//! use orrery_scene::prelude::*;
//! use rapier2d::prelude::*;
//!
//! let mut bodies = RigidBodySet::new();
//! let mut colliders = ColliderSet::new();
//! let ball = bodies.insert(RigidBodyBuilder::dynamic().translation(vector![0.0, 4.0]));
//! colliders.insert_with_parent(
//!     ColliderBuilder::ball(0.5).user_data(Material::Rubber.to_user_data()),
//!     ball,
//!     &mut bodies,
//! );
//!
//! let scene = SceneState::capture(&bodies, &colliders);
//! scene.save("scene.json").expect("save failed");
//!
//! let mut restored = SceneState::new();
//! restored.load("scene.json").expect("load failed");
//! assert_eq!(restored.len(), scene.len());
//! ```

#![deny(unsafe_code)]

pub mod error;
pub mod json;
pub mod material;
pub mod object;
pub mod scene;
pub mod world;

// ---------------------------------------------------------------------------
// Prelude
// ---------------------------------------------------------------------------

/// Convenience re-exports for common scene usage.
pub mod prelude {
    pub use crate::error::SceneError;
    pub use crate::material::Material;
    pub use crate::object::{BodyKind, ObjectState, ShapeState};
    pub use crate::scene::SceneState;
}
