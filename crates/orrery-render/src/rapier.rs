//! Adapter between rapier2d's debug-render pipeline and the draw facade.
//!
//! rapier owns shape decomposition for its own debug rendering and hands
//! back lines; this backend forwards them into the line batch, converting
//! rapier's HSLA debug colors on the way. Borrowing the renderer for the
//! duration of one debug-render pass keeps ownership with the caller:
//!
//! ```no_run
//! use orrery_render::prelude::*;
//! use rapier2d::pipeline::{DebugRenderMode, DebugRenderPipeline, DebugRenderStyle};
//! use rapier2d::prelude::*;
//!
//! let bodies = RigidBodySet::new();
//! let colliders = ColliderSet::new();
//! let impulse_joints = ImpulseJointSet::new();
//! let multibody_joints = MultibodyJointSet::new();
//! let narrow_phase = NarrowPhase::new();
//!
//! let mut renderer = DebugRenderer::new();
//! let mut pipeline =
//!     DebugRenderPipeline::new(DebugRenderStyle::default(), DebugRenderMode::all());
//! pipeline.render(
//!     &mut PhysicsDebugBackend::new(&mut renderer),
//!     &bodies,
//!     &colliders,
//!     &impulse_joints,
//!     &multibody_joints,
//!     &narrow_phase,
//! );
//! ```

use rapier2d::math::{Point, Real};
use rapier2d::pipeline::{DebugRenderBackend, DebugRenderObject};

use crate::color::Color;
use crate::draw::{DebugDraw, DebugRenderer};
use crate::math::Vec2;

/// Forwards rapier debug-render lines into a [`DebugRenderer`].
pub struct PhysicsDebugBackend<'a> {
    renderer: &'a mut DebugRenderer,
}

impl<'a> PhysicsDebugBackend<'a> {
    pub fn new(renderer: &'a mut DebugRenderer) -> PhysicsDebugBackend<'a> {
        PhysicsDebugBackend { renderer }
    }
}

impl DebugRenderBackend for PhysicsDebugBackend<'_> {
    fn draw_line(
        &mut self,
        _object: DebugRenderObject,
        a: Point<Real>,
        b: Point<Real>,
        color: [f32; 4],
    ) {
        self.renderer.draw_segment(
            Vec2::new(a.x, a.y),
            Vec2::new(b.x, b.y),
            Color::from_hsla(color),
        );
    }
}
