//! Tests for the rapier debug-render adapter. Runs the real debug-render
//! pipeline against a tiny world; no GPU context is required.

use orrery_render::draw::DebugRenderer;
use orrery_render::rapier::PhysicsDebugBackend;
use rapier2d::pipeline::{DebugRenderMode, DebugRenderPipeline, DebugRenderStyle};
use rapier2d::prelude::*;

#[test]
fn debug_render_pipeline_lands_lines_in_the_facade() {
    let mut bodies = RigidBodySet::new();
    let mut colliders = ColliderSet::new();

    let ball = bodies.insert(RigidBodyBuilder::dynamic().translation(vector![0.0, 3.0]));
    colliders.insert_with_parent(ColliderBuilder::ball(0.5), ball, &mut bodies);

    let ground = bodies.insert(RigidBodyBuilder::fixed());
    colliders.insert_with_parent(ColliderBuilder::cuboid(5.0, 0.2), ground, &mut bodies);

    let impulse_joints = ImpulseJointSet::new();
    let multibody_joints = MultibodyJointSet::new();
    let narrow_phase = NarrowPhase::new();

    let mut renderer = DebugRenderer::new();
    let mut pipeline =
        DebugRenderPipeline::new(DebugRenderStyle::default(), DebugRenderMode::all());
    pipeline.render(
        &mut PhysicsDebugBackend::new(&mut renderer),
        &bodies,
        &colliders,
        &impulse_joints,
        &multibody_joints,
        &narrow_phase,
    );

    assert!(
        renderer.line_count() >= 4,
        "two collider outlines should produce segments, got {}",
        renderer.line_count()
    );
    assert_eq!(
        renderer.line_count() % 2,
        0,
        "segments always arrive as endpoint pairs"
    );
}

#[test]
fn empty_world_draws_nothing() {
    let bodies = RigidBodySet::new();
    let colliders = ColliderSet::new();
    let impulse_joints = ImpulseJointSet::new();
    let multibody_joints = MultibodyJointSet::new();
    let narrow_phase = NarrowPhase::new();

    let mut renderer = DebugRenderer::new();
    let mut pipeline =
        DebugRenderPipeline::new(DebugRenderStyle::default(), DebugRenderMode::all());
    pipeline.render(
        &mut PhysicsDebugBackend::new(&mut renderer),
        &bodies,
        &colliders,
        &impulse_joints,
        &multibody_joints,
        &narrow_phase,
    );

    assert!(renderer.take_frame().is_empty());
}
