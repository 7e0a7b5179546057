//! Drop a pile of mixed-material shapes, debug-render every step offscreen,
//! and capture the final scene to JSON.
//!
//! Run with a directory argument to export numbered PNG frames for an
//! external encoder:
//!
//! ```sh
//! cargo run --example falling_shapes --features gpu -- /tmp/falling_frames
//! ```

use orrery_render::prelude::*;
use orrery_scene::prelude::*;
use rand::Rng;
use rapier2d::pipeline::{DebugRenderMode, DebugRenderPipeline, DebugRenderStyle};
use rapier2d::prelude::*;

const STEPS: u32 = 240;

fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .init();

    // -- build the world ----------------------------------------------------

    let mut bodies = RigidBodySet::new();
    let mut colliders = ColliderSet::new();

    let ground = bodies.insert(RigidBodyBuilder::fixed().translation(vector![0.0, -0.5]));
    colliders.insert_with_parent(
        ColliderBuilder::cuboid(12.0, 0.5).user_data(Material::Metal.to_user_data()),
        ground,
        &mut bodies,
    );

    let mut rng = rand::thread_rng();
    for i in 0..24 {
        let material = if i % 2 == 0 {
            Material::Metal
        } else {
            Material::Rubber
        };
        let body = bodies.insert(
            RigidBodyBuilder::dynamic()
                .translation(vector![rng.gen_range(-8.0..8.0), rng.gen_range(4.0..20.0)])
                .rotation(rng.gen_range(0.0..std::f32::consts::TAU)),
        );
        let collider = if i % 3 == 0 {
            ColliderBuilder::cuboid(0.4, 0.4)
        } else {
            ColliderBuilder::ball(0.4)
        };
        colliders.insert_with_parent(
            collider
                .density(material.density())
                .restitution(material.restitution())
                .user_data(material.to_user_data()),
            body,
            &mut bodies,
        );
    }

    // -- physics + rendering setup ------------------------------------------

    let gravity = vector![0.0, -9.81];
    let integration_params = IntegrationParameters::default();
    let mut physics = PhysicsPipeline::new();
    let mut island_manager = IslandManager::new();
    let mut broad_phase = DefaultBroadPhase::new();
    let mut narrow_phase = NarrowPhase::new();
    let mut impulse_joints = ImpulseJointSet::new();
    let mut multibody_joints = MultibodyJointSet::new();
    let mut ccd_solver = CCDSolver::new();

    let mut renderer = DebugRenderer::new();
    renderer.set_debug_overlay(true);

    let mut debug_pipeline =
        DebugRenderPipeline::new(DebugRenderStyle::default(), DebugRenderMode::all());

    let mut gpu = pollster::block_on(GpuRenderer::new(RenderConfig::default()))?;
    gpu.camera = Camera::new(Vec2::new(0.0, 8.0), 32.0, 24.0);
    if let Some(dir) = std::env::args().nth(1) {
        gpu.set_frame_export(dir)?;
    }

    // -- simulate and draw --------------------------------------------------

    for step in 0..STEPS {
        physics.step(
            &gravity,
            &integration_params,
            &mut island_manager,
            &mut broad_phase,
            &mut narrow_phase,
            &mut bodies,
            &mut colliders,
            &mut impulse_joints,
            &mut multibody_joints,
            &mut ccd_solver,
            None,
            &(),
            &(),
        );

        debug_pipeline.render(
            &mut PhysicsDebugBackend::new(&mut renderer),
            &bodies,
            &colliders,
            &impulse_joints,
            &multibody_joints,
            &narrow_phase,
        );
        renderer.draw_transform(Transform2::from_angle(Vec2::ZERO, 0.0));

        gpu.render(&mut renderer)?;

        if step % 60 == 0 {
            tracing::info!(step, "simulated");
        }
    }

    // -- capture the end state ----------------------------------------------

    let scene = SceneState::capture(&bodies, &colliders);
    scene.save("falling_shapes_scene.json")?;
    tracing::info!(objects = scene.len(), "final scene written");

    Ok(())
}
