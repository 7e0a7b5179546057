//! Tests for the debug-draw facade: shape tessellation counts, debug-overlay
//! behavior, texture degradation, and frame pass ordering. No GPU context is
//! required anywhere here.

use orrery_render::color::Color;
use orrery_render::draw::{DebugDraw, DebugRenderer, DrawPass, CIRCLE_SEGMENTS};
use orrery_render::math::{Aabb, Transform2, Vec2};
use orrery_render::vertex::{LINE_BATCH_CAPACITY, UNTEXTURED};

fn square() -> Vec<Vec2> {
    vec![
        Vec2::new(-1.0, -1.0),
        Vec2::new(1.0, -1.0),
        Vec2::new(1.0, 1.0),
        Vec2::new(-1.0, 1.0),
    ]
}

fn hexagon() -> Vec<Vec2> {
    (0..6)
        .map(|i| {
            let a = i as f32 * std::f32::consts::TAU / 6.0;
            Vec2::new(a.cos(), a.sin())
        })
        .collect()
}

// ---------------------------------------------------------------------------
// Wireframe and filled polygons
// ---------------------------------------------------------------------------

#[test]
fn polygon_emits_one_closed_segment_per_edge() {
    for vertices in [square(), hexagon()] {
        let mut renderer = DebugRenderer::new();
        let n = vertices.len();
        renderer.draw_polygon(&vertices, Color::WHITE);
        assert_eq!(renderer.line_count(), 2 * n, "N segments for N vertices");
        assert_eq!(renderer.triangle_count(), 0);
    }
}

#[test]
fn polygon_outline_closes_the_loop() {
    let mut renderer = DebugRenderer::new();
    let vertices = square();
    renderer.draw_polygon(&vertices, Color::WHITE);

    let frame = renderer.take_frame();
    let DrawPass::Lines(lines) = &frame.passes[0] else {
        panic!("expected a line pass");
    };
    // The first emitted segment runs from the last vertex back to the first.
    assert_eq!(lines[0].position, vertices[3].to_array());
    assert_eq!(lines[1].position, vertices[0].to_array());
}

#[test]
fn degenerate_polygon_draws_nothing() {
    let mut renderer = DebugRenderer::new();
    renderer.draw_polygon(&[Vec2::ZERO, Vec2::X], Color::WHITE);
    renderer.draw_solid_polygon(&[Vec2::ZERO, Vec2::X], Color::WHITE);
    assert!(renderer.take_frame().is_empty());
}

#[test]
fn solid_polygon_fan_triangulates() {
    for vertices in [square(), hexagon()] {
        let mut renderer = DebugRenderer::new();
        let n = vertices.len();
        renderer.draw_solid_polygon(&vertices, Color::WHITE);
        assert_eq!(
            renderer.triangle_count(),
            3 * (n - 2),
            "N-2 triangles for N vertices"
        );
        assert_eq!(renderer.line_count(), 0, "no outline without the overlay");
    }
}

#[test]
fn solid_polygon_overlay_dims_fill_and_adds_outline() {
    let mut renderer = DebugRenderer::new();
    renderer.set_debug_overlay(true);
    let vertices = square();
    renderer.draw_solid_polygon(&vertices, Color::rgba(1.0, 0.8, 0.2, 1.0));

    assert_eq!(renderer.triangle_count(), 6);
    assert_eq!(renderer.line_count(), 8, "overlay outline on top of the fill");

    let frame = renderer.take_frame();
    let DrawPass::Triangles(triangles) = &frame.passes[0] else {
        panic!("expected a triangle pass first");
    };
    assert_eq!(triangles[0].color, [0.5, 0.4, 0.1, 0.5], "fill at half intensity");

    let DrawPass::Lines(lines) = &frame.passes[1] else {
        panic!("expected the outline pass second");
    };
    assert_eq!(lines[0].color, [1.0, 0.8, 0.2, 1.0], "outline keeps full color");
}

// ---------------------------------------------------------------------------
// Circles
// ---------------------------------------------------------------------------

#[test]
fn circle_emits_fixed_segment_count_regardless_of_radius() {
    for radius in [0.1, 1.0, 250.0] {
        let mut renderer = DebugRenderer::new();
        renderer.draw_circle(Vec2::ZERO, radius, Color::WHITE);
        assert_eq!(renderer.line_count(), 2 * CIRCLE_SEGMENTS as usize);
    }
}

#[test]
fn circle_vertices_lie_on_the_circle() {
    let mut renderer = DebugRenderer::new();
    let center = Vec2::new(3.0, -2.0);
    let radius = 1.5;
    renderer.draw_circle(center, radius, Color::WHITE);

    let frame = renderer.take_frame();
    let DrawPass::Lines(lines) = &frame.passes[0] else {
        panic!("expected a line pass");
    };
    for vertex in lines {
        let dx = vertex.position[0] - center.x;
        let dy = vertex.position[1] - center.y;
        let r = (dx * dx + dy * dy).sqrt();
        assert!((r - radius).abs() < 1e-4, "vertex off the circle: r = {r}");
    }
}

#[test]
fn solid_circle_is_a_sixteen_triangle_fan() {
    let mut renderer = DebugRenderer::new();
    renderer.draw_solid_circle(Vec2::ZERO, 2.0, Vec2::X, Color::WHITE);
    assert_eq!(renderer.triangle_count(), 3 * CIRCLE_SEGMENTS as usize);
    assert_eq!(renderer.line_count(), 0);
}

#[test]
fn solid_circle_overlay_adds_ring_and_radius_line() {
    let mut renderer = DebugRenderer::new();
    renderer.set_debug_overlay(true);
    renderer.draw_solid_circle(Vec2::ZERO, 2.0, Vec2::X, Color::WHITE);

    assert_eq!(renderer.triangle_count(), 3 * CIRCLE_SEGMENTS as usize);
    // 16 ring segments plus the rotation-reference radius line.
    assert_eq!(renderer.line_count(), 2 * (CIRCLE_SEGMENTS as usize + 1));
}

// ---------------------------------------------------------------------------
// Textured variants
// ---------------------------------------------------------------------------

#[test]
fn textured_draws_degrade_to_solid_without_capability() {
    let mut renderer = DebugRenderer::new();
    assert!(!renderer.textures_enabled());

    renderer.draw_textured_polygon(&square(), Color::WHITE, 0);
    renderer.draw_textured_circle(Vec2::ZERO, 1.0, Vec2::X, Color::WHITE, 1);

    let frame = renderer.take_frame();
    for pass in &frame.passes {
        let DrawPass::Triangles(triangles) = pass else {
            panic!("solid fallback should only emit triangles");
        };
        for vertex in triangles {
            assert_eq!(vertex.material, UNTEXTURED);
        }
    }
}

#[test]
fn textured_polygon_tags_material_and_tiles_world_space() {
    let mut renderer = DebugRenderer::new();
    renderer.set_textures_enabled(true);
    renderer.set_texture_tiling(7.5);
    renderer.draw_textured_polygon(&square(), Color::WHITE, 1);

    let frame = renderer.take_frame();
    let DrawPass::Triangles(triangles) = &frame.passes[0] else {
        panic!("expected a triangle pass");
    };
    for vertex in triangles {
        assert_eq!(vertex.material, 1);
        assert!((vertex.tex_coord[0] - vertex.position[0] / 7.5).abs() < 1e-6);
        assert!((vertex.tex_coord[1] - vertex.position[1] / 7.5).abs() < 1e-6);
    }
}

#[test]
fn textured_circle_always_draws_its_outline_ring() {
    let mut renderer = DebugRenderer::new();
    renderer.set_textures_enabled(true);
    renderer.draw_textured_circle(Vec2::ZERO, 1.0, Vec2::X, Color::WHITE, 0);

    assert_eq!(renderer.triangle_count(), 3 * CIRCLE_SEGMENTS as usize);
    assert_eq!(renderer.line_count(), 2 * CIRCLE_SEGMENTS as usize);
}

// ---------------------------------------------------------------------------
// Segments, transforms, points, boxes
// ---------------------------------------------------------------------------

#[test]
fn segment_is_two_line_vertices() {
    let mut renderer = DebugRenderer::new();
    renderer.draw_segment(Vec2::ZERO, Vec2::new(4.0, 5.0), Color::GREEN);
    assert_eq!(renderer.line_count(), 2);
}

#[test]
fn transform_axes_are_red_then_green() {
    let mut renderer = DebugRenderer::new();
    renderer.draw_transform(Transform2::from_angle(Vec2::new(1.0, 1.0), 0.0));

    let frame = renderer.take_frame();
    let DrawPass::Lines(lines) = &frame.passes[0] else {
        panic!("expected a line pass");
    };
    assert_eq!(lines.len(), 4, "two axis segments");
    assert_eq!(lines[0].color, Color::RED.to_array());
    assert_eq!(lines[2].color, Color::GREEN.to_array());
    // Unrotated X axis points right from the origin point.
    assert!(lines[1].position[0] > lines[0].position[0]);
    // Unrotated Y axis points up.
    assert!(lines[3].position[1] > lines[2].position[1]);
}

#[test]
fn point_carries_caller_specified_size() {
    let mut renderer = DebugRenderer::new();
    renderer.draw_point(Vec2::new(2.0, 3.0), 8.0, Color::WHITE);

    let frame = renderer.take_frame();
    let DrawPass::Points(points) = &frame.passes[0] else {
        panic!("expected a point pass");
    };
    assert_eq!(points.len(), 1);
    assert_eq!(points[0].size, 8.0);
    assert_eq!(points[0].position, [2.0, 3.0]);
}

#[test]
fn aabb_outline_is_four_segments() {
    let mut renderer = DebugRenderer::new();
    renderer.draw_aabb(
        Aabb::new(Vec2::new(-1.0, -2.0), Vec2::new(3.0, 4.0)),
        Color::WHITE,
    );
    assert_eq!(renderer.line_count(), 8);
}

// ---------------------------------------------------------------------------
// Frame draining
// ---------------------------------------------------------------------------

#[test]
fn frame_orders_triangles_then_lines_then_points() {
    let mut renderer = DebugRenderer::new();
    // Issue in scrambled order; the frame must still layer correctly.
    renderer.draw_point(Vec2::ZERO, 4.0, Color::WHITE);
    renderer.draw_segment(Vec2::ZERO, Vec2::X, Color::WHITE);
    renderer.draw_solid_polygon(&square(), Color::WHITE);

    let frame = renderer.take_frame();
    let kinds: Vec<u8> = frame
        .passes
        .iter()
        .map(|p| match p {
            DrawPass::Triangles(_) => 0,
            DrawPass::Lines(_) => 1,
            DrawPass::Points(_) => 2,
        })
        .collect();
    assert_eq!(kinds, vec![0, 1, 2]);
}

#[test]
fn take_frame_resets_the_renderer() {
    let mut renderer = DebugRenderer::new();
    renderer.draw_circle(Vec2::ZERO, 1.0, Color::WHITE);
    assert!(!renderer.take_frame().is_empty());
    assert!(renderer.take_frame().is_empty());
    assert_eq!(renderer.line_count(), 0);
}

#[test]
fn batch_overflow_splits_a_frame_into_multiple_line_passes() {
    let mut renderer = DebugRenderer::new();
    let segments = LINE_BATCH_CAPACITY / 2 + 1;
    for i in 0..segments {
        let y = i as f32;
        renderer.draw_segment(Vec2::new(0.0, y), Vec2::new(1.0, y), Color::WHITE);
    }

    let frame = renderer.take_frame();
    let line_passes: Vec<&Vec<_>> = frame
        .passes
        .iter()
        .filter_map(|p| match p {
            DrawPass::Lines(chunk) => Some(chunk),
            _ => None,
        })
        .collect();
    assert_eq!(line_passes.len(), 2, "one sealed chunk plus the overflow");
    assert_eq!(line_passes[0].len(), LINE_BATCH_CAPACITY);
    assert_eq!(line_passes[1].len(), 2);
}
