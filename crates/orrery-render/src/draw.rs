//! Shape tessellation into primitive batches.
//!
//! [`DebugDraw`] is the capability set the physics engine draws through: one
//! method per primitive kind, invoked synchronously during a debug-render
//! pass. [`DebugRenderer`] is its sole implementer; it decomposes shapes
//! into vertices for the three batches and drains them as a [`Frame`] whose
//! pass order (triangles, then lines, then points) guarantees that filled
//! shapes are laid down before outlines, and outlines before markers.
//!
//! # Debug overlay
//!
//! With the overlay toggled on, filled shapes render half-intensity with
//! their wireframe outline on top, and solid circles gain a center-to-rim
//! radius line so rotation stays visible.

use crate::batch::Batch;
use crate::color::Color;
use crate::math::{Aabb, Rot2, Transform2, Vec2};
use crate::vertex::{
    LineVertex, PointVertex, TriangleVertex, LINE_BATCH_CAPACITY, POINT_BATCH_CAPACITY,
    TRIANGLE_BATCH_CAPACITY, UNTEXTURED,
};

/// Segment count used to approximate circles.
pub const CIRCLE_SEGMENTS: u32 = 16;

/// Length of the axes drawn by [`DebugDraw::draw_transform`], in world units.
pub const AXIS_SCALE: f32 = 0.4;

/// Default edge length, in world units, of one texture tile.
pub const DEFAULT_TEXTURE_TILING: f32 = 7.5;

/// Intensity factor applied to fills when the debug overlay is on.
const OVERLAY_FADE: f32 = 0.5;

// ---------------------------------------------------------------------------
// DebugDraw
// ---------------------------------------------------------------------------

/// The shape-drawing capability set consumed by the physics engine.
///
/// Every method is synchronous and side-effect free beyond buffering
/// vertices; nothing reaches a GPU until the frame is drained.
pub trait DebugDraw {
    /// Wireframe polygon: N closed-loop segments for N vertices.
    ///
    /// Fewer than three vertices draws nothing.
    fn draw_polygon(&mut self, vertices: &[Vec2], color: Color);

    /// Filled convex polygon, fan-triangulated from the first vertex.
    fn draw_solid_polygon(&mut self, vertices: &[Vec2], color: Color);

    /// Filled convex polygon sampling the given material texture layer.
    ///
    /// Falls back to [`draw_solid_polygon`](Self::draw_solid_polygon) when
    /// the renderer has no texture capability.
    fn draw_textured_polygon(&mut self, vertices: &[Vec2], color: Color, material: u32);

    /// Wireframe circle approximated with [`CIRCLE_SEGMENTS`] segments.
    fn draw_circle(&mut self, center: Vec2, radius: f32, color: Color);

    /// Filled circle; `axis` is the body-fixed unit direction whose radius
    /// line visualizes rotation when the debug overlay is on.
    fn draw_solid_circle(&mut self, center: Vec2, radius: f32, axis: Vec2, color: Color);

    /// Filled circle sampling the given material texture layer.
    ///
    /// Falls back to [`draw_solid_circle`](Self::draw_solid_circle) when the
    /// renderer has no texture capability.
    fn draw_textured_circle(
        &mut self,
        center: Vec2,
        radius: f32,
        axis: Vec2,
        color: Color,
        material: u32,
    );

    /// One line segment.
    fn draw_segment(&mut self, a: Vec2, b: Vec2, color: Color);

    /// Two [`AXIS_SCALE`]-length axes at a transform: X red, Y green.
    fn draw_transform(&mut self, transform: Transform2);

    /// One marker with a caller-specified on-screen size in pixels.
    fn draw_point(&mut self, position: Vec2, size: f32, color: Color);

    /// Axis-aligned box outline: four segments around the corners.
    fn draw_aabb(&mut self, aabb: Aabb, color: Color);
}

// ---------------------------------------------------------------------------
// Frame
// ---------------------------------------------------------------------------

/// One draw call's worth of same-kind vertices.
#[derive(Debug, Clone, PartialEq)]
pub enum DrawPass {
    Triangles(Vec<TriangleVertex>),
    Lines(Vec<LineVertex>),
    Points(Vec<PointVertex>),
}

/// Everything buffered for one frame, in submission order.
///
/// Passes are grouped by kind -- all triangle chunks, then all line chunks,
/// then all point chunks -- so backends that simply iterate get the fill /
/// outline / marker layering for free.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Frame {
    pub passes: Vec<DrawPass>,
}

impl Frame {
    /// Whether the frame carries no vertices at all.
    pub fn is_empty(&self) -> bool {
        self.passes.is_empty()
    }
}

// ---------------------------------------------------------------------------
// DebugRenderer
// ---------------------------------------------------------------------------

/// Sole implementer of [`DebugDraw`]: owns the three primitive batches and
/// the debug-mode toggles.
///
/// One instance lives as long as its renderer; batches are reset by every
/// frame drain, never reallocated.
pub struct DebugRenderer {
    points: Batch<PointVertex>,
    lines: Batch<LineVertex>,
    triangles: Batch<TriangleVertex>,
    debug_overlay: bool,
    textures_enabled: bool,
    texture_tiling: f32,
}

impl Default for DebugRenderer {
    fn default() -> Self {
        Self::new()
    }
}

impl DebugRenderer {
    pub fn new() -> DebugRenderer {
        DebugRenderer {
            points: Batch::new(POINT_BATCH_CAPACITY),
            lines: Batch::new(LINE_BATCH_CAPACITY),
            triangles: Batch::new(TRIANGLE_BATCH_CAPACITY),
            debug_overlay: false,
            textures_enabled: false,
            texture_tiling: DEFAULT_TEXTURE_TILING,
        }
    }

    /// Toggle the dim-fill-plus-outline overlay.
    pub fn set_debug_overlay(&mut self, enabled: bool) {
        self.debug_overlay = enabled;
    }

    pub fn debug_overlay(&self) -> bool {
        self.debug_overlay
    }

    /// Declare whether the backend can sample material textures.
    ///
    /// Off (the default), textured draws degrade to their solid equivalents.
    pub fn set_textures_enabled(&mut self, enabled: bool) {
        self.textures_enabled = enabled;
    }

    pub fn textures_enabled(&self) -> bool {
        self.textures_enabled
    }

    /// Set the world-space edge length of one texture tile.
    pub fn set_texture_tiling(&mut self, edge_length: f32) {
        self.texture_tiling = edge_length;
    }

    /// Buffered point entries.
    pub fn point_count(&self) -> usize {
        self.points.vertex_count()
    }

    /// Buffered line endpoints (two per segment).
    pub fn line_count(&self) -> usize {
        self.lines.vertex_count()
    }

    /// Buffered triangle vertices (three per triangle).
    pub fn triangle_count(&self) -> usize {
        self.triangles.vertex_count()
    }

    /// Drain every batch into a frame: triangles, then lines, then points.
    ///
    /// Each chunk becomes one pass (one backend draw call). The batches are
    /// empty afterwards and ready for the next simulation step.
    pub fn take_frame(&mut self) -> Frame {
        let mut passes = Vec::new();
        for chunk in self.triangles.take_chunks() {
            passes.push(DrawPass::Triangles(chunk));
        }
        for chunk in self.lines.take_chunks() {
            passes.push(DrawPass::Lines(chunk));
        }
        for chunk in self.points.take_chunks() {
            passes.push(DrawPass::Points(chunk));
        }
        Frame { passes }
    }

    // -- vertex helpers -----------------------------------------------------

    fn line(&mut self, a: Vec2, b: Vec2, color: Color) {
        let color = color.to_array();
        self.lines.push(LineVertex {
            position: a.to_array(),
            color,
        });
        self.lines.push(LineVertex {
            position: b.to_array(),
            color,
        });
    }

    fn triangle(&mut self, a: Vec2, b: Vec2, c: Vec2, color: Color) {
        let color = color.to_array();
        for p in [a, b, c] {
            self.triangles.push(TriangleVertex {
                position: p.to_array(),
                color,
                tex_coord: [0.0, 0.0],
                material: UNTEXTURED,
            });
        }
    }

    fn textured_triangle(&mut self, corners: [Vec2; 3], color: Color, material: u32) {
        let color = color.to_array();
        for p in corners {
            let tex_coord = self.tex_coord(p);
            self.triangles.push(TriangleVertex {
                position: p.to_array(),
                color,
                tex_coord,
                material: material as i32,
            });
        }
    }

    /// Texture coordinate for a world position: tiled every
    /// `texture_tiling` world units.
    fn tex_coord(&self, p: Vec2) -> [f32; 2] {
        [p.x / self.texture_tiling, p.y / self.texture_tiling]
    }

    /// Closed outline through `vertices`, last back to first.
    fn outline(&mut self, vertices: &[Vec2], color: Color) {
        let mut prev = vertices[vertices.len() - 1];
        for &next in vertices {
            self.line(prev, next, color);
            prev = next;
        }
    }

    fn fill_color(&self, color: Color) -> Color {
        if self.debug_overlay {
            color.faded(OVERLAY_FADE)
        } else {
            color
        }
    }

    fn circle_step() -> Rot2 {
        Rot2::from_angle(std::f32::consts::TAU / CIRCLE_SEGMENTS as f32)
    }

    /// Outline ring of a circle via incremental rotation.
    fn circle_ring(&mut self, center: Vec2, radius: f32, color: Color) {
        let step = Self::circle_step();
        let mut r1 = Vec2::X;
        let mut v1 = center + radius * r1;
        for _ in 0..CIRCLE_SEGMENTS {
            let r2 = step.rotate(r1);
            let v2 = center + radius * r2;
            self.line(v1, v2, color);
            r1 = r2;
            v1 = v2;
        }
    }
}

impl DebugDraw for DebugRenderer {
    fn draw_polygon(&mut self, vertices: &[Vec2], color: Color) {
        if vertices.len() < 3 {
            return;
        }
        self.outline(vertices, color);
    }

    fn draw_solid_polygon(&mut self, vertices: &[Vec2], color: Color) {
        if vertices.len() < 3 {
            return;
        }
        let fill = self.fill_color(color);
        for i in 1..vertices.len() - 1 {
            self.triangle(vertices[0], vertices[i], vertices[i + 1], fill);
        }
        if self.debug_overlay {
            self.outline(vertices, color);
        }
    }

    fn draw_textured_polygon(&mut self, vertices: &[Vec2], color: Color, material: u32) {
        if !self.textures_enabled {
            return self.draw_solid_polygon(vertices, color);
        }
        if vertices.len() < 3 {
            return;
        }
        let fill = self.fill_color(color);
        for i in 1..vertices.len() - 1 {
            self.textured_triangle([vertices[0], vertices[i], vertices[i + 1]], fill, material);
        }
        if self.debug_overlay {
            self.outline(vertices, color);
        }
    }

    fn draw_circle(&mut self, center: Vec2, radius: f32, color: Color) {
        self.circle_ring(center, radius, color);
    }

    fn draw_solid_circle(&mut self, center: Vec2, radius: f32, axis: Vec2, color: Color) {
        let step = Self::circle_step();
        let fill = self.fill_color(color);
        let mut r1 = Vec2::X;
        let mut v1 = center + radius * r1;
        for _ in 0..CIRCLE_SEGMENTS {
            let r2 = step.rotate(r1);
            let v2 = center + radius * r2;
            self.triangle(center, v1, v2, fill);
            r1 = r2;
            v1 = v2;
        }

        if self.debug_overlay {
            self.circle_ring(center, radius, color);
            // Body-fixed radius line so rotation is visible.
            self.line(center, center + radius * axis, color);
        }
    }

    fn draw_textured_circle(
        &mut self,
        center: Vec2,
        radius: f32,
        axis: Vec2,
        color: Color,
        material: u32,
    ) {
        if !self.textures_enabled {
            return self.draw_solid_circle(center, radius, axis, color);
        }
        let step = Self::circle_step();
        let fill = self.fill_color(color);
        let mut r1 = Vec2::X;
        let mut v1 = center + radius * r1;
        for _ in 0..CIRCLE_SEGMENTS {
            let r2 = step.rotate(r1);
            let v2 = center + radius * r2;
            self.textured_triangle([center, v1, v2], fill, material);
            r1 = r2;
            v1 = v2;
        }
        // Textures hide the silhouette, so the ring is always drawn.
        self.circle_ring(center, radius, color);
    }

    fn draw_segment(&mut self, a: Vec2, b: Vec2, color: Color) {
        self.line(a, b, color);
    }

    fn draw_transform(&mut self, transform: Transform2) {
        let origin = transform.position;
        self.line(
            origin,
            origin + AXIS_SCALE * transform.rotation.x_axis(),
            Color::RED,
        );
        self.line(
            origin,
            origin + AXIS_SCALE * transform.rotation.y_axis(),
            Color::GREEN,
        );
    }

    fn draw_point(&mut self, position: Vec2, size: f32, color: Color) {
        self.points.push(PointVertex {
            position: position.to_array(),
            color: color.to_array(),
            size,
        });
    }

    fn draw_aabb(&mut self, aabb: Aabb, color: Color) {
        let corners = [
            aabb.min,
            Vec2::new(aabb.max.x, aabb.min.y),
            aabb.max,
            Vec2::new(aabb.min.x, aabb.max.y),
        ];
        self.outline(&corners, color);
    }
}
