//! GPU-ready vertex formats for the three primitive batches.
//!
//! All three are `Pod` so whole chunks upload with a single
//! `bytemuck::cast_slice`, matching how the engine's renderer ships its
//! vertex data.

/// Flush threshold for the point batch, in entries.
pub const POINT_BATCH_CAPACITY: usize = 512;

/// Flush threshold for the line batch, in endpoints (two per segment).
pub const LINE_BATCH_CAPACITY: usize = 2 * 512;

/// Flush threshold for the triangle batch, in vertices (three per triangle).
pub const TRIANGLE_BATCH_CAPACITY: usize = 3 * 512;

/// Material index marking an untextured triangle vertex.
pub const UNTEXTURED: i32 = -1;

/// One screen-sized marker.
#[repr(C)]
#[derive(Copy, Clone, Debug, PartialEq, bytemuck_derive::Pod, bytemuck_derive::Zeroable)]
pub struct PointVertex {
    /// World position.
    pub position: [f32; 2],
    /// RGBA color.
    pub color: [f32; 4],
    /// On-screen size in pixels.
    pub size: f32,
}

/// One endpoint of a line segment.
#[repr(C)]
#[derive(Copy, Clone, Debug, PartialEq, bytemuck_derive::Pod, bytemuck_derive::Zeroable)]
pub struct LineVertex {
    /// World position.
    pub position: [f32; 2],
    /// RGBA color.
    pub color: [f32; 4],
}

/// One corner of a filled triangle.
#[repr(C)]
#[derive(Copy, Clone, Debug, PartialEq, bytemuck_derive::Pod, bytemuck_derive::Zeroable)]
pub struct TriangleVertex {
    /// World position.
    pub position: [f32; 2],
    /// RGBA color; modulates the texture when one is selected.
    pub color: [f32; 4],
    /// Texture coordinate, world position over the tiling edge length.
    pub tex_coord: [f32; 2],
    /// Texture layer to sample, or [`UNTEXTURED`].
    pub material: i32,
}
