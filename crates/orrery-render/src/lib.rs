//! Orrery Render -- batched debug-draw layer for a 2D physics testbed.
//!
//! The physics engine asks for shapes (polygons, circles, segments, points)
//! through the [`DebugDraw`](draw::DebugDraw) capability set; the
//! [`DebugRenderer`](draw::DebugRenderer) tessellates each shape into one of
//! three primitive batches (triangles, lines, points) and hands complete
//! frames to a backend. The CPU side is GPU-free and fully testable; the
//! wgpu backend lives behind the `gpu` feature, mirroring how the engine it
//! grew out of gates its renderer.
//!
//! # Quick Start
//!
//! ```
//! use orrery_render::prelude::*;
//!
//! let mut renderer = DebugRenderer::new();
//! renderer.draw_circle(Vec2::new(0.0, 2.0), 0.5, Color::WHITE);
//! renderer.draw_segment(Vec2::ZERO, Vec2::new(1.0, 0.0), Color::GREEN);
//!
//! let frame = renderer.take_frame();
//! assert!(!frame.is_empty());
//! ```
//!
//! With the `gpu` feature, [`gpu::GpuRenderer`] renders frames offscreen and
//! can stream them out as numbered PNG files for an external encoder.

#![deny(unsafe_code)]

pub mod batch;
pub mod camera;
pub mod color;
pub mod draw;
pub mod math;
pub mod rapier;
pub mod vertex;

#[cfg(feature = "gpu")]
pub mod gpu;

// ---------------------------------------------------------------------------
// Prelude
// ---------------------------------------------------------------------------

/// Convenience re-exports for common rendering usage.
pub mod prelude {
    pub use crate::camera::Camera;
    pub use crate::color::Color;
    pub use crate::draw::{DebugDraw, DebugRenderer, DrawPass, Frame};
    pub use crate::math::{Aabb, Rot2, Transform2, Vec2};
    pub use crate::rapier::PhysicsDebugBackend;

    #[cfg(feature = "gpu")]
    pub use crate::gpu::{GpuRenderer, RenderConfig, RenderError};
}
