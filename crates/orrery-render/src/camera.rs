//! 2D orthographic camera.

use crate::math::Vec2;

/// Maps a rectangle of world space onto clip space `[-1, 1]`.
///
/// The matrix is column-major, ready for a uniform upload. Z passes through
/// untouched; depth is unused in this renderer.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Camera {
    /// World-space center of the view.
    pub center: Vec2,
    /// Visible width in world units.
    pub width: f32,
    /// Visible height in world units.
    pub height: f32,
}

impl Camera {
    pub fn new(center: Vec2, width: f32, height: f32) -> Camera {
        Camera {
            center,
            width,
            height,
        }
    }

    /// Column-major orthographic projection matrix.
    pub fn matrix(&self) -> [f32; 16] {
        let sx = 2.0 / self.width;
        let sy = 2.0 / self.height;
        let tx = -2.0 * self.center.x / self.width;
        let ty = -2.0 * self.center.y / self.height;

        #[rustfmt::skip]
        let m = [
            sx,  0.0, 0.0, 0.0,
            0.0, sy,  0.0, 0.0,
            0.0, 0.0, 1.0, 0.0,
            tx,  ty,  0.0, 1.0,
        ];
        m
    }
}

impl Default for Camera {
    /// A 40 x 30 world-unit view centered a little above the origin, which
    /// frames a typical tabletop physics scene.
    fn default() -> Self {
        Camera::new(Vec2::new(0.0, 10.0), 40.0, 30.0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn project(m: &[f32; 16], p: Vec2) -> (f32, f32) {
        (m[0] * p.x + m[12], m[5] * p.y + m[13])
    }

    #[test]
    fn center_maps_to_clip_origin() {
        let cam = Camera::new(Vec2::new(3.0, -2.0), 20.0, 10.0);
        let m = cam.matrix();
        let (x, y) = project(&m, cam.center);
        assert!(x.abs() < 1e-6);
        assert!(y.abs() < 1e-6);
    }

    #[test]
    fn edges_map_to_unit_clip() {
        let cam = Camera::new(Vec2::new(3.0, -2.0), 20.0, 10.0);
        let m = cam.matrix();

        let (left, _) = project(&m, Vec2::new(-7.0, 0.0));
        let (right, _) = project(&m, Vec2::new(13.0, 0.0));
        let (_, bottom) = project(&m, Vec2::new(0.0, -7.0));
        let (_, top) = project(&m, Vec2::new(0.0, 3.0));

        assert!((left + 1.0).abs() < 1e-6);
        assert!((right - 1.0).abs() < 1e-6);
        assert!((bottom + 1.0).abs() < 1e-6);
        assert!((top - 1.0).abs() < 1e-6);
    }

    #[test]
    fn z_column_is_identity() {
        let m = Camera::default().matrix();
        assert!((m[10] - 1.0).abs() < 1e-6);
        assert!((m[15] - 1.0).abs() < 1e-6);
    }
}
