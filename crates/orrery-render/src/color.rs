//! RGBA color with the conversions the debug renderer needs.

/// An RGBA color, each channel in `[0, 1]`.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Color {
    pub r: f32,
    pub g: f32,
    pub b: f32,
    pub a: f32,
}

impl Color {
    pub const WHITE: Color = Color::rgb(1.0, 1.0, 1.0);

    /// First transform axis.
    pub const RED: Color = Color::rgb(1.0, 0.0, 0.0);

    /// Second transform axis.
    pub const GREEN: Color = Color::rgb(0.0, 1.0, 0.0);

    pub const fn rgba(r: f32, g: f32, b: f32, a: f32) -> Color {
        Color { r, g, b, a }
    }

    /// Opaque color from RGB channels.
    pub const fn rgb(r: f32, g: f32, b: f32) -> Color {
        Color::rgba(r, g, b, 1.0)
    }

    /// Scale every channel, alpha included.
    ///
    /// Used by the debug overlay to dim fills so outlines stay readable on
    /// top of them.
    pub fn faded(self, factor: f32) -> Color {
        Color::rgba(
            self.r * factor,
            self.g * factor,
            self.b * factor,
            self.a * factor,
        )
    }

    /// Convert from HSLA, hue in degrees, the encoding the physics engine's
    /// debug-render pipeline emits.
    pub fn from_hsla(hsla: [f32; 4]) -> Color {
        let [h, s, l, a] = hsla;
        let c = (1.0 - (2.0 * l - 1.0).abs()) * s;
        let hp = (h / 60.0).rem_euclid(6.0);
        let x = c * (1.0 - (hp % 2.0 - 1.0).abs());
        let (r, g, b) = match hp as u32 {
            0 => (c, x, 0.0),
            1 => (x, c, 0.0),
            2 => (0.0, c, x),
            3 => (0.0, x, c),
            4 => (x, 0.0, c),
            _ => (c, 0.0, x),
        };
        let m = l - c / 2.0;
        Color::rgba(r + m, g + m, b + m, a)
    }

    pub fn to_array(self) -> [f32; 4] {
        [self.r, self.g, self.b, self.a]
    }
}
