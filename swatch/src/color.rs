// Copyright 2024 the Swatch Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! A simple representation of color

/// A datatype representing color.
///
/// A 32 bit RGBA value with separate (not premultiplied) alpha. Being a plain
/// integer, it is `Eq` and `Hash`, so it can take part in cache keys.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum Color {
    Rgba32(u32),
}

impl Color {
    /// Create a color from a 32-bit rgba value (alpha as least significant byte).
    pub const fn rgba32(rgba: u32) -> Color {
        Color::Rgba32(rgba)
    }

    /// Create a color from a 24-bit rgb value (red most significant, blue least).
    pub const fn rgb24(rgb: u32) -> Color {
        Color::rgba32((rgb << 8) | 0xff)
    }

    /// Create a color from four 8-bit components.
    pub const fn rgba8(r: u8, g: u8, b: u8, a: u8) -> Color {
        Color::rgba32(((r as u32) << 24) | ((g as u32) << 16) | ((b as u32) << 8) | (a as u32))
    }

    /// Create an opaque color from three 8-bit components.
    pub const fn rgb8(r: u8, g: u8, b: u8) -> Color {
        Color::rgba8(r, g, b, 0xff)
    }

    /// Create a color from four floating point values, each in the range 0.0 to 1.0.
    ///
    /// Values outside the range are clamped.
    pub fn rgba<F: Into<f64>>(r: F, g: F, b: F, a: F) -> Color {
        Color::rgba8(
            unit_to_byte(r.into()),
            unit_to_byte(g.into()),
            unit_to_byte(b.into()),
            unit_to_byte(a.into()),
        )
    }

    /// Create an opaque color from three floating point values, each in the range 0.0 to 1.0.
    pub fn rgb<F: Into<f64>>(r: F, g: F, b: F) -> Color {
        Color::rgb8(
            unit_to_byte(r.into()),
            unit_to_byte(g.into()),
            unit_to_byte(b.into()),
        )
    }

    /// Change just the alpha value of a color.
    ///
    /// The `a` value represents alpha in the range 0.0 to 1.0.
    pub fn with_alpha(self, a: impl Into<f64>) -> Color {
        let a = unit_to_byte(a.into()) as u32;
        Color::rgba32((self.as_rgba_u32() & !0xff) | a)
    }

    /// Convert a color value to a 32-bit rgba value.
    pub const fn as_rgba_u32(self) -> u32 {
        match self {
            Color::Rgba32(rgba) => rgba,
        }
    }

    /// Split the color into its 8-bit `(r, g, b, a)` components.
    pub const fn as_rgba8(self) -> (u8, u8, u8, u8) {
        let rgba = self.as_rgba_u32();
        (
            (rgba >> 24) as u8,
            (rgba >> 16) as u8,
            (rgba >> 8) as u8,
            rgba as u8,
        )
    }

    /// The color as premultiplied `[r, g, b, a]` bytes, the layout of an `ImageBuf` pixel.
    pub fn to_premul_rgba8(self) -> [u8; 4] {
        let (r, g, b, a) = self.as_rgba8();
        [
            crate::util::premul(r, a),
            crate::util::premul(g, a),
            crate::util::premul(b, a),
            a,
        ]
    }

    /// Opaque white.
    pub const WHITE: Color = Color::rgba32(0xff_ff_ff_ff);

    /// Opaque black.
    pub const BLACK: Color = Color::rgba32(0x00_00_00_ff);

    /// Fully transparent.
    pub const TRANSPARENT: Color = Color::rgba32(0);
}

fn unit_to_byte(x: f64) -> u8 {
    (x.clamp(0.0, 1.0) * 255.0).round() as u8
}
