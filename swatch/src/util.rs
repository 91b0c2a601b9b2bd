// Copyright 2024 the Swatch Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Code useful for multiple backends

use kurbo::Size;

/// Multiply a color component by an alpha value, both as bytes.
#[inline]
pub fn premul(x: u8, a: u8) -> u8 {
    let y = (x as u16) * (a as u16);
    ((y + (y >> 8) + 0x80) >> 8) as u8
}

/// Divide a premultiplied color component by its alpha value.
#[inline]
pub fn unpremul(x: u8, a: u8) -> u8 {
    if a == 0 {
        0
    } else {
        let y = ((x as u32) * 255 + (a as u32) / 2) / (a as u32);
        y.min(255) as u8
    }
}

/// Converts an image buffer with separate alpha to premultiplied alpha, in place.
pub fn premultiply_rgba(data: &mut [u8]) {
    for pixel in data.chunks_exact_mut(4) {
        let a = pixel[3];
        if a != 255 {
            for c in &mut pixel[..3] {
                *c = premul(*c, a);
            }
        }
    }
}

/// Converts an image buffer with premultiplied alpha to separate alpha, in place.
pub fn unpremultiply_rgba(data: &mut [u8]) {
    for pixel in data.chunks_exact_mut(4) {
        let a = pixel[3];
        if a != 0 && a != 255 {
            for c in &mut pixel[..3] {
                *c = unpremul(*c, a);
            }
        }
    }
}

/// Whether a size can back a bitmap: both sides finite and strictly positive.
pub fn is_drawable_size(size: Size) -> bool {
    size.width.is_finite() && size.height.is_finite() && size.width > 0.0 && size.height > 0.0
}

/// The pixel dimensions needed to cover `size` points at `scale`.
pub fn pixel_size(size: Size, scale: f64) -> (usize, usize) {
    (to_pixels(size.width * scale), to_pixels(size.height * scale))
}

/// `size` grown to the whole-pixel extent of the bitmap that backs it.
pub fn snap_size(size: Size, scale: f64) -> Size {
    let (width, height) = pixel_size(size, scale);
    Size::new(width as f64 / scale, height as f64 / scale)
}

fn to_pixels(x: f64) -> usize {
    // Sizes computed back from pixels (e.g. 20px / 3.0 * 3.0) can land a hair
    // above the integer they came from.
    let nearest = x.round();
    let px = if (x - nearest).abs() < 1e-6 { nearest } else { x.ceil() };
    px.max(1.0) as usize
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn premul_extremes() {
        assert_eq!(premul(255, 255), 255);
        assert_eq!(premul(255, 0), 0);
        assert_eq!(premul(0, 255), 0);
        assert_eq!(premul(255, 128), 128);
    }

    #[test]
    fn unpremultiply_inverts_premultiply_for_opaque_and_clear() {
        let mut data = vec![10, 20, 30, 255, 0, 0, 0, 0, 128, 64, 0, 128];
        unpremultiply_rgba(&mut data);
        assert_eq!(&data[..8], &[10, 20, 30, 255, 0, 0, 0, 0]);
        assert_eq!(&data[8..], &[255, 128, 0, 128]);
        premultiply_rgba(&mut data);
        assert_eq!(&data[8..], &[128, 64, 0, 128]);
    }

    #[test]
    fn pixel_size_rounds_up() {
        assert_eq!(pixel_size(Size::new(10.0, 10.0), 2.0), (20, 20));
        assert_eq!(pixel_size(Size::new(10.5, 0.2), 1.0), (11, 1));
        assert_eq!(pixel_size(Size::new(20.0 / 3.0, 1.0), 3.0), (20, 3));
        assert!(!is_drawable_size(Size::new(0.0, 3.0)));
        assert!(!is_drawable_size(Size::new(f64::NAN, 3.0)));
        assert!(is_drawable_size(Size::new(0.5, 3.0)));
    }

    #[test]
    fn snapped_size_covers_whole_pixels() {
        assert_eq!(snap_size(Size::new(4.0, 2.5), 2.0), Size::new(4.0, 2.5));
        let snapped = snap_size(Size::new(3.0, 3.0), 1.5);
        assert_eq!(pixel_size(snapped, 1.5), (5, 5));
        assert!(snapped.width > 3.0 && snapped.height > 3.0);
    }
}
