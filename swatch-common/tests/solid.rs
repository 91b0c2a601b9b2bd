// Copyright 2024 the Swatch Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

use std::sync::Arc;

use swatch_common::kurbo::{Insets, Size};
use swatch_common::*;

const RED: Color = Color::rgb8(255, 0, 0);
const OPAQUE_RED: [u8; 4] = [255, 0, 0, 255];
const CLEAR: [u8; 4] = [0, 0, 0, 0];

fn with_factory(scale: f64, cb: impl FnOnce(&mut Factory) -> Result<(), Error>) {
    let mut factory = factory(FactoryConfig::default().with_scale(scale));
    if let Err(e) = cb(&mut factory) {
        panic!("{}", e)
    }
}

#[test]
fn solid_color_fills_every_pixel() {
    with_factory(1.0, |f| {
        let image = f.image_with_color(RED, (10.0, 6.0))?;
        assert_eq!(image.pixel_size(), (10, 6));
        assert!(!image.is_resizable());
        let buf = image.buf();
        for y in 0..6 {
            for x in 0..10 {
                assert_eq!(buf.pixel(x, y), Some(OPAQUE_RED), "pixel {x},{y}");
            }
        }
        Ok(())
    })
}

#[test]
fn size_is_scaled_to_pixels() {
    with_factory(3.0, |f| {
        let image = f.image_with_color(RED, (10.0, 5.0))?;
        assert_eq!(image.pixel_size(), (30, 15));
        assert_eq!(image.size(), Size::new(10.0, 5.0));
        assert_eq!(image.scale(), 3.0);
        Ok(())
    })
}

#[test]
fn fractional_pixel_size_is_filled_to_the_edge() {
    with_factory(1.5, |f| {
        let image = f.image_with_color(RED, (3.0, 3.0))?;
        assert_eq!(image.pixel_size(), (5, 5));
        assert!(image.size().width >= 3.0 && image.size().height >= 3.0);
        let buf = image.buf();
        for y in 0..5 {
            for x in 0..5 {
                assert_eq!(buf.pixel(x, y), Some(OPAQUE_RED), "pixel {x},{y}");
            }
        }

        let source = f.resizable_image_with_color(RED)?;
        let stretched = f.stretched_image(&source, (3.0, 3.0))?;
        assert_eq!(stretched.pixel_size(), (5, 5));
        assert_eq!(stretched.buf().pixel(4, 4), Some(OPAQUE_RED));
        Ok(())
    })
}

#[test]
fn rounded_corners_are_transparent() {
    with_factory(1.0, |f| {
        let image = f.image_with_color_and_radius(RED, (20.0, 20.0), 10.0)?;
        let buf = image.buf();
        for (x, y) in [(0, 0), (19, 0), (0, 19), (19, 19)] {
            assert_eq!(buf.pixel(x, y), Some(CLEAR), "corner {x},{y}");
        }
        assert_eq!(buf.pixel(10, 10), Some(OPAQUE_RED));
        assert_eq!(buf.pixel(10, 2), Some(OPAQUE_RED));
        Ok(())
    })
}

#[test]
fn only_the_rounded_corner_is_cut() {
    with_factory(1.0, |f| {
        let inset = CornerInset::new(8.0, 0.0, 0.0, 0.0);
        let image = f.image_with_color_and_inset(RED, (16.0, 16.0), inset)?;
        let buf = image.buf();
        assert_eq!(buf.pixel(0, 0), Some(CLEAR));
        assert_eq!(buf.pixel(15, 0), Some(OPAQUE_RED));
        assert_eq!(buf.pixel(0, 15), Some(OPAQUE_RED));
        assert_eq!(buf.pixel(15, 15), Some(OPAQUE_RED));
        Ok(())
    })
}

#[test]
fn same_request_returns_same_image() {
    with_factory(2.0, |f| {
        let a = f.image_with_color_and_radius(RED, (40.0, 40.0), 8.0)?;
        let b = f.image_with_color_and_inset(RED, (40.0, 40.0), CornerInset::uniform(8.0))?;
        assert!(Arc::ptr_eq(&a, &b));
        let c = f.image_with_color_and_radius(Color::BLACK, (40.0, 40.0), 8.0)?;
        assert!(!Arc::ptr_eq(&a, &c));
        let d = f.image_with_color_and_radius(RED, (40.0, 41.0), 8.0)?;
        assert!(!Arc::ptr_eq(&a, &d));
        assert_eq!(f.cache().len(), 3);
        Ok(())
    })
}

#[test]
fn oversized_inset_is_rejected() {
    let mut f = factory(FactoryConfig::default());
    let result = f.image_with_color_and_radius(RED, (10.0, 10.0), 6.0);
    assert!(matches!(result, Err(Error::InvalidCornerInset { .. })));
    let negative = CornerInset::new(-1.0, 0.0, 0.0, 0.0);
    let result = f.image_with_color_and_inset(RED, (10.0, 10.0), negative);
    assert!(matches!(result, Err(Error::InvalidCornerInset { .. })));
    assert!(f.cache().is_empty());
}

#[test]
fn empty_size_is_rejected() {
    let mut f = factory(FactoryConfig::default());
    assert!(matches!(
        f.image_with_color(RED, (0.0, 10.0)),
        Err(Error::InvalidSize(_))
    ));
    assert!(matches!(
        f.image_with_color(RED, (10.0, f64::NAN)),
        Err(Error::InvalidSize(_))
    ));
}

#[test]
fn resizable_image_is_minimal() {
    with_factory(1.0, |f| {
        let inset = CornerInset::new(4.0, 2.0, 0.0, 6.0);
        let image = f.resizable_image_with_color_and_inset(RED, inset)?;
        assert_eq!(image.size(), Size::new(4.0 + 6.0 + 1.0, 4.0 + 6.0 + 1.0));
        assert_eq!(image.cap_insets(), Some(Insets::new(4.0, 4.0, 6.0, 6.0)));

        let plain = f.resizable_image_with_color(RED)?;
        assert_eq!(plain.size(), Size::new(1.0, 1.0));
        assert_eq!(plain.cap_insets(), Some(Insets::ZERO));

        let again = f.resizable_image_with_color_and_inset(RED, inset)?;
        assert!(Arc::ptr_eq(&image, &again));
        Ok(())
    })
}

#[test]
fn stretching_keeps_the_corners() {
    with_factory(1.0, |f| {
        let source = f.resizable_image_with_color_and_radius(RED, 4.0)?;
        let stretched = f.stretched_image(&source, (40.0, 20.0))?;
        assert_eq!(stretched.pixel_size(), (40, 20));
        assert_eq!(stretched.cap_insets(), source.cap_insets());

        let (src, dst) = (source.buf(), stretched.buf());
        let corners = [
            (0, 0, 0, 0),
            (1, 2, 1, 2),
            (8, 0, 39, 0),
            (0, 8, 0, 19),
            (8, 8, 39, 19),
        ];
        for (sx, sy, dx, dy) in corners {
            assert_eq!(src.pixel(sx, sy), dst.pixel(dx, dy), "pixel {dx},{dy}");
        }
        assert_eq!(dst.pixel(20, 10), Some(OPAQUE_RED));
        assert_eq!(dst.pixel(20, 0), Some(OPAQUE_RED));
        Ok(())
    })
}

#[test]
fn stretching_below_the_caps_fails() {
    with_factory(1.0, |f| {
        let source = f.resizable_image_with_color_and_radius(RED, 4.0)?;
        assert!(matches!(
            f.stretched_image(&source, (6.0, 20.0)),
            Err(Error::InvalidSize(_))
        ));
        Ok(())
    })
}

#[test]
fn plain_images_stretch_as_a_whole() {
    with_factory(1.0, |f| {
        let source = f.image_with_color(RED, (2.0, 2.0))?;
        let stretched = f.stretched_image(&source, (10.0, 4.0))?;
        assert_eq!(stretched.pixel_size(), (10, 4));
        assert!(!stretched.is_resizable());
        // Bilinear sampling may be off by one.
        let [r, g, b, a] = stretched.buf().pixel(5, 2).unwrap();
        assert!(r >= 254 && g == 0 && b == 0 && a >= 254);
        Ok(())
    })
}
