// Copyright 2024 the Swatch Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

use swatch_common::kurbo::Size;
use swatch_common::*;

const RED: Color = Color::rgb8(255, 0, 0);
const OPAQUE_RED: [u8; 4] = [255, 0, 0, 255];
const OPAQUE_WHITE: [u8; 4] = [255, 255, 255, 255];

fn solid(f: &mut Factory, color: Color, size: f64) -> Image {
    Image::clone(&f.image_with_color(color, (size, size)).unwrap())
}

#[test]
fn overlay_is_centered() {
    let mut f = factory(FactoryConfig::default());
    let background = solid(&mut f, Color::WHITE, 10.0);
    let overlay = solid(&mut f, RED, 4.0);
    let composite = f.image_adding_image(&background, &overlay).unwrap();
    assert_eq!(composite.size(), Size::new(10.0, 10.0));
    let buf = composite.buf();
    assert_eq!(buf.pixel(2, 2), Some(OPAQUE_WHITE));
    assert_eq!(buf.pixel(3, 3), Some(OPAQUE_RED));
    assert_eq!(buf.pixel(6, 6), Some(OPAQUE_RED));
    assert_eq!(buf.pixel(7, 7), Some(OPAQUE_WHITE));
}

#[test]
fn odd_offset_rounds_down() {
    let mut f = factory(FactoryConfig::default());
    let background = solid(&mut f, Color::WHITE, 10.0);
    let overlay = solid(&mut f, RED, 3.0);
    let composite = f.image_adding_image(&background, &overlay).unwrap();
    let buf = composite.buf();
    assert_eq!(buf.pixel(2, 2), Some(OPAQUE_WHITE));
    assert_eq!(buf.pixel(3, 3), Some(OPAQUE_RED));
    assert_eq!(buf.pixel(5, 5), Some(OPAQUE_RED));
    assert_eq!(buf.pixel(6, 6), Some(OPAQUE_WHITE));
}

#[test]
fn overlay_outside_the_background_is_cut_off() {
    let mut f = factory(FactoryConfig::default());
    let background = solid(&mut f, Color::WHITE, 10.0);
    let overlay = solid(&mut f, RED, 4.0);
    let composite = f
        .image_adding_image_at(&background, &overlay, (8.0, 8.0))
        .unwrap();
    assert_eq!(composite.pixel_size(), (10, 10));
    let buf = composite.buf();
    assert_eq!(buf.pixel(7, 7), Some(OPAQUE_WHITE));
    assert_eq!(buf.pixel(9, 9), Some(OPAQUE_RED));
}

#[test]
fn result_uses_the_background_scale() {
    let mut retina = factory(FactoryConfig::default().with_scale(2.0));
    let background = solid(&mut retina, Color::WHITE, 10.0);
    let mut f = factory(FactoryConfig::default());
    let overlay = solid(&mut f, RED, 4.0);

    let composite = f.image_adding_image(&background, &overlay).unwrap();
    assert_eq!(composite.scale(), 2.0);
    assert_eq!(composite.pixel_size(), (20, 20));
    let buf = composite.buf();
    // The overlay covers points 3..7, which is pixels 6..14.
    assert_eq!(buf.pixel(4, 4), Some(OPAQUE_WHITE));
    let [r, g, b, a] = buf.pixel(10, 10).unwrap();
    assert!(r >= 254 && g <= 1 && b <= 1 && a >= 254);
}

#[test]
fn rounded_bounds_make_a_capsule() {
    let mut f = factory(FactoryConfig::default());
    let source = Image::clone(&f.image_with_color(RED, (20.0, 10.0)).unwrap());
    let capsule = f.image_with_rounded_bounds(&source).unwrap();
    let buf = capsule.buf();
    assert_eq!(buf.pixel(0, 0), Some([0, 0, 0, 0]));
    assert_eq!(buf.pixel(19, 9), Some([0, 0, 0, 0]));
    assert_eq!(buf.pixel(10, 0), Some(OPAQUE_RED));
    assert_eq!(buf.pixel(10, 5), Some(OPAQUE_RED));
}

#[test]
fn corner_radius_must_fit_the_image() {
    let mut f = factory(FactoryConfig::default());
    let source = solid(&mut f, RED, 10.0);
    assert!(f.image_with_corner_radius(&source, 5.0).is_ok());
    assert!(matches!(
        f.image_with_corner_radius(&source, 5.5),
        Err(Error::InvalidCornerInset { .. })
    ));
    let inset = CornerInset::new(10.0, 0.0, 0.0, 0.0);
    assert!(f.image_with_corner_inset(&source, inset).is_ok());
}
