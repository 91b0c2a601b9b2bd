// Copyright 2024 the Swatch Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

use std::sync::Arc;

use swatch_common::kurbo::Rect;
use static_assertions::assert_impl_all;
use swatch_common::*;

assert_impl_all!(Image: Send, Sync, Clone);
assert_impl_all!(ImageBuf: Send, Sync, Clone);
assert_impl_all!(Error: Send, Sync);
assert_impl_all!(Factory: Send, Sync);

fn with_context(cb: impl FnOnce(&mut SwatchContext) -> Result<(), Error>) -> ImageBuf {
    let mut backend = SkiaBackend::new();
    let mut ctx = backend.bitmap_context(8, 8, 1.0).unwrap();
    let res = cb(&mut ctx);
    let buf = ctx.finish().unwrap();
    if let Err(e) = res {
        panic!("{}", e)
    }
    buf
}

#[test]
fn restore_without_save_is_an_error() {
    with_context(|ctx| {
        assert!(matches!(ctx.restore(), Err(Error::StackUnbalance)));
        ctx.save()?;
        ctx.restore()
    });
}

#[test]
fn clear_ignores_the_clip() {
    let buf = with_context(|ctx| {
        ctx.clip(Rect::new(0.0, 0.0, 1.0, 1.0));
        ctx.clear(Color::BLACK);
        Ok(())
    });
    assert_eq!(buf.pixel(7, 7), Some([0, 0, 0, 255]));
}

#[test]
fn empty_image_should_not_panic() {
    with_context(|ctx| {
        let dst = Rect::new(0.0, 0.0, 8.0, 8.0);
        ctx.draw_image(&ImageBuf::empty(), dst, InterpolationMode::Bilinear);
        let one = ImageBuf::from_raw(&[0u8, 0, 0, 0][..], ImageFormat::RgbaSeparate, 1, 1);
        ctx.draw_image(&one, Rect::new(0.0, 0.0, 0.0, 0.0), InterpolationMode::Bilinear);
        ctx.draw_image_area(
            &one,
            Rect::new(0.0, 0.0, 0.0, 0.0),
            Rect::new(0.0, 0.0, 1.0, 1.0),
            InterpolationMode::Bilinear,
        );
        Ok(())
    });
}

#[test]
fn invalid_scale_falls_back_to_one() {
    let f = factory(FactoryConfig::default().with_scale(0.0));
    assert_eq!(f.scale(), 1.0);
    let f = factory(FactoryConfig::default().with_scale(f64::INFINITY));
    assert_eq!(f.scale(), 1.0);
}

#[test]
fn default_config() {
    let config = FactoryConfig::default();
    assert_eq!(config.scale, 1.0);
    assert_eq!(config.eviction, EvictionPolicy::lru(DEFAULT_CACHE_CAPACITY));
    let f = factory(config);
    assert_eq!(f.cache().policy(), config.eviction);
}

#[test]
fn lru_policy_bounds_the_cache() {
    let config = FactoryConfig::default().with_eviction(EvictionPolicy::lru(2));
    let mut f = factory(config);
    let first = f.image_with_color(Color::BLACK, (2.0, 2.0)).unwrap();
    f.image_with_color(Color::WHITE, (2.0, 2.0)).unwrap();
    f.image_with_color(Color::TRANSPARENT, (2.0, 2.0)).unwrap();
    assert_eq!(f.cache().len(), 2);

    let again = f.image_with_color(Color::BLACK, (2.0, 2.0)).unwrap();
    assert!(!Arc::ptr_eq(&first, &again));
    assert_eq!(first.buf(), again.buf());
}

#[test]
fn clearing_the_cache_keeps_handed_out_images() {
    let mut f = factory(FactoryConfig::default());
    let image = f.image_with_color(Color::WHITE, (3.0, 3.0)).unwrap();
    f.clear_cache();
    assert!(f.cache().is_empty());
    assert_eq!(image.buf().pixel(2, 2), Some([255, 255, 255, 255]));
}
