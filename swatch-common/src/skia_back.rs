// Copyright 2024 the Swatch Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Support for the tiny-skia backend.

#[cfg(feature = "png")]
use png::{ColorType, Encoder};
#[cfg(feature = "png")]
use std::fs::File;
#[cfg(feature = "png")]
use std::io::BufWriter;
use std::path::Path;

use swatch::{Error, FactoryConfig, Image, ImageFactory};
#[doc(hidden)]
pub use swatch_skia::*;

/// The `RenderContext` of the selected backend.
pub type SwatchContext = SkiaRenderContext;

/// An image factory drawing with the selected backend.
pub type Factory = ImageFactory<SkiaBackend>;

/// Create a factory for the selected backend.
pub fn factory(config: FactoryConfig) -> Factory {
    ImageFactory::new(SkiaBackend::new(), config)
}

/// Save an image to an RGBA PNG file.
///
/// The file holds the image's pixels; its scale is not recorded.
#[cfg(feature = "png")]
pub fn save_to_file<P: AsRef<Path>>(image: &Image, path: P) -> Result<(), Error> {
    let (width, height) = image.pixel_size();
    if width == 0 || height == 0 {
        return Err(Error::InvalidSize(image.size()));
    }
    let (Ok(width), Ok(height)) = (u32::try_from(width), u32::try_from(height)) else {
        return Err(Error::InvalidSize(image.size()));
    };
    let data = image.buf().to_rgba_separate();
    let file = BufWriter::new(File::create(path.as_ref()).map_err(Into::<Box<_>>::into)?);
    let mut encoder = Encoder::new(file, width, height);
    encoder.set_color(ColorType::Rgba);
    encoder.set_depth(png::BitDepth::Eight);
    encoder
        .write_header()
        .map_err(Into::<Box<_>>::into)?
        .write_image_data(&data)
        .map_err(Into::<Box<_>>::into)?;
    tracing::debug!(path = %path.as_ref().display(), width, height, "saved image");
    Ok(())
}

/// Stub for feature is missing
#[cfg(not(feature = "png"))]
pub fn save_to_file<P: AsRef<Path>>(_image: &Image, _path: P) -> Result<(), Error> {
    Err(Error::NotSupported)
}
