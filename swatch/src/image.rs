// Copyright 2024 the Swatch Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Pixel buffers and the images built from them.

use std::sync::Arc;

use kurbo::{Insets, Size};

use crate::{util, CornerInset};

/// The layout of raw RGBA pixel data handed to [`ImageBuf::from_raw`].
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ImageFormat {
    /// 8 bits per channel, color not multiplied by alpha.
    RgbaSeparate,
    /// 8 bits per channel, color already multiplied by alpha.
    RgbaPremul,
}

/// An in-memory bitmap: premultiplied RGBA, 8 bits per channel, no row padding.
#[derive(Clone, PartialEq, Eq)]
pub struct ImageBuf {
    pixels: Arc<[u8]>,
    width: usize,
    height: usize,
}

impl ImageBuf {
    /// Create an empty image buffer.
    pub fn empty() -> ImageBuf {
        ImageBuf {
            pixels: Arc::<[u8]>::from(Vec::new()),
            width: 0,
            height: 0,
        }
    }

    /// Create a new image buffer from raw pixels.
    ///
    /// # Panics
    ///
    /// Panics if `pixels` is not exactly `width * height * 4` bytes long.
    pub fn from_raw(
        pixels: impl Into<Vec<u8>>,
        format: ImageFormat,
        width: usize,
        height: usize,
    ) -> ImageBuf {
        let mut pixels = pixels.into();
        assert_eq!(pixels.len(), width * height * 4);
        if format == ImageFormat::RgbaSeparate {
            util::premultiply_rgba(&mut pixels);
        }
        ImageBuf {
            pixels: pixels.into(),
            width,
            height,
        }
    }

    /// The width in pixels.
    pub fn width(&self) -> usize {
        self.width
    }

    /// The height in pixels.
    pub fn height(&self) -> usize {
        self.height
    }

    /// The premultiplied pixel data, row by row.
    pub fn raw_pixels(&self) -> &[u8] {
        &self.pixels
    }

    /// The premultiplied `[r, g, b, a]` of one pixel.
    ///
    /// Returns `None` outside the buffer.
    pub fn pixel(&self, x: usize, y: usize) -> Option<[u8; 4]> {
        if x >= self.width || y >= self.height {
            return None;
        }
        let off = (y * self.width + x) * 4;
        let px = &self.pixels[off..off + 4];
        Some([px[0], px[1], px[2], px[3]])
    }

    /// A copy of the pixel data with separate alpha, as image files expect.
    pub fn to_rgba_separate(&self) -> Vec<u8> {
        let mut data = self.pixels.to_vec();
        util::unpremultiply_rgba(&mut data);
        data
    }
}

impl std::fmt::Debug for ImageBuf {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ImageBuf")
            .field("width", &self.width)
            .field("height", &self.height)
            .finish_non_exhaustive()
    }
}

/// A bitmap together with its pixel density, and optionally the insets that
/// make it resizable.
#[derive(Clone, Debug, PartialEq)]
pub struct Image {
    buf: ImageBuf,
    scale: f64,
    cap_insets: Option<Insets>,
}

impl Image {
    /// Wrap a buffer rendered at `scale` pixels per point.
    pub fn new(buf: ImageBuf, scale: f64) -> Image {
        Image {
            buf,
            scale,
            cap_insets: None,
        }
    }

    /// Mark this image as resizable, keeping the given insets (in points)
    /// unscaled when it is stretched.
    pub fn with_cap_insets(mut self, insets: Insets) -> Image {
        self.cap_insets = Some(insets);
        self
    }

    /// The underlying pixels.
    pub fn buf(&self) -> &ImageBuf {
        &self.buf
    }

    /// Pixels per point.
    pub fn scale(&self) -> f64 {
        self.scale
    }

    /// The size in points.
    pub fn size(&self) -> Size {
        Size::new(
            self.buf.width() as f64 / self.scale,
            self.buf.height() as f64 / self.scale,
        )
    }

    /// The size in pixels.
    pub fn pixel_size(&self) -> (usize, usize) {
        (self.buf.width(), self.buf.height())
    }

    /// The cap insets, if this is a resizable image.
    pub fn cap_insets(&self) -> Option<Insets> {
        self.cap_insets
    }

    pub fn is_resizable(&self) -> bool {
        self.cap_insets.is_some()
    }

    /// Returns `true` if `inset` fits this image's size.
    pub fn is_valid_corner_inset(&self, inset: CornerInset) -> bool {
        inset.is_valid_for(self.size())
    }
}
