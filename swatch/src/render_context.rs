// Copyright 2024 the Swatch Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! The drawing traits a raster backend implements.

use kurbo::{Rect, Shape};

use crate::{Color, Error, FixedLinearGradient, ImageBuf};

/// A paint source for fills.
#[derive(Clone, Debug, PartialEq)]
pub enum Brush {
    Solid(Color),
    Linear(FixedLinearGradient),
}

/// How newly drawn pixels combine with what is already in the bitmap.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub enum BlendMode {
    /// Draw on top, the usual mode.
    #[default]
    SourceOver,
    /// Keep the new color only where the destination is covered, with the
    /// destination's alpha.
    SourceIn,
    /// Erase the destination where the new pixels are opaque.
    DestinationOut,
}

/// How an image is sampled when drawn at a different size.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum InterpolationMode {
    /// Don't interpolate, use nearest neighbor.
    NearestNeighbor,
    /// Use bilinear interpolation.
    Bilinear,
}

/// A bitmap drawing context.
///
/// Coordinates are in points. The context maps them to pixels using the
/// scale it was created with, and starts out fully transparent with no clip
/// and [`BlendMode::SourceOver`].
pub trait RenderContext {
    /// Clear the whole bitmap to the given color, ignoring clip and blend mode.
    fn clear(&mut self, color: Color);

    /// Fill a shape.
    fn fill(&mut self, shape: impl Shape, brush: &Brush);

    /// Restrict subsequent drawing to the inside of the shape.
    ///
    /// Clips accumulate: the result is the intersection with any earlier clip.
    fn clip(&mut self, shape: impl Shape);

    /// Set the blend mode for subsequent drawing.
    fn set_blend_mode(&mut self, mode: BlendMode);

    /// Draw an image, scaled to fill `dst_rect`.
    fn draw_image(
        &mut self,
        image: &ImageBuf,
        dst_rect: impl Into<Rect>,
        interp: InterpolationMode,
    ) {
        let src_rect = Rect::new(0.0, 0.0, image.width() as f64, image.height() as f64);
        self.draw_image_area(image, src_rect, dst_rect, interp);
    }

    /// Draw the part of an image given by `src_rect` (in image pixels),
    /// scaled to fill `dst_rect`.
    fn draw_image_area(
        &mut self,
        image: &ImageBuf,
        src_rect: impl Into<Rect>,
        dst_rect: impl Into<Rect>,
        interp: InterpolationMode,
    );

    /// Save the clip and blend mode.
    fn save(&mut self) -> Result<(), Error>;

    /// Restore the state last saved with [`save`].
    ///
    /// Returns [`Error::StackUnbalance`] without a matching save.
    ///
    /// [`save`]: RenderContext::save
    fn restore(&mut self) -> Result<(), Error>;

    /// Run `f` between a [`save`] and a [`restore`].
    ///
    /// [`save`]: RenderContext::save
    /// [`restore`]: RenderContext::restore
    fn with_save(&mut self, f: impl FnOnce(&mut Self) -> Result<(), Error>) -> Result<(), Error>
    where
        Self: Sized,
    {
        self.save()?;
        let result = f(self);
        self.restore().and(result)
    }

    /// Finish drawing and capture the bitmap.
    fn finish(self) -> Result<ImageBuf, Error>;
}

/// Something that can create bitmap contexts.
pub trait Backend {
    type Context: RenderContext;

    /// Create a transparent bitmap of `width` by `height` pixels, drawn in
    /// points at `pix_scale` pixels per point.
    fn bitmap_context(
        &mut self,
        width: usize,
        height: usize,
        pix_scale: f64,
    ) -> Result<Self::Context, Error>;
}
