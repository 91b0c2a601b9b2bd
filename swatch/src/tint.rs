// Copyright 2024 the Swatch Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Rules for recoloring an image.

use kurbo::Rect;

use crate::{BlendMode, Brush, Color, Error, Image, InterpolationMode, RenderContext};

/// Which pixels of a source image a tint color is applied to.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum TintStyle {
    /// Recolor every visible pixel, keeping the source alpha.
    ///
    /// Fully transparent pixels stay transparent.
    KeepingAlpha,
    /// Put the color underneath the source.
    ///
    /// The tint shows through wherever the source is not fully opaque;
    /// opaque pixels keep their own color.
    OverAlpha,
    /// Like [`OverAlpha`], but fully opaque source pixels are punched out
    /// and become transparent.
    ///
    /// [`OverAlpha`]: TintStyle::OverAlpha
    OverAlphaExtreme,
}

impl TintStyle {
    /// Draw `image` tinted with `color` into `rect` of the context.
    pub fn draw(
        self,
        rc: &mut impl RenderContext,
        image: &Image,
        color: Color,
        rect: Rect,
    ) -> Result<(), Error> {
        let fill = Brush::Solid(color);
        match self {
            TintStyle::KeepingAlpha => {
                rc.draw_image(image.buf(), rect, InterpolationMode::Bilinear);
                rc.with_save(|rc| {
                    rc.set_blend_mode(BlendMode::SourceIn);
                    rc.fill(rect, &fill);
                    Ok(())
                })
            }
            TintStyle::OverAlpha => {
                rc.fill(rect, &fill);
                rc.draw_image(image.buf(), rect, InterpolationMode::Bilinear);
                Ok(())
            }
            TintStyle::OverAlphaExtreme => {
                rc.fill(rect, &fill);
                rc.with_save(|rc| {
                    rc.set_blend_mode(BlendMode::DestinationOut);
                    rc.draw_image(image.buf(), rect, InterpolationMode::Bilinear);
                    Ok(())
                })
            }
        }
    }
}
