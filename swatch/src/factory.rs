// Copyright 2024 the Swatch Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Producing derived images, with memoization.

use std::sync::Arc;

use kurbo::{Insets, Point, Rect, Size};

use crate::{
    util, AssetSource, Backend, Brush, Color, CornerInset, Error, EvictionPolicy,
    GradientDirection, Image, ImageCache, ImageKey, InterpolationMode, RenderContext, TintStyle,
};

/// Settings for an [`ImageFactory`].
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct FactoryConfig {
    /// Pixels per point of the images the factory synthesizes.
    pub scale: f64,
    /// How the factory's cache drops entries.
    pub eviction: EvictionPolicy,
}

impl FactoryConfig {
    /// A builder-style method for changing the pixel density.
    pub fn with_scale(mut self, scale: f64) -> Self {
        self.scale = scale;
        self
    }

    /// A builder-style method for changing the cache policy.
    pub fn with_eviction(mut self, eviction: EvictionPolicy) -> Self {
        self.eviction = eviction;
        self
    }
}

impl Default for FactoryConfig {
    fn default() -> Self {
        FactoryConfig {
            scale: 1.0,
            eviction: EvictionPolicy::default(),
        }
    }
}

/// Makes derived images with a [`Backend`] and remembers them.
///
/// Images synthesized from a description alone (solid colors, gradients,
/// named assets and their tints) are cached: asking twice for the same thing
/// returns the same `Arc`. Operations on an image the caller passes in
/// return a fresh [`Image`] each time.
///
/// Sizes, radii and offsets are in points. Synthesized images use the
/// configured scale; images derived from another image keep its scale. A
/// size that does not land on whole pixels is grown to the next pixel, and
/// the returned image is filled out to that edge.
pub struct ImageFactory<B: Backend> {
    backend: B,
    cache: ImageCache,
    assets: Option<Box<dyn AssetSource>>,
    scale: f64,
}

impl<B: Backend> ImageFactory<B> {
    pub fn new(backend: B, config: FactoryConfig) -> Self {
        let scale = if config.scale.is_finite() && config.scale > 0.0 {
            config.scale
        } else {
            tracing::warn!(scale = config.scale, "invalid pixel scale, using 1.0");
            1.0
        };
        ImageFactory {
            backend,
            cache: ImageCache::new(config.eviction),
            assets: None,
            scale,
        }
    }

    /// A builder-style method for setting where named images come from.
    pub fn with_assets(mut self, assets: impl AssetSource + 'static) -> Self {
        self.set_assets(assets);
        self
    }

    /// Set where named images come from.
    ///
    /// This does not clear images already cached under a name.
    pub fn set_assets(&mut self, assets: impl AssetSource + 'static) {
        self.assets = Some(Box::new(assets));
    }

    /// Pixels per point of synthesized images.
    pub fn scale(&self) -> f64 {
        self.scale
    }

    pub fn cache(&self) -> &ImageCache {
        &self.cache
    }

    pub fn clear_cache(&mut self) {
        self.cache.clear();
    }

    /// A rectangle of solid color.
    pub fn image_with_color(
        &mut self,
        color: Color,
        size: impl Into<Size>,
    ) -> Result<Arc<Image>, Error> {
        self.image_with_color_and_inset(color, size, CornerInset::ZERO)
    }

    /// A rounded rectangle of solid color, with the same radius at each corner.
    pub fn image_with_color_and_radius(
        &mut self,
        color: Color,
        size: impl Into<Size>,
        radius: f64,
    ) -> Result<Arc<Image>, Error> {
        self.image_with_color_and_inset(color, size, CornerInset::uniform(radius))
    }

    /// A rounded rectangle of solid color.
    ///
    /// Fails with [`Error::InvalidCornerInset`] if the radii do not fit `size`.
    pub fn image_with_color_and_inset(
        &mut self,
        color: Color,
        size: impl Into<Size>,
        inset: CornerInset,
    ) -> Result<Arc<Image>, Error> {
        let size = size.into();
        check_size(size)?;
        check_inset(inset, size)?;
        let key = ImageKey::Solid {
            color,
            size: size.into(),
            inset: inset.into(),
        };
        self.cached(key, |this| {
            let scale = this.scale;
            // Cover every pixel of the bitmap, including a partial last one.
            let drawn = util::snap_size(size, scale);
            let rect = drawn.to_rect();
            this.render(drawn, scale, |rc| {
                if !inset.is_zero() {
                    rc.clip(inset.to_path(rect));
                }
                rc.fill(rect, &Brush::Solid(color));
                Ok(())
            })
        })
    }

    /// The smallest stretchable image of a solid color.
    pub fn resizable_image_with_color(&mut self, color: Color) -> Result<Arc<Image>, Error> {
        self.resizable_image_with_color_and_inset(color, CornerInset::ZERO)
    }

    /// The smallest stretchable rounded rectangle with the same radius at each corner.
    pub fn resizable_image_with_color_and_radius(
        &mut self,
        color: Color,
        radius: f64,
    ) -> Result<Arc<Image>, Error> {
        self.resizable_image_with_color_and_inset(color, CornerInset::uniform(radius))
    }

    /// The smallest stretchable rounded rectangle.
    ///
    /// The image is just large enough to hold every corner plus one point of
    /// flat interior, and its cap insets cover the corners, so stretching it
    /// with [`stretched_image`] only scales the flat parts.
    ///
    /// [`stretched_image`]: ImageFactory::stretched_image
    pub fn resizable_image_with_color_and_inset(
        &mut self,
        color: Color,
        inset: CornerInset,
    ) -> Result<Arc<Image>, Error> {
        let size = inset.resizable_size();
        check_inset(inset, size)?;
        let key = ImageKey::ResizableSolid {
            color,
            inset: inset.into(),
        };
        self.cached(key, |this| {
            let image = this.image_with_color_and_inset(color, size, inset)?;
            Ok(Image::clone(&image).with_cap_insets(inset.cap_insets()))
        })
    }

    /// Draw `image` at `size`.
    ///
    /// A resizable image is drawn as nine slices: the corners at their own
    /// size, the edges stretched along their length and the middle stretched
    /// both ways. Any other image is scaled as a whole.
    pub fn stretched_image(
        &mut self,
        image: &Image,
        size: impl Into<Size>,
    ) -> Result<Image, Error> {
        let size = size.into();
        check_size(size)?;
        let scale = image.scale();
        let drawn = util::snap_size(size, scale);
        let Some(caps) = image.cap_insets() else {
            return self.render(drawn, scale, |rc| {
                rc.draw_image(image.buf(), drawn.to_rect(), InterpolationMode::Bilinear);
                Ok(())
            });
        };
        if caps.x_value() > size.width || caps.y_value() > size.height {
            tracing::debug!(?caps, ?size, "target is smaller than the image caps");
            return Err(Error::InvalidSize(size));
        }
        let src = image.size();
        let src_xs = [0.0, caps.x0, src.width - caps.x1, src.width];
        let src_ys = [0.0, caps.y0, src.height - caps.y1, src.height];
        let dst_xs = [0.0, caps.x0, drawn.width - caps.x1, drawn.width];
        let dst_ys = [0.0, caps.y0, drawn.height - caps.y1, drawn.height];
        let stretched = self.render(drawn, scale, |rc| {
            for row in 0..3 {
                for col in 0..3 {
                    let src_rect =
                        Rect::new(src_xs[col], src_ys[row], src_xs[col + 1], src_ys[row + 1]);
                    let dst_rect =
                        Rect::new(dst_xs[col], dst_ys[row], dst_xs[col + 1], dst_ys[row + 1]);
                    if src_rect.area() <= 0.0 || dst_rect.area() <= 0.0 {
                        continue;
                    }
                    rc.draw_image_area(
                        image.buf(),
                        src_rect.scale_from_origin(scale),
                        dst_rect,
                        InterpolationMode::NearestNeighbor,
                    );
                }
            }
            Ok(())
        })?;
        Ok(stretched.with_cap_insets(caps))
    }

    /// Recolor `image` according to `style`.
    pub fn tinted_image(
        &mut self,
        image: &Image,
        color: Color,
        style: TintStyle,
    ) -> Result<Image, Error> {
        let rect = image.size().to_rect();
        let tinted = self.render_like(image, |rc| style.draw(rc, image, color, rect))?;
        Ok(match image.cap_insets() {
            Some(caps) => tinted.with_cap_insets(caps),
            None => tinted,
        })
    }

    /// Look up a named image in the asset source.
    ///
    /// Fails with [`Error::MissingImage`] if there is no asset source or it
    /// has no image by that name.
    pub fn image_named(&mut self, name: &str) -> Result<Arc<Image>, Error> {
        let key = ImageKey::Named {
            name: name.to_owned(),
        };
        self.cached(key, |this| this.load_asset(name))
    }

    /// A named image, tinted.
    pub fn image_named_tinted(
        &mut self,
        name: &str,
        color: Color,
        style: TintStyle,
    ) -> Result<Arc<Image>, Error> {
        let key = ImageKey::Tinted {
            name: name.to_owned(),
            color,
            style,
        };
        self.cached(key, |this| {
            let source = this.image_named(name)?;
            this.tinted_image(&source, color, style)
        })
    }

    /// Clip `image` to a circle or capsule: the radius is half its shorter side.
    pub fn image_with_rounded_bounds(&mut self, image: &Image) -> Result<Image, Error> {
        let size = image.size();
        let radius = size.width.min(size.height) / 2.0;
        self.image_with_corner_inset(image, CornerInset::uniform(radius))
    }

    /// Round the corners of `image`, with the same radius at each corner.
    pub fn image_with_corner_radius(&mut self, image: &Image, radius: f64) -> Result<Image, Error> {
        self.image_with_corner_inset(image, CornerInset::uniform(radius))
    }

    /// Round the corners of `image`.
    ///
    /// Fails with [`Error::InvalidCornerInset`] if the radii do not fit the image.
    pub fn image_with_corner_inset(
        &mut self,
        image: &Image,
        inset: CornerInset,
    ) -> Result<Image, Error> {
        check_inset(inset, image.size())?;
        let rect = image.size().to_rect();
        self.render_like(image, |rc| {
            if !inset.is_zero() {
                rc.clip(inset.to_path(rect));
            }
            rc.draw_image(image.buf(), rect, InterpolationMode::Bilinear);
            Ok(())
        })
    }

    /// Draw `overlay` centered on `background`.
    ///
    /// The offset is rounded down to whole points.
    pub fn image_adding_image(
        &mut self,
        background: &Image,
        overlay: &Image,
    ) -> Result<Image, Error> {
        let (bg, fg) = (background.size(), overlay.size());
        let offset = Point::new(
            ((bg.width - fg.width) / 2.0).floor(),
            ((bg.height - fg.height) / 2.0).floor(),
        );
        self.image_adding_image_at(background, overlay, offset)
    }

    /// Draw `overlay` on `background` with its top-left corner at `offset`.
    ///
    /// The result has the size and scale of the background; whatever part of
    /// the overlay falls outside is cut off.
    pub fn image_adding_image_at(
        &mut self,
        background: &Image,
        overlay: &Image,
        offset: impl Into<Point>,
    ) -> Result<Image, Error> {
        let bg_rect = background.size().to_rect();
        let fg_rect = Rect::from_origin_size(offset.into(), overlay.size());
        self.render_like(background, |rc| {
            rc.draw_image(background.buf(), bg_rect, InterpolationMode::Bilinear);
            rc.draw_image(overlay.buf(), fg_rect, InterpolationMode::Bilinear);
            Ok(())
        })
    }

    /// A linear gradient through `colors`, evenly spaced, along `direction`.
    ///
    /// A single color gives a solid fill. Fails with [`Error::EmptyGradient`]
    /// if `colors` is empty.
    pub fn image_with_gradient(
        &mut self,
        colors: &[Color],
        size: impl Into<Size>,
        direction: GradientDirection,
    ) -> Result<Arc<Image>, Error> {
        let size = size.into();
        check_size(size)?;
        check_colors(colors)?;
        let key = ImageKey::Gradient {
            colors: colors.to_vec(),
            size: size.into(),
            direction,
        };
        self.cached(key, |this| {
            let scale = this.scale;
            let drawn = util::snap_size(size, scale);
            let rect = drawn.to_rect();
            let brush = match colors {
                [color] => Brush::Solid(*color),
                _ => Brush::Linear(direction.gradient(colors).resolve(rect)),
            };
            this.render(drawn, scale, |rc| {
                rc.fill(rect, &brush);
                Ok(())
            })
        })
    }

    /// The smallest stretchable image of a gradient that should span `size`.
    ///
    /// Vertical gradients are one point wide and horizontal ones one point
    /// high; slanted gradients cannot be reduced and keep the full size. Only
    /// the extent along the gradient axis has to be positive.
    pub fn resizable_image_with_gradient(
        &mut self,
        colors: &[Color],
        size: impl Into<Size>,
        direction: GradientDirection,
    ) -> Result<Arc<Image>, Error> {
        let size = size.into();
        check_colors(colors)?;
        let patch = match direction {
            GradientDirection::Vertical => Size::new(1.0, size.height),
            GradientDirection::Horizontal => Size::new(size.width, 1.0),
            GradientDirection::LeftSlanted | GradientDirection::RightSlanted => size,
        };
        check_size(patch).map_err(|_| Error::InvalidSize(size))?;
        let key = ImageKey::ResizableGradient {
            colors: colors.to_vec(),
            size: patch.into(),
            direction,
        };
        self.cached(key, |this| {
            let image = this.image_with_gradient(colors, patch, direction)?;
            Ok(Image::clone(&image).with_cap_insets(Insets::ZERO))
        })
    }

    fn cached(
        &mut self,
        key: ImageKey,
        make: impl FnOnce(&mut Self) -> Result<Image, Error>,
    ) -> Result<Arc<Image>, Error> {
        if let Some(image) = self.cache.get(&key) {
            return Ok(image);
        }
        let image = Arc::new(make(self)?);
        self.cache.insert(key, Arc::clone(&image));
        Ok(image)
    }

    fn load_asset(&self, name: &str) -> Result<Image, Error> {
        let found = match &self.assets {
            Some(assets) => assets.load(name, self.scale)?,
            None => None,
        };
        found.ok_or_else(|| {
            tracing::debug!(name, "no image with this name");
            Error::MissingImage(name.to_owned())
        })
    }

    /// Draw into a new bitmap covering `size` points at `scale`.
    fn render(
        &mut self,
        size: Size,
        scale: f64,
        draw: impl FnOnce(&mut B::Context) -> Result<(), Error>,
    ) -> Result<Image, Error> {
        let (width, height) = util::pixel_size(size, scale);
        self.render_pixels(width, height, scale, draw)
    }

    /// Draw into a new bitmap with the pixel size and scale of `image`.
    fn render_like(
        &mut self,
        image: &Image,
        draw: impl FnOnce(&mut B::Context) -> Result<(), Error>,
    ) -> Result<Image, Error> {
        let (width, height) = image.pixel_size();
        if width == 0 || height == 0 {
            return Err(Error::InvalidSize(image.size()));
        }
        self.render_pixels(width, height, image.scale(), draw)
    }

    fn render_pixels(
        &mut self,
        width: usize,
        height: usize,
        scale: f64,
        draw: impl FnOnce(&mut B::Context) -> Result<(), Error>,
    ) -> Result<Image, Error> {
        let mut rc = self.backend.bitmap_context(width, height, scale)?;
        draw(&mut rc)?;
        Ok(Image::new(rc.finish()?, scale))
    }
}

fn check_size(size: Size) -> Result<(), Error> {
    if util::is_drawable_size(size) {
        Ok(())
    } else {
        tracing::debug!(width = size.width, height = size.height, "size cannot back a bitmap");
        Err(Error::InvalidSize(size))
    }
}

fn check_inset(inset: CornerInset, size: Size) -> Result<(), Error> {
    if inset.is_valid_for(size) {
        Ok(())
    } else {
        tracing::debug!(
            %inset,
            width = size.width,
            height = size.height,
            "corner inset does not fit"
        );
        Err(Error::InvalidCornerInset { inset, size })
    }
}

fn check_colors(colors: &[Color]) -> Result<(), Error> {
    if colors.is_empty() {
        tracing::debug!("gradient requested without colors");
        Err(Error::EmptyGradient)
    } else {
        Ok(())
    }
}
