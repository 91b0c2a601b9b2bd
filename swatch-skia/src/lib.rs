// Copyright 2024 the Swatch Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! The tiny-skia backend for swatch.
//!
//! Everything is drawn on the CPU into a premultiplied RGBA [`Pixmap`], so
//! the backend has no state of its own and works the same on every platform.

use std::fmt;

use swatch::kurbo::{PathEl, Rect, Shape};
use swatch::{
    util, Backend, BlendMode, Brush, Color, Error, FixedLinearGradient, ImageBuf, ImageFormat,
    InterpolationMode, RenderContext,
};
use tiny_skia::{
    FillRule, FilterQuality, Mask, Paint, PathBuilder, Pattern, Pixmap, PixmapRef, Shader,
    SpreadMode, Transform,
};

/// Tolerance used when flattening shapes into tiny-skia paths.
const PATH_TOLERANCE: f64 = 1e-3;

/// Creates [`SkiaRenderContext`]s.
///
/// Being a software renderer, no state is needed.
#[derive(Clone, Copy, Debug, Default)]
pub struct SkiaBackend;

impl SkiaBackend {
    pub fn new() -> SkiaBackend {
        SkiaBackend
    }
}

impl Backend for SkiaBackend {
    type Context = SkiaRenderContext;

    fn bitmap_context(
        &mut self,
        width: usize,
        height: usize,
        pix_scale: f64,
    ) -> Result<SkiaRenderContext, Error> {
        SkiaRenderContext::new(width, height, pix_scale)
    }
}

#[derive(Clone, Default)]
struct State {
    clip: Option<Mask>,
    blend_mode: BlendMode,
}

/// A drawing context backed by a tiny-skia [`Pixmap`].
pub struct SkiaRenderContext {
    pixmap: Pixmap,
    /// Maps points to pixels.
    transform: Transform,
    state: State,
    stack: Vec<State>,
}

#[derive(Debug)]
struct WrappedError(String);

impl fmt::Display for WrappedError {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "tiny-skia error: {}", self.0)
    }
}

impl std::error::Error for WrappedError {}

fn backend_error(msg: impl Into<String>) -> Error {
    Error::BackendError(Box::new(WrappedError(msg.into())))
}

impl SkiaRenderContext {
    /// Create a transparent context of `width` by `height` pixels.
    pub fn new(width: usize, height: usize, pix_scale: f64) -> Result<SkiaRenderContext, Error> {
        let (w, h) = match (u32::try_from(width), u32::try_from(height)) {
            (Ok(w), Ok(h)) => (w, h),
            _ => return Err(Error::InvalidInput),
        };
        let pixmap = Pixmap::new(w, h)
            .ok_or_else(|| backend_error(format!("cannot allocate a {width}x{height} pixmap")))?;
        tracing::trace!(width, height, pix_scale, "new bitmap context");
        let scale = pix_scale as f32;
        Ok(SkiaRenderContext {
            pixmap,
            transform: Transform::from_scale(scale, scale),
            state: State::default(),
            stack: Vec::new(),
        })
    }

    /// The pixels drawn so far.
    pub fn pixmap(&self) -> &Pixmap {
        &self.pixmap
    }

    fn paint(&self, brush: &Brush) -> Option<Paint<'static>> {
        let mut paint = Paint {
            anti_alias: true,
            blend_mode: convert_blend_mode(self.state.blend_mode),
            ..Paint::default()
        };
        match brush {
            Brush::Solid(color) => paint.set_color(convert_color(*color)),
            Brush::Linear(gradient) => paint.shader = linear_shader(gradient)?,
        }
        Some(paint)
    }

    /// Whether `ts`, applied after the context transform, maps image pixels
    /// onto device pixels one to one.
    fn is_pixel_aligned(&self, ts: Transform) -> bool {
        let device = self.transform.pre_concat(ts);
        device.kx == 0.0
            && device.ky == 0.0
            && device.sx == 1.0
            && device.sy == 1.0
            && device.tx.fract() == 0.0
            && device.ty.fract() == 0.0
    }
}

impl RenderContext for SkiaRenderContext {
    fn clear(&mut self, color: Color) {
        self.pixmap.fill(convert_color(color));
    }

    fn fill(&mut self, shape: impl Shape, brush: &Brush) {
        let Some(path) = convert_path(&shape) else {
            return;
        };
        let Some(paint) = self.paint(brush) else {
            tracing::debug!("skipping fill with a degenerate gradient");
            return;
        };
        self.pixmap.fill_path(
            &path,
            &paint,
            FillRule::Winding,
            self.transform,
            self.state.clip.as_ref(),
        );
    }

    fn clip(&mut self, shape: impl Shape) {
        let Some(mut mask) = Mask::new(self.pixmap.width(), self.pixmap.height()) else {
            return;
        };
        // An empty path leaves the mask empty, which clips everything.
        if let Some(path) = convert_path(&shape) {
            mask.fill_path(&path, FillRule::Winding, true, self.transform);
        }
        if let Some(previous) = &self.state.clip {
            for (coverage, prev) in mask.data_mut().iter_mut().zip(previous.data()) {
                *coverage = util::premul(*coverage, *prev);
            }
        }
        self.state.clip = Some(mask);
    }

    fn set_blend_mode(&mut self, mode: BlendMode) {
        self.state.blend_mode = mode;
    }

    fn draw_image_area(
        &mut self,
        image: &ImageBuf,
        src_rect: impl Into<Rect>,
        dst_rect: impl Into<Rect>,
        interp: InterpolationMode,
    ) {
        let (src, dst) = (src_rect.into().abs(), dst_rect.into().abs());
        if src.area() <= 0.0 || dst.area() <= 0.0 {
            return;
        }
        let (Ok(width), Ok(height)) = (u32::try_from(image.width()), u32::try_from(image.height()))
        else {
            return;
        };
        let Some(pixmap) = PixmapRef::from_bytes(image.raw_pixels(), width, height) else {
            return;
        };
        let Some(rect) = tiny_skia::Rect::from_ltrb(
            dst.x0 as f32,
            dst.y0 as f32,
            dst.x1 as f32,
            dst.y1 as f32,
        ) else {
            return;
        };

        // Image pixels to points: `src` lands exactly on `dst`.
        let sx = dst.width() / src.width();
        let sy = dst.height() / src.height();
        let ts = Transform::from_row(
            sx as f32,
            0.0,
            0.0,
            sy as f32,
            (dst.x0 - src.x0 * sx) as f32,
            (dst.y0 - src.y0 * sy) as f32,
        );
        let quality = if self.is_pixel_aligned(ts) {
            FilterQuality::Nearest
        } else {
            match interp {
                InterpolationMode::NearestNeighbor => FilterQuality::Nearest,
                InterpolationMode::Bilinear => FilterQuality::Bilinear,
            }
        };
        let paint = Paint {
            shader: Pattern::new(pixmap, SpreadMode::Pad, quality, 1.0, ts),
            blend_mode: convert_blend_mode(self.state.blend_mode),
            anti_alias: true,
            ..Paint::default()
        };
        self.pixmap
            .fill_rect(rect, &paint, self.transform, self.state.clip.as_ref());
    }

    fn save(&mut self) -> Result<(), Error> {
        self.stack.push(self.state.clone());
        Ok(())
    }

    fn restore(&mut self) -> Result<(), Error> {
        self.state = self.stack.pop().ok_or(Error::StackUnbalance)?;
        Ok(())
    }

    fn finish(self) -> Result<ImageBuf, Error> {
        if !self.stack.is_empty() {
            return Err(Error::StackUnbalance);
        }
        let width = self.pixmap.width() as usize;
        let height = self.pixmap.height() as usize;
        Ok(ImageBuf::from_raw(
            self.pixmap.take(),
            ImageFormat::RgbaPremul,
            width,
            height,
        ))
    }
}

fn convert_color(color: Color) -> tiny_skia::Color {
    let (r, g, b, a) = color.as_rgba8();
    tiny_skia::Color::from_rgba8(r, g, b, a)
}

fn convert_blend_mode(mode: BlendMode) -> tiny_skia::BlendMode {
    match mode {
        BlendMode::SourceOver => tiny_skia::BlendMode::SourceOver,
        BlendMode::SourceIn => tiny_skia::BlendMode::SourceIn,
        BlendMode::DestinationOut => tiny_skia::BlendMode::DestinationOut,
    }
}

fn linear_shader(gradient: &FixedLinearGradient) -> Option<Shader<'static>> {
    let stops = gradient
        .stops
        .iter()
        .map(|stop| tiny_skia::GradientStop::new(stop.pos, convert_color(stop.color)))
        .collect();
    tiny_skia::LinearGradient::new(
        tiny_skia::Point::from_xy(gradient.start.x as f32, gradient.start.y as f32),
        tiny_skia::Point::from_xy(gradient.end.x as f32, gradient.end.y as f32),
        stops,
        SpreadMode::Pad,
        Transform::identity(),
    )
}

fn convert_path(shape: &impl Shape) -> Option<tiny_skia::Path> {
    let mut builder = PathBuilder::new();
    for el in shape.path_elements(PATH_TOLERANCE) {
        match el {
            PathEl::MoveTo(p) => builder.move_to(p.x as f32, p.y as f32),
            PathEl::LineTo(p) => builder.line_to(p.x as f32, p.y as f32),
            PathEl::QuadTo(p1, p2) => {
                builder.quad_to(p1.x as f32, p1.y as f32, p2.x as f32, p2.y as f32)
            }
            PathEl::CurveTo(p1, p2, p3) => builder.cubic_to(
                p1.x as f32,
                p1.y as f32,
                p2.x as f32,
                p2.y as f32,
                p3.x as f32,
                p3.y as f32,
            ),
            PathEl::ClosePath => builder.close(),
        }
    }
    builder.finish()
}
