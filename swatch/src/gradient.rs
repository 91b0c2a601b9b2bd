// Copyright 2024 the Swatch Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Gradient descriptions.

use kurbo::{Point, Rect};

use crate::Color;

/// Description of a linear gradient in image-space coordinates.
///
/// Use [`LinearGradient`] to describe one relative to the rectangle being
/// filled, and resolve it once the rectangle is known.
#[derive(Debug, Clone, PartialEq)]
pub struct FixedLinearGradient {
    /// Where `pos` 0.0 lands.
    pub start: Point,
    /// Where `pos` 1.0 lands.
    pub end: Point,
    /// A single stop paints a solid color.
    pub stops: Vec<GradientStop>,
}

/// A single gradient stop.
#[derive(Clone, Debug, PartialEq)]
pub struct GradientStop {
    /// Position along the axis, 0.0 at the start and 1.0 at the end.
    pub pos: f32,
    pub color: Color,
}

/// A linear gradient not yet placed on a rectangle.
#[derive(Debug, Clone)]
pub struct LinearGradient {
    start: UnitPoint,
    end: UnitPoint,
    stops: Vec<GradientStop>,
}

/// A point in a rectangle's own coordinates: (0, 0) is its top-left corner
/// and (1, 1) its bottom-right.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct UnitPoint {
    u: f64,
    v: f64,
}

/// The axis a generated gradient runs along.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum GradientDirection {
    /// Top edge to bottom edge.
    Vertical,
    /// Left edge to right edge.
    Horizontal,
    /// Top-left corner to bottom-right corner.
    LeftSlanted,
    /// Top-right corner to bottom-left corner.
    RightSlanted,
}

/// Stops for `colors`, spread evenly from 0.0 to 1.0.
fn even_stops(colors: &[Color]) -> Vec<GradientStop> {
    let denom = colors.len().saturating_sub(1).max(1) as f32;
    colors
        .iter()
        .enumerate()
        .map(|(i, c)| GradientStop {
            pos: (i as f32) / denom,
            color: *c,
        })
        .collect()
}

impl UnitPoint {
    pub const TOP_LEFT: UnitPoint = UnitPoint::new(0.0, 0.0);
    pub const TOP_RIGHT: UnitPoint = UnitPoint::new(1.0, 0.0);
    pub const BOTTOM_LEFT: UnitPoint = UnitPoint::new(0.0, 1.0);
    pub const BOTTOM_RIGHT: UnitPoint = UnitPoint::new(1.0, 1.0);

    pub const fn new(u: f64, v: f64) -> UnitPoint {
        UnitPoint { u, v }
    }

    /// The matching point of `rect`.
    pub fn resolve(&self, rect: Rect) -> Point {
        Point::new(
            rect.x0 + self.u * rect.width(),
            rect.y0 + self.v * rect.height(),
        )
    }
}

impl LinearGradient {
    /// A gradient from `start` to `end` through evenly spaced `colors`.
    ///
    /// The end points are relative to the rectangle being filled.
    pub fn new(start: UnitPoint, end: UnitPoint, colors: &[Color]) -> LinearGradient {
        LinearGradient {
            start,
            end,
            stops: even_stops(colors),
        }
    }

    /// Resolve the end points against a concrete rectangle.
    pub fn resolve(&self, rect: Rect) -> FixedLinearGradient {
        FixedLinearGradient {
            start: self.start.resolve(rect),
            end: self.end.resolve(rect),
            stops: self.stops.clone(),
        }
    }
}

impl GradientDirection {
    /// The start and end of the gradient axis.
    pub fn unit_points(self) -> (UnitPoint, UnitPoint) {
        match self {
            GradientDirection::Vertical => (UnitPoint::TOP_LEFT, UnitPoint::BOTTOM_LEFT),
            GradientDirection::Horizontal => (UnitPoint::TOP_LEFT, UnitPoint::TOP_RIGHT),
            GradientDirection::LeftSlanted => (UnitPoint::TOP_LEFT, UnitPoint::BOTTOM_RIGHT),
            GradientDirection::RightSlanted => (UnitPoint::TOP_RIGHT, UnitPoint::BOTTOM_LEFT),
        }
    }

    /// A gradient along this direction with evenly spaced `colors`.
    pub fn gradient(self, colors: &[Color]) -> LinearGradient {
        let (start, end) = self.unit_points();
        LinearGradient::new(start, end, colors)
    }
}
