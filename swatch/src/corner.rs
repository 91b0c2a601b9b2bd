// Copyright 2024 the Swatch Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Per-corner radii for asymmetric rounded rectangles.

use std::f64::consts::{FRAC_PI_2, PI};
use std::fmt;

use kurbo::{Arc, BezPath, Insets, Point, Rect, Size, Vec2};

/// Tolerance used when flattening corner arcs into cubic segments.
const ARC_TOLERANCE: f64 = 0.1;

/// The radius of each corner of a rounded rectangle.
///
/// Radii are in points. An inset is only meaningful for a rectangle it fits
/// into; check with [`is_valid_for`] before drawing with it.
///
/// [`is_valid_for`]: CornerInset::is_valid_for
#[derive(Clone, Copy, Debug, Default, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct CornerInset {
    pub top_left: f64,
    pub top_right: f64,
    pub bottom_left: f64,
    pub bottom_right: f64,
}

impl CornerInset {
    /// Square corners.
    pub const ZERO: CornerInset = CornerInset::new(0.0, 0.0, 0.0, 0.0);

    /// Create an inset from four radii.
    ///
    /// Note the order: both top corners first, then both bottom corners.
    pub const fn new(top_left: f64, top_right: f64, bottom_left: f64, bottom_right: f64) -> Self {
        CornerInset {
            top_left,
            top_right,
            bottom_left,
            bottom_right,
        }
    }

    /// Create an inset with the same radius at every corner.
    pub const fn uniform(radius: f64) -> Self {
        CornerInset::new(radius, radius, radius, radius)
    }

    /// Returns `true` if every radius is zero.
    pub fn is_zero(&self) -> bool {
        self.radii().iter().all(|r| *r == 0.0)
    }

    /// Returns `true` if this inset fits a rectangle of the given size.
    ///
    /// Every radius has to be finite and non-negative, and the two radii
    /// sharing an edge may not add up to more than the length of that edge.
    pub fn is_valid_for(&self, size: Size) -> bool {
        if self.radii().iter().any(|r| !r.is_finite() || *r < 0.0) {
            return false;
        }
        self.top_left + self.top_right <= size.width
            && self.bottom_left + self.bottom_right <= size.width
            && self.top_left + self.bottom_left <= size.height
            && self.top_right + self.bottom_right <= size.height
    }

    /// The outline of `rect` with these corners, as a closed path.
    ///
    /// Radii are used as given; a zero radius produces a sharp corner.
    pub fn to_path(&self, rect: Rect) -> BezPath {
        let Rect { x0, y0, x1, y1 } = rect.abs();
        let mut path = BezPath::new();
        let (tl, tr, bl, br) = (self.top_left, self.top_right, self.bottom_left, self.bottom_right);
        path.move_to((x0 + tl, y0));
        path.line_to((x1 - tr, y0));
        append_corner(&mut path, (x1 - tr, y0 + tr), tr, -FRAC_PI_2);
        path.line_to((x1, y1 - br));
        append_corner(&mut path, (x1 - br, y1 - br), br, 0.0);
        path.line_to((x0 + bl, y1));
        append_corner(&mut path, (x0 + bl, y1 - bl), bl, FRAC_PI_2);
        path.line_to((x0, y0 + tl));
        append_corner(&mut path, (x0 + tl, y0 + tl), tl, PI);
        path.close_path();
        path
    }

    /// The size of the smallest image that still shows every corner whole,
    /// with one point of flat interior left to stretch.
    pub fn resizable_size(&self) -> Size {
        Size::new(
            self.top_left.max(self.bottom_left) + self.top_right.max(self.bottom_right) + 1.0,
            self.top_left.max(self.top_right) + self.bottom_left.max(self.bottom_right) + 1.0,
        )
    }

    /// The cap insets that keep the corners of a [`resizable_size`] image fixed.
    ///
    /// [`resizable_size`]: CornerInset::resizable_size
    pub fn cap_insets(&self) -> Insets {
        Insets::new(
            self.top_left.max(self.bottom_left),
            self.top_left.max(self.top_right),
            self.top_right.max(self.bottom_right),
            self.bottom_left.max(self.bottom_right),
        )
    }

    fn radii(&self) -> [f64; 4] {
        [
            self.top_left,
            self.top_right,
            self.bottom_left,
            self.bottom_right,
        ]
    }
}

/// Append a quarter circle that starts at `start_angle` and turns clockwise
/// (in y-down coordinates) around `center`.
fn append_corner(path: &mut BezPath, center: impl Into<Point>, radius: f64, start_angle: f64) {
    if radius <= 0.0 {
        return;
    }
    let arc = Arc {
        center: center.into(),
        radii: Vec2::new(radius, radius),
        start_angle,
        sweep_angle: FRAC_PI_2,
        x_rotation: 0.0,
    };
    arc.append_iter(ARC_TOLERANCE).for_each(|el| path.push(el));
}

impl fmt::Display for CornerInset {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(
            f,
            "{{{}, {}, {}, {}}}",
            self.top_left, self.top_right, self.bottom_left, self.bottom_right
        )
    }
}
