// Copyright 2024 the Swatch Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Derived images on top of a 2D raster backend.
//!
//! This crate holds the backend-agnostic half of swatch: the value types
//! ([`Color`], [`CornerInset`], [`TintStyle`], [`GradientDirection`]), the
//! [`RenderContext`] and [`Backend`] traits a raster backend implements, and
//! the [`ImageFactory`], which turns a request such as "a 40x40 red square
//! with 8pt corners" into a shared [`Image`], remembering it in an
//! [`ImageCache`] so the next identical request is free.
//!
//! Most users want the `swatch-common` crate, which pairs this with the
//! default backend.

pub use kurbo;

/// utilities shared by various backends
pub mod util;

mod assets;
mod cache;
mod color;
mod corner;
mod error;
mod factory;
mod gradient;
mod image;
mod render_context;
mod tint;

pub use crate::assets::*;
pub use crate::cache::*;
pub use crate::color::*;
pub use crate::corner::*;
pub use crate::error::*;
pub use crate::factory::*;
pub use crate::gradient::*;
pub use crate::image::*;
pub use crate::render_context::*;
pub use crate::tint::*;
