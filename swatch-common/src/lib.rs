// Copyright 2024 the Swatch Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Swatch with its default backend.
//!
//! This crate reexports the [swatch crate][swatch] together with the
//! tiny-skia backend, and adds the pieces that touch the file system:
//! loading named images from a directory and writing images out as PNG.
//!
//! The intention of this crate is to provide a single dependency that
//! handles the common use-case. If you want to plug in your own backend,
//! depend on [swatch][] directly and implement its `Backend` trait.
//!
//! [swatch]: https://crates.io/crates/swatch

pub use swatch::*;

#[doc(hidden)]
pub use swatch::kurbo;

mod assets;
#[path = "skia_back.rs"]
mod backend;

pub use assets::DirectoryAssets;
#[doc(hidden)]
pub use backend::*;
