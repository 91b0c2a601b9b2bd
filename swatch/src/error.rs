// Copyright 2024 the Swatch Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! The common error type for swatch operations.

use kurbo::Size;

use crate::CornerInset;

/// An error that can occur while producing an image.
#[derive(Debug, thiserror::Error)]
#[non_exhaustive]
pub enum Error {
    /// The corner radii do not fit the size they were applied to.
    #[error("corner inset {inset} does not fit a {}x{} image", .size.width, .size.height)]
    InvalidCornerInset { inset: CornerInset, size: Size },
    /// A requested size cannot back a bitmap.
    #[error("invalid image size {}x{}", .0.width, .0.height)]
    InvalidSize(Size),
    /// A gradient was requested without any colors.
    #[error("gradient needs at least one color")]
    EmptyGradient,
    /// No asset with this name could be found.
    #[error("no image named {0:?}")]
    MissingImage(String),
    #[error("invalid input")]
    InvalidInput,
    #[error("option not supported")]
    NotSupported,
    /// `restore` was called without a matching `save`.
    #[error("stack unbalanced")]
    StackUnbalance,
    #[error("backend error: {0}")]
    BackendError(#[source] Box<dyn std::error::Error + Send + Sync>),
}

impl From<Box<dyn std::error::Error + Send + Sync>> for Error {
    fn from(e: Box<dyn std::error::Error + Send + Sync>) -> Error {
        Error::BackendError(e)
    }
}
