// Copyright 2024 the Swatch Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Lookup of images by name.

use std::collections::HashMap;

use crate::{Error, Image};

/// A read-only store of named images, such as an application's bundled assets.
pub trait AssetSource: Send + Sync {
    /// Find the image called `name`, preferring a variant drawn for `scale`.
    ///
    /// `Ok(None)` means there is no such image; errors are reserved for an
    /// asset that exists but cannot be read.
    fn load(&self, name: &str, scale: f64) -> Result<Option<Image>, Error>;
}

/// Named images held in memory.
#[derive(Clone, Debug, Default)]
pub struct MemoryAssets {
    images: HashMap<String, Image>,
}

impl MemoryAssets {
    pub fn new() -> Self {
        Self::default()
    }

    /// Add or replace the image called `name`.
    pub fn insert(&mut self, name: impl Into<String>, image: Image) {
        self.images.insert(name.into(), image);
    }

    /// A builder-style version of [`insert`](MemoryAssets::insert).
    pub fn with(mut self, name: impl Into<String>, image: Image) -> Self {
        self.insert(name, image);
        self
    }
}

impl AssetSource for MemoryAssets {
    fn load(&self, name: &str, _scale: f64) -> Result<Option<Image>, Error> {
        Ok(self.images.get(name).cloned())
    }
}
