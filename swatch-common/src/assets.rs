// Copyright 2024 the Swatch Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Named images stored as PNG files.

use std::path::{Path, PathBuf};

use swatch::{AssetSource, Error, Image, ImageBuf, ImageFormat};

/// Loads named images from PNG files in a directory.
///
/// The image `"arrow"` requested at scale 2 is looked up as `arrow@2x.png`
/// first, which is taken to be drawn at 2 pixels per point, and then as
/// `arrow.png` at 1 pixel per point. A name with an extension is used as
/// the file name as is.
#[derive(Clone, Debug)]
pub struct DirectoryAssets {
    root: PathBuf,
}

impl DirectoryAssets {
    pub fn new(root: impl Into<PathBuf>) -> Self {
        DirectoryAssets { root: root.into() }
    }

    /// The directory images are read from.
    pub fn root(&self) -> &Path {
        &self.root
    }

    /// The files that may hold `name`, best first, with their scale.
    fn candidates(&self, name: &str, scale: f64) -> Vec<(PathBuf, f64)> {
        if Path::new(name).extension().is_some() {
            return vec![(self.root.join(name), 1.0)];
        }
        let mut candidates = Vec::with_capacity(2);
        if scale.is_finite() && scale > 0.0 && scale != 1.0 {
            candidates.push((self.root.join(format!("{name}@{scale}x.png")), scale));
        }
        candidates.push((self.root.join(format!("{name}.png")), 1.0));
        candidates
    }
}

impl AssetSource for DirectoryAssets {
    fn load(&self, name: &str, scale: f64) -> Result<Option<Image>, Error> {
        for (path, file_scale) in self.candidates(name, scale) {
            if path.is_file() {
                return decode(&path, file_scale).map(Some);
            }
        }
        tracing::trace!(name, root = %self.root.display(), "no asset file");
        Ok(None)
    }
}

fn decode(path: &Path, scale: f64) -> Result<Image, Error> {
    let decoded = image::open(path).map_err(|e| {
        tracing::warn!(path = %path.display(), error = %e, "failed to decode asset");
        Error::BackendError(Box::new(e))
    })?;
    let rgba = decoded.to_rgba8();
    let (width, height) = (rgba.width() as usize, rgba.height() as usize);
    let buf = ImageBuf::from_raw(rgba.into_raw(), ImageFormat::RgbaSeparate, width, height);
    Ok(Image::new(buf, scale))
}
