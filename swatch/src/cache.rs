// Copyright 2024 the Swatch Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Memoization of generated images.

use std::num::NonZeroUsize;
use std::sync::Arc;

use kurbo::Size;
use lru::LruCache;

use crate::{Color, CornerInset, GradientDirection, Image, TintStyle};

/// The number of entries kept by the default [`EvictionPolicy`].
pub const DEFAULT_CACHE_CAPACITY: usize = 128;

/// When the cache drops entries.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum EvictionPolicy {
    /// Keep everything for the lifetime of the cache.
    Unbounded,
    /// Keep at most this many entries, dropping the least recently used.
    Lru(NonZeroUsize),
}

impl EvictionPolicy {
    /// An LRU policy, or [`Unbounded`] for a capacity of zero.
    ///
    /// [`Unbounded`]: EvictionPolicy::Unbounded
    pub fn lru(capacity: usize) -> Self {
        match NonZeroUsize::new(capacity) {
            Some(capacity) => EvictionPolicy::Lru(capacity),
            None => EvictionPolicy::Unbounded,
        }
    }
}

impl Default for EvictionPolicy {
    fn default() -> Self {
        EvictionPolicy::lru(DEFAULT_CACHE_CAPACITY)
    }
}

/// The bit pattern of a float, with `-0.0` folded into `0.0` so that values
/// that compare equal also hash equal.
fn bits(x: f64) -> u64 {
    (x + 0.0).to_bits()
}

/// A [`Size`] in hashable form.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct SizeKey([u64; 2]);

impl From<Size> for SizeKey {
    fn from(size: Size) -> Self {
        SizeKey([bits(size.width), bits(size.height)])
    }
}

/// A [`CornerInset`] in hashable form.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct InsetKey([u64; 4]);

impl From<CornerInset> for InsetKey {
    fn from(inset: CornerInset) -> Self {
        InsetKey([
            bits(inset.top_left),
            bits(inset.top_right),
            bits(inset.bottom_left),
            bits(inset.bottom_right),
        ])
    }
}

/// The description of a generated image, used as its cache key.
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub enum ImageKey {
    Solid {
        color: Color,
        size: SizeKey,
        inset: InsetKey,
    },
    ResizableSolid {
        color: Color,
        inset: InsetKey,
    },
    Named {
        name: String,
    },
    Tinted {
        name: String,
        color: Color,
        style: TintStyle,
    },
    Gradient {
        colors: Vec<Color>,
        size: SizeKey,
        direction: GradientDirection,
    },
    ResizableGradient {
        colors: Vec<Color>,
        size: SizeKey,
        direction: GradientDirection,
    },
}

impl ImageKey {
    /// A short name for the kind of request, for logging.
    pub fn kind(&self) -> &'static str {
        match self {
            ImageKey::Solid { .. } => "solid",
            ImageKey::ResizableSolid { .. } => "resizable-solid",
            ImageKey::Named { .. } => "named",
            ImageKey::Tinted { .. } => "tinted",
            ImageKey::Gradient { .. } => "gradient",
            ImageKey::ResizableGradient { .. } => "resizable-gradient",
        }
    }
}

/// Hit and miss counters of an [`ImageCache`].
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct CacheStats {
    pub hits: u64,
    pub misses: u64,
}

/// A map from [`ImageKey`] to a shared image.
pub struct ImageCache {
    entries: LruCache<ImageKey, Arc<Image>>,
    policy: EvictionPolicy,
    stats: CacheStats,
}

impl ImageCache {
    pub fn new(policy: EvictionPolicy) -> Self {
        let entries = match policy {
            EvictionPolicy::Unbounded => LruCache::unbounded(),
            EvictionPolicy::Lru(capacity) => LruCache::new(capacity),
        };
        ImageCache {
            entries,
            policy,
            stats: CacheStats::default(),
        }
    }

    /// Look up an image, marking it as recently used.
    pub fn get(&mut self, key: &ImageKey) -> Option<Arc<Image>> {
        match self.entries.get(key) {
            Some(image) => {
                self.stats.hits += 1;
                tracing::trace!(kind = key.kind(), "image cache hit");
                Some(Arc::clone(image))
            }
            None => {
                self.stats.misses += 1;
                tracing::trace!(kind = key.kind(), "image cache miss");
                None
            }
        }
    }

    /// Store an image, evicting the least recently used entry if the cache is full.
    pub fn insert(&mut self, key: ImageKey, image: Arc<Image>) {
        if let Some((evicted, _)) = self.entries.push(key, image) {
            // `push` hands back the old value when the key was already present.
            if !self.entries.contains(&evicted) {
                tracing::debug!(kind = evicted.kind(), "image cache evicted entry");
            }
        }
    }

    pub fn contains(&self, key: &ImageKey) -> bool {
        self.entries.contains(key)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Drop every entry. Images already handed out stay alive.
    pub fn clear(&mut self) {
        self.entries.clear();
    }

    pub fn policy(&self) -> EvictionPolicy {
        self.policy
    }

    pub fn stats(&self) -> CacheStats {
        self.stats
    }
}

impl Default for ImageCache {
    fn default() -> Self {
        ImageCache::new(EvictionPolicy::default())
    }
}

impl std::fmt::Debug for ImageCache {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ImageCache")
            .field("len", &self.entries.len())
            .field("policy", &self.policy)
            .field("stats", &self.stats)
            .finish()
    }
}
