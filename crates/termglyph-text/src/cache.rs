#![forbid(unsafe_code)]

//! LRU cache for grapheme cluster widths.
//!
//! Measuring a composite emoji means segmenting and classifying every code
//! point in it. Terminal content repeats the same clusters constantly, so a
//! small LRU keyed by cluster text pays for itself on redraw-heavy paths.
//!
//! Single-byte (ASCII) clusters bypass the cache entirely.
//!
//! # Example
//! ```
//! use termglyph_text::WidthCache;
//!
//! let mut cache = WidthCache::new(64);
//! assert_eq!(cache.get_or_compute("你"), 2);
//! assert_eq!(cache.get_or_compute("你"), 2);
//! assert_eq!(cache.stats().hits, 1);
//! ```

#[cfg(feature = "thread_local_cache")]
use std::cell::RefCell;
use std::fmt;
use std::num::NonZeroUsize;

use lru::LruCache;
use rustc_hash::FxBuildHasher;
use unicode_segmentation::UnicodeSegmentation;

use crate::config::WidthConfig;
use crate::width::{display_width_with, grapheme_width_with};

/// Default number of cached clusters.
pub const DEFAULT_CACHE_CAPACITY: usize = 4096;

/// Hit/miss counters for a [`WidthCache`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct CacheStats {
    /// Lookups answered from the cache.
    pub hits: u64,
    /// Lookups that had to measure.
    pub misses: u64,
    /// Entries pushed out by newer ones.
    pub evictions: u64,
}

impl CacheStats {
    /// Fraction of lookups answered from the cache (0.0 when unused).
    #[must_use]
    pub fn hit_rate(&self) -> f64 {
        let total = self.hits + self.misses;
        if total == 0 {
            0.0
        } else {
            self.hits as f64 / total as f64
        }
    }
}

/// Width cache bound to one [`WidthConfig`].
pub struct WidthCache {
    entries: LruCache<String, u8, FxBuildHasher>,
    config: WidthConfig,
    stats: CacheStats,
}

impl WidthCache {
    /// Create a cache holding up to `capacity` clusters (at least 1), default policy.
    #[must_use]
    pub fn new(capacity: usize) -> Self {
        Self::with_config(capacity, WidthConfig::DEFAULT)
    }

    /// Create a cache with an explicit policy.
    #[must_use]
    pub fn with_config(capacity: usize, config: WidthConfig) -> Self {
        let capacity = NonZeroUsize::new(capacity).unwrap_or(NonZeroUsize::MIN);
        Self {
            entries: LruCache::with_hasher(capacity, FxBuildHasher),
            config,
            stats: CacheStats::default(),
        }
    }

    /// Policy used for measurement.
    #[must_use]
    pub fn config(&self) -> &WidthConfig {
        &self.config
    }

    /// Switch policy. Cached widths are dropped if the policy changes.
    pub fn set_config(&mut self, config: WidthConfig) {
        if config != self.config {
            tracing::debug!(entries = self.entries.len(), "width policy changed, clearing cache");
            self.entries.clear();
            self.config = config;
        }
    }

    /// Width of one cluster, measured at most once while it stays cached.
    pub fn get_or_compute(&mut self, grapheme: &str) -> usize {
        if grapheme.len() <= 1 {
            return grapheme_width_with(grapheme, &self.config);
        }
        if let Some(&width) = self.entries.get(grapheme) {
            self.stats.hits += 1;
            return usize::from(width);
        }

        self.stats.misses += 1;
        let width = grapheme_width_with(grapheme, &self.config);
        let stored = u8::try_from(width).unwrap_or(u8::MAX);
        if let Some((evicted, _)) = self.entries.push(grapheme.to_string(), stored) {
            if evicted != grapheme {
                self.stats.evictions += 1;
                tracing::trace!(evicted = %evicted, "width cache eviction");
            }
        }
        width
    }

    /// Width of a string, measuring each cluster through the cache.
    pub fn display_width(&mut self, s: &str) -> usize {
        if s.is_ascii() {
            return display_width_with(s, &self.config);
        }
        s.graphemes(true).map(|g| self.get_or_compute(g)).sum()
    }

    /// Current counters.
    #[must_use]
    pub fn stats(&self) -> CacheStats {
        self.stats
    }

    /// Zero the counters.
    pub fn reset_stats(&mut self) {
        self.stats = CacheStats::default();
    }

    /// Drop all cached widths (counters are kept).
    pub fn clear(&mut self) {
        self.entries.clear();
    }

    /// Number of cached clusters.
    #[must_use]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Returns `true` if nothing is cached.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Maximum number of cached clusters.
    #[must_use]
    pub fn capacity(&self) -> usize {
        self.entries.cap().get()
    }
}

impl Default for WidthCache {
    fn default() -> Self {
        Self::new(DEFAULT_CACHE_CAPACITY)
    }
}

impl fmt::Debug for WidthCache {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("WidthCache")
            .field("len", &self.entries.len())
            .field("capacity", &self.capacity())
            .field("config", &self.config)
            .field("stats", &self.stats)
            .finish()
    }
}

#[cfg(feature = "thread_local_cache")]
thread_local! {
    static THREAD_CACHE: RefCell<WidthCache> = RefCell::new(WidthCache::default());
}

/// Run `f` with this thread's width cache.
///
/// Not reentrant: calling it again from inside `f` panics.
#[cfg(feature = "thread_local_cache")]
pub fn with_thread_local_cache<R>(f: impl FnOnce(&mut WidthCache) -> R) -> R {
    THREAD_CACHE.with(|cache| f(&mut cache.borrow_mut()))
}
