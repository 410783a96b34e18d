//! Memoized gradient lookup keyed by logger identifier.

use std::collections::HashMap;
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::{Arc, Mutex, PoisonError};

use once_cell::sync::Lazy;
use serde::Serialize;

use crate::hue::{hue_hash, Palette};

static GLOBAL: Lazy<Arc<GradientCache>> = Lazy::new(|| Arc::new(GradientCache::default()));

/// Hit/miss counters for a [`GradientCache`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize)]
pub struct CacheStats {
    pub hits: u64,
    pub misses: u64,
    pub entries: usize,
}

/// Append-only map from identifier to rendered gradient.
///
/// Entries are never evicted, so an identifier resolves to the same gradient
/// for the lifetime of the cache.
#[derive(Debug)]
pub struct GradientCache {
    palette: Palette,
    entries: Mutex<HashMap<String, Arc<str>>>,
    hits: AtomicU64,
    misses: AtomicU64,
}

impl GradientCache {
    /// Create an empty cache rendering with `palette`.
    pub fn new(palette: Palette) -> Self {
        Self {
            palette,
            entries: Mutex::new(HashMap::new()),
            hits: AtomicU64::new(0),
            misses: AtomicU64::new(0),
        }
    }

    /// Process-wide cache using the default palette.
    pub fn global() -> Arc<Self> {
        Arc::clone(&GLOBAL)
    }

    pub fn palette(&self) -> Palette {
        self.palette
    }

    /// Look up the gradient for `identifier`, computing it on first use.
    pub fn get(&self, identifier: &str) -> Arc<str> {
        // Cached values are immutable, so a poisoned map is still consistent.
        let mut entries = self.entries.lock().unwrap_or_else(PoisonError::into_inner);

        if let Some(gradient) = entries.get(identifier) {
            self.hits.fetch_add(1, Ordering::Relaxed);
            return Arc::clone(gradient);
        }

        let pair = hue_hash(identifier);
        let gradient: Arc<str> = self.palette.gradient(pair).into();
        self.misses.fetch_add(1, Ordering::Relaxed);

        tracing::trace!(
            target: "huelog-kernel",
            id = identifier,
            hue1 = pair.hue1,
            hue2 = pair.hue2,
            "gradient computed"
        );

        entries.insert(identifier.to_string(), Arc::clone(&gradient));
        gradient
    }

    /// Snapshot of the hit/miss counters and entry count.
    pub fn stats(&self) -> CacheStats {
        let entries = self
            .entries
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .len();

        CacheStats {
            hits: self.hits.load(Ordering::Relaxed),
            misses: self.misses.load(Ordering::Relaxed),
            entries,
        }
    }
}

impl Default for GradientCache {
    fn default() -> Self {
        Self::new(Palette::default())
    }
}

/// Gradient for `identifier` from the process-wide cache.
pub fn get_gradient(identifier: &str) -> Arc<str> {
    GLOBAL.get(identifier)
}
