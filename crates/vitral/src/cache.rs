// Copyright 2019-2026 Maravilla Labs, operated by SOLUTAS GmbH, Switzerland
// SPDX-License-Identifier: Apache-2.0
// SPDX-License-Identifier: MIT

//! Render result caching.
//!
//! The pipeline can cache rendered pages keyed by a normalized
//! (template, locale, sorted-parameters) string. The cache is an injected,
//! explicitly-owned component: one instance per pipeline, so tests can
//! substitute an isolated instance.
//!
//! # Cache Implementations
//!
//! - [`MemoryRenderCache`]: in-memory LRU cache
//! - [`NoOpRenderCache`]: caching disabled

use lru::LruCache;
use std::num::NonZeroUsize;
use std::sync::Mutex;

/// Cache of rendered page bodies.
pub trait RenderCache: Send + Sync {
    /// The cached body for a key, if present.
    fn get(&self, key: &str) -> Option<String>;

    /// Stores a rendered body under a key.
    fn put(&self, key: &str, body: String);
}

/// Builds the normalized cache key for one render.
///
/// Parameters are sorted by name so the key is independent of iteration
/// order; identical (template, locale, parameters) requests always map to
/// the same entry.
pub fn render_cache_key<'a>(
    template: &str,
    locale: &str,
    params: impl IntoIterator<Item = (&'a str, &'a str)>,
) -> String {
    let mut pairs: Vec<(&str, &str)> = params.into_iter().collect();
    pairs.sort_unstable();

    let mut key = format!("{}|{}", template, locale);
    for (name, value) in pairs {
        key.push('|');
        key.push_str(name);
        key.push('=');
        key.push_str(value);
    }
    key
}

/// In-memory LRU render cache.
pub struct MemoryRenderCache {
    inner: Mutex<LruCache<String, String>>,
}

impl MemoryRenderCache {
    /// Creates a cache holding up to `capacity` rendered pages.
    pub fn new(capacity: usize) -> Self {
        let capacity = NonZeroUsize::new(capacity).unwrap_or(NonZeroUsize::MIN);
        Self {
            inner: Mutex::new(LruCache::new(capacity)),
        }
    }

    /// Number of cached entries.
    pub fn len(&self) -> usize {
        self.inner.lock().map(|c| c.len()).unwrap_or(0)
    }

    /// Returns true if the cache holds no entries.
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

impl RenderCache for MemoryRenderCache {
    fn get(&self, key: &str) -> Option<String> {
        let mut cache = self.inner.lock().ok()?;
        cache.get(key).cloned()
    }

    fn put(&self, key: &str, body: String) {
        if let Ok(mut cache) = self.inner.lock() {
            cache.put(key.to_string(), body);
        }
    }
}

/// A cache that stores nothing.
#[derive(Default, Clone, Copy)]
pub struct NoOpRenderCache;

impl NoOpRenderCache {
    /// Creates the no-op cache.
    pub fn new() -> Self {
        Self
    }
}

impl RenderCache for NoOpRenderCache {
    fn get(&self, _key: &str) -> Option<String> {
        None
    }

    fn put(&self, _key: &str, _body: String) {}
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_cache_key_sorts_params() {
        let a = render_cache_key("p", "en", [("b", "2"), ("a", "1")]);
        let b = render_cache_key("p", "en", [("a", "1"), ("b", "2")]);
        assert_eq!(a, b);
        assert_eq!(a, "p|en|a=1|b=2");
    }

    #[test]
    fn test_cache_key_distinguishes_locale() {
        let en = render_cache_key("p", "en", []);
        let de = render_cache_key("p", "de", []);
        assert_ne!(en, de);
    }

    #[test]
    fn test_memory_cache_roundtrip() {
        let cache = MemoryRenderCache::new(2);
        cache.put("k1", "body1".to_string());
        assert_eq!(cache.get("k1"), Some("body1".to_string()));
        assert_eq!(cache.get("k2"), None);
    }

    #[test]
    fn test_memory_cache_evicts_lru() {
        let cache = MemoryRenderCache::new(2);
        cache.put("k1", "1".to_string());
        cache.put("k2", "2".to_string());
        cache.put("k3", "3".to_string());
        assert_eq!(cache.len(), 2);
        assert_eq!(cache.get("k1"), None);
    }

    #[test]
    fn test_noop_cache_stores_nothing() {
        let cache = NoOpRenderCache::new();
        cache.put("k", "v".to_string());
        assert_eq!(cache.get("k"), None);
    }
}
