//! String-keyed least-recently-used cache.

use std::num::NonZeroUsize;
use std::sync::Mutex;

use lru::LruCache;

/// Thread-safe LRU cache keyed by string.
///
/// `get` refreshes an entry's recency; `save` inserts or refreshes and evicts
/// the least recently used entry once capacity is exceeded.
pub struct Cache<V> {
    inner: Mutex<LruCache<String, V>>,
}

impl<V: Clone> Cache<V> {
    /// Creates a cache holding at most `capacity` entries. A zero capacity
    /// is treated as one.
    pub fn new(capacity: usize) -> Cache<V> {
        let capacity = NonZeroUsize::new(capacity).unwrap_or(NonZeroUsize::MIN);
        Cache {
            inner: Mutex::new(LruCache::new(capacity)),
        }
    }

    /// Returns the value for `key` if present, marking it most recently used.
    pub fn get(&self, key: &str) -> Option<V> {
        self.lock().get(key).cloned()
    }

    /// Assigns `value` to `key`, overwriting any previous value and marking
    /// the entry most recently used.
    pub fn save(&self, key: impl Into<String>, value: V) {
        self.lock().put(key.into(), value);
    }

    /// Number of cached entries.
    pub fn len(&self) -> usize {
        self.lock().len()
    }

    pub fn is_empty(&self) -> bool {
        self.lock().is_empty()
    }

    fn lock(&self) -> std::sync::MutexGuard<'_, LruCache<String, V>> {
        match self.inner.lock() {
            Ok(guard) => guard,
            Err(poisoned) => poisoned.into_inner(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn save_and_get() {
        let cache = Cache::new(2);
        cache.save("a", 1);
        assert_eq!(cache.get("a"), Some(1));
        assert_eq!(cache.get("b"), None);
    }

    #[test]
    fn save_overwrites() {
        let cache = Cache::new(2);
        cache.save("a", 1);
        cache.save("a", 2);
        assert_eq!(cache.get("a"), Some(2));
        assert_eq!(cache.len(), 1);
    }

    #[test]
    fn least_recently_used_is_evicted() {
        let cache = Cache::new(2);
        cache.save("a", 1);
        cache.save("b", 2);
        cache.save("c", 3);
        assert_eq!(cache.get("a"), None);
        assert_eq!(cache.get("b"), Some(2));
        assert_eq!(cache.get("c"), Some(3));
    }

    #[test]
    fn get_refreshes_recency() {
        let cache = Cache::new(2);
        cache.save("a", 1);
        cache.save("b", 2);
        // touching "a" makes "b" the eviction candidate
        cache.get("a");
        cache.save("c", 3);
        assert_eq!(cache.get("a"), Some(1));
        assert_eq!(cache.get("b"), None);
    }

    #[test]
    fn zero_capacity_clamped() {
        let cache = Cache::new(0);
        cache.save("a", 1);
        assert_eq!(cache.get("a"), Some(1));
        cache.save("b", 2);
        assert_eq!(cache.get("a"), None);
    }
}
