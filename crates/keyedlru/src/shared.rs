//! SharedLruCache: an LruCache behind a lock, for hosts with several threads

use std::sync::Arc;

use parking_lot::Mutex;

use crate::cache::LruCache;
use crate::error::Result;
use crate::keyed::Keyed;
use crate::stats::CacheStats;

/// Cloneable handle serialising every call on one `LruCache`
///
/// Each method takes the lock for exactly one cache operation. Use
/// [`SharedLruCache::with_cache`] when several operations must happen as one
/// step.
pub struct SharedLruCache<T> {
    inner: Arc<Mutex<LruCache<T>>>,
}

impl<T> Clone for SharedLruCache<T> {
    fn clone(&self) -> Self {
        Self {
            inner: Arc::clone(&self.inner),
        }
    }
}

impl<T: Keyed> SharedLruCache<T> {
    /// Create a new shared cache with the given capacity
    ///
    /// # Arguments
    /// * `capacity` - Maximum number of items in cache
    ///
    /// # Returns
    /// * `Result<SharedLruCache<T>>` - fails when `capacity` is 0
    pub fn new(capacity: usize) -> Result<Self> {
        Ok(Self::from(LruCache::new(capacity)?))
    }

    /// Add a value as the most recently used entry
    pub fn add(&self, value: T) {
        self.inner.lock().add(value);
    }

    /// Get a copy of a value and mark it as the most recently used entry
    ///
    /// # Arguments
    /// * `key` - Key to look up
    ///
    /// # Returns
    /// * `Option<T>` - a clone of the cached value, `None` on a miss
    pub fn get(&self, key: &str) -> Option<T>
    where
        T: Clone,
    {
        self.inner.lock().get(key).cloned()
    }

    /// Remove a key and return its value
    pub fn remove(&self, key: &str) -> Option<T> {
        self.inner.lock().remove(key)
    }

    /// Check for a key without touching its recency
    pub fn contains(&self, key: &str) -> bool {
        self.inner.lock().contains(key)
    }

    /// Get current cache size
    pub fn len(&self) -> usize {
        self.inner.lock().len()
    }

    /// Check if the cache is empty
    pub fn is_empty(&self) -> bool {
        self.inner.lock().is_empty()
    }

    /// Get cache capacity
    pub fn capacity(&self) -> usize {
        self.inner.lock().capacity()
    }

    /// Clear the cache and its statistics
    pub fn clear(&self) {
        self.inner.lock().clear();
    }

    /// Get cache statistics
    pub fn stats(&self) -> CacheStats {
        self.inner.lock().stats()
    }

    /// Run `f` with exclusive access to the underlying cache
    pub fn with_cache<R>(&self, f: impl FnOnce(&mut LruCache<T>) -> R) -> R {
        f(&mut self.inner.lock())
    }
}

impl<T> From<LruCache<T>> for SharedLruCache<T> {
    fn from(cache: LruCache<T>) -> Self {
        Self {
            inner: Arc::new(Mutex::new(cache)),
        }
    }
}
