//! LRU (Least Recently Used) cache implementation
//!
//! A string-keyed index over an arena-backed recency list. Both are updated
//! together on every call, so each indexed key owns exactly one live slot
//! and each live slot is indexed by exactly one key.

use std::collections::HashMap;
use std::fmt;
use std::num::NonZeroUsize;

use ahash::RandomState;
use tracing::{debug, trace};

use crate::error::{Error, Result};
use crate::keyed::Keyed;
use crate::order::RecencyList;
use crate::stats::CacheStats;

/// Stored entry: the value plus the key it was indexed under
struct Entry<T> {
    key: Box<str>,
    value: T,
}

/// LRU cache with fixed capacity
pub struct LruCache<T> {
    index: HashMap<Box<str>, usize, RandomState>,
    order: RecencyList<Entry<T>>,
    capacity: NonZeroUsize,
    stats: CacheStats,
}

impl<T: Keyed> LruCache<T> {
    /// Create a new LRU cache holding at most `capacity` entries
    ///
    /// # Errors
    /// * `Error::ZeroCapacity` - if `capacity` is 0
    pub fn new(capacity: usize) -> Result<Self> {
        let capacity = NonZeroUsize::new(capacity).ok_or(Error::ZeroCapacity)?;
        Ok(Self::with_capacity(capacity))
    }

    /// Create a new LRU cache from an already validated capacity
    pub fn with_capacity(capacity: NonZeroUsize) -> Self {
        debug!(capacity = capacity.get(), "creating LRU cache");

        Self {
            index: HashMap::with_capacity_and_hasher(capacity.get(), RandomState::new()),
            order: RecencyList::with_capacity(capacity.get()),
            capacity,
            stats: CacheStats::new(),
        }
    }

    /// Add a value as the most recently used entry
    ///
    /// A value whose key is already cached replaces the stored value and is
    /// promoted. Otherwise, when the cache is full, the least recently used
    /// entry is evicted first.
    pub fn add(&mut self, value: T) {
        if let Some(&idx) = self.index.get(value.key()) {
            if let Some(entry) = self.order.get_mut(idx) {
                trace!(key = %entry.key, "replacing cached value");
                entry.value = value;
            }
            self.order.move_to_front(idx);
            self.stats.record_update();
            return;
        }

        if self.order.len() >= self.capacity.get() {
            self.evict();
        }

        let key: Box<str> = value.key().into();
        let idx = self.order.push_front(Entry {
            key: key.clone(),
            value,
        });
        self.index.insert(key, idx);
        self.stats.record_insert();
    }

    /// Get a value and mark it as the most recently used entry
    pub fn get(&mut self, key: &str) -> Option<&T> {
        let Some(&idx) = self.index.get(key) else {
            self.stats.record_miss();
            return None;
        };

        self.stats.record_hit();
        if self.order.front() != Some(idx) {
            trace!(key, "promoting to most recently used");
            self.order.move_to_front(idx);
        }
        self.order.get(idx).map(|entry| &entry.value)
    }

    /// Get a value without touching its recency
    pub fn peek(&self, key: &str) -> Option<&T> {
        let &idx = self.index.get(key)?;
        self.order.get(idx).map(|entry| &entry.value)
    }

    /// Check for a key without touching its recency
    pub fn contains(&self, key: &str) -> bool {
        self.index.contains_key(key)
    }

    /// Remove a key from the cache
    pub fn remove(&mut self, key: &str) -> Option<T> {
        let idx = self.index.remove(key)?;
        self.order.remove(idx).map(|entry| entry.value)
    }

    /// Evict and return the least recently used entry
    pub fn pop_lru(&mut self) -> Option<T> {
        self.evict()
    }

    /// The least recently used entry, next in line for eviction
    pub fn peek_lru(&self) -> Option<&T> {
        let idx = self.order.back()?;
        self.order.get(idx).map(|entry| &entry.value)
    }

    /// The most recently used entry
    pub fn peek_mru(&self) -> Option<&T> {
        let idx = self.order.front()?;
        self.order.get(idx).map(|entry| &entry.value)
    }

    /// Get the current size of the cache
    pub fn len(&self) -> usize {
        self.order.len()
    }

    /// Check if the cache is empty
    pub fn is_empty(&self) -> bool {
        self.order.len() == 0
    }

    /// Maximum number of entries
    pub fn capacity(&self) -> usize {
        self.capacity.get()
    }

    /// Drop every entry and reset the statistics
    pub fn clear(&mut self) {
        debug!(dropped = self.order.len(), "clearing LRU cache");

        self.index.clear();
        self.order.clear();
        self.stats.reset();
    }

    /// Values from most to least recently used, without promoting any of them
    pub fn iter(&self) -> impl DoubleEndedIterator<Item = &T> + ExactSizeIterator + '_ {
        self.order.iter().map(|(_, entry)| &entry.value)
    }

    /// Keys from most to least recently used
    pub fn keys(&self) -> impl DoubleEndedIterator<Item = &str> + ExactSizeIterator + '_ {
        self.order.iter().map(|(_, entry)| &*entry.key)
    }

    /// Snapshot of the usage counters
    pub fn stats(&self) -> CacheStats {
        self.stats
    }

    fn evict(&mut self) -> Option<T> {
        let entry = self.order.pop_back()?;
        let removed = self.index.remove(&entry.key);
        debug_assert!(removed.is_some(), "evicted key {:?} was not indexed", entry.key);

        trace!(key = %entry.key, "evicting least recently used entry");
        self.stats.record_eviction();
        Some(entry.value)
    }

    /// Validates that the index and the recency list describe the same entries.
    ///
    /// Panics if any invariant is violated.
    #[cfg(any(test, debug_assertions))]
    pub fn debug_validate_invariants(&self) {
        assert!(
            self.order.len() <= self.capacity.get(),
            "len({}) > capacity({})",
            self.order.len(),
            self.capacity
        );
        assert_eq!(
            self.order.len(),
            self.index.len(),
            "list len({}) != index len({})",
            self.order.len(),
            self.index.len()
        );

        let mut walked = 0;
        for (idx, entry) in self.order.iter() {
            assert_eq!(
                self.index.get(&entry.key),
                Some(&idx),
                "key {:?} at slot {} is not indexed there",
                entry.key,
                idx
            );
            walked += 1;
        }
        // Every walked key maps to its own slot, so equal counts rule out duplicates.
        assert_eq!(walked, self.index.len(), "walked {} entries", walked);

        self.order.debug_validate_links();
    }
}

impl<T: fmt::Debug> fmt::Debug for LruCache<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("LruCache")
            .field("capacity", &self.capacity)
            .field("len", &self.order.len())
            .field(
                "entries",
                &self
                    .order
                    .iter()
                    .map(|(_, entry)| (&*entry.key, &entry.value))
                    .collect::<Vec<_>>(),
            )
            .finish()
    }
}
