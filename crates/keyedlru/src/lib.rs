//! # keyedlru
//!
//! Fixed-capacity, string-keyed LRU cache.
//!
//! ## Architecture
//! - **Key Index**: AHash map from key to arena slot (O(1))
//! - **Recency List**: Doubly-linked list threaded through a `Vec` arena by
//!   slot index, bracketed by head/tail sentinels (O(1) promote and evict)
//! - **Free List**: Slots released by eviction or removal are reused
//!
//! Values name their own key through the [`Keyed`] trait. Reading a value
//! with [`LruCache::get`] promotes it; adding to a full cache evicts the
//! least recently touched entry. Adding a value whose key is already cached
//! replaces the stored value and promotes it.
//!
//! [`LruCache`] is single-threaded. [`SharedLruCache`] wraps one in a lock
//! for hosts that need to share it.
//!
//! ```
//! use keyedlru::LruCache;
//!
//! let mut cache = LruCache::new(2)?;
//! cache.add("a".to_string());
//! cache.add("b".to_string());
//! cache.get("a");
//! cache.add("c".to_string()); // evicts "b"
//!
//! assert!(!cache.contains("b"));
//! assert_eq!(cache.keys().collect::<Vec<_>>(), ["c", "a"]);
//! # Ok::<(), keyedlru::Error>(())
//! ```

#![warn(missing_docs)]

mod cache;
mod error;
mod keyed;
mod order;
mod shared;
mod stats;

pub use cache::LruCache;
pub use error::{Error, Result};
pub use keyed::Keyed;
pub use shared::SharedLruCache;
pub use stats::CacheStats;
