//! Scripted add/get walkthrough over a keyedlru cache

use anyhow::{Context, Result};
use keyedlru::{CacheStats, Keyed, LruCache};
use serde::Serialize;
use tracing::{debug, info};

/// Demo value: an id plus the order it was added in
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Record {
    pub id: String,
    pub payload: u32,
}

impl Keyed for Record {
    fn key(&self) -> &str {
        &self.id
    }
}

/// Outcome of one `get`
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Lookup {
    pub key: String,
    pub found: Option<Record>,
    /// Keys from most to least recently used after the call
    pub order: Vec<String>,
}

/// Everything the walkthrough observed
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Report {
    pub capacity: usize,
    pub evicted: Vec<String>,
    pub lookups: Vec<Lookup>,
    pub order: Vec<String>,
    pub stats: CacheStats,
}

fn snapshot(cache: &LruCache<Record>) -> Vec<String> {
    cache.keys().map(str::to_string).collect()
}

/// Add `keys` in order, then look up `gets` in order.
pub fn run(capacity: usize, keys: &[String], gets: &[String]) -> Result<Report> {
    let mut cache =
        LruCache::new(capacity).with_context(|| format!("cannot build cache of capacity {capacity}"))?;
    let mut evicted = Vec::new();

    for (payload, id) in keys.iter().enumerate() {
        let before = snapshot(&cache);
        let payload = u32::try_from(payload).context("too many keys")?;
        cache.add(Record {
            id: id.clone(),
            payload,
        });

        // A full cache drops whatever sat at the tail
        if let Some(tail) = before.last() {
            if !cache.contains(tail) {
                info!(added = %id, evicted = %tail, "evicted least recently used");
                evicted.push(tail.clone());
            }
        }
        debug!(order = ?snapshot(&cache), "after add {id}");
    }

    let mut lookups = Vec::with_capacity(gets.len());
    for key in gets {
        let found = cache.get(key).cloned();
        let order = snapshot(&cache);
        info!(key = %key, hit = found.is_some(), "lookup");
        lookups.push(Lookup {
            key: key.clone(),
            found,
            order,
        });
    }

    Ok(Report {
        capacity: cache.capacity(),
        evicted,
        lookups,
        order: snapshot(&cache),
        stats: cache.stats(),
    })
}
