//! Process-wide memoization for loaded datasets.
//!
//! Loading a boundary file or projecting a statistics table happens once per
//! distinct parameter tuple and is reused for the life of the server. The
//! cache is an explicit, injectable abstraction rather than a decorator so
//! tests can observe hit/miss behavior deterministically. There is no
//! eviction and no invalidation.

use parking_lot::RwLock;
use std::collections::HashMap;
use std::hash::Hash;
use std::sync::atomic::{AtomicU64, Ordering};

use crate::error::Result;

/// A key-value store with interior mutability, shared across requests.
pub trait Cache<K, V>: Send + Sync {
    /// Look up a cached value, recording a hit or a miss
    fn get(&self, key: &K) -> Option<V>;

    /// Store a computed value
    fn insert(&self, key: K, value: V);
}

/// Return the cached value for `key`, or compute, store, and return it.
pub fn get_or_try_insert<K, V, F>(cache: &dyn Cache<K, V>, key: K, compute: F) -> Result<V>
where
    V: Clone,
    F: FnOnce() -> Result<V>,
{
    if let Some(value) = cache.get(&key) {
        return Ok(value);
    }
    let value = compute()?;
    cache.insert(key, value.clone());
    Ok(value)
}

/// In-memory cache backed by a read-write locked map.
///
/// Values are expected to be cheap to clone (typically `Arc`s around the
/// loaded data). Hit and miss counters are kept for the heartbeat endpoint
/// and for tests.
#[derive(Debug)]
pub struct MemoryCache<K, V> {
    entries: RwLock<HashMap<K, V>>,
    hits: AtomicU64,
    misses: AtomicU64,
}

impl<K, V> MemoryCache<K, V>
where
    K: Eq + Hash,
{
    pub fn new() -> Self {
        Self {
            entries: RwLock::new(HashMap::new()),
            hits: AtomicU64::new(0),
            misses: AtomicU64::new(0),
        }
    }

    /// Number of cached entries
    pub fn len(&self) -> usize {
        self.entries.read().len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.read().is_empty()
    }

    /// Number of lookups answered from the cache
    pub fn hits(&self) -> u64 {
        self.hits.load(Ordering::Relaxed)
    }

    /// Number of lookups that required a fresh load
    pub fn misses(&self) -> u64 {
        self.misses.load(Ordering::Relaxed)
    }
}

impl<K, V> Cache<K, V> for MemoryCache<K, V>
where
    K: Eq + Hash + Send + Sync,
    V: Clone + Send + Sync,
{
    fn get(&self, key: &K) -> Option<V> {
        let entries = self.entries.read();
        match entries.get(key) {
            Some(value) => {
                self.hits.fetch_add(1, Ordering::Relaxed);
                Some(value.clone())
            }
            None => {
                self.misses.fetch_add(1, Ordering::Relaxed);
                None
            }
        }
    }

    fn insert(&self, key: K, value: V) {
        self.entries.write().insert(key, value);
    }
}
