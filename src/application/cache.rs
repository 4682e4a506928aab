//! Memoization of pipeline steps by argument value.
//!
//! Each expensive step owns a `StepCache`. Entries are keyed by the BLAKE3
//! hash of the step's serialized arguments, so re-evaluating with unchanged
//! input is a lookup and any change in input is a different entry.

use serde::Serialize;
use std::collections::HashMap;
use std::future::Future;
use tracing::debug;

use crate::core::Result;

/// Stable key derived from a step's arguments
pub type CacheKey = blake3::Hash;

/// Hit and miss counters for one cache
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct CacheStats {
    pub hits: u64,
    pub misses: u64,
    pub entries: usize,
}

/// Values of one pipeline step, keyed by argument hash
#[derive(Debug)]
pub struct StepCache<V> {
    name: &'static str,
    entries: HashMap<CacheKey, V>,
    hits: u64,
    misses: u64,
}

impl<V: Clone> StepCache<V> {
    pub fn new(name: &'static str) -> Self {
        Self {
            name,
            entries: HashMap::new(),
            hits: 0,
            misses: 0,
        }
    }

    /// Hash of the JSON serialization of `args`
    pub fn key<K: Serialize + ?Sized>(args: &K) -> Result<CacheKey> {
        Ok(blake3::hash(&serde_json::to_vec(args)?))
    }

    fn lookup(&mut self, key: &CacheKey) -> Option<V> {
        match self.entries.get(key) {
            Some(value) => {
                self.hits += 1;
                debug!(cache = self.name, key = %key.to_hex(), "Cache hit");
                Some(value.clone())
            }
            None => {
                self.misses += 1;
                debug!(cache = self.name, key = %key.to_hex(), "Cache miss");
                None
            }
        }
    }

    /// Cached value for `args`, computing and storing it on a miss.
    ///
    /// Errors are returned as-is and nothing is stored for them.
    pub fn get_or_try_insert_with<K, F>(&mut self, args: &K, compute: F) -> Result<V>
    where
        K: Serialize + ?Sized,
        F: FnOnce() -> Result<V>,
    {
        let key = Self::key(args)?;
        if let Some(value) = self.lookup(&key) {
            return Ok(value);
        }
        let value = compute()?;
        self.entries.insert(key, value.clone());
        Ok(value)
    }

    /// Async counterpart of [`StepCache::get_or_try_insert_with`]
    pub async fn get_or_try_insert_with_async<K, F, Fut>(
        &mut self,
        args: &K,
        compute: F,
    ) -> Result<V>
    where
        K: Serialize + ?Sized,
        F: FnOnce() -> Fut,
        Fut: Future<Output = Result<V>>,
    {
        let key = Self::key(args)?;
        if let Some(value) = self.lookup(&key) {
            return Ok(value);
        }
        let value = compute().await?;
        self.entries.insert(key, value.clone());
        Ok(value)
    }

    /// Drop the entry for `args`. Returns whether one existed.
    pub fn invalidate<K: Serialize + ?Sized>(&mut self, args: &K) -> Result<bool> {
        let key = Self::key(args)?;
        Ok(self.entries.remove(&key).is_some())
    }

    pub fn clear(&mut self) {
        self.entries.clear();
    }

    pub fn stats(&self) -> CacheStats {
        CacheStats {
            hits: self.hits,
            misses: self.misses,
            entries: self.entries.len(),
        }
    }
}
