//! Read-through memoization for the two external lookups.
//!
//! A [`MemoCache`] is handed to the [`crate::Geocoder`] and the
//! [`crate::ForecastFetcher`] when they are built, instead of living in a
//! global. Entries are written once per key and are **never evicted**; a stale
//! entry stays until the cache is dropped or [`MemoCache::clear`] is called.
//! Only successful loads are stored, failed loads are retried on the next call.

use log::debug;
use std::collections::{hash_map::Entry, HashMap};
use std::fmt::Debug;
use std::future::Future;
use std::hash::Hash;
use tokio::sync::Mutex;

pub struct MemoCache<K, V> {
    name: &'static str,
    entries: Mutex<HashMap<K, V>>,
}

impl<K, V> MemoCache<K, V>
where
    K: Eq + Hash + Clone + Debug,
    V: Clone,
{
    /// Creates an empty cache. `name` only shows up in log lines.
    pub fn new(name: &'static str) -> Self {
        Self {
            name,
            entries: Mutex::new(HashMap::new()),
        }
    }

    /// Returns the memoized value for `key`, or runs `load` and stores its result.
    ///
    /// The lock is not held while `load` runs. If two callers race on the same
    /// key, the value inserted first wins and both callers get it.
    ///
    /// # Errors
    ///
    /// Returns whatever `load` returns on failure; nothing is stored in that case.
    pub async fn get_or_try_load<F, Fut, E>(&self, key: K, load: F) -> Result<V, E>
    where
        F: FnOnce() -> Fut,
        Fut: Future<Output = Result<V, E>>,
    {
        {
            let entries = self.entries.lock().await;
            if let Some(cached) = entries.get(&key) {
                debug!("{} cache hit for {:?}", self.name, key);
                return Ok(cached.clone());
            }
        }

        debug!("{} cache miss for {:?}", self.name, key);
        let loaded = load().await?;

        let mut entries = self.entries.lock().await;
        match entries.entry(key) {
            Entry::Occupied(entry) => Ok(entry.get().clone()),
            Entry::Vacant(entry) => {
                entry.insert(loaded.clone());
                Ok(loaded)
            }
        }
    }

    pub async fn get(&self, key: &K) -> Option<V> {
        self.entries.lock().await.get(key).cloned()
    }

    pub async fn len(&self) -> usize {
        self.entries.lock().await.len()
    }

    pub async fn is_empty(&self) -> bool {
        self.entries.lock().await.is_empty()
    }

    /// Drops every entry.
    pub async fn clear(&self) {
        self.entries.lock().await.clear();
    }
}
