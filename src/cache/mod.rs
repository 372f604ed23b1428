//! Ephemeral object cache
//!
//! Maps keys to [`Weak`] references. The cache never owns what it indexes:
//! once the last [`Rc`] held elsewhere is dropped, lookups for that key report
//! absence. Dead entries stay in the map until they are overwritten, removed,
//! or purged by [`EphemeralCache::sweep`], but they are never observable.
//!
//! `Rc`/`Weak` make the cache `!Send`; it is meant to be driven from one thread.

pub mod key;

pub use key::CacheKey;

use crate::core::CacheResult;
use std::collections::HashMap;
use std::fmt;
use std::rc::{Rc, Weak};

pub struct EphemeralCache<K, V: ?Sized> {
    entries: HashMap<K, Weak<V>>,
}

impl<K: CacheKey, V: ?Sized> EphemeralCache<K, V> {
    pub fn new() -> Self {
        Self {
            entries: HashMap::new(),
        }
    }

    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            entries: HashMap::with_capacity(capacity),
        }
    }

    /// Registers `object` under `key`, replacing any previous entry.
    ///
    /// Only a weak reference is kept; the caller's `Rc` is the owner.
    pub fn add(&mut self, key: K, object: &Rc<V>) -> CacheResult<()> {
        key.validate_key()?;
        self.entries.insert(key, Rc::downgrade(object));
        Ok(())
    }

    /// Returns the object if it is still alive
    pub fn get(&self, key: &K) -> CacheResult<Option<Rc<V>>> {
        key.validate_key()?;
        Ok(self.entries.get(key).and_then(Weak::upgrade))
    }

    /// Unregisters `key`. Absent keys are a no-op.
    ///
    /// Returns the object if it was still alive.
    pub fn remove(&mut self, key: &K) -> CacheResult<Option<Rc<V>>> {
        key.validate_key()?;
        Ok(self.entries.remove(key).and_then(|weak| weak.upgrade()))
    }

    /// Whether `key` currently resolves to a live object
    pub fn contains_key(&self, key: &K) -> bool {
        self.entries
            .get(key)
            .is_some_and(|weak| weak.strong_count() > 0)
    }

    /// Number of live entries.
    ///
    /// Dropping a cached object elsewhere lowers this without any call on the
    /// cache, so treat it as a snapshot.
    pub fn size(&self) -> usize {
        self.entries
            .values()
            .filter(|weak| weak.strong_count() > 0)
            .count()
    }

    pub fn is_empty(&self) -> bool {
        self.size() == 0
    }

    /// Number of map slots, including entries whose object is gone
    pub fn tracked(&self) -> usize {
        self.entries.len()
    }

    /// Keys that currently resolve to live objects
    pub fn keys(&self) -> Vec<K> {
        self.entries
            .iter()
            .filter(|(_, weak)| weak.strong_count() > 0)
            .map(|(key, _)| key.clone())
            .collect()
    }

    /// Live objects, in no particular order
    pub fn values(&self) -> Vec<Rc<V>> {
        self.entries.values().filter_map(Weak::upgrade).collect()
    }

    /// Purges entries whose object has been dropped, returning how many
    pub fn sweep(&mut self) -> usize {
        let before = self.entries.len();
        self.entries.retain(|_, weak| weak.strong_count() > 0);
        before - self.entries.len()
    }

    pub fn clear(&mut self) {
        self.entries.clear();
    }
}

impl<K: CacheKey, V: ?Sized> Default for EphemeralCache<K, V> {
    fn default() -> Self {
        Self::new()
    }
}

impl<K: CacheKey + fmt::Debug, V: ?Sized> fmt::Debug for EphemeralCache<K, V> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("EphemeralCache")
            .field("live", &self.keys())
            .field("tracked", &self.entries.len())
            .finish()
    }
}
