// FICHIER : api/src/json_db/storage/cache.rs

//! Cache LRU (Least Recently Used) thread-safe des documents lus sur disque.

use lru::LruCache;
use std::hash::Hash;
use std::num::NonZeroUsize;
use std::sync::{Arc, Mutex};

const FALLBACK_CAPACITY: NonZeroUsize = match NonZeroUsize::new(100) {
    Some(n) => n,
    None => unreachable!(),
};

#[derive(Debug, Clone)]
pub struct Cache<K: Hash + Eq, V> {
    // Mutex car LruCache::get réordonne les entrées (promotion MRU)
    store: Arc<Mutex<LruCache<K, V>>>,
}

impl<K, V> Cache<K, V>
where
    K: Hash + Eq + Clone,
    V: Clone,
{
    /// Capacité nulle : repli sur une capacité par défaut.
    pub fn new(capacity: usize) -> Self {
        let cap = NonZeroUsize::new(capacity).unwrap_or(FALLBACK_CAPACITY);
        Self {
            store: Arc::new(Mutex::new(LruCache::new(cap))),
        }
    }

    pub fn get(&self, key: &K) -> Option<V> {
        let mut guard = self.store.lock().ok()?;
        guard.get(key).cloned()
    }

    pub fn put(&self, key: K, value: V) {
        if let Ok(mut guard) = self.store.lock() {
            // L'insertion gère l'éviction si la capacité est dépassée
            guard.put(key, value);
        }
    }

    pub fn remove(&self, key: &K) {
        if let Ok(mut guard) = self.store.lock() {
            guard.pop(key);
        }
    }
}
