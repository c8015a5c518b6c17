// FICHIER : api/src/json_db/transactions/lock_manager.rs

use std::collections::HashMap;
use std::sync::{Arc, Mutex};
use tokio::sync::RwLock;

/// Gestionnaire de verrous (granularité : Collection)
///
/// Les verrous sont asynchrones : ils restent tenus pendant les `await`
/// d'une séquence lecture → modification → écriture.
#[derive(Debug, Default, Clone)]
pub struct LockManager {
    // Clé = "space/db/collection"
    locks: Arc<Mutex<HashMap<String, Arc<RwLock<()>>>>>,
}

impl LockManager {
    pub fn new() -> Self {
        Self::default()
    }

    /// Verrou partagé d'une collection (créé à la première demande).
    pub fn collection_lock(&self, space: &str, db: &str, collection: &str) -> Arc<RwLock<()>> {
        let key = format!("{}/{}/{}", space, db, collection);
        // La table ne contient que des Arc : un empoisonnement ne la corrompt pas
        let mut map = self.locks.lock().unwrap_or_else(|e| e.into_inner());
        map.entry(key)
            .or_insert_with(|| Arc::new(RwLock::new(())))
            .clone()
    }
}
