// FICHIER : api/src/json_db/storage/mod.rs

pub mod cache;
pub mod file_storage;

use anyhow::Result;
use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::path::PathBuf;

// --- CONFIGURATION ---

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct JsonDbConfig {
    pub data_root: PathBuf,
}

impl JsonDbConfig {
    pub fn new(data_root: PathBuf) -> Self {
        Self { data_root }
    }

    pub fn db_root(&self, space: &str, db: &str) -> PathBuf {
        self.data_root.join(space).join(db)
    }

    pub fn db_collection_path(&self, space: &str, db: &str, collection: &str) -> PathBuf {
        self.db_root(space, db).join("collections").join(collection)
    }
}

// --- MOTEUR DE STOCKAGE ---

#[derive(Debug, Clone)]
pub struct StorageEngine {
    pub config: JsonDbConfig,
    pub cache: cache::Cache<String, Value>,
}

impl StorageEngine {
    pub fn new(config: JsonDbConfig) -> Self {
        Self::with_cache_capacity(config, 1000)
    }

    pub fn with_cache_capacity(config: JsonDbConfig, capacity: usize) -> Self {
        Self {
            config,
            cache: cache::Cache::new(capacity),
        }
    }

    fn cache_key(space: &str, db: &str, collection: &str, id: &str) -> String {
        format!("{}/{}/{}/{}", space, db, collection, id)
    }

    /// Écrit un document (Disque + Cache)
    pub async fn write_document(
        &self,
        space: &str,
        db: &str,
        collection: &str,
        id: &str,
        doc: &Value,
    ) -> Result<()> {
        // 1. Écriture disque atomique
        file_storage::write_document(&self.config, space, db, collection, id, doc).await?;

        // 2. Mise à jour du cache (opération synchrone en RAM)
        self.cache
            .put(Self::cache_key(space, db, collection, id), doc.clone());
        Ok(())
    }

    /// Lit un document (Cache d'abord, sinon Disque)
    pub async fn read_document(
        &self,
        space: &str,
        db: &str,
        collection: &str,
        id: &str,
    ) -> Result<Option<Value>> {
        let cache_key = Self::cache_key(space, db, collection, id);

        if let Some(doc) = self.cache.get(&cache_key) {
            return Ok(Some(doc));
        }

        let doc_opt = file_storage::read_document(&self.config, space, db, collection, id).await?;
        if let Some(doc) = &doc_opt {
            self.cache.put(cache_key, doc.clone());
        }
        Ok(doc_opt)
    }

    /// Supprime un document (Disque + Cache). `true` si le document existait.
    pub async fn delete_document(
        &self,
        space: &str,
        db: &str,
        collection: &str,
        id: &str,
    ) -> Result<bool> {
        let existed = file_storage::delete_document(&self.config, space, db, collection, id).await?;
        self.cache.remove(&Self::cache_key(space, db, collection, id));
        Ok(existed)
    }
}
