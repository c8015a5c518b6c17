// FICHIER : api/src/store/json_store.rs

use async_trait::async_trait;
use serde_json::{json, Value};
use std::sync::Arc;
use tracing::{debug, instrument};

use super::{engine_error, DocumentStore};
use crate::json_db::collections::manager::CollectionsManager;
use crate::json_db::collections::{touch_document, ID_FIELD};
use crate::json_db::query::executor::{apply_update, matches, project};
use crate::json_db::query::{
    DeleteResult, Filter, InsertOneResult, Projection, UpdateOp, UpdateResult,
};
use crate::json_db::storage::{JsonDbConfig, StorageEngine};
use crate::json_db::transactions::LockManager;
use crate::raise_error;
use crate::utils::config::StoreConfig;
use crate::utils::Result;

/// Magasin persistant : un fichier JSON par document, cache LRU en lecture.
#[derive(Debug, Clone)]
pub struct JsonDbStore {
    manager: CollectionsManager,
    collection: String,
    locks: LockManager,
}

impl JsonDbStore {
    /// Crée (si besoin) la base et la collection configurées.
    pub async fn open(config: &StoreConfig) -> Result<Self> {
        let storage = Arc::new(StorageEngine::with_cache_capacity(
            JsonDbConfig::new(config.data_root.clone()),
            config.cache_capacity,
        ));
        let manager = CollectionsManager::new(storage, &config.space, &config.db);

        if let Err(e) = manager.init_db().await {
            raise_error!(
                "ERR_STORE_INIT",
                error = format!("{:#}", e),
                context = json!({
                    "data_root": config.data_root.to_string_lossy(),
                    "space": config.space,
                    "db": config.db
                })
            );
        }
        if let Err(e) = manager.create_collection(&config.collection).await {
            raise_error!(
                "ERR_STORE_COLLECTION",
                error = format!("{:#}", e),
                context = json!({ "collection": config.collection })
            );
        }

        Ok(Self {
            manager,
            collection: config.collection.clone(),
            locks: LockManager::new(),
        })
    }

    fn lock(&self) -> Arc<tokio::sync::RwLock<()>> {
        self.locks
            .collection_lock(&self.manager.space, &self.manager.db, &self.collection)
    }

    /// Documents candidats : lecture ponctuelle si le filtre porte l'ID, sinon full scan.
    async fn select(&self, filter: &Filter) -> Result<Vec<Value>> {
        let docs: Vec<Value> = match filter.id_value() {
            Some(id) => self
                .manager
                .get_document(&self.collection, id)
                .await
                .map_err(engine_error)?
                .into_iter()
                .collect(),
            None => self
                .manager
                .list_all(&self.collection)
                .await
                .map_err(engine_error)?,
        };
        Ok(docs.into_iter().filter(|d| matches(d, filter)).collect())
    }
}

#[async_trait]
impl DocumentStore for JsonDbStore {
    #[instrument(skip(self), fields(collection = %self.collection))]
    async fn find(&self, filter: &Filter, projection: &Projection) -> Result<Vec<Value>> {
        let lock = self.lock();
        let _guard = lock.read().await;
        let docs = self.select(filter).await?;
        debug!(count = docs.len(), "find");
        Ok(docs
            .iter()
            .map(|d| project(d, projection, filter))
            .collect())
    }

    #[instrument(skip(self), fields(collection = %self.collection))]
    async fn find_one(&self, filter: &Filter, projection: &Projection) -> Result<Option<Value>> {
        let lock = self.lock();
        let _guard = lock.read().await;
        let docs = self.select(filter).await?;
        Ok(docs.first().map(|d| project(d, projection, filter)))
    }

    #[instrument(skip(self, doc), fields(collection = %self.collection))]
    async fn insert_one(&self, doc: Value) -> Result<InsertOneResult> {
        let lock = self.lock();
        let _guard = lock.write().await;
        let stored = self
            .manager
            .insert_with_id(&self.collection, doc)
            .await
            .map_err(engine_error)?;
        let inserted_id = stored
            .get(ID_FIELD)
            .and_then(|v| v.as_str())
            .unwrap_or_default()
            .to_string();
        debug!(id = %inserted_id, "Document inséré");
        Ok(InsertOneResult { inserted_id })
    }

    #[instrument(skip(self), fields(collection = %self.collection))]
    async fn update_one(&self, filter: &Filter, update: &UpdateOp) -> Result<UpdateResult> {
        let lock = self.lock();
        let _guard = lock.write().await;
        let Some(mut doc) = self.select(filter).await?.into_iter().next() else {
            return Ok(UpdateResult::default());
        };

        let modified = apply_update(&mut doc, update, filter).map_err(engine_error)?;
        if modified {
            touch_document(&mut doc);
            let id = doc
                .get(ID_FIELD)
                .and_then(|v| v.as_str())
                .unwrap_or_default()
                .to_string();
            self.manager
                .replace_document(&self.collection, &id, &doc)
                .await
                .map_err(engine_error)?;
        }
        Ok(UpdateResult {
            matched_count: 1,
            modified_count: u64::from(modified),
        })
    }

    #[instrument(skip(self), fields(collection = %self.collection))]
    async fn delete_one(&self, filter: &Filter) -> Result<DeleteResult> {
        let lock = self.lock();
        let _guard = lock.write().await;
        let target = self
            .select(filter)
            .await?
            .into_iter()
            .next()
            .and_then(|d| d.get(ID_FIELD)?.as_str().map(String::from));

        let deleted = match target {
            Some(id) => self
                .manager
                .delete_document(&self.collection, &id)
                .await
                .map_err(engine_error)?,
            None => false,
        };
        Ok(DeleteResult {
            deleted_count: u64::from(deleted),
        })
    }

    async fn count(&self) -> Result<usize> {
        self.manager
            .count(&self.collection)
            .await
            .map_err(engine_error)
    }
}
