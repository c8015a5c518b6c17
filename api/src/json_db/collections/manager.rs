// FICHIER : api/src/json_db/collections/manager.rs

use crate::json_db::storage::{file_storage, StorageEngine};

use anyhow::{anyhow, bail, Context, Result};
use serde_json::Value;
use std::sync::Arc;
use tracing::{debug, instrument};

use super::{collection, sort_by_creation, stamp_new_document, ID_FIELD};

/// Point d'entrée unique vers les collections d'une base (space/db).
#[derive(Debug, Clone)]
pub struct CollectionsManager {
    pub storage: Arc<StorageEngine>,
    pub space: String,
    pub db: String,
}

impl CollectionsManager {
    pub fn new(storage: Arc<StorageEngine>, space: &str, db: &str) -> Self {
        Self {
            storage,
            space: space.to_string(),
            db: db.to_string(),
        }
    }

    /// Crée l'arborescence de la base puis vérifie qu'elle est ouvrable.
    pub async fn init_db(&self) -> Result<()> {
        file_storage::create_db(&self.storage.config, &self.space, &self.db).await?;
        file_storage::open_db(&self.storage.config, &self.space, &self.db)
    }

    pub async fn create_collection(&self, name: &str) -> Result<()> {
        collection::create_collection_if_missing(&self.storage.config, &self.space, &self.db, name)
            .await
    }

    // --- MÉTHODES DE LECTURE ---

    pub async fn get_document(&self, collection: &str, id: &str) -> Result<Option<Value>> {
        self.storage
            .read_document(&self.space, &self.db, collection, id)
            .await
            .with_context(|| format!("Erreur I/O lors de la lecture de l'ID {}", id))
    }

    /// Tous les documents d'une collection, dans l'ordre de création.
    #[instrument(skip(self), fields(space = %self.space, db = %self.db))]
    pub async fn list_all(&self, collection: &str) -> Result<Vec<Value>> {
        let mut docs =
            collection::list_documents(&self.storage.config, &self.space, &self.db, collection)
                .await?;
        sort_by_creation(&mut docs);
        debug!(count = docs.len(), "Full scan de la collection");
        Ok(docs)
    }

    pub async fn count(&self, collection: &str) -> Result<usize> {
        let ids =
            collection::list_document_ids(&self.storage.config, &self.space, &self.db, collection)
                .await?;
        Ok(ids.len())
    }

    // --- ÉCRITURE ET MISE À JOUR ---

    /// Écrit un document qui porte déjà son ID.
    pub async fn insert_raw(&self, collection: &str, doc: &Value) -> Result<()> {
        let id = doc
            .get(ID_FIELD)
            .and_then(|v| v.as_str())
            .ok_or_else(|| anyhow!("ID manquant"))?;
        self.storage
            .write_document(&self.space, &self.db, collection, id, doc)
            .await
    }

    /// Génère ID + horodatages puis écrit. Renvoie le document final.
    pub async fn insert_with_id(&self, collection: &str, mut doc: Value) -> Result<Value> {
        let id = stamp_new_document(&mut doc)?;
        if self.get_document(collection, &id).await?.is_some() {
            bail!("Un document avec l'ID '{}' existe déjà dans '{}'", id, collection);
        }
        self.insert_raw(collection, &doc).await?;
        Ok(doc)
    }

    /// Remplace entièrement un document existant (l'ID est immuable).
    pub async fn replace_document(&self, collection: &str, id: &str, doc: &Value) -> Result<()> {
        if doc.get(ID_FIELD).and_then(|v| v.as_str()) != Some(id) {
            bail!("L'ID d'un document est immuable ({})", id);
        }
        self.storage
            .write_document(&self.space, &self.db, collection, id, doc)
            .await
    }

    pub async fn delete_document(&self, collection: &str, id: &str) -> Result<bool> {
        self.storage
            .delete_document(&self.space, &self.db, collection, id)
            .await
    }
}
