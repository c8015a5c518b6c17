// FICHIER : api/src/store/memory_store.rs

use async_trait::async_trait;
use serde_json::Value;
use tokio::sync::RwLock;
use tracing::instrument;

use super::{engine_error, DocumentStore};
use crate::json_db::collections::{stamp_new_document, touch_document, ID_FIELD};
use crate::json_db::query::executor::{apply_update, matches, project};
use crate::json_db::query::{
    DeleteResult, Filter, InsertOneResult, Projection, UpdateOp, UpdateResult,
};
use crate::utils::{AppError, Result};

/// Magasin volatil (tests, démonstrations). Même sémantique que `JsonDbStore`.
#[derive(Debug, Default)]
pub struct MemoryStore {
    // Ordre du vecteur = ordre de création
    docs: RwLock<Vec<Value>>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl DocumentStore for MemoryStore {
    async fn find(&self, filter: &Filter, projection: &Projection) -> Result<Vec<Value>> {
        let docs = self.docs.read().await;
        Ok(docs
            .iter()
            .filter(|d| matches(d, filter))
            .map(|d| project(d, projection, filter))
            .collect())
    }

    async fn find_one(&self, filter: &Filter, projection: &Projection) -> Result<Option<Value>> {
        let docs = self.docs.read().await;
        Ok(docs
            .iter()
            .find(|d| matches(d, filter))
            .map(|d| project(d, projection, filter)))
    }

    #[instrument(skip(self, doc))]
    async fn insert_one(&self, mut doc: Value) -> Result<InsertOneResult> {
        let mut docs = self.docs.write().await;
        let inserted_id = stamp_new_document(&mut doc).map_err(engine_error)?;
        if docs
            .iter()
            .any(|d| d.get(ID_FIELD).and_then(|v| v.as_str()) == Some(inserted_id.as_str()))
        {
            return Err(AppError::Database(format!(
                "Un document avec l'ID '{}' existe déjà",
                inserted_id
            )));
        }
        docs.push(doc);
        Ok(InsertOneResult { inserted_id })
    }

    #[instrument(skip(self))]
    async fn update_one(&self, filter: &Filter, update: &UpdateOp) -> Result<UpdateResult> {
        let mut docs = self.docs.write().await;
        let Some(doc) = docs.iter_mut().find(|d| matches(d, filter)) else {
            return Ok(UpdateResult::default());
        };

        // Travail sur une copie : un opérateur invalide ne laisse pas de demi-écriture
        let mut updated = doc.clone();
        let modified = apply_update(&mut updated, update, filter).map_err(engine_error)?;
        if modified {
            touch_document(&mut updated);
            *doc = updated;
        }
        Ok(UpdateResult {
            matched_count: 1,
            modified_count: u64::from(modified),
        })
    }

    #[instrument(skip(self))]
    async fn delete_one(&self, filter: &Filter) -> Result<DeleteResult> {
        let mut docs = self.docs.write().await;
        let deleted_count = match docs.iter().position(|d| matches(d, filter)) {
            Some(idx) => {
                docs.remove(idx);
                1
            }
            None => 0,
        };
        Ok(DeleteResult { deleted_count })
    }

    async fn count(&self) -> Result<usize> {
        Ok(self.docs.read().await.len())
    }
}
