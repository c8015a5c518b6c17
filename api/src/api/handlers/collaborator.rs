// FICHIER : api/src/api/handlers/collaborator.rs

use serde_json::{json, Value};
use std::sync::Arc;
use tracing::{info, instrument};

use crate::api::error::ApiError;
use crate::api::requests::{
    require_param, CreateCollaboratorDraft, UpdateCollaboratorDraft, Validate,
};
use crate::json_db::collections::ID_FIELD;
use crate::json_db::query::{Filter, Projection, UpdateOp};
use crate::model::{Collaborator, OpResult, LAST_NAMES_FIELD, NAME_FIELD, ROLE_FIELD};
use crate::store::DocumentStore;
use crate::utils::json as json_utils;

/// Opérations sur les documents collaborateurs.
#[derive(Debug, Clone)]
pub struct CollaboratorHandler {
    store: Arc<dyn DocumentStore>,
}

fn to_collaborator(doc: Value) -> Result<Collaborator, ApiError> {
    json_utils::from_value(doc).map_err(ApiError::from)
}

impl CollaboratorHandler {
    pub fn new(store: Arc<dyn DocumentStore>) -> Self {
        Self { store }
    }

    #[instrument(skip(self))]
    pub async fn list(&self) -> Result<Vec<Collaborator>, ApiError> {
        let docs = self.store.find(&Filter::new(), &Projection::default()).await?;
        if docs.is_empty() {
            return Err(ApiError::not_found("aucun collaborateur"));
        }
        docs.into_iter().map(to_collaborator).collect()
    }

    #[instrument(skip(self))]
    pub async fn get(&self, id: &str) -> Result<Collaborator, ApiError> {
        let id = require_param(id, ID_FIELD)?;
        match self
            .store
            .find_one(&Filter::by_id(id), &Projection::default())
            .await?
        {
            Some(doc) => to_collaborator(doc),
            None => Err(ApiError::not_found(format!("collaborateur {}", id))),
        }
    }

    #[instrument(skip(self, draft))]
    pub async fn create(&self, draft: CreateCollaboratorDraft) -> Result<OpResult, ApiError> {
        let new = draft.validate()?;
        let doc = Collaborator::new_document(&new.name, &new.last_names, &new.role);
        let ack = self.store.insert_one(doc).await?;
        info!(id = %ack.inserted_id, "👤 Collaborateur créé");
        Ok(ack.into())
    }

    #[instrument(skip(self, draft))]
    pub async fn update(&self, draft: UpdateCollaboratorDraft) -> Result<OpResult, ApiError> {
        let req = draft.validate()?;
        let update = UpdateOp::set([
            (NAME_FIELD, json!(req.fields.name)),
            (LAST_NAMES_FIELD, json!(req.fields.last_names)),
            (ROLE_FIELD, json!(req.fields.role)),
        ]);
        let res = self.store.update_one(&Filter::by_id(&req.id), &update).await?;
        if res.matched_count == 0 {
            return Err(ApiError::not_found(format!("collaborateur {}", req.id)));
        }
        Ok(res.into())
    }

    #[instrument(skip(self))]
    pub async fn delete(&self, id: &str) -> Result<OpResult, ApiError> {
        let id = require_param(id, ID_FIELD)?;
        let res = self.store.delete_one(&Filter::by_id(id)).await?;
        if res.deleted_count == 0 {
            return Err(ApiError::not_found(format!("collaborateur {}", id)));
        }
        info!(id, "🗑️ Collaborateur supprimé");
        Ok(res.into())
    }
}
