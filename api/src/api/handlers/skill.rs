// FICHIER : api/src/api/handlers/skill.rs

use serde_json::json;
use std::sync::Arc;
use tracing::{debug, instrument};

use crate::api::error::ApiError;
use crate::api::requests::{require_param, CreateSkillDraft, UpdateSkillDraft, Validate};
use crate::json_db::collections::ID_FIELD;
use crate::json_db::query::{Filter, Projection, UpdateOp};
use crate::model::{
    positional_skill_path, skill_path, OpResult, Skill, LEVEL_FIELD, NAME_FIELD, SKILLS_FIELD,
    YEARS_FIELD,
};
use crate::store::DocumentStore;
use crate::utils::json as json_utils;

/// Opérations sur le tableau `skills` embarqué dans un collaborateur.
///
/// Une compétence est adressée par (ID du collaborateur, nom). Les noms ne
/// sont pas uniques : les lectures renvoient la première correspondance et
/// la suppression retire toutes les entrées de ce nom.
#[derive(Debug, Clone)]
pub struct SkillHandler {
    store: Arc<dyn DocumentStore>,
}

impl SkillHandler {
    pub fn new(store: Arc<dyn DocumentStore>) -> Self {
        Self { store }
    }

    #[instrument(skip(self))]
    pub async fn list(&self, collaborator_id: &str) -> Result<Vec<Skill>, ApiError> {
        let id = require_param(collaborator_id, ID_FIELD)?;
        let doc = self
            .store
            .find_one(&Filter::by_id(id), &Projection::fields(&[SKILLS_FIELD]).without_id())
            .await?
            .ok_or_else(|| ApiError::not_found(format!("collaborateur {}", id)))?;

        let skills = doc
            .get(SKILLS_FIELD)
            .cloned()
            .ok_or_else(|| ApiError::not_found(format!("aucun champ skills pour {}", id)))?;
        Ok(json_utils::from_value(skills)?)
    }

    #[instrument(skip(self))]
    pub async fn get(&self, collaborator_id: &str, skill_name: &str) -> Result<Skill, ApiError> {
        let id = require_param(collaborator_id, ID_FIELD)?;
        let name = require_param(skill_name, NAME_FIELD)?;

        let filter = Filter::by_id(id).eq(&skill_path(NAME_FIELD), name);
        let skill = self
            .store
            .find_one(&filter, &Projection::positional(SKILLS_FIELD).without_id())
            .await?
            .and_then(|doc| doc.get(SKILLS_FIELD)?.get(0).cloned())
            .ok_or_else(|| ApiError::not_found(format!("compétence {} de {}", name, id)))?;
        Ok(json_utils::from_value(skill)?)
    }

    /// Ajoute la compétence en fin de tableau, sans contrôle de doublon.
    #[instrument(skip(self, draft))]
    pub async fn create(&self, draft: CreateSkillDraft) -> Result<OpResult, ApiError> {
        let req = draft.validate()?;
        let push = UpdateOp::Push {
            field: SKILLS_FIELD.to_string(),
            value: req.skill.to_document(),
        };
        let res = self
            .store
            .update_one(&Filter::by_id(&req.collaborator_id), &push)
            .await?;
        if res.modified_count == 0 {
            return Err(ApiError::not_found(format!(
                "collaborateur {}",
                req.collaborator_id
            )));
        }
        debug!(skill = %req.skill.name, "Compétence ajoutée");
        Ok(res.into())
    }

    /// Met à jour niveau et expérience de la première compétence de ce nom.
    #[instrument(skip(self, draft))]
    pub async fn update(&self, draft: UpdateSkillDraft) -> Result<OpResult, ApiError> {
        let req = draft.validate()?;
        let filter =
            Filter::by_id(&req.collaborator_id).eq(&skill_path(NAME_FIELD), req.skill.name.as_str());
        let set = UpdateOp::set([
            (positional_skill_path(LEVEL_FIELD), json!(req.skill.level)),
            (
                positional_skill_path(YEARS_FIELD),
                json!(req.skill.years_of_experience),
            ),
        ]);

        let res = self.store.update_one(&filter, &set).await?;
        if res.matched_count == 0 {
            return Err(ApiError::not_found(format!(
                "compétence {} de {}",
                req.skill.name, req.collaborator_id
            )));
        }
        Ok(res.into())
    }

    /// Retire toutes les compétences portant ce nom.
    #[instrument(skip(self))]
    pub async fn delete(&self, collaborator_id: &str, skill_name: &str) -> Result<OpResult, ApiError> {
        let id = require_param(collaborator_id, ID_FIELD)?;
        let name = require_param(skill_name, NAME_FIELD)?;

        let pull = UpdateOp::Pull {
            field: SKILLS_FIELD.to_string(),
            criteria: Filter::new().eq(NAME_FIELD, name),
        };
        let res = self.store.update_one(&Filter::by_id(id), &pull).await?;
        if res.modified_count == 0 {
            return Err(ApiError::not_found(format!("compétence {} de {}", name, id)));
        }
        Ok(res.into())
    }
}
