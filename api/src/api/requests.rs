// FICHIER : api/src/api/requests.rs

//! Corps de requête : un brouillon par opération (champs optionnels, noms
//! historiques acceptés), puis une étape `validate()` vers le type final.

use serde::de::DeserializeOwned;
use serde::Deserialize;
use serde_json::Value;
use utoipa::ToSchema;

use crate::api::error::ApiError;
use crate::model::{
    parse_years_of_experience, Skill, LAST_NAMES_FIELD, LEVEL_FIELD, NAME_FIELD, ROLE_FIELD,
    YEARS_FIELD,
};
use crate::json_db::collections::ID_FIELD;

/// Passage d'un brouillon au type de requête validé.
pub trait Validate {
    type Output;

    fn validate(self) -> Result<Self::Output, ApiError>;
}

/// Décode un corps JSON. Corps absent, illisible, non-objet ou `{}` : 472.
pub fn parse_body<D: DeserializeOwned>(body: &[u8]) -> Result<D, ApiError> {
    let value: Value = serde_json::from_slice(body)
        .map_err(|e| ApiError::not_found(format!("corps illisible ({})", e)))?;

    match &value {
        Value::Object(map) if !map.is_empty() => {}
        _ => return Err(ApiError::not_found("corps vide ou non-objet")),
    }

    serde_json::from_value(value).map_err(|e| ApiError::not_found(format!("corps invalide ({})", e)))
}

/// Paramètre de chemin non vide.
pub fn require_param<'a>(value: &'a str, field: &str) -> Result<&'a str, ApiError> {
    if value.is_empty() {
        Err(ApiError::missing(field))
    } else {
        Ok(value)
    }
}

/// Chaîne présente, éventuellement vide, conservée telle quelle.
/// `null`, absent ou autre type comptent comme manquants.
fn required_str(value: Option<Value>, field: &str) -> Result<String, ApiError> {
    match value {
        Some(Value::String(s)) => Ok(s),
        _ => Err(ApiError::missing(field)),
    }
}

fn required_years(value: Option<Value>) -> Result<u64, ApiError> {
    value
        .as_ref()
        .and_then(parse_years_of_experience)
        .ok_or_else(|| ApiError::missing(YEARS_FIELD))
}

// --- COLLABORATEURS ---

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewCollaborator {
    pub name: String,
    pub last_names: String,
    pub role: String,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CollaboratorUpdate {
    pub id: String,
    pub fields: NewCollaborator,
}

#[derive(Debug, Default, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct CreateCollaboratorDraft {
    #[serde(default, alias = "strName")]
    #[schema(value_type = String, required = true)]
    pub name: Option<Value>,
    #[serde(default, alias = "strLastnames")]
    #[schema(value_type = String, required = true)]
    pub last_names: Option<Value>,
    #[serde(default, alias = "strRol")]
    #[schema(value_type = String, required = true)]
    pub role: Option<Value>,
}

impl Validate for CreateCollaboratorDraft {
    type Output = NewCollaborator;

    fn validate(self) -> Result<NewCollaborator, ApiError> {
        Ok(NewCollaborator {
            name: required_str(self.name, NAME_FIELD)?,
            last_names: required_str(self.last_names, LAST_NAMES_FIELD)?,
            role: required_str(self.role, ROLE_FIELD)?,
        })
    }
}

#[derive(Debug, Default, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct UpdateCollaboratorDraft {
    #[serde(default, alias = "_id")]
    #[schema(value_type = String, required = true)]
    pub id: Option<Value>,
    #[serde(default, alias = "strName")]
    #[schema(value_type = String, required = true)]
    pub name: Option<Value>,
    #[serde(default, alias = "strLastnames")]
    #[schema(value_type = String, required = true)]
    pub last_names: Option<Value>,
    #[serde(default, alias = "strRol")]
    #[schema(value_type = String, required = true)]
    pub role: Option<Value>,
}

impl Validate for UpdateCollaboratorDraft {
    type Output = CollaboratorUpdate;

    fn validate(self) -> Result<CollaboratorUpdate, ApiError> {
        Ok(CollaboratorUpdate {
            id: required_str(self.id, ID_FIELD)?,
            fields: NewCollaborator {
                name: required_str(self.name, NAME_FIELD)?,
                last_names: required_str(self.last_names, LAST_NAMES_FIELD)?,
                role: required_str(self.role, ROLE_FIELD)?,
            },
        })
    }
}

// --- COMPÉTENCES ---

/// Compétence adressée par l'ID de son collaborateur.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SkillRequest {
    pub collaborator_id: String,
    pub skill: Skill,
}

/// Même forme pour la création (`$push`) et la mise à jour (`$set` positionnel).
#[derive(Debug, Default, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct SkillDraft {
    #[serde(default, alias = "_id")]
    #[schema(value_type = String, required = true)]
    pub id: Option<Value>,
    #[serde(default, alias = "strSName")]
    #[schema(value_type = String, required = true)]
    pub name: Option<Value>,
    #[serde(default, alias = "strSLevel")]
    #[schema(value_type = String, required = true)]
    pub level: Option<Value>,
    #[serde(default, alias = "numSYOE")]
    #[schema(value_type = u64, required = true)]
    pub years_of_experience: Option<Value>,
}

pub type CreateSkillDraft = SkillDraft;
pub type UpdateSkillDraft = SkillDraft;

impl Validate for SkillDraft {
    type Output = SkillRequest;

    fn validate(self) -> Result<SkillRequest, ApiError> {
        Ok(SkillRequest {
            collaborator_id: required_str(self.id, ID_FIELD)?,
            skill: Skill {
                name: required_str(self.name, NAME_FIELD)?,
                level: required_str(self.level, LEVEL_FIELD)?,
                years_of_experience: required_years(self.years_of_experience)?,
            },
        })
    }
}
