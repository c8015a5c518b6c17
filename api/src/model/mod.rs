// FICHIER : api/src/model/mod.rs

//! Modèle de données exposé par l'API : collaborateurs et compétences embarquées.

use crate::json_db::query::{DeleteResult, InsertOneResult, UpdateResult};
use crate::utils::prelude::*;
use utoipa::ToSchema;

// --- NOMS DE CHAMPS PERSISTÉS ---

pub const NAME_FIELD: &str = "name";
pub const LAST_NAMES_FIELD: &str = "lastNames";
pub const ROLE_FIELD: &str = "role";
pub const SKILLS_FIELD: &str = "skills";
pub const LEVEL_FIELD: &str = "level";
pub const YEARS_FIELD: &str = "yearsOfExperience";

/// Chemin d'un champ d'élément de `skills` (ex: `skills.name`).
pub fn skill_path(field: &str) -> String {
    format!("{}.{}", SKILLS_FIELD, field)
}

/// Chemin positionnel vers l'élément de `skills` qui a satisfait le filtre.
pub fn positional_skill_path(field: &str) -> String {
    format!("{}.$.{}", SKILLS_FIELD, field)
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct Collaborator {
    pub id: String,
    pub name: String,
    pub last_names: String,
    pub role: String,
    #[serde(default)]
    pub skills: Vec<Skill>,
}

impl Collaborator {
    /// Document neuf à insérer (l'ID est attribué par le magasin).
    pub fn new_document(name: &str, last_names: &str, role: &str) -> Value {
        json!({
            NAME_FIELD: name,
            LAST_NAMES_FIELD: last_names,
            ROLE_FIELD: role,
            SKILLS_FIELD: []
        })
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct Skill {
    pub name: String,
    pub level: String,
    pub years_of_experience: u64,
}

impl Skill {
    pub fn to_document(&self) -> Value {
        json!({
            NAME_FIELD: self.name,
            LEVEL_FIELD: self.level,
            YEARS_FIELD: self.years_of_experience
        })
    }
}

/// Lecture stricte des années d'expérience : entier JSON positif ou chaîne
/// de chiffres décimaux. Tout le reste est refusé.
pub fn parse_years_of_experience(value: &Value) -> Option<u64> {
    match value {
        Value::Number(n) => n.as_u64(),
        Value::String(s) => {
            let s = s.trim();
            if !s.is_empty() && s.bytes().all(|b| b.is_ascii_digit()) {
                s.parse().ok()
            } else {
                None
            }
        }
        _ => None,
    }
}

/// Accusé normalisé de toutes les opérations de mutation.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct OpResult {
    pub matched: bool,
    pub affected_count: u64,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub inserted_id: Option<String>,
}

impl From<InsertOneResult> for OpResult {
    fn from(res: InsertOneResult) -> Self {
        Self {
            matched: true,
            affected_count: 1,
            inserted_id: Some(res.inserted_id),
        }
    }
}

impl From<UpdateResult> for OpResult {
    fn from(res: UpdateResult) -> Self {
        Self {
            matched: res.matched_count > 0,
            affected_count: res.modified_count,
            inserted_id: None,
        }
    }
}

impl From<DeleteResult> for OpResult {
    fn from(res: DeleteResult) -> Self {
        Self {
            matched: res.deleted_count > 0,
            affected_count: res.deleted_count,
            inserted_id: None,
        }
    }
}
