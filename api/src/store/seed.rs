// FICHIER : api/src/store/seed.rs

//! Chargement des collaborateurs initiaux au démarrage.

use serde::Deserialize;
use serde_json::{json, Value};
use std::path::Path;
use tracing::{info, warn};

use super::DocumentStore;
use crate::json_db::collections::ID_FIELD;
use crate::json_db::storage::file_storage::is_valid_document_id;
use crate::model::{parse_years_of_experience, Collaborator, Skill, SKILLS_FIELD};
use crate::raise_error;
use crate::utils::{json as json_utils, Result};

/// Entrée du fichier d'amorçage. Les noms historiques sont acceptés.
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct SeedCollaborator {
    #[serde(default, alias = "_id")]
    id: Option<String>,
    #[serde(alias = "strName")]
    name: String,
    #[serde(alias = "strLastnames")]
    last_names: String,
    #[serde(alias = "strRol")]
    role: String,
    #[serde(default)]
    skills: Vec<SeedSkill>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct SeedSkill {
    #[serde(alias = "strSName")]
    name: String,
    #[serde(alias = "strSLevel")]
    level: String,
    #[serde(alias = "numSYOE")]
    years_of_experience: Value,
}

impl SeedCollaborator {
    fn into_document(self) -> std::result::Result<Value, String> {
        if let Some(id) = self.id.as_deref().filter(|id| !is_valid_document_id(id)) {
            return Err(format!("ID de document invalide : {:?}", id));
        }
        let skills = self
            .skills
            .into_iter()
            .map(|s| {
                parse_years_of_experience(&s.years_of_experience)
                    .map(|years| Skill {
                        name: s.name.clone(),
                        level: s.level,
                        years_of_experience: years,
                    })
                    .ok_or_else(|| format!("yearsOfExperience invalide pour '{}'", s.name))
            })
            .collect::<std::result::Result<Vec<_>, _>>()?;

        let mut doc = Collaborator::new_document(&self.name, &self.last_names, &self.role);
        doc[SKILLS_FIELD] = Value::Array(skills.iter().map(Skill::to_document).collect());
        if let Some(id) = self.id {
            doc[ID_FIELD] = Value::String(id);
        }
        Ok(doc)
    }
}

/// Insère les collaborateurs du fichier si la collection est vide.
/// Renvoie le nombre de documents insérés.
pub async fn load_initial_data(store: &dyn DocumentStore, path: &Path) -> Result<usize> {
    let existing = store.count().await?;
    if existing > 0 {
        info!(existing, "🌱 Collection déjà peuplée, amorçage ignoré");
        return Ok(0);
    }

    let content = match tokio::fs::read_to_string(path).await {
        Ok(c) => c,
        Err(e) => raise_error!(
            "ERR_SEED_FS_READ",
            error = e,
            context = json!({ "path": path.to_string_lossy() })
        ),
    };
    let entries: Vec<SeedCollaborator> = json_utils::parse(&content)?;

    let mut inserted = 0;
    for entry in entries {
        let doc = match entry.into_document() {
            Ok(doc) => doc,
            Err(reason) => raise_error!(
                "ERR_SEED_INVALID_ENTRY",
                error = reason,
                context = json!({ "path": path.to_string_lossy(), "index": inserted })
            ),
        };
        store.insert_one(doc).await?;
        inserted += 1;
    }

    if inserted == 0 {
        warn!(path = %path.display(), "Fichier d'amorçage vide");
    } else {
        info!(inserted, "🌱 Collaborateurs initiaux chargés");
    }
    Ok(inserted)
}
