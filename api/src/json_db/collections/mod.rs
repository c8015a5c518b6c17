//! Gestionnaire de collections JSON

use anyhow::{anyhow, Result};
use chrono::{SecondsFormat, Utc};
use serde_json::Value;
use uuid::Uuid;

pub mod collection;
pub mod manager;

/// Clé primaire de chaque document.
pub const ID_FIELD: &str = "id";
pub const CREATED_AT_FIELD: &str = "createdAt";
pub const UPDATED_AT_FIELD: &str = "updatedAt";

fn now_timestamp() -> String {
    Utc::now().to_rfc3339_opts(SecondsFormat::Nanos, true)
}

/// Identifiant opaque généré par le moteur (32 caractères hexadécimaux).
pub fn new_document_id() -> String {
    Uuid::new_v4().simple().to_string()
}

/// Prépare un document neuf : génère l'ID (s'il manque) et pose les horodatages.
/// Renvoie l'ID du document.
pub fn stamp_new_document(doc: &mut Value) -> Result<String> {
    let obj = doc
        .as_object_mut()
        .ok_or_else(|| anyhow!("Un document doit être un objet JSON"))?;

    let id = match obj.get(ID_FIELD).and_then(|v| v.as_str()) {
        Some(existing) => existing.to_string(),
        None => {
            let generated = new_document_id();
            obj.insert(ID_FIELD.to_string(), Value::String(generated.clone()));
            generated
        }
    };

    let now = now_timestamp();
    obj.entry(CREATED_AT_FIELD)
        .or_insert_with(|| Value::String(now.clone()));
    obj.insert(UPDATED_AT_FIELD.to_string(), Value::String(now));
    Ok(id)
}

/// Met à jour `updatedAt` après une modification.
pub fn touch_document(doc: &mut Value) {
    if let Some(obj) = doc.as_object_mut() {
        obj.insert(
            UPDATED_AT_FIELD.to_string(),
            Value::String(now_timestamp()),
        );
    }
}

/// Tri stable par date de création (ordre d'insertion).
pub fn sort_by_creation(docs: &mut [Value]) {
    docs.sort_by(|a, b| {
        let ka = a.get(CREATED_AT_FIELD).and_then(|v| v.as_str()).unwrap_or("");
        let kb = b.get(CREATED_AT_FIELD).and_then(|v| v.as_str()).unwrap_or("");
        ka.cmp(kb)
    });
}
