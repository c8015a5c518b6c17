// FICHIER : api/src/json_db/storage/file_storage.rs

use crate::json_db::storage::JsonDbConfig;
use anyhow::{bail, Context, Result};
use serde_json::Value;
use std::path::Path;
use tokio::fs;
use tokio::io::AsyncWriteExt;

/// Un ID de document devient un nom de fichier : on n'accepte que [A-Za-z0-9_-].
/// Le préfixe `_` est réservé aux fichiers techniques de la collection.
pub fn is_valid_document_id(id: &str) -> bool {
    !id.is_empty()
        && !id.starts_with('_')
        && id.len() <= 128
        && id
            .chars()
            .all(|c| c.is_ascii_alphanumeric() || c == '-' || c == '_')
}

pub fn open_db(config: &JsonDbConfig, space: &str, db: &str) -> Result<()> {
    let db_path = config.db_root(space, db);
    if !db_path.exists() {
        bail!("Database does not exist: {:?}", db_path);
    }
    Ok(())
}

/// Crée l'arborescence physique de la base (Async, idempotent).
pub async fn create_db(config: &JsonDbConfig, space: &str, db: &str) -> Result<()> {
    let collections_root = config.db_root(space, db).join("collections");
    fs::create_dir_all(&collections_root)
        .await
        .with_context(|| format!("Failed to create DB root {:?}", collections_root))?;
    Ok(())
}

pub async fn write_document(
    config: &JsonDbConfig,
    space: &str,
    db: &str,
    collection: &str,
    id: &str,
    doc: &Value,
) -> Result<()> {
    if !is_valid_document_id(id) {
        bail!("ID de document invalide : {:?}", id);
    }
    let file_path = config
        .db_collection_path(space, db, collection)
        .join(format!("{}.json", id));
    let content = serde_json::to_string_pretty(doc)?;
    atomic_write(file_path, content.as_bytes()).await
}

/// Lit un document. Un ID invalide ou un fichier absent donnent `None`.
pub async fn read_document(
    config: &JsonDbConfig,
    space: &str,
    db: &str,
    collection: &str,
    id: &str,
) -> Result<Option<Value>> {
    if !is_valid_document_id(id) {
        return Ok(None);
    }
    let file_path = config
        .db_collection_path(space, db, collection)
        .join(format!("{}.json", id));

    if !fs::try_exists(&file_path).await.unwrap_or(false) {
        return Ok(None);
    }

    let content = fs::read_to_string(&file_path)
        .await
        .with_context(|| format!("Lecture impossible : {:?}", file_path))?;
    let doc = serde_json::from_str(&content)
        .with_context(|| format!("Document JSON corrompu : {:?}", file_path))?;
    Ok(Some(doc))
}

/// Supprime un document. Renvoie `true` si un fichier a effectivement été supprimé.
pub async fn delete_document(
    config: &JsonDbConfig,
    space: &str,
    db: &str,
    collection: &str,
    id: &str,
) -> Result<bool> {
    if !is_valid_document_id(id) {
        return Ok(false);
    }
    let file_path = config
        .db_collection_path(space, db, collection)
        .join(format!("{}.json", id));

    match fs::remove_file(&file_path).await {
        Ok(()) => Ok(true),
        Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(false),
        Err(e) => Err(e).with_context(|| format!("Suppression impossible : {:?}", file_path)),
    }
}

/// Écriture atomique sécurisée (write -> sync -> rename)
pub async fn atomic_write<P: AsRef<Path>>(path: P, content: &[u8]) -> Result<()> {
    let path = path.as_ref();
    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent).await?;
    }

    let temp_path = path.with_extension("tmp");

    {
        let mut file = fs::File::create(&temp_path).await?;
        file.write_all(content).await?;
        // On force l'écriture physique sur le disque
        file.sync_all().await?;
    }

    fs::rename(&temp_path, path).await?;
    Ok(())
}
