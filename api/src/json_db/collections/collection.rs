// FICHIER : api/src/json_db/collections/collection.rs

//! Primitives collections : gestion des dossiers et fichiers JSON d’une collection.
//! Pas de logique de requête ici : uniquement persistance et I/O.

use anyhow::{Context, Result};
use serde_json::Value;
use std::path::PathBuf;
use tokio::fs;

use crate::json_db::storage::{file_storage, JsonDbConfig};

/// Racine des collections : {db_root}/collections/{collection}
pub fn collection_root(cfg: &JsonDbConfig, space: &str, db: &str, collection: &str) -> PathBuf {
    cfg.db_collection_path(space, db, collection)
}

/// S’assure que la collection existe (création récursive).
pub async fn create_collection_if_missing(
    cfg: &JsonDbConfig,
    space: &str,
    db: &str,
    collection: &str,
) -> Result<()> {
    let root = collection_root(cfg, space, db, collection);
    fs::create_dir_all(&root)
        .await
        .with_context(|| format!("Création de la collection impossible : {:?}", root))?;
    Ok(())
}

/// IDs des documents d'une collection (fichiers `*.json` nommés par un ID valide), triés.
pub async fn list_document_ids(
    cfg: &JsonDbConfig,
    space: &str,
    db: &str,
    collection: &str,
) -> Result<Vec<String>> {
    let root = collection_root(cfg, space, db, collection);
    let mut out = Vec::new();
    if !fs::try_exists(&root).await.unwrap_or(false) {
        return Ok(out);
    }
    let mut entries = fs::read_dir(&root).await?;
    while let Some(e) = entries.next_entry().await? {
        let p = e.path();
        if p.extension().and_then(|s| s.to_str()) != Some("json") {
            continue;
        }
        if let Some(stem) = p.file_stem().and_then(|s| s.to_str()) {
            if file_storage::is_valid_document_id(stem) {
                out.push(stem.to_string());
            }
        }
    }
    out.sort();
    Ok(out)
}

/// Lit tous les documents d'une collection directement sur disque.
pub async fn list_documents(
    cfg: &JsonDbConfig,
    space: &str,
    db: &str,
    collection: &str,
) -> Result<Vec<Value>> {
    let ids = list_document_ids(cfg, space, db, collection).await?;
    let mut docs = Vec::with_capacity(ids.len());
    for id in ids {
        // Un fichier supprimé entre le listing et la lecture est simplement ignoré
        if let Some(doc) = file_storage::read_document(cfg, space, db, collection, &id).await? {
            docs.push(doc);
        }
    }
    Ok(docs)
}
