// FICHIER : api/src/store/mod.rs

//! Accès au magasin de documents des collaborateurs.
//!
//! Les handlers HTTP ne connaissent que le trait [`DocumentStore`] ; le
//! fournisseur concret est choisi par la configuration au démarrage.

use async_trait::async_trait;
use serde_json::Value;
use std::fmt::Debug;
use std::sync::Arc;
use tracing::info;

use crate::json_db::query::{
    DeleteResult, Filter, InsertOneResult, Projection, UpdateOp, UpdateResult,
};
use crate::utils::config::{StoreConfig, StoreProvider};
use crate::utils::{AppError, Result};

pub mod json_store;
pub mod memory_store;
pub mod seed;

pub use json_store::JsonDbStore;
pub use memory_store::MemoryStore;
pub use seed::load_initial_data;

/// Primitives de requête d'une collection unique.
///
/// Chaque mutation porte sur au plus un document et s'exécute atomiquement.
#[async_trait]
pub trait DocumentStore: Send + Sync + Debug {
    /// Tous les documents satisfaisant le filtre, dans l'ordre de création.
    async fn find(&self, filter: &Filter, projection: &Projection) -> Result<Vec<Value>>;

    /// Premier document satisfaisant le filtre.
    async fn find_one(&self, filter: &Filter, projection: &Projection) -> Result<Option<Value>>;

    /// Insère un document ; l'ID est généré s'il est absent.
    async fn insert_one(&self, doc: Value) -> Result<InsertOneResult>;

    async fn update_one(&self, filter: &Filter, update: &UpdateOp) -> Result<UpdateResult>;

    async fn delete_one(&self, filter: &Filter) -> Result<DeleteResult>;

    async fn count(&self) -> Result<usize>;
}

/// Ouvre le fournisseur configuré.
pub async fn open_store(config: &StoreConfig) -> Result<Arc<dyn DocumentStore>> {
    let store: Arc<dyn DocumentStore> = match config.provider {
        StoreProvider::File => Arc::new(JsonDbStore::open(config).await?),
        StoreProvider::Memory => Arc::new(MemoryStore::new()),
    };
    info!(provider = ?config.provider, collection = %config.collection, "🗄️ Magasin de documents ouvert");
    Ok(store)
}

/// Erreur du moteur (anyhow) remontée à la frontière du magasin.
pub(crate) fn engine_error(err: anyhow::Error) -> AppError {
    AppError::Database(format!("{:#}", err))
}
