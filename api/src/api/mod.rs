// FICHIER : api/src/api/mod.rs

//! Couche HTTP (axum) : routes, enveloppe de réponse, validation des corps.

pub mod envelope;
pub mod error;
pub mod handlers;
pub mod requests;
pub mod routes;

pub use error::ApiError;
pub use routes::{build_router, AppState};
