// FICHIER : api/src/api/error.rs

use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use tracing::{debug, error};

use crate::api::envelope::{Envelope, StatusBlock};
use crate::utils::AppError;

/// Échecs visibles par le client HTTP.
#[derive(Debug, thiserror::Error)]
pub enum ApiError {
    /// Champ requis absent, vide ou mal typé (203).
    #[error("Paramètre manquant ou invalide : {0}")]
    MissingParameter(String),

    /// Corps absent/illisible, ou aucun document concerné (472).
    #[error("Requête vide ou sans correspondance : {0}")]
    EmptyOrInvalidBody(String),

    /// Toute autre défaillance (500).
    #[error("Erreur interne : {0}")]
    Internal(#[from] AppError),
}

impl ApiError {
    pub fn missing(field: &str) -> Self {
        ApiError::MissingParameter(field.to_string())
    }

    pub fn not_found(what: impl Into<String>) -> Self {
        ApiError::EmptyOrInvalidBody(what.into())
    }

    pub fn status_block(&self) -> StatusBlock {
        match self {
            ApiError::MissingParameter(_) => StatusBlock::MISSING_PARAMETER,
            ApiError::EmptyOrInvalidBody(_) => StatusBlock::EMPTY_OR_INVALID,
            ApiError::Internal(_) => StatusBlock::INTERNAL_ERROR,
        }
    }

    pub fn is_internal(&self) -> bool {
        matches!(self, ApiError::Internal(_))
    }

    /// Réponse d'erreur avec un statut de transport explicite.
    pub fn into_response_with(self, transport: StatusCode) -> Response {
        match &self {
            ApiError::Internal(e) => error!(key = e.key(), error = %e, "❌ Échec interne"),
            other => debug!(error = %other, "Requête refusée"),
        }
        (transport, Json(Envelope::<()>::failure(self.status_block()))).into_response()
    }
}

// Le code applicatif est dans l'enveloppe ; le transport reste 200.
impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        self.into_response_with(StatusCode::OK)
    }
}
