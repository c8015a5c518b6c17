// FICHIER : api/src/api/envelope.rs

//! Enveloppe de réponse commune : `{ "status": { code, message }, "data": ... }`.

use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use serde::Serialize;
use utoipa::ToSchema;

/// Bloc de statut applicatif (indépendant du statut HTTP de transport).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, ToSchema)]
pub struct StatusBlock {
    pub code: u16,
    #[schema(value_type = String)]
    pub message: &'static str,
}

impl StatusBlock {
    pub const SUCCESS: Self = Self {
        code: 200,
        message: "Success",
    };
    pub const MISSING_PARAMETER: Self = Self {
        code: 203,
        message: "Missing or invalid parameters",
    };
    pub const EMPTY_OR_INVALID: Self = Self {
        code: 472,
        message: "Empty request body or no matching data",
    };
    pub const INTERNAL_ERROR: Self = Self {
        code: 500,
        message: "Internal server error",
    };
}

#[derive(Debug, Clone, Serialize, ToSchema)]
pub struct Envelope<T> {
    pub status: StatusBlock,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub data: Option<T>,
}

impl<T: Serialize> Envelope<T> {
    pub fn ok(data: T) -> Self {
        Self {
            status: StatusBlock::SUCCESS,
            data: Some(data),
        }
    }
}

impl Envelope<()> {
    /// Échec : bloc de statut seul.
    pub fn failure(status: StatusBlock) -> Self {
        Self { status, data: None }
    }
}

/// Réponse de succès avec le statut de transport donné.
pub fn success<T: Serialize>(transport: StatusCode, data: T) -> Response {
    (transport, Json(Envelope::ok(data))).into_response()
}
