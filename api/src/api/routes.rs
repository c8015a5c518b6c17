// FICHIER : api/src/api/routes.rs

use axum::body::Bytes;
use axum::extract::{Path, State};
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::routing::{get, post};
use axum::{Json, Router};
use std::sync::Arc;
use tower_http::cors::CorsLayer;
use tower_http::trace::TraceLayer;
use utoipa::OpenApi;

use crate::api::envelope::{success, Envelope, StatusBlock};
use crate::api::error::ApiError;
use crate::api::handlers::{CollaboratorHandler, SkillHandler};
use crate::api::requests::{
    parse_body, CreateCollaboratorDraft, CreateSkillDraft, SkillDraft, UpdateCollaboratorDraft,
    UpdateSkillDraft,
};
use crate::model::{Collaborator, OpResult, Skill};
use crate::store::DocumentStore;

/// Chemin du document OpenAPI, relatif au préfixe de montage.
pub const OPENAPI_PATH: &str = "/openapi.json";

/// Description OpenAPI des routes, servie sur `OPENAPI_PATH`.
#[derive(OpenApi)]
#[openapi(
    info(
        title = "SkillsMS",
        description = "Collaborateurs et compétences. Le code applicatif est porté par `status.code` : 200, 203 (paramètre manquant), 472 (corps vide ou aucune correspondance), 500. Un échec renvoie le bloc `status` seul, avec un transport 200."
    ),
    paths(
        list_collaborators,
        get_collaborator,
        create_collaborator,
        update_collaborator,
        delete_collaborator,
        list_skills,
        get_skill,
        create_skill,
        update_skill,
        delete_skill
    ),
    components(schemas(
        StatusBlock,
        Collaborator,
        Skill,
        OpResult,
        CreateCollaboratorDraft,
        UpdateCollaboratorDraft,
        SkillDraft
    )),
    tags(
        (name = "Collaborators", description = "Fiches collaborateurs"),
        (name = "Skills", description = "Compétences embarquées d'un collaborateur")
    )
)]
pub struct ApiDoc;

/// État partagé par toutes les routes.
#[derive(Debug, Clone)]
pub struct AppState {
    pub collaborators: Arc<CollaboratorHandler>,
    pub skills: Arc<SkillHandler>,
}

impl AppState {
    pub fn new(store: Arc<dyn DocumentStore>) -> Self {
        Self {
            collaborators: Arc::new(CollaboratorHandler::new(store.clone())),
            skills: Arc::new(SkillHandler::new(store)),
        }
    }
}

/// Construit le routeur complet, monté sous `base_path` (ex: "/api") si non vide.
pub fn build_router(state: AppState, base_path: &str) -> Router {
    let api = Router::new()
        .route(
            "/collaborator",
            get(list_collaborators)
                .post(create_collaborator)
                .put(update_collaborator),
        )
        .route(
            "/collaborator/",
            get(list_collaborators)
                .post(create_collaborator)
                .put(update_collaborator),
        )
        .route(
            "/collaborator/{id}",
            get(get_collaborator).delete(delete_collaborator),
        )
        .route("/collaborator/skills", post(create_skill).put(update_skill))
        .route("/collaborator/skills/", post(create_skill).put(update_skill))
        .route("/collaborator/skills/{id}", get(list_skills))
        .route(
            "/collaborator/skills/{id}/{name}",
            get(get_skill).delete(delete_skill),
        )
        .route(OPENAPI_PATH, get(openapi_document))
        .method_not_allowed_fallback(unknown_route)
        .with_state(state);

    let base = base_path.trim_end_matches('/');
    let app = if base.is_empty() {
        api
    } else if base.starts_with('/') {
        Router::new().nest(base, api)
    } else {
        Router::new().nest(&format!("/{}", base), api)
    };

    app.fallback(unknown_route)
        .layer(TraceLayer::new_for_http())
        .layer(CorsLayer::permissive())
}

/// Route ou verbe inconnu : enveloppe 472 plutôt qu'un 404/405 nu.
async fn unknown_route() -> ApiError {
    ApiError::not_found("route inconnue")
}

async fn openapi_document() -> Json<utoipa::openapi::OpenApi> {
    Json(ApiDoc::openapi())
}

// --- COLLABORATEURS ---

#[utoipa::path(
    get,
    path = "/collaborator/",
    tag = "Collaborators",
    responses(
        (status = 200, description = "Liste des collaborateurs (472 si la collection est vide)", body = Envelope<Vec<Collaborator>>)
    )
)]
async fn list_collaborators(State(state): State<AppState>) -> Result<Response, ApiError> {
    let data = state.collaborators.list().await?;
    Ok(success(StatusCode::OK, data))
}

#[utoipa::path(
    get,
    path = "/collaborator/{id}",
    tag = "Collaborators",
    params(("id" = String, Path, description = "ID du collaborateur")),
    responses(
        (status = 200, description = "Collaborateur trouvé (472 sinon)", body = Envelope<Collaborator>)
    )
)]
async fn get_collaborator(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<Response, ApiError> {
    let data = state.collaborators.get(&id).await?;
    Ok(success(StatusCode::OK, data))
}

#[utoipa::path(
    post,
    path = "/collaborator/",
    tag = "Collaborators",
    request_body = CreateCollaboratorDraft,
    responses(
        (status = 201, description = "Collaborateur créé", body = Envelope<OpResult>),
        (status = 200, description = "Échec enveloppé (203, 472 ou 500)")
    )
)]
async fn create_collaborator(
    State(state): State<AppState>,
    body: Bytes,
) -> Result<Response, ApiError> {
    let draft: CreateCollaboratorDraft = parse_body(&body)?;
    let ack = state.collaborators.create(draft).await?;
    Ok(success(StatusCode::CREATED, ack))
}

#[utoipa::path(
    put,
    path = "/collaborator/",
    tag = "Collaborators",
    request_body = UpdateCollaboratorDraft,
    responses(
        (status = 200, description = "Accusé de mise à jour, ou échec enveloppé", body = Envelope<OpResult>)
    )
)]
async fn update_collaborator(
    State(state): State<AppState>,
    body: Bytes,
) -> Result<Response, ApiError> {
    let draft: UpdateCollaboratorDraft = parse_body(&body)?;
    let ack = state.collaborators.update(draft).await?;
    Ok(success(StatusCode::OK, ack))
}

#[utoipa::path(
    delete,
    path = "/collaborator/{id}",
    tag = "Collaborators",
    params(("id" = String, Path, description = "ID du collaborateur")),
    responses(
        (status = 200, description = "Accusé de suppression (472 si rien n'a été supprimé)", body = Envelope<OpResult>),
        (status = 500, description = "Échec interne du magasin (code 500 dans l'enveloppe)")
    )
)]
/// Seule route dont l'échec interne remonte aussi en 500 côté transport.
async fn delete_collaborator(State(state): State<AppState>, Path(id): Path<String>) -> Response {
    match state.collaborators.delete(&id).await {
        Ok(ack) => success(StatusCode::OK, ack),
        Err(e) if e.is_internal() => e.into_response_with(StatusCode::INTERNAL_SERVER_ERROR),
        Err(e) => e.into_response(),
    }
}

// --- COMPÉTENCES ---

#[utoipa::path(
    get,
    path = "/collaborator/skills/{id}",
    tag = "Skills",
    params(("id" = String, Path, description = "ID du collaborateur")),
    responses(
        (status = 200, description = "Compétences du collaborateur (472 s'il est inconnu)", body = Envelope<Vec<Skill>>)
    )
)]
async fn list_skills(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<Response, ApiError> {
    let data = state.skills.list(&id).await?;
    Ok(success(StatusCode::OK, data))
}

#[utoipa::path(
    get,
    path = "/collaborator/skills/{id}/{name}",
    tag = "Skills",
    params(
        ("id" = String, Path, description = "ID du collaborateur"),
        ("name" = String, Path, description = "Nom de la compétence")
    ),
    responses(
        (status = 200, description = "Première compétence portant ce nom (472 sinon)", body = Envelope<Skill>)
    )
)]
async fn get_skill(
    State(state): State<AppState>,
    Path((id, name)): Path<(String, String)>,
) -> Result<Response, ApiError> {
    let data = state.skills.get(&id, &name).await?;
    Ok(success(StatusCode::OK, data))
}

#[utoipa::path(
    post,
    path = "/collaborator/skills/",
    tag = "Skills",
    request_body = SkillDraft,
    responses(
        (status = 200, description = "Compétence ajoutée (472 si le collaborateur est inconnu)", body = Envelope<OpResult>)
    )
)]
async fn create_skill(State(state): State<AppState>, body: Bytes) -> Result<Response, ApiError> {
    let draft: CreateSkillDraft = parse_body(&body)?;
    let ack = state.skills.create(draft).await?;
    Ok(success(StatusCode::OK, ack))
}

#[utoipa::path(
    put,
    path = "/collaborator/skills/",
    tag = "Skills",
    request_body = SkillDraft,
    responses(
        (status = 200, description = "Compétence mise à jour (472 si introuvable)", body = Envelope<OpResult>)
    )
)]
async fn update_skill(State(state): State<AppState>, body: Bytes) -> Result<Response, ApiError> {
    let draft: UpdateSkillDraft = parse_body(&body)?;
    let ack = state.skills.update(draft).await?;
    Ok(success(StatusCode::OK, ack))
}

#[utoipa::path(
    delete,
    path = "/collaborator/skills/{id}/{name}",
    tag = "Skills",
    params(
        ("id" = String, Path, description = "ID du collaborateur"),
        ("name" = String, Path, description = "Nom de la compétence")
    ),
    responses(
        (status = 200, description = "Compétences retirées (472 si aucune)", body = Envelope<OpResult>)
    )
)]
async fn delete_skill(
    State(state): State<AppState>,
    Path((id, name)): Path<(String, String)>,
) -> Result<Response, ApiError> {
    let ack = state.skills.delete(&id, &name).await?;
    Ok(success(StatusCode::OK, ack))
}
