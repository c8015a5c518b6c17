// FICHIER : api/tests/api_suite/server_tests.rs

use async_trait::async_trait;
use axum::body::Body;
use axum::http::{Method, Request, StatusCode};
use serde_json::{json, Value};
use std::io::Write;
use std::sync::Arc;
use tower::ServiceExt;

use skillsms::json_db::query::{
    DeleteResult, Filter, InsertOneResult, Projection, UpdateOp, UpdateResult,
};
use skillsms::store::{load_initial_data, open_store};
use skillsms::utils::config::{StoreConfig, StoreProvider};
use skillsms::{build_router, AppError, AppState, DocumentStore};

use crate::common::{code, memory_app, memory_app_at, TestApp};

/// Magasin en panne : toutes les opérations échouent.
#[derive(Debug)]
struct BrokenStore;

#[async_trait]
impl DocumentStore for BrokenStore {
    async fn find(&self, _: &Filter, _: &Projection) -> skillsms::Result<Vec<Value>> {
        Err(AppError::Database("hors service".into()))
    }
    async fn find_one(&self, _: &Filter, _: &Projection) -> skillsms::Result<Option<Value>> {
        Err(AppError::Database("hors service".into()))
    }
    async fn insert_one(&self, _: Value) -> skillsms::Result<InsertOneResult> {
        Err(AppError::Database("hors service".into()))
    }
    async fn update_one(&self, _: &Filter, _: &UpdateOp) -> skillsms::Result<UpdateResult> {
        Err(AppError::Database("hors service".into()))
    }
    async fn delete_one(&self, _: &Filter) -> skillsms::Result<DeleteResult> {
        Err(AppError::Database("hors service".into()))
    }
    async fn count(&self) -> skillsms::Result<usize> {
        Err(AppError::Database("hors service".into()))
    }
}

fn broken_app() -> TestApp {
    let store: Arc<dyn DocumentStore> = Arc::new(BrokenStore);
    TestApp {
        router: build_router(AppState::new(store.clone()), ""),
        store,
        _tmp_dir: None,
    }
}

#[tokio::test]
async fn test_internal_errors_use_envelope() {
    let app = broken_app();

    let (status, body) = app.get("/collaborator/").await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(
        body,
        json!({ "status": { "code": 500, "message": "Internal server error" } })
    );

    let (status, body) = app.get("/collaborator/skills/c1/Go").await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(code(&body), 500);

    let (status, body) = app
        .post_json("/collaborator/", json!({ "name": "A", "lastNames": "B", "role": "C" }))
        .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(code(&body), 500);
}

#[tokio::test]
async fn test_delete_collaborator_internal_error_is_transport_500() {
    let app = broken_app();
    let (status, body) = app.delete("/collaborator/c1").await;
    assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
    assert_eq!(code(&body), 500);

    // Les autres suppressions gardent un transport 200
    let (status, body) = app.delete("/collaborator/skills/c1/Go").await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(code(&body), 500);
}

#[tokio::test]
async fn test_router_mounted_under_base_path() {
    let app = memory_app_at("/api/");
    let (status, _) = app
        .post_json(
            "/api/collaborator/",
            json!({ "name": "Ana", "lastNames": "Diaz", "role": "Dev" }),
        )
        .await;
    assert_eq!(status, StatusCode::CREATED);

    let (_, body) = app.get("/api/collaborator").await;
    assert_eq!(code(&body), 200);

    // Hors préfixe : la route est inconnue, l'enveloppe reste la règle
    let (status, body) = app.get("/collaborator").await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(code(&body), 472);

    let (_, doc) = app.get("/api/openapi.json").await;
    assert!(doc["paths"]["/collaborator/"].is_object());
}

#[tokio::test]
async fn test_unrouted_paths_and_verbs_return_envelope() {
    let app = memory_app();
    let requests = [
        (Method::GET, "/collaborator/skills"),
        (Method::GET, "/collaborator/skills/"),
        (Method::PATCH, "/collaborator/"),
        (Method::POST, "/collaborator/c1"),
        (Method::PUT, "/collaborator/skills/c1/Go"),
        (Method::GET, "/nowhere"),
    ];
    for (method, uri) in requests {
        let (status, body) = app.send(method.clone(), uri, Body::empty()).await;
        assert_eq!(status, StatusCode::OK, "{} {}", method, uri);
        assert_eq!(
            body,
            json!({ "status": { "code": 472, "message": "Empty request body or no matching data" } }),
            "{} {}",
            method,
            uri
        );
    }
}

#[tokio::test]
async fn test_openapi_document_lists_every_route() {
    let app = memory_app();
    let (status, doc) = app.get("/openapi.json").await;
    assert_eq!(status, StatusCode::OK);
    assert!(doc["openapi"].as_str().unwrap().starts_with("3."));
    assert_eq!(doc["info"]["title"], "SkillsMS");

    let expected = [
        ("/collaborator/", ["get", "post", "put"].as_slice()),
        ("/collaborator/{id}", ["get", "delete"].as_slice()),
        ("/collaborator/skills/", ["post", "put"].as_slice()),
        ("/collaborator/skills/{id}", ["get"].as_slice()),
        ("/collaborator/skills/{id}/{name}", ["get", "delete"].as_slice()),
    ];
    for (path, verbs) in expected {
        for verb in verbs {
            assert!(
                doc["paths"][path][verb].is_object(),
                "{} {} absent du document",
                verb,
                path
            );
        }
    }

    assert_eq!(doc["paths"]["/collaborator/skills/{id}"]["get"]["tags"], json!(["Skills"]));
    assert!(doc["paths"]["/collaborator/"]["post"]["responses"]["201"].is_object());

    let schemas = &doc["components"]["schemas"];
    for name in ["Collaborator", "Skill", "OpResult", "StatusBlock", "SkillDraft"] {
        assert!(schemas[name].is_object(), "schéma {} absent", name);
    }
    let op_result = &schemas["OpResult"]["properties"];
    assert!(op_result["affectedCount"].is_object());
    assert!(op_result["insertedId"].is_object());
    let draft = &schemas["SkillDraft"]["properties"];
    assert!(draft["yearsOfExperience"].is_object());
}

#[tokio::test]
async fn test_cors_is_permissive() {
    let app = memory_app();
    let request = Request::builder()
        .method(Method::GET)
        .uri("/collaborator/")
        .header("origin", "http://localhost:3000")
        .body(Body::empty())
        .unwrap();

    let response = app.router.clone().oneshot(request).await.unwrap();
    assert_eq!(
        response.headers().get("access-control-allow-origin").unwrap(),
        "*"
    );
}

#[tokio::test]
async fn test_file_store_persists_across_reopen_and_seed_runs_once() {
    let tmp = tempfile::tempdir().unwrap();
    let mut seed = tempfile::NamedTempFile::new().unwrap();
    seed.write_all(
        br#"[{ "strName": "Ana", "strLastnames": "Diaz", "strRol": "Dev",
               "skills": [{ "strSName": "Go", "strSLevel": "Mid", "numSYOE": 2 }] }]"#,
    )
    .unwrap();

    let config = StoreConfig {
        provider: StoreProvider::File,
        data_root: tmp.path().to_path_buf(),
        seed_file: Some(seed.path().to_path_buf()),
        ..StoreConfig::default()
    };

    let store = open_store(&config).await.unwrap();
    assert_eq!(load_initial_data(store.as_ref(), seed.path()).await.unwrap(), 1);
    drop(store);

    // Réouverture : les données sont relues du disque et l'amorçage est ignoré
    let store = open_store(&config).await.unwrap();
    assert_eq!(load_initial_data(store.as_ref(), seed.path()).await.unwrap(), 0);

    let app = TestApp {
        router: build_router(AppState::new(store.clone()), ""),
        store,
        _tmp_dir: None,
    };
    let (_, body) = app.get("/collaborator/").await;
    let list = body["data"].as_array().unwrap();
    assert_eq!(list.len(), 1);
    assert_eq!(list[0]["skills"][0]["yearsOfExperience"], 2);
}
