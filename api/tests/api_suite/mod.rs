// FICHIER : api/tests/api_suite/mod.rs

use axum::body::{to_bytes, Body};
use axum::http::{Method, Request, StatusCode};
use axum::Router;
use serde_json::{json, Value};
use std::sync::{Arc, Once};
use tempfile::TempDir;
use tower::ServiceExt;

use skillsms::store::{JsonDbStore, MemoryStore};
use skillsms::utils::config::StoreConfig;
use skillsms::{build_router, AppState, DocumentStore};

static INIT: Once = Once::new();

#[allow(dead_code)]
pub struct TestApp {
    pub router: Router,
    pub store: Arc<dyn DocumentStore>,
    pub _tmp_dir: Option<TempDir>,
}

fn init_tracing() {
    INIT.call_once(|| {
        let _ = tracing_subscriber::fmt().with_test_writer().try_init();
    });
}

#[allow(dead_code)]
pub fn memory_app() -> TestApp {
    memory_app_at("")
}

/// Routeur sur magasin mémoire, monté sous `base_path`.
#[allow(dead_code)]
pub fn memory_app_at(base_path: &str) -> TestApp {
    init_tracing();
    let store: Arc<dyn DocumentStore> = Arc::new(MemoryStore::new());
    TestApp {
        router: build_router(AppState::new(store.clone()), base_path),
        store,
        _tmp_dir: None,
    }
}

/// Routeur sur le moteur fichier, dans un dossier temporaire.
#[allow(dead_code)]
pub async fn file_app() -> TestApp {
    init_tracing();
    let tmp_dir = tempfile::tempdir().expect("create temp dir");
    let config = StoreConfig {
        data_root: tmp_dir.path().to_path_buf(),
        ..StoreConfig::default()
    };
    let store: Arc<dyn DocumentStore> =
        Arc::new(JsonDbStore::open(&config).await.expect("open file store"));
    TestApp {
        router: build_router(AppState::new(store.clone()), ""),
        store,
        _tmp_dir: Some(tmp_dir),
    }
}

#[allow(dead_code)]
impl TestApp {
    /// Requête brute : renvoie le statut de transport et le corps JSON (`Null` si vide).
    pub async fn send(&self, method: Method, uri: &str, body: impl Into<Body>) -> (StatusCode, Value) {
        let request = Request::builder()
            .method(method)
            .uri(uri)
            .header("content-type", "application/json")
            .body(body.into())
            .expect("build request");

        let response = self
            .router
            .clone()
            .oneshot(request)
            .await
            .expect("router is infallible");
        let status = response.status();
        let bytes = to_bytes(response.into_body(), usize::MAX)
            .await
            .expect("read body");
        let value = if bytes.is_empty() {
            Value::Null
        } else {
            serde_json::from_slice(&bytes).expect("JSON body")
        };
        (status, value)
    }

    pub async fn get(&self, uri: &str) -> (StatusCode, Value) {
        self.send(Method::GET, uri, Body::empty()).await
    }

    pub async fn delete(&self, uri: &str) -> (StatusCode, Value) {
        self.send(Method::DELETE, uri, Body::empty()).await
    }

    pub async fn post_json(&self, uri: &str, body: Value) -> (StatusCode, Value) {
        self.send(Method::POST, uri, body.to_string()).await
    }

    pub async fn put_json(&self, uri: &str, body: Value) -> (StatusCode, Value) {
        self.send(Method::PUT, uri, body.to_string()).await
    }

    /// Crée un collaborateur et renvoie son ID.
    pub async fn create_collaborator(&self, name: &str, last_names: &str, role: &str) -> String {
        let (status, body) = self
            .post_json(
                "/collaborator/",
                json!({ "name": name, "lastNames": last_names, "role": role }),
            )
            .await;
        assert_eq!(status, StatusCode::CREATED, "corps : {}", body);
        body["data"]["insertedId"]
            .as_str()
            .expect("insertedId")
            .to_string()
    }

    pub async fn add_skill(&self, id: &str, name: &str, level: &str, years: u64) {
        let (_, body) = self
            .post_json(
                "/collaborator/skills/",
                json!({ "id": id, "name": name, "level": level, "yearsOfExperience": years }),
            )
            .await;
        assert_eq!(code(&body), 200, "corps : {}", body);
    }
}

/// Code applicatif de l'enveloppe.
#[allow(dead_code)]
pub fn code(body: &Value) -> u64 {
    body["status"]["code"].as_u64().expect("status.code")
}
