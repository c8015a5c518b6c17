// FICHIER : api/tests/api_suite/collaborators_tests.rs

use axum::http::{Method, StatusCode};
use serde_json::json;

use crate::common::{code, file_app, memory_app};
use skillsms::DocumentStore;

#[tokio::test]
async fn test_create_then_get_round_trip() {
    let app = memory_app();
    let id = app.create_collaborator("Ana", "Diaz Ruiz", "Developer").await;
    assert_eq!(id.len(), 32);

    let (status, body) = app.get(&format!("/collaborator/{}", id)).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(
        body,
        json!({
            "status": { "code": 200, "message": "Success" },
            "data": {
                "id": id,
                "name": "Ana",
                "lastNames": "Diaz Ruiz",
                "role": "Developer",
                "skills": []
            }
        })
    );
}

#[tokio::test]
async fn test_create_ack_is_normalized() {
    let app = memory_app();
    let (status, body) = app
        .post_json(
            "/collaborator",
            json!({ "strName": "Ana", "strLastnames": "Diaz", "strRol": "QA" }),
        )
        .await;

    assert_eq!(status, StatusCode::CREATED);
    assert_eq!(code(&body), 200);
    assert_eq!(body["data"]["matched"], true);
    assert_eq!(body["data"]["affectedCount"], 1);
    assert!(body["data"]["insertedId"].is_string());
}

#[tokio::test]
async fn test_list_empty_then_populated() {
    let app = memory_app();
    let (status, body) = app.get("/collaborator/").await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body, json!({ "status": { "code": 472, "message": "Empty request body or no matching data" } }));

    let first = app.create_collaborator("Ana", "Diaz", "Dev").await;
    let second = app.create_collaborator("Bea", "Ruiz", "QA").await;

    let (_, body) = app.get("/collaborator").await;
    assert_eq!(code(&body), 200);
    let list = body["data"].as_array().unwrap();
    assert_eq!(list.len(), 2);
    assert_eq!(list[0]["id"], first.as_str());
    assert_eq!(list[1]["id"], second.as_str());
}

#[tokio::test]
async fn test_create_validation_codes() {
    let app = memory_app();

    // Champ requis absent
    let (status, body) = app
        .post_json("/collaborator/", json!({ "name": "Ana", "lastNames": "Diaz" }))
        .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(code(&body), 203);
    assert!(body.get("data").is_none());

    // Corps vide, illisible ou objet vide
    for raw in ["", "{not json", "{}"] {
        let (status, body) = app.send(Method::POST, "/collaborator/", raw.to_string()).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(code(&body), 472, "corps : {:?}", raw);
    }
}

#[tokio::test]
async fn test_update_replaces_fields_keeps_skills() {
    let app = memory_app();
    let id = app.create_collaborator("Ana", "Diaz", "Dev").await;
    app.add_skill(&id, "Go", "Mid", 2).await;

    let (status, body) = app
        .put_json(
            "/collaborator/",
            json!({ "_id": id, "name": "Eva", "lastNames": "Gil", "role": "Lead" }),
        )
        .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["data"], json!({ "matched": true, "affectedCount": 1 }));

    let (_, body) = app.get(&format!("/collaborator/{}", id)).await;
    assert_eq!(body["data"]["name"], "Eva");
    assert_eq!(body["data"]["role"], "Lead");
    assert_eq!(body["data"]["skills"][0]["name"], "Go");
}

#[tokio::test]
async fn test_update_errors() {
    let app = memory_app();
    let (_, body) = app
        .put_json("/collaborator/", json!({ "name": "Eva", "lastNames": "Gil", "role": "Lead" }))
        .await;
    assert_eq!(code(&body), 203);

    let (_, body) = app
        .put_json(
            "/collaborator/",
            json!({ "id": "unknown", "name": "Eva", "lastNames": "Gil", "role": "Lead" }),
        )
        .await;
    assert_eq!(code(&body), 472);
}

#[tokio::test]
async fn test_get_unknown_id_is_472() {
    let app = memory_app();
    let (status, body) = app.get("/collaborator/doesnotexist").await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(code(&body), 472);
}

#[tokio::test]
async fn test_delete_twice_and_skills_unreachable() {
    let app = memory_app();
    let id = app.create_collaborator("Ana", "Diaz", "Dev").await;
    app.add_skill(&id, "Rust", "Senior", 5).await;

    let (status, body) = app.delete(&format!("/collaborator/{}", id)).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["data"], json!({ "matched": true, "affectedCount": 1 }));

    let (status, body) = app.delete(&format!("/collaborator/{}", id)).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(code(&body), 472);

    let (_, body) = app.get(&format!("/collaborator/{}", id)).await;
    assert_eq!(code(&body), 472);
    let (_, body) = app.get(&format!("/collaborator/skills/{}", id)).await;
    assert_eq!(code(&body), 472);
    let (_, body) = app.get(&format!("/collaborator/skills/{}/Rust", id)).await;
    assert_eq!(code(&body), 472);
}

#[tokio::test]
async fn test_file_store_full_cycle() {
    let app = file_app().await;
    let id = app.create_collaborator("Ana", "Diaz", "Dev").await;

    let (_, body) = app.get(&format!("/collaborator/{}", id)).await;
    assert_eq!(body["data"]["lastNames"], "Diaz");

    // Un ID qui ne peut pas être un nom de fichier n'est qu'un document introuvable
    let (_, body) = app.get("/collaborator/..%2F..%2Fetc").await;
    assert_eq!(code(&body), 472);

    let (_, body) = app.delete(&format!("/collaborator/{}", id)).await;
    assert_eq!(code(&body), 200);
    assert_eq!(app.store.count().await.unwrap(), 0);
}

#[tokio::test]
async fn test_empty_string_fields_are_stored_verbatim() {
    let app = memory_app();
    let (status, body) = app
        .post_json("/collaborator/", json!({ "name": "", "lastNames": "Diaz", "role": "" }))
        .await;
    assert_eq!(status, StatusCode::CREATED);
    let id = body["data"]["insertedId"].as_str().unwrap().to_string();

    let (_, body) = app.get(&format!("/collaborator/{}", id)).await;
    assert_eq!(code(&body), 200);
    assert_eq!(body["data"]["name"], "");
    assert_eq!(body["data"]["role"], "");
}
