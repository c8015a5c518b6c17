// FICHIER : api/tests/api_suite/skills_tests.rs

use axum::http::StatusCode;
use serde_json::json;

use crate::common::{code, file_app, memory_app};

#[tokio::test]
async fn test_legacy_skill_post_then_get() {
    let app = memory_app();
    let id = app.create_collaborator("Ana", "Diaz", "Dev").await;

    let (status, body) = app
        .post_json(
            "/collaborator/skills/",
            json!({ "_id": id, "strSName": "Go", "strSLevel": "Mid", "numSYOE": 2 }),
        )
        .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["data"], json!({ "matched": true, "affectedCount": 1 }));

    let (_, body) = app.get(&format!("/collaborator/skills/{}/Go", id)).await;
    assert_eq!(code(&body), 200);
    assert_eq!(
        body["data"],
        json!({ "name": "Go", "level": "Mid", "yearsOfExperience": 2 })
    );
}

#[tokio::test]
async fn test_list_skills() {
    let app = memory_app();
    let id = app.create_collaborator("Ana", "Diaz", "Dev").await;

    // Tableau vide : succès
    let (_, body) = app.get(&format!("/collaborator/skills/{}", id)).await;
    assert_eq!(code(&body), 200);
    assert_eq!(body["data"], json!([]));

    app.add_skill(&id, "Go", "Mid", 2).await;
    app.add_skill(&id, "Rust", "Senior", 5).await;
    let (_, body) = app.get(&format!("/collaborator/skills/{}", id)).await;
    assert_eq!(
        body["data"],
        json!([
            { "name": "Go", "level": "Mid", "yearsOfExperience": 2 },
            { "name": "Rust", "level": "Senior", "yearsOfExperience": 5 }
        ])
    );

    let (_, body) = app.get("/collaborator/skills/unknown").await;
    assert_eq!(code(&body), 472);
}

#[tokio::test]
async fn test_update_skill_then_get_reflects_values() {
    let app = memory_app();
    let id = app.create_collaborator("Ana", "Diaz", "Dev").await;
    app.add_skill(&id, "Go", "Mid", 2).await;

    let (_, body) = app
        .put_json(
            "/collaborator/skills",
            json!({ "id": id, "name": "Go", "level": "Senior", "yearsOfExperience": "4" }),
        )
        .await;
    assert_eq!(code(&body), 200);

    let (_, body) = app.get(&format!("/collaborator/skills/{}/Go", id)).await;
    assert_eq!(body["data"]["level"], "Senior");
    assert_eq!(body["data"]["yearsOfExperience"], 4);

    // Compétence inconnue
    let (_, body) = app
        .put_json(
            "/collaborator/skills/",
            json!({ "id": id, "name": "Cobol", "level": "Senior", "yearsOfExperience": 1 }),
        )
        .await;
    assert_eq!(code(&body), 472);
}

#[tokio::test]
async fn test_delete_skill() {
    let app = memory_app();
    let id = app.create_collaborator("Ana", "Diaz", "Dev").await;
    app.add_skill(&id, "Go", "Mid", 2).await;

    let (status, body) = app.delete(&format!("/collaborator/skills/{}/Go", id)).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["data"]["affectedCount"], 1);

    let (_, body) = app.get(&format!("/collaborator/skills/{}/Go", id)).await;
    assert_eq!(code(&body), 472);
    let (_, body) = app.delete(&format!("/collaborator/skills/{}/Go", id)).await;
    assert_eq!(code(&body), 472);
    let (_, body) = app.delete("/collaborator/skills/unknown/Go").await;
    assert_eq!(code(&body), 472);
}

#[tokio::test]
async fn test_skill_validation_codes() {
    let app = memory_app();
    let id = app.create_collaborator("Ana", "Diaz", "Dev").await;

    for body in [
        json!({ "id": id, "name": "Go", "level": "Mid" }),
        json!({ "id": id, "name": "Go", "level": "Mid", "yearsOfExperience": -3 }),
        json!({ "id": id, "name": "Go", "level": "Mid", "yearsOfExperience": "two" }),
        json!({ "name": "Go", "level": "Mid", "yearsOfExperience": 1 }),
    ] {
        let (_, res) = app.post_json("/collaborator/skills/", body.clone()).await;
        assert_eq!(code(&res), 203, "corps : {}", body);
    }

    let (_, res) = app.post_json("/collaborator/skills/", json!({})).await;
    assert_eq!(code(&res), 472);

    let (_, res) = app
        .post_json(
            "/collaborator/skills/",
            json!({ "id": "unknown", "name": "Go", "level": "Mid", "yearsOfExperience": 1 }),
        )
        .await;
    assert_eq!(code(&res), 472);
}

#[tokio::test]
async fn test_duplicate_skill_names_are_accepted() {
    let app = memory_app();
    let id = app.create_collaborator("Ana", "Diaz", "Dev").await;
    app.add_skill(&id, "Go", "Junior", 1).await;
    app.add_skill(&id, "Go", "Senior", 6).await;

    let (_, body) = app.get(&format!("/collaborator/skills/{}", id)).await;
    assert_eq!(body["data"].as_array().unwrap().len(), 2);

    // La lecture renvoie la première occurrence
    let (_, body) = app.get(&format!("/collaborator/skills/{}/Go", id)).await;
    assert_eq!(body["data"]["level"], "Junior");

    // La suppression retire toutes les occurrences
    let (_, body) = app.delete(&format!("/collaborator/skills/{}/Go", id)).await;
    assert_eq!(code(&body), 200);
    let (_, body) = app.get(&format!("/collaborator/skills/{}", id)).await;
    assert_eq!(body["data"], json!([]));
}

#[tokio::test]
async fn test_skill_names_with_spaces_on_file_store() {
    let app = file_app().await;
    let id = app.create_collaborator("Ana", "Diaz", "Dev").await;
    app.add_skill(&id, "Machine Learning", "Mid", 3).await;

    let (_, body) = app
        .get(&format!("/collaborator/skills/{}/Machine%20Learning", id))
        .await;
    assert_eq!(code(&body), 200);
    assert_eq!(body["data"]["name"], "Machine Learning");
}
