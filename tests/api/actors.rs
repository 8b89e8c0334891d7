use reqwest::StatusCode;
use serde_json::json;

use crate::helpers::{DIRECTOR_PERMISSIONS, TestApp};

#[tokio::test]
async fn director_creates_actor() {
    let app = TestApp::new().await;
    let token = app.token_for(DIRECTOR_PERMISSIONS);

    let res = app
        .http_client
        .post(format!("{}/actors", app.base_url))
        .header("Authorization", format!("Bearer {token}"))
        .json(&json!({
            "name": "Sam England",
            "age": 25,
            "gender": "male",
        }))
        .send()
        .await
        .expect("Failed to send create actor request");

    assert_eq!(
        res.status(),
        StatusCode::CREATED,
        "Response code is not 201 CREATED"
    );

    let body: serde_json::Value = res.json().await.expect("Failed to receive response json");
    assert_eq!(body["success"], true);
    assert_eq!(body["actor"]["name"], "Sam England");
    assert_eq!(body["actor"]["age"], 25);

    let stored = sqlx::query_scalar::<_, i64>("SELECT COUNT(*) FROM actors WHERE name = $1")
        .bind("Sam England")
        .fetch_one(&app.db)
        .await
        .expect("Failed to query db");
    assert_eq!(stored, 1, "Service didn't create the actor in database");
}

#[tokio::test]
async fn director_cannot_create_movies() {
    let app = TestApp::new().await;
    let token = app.token_for(DIRECTOR_PERMISSIONS);

    let res = app
        .http_client
        .post(format!("{}/movies", app.base_url))
        .header("Authorization", format!("Bearer {token}"))
        .json(&json!({
            "title": "Head Strong",
            "release_date": "2026-05-01",
        }))
        .send()
        .await
        .expect("Failed to send create movie request");

    assert_eq!(res.status(), StatusCode::UNAUTHORIZED);

    let body: serde_json::Value = res.json().await.expect("Failed to receive response json");
    assert_eq!(body["message"], "Permission not found.");
}

#[tokio::test]
async fn create_actor_without_age_is_bad_request() {
    let app = TestApp::new().await;
    let token = app.token_for(DIRECTOR_PERMISSIONS);

    let res = app
        .http_client
        .post(format!("{}/actors", app.base_url))
        .header("Authorization", format!("Bearer {token}"))
        .json(&json!({
            "name": "Sam England",
            "gender": "male",
        }))
        .send()
        .await
        .expect("Failed to send create actor request");

    assert_eq!(res.status(), StatusCode::BAD_REQUEST);

    let body: serde_json::Value = res.json().await.expect("Failed to receive response json");
    assert_eq!(body["success"], false);
    assert_eq!(body["error"], 400);
}

#[tokio::test]
async fn director_renames_actor() {
    let app = TestApp::new().await;
    let token = app.token_for(DIRECTOR_PERMISSIONS);

    let actor_id = app.seed_actor("Sam England", 25, "male").await;

    let res = app
        .http_client
        .patch(format!("{}/actors/{}", app.base_url, actor_id))
        .header("Authorization", format!("Bearer {token}"))
        .json(&json!({ "name": "Sammy E" }))
        .send()
        .await
        .expect("Failed to patch actor");

    assert_eq!(res.status(), StatusCode::OK);

    let body: serde_json::Value = res.json().await.expect("Failed to receive response json");
    assert_eq!(body["success"], true);
    assert_eq!(body["actor"]["name"], "Sammy E");
    assert_eq!(body["actor"]["age"], 25);
}

#[tokio::test]
async fn patching_missing_actor_is_not_found() {
    let app = TestApp::new().await;
    let token = app.token_for(DIRECTOR_PERMISSIONS);

    let res = app
        .http_client
        .patch(format!("{}/actors/2002", app.base_url))
        .header("Authorization", format!("Bearer {token}"))
        .json(&json!({ "name": "Sammy E" }))
        .send()
        .await
        .expect("Failed to patch actor");

    assert_eq!(res.status(), StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn patching_gender_to_whitespace_is_bad_request() {
    let app = TestApp::new().await;
    let token = app.token_for(DIRECTOR_PERMISSIONS);

    let actor_id = app.seed_actor("Sam England", 25, "male").await;

    let res = app
        .http_client
        .patch(format!("{}/actors/{}", app.base_url, actor_id))
        .header("Authorization", format!("Bearer {token}"))
        .json(&json!({ "gender": "   " }))
        .send()
        .await
        .expect("Failed to patch actor");

    assert_eq!(res.status(), StatusCode::BAD_REQUEST);

    // the row keeps its value
    let stored = sqlx::query_scalar::<_, String>("SELECT gender FROM actors WHERE id = $1")
        .bind(actor_id)
        .fetch_one(&app.db)
        .await
        .expect("Failed to query db");
    assert_eq!(stored, "male");
}

#[tokio::test]
async fn non_numeric_actor_id_gets_the_uniform_error_body() {
    let app = TestApp::new().await;
    let token = app.token_for(DIRECTOR_PERMISSIONS);

    let res = app
        .http_client
        .patch(format!("{}/actors/not-a-number", app.base_url))
        .header("Authorization", format!("Bearer {token}"))
        .json(&json!({ "name": "Sammy E" }))
        .send()
        .await
        .expect("Failed to send patch request");

    assert_eq!(res.status(), StatusCode::BAD_REQUEST);

    let body: serde_json::Value = res
        .json()
        .await
        .expect("Rejection body is not the json error shape");
    assert_eq!(body["success"], false);
    assert_eq!(body["error"], 400);
}

#[tokio::test]
async fn director_deletes_actor() {
    let app = TestApp::new().await;
    let token = app.token_for(DIRECTOR_PERMISSIONS);

    let actor_id = app.seed_actor("Sam England", 25, "male").await;

    let res = app
        .http_client
        .delete(format!("{}/actors/{}", app.base_url, actor_id))
        .header("Authorization", format!("Bearer {token}"))
        .send()
        .await
        .expect("Failed to delete actor");

    assert_eq!(res.status(), StatusCode::OK);

    let body: serde_json::Value = res.json().await.expect("Failed to receive response json");
    assert_eq!(body["delete"], actor_id);

    let stored = sqlx::query_scalar::<_, i64>("SELECT COUNT(*) FROM actors WHERE id = $1")
        .bind(actor_id)
        .fetch_one(&app.db)
        .await
        .expect("Failed to query db");
    assert_eq!(stored, 0, "Actor is still in the database");
}

#[tokio::test]
async fn deleting_missing_actor_is_not_found() {
    let app = TestApp::new().await;
    let token = app.token_for(DIRECTOR_PERMISSIONS);

    let res = app
        .http_client
        .delete(format!("{}/actors/2002", app.base_url))
        .header("Authorization", format!("Bearer {token}"))
        .send()
        .await
        .expect("Failed to delete actor");

    assert_eq!(res.status(), StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn actor_page_beyond_last_is_not_found() {
    let app = TestApp::new().await;
    let token = app.token_for(DIRECTOR_PERMISSIONS);

    app.seed_actor("Sam England", 25, "male").await;

    let res = app
        .http_client
        .get(format!("{}/actors?page=1001", app.base_url))
        .header("Authorization", format!("Bearer {token}"))
        .send()
        .await
        .expect("Failed to list actors");

    assert_eq!(res.status(), StatusCode::NOT_FOUND);

    let body: serde_json::Value = res.json().await.expect("Failed to receive response json");
    assert_eq!(body["message"], "Resource Not Found");
}
