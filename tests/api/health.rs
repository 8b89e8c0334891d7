use reqwest::StatusCode;

use crate::helpers::TestApp;

#[tokio::test]
async fn health_check_needs_no_token() {
    let app = TestApp::new().await;

    let res = app
        .http_client
        .get(format!("{}/", app.base_url))
        .send()
        .await
        .expect("Failed to request health endpoint");

    assert_eq!(res.status(), StatusCode::OK);

    let body: serde_json::Value = res.json().await.expect("Failed to receive response json");

    assert_eq!(body["success"], true);
    assert_eq!(body["message"], "Healthy");
}
