mod common;

use common::TestApp;
use reqwest::StatusCode;
use serde_json::json;

#[tokio::test]
#[ignore = "requires a running Postgres"]
async fn public_profile_omits_the_email() {
    let app = TestApp::spawn().await;
    app.register_user("alice").await;

    let response = reqwest::get(format!("{}/api/users/alice", app.address))
        .await
        .expect("Failed to execute request");
    assert_eq!(response.status(), StatusCode::OK);

    let body: serde_json::Value = response.json().await.expect("Failed to parse response");
    assert_eq!(body["username"], "alice");
    assert!(body.get("email").is_none());

    let response = reqwest::get(format!("{}/api/users/ghost", app.address))
        .await
        .expect("Failed to execute request");
    assert_eq!(response.status(), StatusCode::NOT_FOUND);
}

#[tokio::test]
#[ignore = "requires a running Postgres"]
async fn own_profile_includes_the_email() {
    let app = TestApp::spawn().await;
    let token = app.register_user("alice").await;

    let response = app
        .get("/api/users/me/profile")
        .bearer_auth(&token)
        .send()
        .await
        .expect("Failed to execute request");
    assert_eq!(response.status(), StatusCode::OK);

    let body: serde_json::Value = response.json().await.expect("Failed to parse response");
    assert_eq!(body["email"], "alice@example.com");
}

#[tokio::test]
#[ignore = "requires a running Postgres"]
async fn profile_update_is_partial() {
    let app = TestApp::spawn().await;
    let token = app.register_user("alice").await;

    let response = app
        .put("/api/users/me/profile")
        .bearer_auth(&token)
        .json(&json!({ "display_name": "Alice", "bio": "hello" }))
        .send()
        .await
        .expect("Failed to execute request");
    assert_eq!(response.status(), StatusCode::OK);

    // A second update leaves unmentioned fields alone
    let response = app
        .put("/api/users/me/profile")
        .bearer_auth(&token)
        .json(&json!({ "avatar_url": "https://example.com/a.png" }))
        .send()
        .await
        .expect("Failed to execute request");
    assert_eq!(response.status(), StatusCode::OK);

    let body: serde_json::Value = response.json().await.expect("Failed to parse response");
    assert_eq!(body["display_name"], "Alice");
    assert_eq!(body["bio"], "hello");
    assert_eq!(body["avatar_url"], "https://example.com/a.png");
}
