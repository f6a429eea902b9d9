use chrono::{Duration, Utc};
use gltz_api::{
    AppConfig, AppState, MemoryRepository, create_router,
    models::AdminSession,
    repository::RepositoryState,
};
use std::sync::Arc;
use tokio::net::TcpListener;

pub struct TestApp {
    pub address: String,
    pub repo: RepositoryState,
}

async fn spawn_app() -> TestApp {
    let repo = Arc::new(MemoryRepository::new()) as RepositoryState;
    let config = AppConfig::default();

    let state = AppState {
        repo: repo.clone(),
        config,
    };
    let router = create_router(state);

    let listener = TcpListener::bind("127.0.0.1:0")
        .await
        .expect("Failed to bind port");
    let port = listener.local_addr().unwrap().port();
    let address = format!("http://127.0.0.1:{}", port);

    tokio::spawn(async move {
        axum::serve(listener, router).await.unwrap();
    });

    TestApp { address, repo }
}

async fn login_with(client: &reqwest::Client, address: &str, password: &str) -> reqwest::Response {
    client
        .post(format!("{address}/api/admin/login"))
        .json(&serde_json::json!({ "password": password }))
        .send()
        .await
        .expect("login request failed")
}

#[tokio::test]
async fn test_wrong_password_is_rejected() {
    let app = spawn_app().await;
    let client = reqwest::Client::new();

    let response = login_with(&client, &app.address, "falsch").await;
    assert_eq!(response.status(), 401);
    let body: serde_json::Value = response.json().await.unwrap();
    assert_eq!(body["detail"], "Falsches Passwort");
}

#[tokio::test]
async fn test_login_verify_logout_cycle() {
    let app = spawn_app().await;
    let client = reqwest::Client::new();

    let response = login_with(&client, &app.address, "gltz2025").await;
    assert_eq!(response.status(), 200);
    let body: serde_json::Value = response.json().await.unwrap();
    let token = body["token"].as_str().unwrap();
    assert_eq!(token.len(), 43);

    let verify = client
        .get(format!("{}/api/admin/verify?token={}", app.address, token))
        .send()
        .await
        .unwrap();
    assert_eq!(verify.status(), 200);

    let logout = client
        .post(format!("{}/api/admin/logout?token={}", app.address, token))
        .send()
        .await
        .unwrap();
    assert_eq!(logout.status(), 200);

    // Deactivated tokens no longer verify.
    let verify = client
        .get(format!("{}/api/admin/verify?token={}", app.address, token))
        .send()
        .await
        .unwrap();
    assert_eq!(verify.status(), 401);

    // Logout is idempotent.
    let logout = client
        .post(format!("{}/api/admin/logout?token={}", app.address, token))
        .send()
        .await
        .unwrap();
    assert_eq!(logout.status(), 200);
}

#[tokio::test]
async fn test_expired_session_is_deactivated_lazily() {
    let app = spawn_app().await;
    let client = reqwest::Client::new();

    // A session 31 minutes old has outlived the 30-minute timeout.
    app.repo
        .insert_session(AdminSession {
            token: "alt".to_string(),
            created_at: Utc::now() - Duration::minutes(31),
            active: true,
        })
        .await
        .unwrap();

    let verify = client
        .get(format!("{}/api/admin/verify?token=alt", app.address))
        .send()
        .await
        .unwrap();
    assert_eq!(verify.status(), 401);

    // The failed verification flipped the session inactive.
    let session = app.repo.find_session("alt").await.unwrap().unwrap();
    assert!(!session.active);
}

#[tokio::test]
async fn test_guard_rejects_missing_and_bad_tokens() {
    let app = spawn_app().await;
    let client = reqwest::Client::new();

    let response = client
        .get(format!("{}/api/admin/stats", app.address))
        .send()
        .await
        .unwrap();
    assert_eq!(response.status(), 401);

    let response = client
        .get(format!("{}/api/admin/stats?token=unsinn", app.address))
        .send()
        .await
        .unwrap();
    assert_eq!(response.status(), 401);
}

#[tokio::test]
async fn test_guard_accepts_bearer_header() {
    let app = spawn_app().await;
    let client = reqwest::Client::new();

    let body: serde_json::Value = login_with(&client, &app.address, "gltz2025")
        .await
        .json()
        .await
        .unwrap();
    let token = body["token"].as_str().unwrap();

    let response = client
        .get(format!("{}/api/admin/stats", app.address))
        .header("Authorization", format!("Bearer {token}"))
        .send()
        .await
        .unwrap();
    assert_eq!(response.status(), 200);
}

#[tokio::test]
async fn test_change_password_flow() {
    let app = spawn_app().await;
    let client = reqwest::Client::new();

    let body: serde_json::Value = login_with(&client, &app.address, "gltz2025")
        .await
        .json()
        .await
        .unwrap();
    let token = body["token"].as_str().unwrap();

    // Wrong old password is rejected.
    let response = client
        .post(format!(
            "{}/api/admin/change-password?token={}&old_password=falsch&new_password=neu123",
            app.address, token
        ))
        .send()
        .await
        .unwrap();
    assert_eq!(response.status(), 401);

    let response = client
        .post(format!(
            "{}/api/admin/change-password?token={}&old_password=gltz2025&new_password=neu123",
            app.address, token
        ))
        .send()
        .await
        .unwrap();
    assert_eq!(response.status(), 200);

    // The default password stops working, the new one takes over, and the
    // session that changed it stays valid.
    assert_eq!(
        login_with(&client, &app.address, "gltz2025").await.status(),
        401
    );
    assert_eq!(
        login_with(&client, &app.address, "neu123").await.status(),
        200
    );
    let verify = client
        .get(format!("{}/api/admin/verify?token={}", app.address, token))
        .send()
        .await
        .unwrap();
    assert_eq!(verify.status(), 200);
}
