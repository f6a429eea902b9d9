use chrono::{Duration, Utc};
use gltz_api::{
    AppConfig, AppState, MemoryRepository, create_router,
    models::{ContentStatus, Page, PageCreate},
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

async fn login(client: &reqwest::Client, address: &str) -> String {
    let body: serde_json::Value = client
        .post(format!("{address}/api/admin/login"))
        .json(&serde_json::json!({ "password": "gltz2025" }))
        .send()
        .await
        .expect("login request failed")
        .json()
        .await
        .unwrap();
    body["token"].as_str().unwrap().to_string()
}

async fn seed_live_page(repo: &RepositoryState, title: &str, slug: &str) -> Page {
    let page = Page::new(PageCreate {
        title: title.to_string(),
        slug: slug.to_string(),
        content: "<p>Inhalt</p>".to_string(),
        status: ContentStatus::Live,
        ..Default::default()
    });
    repo.insert_page(page.clone()).await.unwrap();
    page
}

#[tokio::test]
async fn test_soft_delete_moves_page_to_trash() {
    let app = spawn_app().await;
    let client = reqwest::Client::new();
    let token = login(&client, &app.address).await;
    let page = seed_live_page(&app.repo, "Reisen", "reisen").await;

    let response = client
        .delete(format!(
            "{}/api/admin/pages/{}?token={}",
            app.address, page.id, token
        ))
        .send()
        .await
        .unwrap();
    assert_eq!(response.status(), 200);

    // Gone from the public site and the default admin listing.
    let public: Vec<Page> = client
        .get(format!("{}/api/pages", app.address))
        .send()
        .await
        .unwrap()
        .json()
        .await
        .unwrap();
    assert!(public.is_empty());
    let admin: Vec<Page> = client
        .get(format!("{}/api/admin/pages?token={}", app.address, token))
        .send()
        .await
        .unwrap()
        .json()
        .await
        .unwrap();
    assert!(admin.is_empty());

    // Visible with include_deleted and in the trash listing.
    let everything: Vec<Page> = client
        .get(format!(
            "{}/api/admin/pages?token={}&include_deleted=true",
            app.address, token
        ))
        .send()
        .await
        .unwrap()
        .json()
        .await
        .unwrap();
    assert_eq!(everything.len(), 1);
    let trash: Vec<Page> = client
        .get(format!(
            "{}/api/admin/pages/trash?token={}",
            app.address, token
        ))
        .send()
        .await
        .unwrap()
        .json()
        .await
        .unwrap();
    assert_eq!(trash.len(), 1);
    assert_eq!(trash[0].status, ContentStatus::Deleted);
    assert!(trash[0].deleted_at.is_some());
}

#[tokio::test]
async fn test_restore_forces_draft() {
    let app = spawn_app().await;
    let client = reqwest::Client::new();
    let token = login(&client, &app.address).await;
    let page = seed_live_page(&app.repo, "Tipps", "tipps").await;

    app.repo.soft_delete_page(page.id, Utc::now()).await.unwrap();

    let response = client
        .post(format!(
            "{}/api/admin/pages/{}/restore?token={}",
            app.address, page.id, token
        ))
        .send()
        .await
        .unwrap();
    assert_eq!(response.status(), 200);

    // The page was live before deletion; restoring still lands in draft.
    let restored = app.repo.find_page(page.id).await.unwrap().unwrap();
    assert_eq!(restored.status, ContentStatus::Draft);
    assert!(restored.deleted_at.is_none());
}

#[tokio::test]
async fn test_restore_of_live_page_forces_draft() {
    let app = spawn_app().await;
    let client = reqwest::Client::new();
    let token = login(&client, &app.address).await;
    let page = seed_live_page(&app.repo, "Aktuell", "aktuell").await;

    // Restoring a page that was never deleted still succeeds and demotes it.
    let response = client
        .post(format!(
            "{}/api/admin/pages/{}/restore?token={}",
            app.address, page.id, token
        ))
        .send()
        .await
        .unwrap();
    assert_eq!(response.status(), 200);

    let stored = app.repo.find_page(page.id).await.unwrap().unwrap();
    assert_eq!(stored.status, ContentStatus::Draft);
    assert!(stored.deleted_at.is_none());

    // Demoted out of the public listing.
    let public: Vec<Page> = client
        .get(format!("{}/api/pages", app.address))
        .send()
        .await
        .unwrap()
        .json()
        .await
        .unwrap();
    assert!(public.is_empty());
}

#[tokio::test]
async fn test_permanent_delete_skips_trash() {
    let app = spawn_app().await;
    let client = reqwest::Client::new();
    let token = login(&client, &app.address).await;
    let page = seed_live_page(&app.repo, "Weg", "weg").await;

    let response = client
        .delete(format!(
            "{}/api/admin/pages/{}?token={}&permanent=true",
            app.address, page.id, token
        ))
        .send()
        .await
        .unwrap();
    assert_eq!(response.status(), 200);

    assert!(app.repo.find_page(page.id).await.unwrap().is_none());
    assert!(app.repo.trashed_pages().await.unwrap().is_empty());

    // Deleting it again is a 404; pages report missing ids.
    let response = client
        .delete(format!(
            "{}/api/admin/pages/{}?token={}",
            app.address, page.id, token
        ))
        .send()
        .await
        .unwrap();
    assert_eq!(response.status(), 404);
}

#[tokio::test]
async fn test_post_delete_and_restore_tolerate_unknown_ids() {
    let app = spawn_app().await;
    let client = reqwest::Client::new();
    let token = login(&client, &app.address).await;
    let ghost = uuid::Uuid::new_v4();

    // Blog deletes and restores report success regardless of the id.
    let response = client
        .delete(format!(
            "{}/api/admin/posts/{}?token={}",
            app.address, ghost, token
        ))
        .send()
        .await
        .unwrap();
    assert_eq!(response.status(), 200);

    let response = client
        .post(format!(
            "{}/api/admin/posts/{}/restore?token={}",
            app.address, ghost, token
        ))
        .send()
        .await
        .unwrap();
    assert_eq!(response.status(), 200);
}

#[tokio::test]
async fn test_cleanup_respects_retention_boundary() {
    let app = spawn_app().await;
    let client = reqwest::Client::new();
    let token = login(&client, &app.address).await;

    let old = seed_live_page(&app.repo, "Alt", "alt").await;
    let recent = seed_live_page(&app.repo, "Neu", "neu").await;
    app.repo
        .soft_delete_page(old.id, Utc::now() - Duration::days(31))
        .await
        .unwrap();
    app.repo
        .soft_delete_page(recent.id, Utc::now() - Duration::days(29))
        .await
        .unwrap();

    let body: serde_json::Value = client
        .post(format!(
            "{}/api/admin/trash/cleanup?token={}",
            app.address, token
        ))
        .send()
        .await
        .unwrap()
        .json()
        .await
        .unwrap();
    assert_eq!(body["deleted_pages"], 1);

    // Only the page past the 30-day retention was purged.
    assert!(app.repo.find_page(old.id).await.unwrap().is_none());
    assert!(app.repo.find_page(recent.id).await.unwrap().is_some());
}

#[tokio::test]
async fn test_empty_trash_scopes() {
    let app = spawn_app().await;
    let client = reqwest::Client::new();
    let token = login(&client, &app.address).await;

    let page = seed_live_page(&app.repo, "Seite", "seite").await;
    app.repo.soft_delete_page(page.id, Utc::now()).await.unwrap();

    let post = gltz_api::models::BlogPost::new(
        gltz_api::models::BlogPostCreate {
            title: "Beitrag".to_string(),
            status: ContentStatus::Live,
            ..Default::default()
        },
        Utc::now(),
    );
    app.repo.insert_post(post.clone()).await.unwrap();
    app.repo.soft_delete_post(post.id, Utc::now()).await.unwrap();

    // Scope "posts" leaves the page trash alone.
    let body: serde_json::Value = client
        .post(format!(
            "{}/api/admin/trash/empty?token={}&type=posts",
            app.address, token
        ))
        .send()
        .await
        .unwrap()
        .json()
        .await
        .unwrap();
    assert_eq!(body["deleted_posts"], 1);
    assert_eq!(body["deleted_pages"], 0);
    assert_eq!(app.repo.trashed_pages().await.unwrap().len(), 1);

    // Default scope clears the rest.
    let body: serde_json::Value = client
        .post(format!(
            "{}/api/admin/trash/empty?token={}",
            app.address, token
        ))
        .send()
        .await
        .unwrap()
        .json()
        .await
        .unwrap();
    assert_eq!(body["deleted_pages"], 1);
    assert!(app.repo.trashed_pages().await.unwrap().is_empty());
}

#[tokio::test]
async fn test_soft_delete_is_idempotent_and_refreshes_timestamp() {
    let app = spawn_app().await;
    let page = seed_live_page(&app.repo, "Doppelt", "doppelt").await;

    let first = Utc::now() - Duration::minutes(10);
    let second = Utc::now();
    assert!(app.repo.soft_delete_page(page.id, first).await.unwrap());
    assert!(app.repo.soft_delete_page(page.id, second).await.unwrap());

    let stored = app.repo.find_page(page.id).await.unwrap().unwrap();
    assert_eq!(stored.deleted_at, Some(second));
}
