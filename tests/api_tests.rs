use chrono::Utc;
use gltz_api::{
    AppConfig, AppState, MemoryRepository, create_router,
    models::{BlogPost, ContentStatus, GalleryImage, NewsItem, NewsItemCreate, Page, SearchResults},
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

/// Logs in with the default password and returns the session token.
async fn login(client: &reqwest::Client, address: &str) -> String {
    let response = client
        .post(format!("{address}/api/admin/login"))
        .json(&serde_json::json!({ "password": "gltz2025" }))
        .send()
        .await
        .expect("login request failed");
    assert_eq!(response.status(), 200);
    let body: serde_json::Value = response.json().await.unwrap();
    body["token"].as_str().unwrap().to_string()
}

#[tokio::test]
async fn test_health_check() {
    let app = spawn_app().await;
    let client = reqwest::Client::new();
    let response = client
        .get(format!("{}/health", app.address))
        .send()
        .await
        .expect("req fail");
    assert!(response.status().is_success());
    let body: serde_json::Value = response.json().await.unwrap();
    assert_eq!(body["status"], "ok");
}

#[tokio::test]
async fn test_root_banner() {
    let app = spawn_app().await;
    let client = reqwest::Client::new();
    let body: serde_json::Value = client
        .get(format!("{}/api/", app.address))
        .send()
        .await
        .unwrap()
        .json()
        .await
        .unwrap();
    assert_eq!(body["message"], "gltz.de API");
}

#[tokio::test]
async fn test_page_lifecycle() {
    let app = spawn_app().await;
    let client = reqwest::Client::new();
    let token = login(&client, &app.address).await;

    // Create: status omitted => draft.
    let response = client
        .post(format!("{}/api/admin/pages?token={}", app.address, token))
        .json(&serde_json::json!({
            "title": "Über uns", "slug": "ueber-uns", "content": "<p>Hallo</p>"
        }))
        .send()
        .await
        .unwrap();
    assert_eq!(response.status(), 200);
    let page: Page = response.json().await.unwrap();

    // Drafts never show up publicly.
    let list: Vec<Page> = client
        .get(format!("{}/api/pages", app.address))
        .send()
        .await
        .unwrap()
        .json()
        .await
        .unwrap();
    assert!(list.iter().all(|p| p.id != page.id));
    let by_slug = client
        .get(format!("{}/api/pages/ueber-uns", app.address))
        .send()
        .await
        .unwrap();
    assert_eq!(by_slug.status(), 404);

    // Publish via full update.
    let response = client
        .put(format!(
            "{}/api/admin/pages/{}?token={}",
            app.address, page.id, token
        ))
        .json(&serde_json::json!({
            "title": "Über uns", "slug": "ueber-uns", "content": "<p>Hallo</p>",
            "status": "live"
        }))
        .send()
        .await
        .unwrap();
    assert_eq!(response.status(), 200);

    let fetched: Page = client
        .get(format!("{}/api/pages/ueber-uns", app.address))
        .send()
        .await
        .unwrap()
        .json()
        .await
        .unwrap();
    assert_eq!(fetched.id, page.id);

    // Duplicate: copy lands in draft with suffixed title and slug.
    let response = client
        .post(format!(
            "{}/api/admin/pages/{}/duplicate?token={}",
            app.address, page.id, token
        ))
        .send()
        .await
        .unwrap();
    assert_eq!(response.status(), 200);
    let admin_list: Vec<Page> = client
        .get(format!("{}/api/admin/pages?token={}", app.address, token))
        .send()
        .await
        .unwrap()
        .json()
        .await
        .unwrap();
    let copy = admin_list
        .iter()
        .find(|p| p.slug == "ueber-uns-kopie")
        .expect("copy should exist");
    assert_eq!(copy.title, "Über uns (Kopie)");
    assert_eq!(copy.status, gltz_api::models::ContentStatus::Draft);
}

#[tokio::test]
async fn test_update_unknown_page_is_404() {
    let app = spawn_app().await;
    let client = reqwest::Client::new();
    let token = login(&client, &app.address).await;

    let response = client
        .put(format!(
            "{}/api/admin/pages/{}?token={}",
            app.address,
            uuid::Uuid::new_v4(),
            token
        ))
        .json(&serde_json::json!({ "title": "x", "slug": "x", "content": "x" }))
        .send()
        .await
        .unwrap();
    assert_eq!(response.status(), 404);
    let body: serde_json::Value = response.json().await.unwrap();
    assert_eq!(body["detail"], "Seite nicht gefunden");
}

#[tokio::test]
async fn test_init_default_pages_is_idempotent() {
    let app = spawn_app().await;
    let client = reqwest::Client::new();
    let token = login(&client, &app.address).await;

    let first: serde_json::Value = client
        .post(format!(
            "{}/api/admin/pages/init-defaults?token={}",
            app.address, token
        ))
        .send()
        .await
        .unwrap()
        .json()
        .await
        .unwrap();
    assert_eq!(first["created"], 2);

    let second: serde_json::Value = client
        .post(format!(
            "{}/api/admin/pages/init-defaults?token={}",
            app.address, token
        ))
        .send()
        .await
        .unwrap()
        .json()
        .await
        .unwrap();
    assert_eq!(second["created"], 0);
}

#[tokio::test]
async fn test_blog_limit_and_publish_date() {
    let app = spawn_app().await;
    let client = reqwest::Client::new();
    let token = login(&client, &app.address).await;

    for i in 0..3 {
        let response = client
            .post(format!("{}/api/admin/posts?token={}", app.address, token))
            .json(&serde_json::json!({
                "title": format!("Post {i}"), "excerpt": "e", "content": "c",
                "category": "Tipps", "status": "live",
                "publish_date": format!("2025-01-0{}T12:00:00Z", i + 1)
            }))
            .send()
            .await
            .unwrap();
        assert_eq!(response.status(), 200);
    }

    // Newest first, limit respected.
    let posts: Vec<BlogPost> = client
        .get(format!("{}/api/blog?limit=2", app.address))
        .send()
        .await
        .unwrap()
        .json()
        .await
        .unwrap();
    assert_eq!(posts.len(), 2);
    assert_eq!(posts[0].title, "Post 2");
    assert_eq!(posts[1].title, "Post 1");

    // A garbage publish_date is a client error.
    let response = client
        .post(format!("{}/api/admin/posts?token={}", app.address, token))
        .json(&serde_json::json!({
            "title": "Bad", "excerpt": "e", "content": "c", "category": "Tipps",
            "publish_date": "gestern"
        }))
        .send()
        .await
        .unwrap();
    assert_eq!(response.status(), 400);
}

#[tokio::test]
async fn test_gallery_featured_is_exclusive() {
    let app = spawn_app().await;
    let client = reqwest::Client::new();
    let token = login(&client, &app.address).await;

    let a: serde_json::Value = client
        .post(format!(
            "{}/api/admin/gallery?token={}&url=https://example.com/a.jpg&title=A&tags=Familie",
            app.address, token
        ))
        .send()
        .await
        .unwrap()
        .json()
        .await
        .unwrap();
    let b: serde_json::Value = client
        .post(format!(
            "{}/api/admin/gallery?token={}&url=https://example.com/b.jpg&title=B",
            app.address, token
        ))
        .send()
        .await
        .unwrap()
        .json()
        .await
        .unwrap();
    let (id_a, id_b) = (a["id"].as_str().unwrap(), b["id"].as_str().unwrap());

    for id in [id_a, id_b] {
        let response = client
            .put(format!(
                "{}/api/admin/gallery/{}?token={}&featured=true",
                app.address, id, token
            ))
            .send()
            .await
            .unwrap();
        assert_eq!(response.status(), 200);
    }

    let images: Vec<GalleryImage> = client
        .get(format!("{}/api/gallery", app.address))
        .send()
        .await
        .unwrap()
        .json()
        .await
        .unwrap();
    let featured: Vec<_> = images.iter().filter(|img| img.featured).collect();
    assert_eq!(featured.len(), 1);
    assert_eq!(featured[0].id.to_string(), id_b);

    // Empty alt fell back to the title on add.
    let image_a = images
        .iter()
        .find(|img| img.id.to_string() == id_a)
        .unwrap();
    assert_eq!(image_a.alt, "A");
    assert_eq!(image_a.tags, vec!["Familie".to_string()]);
}

#[tokio::test]
async fn test_gallery_delete_unknown_is_404() {
    let app = spawn_app().await;
    let client = reqwest::Client::new();
    let token = login(&client, &app.address).await;

    let response = client
        .delete(format!(
            "{}/api/admin/gallery/{}?token={}",
            app.address,
            uuid::Uuid::new_v4(),
            token
        ))
        .send()
        .await
        .unwrap();
    assert_eq!(response.status(), 404);
}

#[tokio::test]
async fn test_public_news_respects_display_window() {
    let app = spawn_app().await;
    let client = reqwest::Client::new();
    let now = Utc::now();

    let seed = [
        // (title, status, start offset, end offset) in days from now.
        ("Laufend", ContentStatus::Live, Some(-1), Some(1)),
        ("Abgelaufen", ContentStatus::Live, Some(-10), Some(-1)),
        ("Zukünftig", ContentStatus::Live, Some(1), Some(10)),
        ("Offen", ContentStatus::Live, None, None),
        ("Nur-Start", ContentStatus::Live, Some(-1), None),
        ("Entwurf", ContentStatus::Draft, None, None),
    ];
    for (title, status, start, end) in seed {
        let mut item = NewsItem::new(NewsItemCreate {
            title: title.to_string(),
            image_url: "https://example.com/banner.jpg".to_string(),
            status,
            ..Default::default()
        });
        item.start_date = start.map(|d| now + chrono::Duration::days(d));
        item.end_date = end.map(|d| now + chrono::Duration::days(d));
        app.repo.insert_news(item).await.unwrap();
    }

    // Public delivery: live items inside their window, missing bounds open.
    let public: Vec<NewsItem> = client
        .get(format!("{}/api/news", app.address))
        .send()
        .await
        .unwrap()
        .json()
        .await
        .unwrap();
    let mut titles: Vec<&str> = public.iter().map(|n| n.title.as_str()).collect();
    titles.sort();
    assert_eq!(titles, vec!["Laufend", "Nur-Start", "Offen"]);

    // The admin listing ignores status and window alike.
    let token = login(&client, &app.address).await;
    let all: Vec<NewsItem> = client
        .get(format!("{}/api/admin/news?token={}", app.address, token))
        .send()
        .await
        .unwrap()
        .json()
        .await
        .unwrap();
    assert_eq!(all.len(), 6);
}

#[tokio::test]
async fn test_contact_form_and_export() {
    let app = spawn_app().await;
    let client = reqwest::Client::new();

    // Missing @ is rejected.
    let response = client
        .post(format!("{}/api/contact", app.address))
        .json(&serde_json::json!({
            "email": "keine-adresse", "thema": "Frage", "nachricht": "Hallo"
        }))
        .send()
        .await
        .unwrap();
    assert_eq!(response.status(), 400);

    let response = client
        .post(format!("{}/api/contact", app.address))
        .json(&serde_json::json!({
            "name": "Anna", "email": "anna@example.com", "thema": "Frage",
            "nachricht": "Sie sagte \"hallo\""
        }))
        .send()
        .await
        .unwrap();
    assert_eq!(response.status(), 200);

    let token = login(&client, &app.address).await;

    // New submissions carry status "neu" and match the status filter.
    let contacts: Vec<serde_json::Value> = client
        .get(format!(
            "{}/api/admin/contacts?token={}&status=neu",
            app.address, token
        ))
        .send()
        .await
        .unwrap()
        .json()
        .await
        .unwrap();
    assert_eq!(contacts.len(), 1);
    assert_eq!(contacts[0]["status"], "neu");

    // Double quotes in the message are flattened in the CSV export.
    let export: serde_json::Value = client
        .get(format!(
            "{}/api/admin/contacts/export?token={}",
            app.address, token
        ))
        .send()
        .await
        .unwrap()
        .json()
        .await
        .unwrap();
    let csv = export["csv"].as_str().unwrap();
    assert!(csv.starts_with("Datum,Name,Email,Thema,Nachricht,Status"));
    assert!(csv.contains("Sie sagte 'hallo'"));
    assert_eq!(csv.lines().count(), 2);
}

#[tokio::test]
async fn test_settings_roundtrip() {
    let app = spawn_app().await;
    let client = reqwest::Client::new();

    // Unsaved settings come back as the full defaults.
    let defaults: serde_json::Value = client
        .get(format!("{}/api/settings", app.address))
        .send()
        .await
        .unwrap()
        .json()
        .await
        .unwrap();
    assert_eq!(defaults["siteTitle"], "gltz.de – Twins-Projekt");
    assert_eq!(defaults["logoText"], "gltz.de");

    // The save endpoint is open and fills missing fields from the defaults.
    let response = client
        .post(format!("{}/api/settings", app.address))
        .json(&serde_json::json!({ "siteTitle": "Familie Glotz" }))
        .send()
        .await
        .unwrap();
    assert_eq!(response.status(), 200);

    let saved: serde_json::Value = client
        .get(format!("{}/api/settings", app.address))
        .send()
        .await
        .unwrap()
        .json()
        .await
        .unwrap();
    assert_eq!(saved["siteTitle"], "Familie Glotz");
    // Missing fields were filled from the defaults on save.
    assert_eq!(saved["logoText"], "gltz.de");
}

#[tokio::test]
async fn test_static_page_defaults_and_override() {
    let app = spawn_app().await;
    let client = reqwest::Client::new();

    let doc: serde_json::Value = client
        .get(format!("{}/api/static-pages/reisen", app.address))
        .send()
        .await
        .unwrap()
        .json()
        .await
        .unwrap();
    assert_eq!(doc["page_id"], "reisen");
    assert_eq!(doc["path"], "/reisen");

    // Unknown ids yield a bare shell rather than an error.
    let shell: serde_json::Value = client
        .get(format!("{}/api/static-pages/unbekannt", app.address))
        .send()
        .await
        .unwrap()
        .json()
        .await
        .unwrap();
    assert_eq!(shell, serde_json::json!({ "page_id": "unbekannt" }));

    // A stored document replaces the default wholesale.
    let token = login(&client, &app.address).await;
    let response = client
        .put(format!(
            "{}/api/admin/static-pages/reisen?token={}",
            app.address, token
        ))
        .json(&serde_json::json!({ "title": "Unsere Reisen" }))
        .send()
        .await
        .unwrap();
    assert_eq!(response.status(), 200);

    let stored: serde_json::Value = client
        .get(format!("{}/api/static-pages/reisen", app.address))
        .send()
        .await
        .unwrap()
        .json()
        .await
        .unwrap();
    assert_eq!(stored["title"], "Unsere Reisen");
    assert!(stored.get("hero_title").is_none());
}

#[tokio::test]
async fn test_seed_only_fills_empty_collections() {
    let app = spawn_app().await;
    let client = reqwest::Client::new();

    let response = client
        .post(format!("{}/api/seed", app.address))
        .send()
        .await
        .unwrap();
    assert_eq!(response.status(), 200);

    let posts: Vec<BlogPost> = client
        .get(format!("{}/api/blog", app.address))
        .send()
        .await
        .unwrap()
        .json()
        .await
        .unwrap();
    assert_eq!(posts.len(), 3);
    let images = app.repo.gallery_images().await.unwrap();
    assert_eq!(images.len(), 6);

    // Second run is a no-op.
    client
        .post(format!("{}/api/seed", app.address))
        .send()
        .await
        .unwrap();
    assert_eq!(app.repo.gallery_images().await.unwrap().len(), 6);
}

#[tokio::test]
async fn test_search_spans_collections() {
    let app = spawn_app().await;
    let client = reqwest::Client::new();
    client
        .post(format!("{}/api/seed", app.address))
        .send()
        .await
        .unwrap();

    // Too-short queries return empty buckets instead of an error.
    let empty: SearchResults = client
        .get(format!("{}/api/search?q=a", app.address))
        .send()
        .await
        .unwrap()
        .json()
        .await
        .unwrap();
    assert!(empty.posts.is_empty() && empty.pages.is_empty());

    let results: SearchResults = client
        .get(format!("{}/api/search?q=zwilling", app.address))
        .send()
        .await
        .unwrap()
        .json()
        .await
        .unwrap();
    assert!(!results.posts.is_empty(), "seeded posts mention Zwillinge");

    // Static page defaults are searchable too.
    let results: SearchResults = client
        .get(format!("{}/api/search?q=reisen", app.address))
        .send()
        .await
        .unwrap()
        .json()
        .await
        .unwrap();
    assert!(
        results
            .static_pages
            .iter()
            .any(|hit| hit.page_id == "reisen")
    );
}
