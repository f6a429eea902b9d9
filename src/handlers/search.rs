use axum::{
    Json,
    extract::{Query, State},
};
use serde::Deserialize;
use serde_json::{Value, json};

use crate::{
    AppState,
    error::{ApiError, ApiResult},
    models::{
        BlogPostCreate, ContentStatus, GalleryImage, Page, PageCreate, SearchResults,
        StaticPageContent, StaticPageHit,
    },
};

/// SearchQuery
#[derive(Deserialize, utoipa::IntoParams)]
pub struct SearchQuery {
    #[serde(default)]
    pub q: String,
}

fn str_field<'a>(doc: &'a Value, key: &str) -> &'a str {
    doc.get(key).and_then(Value::as_str).unwrap_or_default()
}

/// Flattens the searchable text of a static page document: hero fields plus
/// section titles, descriptions and item strings.
fn static_page_text(doc: &Value) -> String {
    let mut text = format!(
        "{} {} {} {}",
        str_field(doc, "title"),
        str_field(doc, "hero_title"),
        str_field(doc, "hero_description"),
        str_field(doc, "hero_label"),
    );

    for section in doc
        .get("sections")
        .and_then(Value::as_array)
        .into_iter()
        .flatten()
    {
        text.push(' ');
        text.push_str(str_field(section, "title"));
        text.push(' ');
        text.push_str(str_field(section, "description"));
        text.push(' ');
        text.push_str(str_field(section, "subtitle"));
        for item in section
            .get("items")
            .and_then(Value::as_array)
            .into_iter()
            .flatten()
        {
            match item {
                Value::String(s) => {
                    text.push(' ');
                    text.push_str(s);
                }
                Value::Object(_) => {
                    text.push(' ');
                    text.push_str(str_field(item, "title"));
                    text.push(' ');
                    text.push_str(str_field(item, "content"));
                }
                _ => {}
            }
        }
    }

    text
}

/// search_content
///
/// [Public Route] Case-insensitive substring search across live pages, live
/// posts, the gallery and the static pages. Queries shorter than two
/// characters return empty result sets rather than an error.
#[utoipa::path(
    get,
    path = "/search",
    params(SearchQuery),
    responses((status = 200, description = "Results", body = SearchResults))
)]
pub async fn search_content(
    State(state): State<AppState>,
    Query(params): Query<SearchQuery>,
) -> ApiResult<Json<SearchResults>> {
    let q = params.q.trim();
    if q.chars().count() < 2 {
        return Ok(Json(SearchResults::default()));
    }

    let pages = state.repo.search_live_pages(q).await?;
    let posts = state.repo.search_live_posts(q).await?;
    let gallery = state.repo.search_gallery(q).await?;

    // Static pages: defaults merged with stored documents (stored keys win),
    // then reduced to lightweight hits.
    let mut merged: Vec<(String, Value)> = Vec::new();
    for default in StaticPageContent::defaults() {
        let doc =
            serde_json::to_value(&default).map_err(|e| ApiError::Internal(e.to_string()))?;
        merged.push((default.page_id, doc));
    }
    for (page_id, stored) in state.repo.static_pages().await? {
        match merged.iter_mut().find(|(id, _)| *id == page_id) {
            Some((_, doc)) => {
                if let (Some(base), Some(overlay)) =
                    (doc.as_object_mut(), stored.as_object())
                {
                    for (key, value) in overlay {
                        base.insert(key.clone(), value.clone());
                    }
                }
            }
            None => merged.push((page_id, stored)),
        }
    }

    let q_lower = q.to_lowercase();
    let static_pages = merged
        .into_iter()
        .filter(|(_, doc)| static_page_text(doc).to_lowercase().contains(&q_lower))
        .map(|(page_id, doc)| {
            let hero_title = str_field(&doc, "hero_title");
            let title = if hero_title.is_empty() {
                str_field(&doc, "title").to_string()
            } else {
                hero_title.to_string()
            };
            let path = match doc.get("path").and_then(Value::as_str) {
                Some(path) if !path.is_empty() => path.to_string(),
                _ => format!("/{page_id}"),
            };
            StaticPageHit {
                title,
                description: str_field(&doc, "hero_description").to_string(),
                path,
                page_id,
            }
        })
        .collect();

    Ok(Json(SearchResults {
        pages,
        posts,
        gallery,
        static_pages,
    }))
}

/// seed_data
///
/// [Public Route] Inserts starter content, but only into collections that are
/// still empty; a populated collection is never touched.
#[utoipa::path(
    post,
    path = "/seed",
    responses((status = 200, description = "Seeded"))
)]
pub async fn seed_data(State(state): State<AppState>) -> ApiResult<Json<Value>> {
    let stats = state.repo.stats().await?;

    if stats.total_posts == 0 {
        let defaults = [
            (
                "Schlaf-Routinen für Zwillinge",
                "Wie wir unsere Zwillinge gleichzeitig zum Schlafen bringen.",
                "Der Schlaf ist eine der größten Herausforderungen...",
                "Schlaf",
                "https://images.unsplash.com/photo-1544367567-0f2fcb009e0b?w=400",
            ),
            (
                "Tandem-Stillen leicht gemacht",
                "Praktische Positionen für das gleichzeitige Stillen.",
                "Das Tandem-Stillen war anfangs eine Herausforderung...",
                "Füttern",
                "https://images.unsplash.com/photo-1555252333-9f8e92e65df9?w=400",
            ),
            (
                "10 Hacks für den Zwillingsalltag",
                "Von der Wickelstation bis zum Einkaufen.",
                "Nach einem Jahr mit Zwillingen haben wir viel gelernt...",
                "Tipps",
                "https://images.unsplash.com/photo-1503454537195-1dcabb73ffb9?w=400",
            ),
        ];
        for (title, excerpt, content, category, image_url) in defaults {
            let post = crate::models::BlogPost::new(
                BlogPostCreate {
                    title: title.to_string(),
                    excerpt: excerpt.to_string(),
                    content: content.to_string(),
                    category: category.to_string(),
                    image_url: Some(image_url.to_string()),
                    status: ContentStatus::Live,
                    publish_date: None,
                },
                chrono::Utc::now(),
            );
            state.repo.insert_post(post).await?;
        }
    }

    if stats.total_gallery == 0 {
        let defaults = [
            (
                "https://images.unsplash.com/photo-1513542789411-b6a5d4f31634?w=600",
                "Handabdrücke",
                "Bunte Kinderkunst - Handabdrücke",
                vec!["Baby-Art", "Handabdrücke"],
            ),
            (
                "https://images.unsplash.com/photo-1579783902614-a3fb3927b6a5?w=600",
                "Abstrakt",
                "Abstrakte Kindermalerei",
                vec!["Abstrakt"],
            ),
            (
                "https://images.unsplash.com/photo-1561214115-f2f134cc4912?w=600",
                "Familie",
                "Kreative Familienmotive",
                vec!["Familie"],
            ),
            (
                "https://images.unsplash.com/photo-1596464716127-f2a82984de30?w=600",
                "Fingermalerei",
                "Fingermalerei von Kindern",
                vec!["Baby-Art"],
            ),
            (
                "https://images.unsplash.com/photo-1499892477393-f675706cbe6e?w=600",
                "Farbkleckse",
                "Bunte Farbkleckse",
                vec!["Abstrakt"],
            ),
            (
                "https://images.unsplash.com/photo-1460661419201-fd4cecdf8a8b?w=600",
                "Kleine Hände",
                "Kunstwerke von kleinen Händen",
                vec!["Baby-Art", "Familie"],
            ),
        ];
        for (url, title, alt, tags) in defaults {
            let image = GalleryImage::new(
                url.to_string(),
                title.to_string(),
                alt.to_string(),
                tags.into_iter().map(String::from).collect(),
            );
            state.repo.insert_gallery_image(image).await?;
        }
    }

    if stats.total_pages == 0 {
        let defaults = [
            ("Impressum", "impressum", "Impressum Inhalt hier...", 1),
            (
                "Datenschutz",
                "datenschutz",
                "Datenschutzerklärung hier...",
                2,
            ),
        ];
        for (title, slug, content, order) in defaults {
            let mut page = Page::new(PageCreate {
                title: title.to_string(),
                slug: slug.to_string(),
                content: content.to_string(),
                status: ContentStatus::Live,
                ..Default::default()
            });
            page.order = order;
            state.repo.insert_page(page).await?;
        }
    }

    Ok(Json(json!({ "success": true })))
}

/// root
///
/// [Public Route] API banner.
#[utoipa::path(get, path = "/", responses((status = 200, description = "Banner")))]
pub async fn root() -> Json<Value> {
    Json(json!({ "message": "gltz.de API" }))
}

/// health
///
/// Liveness probe; also reports the crate version.
#[utoipa::path(get, path = "/health", responses((status = 200, description = "Healthy")))]
pub async fn health() -> Json<Value> {
    Json(json!({ "status": "ok", "version": env!("CARGO_PKG_VERSION") }))
}
