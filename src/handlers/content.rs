use axum::{
    Json,
    extract::{Path, State},
};
use chrono::Utc;
use serde::Serialize;
use serde_json::{Value, json};

use crate::{
    AppState,
    error::{ApiError, ApiResult},
    models::{
        CookiesContent, DatenschutzContent, ImpressumContent, LandingContent, SiteSettings,
        StaticPageContent,
    },
};

fn to_doc<T: Serialize>(value: &T) -> ApiResult<Value> {
    serde_json::to_value(value).map_err(|e| ApiError::Internal(e.to_string()))
}

/// Serves a stored singleton document, falling back to the compiled-in
/// defaults of its content type.
async fn singleton_or_default<T: Serialize + Default>(
    state: &AppState,
    kind: &str,
) -> ApiResult<Json<Value>> {
    match state.repo.singleton(kind).await? {
        Some(doc) => Ok(Json(doc)),
        None => Ok(Json(to_doc(&T::default())?)),
    }
}

// --- Site settings ---

/// get_site_settings
///
/// [Public Route] The display-settings singleton, with full defaults until an
/// admin saves one.
#[utoipa::path(
    get,
    path = "/settings",
    responses((status = 200, description = "Settings", body = SiteSettings))
)]
pub async fn get_site_settings(State(state): State<AppState>) -> ApiResult<Json<SiteSettings>> {
    let settings = match state.repo.singleton("site_settings").await? {
        Some(doc) => {
            serde_json::from_value(doc).map_err(|e| ApiError::Internal(e.to_string()))?
        }
        None => SiteSettings::default(),
    };
    Ok(Json(settings))
}

/// save_site_settings
///
/// [Public Route] Upserts the settings singleton and stamps `updated_at`.
/// Deliberately unauthenticated: the document only carries public display
/// configuration.
#[utoipa::path(
    post,
    path = "/settings",
    request_body = SiteSettings,
    responses((status = 200, description = "Saved", body = SiteSettings))
)]
pub async fn save_site_settings(
    State(state): State<AppState>,
    Json(payload): Json<SiteSettings>,
) -> ApiResult<Json<SiteSettings>> {
    let mut doc = to_doc(&payload)?;
    doc["updated_at"] = json!(Utc::now().to_rfc3339());
    state.repo.put_singleton("site_settings", doc).await?;
    Ok(Json(payload))
}

// --- Legal content (Impressum / Datenschutz / Cookies) ---

/// get_impressum
#[utoipa::path(
    get,
    path = "/page-content/impressum",
    responses((status = 200, description = "Impressum", body = ImpressumContent))
)]
pub async fn get_impressum(State(state): State<AppState>) -> ApiResult<Json<Value>> {
    singleton_or_default::<ImpressumContent>(&state, "impressum").await
}

/// get_admin_impressum
#[utoipa::path(
    get,
    path = "/admin/page-content/impressum",
    responses((status = 200, description = "Impressum", body = ImpressumContent))
)]
pub async fn get_admin_impressum(State(state): State<AppState>) -> ApiResult<Json<Value>> {
    singleton_or_default::<ImpressumContent>(&state, "impressum").await
}

/// update_impressum
#[utoipa::path(
    put,
    path = "/admin/page-content/impressum",
    request_body = ImpressumContent,
    responses((status = 200, description = "Saved"))
)]
pub async fn update_impressum(
    State(state): State<AppState>,
    Json(mut payload): Json<ImpressumContent>,
) -> ApiResult<Json<Value>> {
    payload.updated_at = Utc::now();
    state.repo.put_singleton("impressum", to_doc(&payload)?).await?;
    Ok(Json(json!({ "success": true })))
}

/// get_datenschutz
#[utoipa::path(
    get,
    path = "/page-content/datenschutz",
    responses((status = 200, description = "Datenschutz", body = DatenschutzContent))
)]
pub async fn get_datenschutz(State(state): State<AppState>) -> ApiResult<Json<Value>> {
    singleton_or_default::<DatenschutzContent>(&state, "datenschutz").await
}

/// get_admin_datenschutz
#[utoipa::path(
    get,
    path = "/admin/page-content/datenschutz",
    responses((status = 200, description = "Datenschutz", body = DatenschutzContent))
)]
pub async fn get_admin_datenschutz(State(state): State<AppState>) -> ApiResult<Json<Value>> {
    singleton_or_default::<DatenschutzContent>(&state, "datenschutz").await
}

/// update_datenschutz
#[utoipa::path(
    put,
    path = "/admin/page-content/datenschutz",
    request_body = DatenschutzContent,
    responses((status = 200, description = "Saved"))
)]
pub async fn update_datenschutz(
    State(state): State<AppState>,
    Json(mut payload): Json<DatenschutzContent>,
) -> ApiResult<Json<Value>> {
    payload.updated_at = Utc::now();
    state
        .repo
        .put_singleton("datenschutz", to_doc(&payload)?)
        .await?;
    Ok(Json(json!({ "success": true })))
}

/// get_cookies
#[utoipa::path(
    get,
    path = "/page-content/cookies",
    responses((status = 200, description = "Cookies", body = CookiesContent))
)]
pub async fn get_cookies(State(state): State<AppState>) -> ApiResult<Json<Value>> {
    singleton_or_default::<CookiesContent>(&state, "cookies").await
}

/// get_admin_cookies
#[utoipa::path(
    get,
    path = "/admin/page-content/cookies",
    responses((status = 200, description = "Cookies", body = CookiesContent))
)]
pub async fn get_admin_cookies(State(state): State<AppState>) -> ApiResult<Json<Value>> {
    singleton_or_default::<CookiesContent>(&state, "cookies").await
}

/// update_cookies
#[utoipa::path(
    put,
    path = "/admin/page-content/cookies",
    request_body = CookiesContent,
    responses((status = 200, description = "Saved"))
)]
pub async fn update_cookies(
    State(state): State<AppState>,
    Json(mut payload): Json<CookiesContent>,
) -> ApiResult<Json<Value>> {
    payload.updated_at = Utc::now();
    state.repo.put_singleton("cookies", to_doc(&payload)?).await?;
    Ok(Json(json!({ "success": true })))
}

// --- Landing content ---

/// get_landing_content
#[utoipa::path(
    get,
    path = "/landing-content",
    responses((status = 200, description = "Landing content", body = LandingContent))
)]
pub async fn get_landing_content(State(state): State<AppState>) -> ApiResult<Json<Value>> {
    singleton_or_default::<LandingContent>(&state, "landing").await
}

/// get_admin_landing_content
#[utoipa::path(
    get,
    path = "/admin/landing-content",
    responses((status = 200, description = "Landing content", body = LandingContent))
)]
pub async fn get_admin_landing_content(
    State(state): State<AppState>,
) -> ApiResult<Json<Value>> {
    singleton_or_default::<LandingContent>(&state, "landing").await
}

/// update_landing_content
///
/// [Admin Route] The landing document is free-form: the editor may save
/// partial or extended shapes, so this accepts any JSON object.
#[utoipa::path(
    put,
    path = "/admin/landing-content",
    responses((status = 200, description = "Saved"))
)]
pub async fn update_landing_content(
    State(state): State<AppState>,
    Json(mut payload): Json<Value>,
) -> ApiResult<Json<Value>> {
    let Some(doc) = payload.as_object_mut() else {
        return Err(ApiError::Validation(
            "Erwartet ein JSON-Objekt".to_string(),
        ));
    };
    doc.insert("updated_at".to_string(), json!(Utc::now().to_rfc3339()));
    state.repo.put_singleton("landing", payload).await?;
    Ok(Json(json!({ "success": true })))
}

// --- Static pages ---

/// get_static_page
///
/// [Public Route] Content for one fixed site section. A stored document
/// replaces the compiled-in defaults wholesale; unknown page ids yield a bare
/// `page_id` shell.
#[utoipa::path(
    get,
    path = "/static-pages/{page_id}",
    params(("page_id" = String, Path, description = "Static page ID")),
    responses((status = 200, description = "Content", body = StaticPageContent))
)]
pub async fn get_static_page(
    State(state): State<AppState>,
    Path(page_id): Path<String>,
) -> ApiResult<Json<Value>> {
    if let Some(doc) = state.repo.static_page(&page_id).await? {
        return Ok(Json(doc));
    }
    match StaticPageContent::defaults()
        .into_iter()
        .find(|p| p.page_id == page_id)
    {
        Some(default) => Ok(Json(to_doc(&default)?)),
        None => Ok(Json(json!({ "page_id": page_id }))),
    }
}

/// get_all_static_pages
///
/// [Admin Route] Every known static page: the defaults, overlaid with stored
/// documents where they exist. Stored documents for unknown page ids are
/// appended.
#[utoipa::path(
    get,
    path = "/admin/static-pages",
    responses((status = 200, description = "All static pages", body = [StaticPageContent]))
)]
pub async fn get_all_static_pages(State(state): State<AppState>) -> ApiResult<Json<Vec<Value>>> {
    let mut result: Vec<(String, Value)> = Vec::new();
    for default in StaticPageContent::defaults() {
        result.push((default.page_id.clone(), to_doc(&default)?));
    }

    for (page_id, doc) in state.repo.static_pages().await? {
        match result.iter_mut().find(|(id, _)| *id == page_id) {
            Some((_, slot)) => *slot = doc,
            None => result.push((page_id, doc)),
        }
    }

    Ok(Json(result.into_iter().map(|(_, doc)| doc).collect()))
}

/// get_admin_static_page
#[utoipa::path(
    get,
    path = "/admin/static-pages/{page_id}",
    params(("page_id" = String, Path, description = "Static page ID")),
    responses((status = 200, description = "Content", body = StaticPageContent))
)]
pub async fn get_admin_static_page(
    State(state): State<AppState>,
    Path(page_id): Path<String>,
) -> ApiResult<Json<Value>> {
    get_static_page(State(state), Path(page_id)).await
}

/// update_static_page
///
/// [Admin Route] Upserts a static page document; `page_id` and `updated_at`
/// are server-controlled.
#[utoipa::path(
    put,
    path = "/admin/static-pages/{page_id}",
    params(("page_id" = String, Path, description = "Static page ID")),
    responses((status = 200, description = "Saved"))
)]
pub async fn update_static_page(
    State(state): State<AppState>,
    Path(page_id): Path<String>,
    Json(mut payload): Json<Value>,
) -> ApiResult<Json<Value>> {
    let Some(doc) = payload.as_object_mut() else {
        return Err(ApiError::Validation(
            "Erwartet ein JSON-Objekt".to_string(),
        ));
    };
    doc.insert("page_id".to_string(), json!(page_id));
    doc.insert("updated_at".to_string(), json!(Utc::now().to_rfc3339()));
    state.repo.put_static_page(&page_id, payload).await?;
    Ok(Json(json!({ "success": true })))
}
