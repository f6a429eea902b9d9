use axum::{
    Json,
    extract::{Path, Query, State},
};
use chrono::Utc;
use serde::Deserialize;
use serde_json::{Value, json};
use uuid::Uuid;

use crate::{
    AppState,
    error::{ApiError, ApiResult},
    models::{ContentStatus, Page, PageCreate},
};

/// AdminListFilter
///
/// Admin listings hide trashed rows by default; `include_deleted=true` shows
/// everything.
#[derive(Deserialize, utoipa::IntoParams)]
pub struct AdminListFilter {
    #[serde(default)]
    pub include_deleted: bool,
}

/// DeleteParams
///
/// Delete endpoints default to the soft (trash) path; `permanent=true` removes
/// the row outright.
#[derive(Deserialize, utoipa::IntoParams)]
pub struct DeleteParams {
    #[serde(default)]
    pub permanent: bool,
}

/// get_public_pages
///
/// [Public Route] Lists live pages, sorted by display order. Draft and
/// trashed pages never appear here.
#[utoipa::path(
    get,
    path = "/pages",
    responses((status = 200, description = "Live pages", body = [Page]))
)]
pub async fn get_public_pages(State(state): State<AppState>) -> ApiResult<Json<Vec<Page>>> {
    Ok(Json(state.repo.live_pages().await?))
}

/// get_page_by_slug
///
/// [Public Route] Retrieves a single live page by slug. Non-live pages are
/// indistinguishable from missing ones.
#[utoipa::path(
    get,
    path = "/pages/{slug}",
    params(("slug" = String, Path, description = "Page slug")),
    responses(
        (status = 200, description = "Found", body = Page),
        (status = 404, description = "Not found or not live")
    )
)]
pub async fn get_page_by_slug(
    State(state): State<AppState>,
    Path(slug): Path<String>,
) -> ApiResult<Json<Page>> {
    state
        .repo
        .find_live_page_by_slug(&slug)
        .await?
        .map(Json)
        .ok_or(ApiError::NotFound("Seite nicht gefunden"))
}

/// get_admin_pages
///
/// [Admin Route] Lists pages for the editor, sorted by display order.
#[utoipa::path(
    get,
    path = "/admin/pages",
    params(AdminListFilter),
    responses((status = 200, description = "Pages", body = [Page]))
)]
pub async fn get_admin_pages(
    State(state): State<AppState>,
    Query(filter): Query<AdminListFilter>,
) -> ApiResult<Json<Vec<Page>>> {
    Ok(Json(state.repo.admin_pages(filter.include_deleted).await?))
}

/// create_page
///
/// [Admin Route] Creates a page; status defaults to draft when the payload
/// omits it.
#[utoipa::path(
    post,
    path = "/admin/pages",
    request_body = PageCreate,
    responses((status = 200, description = "Created", body = Page))
)]
pub async fn create_page(
    State(state): State<AppState>,
    Json(payload): Json<PageCreate>,
) -> ApiResult<Json<Page>> {
    let page = Page::new(payload);
    state.repo.insert_page(page.clone()).await?;
    Ok(Json(page))
}

/// update_page
///
/// [Admin Route] Full replacement of a page's editable fields; refreshes
/// `updated_at`.
#[utoipa::path(
    put,
    path = "/admin/pages/{id}",
    params(("id" = Uuid, Path, description = "Page ID")),
    request_body = PageCreate,
    responses(
        (status = 200, description = "Updated", body = Page),
        (status = 404, description = "Not found")
    )
)]
pub async fn update_page(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
    Json(payload): Json<PageCreate>,
) -> ApiResult<Json<Page>> {
    state
        .repo
        .update_page(id, payload)
        .await?
        .map(Json)
        .ok_or(ApiError::NotFound("Seite nicht gefunden"))
}

/// delete_page
///
/// [Admin Route] Moves a page to the trash, or removes it permanently with
/// `?permanent=true`. Soft deletion is idempotent; repeating it refreshes
/// `deleted_at`.
#[utoipa::path(
    delete,
    path = "/admin/pages/{id}",
    params(("id" = Uuid, Path, description = "Page ID"), DeleteParams),
    responses(
        (status = 200, description = "Deleted"),
        (status = 404, description = "Not found")
    )
)]
pub async fn delete_page(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
    Query(params): Query<DeleteParams>,
) -> ApiResult<Json<Value>> {
    let affected = if params.permanent {
        state.repo.delete_page(id).await?
    } else {
        state.repo.soft_delete_page(id, Utc::now()).await?
    };
    if !affected {
        return Err(ApiError::NotFound("Seite nicht gefunden"));
    }
    Ok(Json(json!({ "success": true })))
}

/// restore_page
///
/// [Admin Route] Pulls a page out of the trash. Restored pages always land in
/// draft, even if they were live before deletion; restoring a non-deleted
/// page likewise forces draft.
#[utoipa::path(
    post,
    path = "/admin/pages/{id}/restore",
    params(("id" = Uuid, Path, description = "Page ID")),
    responses(
        (status = 200, description = "Restored"),
        (status = 404, description = "Not found")
    )
)]
pub async fn restore_page(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> ApiResult<Json<Value>> {
    if !state.repo.restore_page(id).await? {
        return Err(ApiError::NotFound("Seite nicht gefunden"));
    }
    Ok(Json(json!({ "success": true })))
}

/// get_trashed_pages
///
/// [Admin Route] Lists the page trash.
#[utoipa::path(
    get,
    path = "/admin/pages/trash",
    responses((status = 200, description = "Trashed pages", body = [Page]))
)]
pub async fn get_trashed_pages(State(state): State<AppState>) -> ApiResult<Json<Vec<Page>>> {
    Ok(Json(state.repo.trashed_pages().await?))
}

/// duplicate_page
///
/// [Admin Route] Copies a page under a fresh id with " (Kopie)" appended to
/// the title and "-kopie" to the slug. Copies always start as drafts.
#[utoipa::path(
    post,
    path = "/admin/pages/{id}/duplicate",
    params(("id" = Uuid, Path, description = "Page ID")),
    responses(
        (status = 200, description = "Duplicated"),
        (status = 404, description = "Not found")
    )
)]
pub async fn duplicate_page(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> ApiResult<Json<Value>> {
    let original = state
        .repo
        .find_page(id)
        .await?
        .ok_or(ApiError::NotFound("Seite nicht gefunden"))?;

    let now = Utc::now();
    let copy = Page {
        id: Uuid::new_v4(),
        title: format!("{} (Kopie)", original.title),
        slug: format!("{}-kopie", original.slug),
        status: ContentStatus::Draft,
        created_at: now,
        updated_at: now,
        deleted_at: None,
        ..original
    };
    let copy_id = copy.id;
    state.repo.insert_page(copy).await?;
    Ok(Json(json!({ "success": true, "id": copy_id })))
}

/// init_default_pages
///
/// [Admin Route] Seeds the legally required pages (Impressum, Datenschutz) if
/// no page with the respective slug exists yet. Returns how many were created.
#[utoipa::path(
    post,
    path = "/admin/pages/init-defaults",
    responses((status = 200, description = "Defaults ensured"))
)]
pub async fn init_default_pages(State(state): State<AppState>) -> ApiResult<Json<Value>> {
    let defaults = [
        (
            "impressum",
            "Impressum",
            "<h2>Angaben gemäß § 5 TMG</h2>\n<p>gltz.de<br>\nFamilie vom Niederrhein<br>\nDeutschland</p>\n\n<h3>Kontakt</h3>\n<p>E-Mail: gltz.de@gmail.com</p>\n\n<h3>Haftungsausschluss</h3>\n<p>Diese Website dient ausschließlich privaten, nicht-kommerziellen Zwecken.</p>",
            100,
        ),
        (
            "datenschutz",
            "Datenschutzerklärung",
            "<h2>Datenschutzerklärung</h2>\n<p>Die folgenden Hinweise geben einen einfachen Überblick darüber, was mit Ihren personenbezogenen Daten passiert.</p>",
            101,
        ),
    ];

    let mut created = 0;
    for (slug, title, content, order) in defaults {
        if state.repo.find_page_by_slug(slug).await?.is_none() {
            let mut page = Page::new(PageCreate {
                title: title.to_string(),
                slug: slug.to_string(),
                content: content.to_string(),
                status: ContentStatus::Live,
                ..Default::default()
            });
            page.order = order;
            state.repo.insert_page(page).await?;
            created += 1;
        }
    }

    Ok(Json(json!({ "success": true, "created": created })))
}
