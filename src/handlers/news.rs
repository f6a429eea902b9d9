use axum::{
    Json,
    extract::{Path, State},
};
use chrono::Utc;
use serde_json::{Value, json};
use uuid::Uuid;

use crate::{
    AppState,
    error::ApiResult,
    models::{NewsItem, NewsItemCreate},
};

/// get_public_news
///
/// [Public Route] Lists live news items within their display window, sorted
/// by order. Items without a start or end bound are always eligible on that
/// side.
#[utoipa::path(
    get,
    path = "/news",
    responses((status = 200, description = "Live news", body = [NewsItem]))
)]
pub async fn get_public_news(State(state): State<AppState>) -> ApiResult<Json<Vec<NewsItem>>> {
    Ok(Json(state.repo.live_news(Utc::now()).await?))
}

/// get_admin_news
///
/// [Admin Route] Lists all news items regardless of status or window.
#[utoipa::path(
    get,
    path = "/admin/news",
    responses((status = 200, description = "All news", body = [NewsItem]))
)]
pub async fn get_admin_news(State(state): State<AppState>) -> ApiResult<Json<Vec<NewsItem>>> {
    Ok(Json(state.repo.all_news().await?))
}

/// create_news
#[utoipa::path(
    post,
    path = "/admin/news",
    request_body = NewsItemCreate,
    responses((status = 200, description = "Created"))
)]
pub async fn create_news(
    State(state): State<AppState>,
    Json(payload): Json<NewsItemCreate>,
) -> ApiResult<Json<Value>> {
    let item = NewsItem::new(payload);
    let id = item.id;
    state.repo.insert_news(item).await?;
    Ok(Json(json!({ "success": true, "id": id })))
}

/// update_news
///
/// [Admin Route] Replaces the editable fields. Reports success even for
/// unknown ids.
#[utoipa::path(
    put,
    path = "/admin/news/{id}",
    params(("id" = Uuid, Path, description = "News ID")),
    request_body = NewsItemCreate,
    responses((status = 200, description = "Updated"))
)]
pub async fn update_news(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
    Json(payload): Json<NewsItemCreate>,
) -> ApiResult<Json<Value>> {
    state.repo.update_news(id, payload).await?;
    Ok(Json(json!({ "success": true })))
}

/// delete_news
///
/// [Admin Route] Permanent removal; success even for unknown ids.
#[utoipa::path(
    delete,
    path = "/admin/news/{id}",
    params(("id" = Uuid, Path, description = "News ID")),
    responses((status = 200, description = "Deleted"))
)]
pub async fn delete_news(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> ApiResult<Json<Value>> {
    state.repo.delete_news(id).await?;
    Ok(Json(json!({ "success": true })))
}
