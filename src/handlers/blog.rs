use axum::{
    Json,
    extract::{Path, Query, State},
};
use chrono::{DateTime, Utc};
use serde::Deserialize;
use serde_json::{Value, json};
use uuid::Uuid;

use crate::{
    AppState,
    error::{ApiError, ApiResult},
    handlers::pages::{AdminListFilter, DeleteParams},
    models::{BlogPost, BlogPostCreate},
};

/// BlogLimit
#[derive(Deserialize, utoipa::IntoParams)]
pub struct BlogLimit {
    /// Maximum number of posts to return (default 10).
    pub limit: Option<i64>,
}

/// Parses the optional RFC 3339 publish date off a create/update payload.
/// An unparseable value is a client error, an absent one yields None.
fn parse_publish_date(req: &BlogPostCreate) -> ApiResult<Option<DateTime<Utc>>> {
    match &req.publish_date {
        None => Ok(None),
        Some(raw) => DateTime::parse_from_rfc3339(raw)
            .map(|dt| Some(dt.with_timezone(&Utc)))
            .map_err(|_| ApiError::Validation(format!("Ungültiges Datum: {raw}"))),
    }
}

/// get_public_blog
///
/// [Public Route] Lists live posts, newest first.
#[utoipa::path(
    get,
    path = "/blog",
    params(BlogLimit),
    responses((status = 200, description = "Live posts", body = [BlogPost]))
)]
pub async fn get_public_blog(
    State(state): State<AppState>,
    Query(params): Query<BlogLimit>,
) -> ApiResult<Json<Vec<BlogPost>>> {
    let limit = params.limit.unwrap_or(10);
    Ok(Json(state.repo.live_posts(Some(limit)).await?))
}

/// get_blog_post
///
/// [Public Route] Retrieves a single live post.
#[utoipa::path(
    get,
    path = "/blog/{id}",
    params(("id" = Uuid, Path, description = "Post ID")),
    responses(
        (status = 200, description = "Found", body = BlogPost),
        (status = 404, description = "Not found or not live")
    )
)]
pub async fn get_blog_post(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> ApiResult<Json<BlogPost>> {
    state
        .repo
        .find_live_post(id)
        .await?
        .map(Json)
        .ok_or(ApiError::NotFound("Beitrag nicht gefunden"))
}

/// get_admin_posts
///
/// [Admin Route] Lists posts for the editor, sorted by publish date
/// descending.
#[utoipa::path(
    get,
    path = "/admin/posts",
    params(AdminListFilter),
    responses((status = 200, description = "Posts", body = [BlogPost]))
)]
pub async fn get_admin_posts(
    State(state): State<AppState>,
    Query(filter): Query<AdminListFilter>,
) -> ApiResult<Json<Vec<BlogPost>>> {
    Ok(Json(state.repo.admin_posts(filter.include_deleted).await?))
}

/// create_post
///
/// [Admin Route] Creates a post. An omitted `publish_date` defaults to now.
#[utoipa::path(
    post,
    path = "/admin/posts",
    request_body = BlogPostCreate,
    responses(
        (status = 200, description = "Created", body = BlogPost),
        (status = 400, description = "Unparseable publish_date")
    )
)]
pub async fn create_post(
    State(state): State<AppState>,
    Json(payload): Json<BlogPostCreate>,
) -> ApiResult<Json<BlogPost>> {
    let publish_date = parse_publish_date(&payload)?.unwrap_or_else(Utc::now);
    let post = BlogPost::new(payload, publish_date);
    state.repo.insert_post(post.clone()).await?;
    Ok(Json(post))
}

/// update_post
///
/// [Admin Route] Full replacement of a post's editable fields. An omitted
/// `publish_date` keeps the stored one.
#[utoipa::path(
    put,
    path = "/admin/posts/{id}",
    params(("id" = Uuid, Path, description = "Post ID")),
    request_body = BlogPostCreate,
    responses(
        (status = 200, description = "Updated", body = BlogPost),
        (status = 404, description = "Not found")
    )
)]
pub async fn update_post(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
    Json(payload): Json<BlogPostCreate>,
) -> ApiResult<Json<BlogPost>> {
    let publish_date = parse_publish_date(&payload)?;
    state
        .repo
        .update_post(id, payload, publish_date)
        .await?
        .map(Json)
        .ok_or(ApiError::NotFound("Beitrag nicht gefunden"))
}

/// delete_post
///
/// [Admin Route] Trashes a post, or removes it permanently with
/// `?permanent=true`. Reports success even for unknown ids.
#[utoipa::path(
    delete,
    path = "/admin/posts/{id}",
    params(("id" = Uuid, Path, description = "Post ID"), DeleteParams),
    responses((status = 200, description = "Deleted"))
)]
pub async fn delete_post(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
    Query(params): Query<DeleteParams>,
) -> ApiResult<Json<Value>> {
    if params.permanent {
        state.repo.delete_post(id).await?;
    } else {
        state.repo.soft_delete_post(id, Utc::now()).await?;
    }
    Ok(Json(json!({ "success": true })))
}

/// restore_post
///
/// [Admin Route] Restores a post to draft and clears its deletion timestamp.
/// Reports success even for unknown ids.
#[utoipa::path(
    post,
    path = "/admin/posts/{id}/restore",
    params(("id" = Uuid, Path, description = "Post ID")),
    responses((status = 200, description = "Restored"))
)]
pub async fn restore_post(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> ApiResult<Json<Value>> {
    state.repo.restore_post(id).await?;
    Ok(Json(json!({ "success": true })))
}

/// get_trashed_posts
///
/// [Admin Route] Lists the post trash.
#[utoipa::path(
    get,
    path = "/admin/posts/trash",
    responses((status = 200, description = "Trashed posts", body = [BlogPost]))
)]
pub async fn get_trashed_posts(State(state): State<AppState>) -> ApiResult<Json<Vec<BlogPost>>> {
    Ok(Json(state.repo.trashed_posts().await?))
}
