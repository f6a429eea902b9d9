use axum::{
    Json,
    extract::{Path, Query, State},
};
use serde::Deserialize;
use serde_json::{Value, json};
use uuid::Uuid;

use crate::{
    AppState,
    error::{ApiError, ApiResult},
    models::{GalleryImage, GalleryImageUpdate},
};

fn split_tags(raw: &str) -> Vec<String> {
    raw.split(',')
        .map(str::trim)
        .filter(|t| !t.is_empty())
        .map(String::from)
        .collect()
}

/// GalleryAddParams
///
/// Gallery images are added via query parameters; only the URL is required.
#[derive(Deserialize, utoipa::IntoParams)]
pub struct GalleryAddParams {
    pub url: String,
    #[serde(default)]
    pub title: String,
    #[serde(default)]
    pub alt: String,
    /// Comma-separated tag list.
    #[serde(default)]
    pub tags: String,
}

/// GalleryUpdateParams
///
/// Partial update; absent parameters leave the stored value untouched.
#[derive(Deserialize, utoipa::IntoParams)]
pub struct GalleryUpdateParams {
    pub title: Option<String>,
    pub alt: Option<String>,
    pub caption: Option<String>,
    /// Comma-separated tag list.
    pub tags: Option<String>,
    pub featured: Option<bool>,
    #[serde(rename = "externalLink")]
    pub external_link: Option<String>,
}

/// get_public_gallery
///
/// [Public Route] Lists all gallery images sorted by display order. The
/// gallery has no draft state; everything stored is public.
#[utoipa::path(
    get,
    path = "/gallery",
    responses((status = 200, description = "Gallery", body = [GalleryImage]))
)]
pub async fn get_public_gallery(
    State(state): State<AppState>,
) -> ApiResult<Json<Vec<GalleryImage>>> {
    Ok(Json(state.repo.gallery_images().await?))
}

/// get_admin_gallery
///
/// [Admin Route] Same listing as the public one; kept separate so the admin
/// surface stays uniform.
#[utoipa::path(
    get,
    path = "/admin/gallery",
    responses((status = 200, description = "Gallery", body = [GalleryImage]))
)]
pub async fn get_admin_gallery(
    State(state): State<AppState>,
) -> ApiResult<Json<Vec<GalleryImage>>> {
    Ok(Json(state.repo.gallery_images().await?))
}

/// add_gallery_image
///
/// [Admin Route] Registers an externally hosted image. An empty `alt` falls
/// back to the title.
#[utoipa::path(
    post,
    path = "/admin/gallery",
    params(GalleryAddParams),
    responses((status = 200, description = "Added"))
)]
pub async fn add_gallery_image(
    State(state): State<AppState>,
    Query(params): Query<GalleryAddParams>,
) -> ApiResult<Json<Value>> {
    let alt = if params.alt.is_empty() {
        params.title.clone()
    } else {
        params.alt
    };
    let image = GalleryImage::new(params.url, params.title, alt, split_tags(&params.tags));
    let id = image.id;
    state.repo.insert_gallery_image(image).await?;
    Ok(Json(json!({ "success": true, "id": id })))
}

/// update_gallery_image
///
/// [Admin Route] Partial update via query parameters. Promoting an image to
/// featured first clears the flag everywhere else, so at most one image is
/// featured.
#[utoipa::path(
    put,
    path = "/admin/gallery/{id}",
    params(("id" = Uuid, Path, description = "Image ID"), GalleryUpdateParams),
    responses((status = 200, description = "Updated"))
)]
pub async fn update_gallery_image(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
    Query(params): Query<GalleryUpdateParams>,
) -> ApiResult<Json<Value>> {
    if params.featured == Some(true) {
        state.repo.clear_featured_flags().await?;
    }

    let update = GalleryImageUpdate {
        title: params.title,
        alt: params.alt,
        caption: params.caption,
        tags: params.tags.as_deref().map(split_tags),
        featured: params.featured,
        external_link: params.external_link,
    };
    state.repo.update_gallery_image(id, update).await?;
    Ok(Json(json!({ "success": true })))
}

/// delete_gallery_image
///
/// [Admin Route] Permanently removes an image. Gallery deletes skip the
/// trash.
#[utoipa::path(
    delete,
    path = "/admin/gallery/{id}",
    params(("id" = Uuid, Path, description = "Image ID")),
    responses(
        (status = 200, description = "Deleted"),
        (status = 404, description = "Not found")
    )
)]
pub async fn delete_gallery_image(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> ApiResult<Json<Value>> {
    if !state.repo.delete_gallery_image(id).await? {
        return Err(ApiError::NotFound("Bild nicht gefunden"));
    }
    Ok(Json(json!({ "success": true })))
}
