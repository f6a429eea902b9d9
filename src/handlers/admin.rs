use axum::{
    Json,
    extract::{Query, State},
};
use chrono::{Duration, Utc};
use serde::Deserialize;
use serde_json::{Value, json};

use crate::{
    AppState, auth,
    error::{ApiError, ApiResult},
    models::{AdminLogin, DashboardStats, LoginResponse},
};

/// TokenParam
#[derive(Deserialize, utoipa::IntoParams)]
pub struct TokenParam {
    pub token: String,
}

/// ChangePasswordParams
#[derive(Deserialize, utoipa::IntoParams)]
pub struct ChangePasswordParams {
    pub token: String,
    pub old_password: String,
    pub new_password: String,
}

/// EmptyTrashParams
#[derive(Deserialize, utoipa::IntoParams)]
pub struct EmptyTrashParams {
    /// "all" (default), "pages" or "posts".
    #[serde(rename = "type", default = "default_scope")]
    pub scope: String,
}

fn default_scope() -> String {
    "all".to_string()
}

/// admin_login
///
/// [Public Route] Exchanges the admin password for a fresh session token.
#[utoipa::path(
    post,
    path = "/admin/login",
    request_body = AdminLogin,
    responses(
        (status = 200, description = "Logged in", body = LoginResponse),
        (status = 401, description = "Wrong password")
    )
)]
pub async fn admin_login(
    State(state): State<AppState>,
    Json(payload): Json<AdminLogin>,
) -> ApiResult<Json<LoginResponse>> {
    let token = auth::login(&state.repo, &state.config, &payload.password).await?;
    Ok(Json(LoginResponse {
        success: true,
        token,
    }))
}

/// verify_admin
///
/// [Public Route] Checks a session token. Presenting an expired token here
/// deactivates it permanently (lazy expiry).
#[utoipa::path(
    get,
    path = "/admin/verify",
    params(TokenParam),
    responses(
        (status = 200, description = "Valid"),
        (status = 401, description = "Invalid or expired")
    )
)]
pub async fn verify_admin(
    State(state): State<AppState>,
    Query(params): Query<TokenParam>,
) -> ApiResult<Json<Value>> {
    let valid = auth::verify_session(
        &state.repo,
        state.config.session_timeout_minutes,
        &params.token,
    )
    .await?;
    if !valid {
        return Err(ApiError::Unauthorized("Session abgelaufen"));
    }
    Ok(Json(json!({ "valid": true })))
}

/// admin_logout
///
/// [Public Route] Deactivates the session. Idempotent; unknown tokens still
/// report success.
#[utoipa::path(
    post,
    path = "/admin/logout",
    params(TokenParam),
    responses((status = 200, description = "Logged out"))
)]
pub async fn admin_logout(
    State(state): State<AppState>,
    Query(params): Query<TokenParam>,
) -> ApiResult<Json<Value>> {
    auth::logout(&state.repo, &params.token).await?;
    Ok(Json(json!({ "success": true })))
}

/// change_password
///
/// [Public Route] Rotates the admin password. Requires a live session and the
/// correct current password; existing sessions stay valid.
#[utoipa::path(
    post,
    path = "/admin/change-password",
    params(ChangePasswordParams),
    responses(
        (status = 200, description = "Changed"),
        (status = 401, description = "Bad session or old password")
    )
)]
pub async fn change_password(
    State(state): State<AppState>,
    Query(params): Query<ChangePasswordParams>,
) -> ApiResult<Json<Value>> {
    auth::change_password(
        &state.repo,
        &state.config,
        &params.token,
        &params.old_password,
        &params.new_password,
    )
    .await?;
    Ok(Json(json!({ "success": true })))
}

/// get_dashboard_stats
///
/// [Admin Route] Aggregate counters for the dashboard. Totals include trashed
/// content.
#[utoipa::path(
    get,
    path = "/admin/stats",
    responses((status = 200, description = "Stats", body = DashboardStats))
)]
pub async fn get_dashboard_stats(
    State(state): State<AppState>,
) -> ApiResult<Json<DashboardStats>> {
    Ok(Json(state.repo.stats().await?))
}

/// increment_donations
///
/// [Admin Route] Bumps the manually tracked donations counter.
#[utoipa::path(
    post,
    path = "/admin/donations/increment",
    responses((status = 200, description = "Incremented"))
)]
pub async fn increment_donations(State(state): State<AppState>) -> ApiResult<Json<Value>> {
    state.repo.increment_donations().await?;
    Ok(Json(json!({ "success": true })))
}

/// cleanup_trash
///
/// [Admin Route] Permanently removes trashed pages and posts older than the
/// configured retention window. There is no scheduler; this is the only purge
/// path.
#[utoipa::path(
    post,
    path = "/admin/trash/cleanup",
    responses((status = 200, description = "Purged"))
)]
pub async fn cleanup_trash(State(state): State<AppState>) -> ApiResult<Json<Value>> {
    let cutoff = Utc::now() - Duration::days(state.config.trash_retention_days);
    let counts = state.repo.purge_trash(cutoff).await?;
    tracing::info!(
        pages = counts.deleted_pages,
        posts = counts.deleted_posts,
        "trash purged"
    );
    Ok(Json(json!({
        "success": true,
        "deleted_pages": counts.deleted_pages,
        "deleted_posts": counts.deleted_posts,
    })))
}

/// empty_trash
///
/// [Admin Route] Permanently removes every trashed row in the selected scope,
/// regardless of age.
#[utoipa::path(
    post,
    path = "/admin/trash/empty",
    params(EmptyTrashParams),
    responses((status = 200, description = "Emptied"))
)]
pub async fn empty_trash(
    State(state): State<AppState>,
    Query(params): Query<EmptyTrashParams>,
) -> ApiResult<Json<Value>> {
    let pages = matches!(params.scope.as_str(), "all" | "pages");
    let posts = matches!(params.scope.as_str(), "all" | "posts");
    let counts = state.repo.empty_trash(pages, posts).await?;
    Ok(Json(json!({
        "success": true,
        "deleted_pages": counts.deleted_pages,
        "deleted_posts": counts.deleted_posts,
    })))
}
