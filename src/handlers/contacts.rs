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
    models::{ContactFormInput, ContactSubmission},
};

/// ContactFilter
#[derive(Deserialize, utoipa::IntoParams)]
pub struct ContactFilter {
    /// Optional status filter ("neu", "gelesen", ...).
    pub status: Option<String>,
}

/// StatusParam
#[derive(Deserialize, utoipa::IntoParams)]
pub struct StatusParam {
    pub status: String,
}

/// submit_contact_form
///
/// [Public Route] Stores a contact-form submission with a server-side
/// timestamp and status "neu".
#[utoipa::path(
    post,
    path = "/contact",
    request_body = ContactFormInput,
    responses(
        (status = 200, description = "Stored"),
        (status = 400, description = "Invalid email")
    )
)]
pub async fn submit_contact_form(
    State(state): State<AppState>,
    Json(payload): Json<ContactFormInput>,
) -> ApiResult<Json<Value>> {
    if !payload.email.contains('@') {
        return Err(ApiError::Validation(
            "Ungültige E-Mail-Adresse".to_string(),
        ));
    }
    let submission = ContactSubmission::new(payload);
    let id = submission.id;
    state.repo.insert_contact(submission).await?;
    Ok(Json(json!({ "success": true, "id": id })))
}

/// get_all_contacts
///
/// [Admin Route] Lists submissions newest first, optionally filtered by
/// status.
#[utoipa::path(
    get,
    path = "/admin/contacts",
    params(ContactFilter),
    responses((status = 200, description = "Submissions", body = [ContactSubmission]))
)]
pub async fn get_all_contacts(
    State(state): State<AppState>,
    Query(filter): Query<ContactFilter>,
) -> ApiResult<Json<Vec<ContactSubmission>>> {
    Ok(Json(state.repo.contacts(filter.status).await?))
}

/// update_contact_status
///
/// [Admin Route] Advances a submission's status ("neu" → "gelesen" etc.).
/// Reports success even for unknown ids.
#[utoipa::path(
    put,
    path = "/admin/contacts/{id}/status",
    params(("id" = Uuid, Path, description = "Submission ID"), StatusParam),
    responses((status = 200, description = "Updated"))
)]
pub async fn update_contact_status(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
    Query(params): Query<StatusParam>,
) -> ApiResult<Json<Value>> {
    state.repo.set_contact_status(id, &params.status).await?;
    Ok(Json(json!({ "success": true })))
}

/// export_contacts
///
/// [Admin Route] Exports every submission as CSV, returned inside a JSON
/// envelope. Fields are double-quoted; double quotes inside the message are
/// flattened to single quotes so the line structure survives.
#[utoipa::path(
    get,
    path = "/admin/contacts/export",
    responses((status = 200, description = "CSV export"))
)]
pub async fn export_contacts(State(state): State<AppState>) -> ApiResult<Json<Value>> {
    let contacts = state.repo.contacts(None).await?;

    let mut lines = vec!["Datum,Name,Email,Thema,Nachricht,Status".to_string()];
    for c in contacts {
        lines.push(format!(
            "\"{}\",\"{}\",\"{}\",\"{}\",\"{}\",\"{}\"",
            c.timestamp.to_rfc3339(),
            c.name.unwrap_or_default(),
            c.email,
            c.thema,
            c.nachricht.replace('"', "'"),
            c.status,
        ));
    }

    Ok(Json(json!({ "csv": lines.join("\n") })))
}
