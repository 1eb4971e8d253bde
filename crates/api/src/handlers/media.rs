//! Handlers for the `/admin/media` resource: direct uploads to object
//! storage and deletion by key.
//!
//! Uploads are multipart with a single `file` field. The stored object's
//! public URL is returned for the dashboard to paste into image fields;
//! nothing is written to the database here.

use axum::extract::{Multipart, Path, State};
use axum::http::StatusCode;
use axum::response::IntoResponse;
use axum::Json;
use firstlook_media::storage::storage_key;

use crate::error::{AppError, AppResult};
use crate::middleware::auth::RequireAdmin;
use crate::response::DataResponse;
use crate::state::AppState;

/// POST /api/v1/admin/media
///
/// Upload a file to object storage. Expects a multipart body with a
/// `file` field; returns the stored object's URL and key. Answers 503
/// when no object store is configured.
pub async fn upload(
    RequireAdmin(admin): RequireAdmin,
    State(state): State<AppState>,
    mut multipart: Multipart,
) -> AppResult<impl IntoResponse> {
    let store = state
        .store
        .as_ref()
        .ok_or(AppError::NotConfigured("Media storage"))?;

    while let Some(field) = multipart
        .next_field()
        .await
        .map_err(|e| AppError::BadRequest(format!("Invalid multipart body: {e}")))?
    {
        if field.name() != Some("file") {
            continue;
        }

        let original_name = field.file_name().unwrap_or("upload.bin").to_string();
        let content_type = field
            .content_type()
            .unwrap_or("application/octet-stream")
            .to_string();
        let data = field
            .bytes()
            .await
            .map_err(|e| AppError::BadRequest(format!("Failed to read upload: {e}")))?;

        let key = storage_key(&original_name);
        let stored = store.put(&key, &data, &content_type).await?;

        tracing::info!(
            key = %stored.key,
            bytes = data.len(),
            admin = %admin.email,
            "Media uploaded",
        );

        return Ok((StatusCode::CREATED, Json(DataResponse { data: stored })));
    }

    Err(AppError::BadRequest(
        "Multipart body must contain a `file` field".into(),
    ))
}

/// DELETE /api/v1/admin/media/{*key}
///
/// Delete an object from storage by its full key (e.g.
/// `uploads/<uuid>.jpg`). Returns 204 No Content. Answers 503 when no
/// object store is configured.
pub async fn delete(
    RequireAdmin(admin): RequireAdmin,
    State(state): State<AppState>,
    Path(key): Path<String>,
) -> AppResult<StatusCode> {
    let store = state
        .store
        .as_ref()
        .ok_or(AppError::NotConfigured("Media storage"))?;

    store.delete(&key).await?;

    tracing::info!(key = %key, admin = %admin.email, "Media deleted");

    Ok(StatusCode::NO_CONTENT)
}
