//! Route definitions for admin media uploads.

use axum::routing::{delete, post};
use axum::Router;

use crate::handlers::media;
use crate::state::AppState;

/// Routes mounted at `/admin/media` (admin only).
///
/// The delete route uses a wildcard so keys with slashes
/// (`uploads/<uuid>.jpg`) arrive intact.
///
/// ```text
/// POST   /          -> upload (multipart)
/// DELETE /{*key}    -> delete
/// ```
pub fn admin_router() -> Router<AppState> {
    Router::new()
        .route("/", post(media::upload))
        .route("/{*key}", delete(media::delete))
}
