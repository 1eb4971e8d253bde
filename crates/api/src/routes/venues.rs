//! Route definitions for venues: the public directory and the admin CRUD.

use axum::routing::{get, post};
use axum::Router;

use crate::handlers::venues;
use crate::state::AppState;

/// Routes mounted at `/venues` (public, published content only).
///
/// ```text
/// GET /          -> list (?category=&wedding_type=)
/// GET /{slug}    -> get_by_slug
/// ```
pub fn public_router() -> Router<AppState> {
    Router::new()
        .route("/", get(venues::list))
        .route("/{slug}", get(venues::get_by_slug))
}

/// Routes mounted at `/admin/venues` (admin only).
///
/// ```text
/// GET    /                     -> list_all
/// POST   /                     -> create
/// GET    /{id}                 -> get_by_id
/// PUT    /{id}                 -> update
/// DELETE /{id}                 -> delete
/// POST   /{id}/publish         -> toggle_published
/// POST   /{id}/feature         -> toggle_featured
/// POST   /{id}/import-photos   -> import_photos (?limit=)
/// ```
pub fn admin_router() -> Router<AppState> {
    Router::new()
        .route("/", get(venues::list_all).post(venues::create))
        .route(
            "/{id}",
            get(venues::get_by_id)
                .put(venues::update)
                .delete(venues::delete),
        )
        .route("/{id}/publish", post(venues::toggle_published))
        .route("/{id}/feature", post(venues::toggle_featured))
        .route("/{id}/import-photos", post(venues::import_photos))
}
