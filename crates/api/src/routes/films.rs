//! Route definitions for films: the public catalogue and the admin CRUD.

use axum::routing::{get, post};
use axum::Router;

use crate::handlers::films;
use crate::state::AppState;

/// Routes mounted at `/films` (public, published content only).
///
/// ```text
/// GET /                      -> list
/// GET /resolve-slug/{slug}   -> resolve_slug
/// GET /{slug}                -> get_by_slug
/// GET /{slug}/recommended    -> recommended
/// ```
pub fn public_router() -> Router<AppState> {
    Router::new()
        .route("/", get(films::list))
        .route("/resolve-slug/{slug}", get(films::resolve_slug))
        .route("/{slug}", get(films::get_by_slug))
        .route("/{slug}/recommended", get(films::recommended))
}

/// Routes mounted at `/admin/films` (admin only).
///
/// ```text
/// GET    /               -> list_all
/// POST   /               -> create
/// GET    /{id}           -> get_by_id
/// PUT    /{id}           -> update
/// DELETE /{id}           -> delete
/// POST   /{id}/publish   -> toggle_published
/// POST   /{id}/feature   -> toggle_featured
/// ```
pub fn admin_router() -> Router<AppState> {
    Router::new()
        .route("/", get(films::list_all).post(films::create))
        .route(
            "/{id}",
            get(films::get_by_id)
                .put(films::update)
                .delete(films::delete),
        )
        .route("/{id}/publish", post(films::toggle_published))
        .route("/{id}/feature", post(films::toggle_featured))
}
