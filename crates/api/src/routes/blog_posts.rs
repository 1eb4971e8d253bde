//! Route definitions for blog posts: the public journal and the admin CRUD.

use axum::routing::{get, post};
use axum::Router;

use crate::handlers::blog_posts;
use crate::state::AppState;

/// Routes mounted at `/blog` (public, published content only).
///
/// ```text
/// GET /                  -> list
/// GET /{slug}            -> get_by_slug
/// GET /{slug}/related    -> related (?limit=)
/// ```
pub fn public_router() -> Router<AppState> {
    Router::new()
        .route("/", get(blog_posts::list))
        .route("/{slug}", get(blog_posts::get_by_slug))
        .route("/{slug}/related", get(blog_posts::related))
}

/// Routes mounted at `/admin/blog` (admin only).
///
/// ```text
/// GET    /               -> list_all
/// POST   /               -> create
/// POST   /generate       -> generate
/// GET    /{id}           -> get_by_id
/// PUT    /{id}           -> update
/// DELETE /{id}           -> delete
/// POST   /{id}/publish   -> toggle_published
/// POST   /{id}/feature   -> toggle_featured
/// ```
pub fn admin_router() -> Router<AppState> {
    Router::new()
        .route("/", get(blog_posts::list_all).post(blog_posts::create))
        .route("/generate", post(blog_posts::generate))
        .route(
            "/{id}",
            get(blog_posts::get_by_id)
                .put(blog_posts::update)
                .delete(blog_posts::delete),
        )
        .route("/{id}/publish", post(blog_posts::toggle_published))
        .route("/{id}/feature", post(blog_posts::toggle_featured))
}
