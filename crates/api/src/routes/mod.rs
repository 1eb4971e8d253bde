pub mod auth;
pub mod blog_posts;
pub mod films;
pub mod health;
pub mod media;
pub mod venues;

use axum::Router;

use crate::state::AppState;

/// Build the `/api/v1` route tree.
///
/// Route hierarchy:
///
/// ```text
/// /auth/login                        login (public)
///
/// /films                             list published films
/// /films/resolve-slug/{slug}         resolve a retired slug
/// /films/{slug}                      published film detail
/// /films/{slug}/recommended          random strip (?limit=)
///
/// /venues                            published venues (?category=&wedding_type=)
/// /venues/{slug}                     published venue detail
///
/// /blog                              published posts
/// /blog/{slug}                       published post detail
/// /blog/{slug}/related               same-category strip (?limit=)
///
/// /admin/films                       list, create (admin only)
/// /admin/films/{id}                  get, update, delete
/// /admin/films/{id}/publish          toggle published (POST)
/// /admin/films/{id}/feature          toggle featured (POST)
///
/// /admin/venues                      list, create (admin only)
/// /admin/venues/{id}                 get, update, delete
/// /admin/venues/{id}/publish         toggle published (POST)
/// /admin/venues/{id}/feature         toggle featured (POST)
/// /admin/venues/{id}/import-photos   copy Places photos into gallery (POST)
///
/// /admin/blog                        list, create (admin only)
/// /admin/blog/generate               draft a post from a topic (POST)
/// /admin/blog/{id}                   get, update, delete
/// /admin/blog/{id}/publish           toggle published (POST)
/// /admin/blog/{id}/feature           toggle featured (POST)
///
/// /admin/media                       upload (POST, multipart)
/// /admin/media/{*key}                delete stored object (DELETE)
/// ```
pub fn api_routes() -> Router<AppState> {
    Router::new()
        // Authentication (login only; no refresh or logout).
        .nest("/auth", auth::router())
        // Public content reads.
        .nest("/films", films::public_router())
        .nest("/venues", venues::public_router())
        .nest("/blog", blog_posts::public_router())
        // Admin content management.
        .nest("/admin/films", films::admin_router())
        .nest("/admin/venues", venues::admin_router())
        .nest("/admin/blog", blog_posts::admin_router())
        // Admin media uploads.
        .nest("/admin/media", media::admin_router())
}
