//! Handlers for the `/films` (public) and `/admin/films` resources.
//!
//! Public handlers only ever see published films. Admin handlers see
//! everything and fire frontend revalidation after each write.

use axum::extract::{Path, Query, State};
use axum::http::StatusCode;
use axum::response::IntoResponse;
use axum::Json;
use firstlook_core::error::CoreError;
use firstlook_core::related::RandomSampler;
use firstlook_core::revalidate::film_paths;
use firstlook_core::slug::validate_slug;
use firstlook_core::types::EntityId;
use firstlook_db::models::film::{CreateFilm, UpdateFilm};
use firstlook_db::repositories::FilmRepo;
use serde::Serialize;

use crate::error::{AppError, AppResult};
use crate::middleware::auth::RequireAdmin;
use crate::query::LimitParams;
use crate::response::DataResponse;
use crate::state::AppState;

/// Films shown in the recommendation strip when `?limit=` is absent.
const DEFAULT_RECOMMENDED_COUNT: usize = 3;

/// Response body for `GET /films/resolve-slug/{slug}`.
#[derive(Debug, Serialize)]
pub struct ResolvedSlug {
    pub slug: String,
}

// ---------------------------------------------------------------------------
// Public handlers
// ---------------------------------------------------------------------------

/// GET /api/v1/films
///
/// List published films in display order (rating, then sort order).
pub async fn list(State(state): State<AppState>) -> AppResult<impl IntoResponse> {
    let films = FilmRepo::list_published(&state.pool).await?;
    Ok(Json(DataResponse { data: films }))
}

/// GET /api/v1/films/{slug}
///
/// Get a published film by slug, with vendors and gallery.
pub async fn get_by_slug(
    State(state): State<AppState>,
    Path(slug): Path<String>,
) -> AppResult<impl IntoResponse> {
    let film = FilmRepo::find_published_by_slug(&state.pool, &slug)
        .await?
        .ok_or_else(|| AppError::Core(CoreError::not_found("Film", &slug)))?;
    Ok(Json(DataResponse { data: film }))
}

/// GET /api/v1/films/{slug}/recommended?limit=3
///
/// Random sample of other published films for the strip under a film
/// page. 404 when the subject film itself is not published.
pub async fn recommended(
    State(state): State<AppState>,
    Path(slug): Path<String>,
    Query(params): Query<LimitParams>,
) -> AppResult<impl IntoResponse> {
    FilmRepo::find_published_by_slug(&state.pool, &slug)
        .await?
        .ok_or_else(|| AppError::Core(CoreError::not_found("Film", &slug)))?;

    let limit = params.limit.unwrap_or(DEFAULT_RECOMMENDED_COUNT);
    let pool = FilmRepo::list_published_excluding(&state.pool, &slug).await?;
    let picked = RandomSampler.sample(pool, limit, &mut rand::rng());
    Ok(Json(DataResponse { data: picked }))
}

/// GET /api/v1/films/resolve-slug/{slug}
///
/// Resolve a retired slug to the film's current slug, for 301 redirects
/// on the frontend. 404 when no published film claims the old slug.
pub async fn resolve_slug(
    State(state): State<AppState>,
    Path(slug): Path<String>,
) -> AppResult<impl IntoResponse> {
    let current = FilmRepo::resolve_legacy_slug(&state.pool, &slug)
        .await?
        .ok_or_else(|| AppError::Core(CoreError::not_found("Film", &slug)))?;
    Ok(Json(DataResponse {
        data: ResolvedSlug { slug: current },
    }))
}

// ---------------------------------------------------------------------------
// Admin handlers
// ---------------------------------------------------------------------------

/// GET /api/v1/admin/films
///
/// List every film, published or not.
pub async fn list_all(
    RequireAdmin(_admin): RequireAdmin,
    State(state): State<AppState>,
) -> AppResult<impl IntoResponse> {
    let films = FilmRepo::list_all(&state.pool).await?;
    Ok(Json(DataResponse { data: films }))
}

/// POST /api/v1/admin/films
///
/// Create a film with its vendors and gallery. Returns the hydrated film.
pub async fn create(
    RequireAdmin(admin): RequireAdmin,
    State(state): State<AppState>,
    Json(input): Json<CreateFilm>,
) -> AppResult<impl IntoResponse> {
    validate_slug(&input.slug)?;

    let film = FilmRepo::create(&state.pool, &input).await?;

    tracing::info!(
        film_id = %film.film.id,
        slug = %film.film.slug,
        admin = %admin.email,
        "Film created",
    );

    state.revalidator.revalidate(&film_paths(&film.film.slug)).await;

    Ok((StatusCode::CREATED, Json(DataResponse { data: film })))
}

/// GET /api/v1/admin/films/{id}
///
/// Get a film by id with vendors and gallery, regardless of published state.
pub async fn get_by_id(
    RequireAdmin(_admin): RequireAdmin,
    State(state): State<AppState>,
    Path(id): Path<EntityId>,
) -> AppResult<impl IntoResponse> {
    let film = FilmRepo::find_by_id_with_relations(&state.pool, id)
        .await?
        .ok_or_else(|| AppError::Core(CoreError::not_found("Film", id)))?;
    Ok(Json(DataResponse { data: film }))
}

/// PUT /api/v1/admin/films/{id}
///
/// Partial update. A supplied `vendors` or `gallery` list replaces the
/// stored one; a changed slug retires the old one into `old_slugs`.
pub async fn update(
    RequireAdmin(admin): RequireAdmin,
    State(state): State<AppState>,
    Path(id): Path<EntityId>,
    Json(input): Json<UpdateFilm>,
) -> AppResult<impl IntoResponse> {
    if let Some(ref slug) = input.slug {
        validate_slug(slug)?;
    }

    FilmRepo::update(&state.pool, id, &input)
        .await?
        .ok_or_else(|| AppError::Core(CoreError::not_found("Film", id)))?;
    let film = FilmRepo::find_by_id_with_relations(&state.pool, id)
        .await?
        .expect("just updated");

    tracing::info!(film_id = %id, admin = %admin.email, "Film updated");

    state.revalidator.revalidate(&film_paths(&film.film.slug)).await;

    Ok(Json(DataResponse { data: film }))
}

/// DELETE /api/v1/admin/films/{id}
///
/// Delete a film and its child rows. Returns 204 No Content.
pub async fn delete(
    RequireAdmin(admin): RequireAdmin,
    State(state): State<AppState>,
    Path(id): Path<EntityId>,
) -> AppResult<StatusCode> {
    let film = FilmRepo::find_by_id(&state.pool, id)
        .await?
        .ok_or_else(|| AppError::Core(CoreError::not_found("Film", id)))?;

    FilmRepo::delete(&state.pool, id).await?;

    tracing::info!(film_id = %id, slug = %film.slug, admin = %admin.email, "Film deleted");

    state.revalidator.revalidate(&film_paths(&film.slug)).await;

    Ok(StatusCode::NO_CONTENT)
}

/// POST /api/v1/admin/films/{id}/publish
///
/// Flip the published flag. Returns the updated film row.
pub async fn toggle_published(
    RequireAdmin(admin): RequireAdmin,
    State(state): State<AppState>,
    Path(id): Path<EntityId>,
) -> AppResult<impl IntoResponse> {
    let film = FilmRepo::toggle_published(&state.pool, id)
        .await?
        .ok_or_else(|| AppError::Core(CoreError::not_found("Film", id)))?;

    tracing::info!(
        film_id = %id,
        published = film.published,
        admin = %admin.email,
        "Film publish state toggled",
    );

    state.revalidator.revalidate(&film_paths(&film.slug)).await;

    Ok(Json(DataResponse { data: film }))
}

/// POST /api/v1/admin/films/{id}/feature
///
/// Flip the featured flag. Returns the updated film row.
pub async fn toggle_featured(
    RequireAdmin(admin): RequireAdmin,
    State(state): State<AppState>,
    Path(id): Path<EntityId>,
) -> AppResult<impl IntoResponse> {
    let film = FilmRepo::toggle_featured(&state.pool, id)
        .await?
        .ok_or_else(|| AppError::Core(CoreError::not_found("Film", id)))?;

    tracing::info!(
        film_id = %id,
        featured = film.featured,
        admin = %admin.email,
        "Film featured state toggled",
    );

    state.revalidator.revalidate(&film_paths(&film.slug)).await;

    Ok(Json(DataResponse { data: film }))
}
