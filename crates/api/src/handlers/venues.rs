//! Handlers for the `/venues` (public) and `/admin/venues` resources.
//!
//! The public list supports the directory filters (`?category=` and
//! `?wedding_type=`). The venue detail response hydrates the gallery,
//! linked films, and the curated similar-venues strip; public reads
//! only surface published films and venues in those strips.

use axum::extract::{Path, Query, State};
use axum::http::StatusCode;
use axum::response::IntoResponse;
use axum::Json;
use firstlook_core::error::CoreError;
use firstlook_core::revalidate::venue_paths;
use firstlook_core::slug::validate_slug;
use firstlook_core::types::EntityId;
use firstlook_db::models::film::GalleryImageInput;
use firstlook_db::models::venue::{CreateVenue, UpdateVenue};
use firstlook_db::repositories::VenueRepo;
use firstlook_media::import::import_venue_photos;

use crate::error::{AppError, AppResult};
use crate::middleware::auth::RequireAdmin;
use crate::query::{LimitParams, VenueFilterParams};
use crate::response::DataResponse;
use crate::state::AppState;

/// Photos copied per venue when `?limit=` is absent on an import.
const DEFAULT_IMPORT_COUNT: usize = 6;

// ---------------------------------------------------------------------------
// Public handlers
// ---------------------------------------------------------------------------

/// GET /api/v1/venues?category=&wedding_type=
///
/// List published venues, optionally filtered by directory tags.
pub async fn list(
    State(state): State<AppState>,
    Query(params): Query<VenueFilterParams>,
) -> AppResult<impl IntoResponse> {
    let venues = VenueRepo::list_published(
        &state.pool,
        params.category.as_deref(),
        params.wedding_type.as_deref(),
    )
    .await?;
    Ok(Json(DataResponse { data: venues }))
}

/// GET /api/v1/venues/{slug}
///
/// Get a published venue by slug, with gallery, films, and similar venues.
pub async fn get_by_slug(
    State(state): State<AppState>,
    Path(slug): Path<String>,
) -> AppResult<impl IntoResponse> {
    let venue = VenueRepo::find_published_by_slug(&state.pool, &slug)
        .await?
        .ok_or_else(|| AppError::Core(CoreError::not_found("Venue", &slug)))?;
    Ok(Json(DataResponse { data: venue }))
}

// ---------------------------------------------------------------------------
// Admin handlers
// ---------------------------------------------------------------------------

/// GET /api/v1/admin/venues
///
/// List every venue, published or not.
pub async fn list_all(
    RequireAdmin(_admin): RequireAdmin,
    State(state): State<AppState>,
) -> AppResult<impl IntoResponse> {
    let venues = VenueRepo::list_all(&state.pool).await?;
    Ok(Json(DataResponse { data: venues }))
}

/// POST /api/v1/admin/venues
///
/// Create a venue with its gallery and join lists. Returns the hydrated venue.
pub async fn create(
    RequireAdmin(admin): RequireAdmin,
    State(state): State<AppState>,
    Json(input): Json<CreateVenue>,
) -> AppResult<impl IntoResponse> {
    validate_slug(&input.slug)?;

    let venue = VenueRepo::create(&state.pool, &input).await?;

    tracing::info!(
        venue_id = %venue.venue.id,
        slug = %venue.venue.slug,
        admin = %admin.email,
        "Venue created",
    );

    state
        .revalidator
        .revalidate(&venue_paths(&venue.venue.slug))
        .await;

    Ok((StatusCode::CREATED, Json(DataResponse { data: venue })))
}

/// GET /api/v1/admin/venues/{id}
///
/// Get a venue by id with all relations, regardless of published state.
pub async fn get_by_id(
    RequireAdmin(_admin): RequireAdmin,
    State(state): State<AppState>,
    Path(id): Path<EntityId>,
) -> AppResult<impl IntoResponse> {
    let venue = VenueRepo::find_by_id_with_relations(&state.pool, id)
        .await?
        .ok_or_else(|| AppError::Core(CoreError::not_found("Venue", id)))?;
    Ok(Json(DataResponse { data: venue }))
}

/// PUT /api/v1/admin/venues/{id}
///
/// Partial update. A supplied `gallery`, `film_ids` or `similar_venue_ids`
/// list replaces the stored one wholesale.
pub async fn update(
    RequireAdmin(admin): RequireAdmin,
    State(state): State<AppState>,
    Path(id): Path<EntityId>,
    Json(input): Json<UpdateVenue>,
) -> AppResult<impl IntoResponse> {
    if let Some(ref slug) = input.slug {
        validate_slug(slug)?;
    }

    VenueRepo::update(&state.pool, id, &input)
        .await?
        .ok_or_else(|| AppError::Core(CoreError::not_found("Venue", id)))?;
    let venue = VenueRepo::find_by_id_with_relations(&state.pool, id)
        .await?
        .expect("just updated");

    tracing::info!(venue_id = %id, admin = %admin.email, "Venue updated");

    state
        .revalidator
        .revalidate(&venue_paths(&venue.venue.slug))
        .await;

    Ok(Json(DataResponse { data: venue }))
}

/// DELETE /api/v1/admin/venues/{id}
///
/// Delete a venue, its gallery, and its join rows. Returns 204 No Content.
pub async fn delete(
    RequireAdmin(admin): RequireAdmin,
    State(state): State<AppState>,
    Path(id): Path<EntityId>,
) -> AppResult<StatusCode> {
    let venue = VenueRepo::find_by_id(&state.pool, id)
        .await?
        .ok_or_else(|| AppError::Core(CoreError::not_found("Venue", id)))?;

    VenueRepo::delete(&state.pool, id).await?;

    tracing::info!(venue_id = %id, slug = %venue.slug, admin = %admin.email, "Venue deleted");

    state.revalidator.revalidate(&venue_paths(&venue.slug)).await;

    Ok(StatusCode::NO_CONTENT)
}

/// POST /api/v1/admin/venues/{id}/publish
///
/// Flip the published flag. Returns the updated venue row.
pub async fn toggle_published(
    RequireAdmin(admin): RequireAdmin,
    State(state): State<AppState>,
    Path(id): Path<EntityId>,
) -> AppResult<impl IntoResponse> {
    let venue = VenueRepo::toggle_published(&state.pool, id)
        .await?
        .ok_or_else(|| AppError::Core(CoreError::not_found("Venue", id)))?;

    tracing::info!(
        venue_id = %id,
        published = venue.published,
        admin = %admin.email,
        "Venue publish state toggled",
    );

    state.revalidator.revalidate(&venue_paths(&venue.slug)).await;

    Ok(Json(DataResponse { data: venue }))
}

/// POST /api/v1/admin/venues/{id}/feature
///
/// Flip the featured flag. Returns the updated venue row.
pub async fn toggle_featured(
    RequireAdmin(admin): RequireAdmin,
    State(state): State<AppState>,
    Path(id): Path<EntityId>,
) -> AppResult<impl IntoResponse> {
    let venue = VenueRepo::toggle_featured(&state.pool, id)
        .await?
        .ok_or_else(|| AppError::Core(CoreError::not_found("Venue", id)))?;

    tracing::info!(
        venue_id = %id,
        featured = venue.featured,
        admin = %admin.email,
        "Venue featured state toggled",
    );

    state.revalidator.revalidate(&venue_paths(&venue.slug)).await;

    Ok(Json(DataResponse { data: venue }))
}

/// POST /api/v1/admin/venues/{id}/import-photos?limit=6
///
/// Look the venue up on Google Places, copy its photos into our own
/// storage, and append them to the venue gallery. Answers 503 when the
/// Places client or object store is not configured.
pub async fn import_photos(
    RequireAdmin(admin): RequireAdmin,
    State(state): State<AppState>,
    Path(id): Path<EntityId>,
    Query(params): Query<LimitParams>,
) -> AppResult<impl IntoResponse> {
    let places = state
        .places
        .as_ref()
        .ok_or(AppError::NotConfigured("Photo import"))?;
    let store = state
        .store
        .as_ref()
        .ok_or(AppError::NotConfigured("Media storage"))?;

    let venue = VenueRepo::find_by_id(&state.pool, id)
        .await?
        .ok_or_else(|| AppError::Core(CoreError::not_found("Venue", id)))?;

    let limit = params.limit.unwrap_or(DEFAULT_IMPORT_COUNT);
    let imported = import_venue_photos(
        places,
        store.as_ref(),
        &venue.name,
        venue.city.as_deref(),
        limit,
    )
    .await?;

    let items: Vec<GalleryImageInput> = imported
        .into_iter()
        .map(|photo| GalleryImageInput {
            url: photo.url,
            alt_text: Some(venue.name.clone()),
        })
        .collect();
    let appended = VenueRepo::append_gallery_images(&state.pool, id, &items).await?;

    tracing::info!(
        venue_id = %id,
        count = appended.len(),
        admin = %admin.email,
        "Venue photos imported",
    );

    state.revalidator.revalidate(&venue_paths(&venue.slug)).await;

    Ok(Json(DataResponse { data: appended }))
}
