//! Handlers for the `/blog` (public) and `/admin/blog` resources.

use axum::extract::{Path, Query, State};
use axum::http::StatusCode;
use axum::response::IntoResponse;
use axum::Json;
use firstlook_core::error::CoreError;
use firstlook_core::related::CategoryMatchSampler;
use firstlook_core::revalidate::blog_paths;
use firstlook_core::slug::{slugify, validate_slug};
use firstlook_core::types::EntityId;
use firstlook_db::models::blog_post::{CreateBlogPost, UpdateBlogPost};
use firstlook_db::repositories::BlogPostRepo;
use firstlook_media::generator::DraftFields;
use serde::{Deserialize, Serialize};

use crate::error::{AppError, AppResult};
use crate::middleware::auth::RequireAdmin;
use crate::query::LimitParams;
use crate::response::DataResponse;
use crate::state::AppState;

/// Posts shown in the related strip when `?limit=` is absent.
const DEFAULT_RELATED_COUNT: usize = 3;

/// Request body for `POST /admin/blog/generate`.
#[derive(Debug, Deserialize)]
pub struct GenerateRequest {
    pub topic: String,
}

/// Response body for `POST /admin/blog/generate`.
///
/// A draft is returned to the dashboard for editing; nothing is
/// persisted until the admin saves it through the normal create flow.
#[derive(Debug, Serialize)]
pub struct GeneratedDraft {
    #[serde(flatten)]
    pub draft: DraftFields,
    pub suggested_slug: String,
}

// ---------------------------------------------------------------------------
// Public handlers
// ---------------------------------------------------------------------------

/// GET /api/v1/blog
///
/// List published posts, featured first, newest first within each band.
pub async fn list(State(state): State<AppState>) -> AppResult<impl IntoResponse> {
    let posts = BlogPostRepo::list_published(&state.pool).await?;
    Ok(Json(DataResponse { data: posts }))
}

/// GET /api/v1/blog/{slug}
///
/// Get a published post by slug.
pub async fn get_by_slug(
    State(state): State<AppState>,
    Path(slug): Path<String>,
) -> AppResult<impl IntoResponse> {
    let post = BlogPostRepo::find_published_by_slug(&state.pool, &slug)
        .await?
        .ok_or_else(|| AppError::Core(CoreError::not_found("BlogPost", &slug)))?;
    Ok(Json(DataResponse { data: post }))
}

/// GET /api/v1/blog/{slug}/related?limit=3
///
/// Other published posts in the same category, most recent first.
/// 404 when the subject post itself is not published.
pub async fn related(
    State(state): State<AppState>,
    Path(slug): Path<String>,
    Query(params): Query<LimitParams>,
) -> AppResult<impl IntoResponse> {
    let post = BlogPostRepo::find_published_by_slug(&state.pool, &slug)
        .await?
        .ok_or_else(|| AppError::Core(CoreError::not_found("BlogPost", &slug)))?;

    let limit = params.limit.unwrap_or(DEFAULT_RELATED_COUNT);
    let pool = BlogPostRepo::list_published_excluding(&state.pool, &slug).await?;
    let picked = CategoryMatchSampler.sample(pool, Some(post.category.as_str()), limit, |card| {
        Some(card.category.as_str())
    });
    Ok(Json(DataResponse { data: picked }))
}

// ---------------------------------------------------------------------------
// Admin handlers
// ---------------------------------------------------------------------------

/// GET /api/v1/admin/blog
///
/// List every post, published or not.
pub async fn list_all(
    RequireAdmin(_admin): RequireAdmin,
    State(state): State<AppState>,
) -> AppResult<impl IntoResponse> {
    let posts = BlogPostRepo::list_all(&state.pool).await?;
    Ok(Json(DataResponse { data: posts }))
}

/// POST /api/v1/admin/blog
///
/// Create a blog post.
pub async fn create(
    RequireAdmin(admin): RequireAdmin,
    State(state): State<AppState>,
    Json(input): Json<CreateBlogPost>,
) -> AppResult<impl IntoResponse> {
    validate_slug(&input.slug)?;

    let post = BlogPostRepo::create(&state.pool, &input).await?;

    tracing::info!(
        post_id = %post.id,
        slug = %post.slug,
        admin = %admin.email,
        "Blog post created",
    );

    state.revalidator.revalidate(&blog_paths(&post.slug)).await;

    Ok((StatusCode::CREATED, Json(DataResponse { data: post })))
}

/// GET /api/v1/admin/blog/{id}
///
/// Get a post by id, regardless of published state.
pub async fn get_by_id(
    RequireAdmin(_admin): RequireAdmin,
    State(state): State<AppState>,
    Path(id): Path<EntityId>,
) -> AppResult<impl IntoResponse> {
    let post = BlogPostRepo::find_by_id(&state.pool, id)
        .await?
        .ok_or_else(|| AppError::Core(CoreError::not_found("BlogPost", id)))?;
    Ok(Json(DataResponse { data: post }))
}

/// PUT /api/v1/admin/blog/{id}
///
/// Partial update.
pub async fn update(
    RequireAdmin(admin): RequireAdmin,
    State(state): State<AppState>,
    Path(id): Path<EntityId>,
    Json(input): Json<UpdateBlogPost>,
) -> AppResult<impl IntoResponse> {
    if let Some(ref slug) = input.slug {
        validate_slug(slug)?;
    }

    let post = BlogPostRepo::update(&state.pool, id, &input)
        .await?
        .ok_or_else(|| AppError::Core(CoreError::not_found("BlogPost", id)))?;

    tracing::info!(post_id = %id, admin = %admin.email, "Blog post updated");

    state.revalidator.revalidate(&blog_paths(&post.slug)).await;

    Ok(Json(DataResponse { data: post }))
}

/// DELETE /api/v1/admin/blog/{id}
///
/// Delete a post. Returns 204 No Content.
pub async fn delete(
    RequireAdmin(admin): RequireAdmin,
    State(state): State<AppState>,
    Path(id): Path<EntityId>,
) -> AppResult<StatusCode> {
    let post = BlogPostRepo::find_by_id(&state.pool, id)
        .await?
        .ok_or_else(|| AppError::Core(CoreError::not_found("BlogPost", id)))?;

    BlogPostRepo::delete(&state.pool, id).await?;

    tracing::info!(post_id = %id, slug = %post.slug, admin = %admin.email, "Blog post deleted");

    state.revalidator.revalidate(&blog_paths(&post.slug)).await;

    Ok(StatusCode::NO_CONTENT)
}

/// POST /api/v1/admin/blog/{id}/publish
///
/// Flip the published flag. Returns the updated post.
pub async fn toggle_published(
    RequireAdmin(admin): RequireAdmin,
    State(state): State<AppState>,
    Path(id): Path<EntityId>,
) -> AppResult<impl IntoResponse> {
    let post = BlogPostRepo::toggle_published(&state.pool, id)
        .await?
        .ok_or_else(|| AppError::Core(CoreError::not_found("BlogPost", id)))?;

    tracing::info!(
        post_id = %id,
        published = post.published,
        admin = %admin.email,
        "Blog post publish state toggled",
    );

    state.revalidator.revalidate(&blog_paths(&post.slug)).await;

    Ok(Json(DataResponse { data: post }))
}

/// POST /api/v1/admin/blog/{id}/feature
///
/// Flip the featured flag. Returns the updated post.
pub async fn toggle_featured(
    RequireAdmin(admin): RequireAdmin,
    State(state): State<AppState>,
    Path(id): Path<EntityId>,
) -> AppResult<impl IntoResponse> {
    let post = BlogPostRepo::toggle_featured(&state.pool, id)
        .await?
        .ok_or_else(|| AppError::Core(CoreError::not_found("BlogPost", id)))?;

    tracing::info!(
        post_id = %id,
        featured = post.featured,
        admin = %admin.email,
        "Blog post featured state toggled",
    );

    state.revalidator.revalidate(&blog_paths(&post.slug)).await;

    Ok(Json(DataResponse { data: post }))
}

/// POST /api/v1/admin/blog/generate
///
/// Ask the configured generator for a draft on a topic. The draft is
/// returned with a suggested slug and is not persisted. Answers 503
/// when no generator is configured.
pub async fn generate(
    RequireAdmin(admin): RequireAdmin,
    State(state): State<AppState>,
    Json(input): Json<GenerateRequest>,
) -> AppResult<impl IntoResponse> {
    let generator = state
        .generator
        .as_ref()
        .ok_or(AppError::NotConfigured("Draft generation"))?;

    let draft = generator.draft_post(&input.topic).await?;
    let suggested_slug = slugify(&draft.title);

    tracing::info!(topic = %input.topic, admin = %admin.email, "Blog draft generated");

    Ok(Json(DataResponse {
        data: GeneratedDraft {
            draft,
            suggested_slug,
        },
    }))
}
