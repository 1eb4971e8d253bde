//! Repository for the `blog_posts` table.

use sqlx::PgPool;
use uuid::Uuid;

use firstlook_core::types::EntityId;

use crate::error::RepoError;
use crate::models::blog_post::{BlogPost, BlogPostCard, CreateBlogPost, UpdateBlogPost};

/// Column list for the `blog_posts` table.
const COLUMNS: &str = "id, slug, title, excerpt, body_html, header_image_url, \
    published_on, category, published, featured, meta_title, meta_description, \
    created_at, updated_at";

/// Display columns for the related-posts strip.
const CARD_COLUMNS: &str =
    "id, slug, title, excerpt, header_image_url, published_on, category";

/// Provides CRUD and related-content queries for blog posts.
pub struct BlogPostRepo;

impl BlogPostRepo {
    /// Insert a new blog post. Fails with [`RepoError::SlugTaken`] if
    /// the slug is in use.
    pub async fn create(pool: &PgPool, input: &CreateBlogPost) -> Result<BlogPost, RepoError> {
        let mut tx = pool.begin().await?;

        if Self::slug_taken(&mut tx, &input.slug, None).await? {
            return Err(RepoError::SlugTaken(input.slug.clone()));
        }

        let insert_query = format!(
            "INSERT INTO blog_posts \
                (id, slug, title, excerpt, body_html, header_image_url, \
                 published_on, category, published, featured, meta_title, meta_description) \
             VALUES ($1, $2, $3, $4, $5, $6, $7, $8, \
                 COALESCE($9, false), COALESCE($10, false), $11, $12) \
             RETURNING {COLUMNS}"
        );
        let post = sqlx::query_as::<_, BlogPost>(&insert_query)
            .bind(Uuid::now_v7())
            .bind(&input.slug)
            .bind(&input.title)
            .bind(&input.excerpt)
            .bind(&input.body_html)
            .bind(&input.header_image_url)
            .bind(input.published_on)
            .bind(&input.category)
            .bind(input.published)
            .bind(input.featured)
            .bind(&input.meta_title)
            .bind(&input.meta_description)
            .fetch_one(&mut *tx)
            .await?;

        tx.commit().await?;
        Ok(post)
    }

    /// Find a post by id, admin visibility (no published filter).
    pub async fn find_by_id(pool: &PgPool, id: EntityId) -> Result<Option<BlogPost>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM blog_posts WHERE id = $1");
        sqlx::query_as::<_, BlogPost>(&query)
            .bind(id)
            .fetch_optional(pool)
            .await
    }

    /// Load a published post by slug. Public callers only: missing and
    /// unpublished both come back as `None`.
    pub async fn find_published_by_slug(
        pool: &PgPool,
        slug: &str,
    ) -> Result<Option<BlogPost>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM blog_posts WHERE slug = $1 AND published = true");
        sqlx::query_as::<_, BlogPost>(&query)
            .bind(slug)
            .fetch_optional(pool)
            .await
    }

    /// List published posts: featured first, then newest by display
    /// date, id as the deterministic tie-break.
    pub async fn list_published(pool: &PgPool) -> Result<Vec<BlogPost>, sqlx::Error> {
        let query = format!(
            "SELECT {COLUMNS} FROM blog_posts \
             WHERE published = true \
             ORDER BY featured DESC, published_on DESC, id"
        );
        sqlx::query_as::<_, BlogPost>(&query).fetch_all(pool).await
    }

    /// List every post, unpublished included. Admin callers only.
    pub async fn list_all(pool: &PgPool) -> Result<Vec<BlogPost>, sqlx::Error> {
        let query = format!(
            "SELECT {COLUMNS} FROM blog_posts \
             ORDER BY featured DESC, published_on DESC, id"
        );
        sqlx::query_as::<_, BlogPost>(&query).fetch_all(pool).await
    }

    /// Candidate pool for the related-posts strip: published posts
    /// other than the one being viewed, newest first. The category
    /// banding happens in the sampler, not here.
    pub async fn list_published_excluding(
        pool: &PgPool,
        slug: &str,
    ) -> Result<Vec<BlogPostCard>, sqlx::Error> {
        let query = format!(
            "SELECT {CARD_COLUMNS} FROM blog_posts \
             WHERE published = true AND slug <> $1 \
             ORDER BY published_on DESC, id"
        );
        sqlx::query_as::<_, BlogPostCard>(&query)
            .bind(slug)
            .fetch_all(pool)
            .await
    }

    /// Update a post. Only non-`None` fields are applied. Returns
    /// `None` if no row with the given `id` exists.
    pub async fn update(
        pool: &PgPool,
        id: EntityId,
        input: &UpdateBlogPost,
    ) -> Result<Option<BlogPost>, RepoError> {
        let mut tx = pool.begin().await?;

        let Some(current_slug) =
            sqlx::query_scalar::<_, String>("SELECT slug FROM blog_posts WHERE id = $1")
                .bind(id)
                .fetch_optional(&mut *tx)
                .await?
        else {
            return Ok(None);
        };

        if let Some(new_slug) = &input.slug {
            if *new_slug != current_slug && Self::slug_taken(&mut tx, new_slug, Some(id)).await? {
                return Err(RepoError::SlugTaken(new_slug.clone()));
            }
        }

        let update_query = format!(
            "UPDATE blog_posts SET \
                slug = COALESCE($2, slug), \
                title = COALESCE($3, title), \
                excerpt = COALESCE($4, excerpt), \
                body_html = COALESCE($5, body_html), \
                header_image_url = COALESCE($6, header_image_url), \
                published_on = COALESCE($7, published_on), \
                category = COALESCE($8, category), \
                published = COALESCE($9, published), \
                featured = COALESCE($10, featured), \
                meta_title = COALESCE($11, meta_title), \
                meta_description = COALESCE($12, meta_description), \
                updated_at = now() \
             WHERE id = $1 \
             RETURNING {COLUMNS}"
        );
        let post = sqlx::query_as::<_, BlogPost>(&update_query)
            .bind(id)
            .bind(&input.slug)
            .bind(&input.title)
            .bind(&input.excerpt)
            .bind(&input.body_html)
            .bind(&input.header_image_url)
            .bind(input.published_on)
            .bind(&input.category)
            .bind(input.published)
            .bind(input.featured)
            .bind(&input.meta_title)
            .bind(&input.meta_description)
            .fetch_one(&mut *tx)
            .await?;

        tx.commit().await?;
        Ok(Some(post))
    }

    /// Delete a post. Returns `false` if absent.
    pub async fn delete(pool: &PgPool, id: EntityId) -> Result<bool, sqlx::Error> {
        let result = sqlx::query("DELETE FROM blog_posts WHERE id = $1")
            .bind(id)
            .execute(pool)
            .await?;
        Ok(result.rows_affected() > 0)
    }

    /// Flip the published flag. Returns the updated row, `None` if the
    /// post does not exist.
    pub async fn toggle_published(
        pool: &PgPool,
        id: EntityId,
    ) -> Result<Option<BlogPost>, sqlx::Error> {
        let query = format!(
            "UPDATE blog_posts SET published = NOT published, updated_at = now() \
             WHERE id = $1 \
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, BlogPost>(&query)
            .bind(id)
            .fetch_optional(pool)
            .await
    }

    /// Flip the featured flag. Returns the updated row, `None` if the
    /// post does not exist.
    pub async fn toggle_featured(
        pool: &PgPool,
        id: EntityId,
    ) -> Result<Option<BlogPost>, sqlx::Error> {
        let query = format!(
            "UPDATE blog_posts SET featured = NOT featured, updated_at = now() \
             WHERE id = $1 \
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, BlogPost>(&query)
            .bind(id)
            .fetch_optional(pool)
            .await
    }

    // -----------------------------------------------------------------------
    // Internal helpers
    // -----------------------------------------------------------------------

    /// True if `slug` belongs to a post other than `exclude`.
    async fn slug_taken(
        tx: &mut sqlx::Transaction<'_, sqlx::Postgres>,
        slug: &str,
        exclude: Option<EntityId>,
    ) -> Result<bool, sqlx::Error> {
        sqlx::query_scalar::<_, bool>(
            "SELECT EXISTS ( \
                SELECT 1 FROM blog_posts \
                WHERE slug = $1 AND ($2::uuid IS NULL OR id <> $2) \
             )",
        )
        .bind(slug)
        .bind(exclude)
        .fetch_one(&mut **tx)
        .await
    }
}
