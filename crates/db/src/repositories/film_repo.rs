//! Repository for the `films` table and its owned collections.

use sqlx::PgPool;
use uuid::Uuid;

use firstlook_core::types::EntityId;

use crate::error::RepoError;
use crate::models::film::{
    CreateFilm, Film, FilmCard, FilmGalleryImage, FilmVendor, FilmWithRelations, GalleryImageInput,
    UpdateFilm, VendorInput,
};

/// Column list for the `films` table.
const COLUMNS: &str = "id, slug, old_slugs, title, subtitle, tagline, location, \
    header_image_url, video_url, trailer_url, story_html, published, featured, \
    sort_order, rating, created_at, updated_at";

/// Column list for `film_vendors`.
const VENDOR_COLUMNS: &str = "id, film_id, role, name, link, sort_order, created_at, updated_at";

/// Column list for `film_gallery_images`.
const GALLERY_COLUMNS: &str = "id, film_id, url, alt_text, sort_order, created_at, updated_at";

/// Display columns for card projections.
const CARD_COLUMNS: &str = "id, slug, title, location, header_image_url";

/// Provides CRUD, slug resolution and recommendation-pool queries for
/// films.
pub struct FilmRepo;

impl FilmRepo {
    /// Insert a new film with its vendor credits and gallery images.
    ///
    /// Fails with [`RepoError::SlugTaken`] if the slug is in use. The
    /// whole operation is one transaction; nothing persists on failure.
    pub async fn create(pool: &PgPool, input: &CreateFilm) -> Result<FilmWithRelations, RepoError> {
        let mut tx = pool.begin().await?;

        if Self::slug_taken(&mut tx, &input.slug, None).await? {
            return Err(RepoError::SlugTaken(input.slug.clone()));
        }

        let insert_query = format!(
            "INSERT INTO films \
                (id, slug, old_slugs, title, subtitle, tagline, location, \
                 header_image_url, video_url, trailer_url, story_html, \
                 published, featured, sort_order, rating) \
             VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, $10, $11, \
                 COALESCE($12, false), COALESCE($13, false), \
                 COALESCE($14, 0), COALESCE($15, 0)) \
             RETURNING {COLUMNS}"
        );
        let film = sqlx::query_as::<_, Film>(&insert_query)
            .bind(Uuid::now_v7())
            .bind(&input.slug)
            .bind(&input.old_slugs)
            .bind(&input.title)
            .bind(&input.subtitle)
            .bind(&input.tagline)
            .bind(&input.location)
            .bind(&input.header_image_url)
            .bind(&input.video_url)
            .bind(&input.trailer_url)
            .bind(&input.story_html)
            .bind(input.published)
            .bind(input.featured)
            .bind(input.sort_order)
            .bind(input.rating)
            .fetch_one(&mut *tx)
            .await?;

        Self::replace_vendors_inner(&mut tx, film.id, &input.vendors).await?;
        Self::replace_gallery_inner(&mut tx, film.id, &input.gallery).await?;

        tx.commit().await?;

        let vendors = Self::vendors_for(pool, film.id).await?;
        let gallery = Self::gallery_for(pool, film.id).await?;
        Ok(FilmWithRelations {
            film,
            vendors,
            gallery,
        })
    }

    /// Find a film by id, admin visibility (no published filter).
    pub async fn find_by_id(pool: &PgPool, id: EntityId) -> Result<Option<Film>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM films WHERE id = $1");
        sqlx::query_as::<_, Film>(&query)
            .bind(id)
            .fetch_optional(pool)
            .await
    }

    /// Find a film by id with its collections hydrated, admin
    /// visibility.
    pub async fn find_by_id_with_relations(
        pool: &PgPool,
        id: EntityId,
    ) -> Result<Option<FilmWithRelations>, sqlx::Error> {
        let film = Self::find_by_id(pool, id).await?;
        match film {
            Some(film) => {
                let vendors = Self::vendors_for(pool, film.id).await?;
                let gallery = Self::gallery_for(pool, film.id).await?;
                Ok(Some(FilmWithRelations {
                    film,
                    vendors,
                    gallery,
                }))
            }
            None => Ok(None),
        }
    }

    /// Load a published film by slug, hydrated. Public callers only:
    /// missing and unpublished both come back as `None`.
    pub async fn find_published_by_slug(
        pool: &PgPool,
        slug: &str,
    ) -> Result<Option<FilmWithRelations>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM films WHERE slug = $1 AND published = true");
        let film = sqlx::query_as::<_, Film>(&query)
            .bind(slug)
            .fetch_optional(pool)
            .await?;
        match film {
            Some(film) => {
                let vendors = Self::vendors_for(pool, film.id).await?;
                let gallery = Self::gallery_for(pool, film.id).await?;
                Ok(Some(FilmWithRelations {
                    film,
                    vendors,
                    gallery,
                }))
            }
            None => Ok(None),
        }
    }

    /// List published films in listing order: rating descending, then
    /// manual sort priority, id as the deterministic tie-break.
    pub async fn list_published(pool: &PgPool) -> Result<Vec<Film>, sqlx::Error> {
        let query = format!(
            "SELECT {COLUMNS} FROM films \
             WHERE published = true \
             ORDER BY rating DESC, sort_order, id"
        );
        sqlx::query_as::<_, Film>(&query).fetch_all(pool).await
    }

    /// List every film, unpublished included. Admin callers only.
    pub async fn list_all(pool: &PgPool) -> Result<Vec<Film>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM films ORDER BY rating DESC, sort_order, id");
        sqlx::query_as::<_, Film>(&query).fetch_all(pool).await
    }

    /// Candidate pool for the recommendation strip: published films
    /// other than the one being viewed, as display cards.
    pub async fn list_published_excluding(
        pool: &PgPool,
        slug: &str,
    ) -> Result<Vec<FilmCard>, sqlx::Error> {
        let query = format!(
            "SELECT {CARD_COLUMNS} FROM films \
             WHERE published = true AND slug <> $1 \
             ORDER BY rating DESC, sort_order, id"
        );
        sqlx::query_as::<_, FilmCard>(&query)
            .bind(slug)
            .fetch_all(pool)
            .await
    }

    /// Map a retired slug to the current one. Only published films
    /// resolve; an unpublished film's slug history must not leak.
    pub async fn resolve_legacy_slug(
        pool: &PgPool,
        old_slug: &str,
    ) -> Result<Option<String>, sqlx::Error> {
        sqlx::query_scalar::<_, String>(
            "SELECT slug FROM films \
             WHERE $1 = ANY(old_slugs) AND published = true \
             ORDER BY updated_at DESC \
             LIMIT 1",
        )
        .bind(old_slug)
        .fetch_optional(pool)
        .await
    }

    /// Update a film. Only non-`None` fields are applied; a supplied
    /// collection (including an empty one) replaces the stored one
    /// wholesale. Returns `None` if no row with the given `id` exists.
    ///
    /// A slug change re-checks uniqueness against all other rows and
    /// retains the outgoing slug in `old_slugs` so stale links keep
    /// resolving.
    pub async fn update(
        pool: &PgPool,
        id: EntityId,
        input: &UpdateFilm,
    ) -> Result<Option<Film>, RepoError> {
        let mut tx = pool.begin().await?;

        let select_query = format!("SELECT {COLUMNS} FROM films WHERE id = $1");
        let Some(current) = sqlx::query_as::<_, Film>(&select_query)
            .bind(id)
            .fetch_optional(&mut *tx)
            .await?
        else {
            return Ok(None);
        };

        let mut old_slugs = input.old_slugs.clone();
        if let Some(new_slug) = &input.slug {
            if *new_slug != current.slug {
                if Self::slug_taken(&mut tx, new_slug, Some(id)).await? {
                    return Err(RepoError::SlugTaken(new_slug.clone()));
                }
                // Keep the outgoing slug resolvable.
                let mut slugs = old_slugs
                    .take()
                    .unwrap_or_else(|| current.old_slugs.clone());
                if !slugs.contains(&current.slug) {
                    slugs.push(current.slug.clone());
                }
                old_slugs = Some(slugs);
            }
        }

        let update_query = format!(
            "UPDATE films SET \
                slug = COALESCE($2, slug), \
                old_slugs = COALESCE($3, old_slugs), \
                title = COALESCE($4, title), \
                subtitle = COALESCE($5, subtitle), \
                tagline = COALESCE($6, tagline), \
                location = COALESCE($7, location), \
                header_image_url = COALESCE($8, header_image_url), \
                video_url = COALESCE($9, video_url), \
                trailer_url = COALESCE($10, trailer_url), \
                story_html = COALESCE($11, story_html), \
                published = COALESCE($12, published), \
                featured = COALESCE($13, featured), \
                sort_order = COALESCE($14, sort_order), \
                rating = COALESCE($15, rating), \
                updated_at = now() \
             WHERE id = $1 \
             RETURNING {COLUMNS}"
        );
        let film = sqlx::query_as::<_, Film>(&update_query)
            .bind(id)
            .bind(&input.slug)
            .bind(&old_slugs)
            .bind(&input.title)
            .bind(&input.subtitle)
            .bind(&input.tagline)
            .bind(&input.location)
            .bind(&input.header_image_url)
            .bind(&input.video_url)
            .bind(&input.trailer_url)
            .bind(&input.story_html)
            .bind(input.published)
            .bind(input.featured)
            .bind(input.sort_order)
            .bind(input.rating)
            .fetch_one(&mut *tx)
            .await?;

        if let Some(vendors) = &input.vendors {
            Self::replace_vendors_inner(&mut tx, id, vendors).await?;
        }
        if let Some(gallery) = &input.gallery {
            Self::replace_gallery_inner(&mut tx, id, gallery).await?;
        }

        tx.commit().await?;
        Ok(Some(film))
    }

    /// Delete a film. Vendors, gallery images and venue links go with
    /// it via `ON DELETE CASCADE`. Returns `false` if absent.
    pub async fn delete(pool: &PgPool, id: EntityId) -> Result<bool, sqlx::Error> {
        let result = sqlx::query("DELETE FROM films WHERE id = $1")
            .bind(id)
            .execute(pool)
            .await?;
        Ok(result.rows_affected() > 0)
    }

    /// Flip the published flag. Returns the updated row, `None` if the
    /// film does not exist.
    pub async fn toggle_published(
        pool: &PgPool,
        id: EntityId,
    ) -> Result<Option<Film>, sqlx::Error> {
        let query = format!(
            "UPDATE films SET published = NOT published, updated_at = now() \
             WHERE id = $1 \
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, Film>(&query)
            .bind(id)
            .fetch_optional(pool)
            .await
    }

    /// Flip the featured flag. Returns the updated row, `None` if the
    /// film does not exist.
    pub async fn toggle_featured(
        pool: &PgPool,
        id: EntityId,
    ) -> Result<Option<Film>, sqlx::Error> {
        let query = format!(
            "UPDATE films SET featured = NOT featured, updated_at = now() \
             WHERE id = $1 \
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, Film>(&query)
            .bind(id)
            .fetch_optional(pool)
            .await
    }

    // -----------------------------------------------------------------------
    // Child collection helpers
    // -----------------------------------------------------------------------

    /// Vendor credits for a film in display order.
    pub async fn vendors_for(
        pool: &PgPool,
        film_id: EntityId,
    ) -> Result<Vec<FilmVendor>, sqlx::Error> {
        let query = format!(
            "SELECT {VENDOR_COLUMNS} FROM film_vendors \
             WHERE film_id = $1 \
             ORDER BY sort_order, id"
        );
        sqlx::query_as::<_, FilmVendor>(&query)
            .bind(film_id)
            .fetch_all(pool)
            .await
    }

    /// Gallery images for a film in display order.
    pub async fn gallery_for(
        pool: &PgPool,
        film_id: EntityId,
    ) -> Result<Vec<FilmGalleryImage>, sqlx::Error> {
        let query = format!(
            "SELECT {GALLERY_COLUMNS} FROM film_gallery_images \
             WHERE film_id = $1 \
             ORDER BY sort_order, id"
        );
        sqlx::query_as::<_, FilmGalleryImage>(&query)
            .bind(film_id)
            .fetch_all(pool)
            .await
    }

    // -----------------------------------------------------------------------
    // Internal helpers
    // -----------------------------------------------------------------------

    /// True if `slug` belongs to a film other than `exclude`.
    async fn slug_taken(
        tx: &mut sqlx::Transaction<'_, sqlx::Postgres>,
        slug: &str,
        exclude: Option<EntityId>,
    ) -> Result<bool, sqlx::Error> {
        sqlx::query_scalar::<_, bool>(
            "SELECT EXISTS ( \
                SELECT 1 FROM films \
                WHERE slug = $1 AND ($2::uuid IS NULL OR id <> $2) \
             )",
        )
        .bind(slug)
        .bind(exclude)
        .fetch_one(&mut **tx)
        .await
    }

    /// Replace vendor credits within an existing transaction.
    async fn replace_vendors_inner(
        tx: &mut sqlx::Transaction<'_, sqlx::Postgres>,
        film_id: EntityId,
        vendors: &[VendorInput],
    ) -> Result<(), sqlx::Error> {
        sqlx::query("DELETE FROM film_vendors WHERE film_id = $1")
            .bind(film_id)
            .execute(&mut **tx)
            .await?;

        if vendors.is_empty() {
            return Ok(());
        }

        // Parallel arrays; list position becomes sort_order.
        let roles: Vec<String> = vendors.iter().map(|v| v.role.clone()).collect();
        let names: Vec<String> = vendors.iter().map(|v| v.name.clone()).collect();
        let links: Vec<Option<String>> = vendors.iter().map(|v| v.link.clone()).collect();
        let positions: Vec<i32> = (0..vendors.len() as i32).collect();

        sqlx::query(
            "INSERT INTO film_vendors (film_id, role, name, link, sort_order) \
             SELECT $1, v.role, v.name, v.link, v.sort_order \
             FROM UNNEST($2::text[], $3::text[], $4::text[], $5::int4[]) \
                 AS v(role, name, link, sort_order)",
        )
        .bind(film_id)
        .bind(&roles)
        .bind(&names)
        .bind(&links)
        .bind(&positions)
        .execute(&mut **tx)
        .await?;

        Ok(())
    }

    /// Replace gallery images within an existing transaction.
    async fn replace_gallery_inner(
        tx: &mut sqlx::Transaction<'_, sqlx::Postgres>,
        film_id: EntityId,
        gallery: &[GalleryImageInput],
    ) -> Result<(), sqlx::Error> {
        sqlx::query("DELETE FROM film_gallery_images WHERE film_id = $1")
            .bind(film_id)
            .execute(&mut **tx)
            .await?;

        if gallery.is_empty() {
            return Ok(());
        }

        let urls: Vec<String> = gallery.iter().map(|g| g.url.clone()).collect();
        let alt_texts: Vec<Option<String>> = gallery.iter().map(|g| g.alt_text.clone()).collect();
        let positions: Vec<i32> = (0..gallery.len() as i32).collect();

        sqlx::query(
            "INSERT INTO film_gallery_images (film_id, url, alt_text, sort_order) \
             SELECT $1, g.url, g.alt_text, g.sort_order \
             FROM UNNEST($2::text[], $3::text[], $4::int4[]) \
                 AS g(url, alt_text, sort_order)",
        )
        .bind(film_id)
        .bind(&urls)
        .bind(&alt_texts)
        .bind(&positions)
        .execute(&mut **tx)
        .await?;

        Ok(())
    }
}
