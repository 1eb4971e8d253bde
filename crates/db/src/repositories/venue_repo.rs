//! Repository for the `venues` table, its gallery, and its two join
//! relations (`venue_films`, `similar_venues`).

use sqlx::PgPool;
use uuid::Uuid;

use firstlook_core::types::EntityId;

use crate::error::RepoError;
use crate::models::film::{FilmCard, GalleryImageInput};
use crate::models::venue::{
    CreateVenue, UpdateVenue, Venue, VenueCard, VenueGalleryImage, VenueWithRelations,
};

/// Column list for the `venues` table.
const COLUMNS: &str = "id, slug, name, address, city, region, postcode, country, \
    phone, email, website, description_html, pricing_text, capacity_min, capacity_max, \
    catering_html, accommodation_html, ceremony_html, late_license_html, header_image_url, \
    has_accommodation, has_inhouse_catering, allows_external_catering, has_late_license, \
    is_exclusive_use, wedding_types, categories, indoor_outdoor, published, featured, \
    sort_order, created_at, updated_at";

/// Column list for `venue_gallery_images`.
const GALLERY_COLUMNS: &str = "id, venue_id, url, alt_text, sort_order, created_at, updated_at";

/// Film display columns for join loads (aliased to the films table).
const FILM_CARD_COLUMNS: &str = "f.id, f.slug, f.title, f.location, f.header_image_url";

/// Venue display columns for join loads (aliased to the venues table).
const VENUE_CARD_COLUMNS: &str = "v.id, v.slug, v.name, v.city, v.region, v.header_image_url";

/// Provides CRUD and join maintenance for venues.
pub struct VenueRepo;

impl VenueRepo {
    /// Insert a new venue with its gallery, film links and
    /// similar-venue links.
    ///
    /// Fails with [`RepoError::SlugTaken`] if the slug is in use. The
    /// whole operation is one transaction; nothing persists on failure.
    pub async fn create(
        pool: &PgPool,
        input: &CreateVenue,
    ) -> Result<VenueWithRelations, RepoError> {
        let mut tx = pool.begin().await?;

        if Self::slug_taken(&mut tx, &input.slug, None).await? {
            return Err(RepoError::SlugTaken(input.slug.clone()));
        }

        let insert_query = format!(
            "INSERT INTO venues \
                (id, slug, name, address, city, region, postcode, country, \
                 phone, email, website, description_html, pricing_text, \
                 capacity_min, capacity_max, catering_html, accommodation_html, \
                 ceremony_html, late_license_html, header_image_url, \
                 has_accommodation, has_inhouse_catering, allows_external_catering, \
                 has_late_license, is_exclusive_use, wedding_types, categories, \
                 indoor_outdoor, published, featured, sort_order) \
             VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, $10, $11, $12, $13, \
                 $14, $15, $16, $17, $18, $19, $20, \
                 COALESCE($21, false), COALESCE($22, false), COALESCE($23, false), \
                 COALESCE($24, false), COALESCE($25, false), $26, $27, $28, \
                 COALESCE($29, false), COALESCE($30, false), COALESCE($31, 0)) \
             RETURNING {COLUMNS}"
        );
        let venue = sqlx::query_as::<_, Venue>(&insert_query)
            .bind(Uuid::now_v7())
            .bind(&input.slug)
            .bind(&input.name)
            .bind(&input.address)
            .bind(&input.city)
            .bind(&input.region)
            .bind(&input.postcode)
            .bind(&input.country)
            .bind(&input.phone)
            .bind(&input.email)
            .bind(&input.website)
            .bind(&input.description_html)
            .bind(&input.pricing_text)
            .bind(input.capacity_min)
            .bind(input.capacity_max)
            .bind(&input.catering_html)
            .bind(&input.accommodation_html)
            .bind(&input.ceremony_html)
            .bind(&input.late_license_html)
            .bind(&input.header_image_url)
            .bind(input.has_accommodation)
            .bind(input.has_inhouse_catering)
            .bind(input.allows_external_catering)
            .bind(input.has_late_license)
            .bind(input.is_exclusive_use)
            .bind(&input.wedding_types)
            .bind(&input.categories)
            .bind(&input.indoor_outdoor)
            .bind(input.published)
            .bind(input.featured)
            .bind(input.sort_order)
            .fetch_one(&mut *tx)
            .await?;

        Self::replace_gallery_inner(&mut tx, venue.id, &input.gallery).await?;
        Self::replace_films_inner(&mut tx, venue.id, &input.film_ids).await?;
        Self::replace_similar_inner(&mut tx, venue.id, &input.similar_venue_ids).await?;

        tx.commit().await?;

        let gallery = Self::gallery_for(pool, venue.id).await?;
        let films = Self::film_cards_for(pool, venue.id).await?;
        let similar_venues = Self::similar_venue_cards_for(pool, venue.id).await?;
        Ok(VenueWithRelations {
            venue,
            gallery,
            films,
            similar_venues,
        })
    }

    /// Find a venue by id, admin visibility (no published filter).
    pub async fn find_by_id(pool: &PgPool, id: EntityId) -> Result<Option<Venue>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM venues WHERE id = $1");
        sqlx::query_as::<_, Venue>(&query)
            .bind(id)
            .fetch_optional(pool)
            .await
    }

    /// Find a venue by id with all relations hydrated, admin
    /// visibility. Join targets are included whether published or not
    /// so the editor sees every link.
    pub async fn find_by_id_with_relations(
        pool: &PgPool,
        id: EntityId,
    ) -> Result<Option<VenueWithRelations>, sqlx::Error> {
        let venue = Self::find_by_id(pool, id).await?;
        match venue {
            Some(venue) => {
                let gallery = Self::gallery_for(pool, venue.id).await?;
                let films = Self::film_cards_for(pool, venue.id).await?;
                let similar_venues = Self::similar_venue_cards_for(pool, venue.id).await?;
                Ok(Some(VenueWithRelations {
                    venue,
                    gallery,
                    films,
                    similar_venues,
                }))
            }
            None => Ok(None),
        }
    }

    /// Load a published venue by slug, hydrated. Public callers only:
    /// missing and unpublished both come back as `None`, and join
    /// targets are filtered to published rows.
    pub async fn find_published_by_slug(
        pool: &PgPool,
        slug: &str,
    ) -> Result<Option<VenueWithRelations>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM venues WHERE slug = $1 AND published = true");
        let venue = sqlx::query_as::<_, Venue>(&query)
            .bind(slug)
            .fetch_optional(pool)
            .await?;
        match venue {
            Some(venue) => {
                let gallery = Self::gallery_for(pool, venue.id).await?;
                let films = Self::published_film_cards_for(pool, venue.id).await?;
                let similar_venues = Self::published_similar_venue_cards_for(pool, venue.id).await?;
                Ok(Some(VenueWithRelations {
                    venue,
                    gallery,
                    films,
                    similar_venues,
                }))
            }
            None => Ok(None),
        }
    }

    /// List published venues in listing order, optionally filtered by
    /// a category tag and/or a wedding-type tag.
    pub async fn list_published(
        pool: &PgPool,
        category: Option<&str>,
        wedding_type: Option<&str>,
    ) -> Result<Vec<Venue>, sqlx::Error> {
        let query = format!(
            "SELECT {COLUMNS} FROM venues \
             WHERE published = true \
               AND ($1::text IS NULL OR $1 = ANY(categories)) \
               AND ($2::text IS NULL OR $2 = ANY(wedding_types)) \
             ORDER BY featured DESC, sort_order, id"
        );
        sqlx::query_as::<_, Venue>(&query)
            .bind(category)
            .bind(wedding_type)
            .fetch_all(pool)
            .await
    }

    /// List every venue, unpublished included. Admin callers only.
    pub async fn list_all(pool: &PgPool) -> Result<Vec<Venue>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM venues ORDER BY featured DESC, sort_order, id");
        sqlx::query_as::<_, Venue>(&query).fetch_all(pool).await
    }

    /// Update a venue. Only non-`None` fields are applied; a supplied
    /// collection (including an empty one) replaces the stored one
    /// wholesale. Returns `None` if no row with the given `id` exists.
    pub async fn update(
        pool: &PgPool,
        id: EntityId,
        input: &UpdateVenue,
    ) -> Result<Option<Venue>, RepoError> {
        let mut tx = pool.begin().await?;

        let Some(current_slug) =
            sqlx::query_scalar::<_, String>("SELECT slug FROM venues WHERE id = $1")
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
            "UPDATE venues SET \
                slug = COALESCE($2, slug), \
                name = COALESCE($3, name), \
                address = COALESCE($4, address), \
                city = COALESCE($5, city), \
                region = COALESCE($6, region), \
                postcode = COALESCE($7, postcode), \
                country = COALESCE($8, country), \
                phone = COALESCE($9, phone), \
                email = COALESCE($10, email), \
                website = COALESCE($11, website), \
                description_html = COALESCE($12, description_html), \
                pricing_text = COALESCE($13, pricing_text), \
                capacity_min = COALESCE($14, capacity_min), \
                capacity_max = COALESCE($15, capacity_max), \
                catering_html = COALESCE($16, catering_html), \
                accommodation_html = COALESCE($17, accommodation_html), \
                ceremony_html = COALESCE($18, ceremony_html), \
                late_license_html = COALESCE($19, late_license_html), \
                header_image_url = COALESCE($20, header_image_url), \
                has_accommodation = COALESCE($21, has_accommodation), \
                has_inhouse_catering = COALESCE($22, has_inhouse_catering), \
                allows_external_catering = COALESCE($23, allows_external_catering), \
                has_late_license = COALESCE($24, has_late_license), \
                is_exclusive_use = COALESCE($25, is_exclusive_use), \
                wedding_types = COALESCE($26, wedding_types), \
                categories = COALESCE($27, categories), \
                indoor_outdoor = COALESCE($28, indoor_outdoor), \
                published = COALESCE($29, published), \
                featured = COALESCE($30, featured), \
                sort_order = COALESCE($31, sort_order), \
                updated_at = now() \
             WHERE id = $1 \
             RETURNING {COLUMNS}"
        );
        let venue = sqlx::query_as::<_, Venue>(&update_query)
            .bind(id)
            .bind(&input.slug)
            .bind(&input.name)
            .bind(&input.address)
            .bind(&input.city)
            .bind(&input.region)
            .bind(&input.postcode)
            .bind(&input.country)
            .bind(&input.phone)
            .bind(&input.email)
            .bind(&input.website)
            .bind(&input.description_html)
            .bind(&input.pricing_text)
            .bind(input.capacity_min)
            .bind(input.capacity_max)
            .bind(&input.catering_html)
            .bind(&input.accommodation_html)
            .bind(&input.ceremony_html)
            .bind(&input.late_license_html)
            .bind(&input.header_image_url)
            .bind(input.has_accommodation)
            .bind(input.has_inhouse_catering)
            .bind(input.allows_external_catering)
            .bind(input.has_late_license)
            .bind(input.is_exclusive_use)
            .bind(&input.wedding_types)
            .bind(&input.categories)
            .bind(&input.indoor_outdoor)
            .bind(input.published)
            .bind(input.featured)
            .bind(input.sort_order)
            .fetch_one(&mut *tx)
            .await?;

        if let Some(gallery) = &input.gallery {
            Self::replace_gallery_inner(&mut tx, id, gallery).await?;
        }
        if let Some(film_ids) = &input.film_ids {
            Self::replace_films_inner(&mut tx, id, film_ids).await?;
        }
        if let Some(similar_venue_ids) = &input.similar_venue_ids {
            Self::replace_similar_inner(&mut tx, id, similar_venue_ids).await?;
        }

        tx.commit().await?;
        Ok(Some(venue))
    }

    /// Delete a venue. Gallery images, film links and similar-venue
    /// edges in both directions go with it via `ON DELETE CASCADE`.
    /// Returns `false` if absent.
    pub async fn delete(pool: &PgPool, id: EntityId) -> Result<bool, sqlx::Error> {
        let result = sqlx::query("DELETE FROM venues WHERE id = $1")
            .bind(id)
            .execute(pool)
            .await?;
        Ok(result.rows_affected() > 0)
    }

    /// Flip the published flag. Returns the updated row, `None` if the
    /// venue does not exist.
    pub async fn toggle_published(
        pool: &PgPool,
        id: EntityId,
    ) -> Result<Option<Venue>, sqlx::Error> {
        let query = format!(
            "UPDATE venues SET published = NOT published, updated_at = now() \
             WHERE id = $1 \
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, Venue>(&query)
            .bind(id)
            .fetch_optional(pool)
            .await
    }

    /// Flip the featured flag. Returns the updated row, `None` if the
    /// venue does not exist.
    pub async fn toggle_featured(
        pool: &PgPool,
        id: EntityId,
    ) -> Result<Option<Venue>, sqlx::Error> {
        let query = format!(
            "UPDATE venues SET featured = NOT featured, updated_at = now() \
             WHERE id = $1 \
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, Venue>(&query)
            .bind(id)
            .fetch_optional(pool)
            .await
    }

    /// Append imported gallery images after the existing ones,
    /// continuing the sort_order sequence. Returns the new rows in
    /// display order.
    pub async fn append_gallery_images(
        pool: &PgPool,
        venue_id: EntityId,
        items: &[GalleryImageInput],
    ) -> Result<Vec<VenueGalleryImage>, sqlx::Error> {
        if items.is_empty() {
            return Ok(Vec::new());
        }

        let mut tx = pool.begin().await?;

        let base: i32 = sqlx::query_scalar(
            "SELECT COALESCE(MAX(sort_order) + 1, 0) FROM venue_gallery_images \
             WHERE venue_id = $1",
        )
        .bind(venue_id)
        .fetch_one(&mut *tx)
        .await?;

        let urls: Vec<String> = items.iter().map(|g| g.url.clone()).collect();
        let alt_texts: Vec<Option<String>> = items.iter().map(|g| g.alt_text.clone()).collect();
        let positions: Vec<i32> = (0..items.len() as i32).map(|i| base + i).collect();

        sqlx::query(
            "INSERT INTO venue_gallery_images (venue_id, url, alt_text, sort_order) \
             SELECT $1, g.url, g.alt_text, g.sort_order \
             FROM UNNEST($2::text[], $3::text[], $4::int4[]) \
                 AS g(url, alt_text, sort_order)",
        )
        .bind(venue_id)
        .bind(&urls)
        .bind(&alt_texts)
        .bind(&positions)
        .execute(&mut *tx)
        .await?;

        let select_query = format!(
            "SELECT {GALLERY_COLUMNS} FROM venue_gallery_images \
             WHERE venue_id = $1 AND sort_order >= $2 \
             ORDER BY sort_order, id"
        );
        let rows = sqlx::query_as::<_, VenueGalleryImage>(&select_query)
            .bind(venue_id)
            .bind(base)
            .fetch_all(&mut *tx)
            .await?;

        tx.commit().await?;
        Ok(rows)
    }

    // -----------------------------------------------------------------------
    // Relation loads
    // -----------------------------------------------------------------------

    /// Gallery images for a venue in display order.
    pub async fn gallery_for(
        pool: &PgPool,
        venue_id: EntityId,
    ) -> Result<Vec<VenueGalleryImage>, sqlx::Error> {
        let query = format!(
            "SELECT {GALLERY_COLUMNS} FROM venue_gallery_images \
             WHERE venue_id = $1 \
             ORDER BY sort_order, id"
        );
        sqlx::query_as::<_, VenueGalleryImage>(&query)
            .bind(venue_id)
            .fetch_all(pool)
            .await
    }

    /// All linked films in link order, published or not. Admin loads.
    pub async fn film_cards_for(
        pool: &PgPool,
        venue_id: EntityId,
    ) -> Result<Vec<FilmCard>, sqlx::Error> {
        let query = format!(
            "SELECT {FILM_CARD_COLUMNS} \
             FROM films f \
             JOIN venue_films vf ON vf.film_id = f.id \
             WHERE vf.venue_id = $1 \
             ORDER BY vf.sort_order, vf.id"
        );
        sqlx::query_as::<_, FilmCard>(&query)
            .bind(venue_id)
            .fetch_all(pool)
            .await
    }

    /// Linked films in link order, published targets only. Public
    /// loads.
    pub async fn published_film_cards_for(
        pool: &PgPool,
        venue_id: EntityId,
    ) -> Result<Vec<FilmCard>, sqlx::Error> {
        let query = format!(
            "SELECT {FILM_CARD_COLUMNS} \
             FROM films f \
             JOIN venue_films vf ON vf.film_id = f.id \
             WHERE vf.venue_id = $1 AND f.published = true \
             ORDER BY vf.sort_order, vf.id"
        );
        sqlx::query_as::<_, FilmCard>(&query)
            .bind(venue_id)
            .fetch_all(pool)
            .await
    }

    /// All curated similar venues in edge order, published or not.
    /// Admin loads.
    pub async fn similar_venue_cards_for(
        pool: &PgPool,
        venue_id: EntityId,
    ) -> Result<Vec<VenueCard>, sqlx::Error> {
        let query = format!(
            "SELECT {VENUE_CARD_COLUMNS} \
             FROM venues v \
             JOIN similar_venues sv ON sv.similar_venue_id = v.id \
             WHERE sv.venue_id = $1 \
             ORDER BY sv.sort_order, sv.id"
        );
        sqlx::query_as::<_, VenueCard>(&query)
            .bind(venue_id)
            .fetch_all(pool)
            .await
    }

    /// Curated similar venues in edge order, published targets only.
    /// Public loads.
    pub async fn published_similar_venue_cards_for(
        pool: &PgPool,
        venue_id: EntityId,
    ) -> Result<Vec<VenueCard>, sqlx::Error> {
        let query = format!(
            "SELECT {VENUE_CARD_COLUMNS} \
             FROM venues v \
             JOIN similar_venues sv ON sv.similar_venue_id = v.id \
             WHERE sv.venue_id = $1 AND v.published = true \
             ORDER BY sv.sort_order, sv.id"
        );
        sqlx::query_as::<_, VenueCard>(&query)
            .bind(venue_id)
            .fetch_all(pool)
            .await
    }

    // -----------------------------------------------------------------------
    // Internal helpers
    // -----------------------------------------------------------------------

    /// True if `slug` belongs to a venue other than `exclude`.
    async fn slug_taken(
        tx: &mut sqlx::Transaction<'_, sqlx::Postgres>,
        slug: &str,
        exclude: Option<EntityId>,
    ) -> Result<bool, sqlx::Error> {
        sqlx::query_scalar::<_, bool>(
            "SELECT EXISTS ( \
                SELECT 1 FROM venues \
                WHERE slug = $1 AND ($2::uuid IS NULL OR id <> $2) \
             )",
        )
        .bind(slug)
        .bind(exclude)
        .fetch_one(&mut **tx)
        .await
    }

    /// Replace gallery images within an existing transaction.
    async fn replace_gallery_inner(
        tx: &mut sqlx::Transaction<'_, sqlx::Postgres>,
        venue_id: EntityId,
        gallery: &[GalleryImageInput],
    ) -> Result<(), sqlx::Error> {
        sqlx::query("DELETE FROM venue_gallery_images WHERE venue_id = $1")
            .bind(venue_id)
            .execute(&mut **tx)
            .await?;

        if gallery.is_empty() {
            return Ok(());
        }

        // Parallel arrays; list position becomes sort_order.
        let urls: Vec<String> = gallery.iter().map(|g| g.url.clone()).collect();
        let alt_texts: Vec<Option<String>> = gallery.iter().map(|g| g.alt_text.clone()).collect();
        let positions: Vec<i32> = (0..gallery.len() as i32).collect();

        sqlx::query(
            "INSERT INTO venue_gallery_images (venue_id, url, alt_text, sort_order) \
             SELECT $1, g.url, g.alt_text, g.sort_order \
             FROM UNNEST($2::text[], $3::text[], $4::int4[]) \
                 AS g(url, alt_text, sort_order)",
        )
        .bind(venue_id)
        .bind(&urls)
        .bind(&alt_texts)
        .bind(&positions)
        .execute(&mut **tx)
        .await?;

        Ok(())
    }

    /// Replace film links within an existing transaction. Link order
    /// is the submitted order, independent of the films' own sort.
    async fn replace_films_inner(
        tx: &mut sqlx::Transaction<'_, sqlx::Postgres>,
        venue_id: EntityId,
        film_ids: &[EntityId],
    ) -> Result<(), sqlx::Error> {
        sqlx::query("DELETE FROM venue_films WHERE venue_id = $1")
            .bind(venue_id)
            .execute(&mut **tx)
            .await?;

        if film_ids.is_empty() {
            return Ok(());
        }

        let positions: Vec<i32> = (0..film_ids.len() as i32).collect();

        sqlx::query(
            "INSERT INTO venue_films (venue_id, film_id, sort_order) \
             SELECT $1, l.film_id, l.sort_order \
             FROM UNNEST($2::uuid[], $3::int4[]) AS l(film_id, sort_order)",
        )
        .bind(venue_id)
        .bind(film_ids)
        .bind(&positions)
        .execute(&mut **tx)
        .await?;

        Ok(())
    }

    /// Replace similar-venue edges within an existing transaction.
    /// Edges are directed; the reverse direction is curated separately.
    async fn replace_similar_inner(
        tx: &mut sqlx::Transaction<'_, sqlx::Postgres>,
        venue_id: EntityId,
        similar_venue_ids: &[EntityId],
    ) -> Result<(), sqlx::Error> {
        sqlx::query("DELETE FROM similar_venues WHERE venue_id = $1")
            .bind(venue_id)
            .execute(&mut **tx)
            .await?;

        if similar_venue_ids.is_empty() {
            return Ok(());
        }

        let positions: Vec<i32> = (0..similar_venue_ids.len() as i32).collect();

        sqlx::query(
            "INSERT INTO similar_venues (venue_id, similar_venue_id, sort_order) \
             SELECT $1, l.similar_venue_id, l.sort_order \
             FROM UNNEST($2::uuid[], $3::int4[]) AS l(similar_venue_id, sort_order)",
        )
        .bind(venue_id)
        .bind(similar_venue_ids)
        .bind(&positions)
        .execute(&mut **tx)
        .await?;

        Ok(())
    }
}
