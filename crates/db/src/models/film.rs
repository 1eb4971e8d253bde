//! Film entity model and DTOs.
//!
//! A film owns its vendor credits and gallery images. Both collections
//! are replaced wholesale when edited, with `sort_order` taken from
//! the submitted position, so child row ids are not stable across
//! edits.

use firstlook_core::types::{EntityId, RowId, Timestamp};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;

/// A row from the `films` table.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct Film {
    pub id: EntityId,
    pub slug: String,
    /// Retired slugs still resolving to this film while it is published.
    pub old_slugs: Vec<String>,
    pub title: String,
    pub subtitle: Option<String>,
    pub tagline: Option<String>,
    pub location: Option<String>,
    pub header_image_url: Option<String>,
    pub video_url: Option<String>,
    pub trailer_url: Option<String>,
    pub story_html: Option<String>,
    pub published: bool,
    pub featured: bool,
    pub sort_order: i32,
    /// Ranking score; higher is listed first.
    pub rating: i32,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}

/// A vendor credit row from `film_vendors`.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct FilmVendor {
    pub id: RowId,
    pub film_id: EntityId,
    pub role: String,
    pub name: String,
    pub link: Option<String>,
    pub sort_order: i32,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}

/// A gallery image row from `film_gallery_images`.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct FilmGalleryImage {
    pub id: RowId,
    pub film_id: EntityId,
    pub url: String,
    pub alt_text: Option<String>,
    pub sort_order: i32,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}

/// Display projection of a film, used by venue pages and the
/// recommendation strip.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct FilmCard {
    pub id: EntityId,
    pub slug: String,
    pub title: String,
    pub location: Option<String>,
    pub header_image_url: Option<String>,
}

/// A film with its owned collections hydrated in display order.
#[derive(Debug, Clone, Serialize)]
pub struct FilmWithRelations {
    #[serde(flatten)]
    pub film: Film,
    pub vendors: Vec<FilmVendor>,
    pub gallery: Vec<FilmGalleryImage>,
}

/// Submitted vendor credit; its list position becomes `sort_order`.
#[derive(Debug, Clone, Deserialize)]
pub struct VendorInput {
    pub role: String,
    pub name: String,
    pub link: Option<String>,
}

/// Submitted gallery image; its list position becomes `sort_order`.
/// Shared with venues, whose galleries have the same shape.
#[derive(Debug, Clone, Deserialize)]
pub struct GalleryImageInput {
    pub url: String,
    pub alt_text: Option<String>,
}

/// DTO for creating a new film.
#[derive(Debug, Clone, Deserialize)]
pub struct CreateFilm {
    pub slug: String,
    pub title: String,
    pub subtitle: Option<String>,
    pub tagline: Option<String>,
    pub location: Option<String>,
    pub header_image_url: Option<String>,
    pub video_url: Option<String>,
    pub trailer_url: Option<String>,
    pub story_html: Option<String>,
    #[serde(default)]
    pub old_slugs: Vec<String>,
    pub published: Option<bool>,
    pub featured: Option<bool>,
    pub sort_order: Option<i32>,
    pub rating: Option<i32>,
    /// Vendor credits in display order.
    #[serde(default)]
    pub vendors: Vec<VendorInput>,
    /// Gallery images in display order.
    #[serde(default)]
    pub gallery: Vec<GalleryImageInput>,
}

/// DTO for updating an existing film. Only non-`None` fields are
/// applied.
///
/// A supplied child collection (including an empty one) replaces the
/// stored collection; `None` leaves it untouched. When the slug
/// changes, the previous slug is retained in `old_slugs` so existing
/// links keep resolving.
#[derive(Debug, Clone, Deserialize)]
pub struct UpdateFilm {
    pub slug: Option<String>,
    pub title: Option<String>,
    pub subtitle: Option<String>,
    pub tagline: Option<String>,
    pub location: Option<String>,
    pub header_image_url: Option<String>,
    pub video_url: Option<String>,
    pub trailer_url: Option<String>,
    pub story_html: Option<String>,
    pub old_slugs: Option<Vec<String>>,
    pub published: Option<bool>,
    pub featured: Option<bool>,
    pub sort_order: Option<i32>,
    pub rating: Option<i32>,
    pub vendors: Option<Vec<VendorInput>>,
    pub gallery: Option<Vec<GalleryImageInput>>,
}
