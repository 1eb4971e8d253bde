//! Venue entity model and DTOs.
//!
//! A venue owns its gallery images and participates in two ordered
//! join relations: `venue_films` (portfolio films shot there) and
//! `similar_venues` (curated, directed "you may also like" edges).

use firstlook_core::types::{EntityId, RowId, Timestamp};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;

use super::film::{FilmCard, GalleryImageInput};

/// A row from the `venues` table.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct Venue {
    pub id: EntityId,
    pub slug: String,
    pub name: String,
    pub address: Option<String>,
    pub city: Option<String>,
    pub region: Option<String>,
    pub postcode: Option<String>,
    pub country: Option<String>,
    pub phone: Option<String>,
    pub email: Option<String>,
    pub website: Option<String>,
    pub description_html: Option<String>,
    pub pricing_text: Option<String>,
    pub capacity_min: Option<i32>,
    pub capacity_max: Option<i32>,
    pub catering_html: Option<String>,
    pub accommodation_html: Option<String>,
    pub ceremony_html: Option<String>,
    pub late_license_html: Option<String>,
    pub header_image_url: Option<String>,
    pub has_accommodation: bool,
    pub has_inhouse_catering: bool,
    pub allows_external_catering: bool,
    pub has_late_license: bool,
    pub is_exclusive_use: bool,
    /// Multi-select tag sets backing the directory filters.
    pub wedding_types: Vec<String>,
    pub categories: Vec<String>,
    pub indoor_outdoor: Vec<String>,
    pub published: bool,
    pub featured: bool,
    pub sort_order: i32,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}

/// A gallery image row from `venue_gallery_images`.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct VenueGalleryImage {
    pub id: RowId,
    pub venue_id: EntityId,
    pub url: String,
    pub alt_text: Option<String>,
    pub sort_order: i32,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}

/// Display projection of a venue, used by the similar-venues strip.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct VenueCard {
    pub id: EntityId,
    pub slug: String,
    pub name: String,
    pub city: Option<String>,
    pub region: Option<String>,
    pub header_image_url: Option<String>,
}

/// A venue with its gallery and join relations hydrated in display
/// order.
#[derive(Debug, Clone, Serialize)]
pub struct VenueWithRelations {
    #[serde(flatten)]
    pub venue: Venue,
    pub gallery: Vec<VenueGalleryImage>,
    pub films: Vec<FilmCard>,
    pub similar_venues: Vec<VenueCard>,
}

/// DTO for creating a new venue.
#[derive(Debug, Clone, Deserialize)]
pub struct CreateVenue {
    pub slug: String,
    pub name: String,
    pub address: Option<String>,
    pub city: Option<String>,
    pub region: Option<String>,
    pub postcode: Option<String>,
    pub country: Option<String>,
    pub phone: Option<String>,
    pub email: Option<String>,
    pub website: Option<String>,
    pub description_html: Option<String>,
    pub pricing_text: Option<String>,
    pub capacity_min: Option<i32>,
    pub capacity_max: Option<i32>,
    pub catering_html: Option<String>,
    pub accommodation_html: Option<String>,
    pub ceremony_html: Option<String>,
    pub late_license_html: Option<String>,
    pub header_image_url: Option<String>,
    pub has_accommodation: Option<bool>,
    pub has_inhouse_catering: Option<bool>,
    pub allows_external_catering: Option<bool>,
    pub has_late_license: Option<bool>,
    pub is_exclusive_use: Option<bool>,
    #[serde(default)]
    pub wedding_types: Vec<String>,
    #[serde(default)]
    pub categories: Vec<String>,
    #[serde(default)]
    pub indoor_outdoor: Vec<String>,
    pub published: Option<bool>,
    pub featured: Option<bool>,
    pub sort_order: Option<i32>,
    /// Gallery images in display order.
    #[serde(default)]
    pub gallery: Vec<GalleryImageInput>,
    /// Linked film ids in display order.
    #[serde(default)]
    pub film_ids: Vec<EntityId>,
    /// Similar-venue ids in display order.
    #[serde(default)]
    pub similar_venue_ids: Vec<EntityId>,
}

/// DTO for updating an existing venue. Only non-`None` fields are
/// applied; a supplied collection (including an empty one) replaces
/// the stored collection wholesale.
#[derive(Debug, Clone, Deserialize)]
pub struct UpdateVenue {
    pub slug: Option<String>,
    pub name: Option<String>,
    pub address: Option<String>,
    pub city: Option<String>,
    pub region: Option<String>,
    pub postcode: Option<String>,
    pub country: Option<String>,
    pub phone: Option<String>,
    pub email: Option<String>,
    pub website: Option<String>,
    pub description_html: Option<String>,
    pub pricing_text: Option<String>,
    pub capacity_min: Option<i32>,
    pub capacity_max: Option<i32>,
    pub catering_html: Option<String>,
    pub accommodation_html: Option<String>,
    pub ceremony_html: Option<String>,
    pub late_license_html: Option<String>,
    pub header_image_url: Option<String>,
    pub has_accommodation: Option<bool>,
    pub has_inhouse_catering: Option<bool>,
    pub allows_external_catering: Option<bool>,
    pub has_late_license: Option<bool>,
    pub is_exclusive_use: Option<bool>,
    pub wedding_types: Option<Vec<String>>,
    pub categories: Option<Vec<String>>,
    pub indoor_outdoor: Option<Vec<String>>,
    pub published: Option<bool>,
    pub featured: Option<bool>,
    pub sort_order: Option<i32>,
    pub gallery: Option<Vec<GalleryImageInput>>,
    pub film_ids: Option<Vec<EntityId>>,
    pub similar_venue_ids: Option<Vec<EntityId>>,
}
