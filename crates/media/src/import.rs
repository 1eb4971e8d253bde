//! Venue photo import: places lookup, parallel download, re-upload.

use futures::future;

use crate::error::MediaError;
use crate::places::PlacesClient;
use crate::storage::{extension_for_content_type, ObjectStore};

/// A photo that made it through download and re-upload.
#[derive(Debug, Clone)]
pub struct ImportedPhoto {
    /// Public URL on our own storage, ready for a gallery row.
    pub url: String,
    /// Storage key, kept so the image stays deletable.
    pub key: String,
}

/// Look up a venue on Places and copy up to `limit` photos into our
/// own storage.
///
/// The lookup itself is fatal, but each photo is fetched and uploaded
/// independently; a failed photo is logged and skipped, so the result
/// may hold fewer images than requested. Filenames come from the
/// downloaded content type, not the source URL.
pub async fn import_venue_photos(
    places: &PlacesClient,
    store: &dyn ObjectStore,
    venue_name: &str,
    city: Option<&str>,
    limit: usize,
) -> Result<Vec<ImportedPhoto>, MediaError> {
    let urls = places.photo_urls(venue_name, city, limit).await?;
    if urls.is_empty() {
        tracing::info!(venue_name, "places search returned no photos");
        return Ok(Vec::new());
    }

    let transfers = urls.iter().map(|url| async move {
        let (bytes, content_type) = places.fetch_photo(url).await?;
        let key = photo_key(&content_type);
        let stored = store.put(&key, &bytes, &content_type).await?;
        Ok::<ImportedPhoto, MediaError>(ImportedPhoto {
            url: stored.url,
            key: stored.key,
        })
    });
    let results = future::join_all(transfers).await;

    let mut photos = Vec::new();
    for result in results {
        match result {
            Ok(photo) => photos.push(photo),
            Err(error) => {
                tracing::warn!(venue_name, error = %error, "skipping photo that failed to import");
            }
        }
    }

    tracing::info!(
        venue_name,
        requested = urls.len(),
        imported = photos.len(),
        "venue photo import finished"
    );
    Ok(photos)
}

fn photo_key(content_type: &str) -> String {
    format!(
        "uploads/{}.{}",
        uuid::Uuid::new_v4(),
        extension_for_content_type(content_type)
    )
}
