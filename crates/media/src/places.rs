//! Google Places API client for venue photo lookup.
//!
//! Uses the Places API (New) text search to find a venue, then builds
//! photo media URLs from the returned photo resource names. Fetching
//! the media URL follows a redirect to the actual image bytes.

use std::time::Duration;

use serde::Deserialize;

use crate::error::MediaError;

/// HTTP timeout for places lookups and photo downloads.
const PLACES_TIMEOUT: Duration = Duration::from_secs(15);

/// Fields requested from the text search; photos are all we need.
const SEARCH_FIELD_MASK: &str = "places.photos";

/// Widest edge requested for photo media.
const PHOTO_MAX_WIDTH_PX: u32 = 1600;

/// HTTP client for the Google Places API.
pub struct PlacesClient {
    client: reqwest::Client,
    api_key: String,
    base_url: String,
}

#[derive(Debug, Deserialize)]
struct SearchResponse {
    #[serde(default)]
    places: Vec<Place>,
}

#[derive(Debug, Deserialize)]
struct Place {
    #[serde(default)]
    photos: Vec<Photo>,
}

#[derive(Debug, Deserialize)]
struct Photo {
    /// Resource name, e.g. `places/XXX/photos/YYY`.
    name: String,
}

impl PlacesClient {
    /// Create a client against the production Places endpoint.
    pub fn new(api_key: String) -> Self {
        Self::with_base_url(api_key, "https://places.googleapis.com".to_string())
    }

    /// Create a client against a custom endpoint (used by tests).
    pub fn with_base_url(api_key: String, base_url: String) -> Self {
        let client = reqwest::Client::builder()
            .timeout(PLACES_TIMEOUT)
            .build()
            .expect("Failed to build reqwest HTTP client");
        Self {
            client,
            api_key,
            base_url,
        }
    }

    /// Text-search a venue and return up to `limit` photo media URLs.
    ///
    /// Only the first search hit is used; a venue name plus city is
    /// specific enough that further hits are noise.
    pub async fn photo_urls(
        &self,
        venue_name: &str,
        city: Option<&str>,
        limit: usize,
    ) -> Result<Vec<String>, MediaError> {
        let text_query = match city {
            Some(city) => format!("{venue_name}, {city}"),
            None => venue_name.to_string(),
        };
        let body = serde_json::json!({ "textQuery": text_query });

        let response = self
            .client
            .post(format!("{}/v1/places:searchText", self.base_url))
            .header("X-Goog-Api-Key", &self.api_key)
            .header("X-Goog-FieldMask", SEARCH_FIELD_MASK)
            .json(&body)
            .send()
            .await?;
        let response = Self::ensure_success(response).await?;
        let search: SearchResponse = response.json().await?;

        let Some(place) = search.places.into_iter().next() else {
            return Ok(Vec::new());
        };

        let urls = place
            .photos
            .into_iter()
            .take(limit)
            .map(|photo| self.media_url(&photo.name))
            .collect();
        Ok(urls)
    }

    /// Download a photo, returning its bytes and content type.
    pub async fn fetch_photo(&self, url: &str) -> Result<(Vec<u8>, String), MediaError> {
        let response = self.client.get(url).send().await?;
        let response = Self::ensure_success(response).await?;

        let content_type = response
            .headers()
            .get(reqwest::header::CONTENT_TYPE)
            .and_then(|value| value.to_str().ok())
            .unwrap_or("image/jpeg")
            .to_string();
        let bytes = response.bytes().await?;
        Ok((bytes.to_vec(), content_type))
    }

    // ---- private helpers ----

    fn media_url(&self, photo_name: &str) -> String {
        format!(
            "{}/v1/{}/media?maxWidthPx={}&key={}",
            self.base_url, photo_name, PHOTO_MAX_WIDTH_PX, self.api_key
        )
    }

    /// Ensure the response has a success status code.
    async fn ensure_success(response: reqwest::Response) -> Result<reqwest::Response, MediaError> {
        let status = response.status();
        if !status.is_success() {
            let body = response
                .text()
                .await
                .unwrap_or_else(|_| "<unreadable body>".to_string());
            return Err(MediaError::Upstream {
                service: "places",
                status: status.as_u16(),
                body,
            });
        }
        Ok(response)
    }
}
