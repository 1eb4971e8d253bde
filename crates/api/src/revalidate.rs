//! Webhook delivery for frontend cache revalidation.
//!
//! [`WebhookRevalidator`] POSTs `{ "paths": [...] }` to the configured
//! revalidation endpoint with a shared bearer secret. Delivery is
//! fire-and-forget per the [`Revalidator`] contract: a failed or slow
//! webhook is logged and the admin write succeeds anyway.

use std::time::Duration;

use async_trait::async_trait;
use firstlook_core::revalidate::Revalidator;

use crate::config::RevalidateConfig;

/// HTTP request timeout for a single delivery attempt.
const REQUEST_TIMEOUT: Duration = Duration::from_secs(10);

/// Delivers revalidation requests to the frontend's webhook endpoint.
pub struct WebhookRevalidator {
    client: reqwest::Client,
    url: String,
    secret: String,
}

impl WebhookRevalidator {
    /// Create a delivery client from the revalidation config.
    pub fn new(config: &RevalidateConfig) -> Self {
        let client = reqwest::Client::builder()
            .timeout(REQUEST_TIMEOUT)
            .build()
            .expect("Failed to build reqwest HTTP client");
        Self {
            client,
            url: config.url.clone(),
            secret: config.secret.clone(),
        }
    }

    /// Execute a single POST request and check the response status.
    async fn try_send(&self, paths: &[String]) -> Result<(), String> {
        let payload = serde_json::json!({ "paths": paths });
        let response = self
            .client
            .post(&self.url)
            .bearer_auth(&self.secret)
            .json(&payload)
            .send()
            .await
            .map_err(|e| e.to_string())?;
        if !response.status().is_success() {
            return Err(format!("revalidation returned HTTP {}", response.status()));
        }
        Ok(())
    }
}

#[async_trait]
impl Revalidator for WebhookRevalidator {
    async fn revalidate(&self, paths: &[String]) {
        match self.try_send(paths).await {
            Ok(()) => tracing::debug!(?paths, "Revalidation delivered"),
            Err(e) => tracing::warn!(?paths, error = %e, "Revalidation delivery failed"),
        }
    }
}
