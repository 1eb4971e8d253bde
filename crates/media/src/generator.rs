//! AI draft generation behind a trait, implemented against Perplexity.
//!
//! The generator produces a set of draft fields for a blog post. It
//! never persists anything; the admin reviews the draft and submits it
//! through the normal create flow.

use std::time::Duration;

use serde::{Deserialize, Serialize};

use crate::error::MediaError;

/// HTTP timeout for a generation call. Chat completions are slow.
const GENERATION_TIMEOUT: Duration = Duration::from_secs(60);

const DEFAULT_MODEL: &str = "sonar";

const SYSTEM_PROMPT: &str = "You write blog posts for a wedding videography studio's website. \
Respond with a single JSON object and nothing else. Use exactly these keys: \
\"title\", \"excerpt\", \"body_html\", \"meta_title\", \"meta_description\", \"category\". \
body_html must be valid HTML using only p, h2, h3, ul and li tags. \
excerpt is one or two sentences. category is a single lowercase word.";

/// Draft fields returned by a generator, ready to prefill the editor.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DraftFields {
    pub title: String,
    pub excerpt: Option<String>,
    pub body_html: Option<String>,
    pub meta_title: Option<String>,
    pub meta_description: Option<String>,
    pub category: Option<String>,
}

/// Content generation trait.
#[async_trait::async_trait]
pub trait ContentGenerator: Send + Sync {
    /// Produce draft fields for a blog post about `topic`.
    async fn draft_post(&self, topic: &str) -> Result<DraftFields, MediaError>;
}

/// HTTP client for the Perplexity chat completions API.
pub struct PerplexityClient {
    client: reqwest::Client,
    api_key: String,
    base_url: String,
    model: String,
}

#[derive(Debug, Deserialize)]
struct ChatResponse {
    choices: Vec<Choice>,
}

#[derive(Debug, Deserialize)]
struct Choice {
    message: ChatMessage,
}

#[derive(Debug, Deserialize)]
struct ChatMessage {
    content: String,
}

impl PerplexityClient {
    /// Create a client against the production Perplexity endpoint.
    pub fn new(api_key: String) -> Self {
        Self::with_base_url(api_key, "https://api.perplexity.ai".to_string())
    }

    /// Create a client against a custom endpoint (used by tests).
    pub fn with_base_url(api_key: String, base_url: String) -> Self {
        let client = reqwest::Client::builder()
            .timeout(GENERATION_TIMEOUT)
            .build()
            .expect("Failed to build reqwest HTTP client");
        Self {
            client,
            api_key,
            base_url,
            model: DEFAULT_MODEL.to_string(),
        }
    }

    // ---- private helpers ----

    /// Ensure the response has a success status code.
    async fn ensure_success(response: reqwest::Response) -> Result<reqwest::Response, MediaError> {
        let status = response.status();
        if !status.is_success() {
            let body = response
                .text()
                .await
                .unwrap_or_else(|_| "<unreadable body>".to_string());
            return Err(MediaError::Upstream {
                service: "perplexity",
                status: status.as_u16(),
                body,
            });
        }
        Ok(response)
    }
}

#[async_trait::async_trait]
impl ContentGenerator for PerplexityClient {
    async fn draft_post(&self, topic: &str) -> Result<DraftFields, MediaError> {
        let body = serde_json::json!({
            "model": self.model,
            "messages": [
                { "role": "system", "content": SYSTEM_PROMPT },
                { "role": "user", "content": topic },
            ],
        });

        let response = self
            .client
            .post(format!("{}/chat/completions", self.base_url))
            .bearer_auth(&self.api_key)
            .json(&body)
            .send()
            .await?;
        let response = Self::ensure_success(response).await?;
        let chat: ChatResponse = response.json().await?;

        let content = chat
            .choices
            .into_iter()
            .next()
            .map(|choice| choice.message.content)
            .ok_or(MediaError::InvalidResponse {
                service: "perplexity",
                detail: "no choices in response".to_string(),
            })?;

        let json = strip_code_fence(&content);
        serde_json::from_str(json).map_err(|e| MediaError::InvalidResponse {
            service: "perplexity",
            detail: format!("draft is not the expected JSON: {e}"),
        })
    }
}

/// Strip a Markdown code fence if the model wrapped its JSON in one.
fn strip_code_fence(content: &str) -> &str {
    let trimmed = content.trim();
    let Some(rest) = trimmed.strip_prefix("```") else {
        return trimmed;
    };
    // Drop the info string ("json") on the opening fence line.
    let rest = rest.split_once('\n').map_or(rest, |(_, body)| body);
    rest.strip_suffix("```").unwrap_or(rest).trim()
}
