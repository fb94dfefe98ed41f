//! HTTP completion client.
//!
//! Talks to any OpenAI-compatible `/chat/completions` endpoint:
//! - Bearer credential header
//! - JSON body `{model, messages: [{role, content}, …]}`
//! - Answer text at `choices[0].message.content`
//!
//! Non-2xx statuses are failures carrying the status code and response body
//! for diagnostics. The client is built with a request timeout so a hung
//! upstream surfaces as an ordinary failure instead of pending forever.

use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use tracing::{debug, warn};

use atlas_config::AppConfig;
use atlas_core::completion::{CompletionClient, CompletionRequest};
use atlas_core::error::CompletionError;

const DEFAULT_BASE_URL: &str = "https://api.perplexity.ai";
const DEFAULT_TIMEOUT_SECS: u64 = 60;

/// A completion client for OpenAI-compatible chat endpoints.
pub struct HttpCompletionClient {
    name: String,
    base_url: String,
    api_key: String,
    client: reqwest::Client,
}

impl HttpCompletionClient {
    /// Create a new client with the default base URL and timeout.
    pub fn new(api_key: impl Into<String>) -> Self {
        Self::with_timeout(api_key, DEFAULT_TIMEOUT_SECS)
    }

    /// Create a new client with an explicit request timeout.
    pub fn with_timeout(api_key: impl Into<String>, timeout_secs: u64) -> Self {
        let client = reqwest::Client::builder()
            .timeout(std::time::Duration::from_secs(timeout_secs))
            .build()
            .expect("Failed to create HTTP client");

        Self {
            name: "http".into(),
            base_url: DEFAULT_BASE_URL.into(),
            api_key: api_key.into(),
            client,
        }
    }

    /// Override the base URL (e.g. for testing or proxies).
    pub fn with_base_url(mut self, base_url: impl Into<String>) -> Self {
        self.base_url = base_url.into().trim_end_matches('/').to_string();
        self
    }

    /// Build a client from the application configuration.
    ///
    /// Returns an authentication error when no API key is configured, so
    /// the problem is reported at startup rather than on the first call.
    pub fn from_config(config: &AppConfig) -> Result<Self, CompletionError> {
        let api_key = config.api_key.clone().ok_or_else(|| {
            CompletionError::AuthenticationFailed("No API key configured".into())
        })?;
        Ok(Self::with_timeout(api_key, config.request_timeout_secs)
            .with_base_url(config.base_url.clone()))
    }
}

#[async_trait]
impl CompletionClient for HttpCompletionClient {
    fn name(&self) -> &str {
        &self.name
    }

    async fn complete(&self, request: CompletionRequest) -> Result<String, CompletionError> {
        let url = format!("{}/chat/completions", self.base_url);

        debug!(model = %request.model, messages = request.messages.len(), "Sending completion request");

        let response = self
            .client
            .post(&url)
            .header("Authorization", format!("Bearer {}", self.api_key))
            .header("Content-Type", "application/json")
            .json(&request)
            .send()
            .await
            .map_err(|e| CompletionError::Network(e.to_string()))?;

        let status = response.status().as_u16();

        if status == 401 || status == 403 {
            return Err(CompletionError::AuthenticationFailed(
                "Invalid API key or insufficient permissions".into(),
            ));
        }

        if !(200..300).contains(&status) {
            let error_body = response.text().await.unwrap_or_default();
            warn!(status, body = %error_body, "Completion service returned error");
            return Err(CompletionError::Api {
                status_code: status,
                message: error_body,
            });
        }

        let api_response: ApiResponse = response
            .json()
            .await
            .map_err(|e| CompletionError::MalformedResponse(e.to_string()))?;

        extract_answer(api_response)
    }
}

/// Pull the assistant's text out of a parsed response.
fn extract_answer(response: ApiResponse) -> Result<String, CompletionError> {
    let choice = response
        .choices
        .into_iter()
        .next()
        .ok_or_else(|| CompletionError::MalformedResponse("No choices in response".into()))?;

    choice
        .message
        .content
        .ok_or_else(|| CompletionError::MalformedResponse("Choice has no content".into()))
}

// --- Wire types ---

#[derive(Debug, Deserialize)]
struct ApiResponse {
    choices: Vec<ApiChoice>,
}

#[derive(Debug, Deserialize)]
struct ApiChoice {
    message: ApiChoiceMessage,
}

#[derive(Debug, Serialize, Deserialize)]
struct ApiChoiceMessage {
    #[serde(default)]
    content: Option<String>,
}
