//! Client for the hosted vision model (xAI, OpenAI-compatible API).
//!
//! The rest of the crate only sees the `ChatCompletions` capability, so
//! handlers can be exercised against a stub.

mod types;

pub use types::*;

use async_trait::async_trait;
use reqwest::Client;
use std::time::Instant;

use crate::config::{UpstreamConfig, DEFAULT_BASE_URL};
use crate::error::CriticError;
use crate::http::create_client;

/// Longest slice of an upstream error body carried into our error message.
const ERROR_BODY_LIMIT: usize = 500;

/// Create a chat completion given a model id and messages.
#[async_trait]
pub trait ChatCompletions: Send + Sync {
    async fn create_chat_completion(
        &self,
        request: &ChatCompletionRequest,
    ) -> Result<ChatCompletionResponse, CriticError>;
}

/// reqwest-backed client for `{base_url}/chat/completions`.
#[derive(Clone)]
pub struct UpstreamClient {
    client: Client,
    base_url: String,
    api_key: Option<String>,
}

impl UpstreamClient {
    pub fn new(api_key: Option<String>) -> Self {
        Self {
            client: Client::new(),
            base_url: DEFAULT_BASE_URL.to_string(),
            api_key,
        }
    }

    /// Build from the `[upstream]` config section.
    pub fn from_config(config: &UpstreamConfig) -> Result<Self, CriticError> {
        let client = create_client(config.timeout())
            .map_err(|e| CriticError::Internal(format!("Failed to create HTTP client: {}", e)))?;
        Ok(Self::new(config.api_key.clone())
            .with_client(client)
            .with_base_url(&config.base_url))
    }

    pub fn with_base_url(mut self, url: &str) -> Self {
        self.base_url = url.trim_end_matches('/').to_string();
        self
    }

    pub fn with_client(mut self, client: Client) -> Self {
        self.client = client;
        self
    }

    pub fn endpoint(&self) -> String {
        format!("{}/chat/completions", self.base_url)
    }
}

#[async_trait]
impl ChatCompletions for UpstreamClient {
    async fn create_chat_completion(
        &self,
        request: &ChatCompletionRequest,
    ) -> Result<ChatCompletionResponse, CriticError> {
        let api_key = self.api_key.as_deref().ok_or(CriticError::ApiKeyMissing)?;
        let url = self.endpoint();
        let started = Instant::now();

        tracing::debug!(%url, model = %request.model, "sending chat completion");

        let response = self
            .client
            .post(&url)
            .bearer_auth(api_key)
            .json(request)
            .send()
            .await
            .map_err(|e| CriticError::UpstreamError(format!("Request failed: {}", e)))?;

        let status = response.status();
        let text = response
            .text()
            .await
            .map_err(|e| CriticError::UpstreamError(format!("Failed to read body: {}", e)))?;

        tracing::info!(
            status = status.as_u16(),
            elapsed_ms = started.elapsed().as_millis() as u64,
            model = %request.model,
            "upstream responded"
        );

        if !status.is_success() {
            return Err(CriticError::UpstreamError(format!(
                "{} | Response: {}",
                status,
                truncate(&text, ERROR_BODY_LIMIT)
            )));
        }

        serde_json::from_str(&text).map_err(|e| {
            CriticError::ParseError(format!(
                "{} | Response: {}",
                e,
                truncate(&text, ERROR_BODY_LIMIT)
            ))
        })
    }
}

/// Cut `text` to at most `limit` bytes without splitting a character.
fn truncate(text: &str, limit: usize) -> &str {
    if text.len() <= limit {
        return text;
    }
    let mut end = limit;
    while !text.is_char_boundary(end) {
        end -= 1;
    }
    &text[..end]
}
