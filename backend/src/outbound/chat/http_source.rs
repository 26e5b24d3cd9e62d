//! Reqwest-backed completion source for OpenAI-compatible providers.
//!
//! The adapter owns transport details only: request shape, bearer auth,
//! timeout, and mapping of HTTP failures. Response bodies are passed back as
//! opaque JSON.

use std::time::Duration;

use async_trait::async_trait;
use reqwest::{Client, StatusCode, Url};
use serde::Serialize;
use serde_json::Value;
use zeroize::Zeroizing;

use crate::domain::ports::{ChatCompletionSource, ChatCompletionSourceError};
use crate::domain::{ChatCompletion, ChatMessage};

const COMPLETIONS_PATH: &str = "chat/completions";

/// Errors raised while constructing the adapter.
#[derive(Debug, thiserror::Error)]
pub enum ChatSourceBuildError {
    #[error("invalid chat API base URL: {0}")]
    InvalidBase(#[from] url::ParseError),
    #[error("failed to build HTTP client: {0}")]
    Client(#[from] reqwest::Error),
}

/// Provider endpoint, model, and credentials.
pub struct OpenAiChatConfig {
    /// Base URL such as `https://api.openai.com/v1`.
    pub api_base: String,
    pub model: String,
    /// `None` defers the failure to the first call.
    pub api_key: Option<Zeroizing<String>>,
    pub timeout: Duration,
}

/// Completion source posting to `<api_base>/chat/completions`.
pub struct OpenAiChatSource {
    client: Client,
    endpoint: Url,
    model: String,
    api_key: Option<Zeroizing<String>>,
}

#[derive(Serialize)]
struct CompletionRequest<'a> {
    model: &'a str,
    messages: &'a [ChatMessage],
}

impl OpenAiChatSource {
    /// Build the adapter with a client bounded by the configured timeout.
    ///
    /// # Errors
    ///
    /// Fails when the base URL does not parse or the client cannot be built.
    pub fn new(config: OpenAiChatConfig) -> Result<Self, ChatSourceBuildError> {
        let endpoint = completions_endpoint(&config.api_base)?;
        let client = Client::builder().timeout(config.timeout).build()?;
        let api_key = config.api_key.filter(|key| !key.trim().is_empty());
        Ok(Self {
            client,
            endpoint,
            model: config.model,
            api_key,
        })
    }
}

fn completions_endpoint(api_base: &str) -> Result<Url, url::ParseError> {
    let mut base = Url::parse(api_base.trim())?;
    if !base.path().ends_with('/') {
        let path = format!("{}/", base.path());
        base.set_path(&path);
    }
    base.join(COMPLETIONS_PATH)
}

#[async_trait]
impl ChatCompletionSource for OpenAiChatSource {
    async fn complete(
        &self,
        messages: &[ChatMessage],
    ) -> Result<ChatCompletion, ChatCompletionSourceError> {
        let api_key = self
            .api_key
            .as_ref()
            .ok_or_else(ChatCompletionSourceError::missing_credentials)?;

        let response = self
            .client
            .post(self.endpoint.clone())
            .bearer_auth(api_key.as_str())
            .json(&CompletionRequest {
                model: &self.model,
                messages,
            })
            .send()
            .await
            .map_err(map_transport_error)?;

        let status = response.status();
        let body = response.bytes().await.map_err(map_transport_error)?;
        if !status.is_success() {
            return Err(map_status_error(status, body.as_ref()));
        }

        serde_json::from_slice::<Value>(body.as_ref())
            .map(ChatCompletion)
            .map_err(|error| ChatCompletionSourceError::decode(error.to_string()))
    }
}

fn map_transport_error(error: reqwest::Error) -> ChatCompletionSourceError {
    if error.is_timeout() {
        ChatCompletionSourceError::timeout(error.to_string())
    } else {
        ChatCompletionSourceError::transport(error.to_string())
    }
}

/// Prefer the provider's own `error.message`; fall back to a body preview.
fn map_status_error(status: StatusCode, body: &[u8]) -> ChatCompletionSourceError {
    let provider_message = serde_json::from_slice::<Value>(body)
        .ok()
        .and_then(|value| {
            value
                .pointer("/error/message")
                .and_then(Value::as_str)
                .map(str::trim)
                .filter(|message| !message.is_empty())
                .map(str::to_owned)
        });

    let message = provider_message.unwrap_or_else(|| {
        let preview = body_preview(body);
        if preview.is_empty() {
            format!("status {}", status.as_u16())
        } else {
            format!("status {}: {preview}", status.as_u16())
        }
    });
    ChatCompletionSourceError::rejected(status.as_u16(), message)
}

fn body_preview(body: &[u8]) -> String {
    const PREVIEW_CHAR_LIMIT: usize = 160;

    let compact = String::from_utf8_lossy(body)
        .split_whitespace()
        .collect::<Vec<_>>()
        .join(" ");
    let preview = compact.chars().take(PREVIEW_CHAR_LIMIT).collect::<String>();
    if compact.chars().count() > PREVIEW_CHAR_LIMIT {
        format!("{preview}...")
    } else {
        preview
    }
}

#[cfg(test)]
#[path = "http_source_tests.rs"]
mod tests;
