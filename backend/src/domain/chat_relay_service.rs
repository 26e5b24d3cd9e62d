//! Chat relay service.
//!
//! Forwards transcripts to a [`ChatCompletionSource`] without inspecting
//! them. Provider failures become `upstream_error` with the provider message
//! intact.

use std::sync::Arc;

use async_trait::async_trait;
use serde_json::json;

use crate::domain::ports::{ChatCompletionSource, ChatCompletionSourceError, ChatRelay};
use crate::domain::{ChatCompletion, ChatMessage, Error};

/// Relay implementing [`ChatRelay`] over a completion source.
#[derive(Clone)]
pub struct ChatRelayService<S> {
    source: Arc<S>,
}

impl<S> ChatRelayService<S> {
    pub fn new(source: Arc<S>) -> Self {
        Self { source }
    }
}

fn map_source_error(error: ChatCompletionSourceError) -> Error {
    let message = error.to_string();
    let details = match &error {
        ChatCompletionSourceError::MissingCredentials => json!({ "code": "missing_credentials" }),
        ChatCompletionSourceError::Timeout { .. } => json!({ "code": "timeout" }),
        ChatCompletionSourceError::Transport { .. } => json!({ "code": "transport" }),
        ChatCompletionSourceError::Rejected { status, .. } => {
            json!({ "code": "rejected", "status": status })
        }
        ChatCompletionSourceError::Decode { .. } => json!({ "code": "decode" }),
    };
    Error::upstream(message).with_details(details)
}

#[async_trait]
impl<S> ChatRelay for ChatRelayService<S>
where
    S: ChatCompletionSource,
{
    async fn relay(&self, messages: Vec<ChatMessage>) -> Result<ChatCompletion, Error> {
        self.source.complete(&messages).await.map_err(|error| {
            let last_role = messages.last().and_then(ChatMessage::role).unwrap_or("-");
            tracing::warn!(%error, turns = messages.len(), last_role, "chat provider call failed");
            map_source_error(error)
        })
    }
}
