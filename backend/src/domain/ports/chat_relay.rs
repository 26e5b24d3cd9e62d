//! Driving port for the chat relay.

use async_trait::async_trait;
use serde_json::json;

use crate::domain::{ChatCompletion, ChatMessage, Error};

/// Use-case port forwarding a transcript to the completion provider.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait ChatRelay: Send + Sync {
    /// Forward `messages` verbatim and return the provider payload.
    ///
    /// Provider failures surface as `upstream_error` carrying the provider's
    /// message. Nothing is retried.
    async fn relay(&self, messages: Vec<ChatMessage>) -> Result<ChatCompletion, Error>;
}

/// Relay used when no provider is wired up. Every call fails upstream.
#[derive(Debug, Default, Clone, Copy)]
pub struct FixtureChatRelay;

#[async_trait]
impl ChatRelay for FixtureChatRelay {
    async fn relay(&self, _messages: Vec<ChatMessage>) -> Result<ChatCompletion, Error> {
        Err(Error::upstream("chat provider is not configured")
            .with_details(json!({ "code": "provider_unconfigured" })))
    }
}
