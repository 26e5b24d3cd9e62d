//! Chat transcript and completion payload types.
//!
//! The relay forwards transcripts untouched, so both types wrap raw JSON.
//! A turn is never checked for shape: multimodal `content` arrays, `null`
//! content beside `tool_calls`, or turns without `content` all pass through.

use serde::{Deserialize, Serialize};
use serde_json::{Value, json};
use utoipa::ToSchema;

/// One role-tagged conversation turn, kept exactly as the caller sent it.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
#[serde(transparent)]
#[schema(
    value_type = Object,
    example = json!({"role": "user", "content": "What goes with navy chinos?"})
)]
pub struct ChatMessage(Value);

impl ChatMessage {
    /// Build a plain text turn.
    pub fn new(role: impl Into<String>, content: impl Into<String>) -> Self {
        Self(json!({ "role": role.into(), "content": content.into() }))
    }

    /// The `role` tag, when the turn carries a string one.
    pub fn role(&self) -> Option<&str> {
        self.0.get("role").and_then(Value::as_str)
    }

    /// The `content` value in whatever form the caller used.
    pub fn content(&self) -> Option<&Value> {
        self.0.get("content")
    }
}

impl From<Value> for ChatMessage {
    fn from(value: Value) -> Self {
        Self(value)
    }
}

/// Completion payload exactly as the provider returned it.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
#[serde(transparent)]
#[schema(value_type = Object)]
pub struct ChatCompletion(pub Value);
