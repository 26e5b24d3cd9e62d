//! Driven port for the external chat-completion provider.

use async_trait::async_trait;

use crate::domain::{ChatCompletion, ChatMessage};

use super::define_port_error;

define_port_error! {
    /// Errors raised by completion provider adapters.
    pub enum ChatCompletionSourceError {
        /// No API key was configured.
        MissingCredentials => "chat provider API key is not configured",
        /// The request did not complete in time.
        Timeout { message: String } => "chat provider request timed out: {message}",
        /// The request could not be sent or the response could not be read.
        Transport { message: String } => "chat provider transport failed: {message}",
        /// The provider answered with a non-success status.
        Rejected { status: u16, message: String } => "{message}",
        /// The provider answered with a body that is not JSON.
        Decode { message: String } => "chat provider response was not valid JSON: {message}",
    }
}

/// Port for sending a transcript to a completion provider.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait ChatCompletionSource: Send + Sync {
    /// Send the transcript and return the provider payload unchanged.
    async fn complete(
        &self,
        messages: &[ChatMessage],
    ) -> Result<ChatCompletion, ChatCompletionSourceError>;
}
