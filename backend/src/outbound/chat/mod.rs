//! Chat-completion provider adapter.

mod http_source;

pub use http_source::{ChatSourceBuildError, OpenAiChatConfig, OpenAiChatSource};
