//! Chat relay HTTP handler.
//!
//! ```text
//! POST /api/chat
//! ```

use actix_web::{post, web};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use crate::domain::{ChatCompletion, ChatMessage};
use crate::inbound::http::ApiResult;
use crate::inbound::http::schemas::ErrorSchema;
use crate::inbound::http::state::HttpState;

/// Conversation transcript in chronological order.
#[derive(Debug, Deserialize, Serialize, ToSchema)]
pub struct ChatRequest {
    pub messages: Vec<ChatMessage>,
}

/// Forward the transcript to the completion provider and return its reply
/// unchanged.
#[utoipa::path(
    post,
    path = "/api/chat",
    request_body = ChatRequest,
    responses(
        (status = 200, description = "Provider completion payload", body = ChatCompletion),
        (status = 500, description = "Provider failure; message passed through", body = ErrorSchema)
    ),
    tags = ["chat"],
    operation_id = "relayChat"
)]
#[post("/chat")]
pub async fn relay_chat(
    state: web::Data<HttpState>,
    payload: web::Json<ChatRequest>,
) -> ApiResult<web::Json<ChatCompletion>> {
    let completion = state.chat.relay(payload.into_inner().messages).await?;
    Ok(web::Json(completion))
}
