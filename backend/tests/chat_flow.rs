//! End-to-end behaviour of the chat relay.

#[expect(
    dead_code,
    reason = "Upload helpers are only used by the wardrobe suite."
)]
#[path = "support/harness.rs"]
mod harness;

use actix_web::http::StatusCode;
use actix_web::test as actix_test;
use harness::World;
use rstest::{fixture, rstest};
use serde_json::{Value, json};
use wardrobe::domain::ChatCompletion;
use wardrobe::domain::ports::ChatCompletionSourceError;

#[fixture]
fn world() -> World {
    World::new()
}

fn chat(body: &Value) -> actix_http::Request {
    actix_test::TestRequest::post()
        .uri("/api/chat")
        .set_json(body)
        .to_request()
}

#[rstest]
#[actix_web::test]
async fn transcript_and_completion_pass_through_unchanged(world: World) {
    let completion = json!({
        "id": "chatcmpl-1",
        "choices": [{ "message": { "role": "assistant", "content": "Try white sneakers." } }],
    });
    world.chat.push(Ok(ChatCompletion(completion.clone())));
    let app = actix_test::init_service(world.app()).await;

    let transcript = json!([
        { "role": "system", "content": "You are a stylist." },
        { "role": "user", "content": "What goes with navy chinos?", "name": "sam" },
    ]);
    let response = actix_test::call_service(&app, chat(&json!({ "messages": transcript }))).await;

    assert_eq!(response.status(), StatusCode::OK);
    let body: Value = actix_test::read_body_json(response).await;
    assert_eq!(body, completion);

    let received = world.chat.received();
    assert_eq!(received.len(), 1);
    let forwarded = serde_json::to_value(&received[0]).expect("serialise transcript");
    assert_eq!(forwarded, transcript);
}

#[rstest]
#[case::multimodal_content(json!({
    "role": "user",
    "content": [{ "type": "text", "text": "Does this jacket fit the brief?" }],
}))]
#[case::null_content_with_tool_calls(json!({
    "role": "assistant",
    "content": null,
    "tool_calls": [{ "id": "call_1", "type": "function" }],
}))]
#[case::missing_content(json!({ "role": "assistant" }))]
#[actix_web::test]
async fn provider_shaped_turns_reach_the_provider_untouched(world: World, #[case] turn: Value) {
    world.chat.push(Ok(ChatCompletion(json!({ "choices": [] }))));
    let app = actix_test::init_service(world.app()).await;

    let transcript = json!([{ "role": "user", "content": "Hello" }, turn]);
    let response = actix_test::call_service(&app, chat(&json!({ "messages": transcript }))).await;

    assert_eq!(response.status(), StatusCode::OK);
    let received = world.chat.received();
    assert_eq!(received.len(), 1);
    let forwarded = serde_json::to_value(&received[0]).expect("serialise transcript");
    assert_eq!(forwarded, transcript);
}

#[rstest]
#[case::missing_key(ChatCompletionSourceError::missing_credentials(), "missing_credentials")]
#[case::rejected(
    ChatCompletionSourceError::rejected(401_u16, "Incorrect API key provided"),
    "rejected"
)]
#[case::timeout(ChatCompletionSourceError::timeout("deadline elapsed"), "timeout")]
#[actix_web::test]
async fn provider_failures_surface_as_upstream_errors(
    world: World,
    #[case] failure: ChatCompletionSourceError,
    #[case] detail_code: &str,
) {
    let message = failure.to_string();
    world.chat.push(Err(failure));
    let app = actix_test::init_service(world.app()).await;

    let response = actix_test::call_service(
        &app,
        chat(&json!({ "messages": [{ "role": "user", "content": "hi" }] })),
    )
    .await;

    assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);
    let body: Value = actix_test::read_body_json(response).await;
    assert_eq!(body["code"], "upstream_error");
    assert_eq!(body["message"], message);
    assert_eq!(body["details"]["code"], detail_code);
}
