mod common;

use axum::http::StatusCode;
use consult_site::config::toml_config::ChatBackend;
use httpmock::prelude::*;
use serde_json::json;

#[tokio::test]
async fn test_chat_returns_non_empty_reply() {
    let server = MockServer::start_async().await;
    let router = common::router(common::site_config(&server.base_url()));

    let (status, body) = common::send(
        router,
        common::json_post(
            "/api/chat",
            json!({
                "message": "What does a discovery sprint cost?",
                "history": [
                    { "role": "assistant", "content": "Hi there! What can I help you with today?" }
                ]
            }),
        ),
    )
    .await;

    assert_eq!(status, StatusCode::OK);
    let reply = body["reply"].as_str().unwrap();
    assert!(!reply.trim().is_empty());
}

#[tokio::test]
async fn test_chat_unmatched_message_still_replies() {
    let server = MockServer::start_async().await;
    let router = common::router(common::site_config(&server.base_url()));

    let (status, body) = common::send(
        router,
        common::json_post("/api/chat", json!({ "message": "zzz" })),
    )
    .await;

    assert_eq!(status, StatusCode::OK);
    assert!(!body["reply"].as_str().unwrap().is_empty());
}

#[tokio::test]
async fn test_chat_blank_message_returns_400() {
    let server = MockServer::start_async().await;
    let router = common::router(common::site_config(&server.base_url()));

    let (status, _) = common::send(
        router,
        common::json_post("/api/chat", json!({ "message": "   ", "history": [] })),
    )
    .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn test_chat_overlong_message_returns_400() {
    let server = MockServer::start_async().await;
    let mut config = common::site_config(&server.base_url());
    config.chat.max_message_chars = 10;
    let router = common::router(config);

    let (status, _) = common::send(
        router,
        common::json_post("/api/chat", json!({ "message": "this is far too long" })),
    )
    .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn test_chat_llm_backend_forwards_trimmed_history() {
    let server = MockServer::start_async().await;
    let llm = server
        .mock_async(|when, then| {
            when.method(POST)
                .path("/v1/chat/completions")
                .header("authorization", "Bearer sk-llm")
                .body_contains("second turn")
                .body_contains("Do you work with startups?");
            then.status(200).json_body(json!({
                "choices": [{ "message": { "role": "assistant", "content": "Yes, regularly." } }]
            }));
        })
        .await;

    let mut config = common::site_config(&server.base_url());
    config.chat.backend = ChatBackend::Llm;
    config.chat.max_history = 1;
    config.chat.llm.api_url = server.url("/v1/chat/completions");
    config.chat.llm.api_key = "sk-llm".to_string();
    let router = common::router(config);

    let (status, body) = common::send(
        router,
        common::json_post(
            "/api/chat",
            json!({
                "message": "Do you work with startups?",
                "history": [
                    { "role": "user", "content": "first turn" },
                    { "role": "assistant", "content": "second turn" }
                ]
            }),
        ),
    )
    .await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["reply"], "Yes, regularly.");
    llm.assert_async().await;
}

#[tokio::test]
async fn test_chat_llm_failure_returns_500_without_fallback() {
    let server = MockServer::start_async().await;
    server
        .mock_async(|when, then| {
            when.method(POST).path("/v1/chat/completions");
            then.status(429).body("rate limited");
        })
        .await;

    let mut config = common::site_config(&server.base_url());
    config.chat.backend = ChatBackend::Llm;
    config.chat.llm.api_url = server.url("/v1/chat/completions");
    config.chat.llm.api_key = "sk-llm".to_string();

    let (status, body) = common::send(
        common::router(config.clone()),
        common::json_post("/api/chat", json!({ "message": "pricing?" })),
    )
    .await;
    assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
    assert!(body["error"].is_string());

    config.chat.fallback_to_canned = true;
    let (status, body) = common::send(
        common::router(config),
        common::json_post("/api/chat", json!({ "message": "pricing?" })),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert!(!body["reply"].as_str().unwrap().is_empty());
}
