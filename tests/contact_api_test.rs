mod common;

use axum::http::StatusCode;
use httpmock::prelude::*;
use serde_json::json;

fn valid_form() -> serde_json::Value {
    json!({
        "name": "Ada Lovelace",
        "email": "ada@example.com",
        "subject": "Analytics engine",
        "message": "We would like a quote for a data platform."
    })
}

#[tokio::test]
async fn test_contact_missing_email_returns_400() {
    let server = MockServer::start_async().await;
    let mail = server
        .mock_async(|when, then| {
            when.method(POST).path("/emails");
            then.status(200);
        })
        .await;

    let router = common::router(common::site_config(&server.base_url()));
    let mut form = valid_form();
    form.as_object_mut().unwrap().remove("email");

    let (status, body) = common::send(router, common::json_post("/api/contact", form)).await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert!(body["error"].as_str().unwrap().contains("email"));
    assert_eq!(mail.hits_async().await, 0);
}

#[tokio::test]
async fn test_contact_bad_email_format_returns_400() {
    let server = MockServer::start_async().await;
    let router = common::router(common::site_config(&server.base_url()));
    let mut form = valid_form();
    form["email"] = json!("not-an-address");

    let (status, _) = common::send(router, common::json_post("/api/contact", form)).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn test_contact_malformed_json_returns_400() {
    let server = MockServer::start_async().await;
    let router = common::router(common::site_config(&server.base_url()));
    let request = axum::http::Request::builder()
        .method("POST")
        .uri("/api/contact")
        .header("content-type", "application/json")
        .body(axum::body::Body::from("{\"name\": "))
        .unwrap();

    let (status, body) = common::send(router, request).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert!(body["error"].is_string());
}

#[tokio::test]
async fn test_contact_relays_email() {
    let server = MockServer::start_async().await;
    let mail = server
        .mock_async(|when, then| {
            when.method(POST)
                .path("/emails")
                .header("authorization", "Bearer re_test")
                .body_contains("hello@consultancy.test")
                .body_contains("\"reply_to\":\"ada@example.com\"")
                .body_contains("Analytics engine");
            then.status(200).json_body(json!({ "id": "email_123" }));
        })
        .await;

    let router = common::router(common::site_config(&server.base_url()));
    let (status, body) = common::send(router, common::json_post("/api/contact", valid_form())).await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["message"], "Email sent successfully");
    mail.assert_async().await;
}

#[tokio::test]
async fn test_contact_mail_failure_returns_500() {
    let server = MockServer::start_async().await;
    server
        .mock_async(|when, then| {
            when.method(POST).path("/emails");
            then.status(500).body("provider outage");
        })
        .await;

    let router = common::router(common::site_config(&server.base_url()));
    let (status, body) = common::send(router, common::json_post("/api/contact", valid_form())).await;

    assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
    assert_eq!(body["error"], "Failed to send email");
}

#[tokio::test]
async fn test_contact_get_is_method_not_allowed() {
    let server = MockServer::start_async().await;
    let router = common::router(common::site_config(&server.base_url()));

    let (status, _) = common::send(router, common::get("/api/contact")).await;
    assert_eq!(status, StatusCode::METHOD_NOT_ALLOWED);
}
