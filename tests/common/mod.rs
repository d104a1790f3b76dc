#![allow(dead_code)]

use axum::body::Body;
use axum::http::{header, Request, StatusCode};
use axum::Router;
use consult_site::{build_router, AppState, SessionSigner, SiteConfig};
use tower::ServiceExt;

pub const SESSION_SECRET: &str = "integration-test-session-secret";

/// Config with every outbound integration pointed at `base_url`.
pub fn config_toml(base_url: &str) -> String {
    format!(
        r#"
[server]
upstream_timeout_seconds = 5
max_upload_bytes = 1024

[mail]
api_url = "{base_url}/emails"
api_key = "re_test"
from = "Website <noreply@consultancy.test>"
contact_recipient = "hello@consultancy.test"
careers_recipient = "careers@consultancy.test"

[payment]
api_base = "{base_url}"
secret_key = "sk_test_123"
success_url = "https://consultancy.test/success"
cancel_url = "https://consultancy.test/pricing"

[[payment.plans]]
name = "Discovery Sprint"
price_id = "price_discovery"
display_price = "$4,900"

[[payment.plans]]
name = "Engineering Retainer"
price_id = "price_retainer"
mode = "subscription"

[auth]
session_secret = "{SESSION_SECRET}"

[webhook]
enrich_url = "{base_url}/webhook/enrich"
"#
    )
}

pub fn site_config(base_url: &str) -> SiteConfig {
    let config = SiteConfig::from_toml_str(&config_toml(base_url)).expect("test config parses");
    consult_site::utils::validation::Validate::validate(&config).expect("test config is valid");
    config
}

pub fn router(config: SiteConfig) -> Router {
    build_router(AppState::from_config(config).expect("state builds"))
}

pub fn session_token(email: &str) -> String {
    SessionSigner::new(SESSION_SECRET)
        .issue(email, chrono::Duration::hours(1))
        .expect("session token signs")
}

pub fn json_post(path: &str, body: serde_json::Value) -> Request<Body> {
    Request::builder()
        .method("POST")
        .uri(path)
        .header(header::CONTENT_TYPE, "application/json")
        .body(Body::from(body.to_string()))
        .expect("request builds")
}

pub fn get(path: &str) -> Request<Body> {
    Request::builder()
        .method("GET")
        .uri(path)
        .body(Body::empty())
        .expect("request builds")
}

/// Drives one request through the router; non-JSON bodies come back as `Null`.
pub async fn send(router: Router, request: Request<Body>) -> (StatusCode, serde_json::Value) {
    let response = router.oneshot(request).await.expect("router is infallible");
    let status = response.status();
    let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
        .await
        .expect("body readable");
    let json = serde_json::from_slice(&bytes).unwrap_or(serde_json::Value::Null);
    (status, json)
}
