mod common;

use axum::http::StatusCode;
use consult_site::{AppState, SiteError};
use tempfile::TempDir;

const ITINERARY: &str = r#"{
    "title": "Lisbon Engineering Offsite",
    "days": [
        { "day": 1, "title": "Arrival", "location": "Lisbon", "summary": "Check in and dinner",
          "activities": ["Airport pickup", "Welcome dinner"] },
        { "day": 2, "title": "Architecture workshop", "summary": "Whiteboard the platform",
          "activities": ["Event storming", "Roadmap review"] }
    ]
}"#;

#[tokio::test]
async fn test_health_reports_ok() {
    let router = common::router(common::site_config("http://127.0.0.1:9"));
    let (status, body) = common::send(router, common::get("/api/health")).await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["status"], "ok");
    assert_eq!(body["version"], env!("CARGO_PKG_VERSION"));
}

#[tokio::test]
async fn test_pricing_lists_configured_plans() {
    let router = common::router(common::site_config("http://127.0.0.1:9"));
    let (status, body) = common::send(router, common::get("/api/pricing")).await;

    assert_eq!(status, StatusCode::OK);
    let plans = body["plans"].as_array().unwrap();
    assert_eq!(plans.len(), 2);
    assert_eq!(plans[0]["price_id"], "price_discovery");
    assert_eq!(plans[1]["mode"], "subscription");
}

#[tokio::test]
async fn test_itinerary_overview_and_day() -> anyhow::Result<()> {
    let dir = TempDir::new()?;
    let path = dir.path().join("itinerary.json");
    tokio::fs::write(&path, ITINERARY).await?;

    let mut config = common::site_config("http://127.0.0.1:9");
    config.itinerary.path = Some(path.to_string_lossy().into_owned());

    let (status, body) = common::send(common::router(config.clone()), common::get("/api/itinerary")).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["title"], "Lisbon Engineering Offsite");
    assert_eq!(body["days"].as_array().unwrap().len(), 2);
    assert!(body["days"][0].get("activities").is_none());

    let (status, body) = common::send(common::router(config.clone()), common::get("/api/itinerary/2")).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["activities"][0], "Event storming");

    let (status, body) = common::send(common::router(config), common::get("/api/itinerary/17")).await;
    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(body["error"], "Day 17 not found");
    Ok(())
}

#[tokio::test]
async fn test_itinerary_without_data_is_empty() {
    let router = common::router(common::site_config("http://127.0.0.1:9"));
    let (status, body) = common::send(router, common::get("/api/itinerary")).await;
    assert_eq!(status, StatusCode::OK);
    assert!(body["days"].as_array().unwrap().is_empty());
}

#[test]
fn test_missing_itinerary_file_fails_startup() {
    let mut config = common::site_config("http://127.0.0.1:9");
    config.itinerary.path = Some("/nonexistent/consult-site/itinerary.json".to_string());
    assert!(matches!(
        AppState::from_config(config),
        Err(SiteError::ConfigError { .. })
    ));
}

#[tokio::test]
async fn test_unknown_route_is_404() {
    let router = common::router(common::site_config("http://127.0.0.1:9"));
    let (status, body) = common::send(router, common::get("/api/nope")).await;
    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(body["error"], "Route not found");
}

#[tokio::test]
async fn test_non_numeric_itinerary_day_is_json_404() {
    let router = common::router(common::site_config("http://127.0.0.1:9"));
    let (status, body) = common::send(router, common::get("/api/itinerary/abc")).await;
    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(body["error"], "Itinerary day not found");
}

#[tokio::test]
async fn test_wrong_method_is_json_405() {
    let router = common::router(common::site_config("http://127.0.0.1:9"));
    let (status, body) = common::send(router, common::get("/api/contact")).await;
    assert_eq!(status, StatusCode::METHOD_NOT_ALLOWED);
    assert_eq!(body["error"], "Method not allowed");
}
