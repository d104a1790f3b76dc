use super::json_rejection;
use crate::config::toml_config::PaymentConfig;
use crate::core::server::AppState;
use crate::domain::model::{CheckoutMode, CheckoutRequest, CheckoutResponse, SessionUser};
use crate::utils::error::{Result, SiteError};
use crate::utils::validation::require_field;
use axum::extract::rejection::JsonRejection;
use axum::extract::State;
use axum::{Extension, Json};

/// `POST /api/checkout_sessions`, behind the session layer.
pub async fn create_checkout_session(
    State(state): State<AppState>,
    Extension(user): Extension<SessionUser>,
    payload: std::result::Result<Json<CheckoutRequest>, JsonRejection>,
) -> Result<Json<CheckoutResponse>> {
    let Json(request) = payload.map_err(json_rejection)?;
    let price_id = require_field("priceId", &request.price_id)?;
    let mode = resolve_mode(&state.config.payment, price_id)?;

    let session = state
        .payments
        .create_checkout_session(price_id, mode, Some(user.email.as_str()))
        .await?;

    Ok(Json(CheckoutResponse {
        session_id: session.id,
        url: session.url,
    }))
}

/// `GET /api/pricing`
pub async fn pricing(State(state): State<AppState>) -> Json<serde_json::Value> {
    Json(serde_json::json!({ "plans": state.config.payment.plans }))
}

/// With a catalog configured only listed prices may be bought.
fn resolve_mode(config: &PaymentConfig, price_id: &str) -> Result<CheckoutMode> {
    if config.plans.is_empty() {
        return Ok(config.default_mode);
    }
    config
        .find_plan(price_id)
        .map(|plan| plan.mode)
        .ok_or_else(|| SiteError::invalid("priceId", "unknown price"))
}
