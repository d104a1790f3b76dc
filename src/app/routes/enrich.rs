use super::json_rejection;
use crate::core::server::AppState;
use crate::domain::model::{EnrichPayload, EnrichRequest};
use crate::utils::error::{Result, SiteError};
use crate::utils::validation::require_field;
use axum::extract::rejection::JsonRejection;
use axum::extract::State;
use axum::Json;

/// `POST /api/entity-enrich`: relays the webhook's JSON answer unchanged.
pub async fn entity_enrich(
    State(state): State<AppState>,
    payload: std::result::Result<Json<EnrichRequest>, JsonRejection>,
) -> Result<Json<serde_json::Value>> {
    let Json(request) = payload.map_err(json_rejection)?;
    let payload = enrich_payload(request)?;

    let result = state
        .webhook
        .forward(serde_json::to_value(&payload)?)
        .await?;

    tracing::info!("🔗 Enrichment relayed for session {}", payload.session_id);
    Ok(Json(result))
}

fn enrich_payload(request: EnrichRequest) -> Result<EnrichPayload> {
    let session_id = require_field("sessionId", &request.session_id)?.to_string();
    let doc = request
        .doc
        .filter(|doc| !doc.is_null())
        .ok_or_else(|| SiteError::missing("doc"))?;
    Ok(EnrichPayload { doc, session_id })
}
