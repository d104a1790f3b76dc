use crate::core::server::AppState;
use crate::domain::model::ItineraryDay;
use crate::utils::error::{Result, SiteError};
use axum::extract::rejection::PathRejection;
use axum::extract::{Path, State};
use axum::response::{IntoResponse, Response};
use axum::Json;

/// `GET /api/itinerary`
pub async fn overview(State(state): State<AppState>) -> Response {
    Json(state.itinerary.overview()).into_response()
}

/// `GET /api/itinerary/{day}`. A non-numeric day is treated as missing.
pub async fn day(
    State(state): State<AppState>,
    day: std::result::Result<Path<u32>, PathRejection>,
) -> Result<Json<ItineraryDay>> {
    let Path(day) = day.map_err(|e| {
        tracing::debug!("Rejected itinerary path: {}", e);
        SiteError::NotFoundError {
            resource: "Itinerary day".to_string(),
        }
    })?;
    state
        .itinerary
        .day(day)
        .cloned()
        .map(Json)
        .ok_or_else(|| SiteError::NotFoundError {
            resource: format!("Day {}", day),
        })
}
