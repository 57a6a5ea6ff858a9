use axum::{extract::Json, routing::post, Router};
use serde::{Deserialize, Serialize};

use crate::{error::AppError, services::polyline, state::AppState};

pub fn router() -> Router<AppState> {
    Router::new().route("/api/polyline/decode", post(polyline_decode))
}

#[derive(Deserialize)]
#[serde(deny_unknown_fields)]
struct DecodeRequest {
    polyline: String,
}

#[derive(Serialize)]
struct Coordinate {
    lat: f64,
    lng: f64,
}

#[derive(Serialize)]
struct DecodedRoute {
    coordinates: Vec<Coordinate>,
}

/// Decode a route geometry string from the upstream mapping provider. The
/// result is consumed for drawing and never persisted.
async fn polyline_decode(
    Json(request): Json<DecodeRequest>,
) -> Result<Json<DecodedRoute>, AppError> {
    let coordinates = polyline::decode(&request.polyline)?
        .into_iter()
        .map(|(lat, lng)| Coordinate { lat, lng })
        .collect();
    Ok(Json(DecodedRoute { coordinates }))
}
