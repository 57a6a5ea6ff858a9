use axum::{
    extract::{Path, State},
    http::StatusCode,
    routing::get,
    Json, Router,
};
use serde::Deserialize;

use crate::{
    error::AppError,
    models::journey::{Journey, NewJourney},
    models::transport::TransportMode,
    models::user::User,
    services::journeys::{self, JourneyOutcome},
    state::AppState,
};

pub fn router() -> Router<AppState> {
    Router::new()
        .route(
            "/api/users/:user_uuid/journeys",
            get(journeys_list).post(journey_create),
        )
        .route("/api/users/:user_uuid/journeys/:id", get(journey_detail))
}

#[derive(Deserialize)]
#[serde(deny_unknown_fields)]
struct JourneyForm {
    distance_km: f64,
    transport_mode: String,
    from_location: Option<String>,
    to_location: Option<String>,
}

async fn journey_create(
    State(state): State<AppState>,
    Path(user_uuid): Path<String>,
    Json(form): Json<JourneyForm>,
) -> Result<(StatusCode, Json<JourneyOutcome>), AppError> {
    let user = User::find_by_uuid(&state.db, &user_uuid).await?;
    let mode: TransportMode = form.transport_mode.parse()?;
    let new = NewJourney {
        distance_km: form.distance_km,
        mode,
        from_location: normalize_optional(form.from_location),
        to_location: normalize_optional(form.to_location),
    };
    let outcome = journeys::record(
        &state.db,
        &state.transport,
        &state.achievements,
        &user.uuid,
        new,
    )
    .await?;
    Ok((StatusCode::CREATED, Json(outcome)))
}

async fn journeys_list(
    State(state): State<AppState>,
    Path(user_uuid): Path<String>,
) -> Result<Json<Vec<Journey>>, AppError> {
    let user = User::find_by_uuid(&state.db, &user_uuid).await?;
    Ok(Json(Journey::list_for_user(&state.db, &user.uuid).await?))
}

async fn journey_detail(
    State(state): State<AppState>,
    Path((user_uuid, id)): Path<(String, String)>,
) -> Result<Json<Journey>, AppError> {
    let journey = Journey::find(&state.db, &user_uuid, &id).await?;
    Ok(Json(journey))
}

fn normalize_optional(input: Option<String>) -> Option<String> {
    input.and_then(|value| {
        let trimmed = value.trim();
        if trimmed.is_empty() {
            None
        } else {
            Some(trimmed.to_string())
        }
    })
}
