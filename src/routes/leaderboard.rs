use axum::{
    extract::{Query, State},
    routing::get,
    Json, Router,
};
use serde::Deserialize;

use crate::{
    error::AppError,
    services::leaderboard::{self, LeaderboardEntry, Metric, Period},
    state::AppState,
};

pub fn router() -> Router<AppState> {
    Router::new().route("/api/leaderboard", get(leaderboard_show))
}

#[derive(Deserialize)]
struct LeaderboardQuery {
    #[serde(default)]
    period: Period,
    #[serde(default, rename = "type")]
    metric: Metric,
    /// Requesting user, so the UI can highlight their own row.
    user: Option<String>,
}

async fn leaderboard_show(
    State(state): State<AppState>,
    Query(query): Query<LeaderboardQuery>,
) -> Result<Json<Vec<LeaderboardEntry>>, AppError> {
    let entries = leaderboard::top(
        &state.db,
        query.period,
        query.metric,
        query.user.as_deref(),
    )
    .await?;
    Ok(Json(entries))
}
