pub mod achievements;
pub mod journeys;
pub mod leaderboard;
pub mod maps;
pub mod users;

use axum::{routing::get, Router};
use tower_http::trace::TraceLayer;

use crate::state::AppState;

pub fn create_router(state: AppState) -> Router {
    Router::new()
        .route("/health", get(health))
        .merge(users::router())
        .merge(journeys::router())
        .merge(achievements::router())
        .merge(leaderboard::router())
        .merge(maps::router())
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

async fn health() -> &'static str {
    "ok"
}
