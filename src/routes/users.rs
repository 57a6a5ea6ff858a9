use axum::{
    extract::{Path, State},
    http::StatusCode,
    routing::{get, post},
    Json, Router,
};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::{
    error::AppError,
    models::user::{LifestyleSettings, User},
    services::achievements::{self, ProgressFacts},
    state::AppState,
};

pub fn router() -> Router<AppState> {
    Router::new()
        .route("/api/users", post(user_create))
        .route("/api/users/:user_uuid", get(user_profile))
        .route(
            "/api/users/:user_uuid/settings",
            get(settings_show).put(settings_update),
        )
        .route("/api/users/:user_uuid/stats", get(stats_show))
}

#[derive(Deserialize)]
#[serde(deny_unknown_fields)]
struct CreateUserRequest {
    display_name: String,
    #[serde(default)]
    settings: Option<LifestyleSettings>,
}

#[derive(Serialize)]
struct UserProfile {
    uuid: String,
    display_name: String,
    created_at: DateTime<Utc>,
    settings: LifestyleSettings,
}

impl UserProfile {
    fn from_user(user: &User) -> Result<Self, AppError> {
        Ok(Self {
            uuid: user.uuid.clone(),
            display_name: user.display_name.clone(),
            created_at: user.created_at,
            settings: user.settings()?,
        })
    }
}

async fn user_create(
    State(state): State<AppState>,
    Json(request): Json<CreateUserRequest>,
) -> Result<(StatusCode, Json<UserProfile>), AppError> {
    let display_name = request.display_name.trim();
    if display_name.is_empty() {
        return Err(AppError::BadRequest("display_name must not be empty".into()));
    }
    let settings = request.settings.unwrap_or_default();
    let user = User::create(&state.db, display_name, &settings).await?;
    Ok((StatusCode::CREATED, Json(UserProfile::from_user(&user)?)))
}

async fn user_profile(
    State(state): State<AppState>,
    Path(user_uuid): Path<String>,
) -> Result<Json<UserProfile>, AppError> {
    let user = User::find_by_uuid(&state.db, &user_uuid).await?;
    Ok(Json(UserProfile::from_user(&user)?))
}

async fn settings_show(
    State(state): State<AppState>,
    Path(user_uuid): Path<String>,
) -> Result<Json<LifestyleSettings>, AppError> {
    let user = User::find_by_uuid(&state.db, &user_uuid).await?;
    Ok(Json(user.settings()?))
}

async fn settings_update(
    State(state): State<AppState>,
    Path(user_uuid): Path<String>,
    Json(settings): Json<LifestyleSettings>,
) -> Result<Json<LifestyleSettings>, AppError> {
    User::update_settings(&state.db, &user_uuid, &settings).await?;
    Ok(Json(settings))
}

async fn stats_show(
    State(state): State<AppState>,
    Path(user_uuid): Path<String>,
) -> Result<Json<ProgressFacts>, AppError> {
    let user = User::find_by_uuid(&state.db, &user_uuid).await?;
    let facts = achievements::gather_facts(&state.db, &user.uuid).await?;
    Ok(Json(facts))
}
