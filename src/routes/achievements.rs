use axum::{
    extract::{Path, State},
    routing::get,
    Json, Router,
};
use chrono::{DateTime, Utc};
use serde::Serialize;

use crate::{
    error::AppError,
    models::achievement::{Achievement, UserAchievement},
    models::user::User,
    state::AppState,
};

pub fn router() -> Router<AppState> {
    Router::new()
        .route("/api/achievements", get(catalog_list))
        .route("/api/users/:user_uuid/achievements", get(unlocked_list))
}

async fn catalog_list(State(state): State<AppState>) -> Json<Vec<Achievement>> {
    Json(state.achievements.entries().to_vec())
}

#[derive(Serialize)]
struct UnlockedView {
    code: String,
    name: String,
    icon: String,
    unlocked_at: DateTime<Utc>,
}

async fn unlocked_list(
    State(state): State<AppState>,
    Path(user_uuid): Path<String>,
) -> Result<Json<Vec<UnlockedView>>, AppError> {
    let user = User::find_by_uuid(&state.db, &user_uuid).await?;
    let rows = sqlx::query_as::<_, UserAchievement>(
        "SELECT * FROM user_achievements WHERE user_uuid = ?1 ORDER BY unlocked_at",
    )
    .bind(&user.uuid)
    .fetch_all(&state.db)
    .await?;

    let views = rows
        .into_iter()
        .map(|row| {
            // A row for a code the catalog no longer carries still renders,
            // just without the pretty name.
            let (name, icon) = state
                .achievements
                .by_code(&row.achievement_code)
                .map(|a| (a.name.to_string(), a.icon.to_string()))
                .unwrap_or_else(|| (row.achievement_code.clone(), String::new()));
            UnlockedView {
                code: row.achievement_code,
                name,
                icon,
                unlocked_at: row.unlocked_at,
            }
        })
        .collect();
    Ok(Json(views))
}
