use anyhow::Context;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use uuid::Uuid;

use crate::db::DbPool;
use crate::error::AppError;

#[derive(Debug, Clone, FromRow)]
pub struct User {
    pub id: i64,
    pub uuid: String,
    pub display_name: String,
    pub weekly_goals: String,
    pub max_driving_days: i64,
    pub fitness_goal: Option<String>,
    pub daily_calorie_target: Option<i64>,
    pub created_at: DateTime<Utc>,
}

/// Weekly distance targets per mode, in kilometers. Stored as a JSON column
/// so missing modes fall back to 0.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct WeeklyGoals {
    pub car: f64,
    pub bus: f64,
    pub train: f64,
    pub bike: f64,
    pub walk: f64,
    pub ebike: f64,
}

/// Lifestyle configuration consumed by the progress-comparison views.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct LifestyleSettings {
    #[serde(default)]
    pub weekly_goals: WeeklyGoals,
    pub max_driving_days: i64,
    pub fitness_goal: Option<String>,
    pub daily_calorie_target: Option<i64>,
}

impl Default for LifestyleSettings {
    fn default() -> Self {
        Self {
            weekly_goals: WeeklyGoals::default(),
            max_driving_days: 2,
            fitness_goal: None,
            daily_calorie_target: None,
        }
    }
}

impl User {
    pub fn settings(&self) -> Result<LifestyleSettings, AppError> {
        let weekly_goals = serde_json::from_str(&self.weekly_goals)
            .context("stored weekly_goals is not valid JSON")?;
        Ok(LifestyleSettings {
            weekly_goals,
            max_driving_days: self.max_driving_days,
            fitness_goal: self.fitness_goal.clone(),
            daily_calorie_target: self.daily_calorie_target,
        })
    }

    pub async fn create(
        db: &DbPool,
        display_name: &str,
        settings: &LifestyleSettings,
    ) -> Result<User, AppError> {
        let uuid = Uuid::new_v4().to_string();
        let weekly_goals = serde_json::to_string(&settings.weekly_goals)
            .context("serialize weekly goals")?;
        sqlx::query(
            r#"INSERT INTO users
               (uuid, display_name, weekly_goals, max_driving_days,
                fitness_goal, daily_calorie_target, created_at)
               VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7)"#,
        )
        .bind(&uuid)
        .bind(display_name)
        .bind(&weekly_goals)
        .bind(settings.max_driving_days)
        .bind(&settings.fitness_goal)
        .bind(settings.daily_calorie_target)
        .bind(Utc::now())
        .execute(db)
        .await?;
        Self::find_by_uuid(db, &uuid).await
    }

    pub async fn find_by_uuid(db: &DbPool, uuid: &str) -> Result<User, AppError> {
        sqlx::query_as::<_, User>("SELECT * FROM users WHERE uuid = ?1")
            .bind(uuid)
            .fetch_optional(db)
            .await?
            .ok_or(AppError::NotFound)
    }

    pub async fn update_settings(
        db: &DbPool,
        uuid: &str,
        settings: &LifestyleSettings,
    ) -> Result<(), AppError> {
        let weekly_goals = serde_json::to_string(&settings.weekly_goals)
            .context("serialize weekly goals")?;
        let result = sqlx::query(
            r#"UPDATE users
               SET weekly_goals = ?1, max_driving_days = ?2,
                   fitness_goal = ?3, daily_calorie_target = ?4
               WHERE uuid = ?5"#,
        )
        .bind(&weekly_goals)
        .bind(settings.max_driving_days)
        .bind(&settings.fitness_goal)
        .bind(settings.daily_calorie_target)
        .bind(uuid)
        .execute(db)
        .await?;
        if result.rows_affected() == 0 {
            return Err(AppError::NotFound);
        }
        Ok(())
    }
}
