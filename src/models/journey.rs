use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use uuid::Uuid;

use crate::db::DbPool;
use crate::error::AppError;
use crate::models::transport::TransportMode;
use crate::services::metrics::JourneyMetrics;

/// One recorded trip. Derived metric columns are persisted verbatim at
/// creation time; rows are immutable afterwards.
#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct Journey {
    pub id: String,
    pub user_uuid: String,
    pub distance_km: f64,
    pub transport_mode: String,
    pub travel_time_min: i64,
    pub co2_emissions_kg: f64,
    pub calories_burned: i64,
    pub co2_saved_kg: f64,
    pub from_location: Option<String>,
    pub to_location: Option<String>,
    pub created_at: DateTime<Utc>,
}

/// Validated creation input, after mode parsing and distance checks.
#[derive(Debug, Clone)]
pub struct NewJourney {
    pub distance_km: f64,
    pub mode: TransportMode,
    pub from_location: Option<String>,
    pub to_location: Option<String>,
}

impl Journey {
    pub fn build(user_uuid: &str, new: &NewJourney, metrics: &JourneyMetrics) -> Self {
        Self {
            id: Uuid::new_v4().to_string(),
            user_uuid: user_uuid.to_string(),
            distance_km: new.distance_km,
            transport_mode: new.mode.as_str().to_string(),
            travel_time_min: metrics.travel_time_min,
            co2_emissions_kg: metrics.co2_emissions_kg,
            calories_burned: metrics.calories_burned,
            co2_saved_kg: metrics.co2_saved_kg,
            from_location: new.from_location.clone(),
            to_location: new.to_location.clone(),
            created_at: Utc::now(),
        }
    }

    pub async fn insert(&self, db: &DbPool) -> Result<(), AppError> {
        sqlx::query(
            r#"INSERT INTO journeys
               (id, user_uuid, distance_km, transport_mode, travel_time_min,
                co2_emissions_kg, calories_burned, co2_saved_kg,
                from_location, to_location, created_at)
               VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8, ?9, ?10, ?11)"#,
        )
        .bind(&self.id)
        .bind(&self.user_uuid)
        .bind(self.distance_km)
        .bind(&self.transport_mode)
        .bind(self.travel_time_min)
        .bind(self.co2_emissions_kg)
        .bind(self.calories_burned)
        .bind(self.co2_saved_kg)
        .bind(&self.from_location)
        .bind(&self.to_location)
        .bind(self.created_at)
        .execute(db)
        .await?;
        Ok(())
    }

    pub async fn list_for_user(db: &DbPool, user_uuid: &str) -> Result<Vec<Journey>, AppError> {
        let journeys = sqlx::query_as::<_, Journey>(
            "SELECT * FROM journeys WHERE user_uuid = ?1 ORDER BY created_at DESC",
        )
        .bind(user_uuid)
        .fetch_all(db)
        .await?;
        Ok(journeys)
    }

    pub async fn find(db: &DbPool, user_uuid: &str, id: &str) -> Result<Journey, AppError> {
        sqlx::query_as::<_, Journey>("SELECT * FROM journeys WHERE id = ?1 AND user_uuid = ?2")
            .bind(id)
            .bind(user_uuid)
            .fetch_optional(db)
            .await?
            .ok_or(AppError::NotFound)
    }
}
