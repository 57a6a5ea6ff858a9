//! Windowed per-user totals, ranked.

use std::cmp::Ordering;

use chrono::{DateTime, Duration, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;

use crate::db::DbPool;
use crate::error::AppError;

pub const TOP_N: usize = 10;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Period {
    Week,
    Month,
    #[default]
    All,
}

impl Period {
    pub fn cutoff(&self, now: DateTime<Utc>) -> Option<DateTime<Utc>> {
        match self {
            Period::Week => Some(now - Duration::days(7)),
            Period::Month => Some(now - Duration::days(30)),
            Period::All => None,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Metric {
    #[default]
    Co2,
    Calories,
}

/// One user's summed totals inside the window, as fetched.
#[derive(Debug, Clone, FromRow)]
pub struct UserTotals {
    pub user_uuid: String,
    pub display_name: String,
    pub co2_saved_kg: f64,
    pub calories_burned: i64,
    pub trip_count: i64,
}

impl Metric {
    fn value_of(&self, totals: &UserTotals) -> f64 {
        match self {
            Metric::Co2 => totals.co2_saved_kg,
            Metric::Calories => totals.calories_burned as f64,
        }
    }
}

#[derive(Debug, Clone, Serialize)]
pub struct LeaderboardEntry {
    pub rank: u32,
    pub user_uuid: String,
    pub display_name: String,
    pub value: f64,
    pub trip_count: i64,
    pub is_requesting_user: bool,
}

/// Sort descending by the chosen metric, keep the top N, assign ranks by
/// sorted position. The sort is stable, so ties keep fetch order; no further
/// tie-break is specified.
pub fn rank(
    mut totals: Vec<UserTotals>,
    metric: Metric,
    requesting_user: Option<&str>,
) -> Vec<LeaderboardEntry> {
    totals.sort_by(|a, b| {
        metric
            .value_of(b)
            .partial_cmp(&metric.value_of(a))
            .unwrap_or(Ordering::Equal)
    });
    totals.truncate(TOP_N);
    totals
        .into_iter()
        .enumerate()
        .map(|(position, totals)| LeaderboardEntry {
            rank: position as u32 + 1,
            value: metric.value_of(&totals),
            is_requesting_user: requesting_user == Some(totals.user_uuid.as_str()),
            user_uuid: totals.user_uuid,
            display_name: totals.display_name,
            trip_count: totals.trip_count,
        })
        .collect()
}

pub async fn top(
    db: &DbPool,
    period: Period,
    metric: Metric,
    requesting_user: Option<&str>,
) -> Result<Vec<LeaderboardEntry>, AppError> {
    let totals = match period.cutoff(Utc::now()) {
        Some(cutoff) => {
            sqlx::query_as::<_, UserTotals>(
                r#"SELECT j.user_uuid, u.display_name,
                          SUM(j.co2_saved_kg) AS co2_saved_kg,
                          SUM(j.calories_burned) AS calories_burned,
                          COUNT(*) AS trip_count
                   FROM journeys j
                   JOIN users u ON u.uuid = j.user_uuid
                   WHERE j.created_at >= ?1
                   GROUP BY j.user_uuid, u.display_name"#,
            )
            .bind(cutoff)
            .fetch_all(db)
            .await?
        }
        None => {
            sqlx::query_as::<_, UserTotals>(
                r#"SELECT j.user_uuid, u.display_name,
                          SUM(j.co2_saved_kg) AS co2_saved_kg,
                          SUM(j.calories_burned) AS calories_burned,
                          COUNT(*) AS trip_count
                   FROM journeys j
                   JOIN users u ON u.uuid = j.user_uuid
                   GROUP BY j.user_uuid, u.display_name"#,
            )
            .fetch_all(db)
            .await?
        }
    };
    Ok(rank(totals, metric, requesting_user))
}
