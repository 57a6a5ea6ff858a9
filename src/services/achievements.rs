//! Threshold evaluation over a user's cumulative totals.
//!
//! Runs after every journey creation. Unlocks are idempotent: the insert is
//! guarded by the unique (user, achievement) index and a conflicting write is
//! swallowed, so the whole pass can be retried after a partial failure.
//! Unlocks are never revoked.

use std::collections::HashSet;

use chrono::{Local, Utc};
use serde::Serialize;
use tracing::info;

use crate::db::DbPool;
use crate::error::AppError;
use crate::models::achievement::{Achievement, AchievementCatalog, AchievementKind};
use crate::models::transport::TransportMode;
use crate::services::streak;

/// Aggregate facts an evaluation runs against.
#[derive(Debug, Clone, Copy, Default, Serialize)]
pub struct ProgressFacts {
    pub total_co2_saved_kg: f64,
    pub total_calories: i64,
    pub total_journeys: i64,
    pub current_streak: u32,
}

impl ProgressFacts {
    fn metric(&self, kind: AchievementKind) -> f64 {
        match kind {
            AchievementKind::Co2 => self.total_co2_saved_kg,
            AchievementKind::Calories => self.total_calories as f64,
            AchievementKind::Journeys => self.total_journeys as f64,
            AchievementKind::Streak => f64::from(self.current_streak),
        }
    }
}

/// Catalog entries whose threshold is met but which are not yet unlocked.
pub fn newly_earned<'a>(
    catalog: &'a AchievementCatalog,
    unlocked: &HashSet<String>,
    facts: &ProgressFacts,
) -> Vec<&'a Achievement> {
    catalog
        .entries()
        .iter()
        .filter(|a| !unlocked.contains(a.code))
        .filter(|a| facts.metric(a.kind) >= a.threshold)
        .collect()
}

/// Aggregate a user's totals from storage. The streak only considers
/// car-free journeys, bucketed to local calendar days.
pub async fn gather_facts(db: &DbPool, user_uuid: &str) -> Result<ProgressFacts, AppError> {
    let (total_co2_saved_kg, total_calories, total_journeys): (f64, i64, i64) = sqlx::query_as(
        r#"SELECT COALESCE(SUM(co2_saved_kg), 0.0), COALESCE(SUM(calories_burned), 0), COUNT(*)
           FROM journeys WHERE user_uuid = ?1"#,
    )
    .bind(user_uuid)
    .fetch_one(db)
    .await?;

    let car_free: Vec<(chrono::DateTime<Utc>,)> = sqlx::query_as(
        "SELECT created_at FROM journeys WHERE user_uuid = ?1 AND transport_mode != ?2",
    )
    .bind(user_uuid)
    .bind(TransportMode::Car.as_str())
    .fetch_all(db)
    .await?;

    let today = Local::now().date_naive();
    let days = car_free.into_iter().map(|(ts,)| streak::local_day(ts));

    Ok(ProgressFacts {
        total_co2_saved_kg,
        total_calories,
        total_journeys,
        current_streak: streak::current_streak(days, today),
    })
}

/// Full evaluation pass for one user. Returns the codes unlocked by this
/// pass; an unlock that lost a race to a concurrent pass is not reported
/// twice.
pub async fn evaluate_user(
    db: &DbPool,
    catalog: &AchievementCatalog,
    user_uuid: &str,
) -> Result<Vec<String>, AppError> {
    let facts = gather_facts(db, user_uuid).await?;

    let unlocked: HashSet<String> =
        sqlx::query_scalar("SELECT achievement_code FROM user_achievements WHERE user_uuid = ?1")
            .bind(user_uuid)
            .fetch_all(db)
            .await?
            .into_iter()
            .collect();

    let mut fresh = Vec::new();
    for achievement in newly_earned(catalog, &unlocked, &facts) {
        let result = sqlx::query(
            r#"INSERT INTO user_achievements (user_uuid, achievement_code, unlocked_at)
               VALUES (?1, ?2, ?3)
               ON CONFLICT (user_uuid, achievement_code) DO NOTHING"#,
        )
        .bind(user_uuid)
        .bind(achievement.code)
        .bind(Utc::now())
        .execute(db)
        .await?;
        if result.rows_affected() > 0 {
            info!(user = user_uuid, code = achievement.code, "achievement unlocked");
            fresh.push(achievement.code.to_string());
        }
    }
    Ok(fresh)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::achievement::{CO2_SAVED_10, FIRST_JOURNEY, JOURNEYS_10, STREAK_3};

    fn facts(co2: f64, calories: i64, journeys: i64, streak: u32) -> ProgressFacts {
        ProgressFacts {
            total_co2_saved_kg: co2,
            total_calories: calories,
            total_journeys: journeys,
            current_streak: streak,
        }
    }

    #[test]
    fn first_journey_unlocks_at_one() {
        let catalog = AchievementCatalog::standard();
        let earned = newly_earned(&catalog, &HashSet::new(), &facts(0.0, 0, 1, 0));
        let codes: Vec<&str> = earned.iter().map(|a| a.code).collect();
        assert_eq!(codes, vec![FIRST_JOURNEY]);
    }

    #[test]
    fn already_unlocked_entries_are_skipped() {
        let catalog = AchievementCatalog::standard();
        let unlocked: HashSet<String> = [FIRST_JOURNEY.to_string()].into();
        let earned = newly_earned(&catalog, &unlocked, &facts(0.0, 0, 1, 0));
        assert!(earned.is_empty());
    }

    #[test]
    fn evaluation_is_idempotent_for_unchanged_facts() {
        let catalog = AchievementCatalog::standard();
        let f = facts(12.5, 0, 10, 3);
        let first_pass = newly_earned(&catalog, &HashSet::new(), &f);
        let unlocked: HashSet<String> =
            first_pass.iter().map(|a| a.code.to_string()).collect();
        assert!(unlocked.contains(JOURNEYS_10));
        assert!(unlocked.contains(CO2_SAVED_10));
        assert!(unlocked.contains(STREAK_3));
        // Second pass with the same facts finds nothing new.
        assert!(newly_earned(&catalog, &unlocked, &f).is_empty());
    }

    #[test]
    fn thresholds_are_inclusive() {
        let catalog = AchievementCatalog::standard();
        let earned = newly_earned(&catalog, &HashSet::new(), &facts(10.0, 0, 0, 0));
        assert!(earned.iter().any(|a| a.code == CO2_SAVED_10));
        let below = newly_earned(&catalog, &HashSet::new(), &facts(9.99, 0, 0, 0));
        assert!(!below.iter().any(|a| a.code == CO2_SAVED_10));
    }
}
