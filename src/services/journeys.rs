//! Journey creation flow: metrics derivation, persistence, achievement pass.

use serde::Serialize;

use crate::db::DbPool;
use crate::error::AppError;
use crate::models::achievement::AchievementCatalog;
use crate::models::journey::{Journey, NewJourney};
use crate::models::transport::TransportCatalog;
use crate::services::{achievements, metrics};

#[derive(Debug, Clone, Serialize)]
pub struct JourneyOutcome {
    pub journey: Journey,
    pub unlocked_achievements: Vec<String>,
}

/// Record one validated journey: derive the metrics, persist the row, then
/// re-run the achievement evaluation for the owner.
pub async fn record(
    db: &DbPool,
    transport: &TransportCatalog,
    catalog: &AchievementCatalog,
    user_uuid: &str,
    new: NewJourney,
) -> Result<JourneyOutcome, AppError> {
    let distance_km = metrics::validate_distance(new.distance_km)?;
    let derived = metrics::calculate(transport, distance_km, new.mode);

    let journey = Journey::build(user_uuid, &new, &derived);
    journey.insert(db).await?;

    let unlocked_achievements = achievements::evaluate_user(db, catalog, user_uuid).await?;

    Ok(JourneyOutcome {
        journey,
        unlocked_achievements,
    })
}
