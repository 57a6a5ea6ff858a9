//! Achievement catalog — threshold-based milestones over cumulative metrics.
//!
//! Codes are snake_case string values (e.g. `"first_journey"`) and are stable
//! across releases; unlock rows reference them directly.

use std::sync::Arc;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;

pub const FIRST_JOURNEY: &str = "first_journey";
pub const JOURNEYS_10: &str = "journeys_10";
pub const JOURNEYS_50: &str = "journeys_50";
pub const JOURNEYS_100: &str = "journeys_100";
pub const CO2_SAVED_1: &str = "co2_saved_1";
pub const CO2_SAVED_10: &str = "co2_saved_10";
pub const CO2_SAVED_50: &str = "co2_saved_50";
pub const CO2_SAVED_100: &str = "co2_saved_100";
pub const CALORIES_1000: &str = "calories_1000";
pub const CALORIES_10000: &str = "calories_10000";
pub const STREAK_3: &str = "streak_3";
pub const STREAK_7: &str = "streak_7";
pub const STREAK_30: &str = "streak_30";

/// Which cumulative metric a threshold applies to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum AchievementKind {
    Co2,
    Calories,
    Journeys,
    Streak,
}

#[derive(Debug, Clone, Serialize)]
pub struct Achievement {
    pub code: &'static str,
    pub name: &'static str,
    pub description: &'static str,
    pub icon: &'static str,
    pub threshold: f64,
    pub kind: AchievementKind,
}

/// Persisted unlock row. At most one per (user, achievement).
#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct UserAchievement {
    pub user_uuid: String,
    pub achievement_code: String,
    pub unlocked_at: DateTime<Utc>,
}

/// The full static catalog, built once at startup and carried in `AppState`.
#[derive(Debug, Clone)]
pub struct AchievementCatalog {
    entries: Arc<[Achievement]>,
}

impl AchievementCatalog {
    pub fn standard() -> Self {
        use AchievementKind::{Calories, Co2, Journeys, Streak};

        let entry = |code, name, description, icon, threshold, kind| Achievement {
            code,
            name,
            description,
            icon,
            threshold,
            kind,
        };
        let entries: Vec<Achievement> = vec![
            entry(
                FIRST_JOURNEY,
                "First Steps",
                "Logged your very first journey.",
                "🌱",
                1.0,
                Journeys,
            ),
            entry(
                JOURNEYS_10,
                "Regular Traveller",
                "Logged 10 journeys.",
                "🧭",
                10.0,
                Journeys,
            ),
            entry(
                JOURNEYS_50,
                "Seasoned Commuter",
                "Logged 50 journeys.",
                "🗺️",
                50.0,
                Journeys,
            ),
            entry(
                JOURNEYS_100,
                "Century Rider",
                "Logged 100 journeys.",
                "💯",
                100.0,
                Journeys,
            ),
            entry(
                CO2_SAVED_1,
                "Cleaner Air",
                "Saved your first kilogram of CO2 compared to driving.",
                "🍃",
                1.0,
                Co2,
            ),
            entry(
                CO2_SAVED_10,
                "Carbon Cutter",
                "Saved 10 kg of CO2 compared to driving.",
                "🌿",
                10.0,
                Co2,
            ),
            entry(
                CO2_SAVED_50,
                "Climate Ally",
                "Saved 50 kg of CO2 compared to driving.",
                "🌳",
                50.0,
                Co2,
            ),
            entry(
                CO2_SAVED_100,
                "Planet Guardian",
                "Saved 100 kg of CO2 compared to driving.",
                "🌍",
                100.0,
                Co2,
            ),
            entry(
                CALORIES_1000,
                "Warmed Up",
                "Burned 1,000 kcal on active journeys.",
                "🔥",
                1000.0,
                Calories,
            ),
            entry(
                CALORIES_10000,
                "Endurance Machine",
                "Burned 10,000 kcal on active journeys.",
                "⚡",
                10000.0,
                Calories,
            ),
            entry(
                STREAK_3,
                "Getting Into It",
                "Three consecutive days without taking the car.",
                "📅",
                3.0,
                Streak,
            ),
            entry(
                STREAK_7,
                "Car-Free Week",
                "Seven consecutive days without taking the car.",
                "🚲",
                7.0,
                Streak,
            ),
            entry(
                STREAK_30,
                "New Lifestyle",
                "Thirty consecutive days without taking the car.",
                "🏆",
                30.0,
                Streak,
            ),
        ];
        Self {
            entries: entries.into(),
        }
    }

    pub fn entries(&self) -> &[Achievement] {
        &self.entries
    }

    pub fn by_code(&self, code: &str) -> Option<&Achievement> {
        self.entries.iter().find(|a| a.code == code)
    }
}
