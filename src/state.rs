use crate::{
    config::AppConfig,
    db::DbPool,
    models::{achievement::AchievementCatalog, transport::TransportCatalog},
};

#[derive(Clone)]
pub struct AppState {
    pub config: AppConfig,
    pub db: DbPool,
    pub transport: TransportCatalog,
    pub achievements: AchievementCatalog,
}

impl AppState {
    pub fn new(
        config: AppConfig,
        db: DbPool,
        transport: TransportCatalog,
        achievements: AchievementCatalog,
    ) -> Self {
        Self {
            config,
            db,
            transport,
            achievements,
        }
    }
}
