pub mod achievements;
pub mod journeys;
pub mod leaderboard;
pub mod metrics;
pub mod polyline;
pub mod streak;
