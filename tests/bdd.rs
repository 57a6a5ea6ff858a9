use std::{collections::HashMap, fmt, net::SocketAddr};

use anyhow::Context;
use cucumber::{given, then, when, World as _};
use tempfile::TempDir;
use verda::{
    config::AppConfig,
    db::init_pool,
    models::achievement::AchievementCatalog,
    models::journey::NewJourney,
    models::transport::{TransportCatalog, TransportMode},
    models::user::{LifestyleSettings, User},
    services::achievements,
    services::journeys::{self, JourneyOutcome},
    services::leaderboard::{self, Metric, Period},
    state::AppState,
};

#[derive(Debug, cucumber::World, Default)]
struct AppWorld {
    state: Option<TestState>,
    users: HashMap<String, String>,
    last_outcome: Option<JourneyOutcome>,
}

impl AppWorld {
    fn app_state(&self) -> &AppState {
        self.state
            .as_ref()
            .expect("state must be initialised first")
            .app()
    }

    fn user_uuid(&self, name: &str) -> &str {
        self.users
            .get(name)
            .unwrap_or_else(|| panic!("user {name} must exist before this step"))
    }
}

struct TestState {
    app: AppState,
    _root: TempDir,
}

impl fmt::Debug for TestState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("TestState").finish()
    }
}

impl TestState {
    async fn new() -> anyhow::Result<Self> {
        let root = TempDir::new().context("create temp dir for bdd world")?;
        let db_path = root.path().join("bdd.sqlite");
        let database_url = format!("sqlite://{}", db_path.to_string_lossy());

        let config = AppConfig {
            database_url: database_url.clone(),
            listen_addr: SocketAddr::from(([127, 0, 0, 1], 0)),
        };

        let db = init_pool(&config.database_url).await?;
        sqlx::migrate!("./migrations").run(&db).await?;

        let app = AppState::new(
            config,
            db,
            TransportCatalog::standard(),
            AchievementCatalog::standard(),
        );
        Ok(Self { app, _root: root })
    }

    fn app(&self) -> &AppState {
        &self.app
    }
}

#[given("a fresh application")]
async fn given_fresh_state(world: &mut AppWorld) {
    world.state = Some(TestState::new().await.expect("state"));
    world.users.clear();
    world.last_outcome = None;
}

#[given(regex = r#"^a user "([^"]+)" exists$"#)]
async fn given_user(world: &mut AppWorld, name: String) {
    let user = User::create(
        &world.app_state().db,
        &name,
        &LifestyleSettings::default(),
    )
    .await
    .expect("create user");
    world.users.insert(name, user.uuid);
}

#[when(regex = r#"^"([^"]+)" logs a ([0-9.]+) km journey by ([a-z]+)$"#)]
async fn when_log_journey(world: &mut AppWorld, name: String, distance_km: f64, mode: String) {
    let mode: TransportMode = mode.parse().expect("known transport mode");
    let user_uuid = world.user_uuid(&name).to_string();
    let state = world.app_state();
    let outcome = journeys::record(
        &state.db,
        &state.transport,
        &state.achievements,
        &user_uuid,
        NewJourney {
            distance_km,
            mode,
            from_location: None,
            to_location: None,
        },
    )
    .await
    .expect("record journey");
    world.last_outcome = Some(outcome);
}

#[when(regex = r#"^achievements are re-evaluated for "([^"]+)"$"#)]
async fn when_reevaluate(world: &mut AppWorld, name: String) {
    let user_uuid = world.user_uuid(&name).to_string();
    let state = world.app_state();
    let fresh = achievements::evaluate_user(&state.db, &state.achievements, &user_uuid)
        .await
        .expect("evaluate achievements");
    assert!(
        fresh.is_empty(),
        "re-evaluation with unchanged totals unlocked {fresh:?}"
    );
}

#[then(regex = r#"^"([^"]+)" has (\d+) stored journeys$"#)]
async fn then_journey_count(world: &mut AppWorld, name: String, expected: i64) {
    let user_uuid = world.user_uuid(&name).to_string();
    let count: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM journeys WHERE user_uuid = ?1")
        .bind(&user_uuid)
        .fetch_one(&world.app_state().db)
        .await
        .expect("count journeys");
    assert_eq!(count, expected);
}

#[then(regex = r#"^the recorded journey saved ([0-9.]+) kg of CO2 and burned (\d+) kcal$"#)]
async fn then_recorded_metrics(world: &mut AppWorld, co2_saved_kg: f64, calories: i64) {
    let outcome = world
        .last_outcome
        .as_ref()
        .expect("a journey must be recorded before this step");
    assert_eq!(outcome.journey.co2_saved_kg, co2_saved_kg);
    assert_eq!(outcome.journey.calories_burned, calories);
}

#[then(regex = r#"^the recorded journey took (\d+) minutes$"#)]
async fn then_recorded_travel_time(world: &mut AppWorld, minutes: i64) {
    let outcome = world
        .last_outcome
        .as_ref()
        .expect("a journey must be recorded before this step");
    assert_eq!(outcome.journey.travel_time_min, minutes);
}

#[then(regex = r#"^"([^"]+)" has unlocked "([^"]+)"$"#)]
async fn then_has_unlocked(world: &mut AppWorld, name: String, code: String) {
    let user_uuid = world.user_uuid(&name).to_string();
    let count: i64 = sqlx::query_scalar(
        "SELECT COUNT(*) FROM user_achievements WHERE user_uuid = ?1 AND achievement_code = ?2",
    )
    .bind(&user_uuid)
    .bind(&code)
    .fetch_one(&world.app_state().db)
    .await
    .expect("count unlocks");
    assert_eq!(count, 1, "expected exactly one unlock row for {code}");
}

#[then(regex = r#"^"([^"]+)" has (\d+) unlocked achievements$"#)]
async fn then_unlocked_count(world: &mut AppWorld, name: String, expected: i64) {
    let user_uuid = world.user_uuid(&name).to_string();
    let count: i64 =
        sqlx::query_scalar("SELECT COUNT(*) FROM user_achievements WHERE user_uuid = ?1")
            .bind(&user_uuid)
            .fetch_one(&world.app_state().db)
            .await
            .expect("count unlocks");
    assert_eq!(count, expected);
}

#[then(regex = r#"^the all-time leaderboard by (co2|calories) ranks "([^"]+)" first$"#)]
async fn then_leaderboard_first(world: &mut AppWorld, metric: String, name: String) {
    let metric = match metric.as_str() {
        "calories" => Metric::Calories,
        _ => Metric::Co2,
    };
    let entries = leaderboard::top(&world.app_state().db, Period::All, metric, None)
        .await
        .expect("leaderboard");
    let first = entries.first().expect("leaderboard must not be empty");
    assert_eq!(first.rank, 1);
    assert_eq!(first.user_uuid, world.user_uuid(&name));
}

#[tokio::main]
async fn main() {
    AppWorld::cucumber()
        .fail_on_skipped()
        .with_default_cli()
        .run("tests/features")
        .await;
}
