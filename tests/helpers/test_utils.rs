// ABOUTME: Fixture builders for baby-care integration tests
// ABOUTME: In-memory database, shared resources, signed tokens, and seeded babies
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

use axum::Router;
use babycare_providers::NutritionLookupService;
use babycare_server::{
    auth::{AuthManager, DEFAULT_TOKEN_EXPIRY_HOURS},
    config::{Environment, NutritionConfig, ServerConfig},
    database::Database,
    models::{Baby, Gender},
    server::{build_router, ServerResources},
};
use chrono::{TimeZone, Utc};
use std::env;
use std::sync::{Arc, Once};
use std::time::Duration;
use tracing::Level;
use uuid::Uuid;

/// Secret shared by the test token issuer and the server under test
pub const TEST_JWT_SECRET: &str = "integration-test-secret";

/// Nothing listens on the discard port, so every provider call fails fast
pub const UNREACHABLE_BASE_URL: &str = "http://127.0.0.1:9";

static INIT_LOGGER: Once = Once::new();

/// Initialize quiet logging for tests (call once per test process)
pub fn init_test_logging() {
    INIT_LOGGER.call_once(|| {
        let log_level = match env::var("TEST_LOG").as_deref() {
            Ok("TRACE") => Level::TRACE,
            Ok("DEBUG") => Level::DEBUG,
            Ok("INFO") => Level::INFO,
            _ => Level::WARN,
        };

        tracing_subscriber::fmt()
            .with_max_level(log_level)
            .with_test_writer()
            .init();
    });
}

/// Nutrition settings with every provider pointed at `base_url`
pub fn nutrition_config(base_url: &str, fdc_api_key: Option<&str>) -> NutritionConfig {
    NutritionConfig {
        mealdb_base_url: format!("{base_url}/mealdb"),
        open_food_facts_base_url: format!("{base_url}/off"),
        usda_base_url: format!("{base_url}/usda"),
        fdc_api_key: fdc_api_key.map(str::to_owned),
        provider_timeout_secs: 2,
    }
}

/// Test configuration around the given nutrition settings
pub fn test_config(nutrition: NutritionConfig) -> ServerConfig {
    ServerConfig {
        http_port: 8081,
        host: "127.0.0.1".to_owned(),
        database_url: "sqlite::memory:".to_owned(),
        jwt_secret: Some(TEST_JWT_SECRET.to_owned()),
        environment: Environment::Testing,
        cors_allowed_origins: vec!["*".to_owned()],
        nutrition,
    }
}

/// Standard test database setup
pub async fn create_test_database() -> Database {
    init_test_logging();
    Database::new("sqlite::memory:")
        .await
        .expect("Failed to create in-memory database")
}

/// Resources whose nutrition providers live under `base_url`
pub async fn create_test_resources_with(
    base_url: &str,
    fdc_api_key: Option<&str>,
) -> Arc<ServerResources> {
    let database = create_test_database().await;
    let config = Arc::new(test_config(nutrition_config(base_url, fdc_api_key)));
    Arc::new(ServerResources::from_config(database, config))
}

/// Resources whose nutrition providers are all unreachable
pub async fn create_test_resources() -> Arc<ServerResources> {
    create_test_resources_with(UNREACHABLE_BASE_URL, None).await
}

/// Resources with no nutrition providers at all, for CRUD tests
pub async fn create_offline_resources() -> Arc<ServerResources> {
    let database = create_test_database().await;
    let config = Arc::new(test_config(nutrition_config(UNREACHABLE_BASE_URL, None)));
    let auth_manager = AuthManager::new(TEST_JWT_SECRET.as_bytes(), DEFAULT_TOKEN_EXPIRY_HOURS);
    let nutrition = NutritionLookupService::with_providers(Vec::new(), Duration::from_secs(1));
    Arc::new(ServerResources::new(database, auth_manager, nutrition, config))
}

/// Full application router over `resources`
pub fn app(resources: &Arc<ServerResources>) -> Router {
    build_router(resources)
}

/// Signed session token for `user_id`
pub fn token_for(user_id: &str) -> String {
    AuthManager::new(TEST_JWT_SECRET.as_bytes(), DEFAULT_TOKEN_EXPIRY_HOURS)
        .generate_token(user_id, Some(&format!("{user_id}@example.com")))
        .expect("Failed to sign test token")
}

/// Store a baby owned by `parent_id`
pub async fn create_test_baby(resources: &ServerResources, parent_id: &str, name: &str) -> Baby {
    let baby = Baby {
        id: Uuid::new_v4(),
        parent_id: parent_id.to_owned(),
        name: name.to_owned(),
        birth_date: Utc
            .with_ymd_and_hms(2024, 1, 15, 0, 0, 0)
            .single()
            .expect("valid date"),
        gender: Gender::Female,
        weight: Some(3.4),
        height: None,
        created_at: Utc::now(),
    };
    resources
        .database
        .babies()
        .create(&baby)
        .await
        .expect("Failed to create test baby");
    baby
}
