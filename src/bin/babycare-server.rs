// ABOUTME: Server binary for the baby-care tracking API
// ABOUTME: Loads configuration, opens the database, and serves the HTTP routes
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

//! # Baby-care API Server Binary
//!
//! Starts the HTTP API for baby profiles, feeding and activity logs, and
//! nutrition lookup.

use anyhow::Result;
use babycare_server::{
    config::ServerConfig,
    database::Database,
    logging,
    server::{self, ServerResources},
};
use clap::Parser;
use std::sync::Arc;
use tracing::{error, info};

#[derive(Parser)]
#[command(name = "babycare-server")]
#[command(about = "Baby-care API - feeding, activity, and nutrition tracking")]
pub struct Args {
    /// Override HTTP port
    #[arg(long)]
    http_port: Option<u16>,

    /// Override database URL
    #[arg(long)]
    database_url: Option<String>,
}

#[tokio::main]
async fn main() -> Result<()> {
    let args = Args::parse();
    logging::init_from_env()?;

    let mut config = ServerConfig::from_env()?;
    if let Some(http_port) = args.http_port {
        config.http_port = http_port;
    }
    if let Some(database_url) = args.database_url {
        config.database_url = database_url;
    }
    config.validate()?;

    info!("Starting Baby-care API");
    info!("{}", config.summary());

    let database = Database::new(&config.database_url).await?;
    info!("Database initialized successfully");

    let config = Arc::new(config);
    let resources = Arc::new(ServerResources::from_config(database, Arc::clone(&config)));
    info!(
        providers = ?resources.nutrition.provider_names(),
        "Nutrition lookup chain ready"
    );

    display_available_endpoints(&config);

    if let Err(e) = server::run(resources).await {
        error!("Server error: {e:#}");
        return Err(e);
    }

    Ok(())
}

/// Display all available API endpoints
#[allow(clippy::cognitive_complexity)]
fn display_available_endpoints(config: &ServerConfig) {
    let host = &config.host;
    let port = config.http_port;

    info!("=== Available API Endpoints ===");
    info!("Health:");
    info!("   Liveness:          GET  http://{host}:{port}/health");
    info!("   Readiness:         GET  http://{host}:{port}/ready");
    info!("Nutrition:");
    info!("   Lookup:            GET  http://{host}:{port}/api/nutrition?query={{name|barcode}}");
    info!("Babies:");
    info!("   List / Create:     GET|POST http://{host}:{port}/api/babies");
    info!("Food Intake:");
    info!("   List / Log:        GET|POST http://{host}:{port}/api/food-intake");
    info!("Activities:");
    info!("   List / Log:        GET|POST http://{host}:{port}/api/activities");
    info!("=== End of Endpoint List ===");
}
