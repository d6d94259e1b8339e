// ABOUTME: HTTP server assembly for the baby-care API
// ABOUTME: Shared request resources, router composition with tower-http layers, and graceful serve loop
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

//! # Server
//!
//! [`ServerResources`] is built once at startup and shared by every route
//! module through axum state. [`build_router`] merges the route modules and
//! wraps them in request ID, tracing, timeout, and CORS layers.

use crate::auth::{AuthManager, DEFAULT_TOKEN_EXPIRY_HOURS};
use crate::config::ServerConfig;
use crate::constants::REQUEST_TIMEOUT_SECS;
use crate::database::Database;
use crate::middleware::{request_id_layers, setup_cors, RequestSpan};
use crate::routes::{ActivitiesRoutes, BabiesRoutes, FoodIntakeRoutes, HealthRoutes, NutritionRoutes};
use anyhow::{Context, Result};
use axum::Router;
use babycare_providers::NutritionLookupService;
use std::future::pending;
use std::sync::Arc;
use std::time::Duration;
use tokio::net::TcpListener;
use tokio::signal::ctrl_c;
use tower_http::timeout::TimeoutLayer;
use tower_http::trace::TraceLayer;
use tracing::{info, warn};

/// Resources shared by all request handlers
#[derive(Clone)]
pub struct ServerResources {
    /// Persistent storage
    pub database: Arc<Database>,
    /// Session token verifier
    pub auth_manager: Arc<AuthManager>,
    /// Nutrition provider fallback chain
    pub nutrition: Arc<NutritionLookupService>,
    /// Loaded configuration
    pub config: Arc<ServerConfig>,
}

impl ServerResources {
    /// Create new server resources with proper Arc sharing
    #[must_use]
    pub fn new(
        database: Database,
        auth_manager: AuthManager,
        nutrition: NutritionLookupService,
        config: Arc<ServerConfig>,
    ) -> Self {
        Self {
            database: Arc::new(database),
            auth_manager: Arc::new(auth_manager),
            nutrition: Arc::new(nutrition),
            config,
        }
    }

    /// Build resources from configuration: auth from the JWT secret and the
    /// lookup chain from the nutrition settings
    #[must_use]
    pub fn from_config(database: Database, config: Arc<ServerConfig>) -> Self {
        let auth_manager = AuthManager::new(
            config.jwt_secret_or_default().as_bytes(),
            DEFAULT_TOKEN_EXPIRY_HOURS,
        );
        let nutrition = NutritionLookupService::new(&config.nutrition.lookup_config());
        Self::new(database, auth_manager, nutrition, config)
    }
}

/// Compose every route module into one router with the shared middleware stack
pub fn build_router(resources: &Arc<ServerResources>) -> Router {
    let (set_request_id, propagate_request_id) = request_id_layers();

    Router::new()
        .merge(HealthRoutes::routes(Arc::clone(resources)))
        .merge(NutritionRoutes::routes(Arc::clone(resources)))
        .merge(BabiesRoutes::routes(Arc::clone(resources)))
        .merge(FoodIntakeRoutes::routes(Arc::clone(resources)))
        .merge(ActivitiesRoutes::routes(Arc::clone(resources)))
        .layer(setup_cors(&resources.config))
        .layer(TimeoutLayer::new(Duration::from_secs(REQUEST_TIMEOUT_SECS)))
        .layer(propagate_request_id)
        .layer(TraceLayer::new_for_http().make_span_with(RequestSpan))
        .layer(set_request_id)
}

/// Bind the configured address and serve until Ctrl+C or SIGTERM
///
/// # Errors
///
/// Returns an error if the listener cannot bind or the server fails
pub async fn run(resources: Arc<ServerResources>) -> Result<()> {
    let address = format!("{}:{}", resources.config.host, resources.config.http_port);
    let app = build_router(&resources);

    let listener = TcpListener::bind(&address)
        .await
        .with_context(|| format!("Failed to bind {address}"))?;
    info!("Baby-care API listening on http://{address}");

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await
        .context("HTTP server failed")?;

    info!("Server shut down");
    Ok(())
}

async fn shutdown_signal() {
    let interrupt = async {
        if let Err(e) = ctrl_c().await {
            warn!("Failed to install Ctrl+C handler: {e}");
            pending::<()>().await;
        }
        info!("Received Ctrl+C, shutting down");
    };

    #[cfg(unix)]
    let terminate = async {
        use tokio::signal::unix::{signal, SignalKind};

        match signal(SignalKind::terminate()) {
            Ok(mut stream) => {
                stream.recv().await;
                info!("Received terminate signal, shutting down");
            }
            Err(e) => {
                warn!("Failed to install SIGTERM handler: {e}");
                pending::<()>().await;
            }
        }
    };

    #[cfg(not(unix))]
    let terminate = pending::<()>();

    tokio::select! {
        () = interrupt => {},
        () = terminate => {},
    }
}
