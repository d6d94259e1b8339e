// ABOUTME: Main library entry point for the baby-care tracking API
// ABOUTME: Exposes auth, configuration, persistence, routes, and server assembly
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

// Crate-level attributes:
// - deny(unsafe_code): Zero-tolerance unsafe policy
#![deny(unsafe_code)]

//! # Baby-care API
//!
//! An HTTP API for parents to track their babies' feedings and care
//! activities, with nutrition lookup for foods by name or barcode.
//!
//! ## Features
//!
//! - **Baby profiles**: Each baby belongs to the parent who created it
//! - **Food intake log**: Feedings with amounts, units, and nutrient values
//! - **Activity log**: Diapers, sleep, baths, and medicine
//! - **Nutrition lookup**: Recipe database, barcode database, then the USDA
//!   food database, with a fixed estimate when all of them miss
//!
//! ## Architecture
//!
//! - **Routes**: Thin axum handlers per domain
//! - **Database**: `SQLite` managers per table
//! - **Providers**: The nutrition fallback chain (`babycare-providers`)
//! - **Config**: Environment-driven configuration
//!
//! ## Example Usage
//!
//! ```rust,no_run
//! use babycare_server::config::ServerConfig;
//!
//! fn main() -> anyhow::Result<()> {
//!     let config = ServerConfig::from_env()?;
//!     println!("Baby-care API configured with port: HTTP={}", config.http_port);
//!     Ok(())
//! }
//! ```

/// Session token verification
pub mod auth;

/// Environment-driven configuration
pub mod config;

/// Application constants and environment lookups
pub mod constants;

/// `SQLite` persistence for babies, food intakes, and activities
pub mod database;

/// Error types shared with the core crate
pub mod errors;

/// Structured logging setup
pub mod logging;

/// CORS and request tracing middleware
pub mod middleware;

/// `HTTP` route handlers
pub mod routes;

/// Shared resources, router assembly, and the serve loop
pub mod server;

/// Domain models shared with the core crate
pub use babycare_core::models;
