// ABOUTME: Core types and constants for the baby-care tracking API
// ABOUTME: Foundation crate with error handling, domain models, and constants
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

#![deny(unsafe_code)]

//! # Babycare Core
//!
//! Foundation crate providing shared types and constants for the baby-care
//! tracking API. This crate is designed to change infrequently, enabling
//! incremental compilation benefits in the workspace.
//!
//! ## Modules
//!
//! - **errors**: Unified error handling with `AppError`, `ErrorCode`, and `ProviderError`
//! - **constants**: Application-wide constants organized by domain
//! - **models**: Babies, food intake, activities, and nutrition lookup results

/// Unified error handling system with standard error codes and HTTP responses
pub mod errors;

/// Application constants and configuration values organized by domain
pub mod constants;

/// Core data models (Baby, FoodIntake, Activity, nutrition lookup)
pub mod models;
