// ABOUTME: Error types for the API server, re-exported from babycare-core
// ABOUTME: Keeps `crate::errors::AppError` paths stable across server modules
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

pub use babycare_core::errors::{
    AppError, AppResult, ErrorCode, ErrorResponse, ErrorResponseDetails, ProviderError,
    ProviderResult,
};
