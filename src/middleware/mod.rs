// ABOUTME: HTTP middleware for request tracing and cross-origin access
// ABOUTME: Provides request ID propagation, span creation, and CORS setup for the API router
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

pub mod cors;
pub mod tracing;

// CORS configuration
pub use self::cors::setup_cors;

// Request tracing and request ID propagation
pub use self::tracing::{create_request_span, request_id_layers, RequestSpan, REQUEST_ID_HEADER};
