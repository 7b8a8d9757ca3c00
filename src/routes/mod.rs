// ABOUTME: Route module organization for the employ server HTTP endpoints
// ABOUTME: Assembles the router with CORS and request tracing layers
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

//! Route module for the employ server

/// Health check and diagnostic routes
pub mod health;

pub use health::HealthRoutes;

use axum::Router;
use employ_core::constants::endpoints;
use tower_http::trace::TraceLayer;

use crate::context::ServerContext;
use crate::middleware::setup_cors;

/// Paths mounted by [`build_router`]
const MOUNTED_PATHS: &[&str] = &[endpoints::HEALTH, endpoints::READY, endpoints::HEALTH_CHECK];

/// Endpoint inventory reported by the diagnostic health check
#[must_use]
pub fn registered_endpoints() -> Vec<String> {
    MOUNTED_PATHS.iter().map(|path| (*path).to_owned()).collect()
}

/// Build the complete application router
pub fn build_router(context: ServerContext) -> Router {
    let cors = setup_cors(context.settings().cors());

    Router::new()
        .merge(HealthRoutes::routes())
        .merge(HealthRoutes::diagnostic_routes(context, registered_endpoints()))
        .layer(TraceLayer::new_for_http())
        .layer(cors)
}
