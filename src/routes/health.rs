// ABOUTME: Health check route handlers for liveness, readiness and the configuration diagnostic report
// ABOUTME: The diagnostic report is guarded by basic auth when it is enabled
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

//! Health check routes for service monitoring
//!
//! `/health` and `/ready` are unauthenticated probes for load balancers.
//! `/admin/health/check` returns the full [`HealthCheckReport`].

use std::sync::Arc;

use axum::extract::State;
use axum::routing::get;
use axum::{middleware, Json, Router};
use employ_core::constants::endpoints;
use serde_json::{json, Value};

use crate::context::ServerContext;
use crate::health::HealthCheckReport;
use crate::middleware::require_basic_auth;

#[derive(Clone)]
struct DiagnosticsState {
    context: ServerContext,
    endpoints: Arc<[String]>,
}

/// Health routes implementation
pub struct HealthRoutes;

impl HealthRoutes {
    /// Liveness and readiness probes
    pub fn routes() -> Router {
        async fn health_handler() -> Json<Value> {
            Json(json!({
                "status": "healthy",
                "timestamp": chrono::Utc::now().to_rfc3339()
            }))
        }

        async fn ready_handler() -> Json<Value> {
            Json(json!({
                "status": "ready",
                "timestamp": chrono::Utc::now().to_rfc3339()
            }))
        }

        Router::new()
            .route(endpoints::HEALTH, get(health_handler))
            .route(endpoints::READY, get(ready_handler))
    }

    /// Diagnostic report route; `inventory` is the list reported as registered endpoints
    pub fn diagnostic_routes(context: ServerContext, inventory: Vec<String>) -> Router {
        let state = DiagnosticsState {
            context: context.clone(),
            endpoints: Arc::from(inventory),
        };

        Router::new()
            .route(endpoints::HEALTH_CHECK, get(health_check_handler))
            .with_state(state)
            .layer(middleware::from_fn_with_state(context, require_basic_auth))
    }
}

async fn health_check_handler(State(state): State<DiagnosticsState>) -> Json<HealthCheckReport> {
    let report = state
        .context
        .health_checker()
        .check(&state.endpoints)
        .await;
    Json(report)
}
