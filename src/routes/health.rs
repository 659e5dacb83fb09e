// ABOUTME: Health check route handlers for service monitoring and status endpoints
// ABOUTME: Provides liveness and readiness endpoints including optional feature status
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

//! Health check routes for service monitoring

use std::sync::Arc;

use axum::{extract::State, routing::get, Json, Router};
use serde_json::{json, Value};

use crate::constants::service_names;
use crate::resources::ServerResources;

/// Health routes implementation
pub struct HealthRoutes;

impl HealthRoutes {
    /// Create all health check routes
    pub fn routes(resources: Arc<ServerResources>) -> Router {
        Router::new()
            .route("/health", get(Self::health_handler))
            .route("/ready", get(Self::ready_handler))
            .with_state(resources)
    }

    async fn health_handler() -> Json<Value> {
        Json(json!({
            "status": "healthy",
            "service": service_names::HEALTH_COMPANION,
            "version": env!("CARGO_PKG_VERSION"),
            "timestamp": chrono::Utc::now().to_rfc3339()
        }))
    }

    async fn ready_handler(State(resources): State<Arc<ServerResources>>) -> Json<Value> {
        Json(json!({
            "status": "ready",
            "features": {
                "ai_assistant": resources.assistant.is_available(),
                "google_login": resources.google.is_some()
            },
            "timestamp": chrono::Utc::now().to_rfc3339()
        }))
    }
}
