// ABOUTME: Route module organization for the Health Companion HTTP API
// ABOUTME: Groups handlers by domain and provides the shared bearer-token authentication helper
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

//! Route module for the Health Companion
//!
//! Each domain module exposes a `*Routes` type with a `routes` constructor
//! and thin handlers that delegate to the session, storage and assistant
//! layers.

/// AI assistant routes (meal plans, food analysis, insights, coaching, reports)
pub mod assistant;
/// Login, logout and Google sign-in routes
pub mod auth;
/// Dashboard, leaderboard and quote routes
pub mod dashboard;
/// Health check routes
pub mod health;
/// Health profile routes
pub mod profile;
/// Water, streak, weight, target and BMI tracker routes
pub mod tracker;

pub use assistant::AssistantRoutes;
pub use auth::AuthRoutes;
pub use dashboard::DashboardRoutes;
pub use health::HealthRoutes;
pub use profile::ProfileRoutes;
pub use tracker::TrackerRoutes;

use axum::http::{header, HeaderMap};
use uuid::Uuid;

use crate::errors::{AppError, AppResult};
use crate::resources::ServerResources;

/// Resolve the `Authorization: Bearer <token>` header to a live session token
///
/// # Errors
///
/// Returns `AUTH_REQUIRED` when the header is missing, malformed or names no session
pub fn authenticate(headers: &HeaderMap, resources: &ServerResources) -> AppResult<Uuid> {
    let raw = headers
        .get(header::AUTHORIZATION)
        .and_then(|value| value.to_str().ok())
        .and_then(|value| value.strip_prefix("Bearer "))
        .ok_or_else(AppError::auth_required)?;

    resources.sessions.resolve(raw)
}
