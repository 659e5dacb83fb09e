// ABOUTME: Health profile route handlers
// ABOUTME: Reads and wholesale-replaces the session's free-text health profile
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

use std::sync::Arc;

use axum::{
    extract::State,
    http::{HeaderMap, StatusCode},
    response::{IntoResponse, Response},
    routing::get,
    Json, Router,
};
use companion_core::models::HealthProfile;
use tracing::info;

use crate::errors::AppError;
use crate::resources::ServerResources;

/// Health profile routes
pub struct ProfileRoutes;

impl ProfileRoutes {
    /// Create profile routes
    pub fn routes(resources: Arc<ServerResources>) -> Router {
        Router::new()
            .route(
                "/api/profile",
                get(Self::handle_get_profile).put(Self::handle_update_profile),
            )
            .with_state(resources)
    }

    async fn handle_get_profile(
        State(resources): State<Arc<ServerResources>>,
        headers: HeaderMap,
    ) -> Result<Response, AppError> {
        let token = super::authenticate(&headers, &resources)?;
        let profile = resources
            .sessions
            .with_session(&token, |session| session.profile.clone())?;
        Ok((StatusCode::OK, Json(profile)).into_response())
    }

    async fn handle_update_profile(
        State(resources): State<Arc<ServerResources>>,
        headers: HeaderMap,
        Json(profile): Json<HealthProfile>,
    ) -> Result<Response, AppError> {
        let token = super::authenticate(&headers, &resources)?;
        let updated = resources.sessions.with_session(&token, |session| {
            session.profile = profile;
            info!(user.id = %session.identity, "Health profile updated");
            session.profile.clone()
        })?;
        Ok((StatusCode::OK, Json(updated)).into_response())
    }
}
