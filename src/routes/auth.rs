// ABOUTME: Authentication route handlers for demo login, password reset demo and Google sign-in
// ABOUTME: Successful logins create a session and return its bearer token
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

//! Authentication routes
//!
//! Handlers are thin: credential checks live in [`crate::auth`], session
//! state in [`crate::session`].

use std::sync::Arc;

use axum::{
    extract::{Query, State},
    http::{HeaderMap, StatusCode},
    response::{IntoResponse, Response},
    routing::{get, post},
    Json, Router,
};
use serde::{Deserialize, Serialize};
use tracing::warn;

use crate::constants::messages;
use crate::errors::{AppError, ErrorCode};
use crate::resources::ServerResources;

/// Email login request
#[derive(Debug, Deserialize)]
pub struct LoginRequest {
    /// Email address
    pub email: String,
    /// Password
    pub password: String,
}

/// Successful login
#[derive(Debug, Serialize, Deserialize)]
pub struct LoginResponse {
    /// Bearer token for subsequent requests
    pub token: String,
    /// Session identity
    pub user: String,
}

/// Forgot-password request
#[derive(Debug, Deserialize)]
pub struct ForgotPasswordRequest {
    /// Email address to reset
    pub email: String,
}

/// Plain confirmation message
#[derive(Debug, Serialize, Deserialize)]
pub struct MessageResponse {
    /// Human-readable message
    pub message: String,
}

/// Google consent URL
#[derive(Debug, Serialize, Deserialize)]
pub struct AuthorizationUrlResponse {
    /// URL the browser should visit
    pub authorization_url: String,
}

/// Query parameters Google appends to the redirect
#[derive(Debug, Deserialize)]
pub struct GoogleCallbackQuery {
    /// Authorization code
    pub code: Option<String>,
    /// Opaque state issued with the consent URL
    pub state: Option<String>,
    /// Error reported by Google (e.g. `access_denied`)
    pub error: Option<String>,
}

/// Authentication routes
pub struct AuthRoutes;

impl AuthRoutes {
    /// Create all authentication routes
    pub fn routes(resources: Arc<ServerResources>) -> Router {
        Router::new()
            .route("/auth/login", post(Self::handle_login))
            .route("/auth/forgot-password", post(Self::handle_forgot_password))
            .route("/auth/google", get(Self::handle_google_authorize))
            .route("/auth/google/callback", get(Self::handle_google_callback))
            .route("/auth/logout", post(Self::handle_logout))
            .with_state(resources)
    }

    fn session_response(resources: &ServerResources, identity: String) -> Response {
        let token = resources.sessions.create(&identity);
        (
            StatusCode::OK,
            Json(LoginResponse {
                token: token.to_string(),
                user: identity,
            }),
        )
            .into_response()
    }

    async fn handle_login(
        State(resources): State<Arc<ServerResources>>,
        Json(request): Json<LoginRequest>,
    ) -> Result<Response, AppError> {
        let identity = resources
            .credentials
            .login(&request.email, &request.password)?;
        Ok(Self::session_response(&resources, identity))
    }

    async fn handle_forgot_password(
        State(resources): State<Arc<ServerResources>>,
        Json(request): Json<ForgotPasswordRequest>,
    ) -> Result<Response, AppError> {
        let message = resources.credentials.forgot_password(&request.email)?;
        Ok((
            StatusCode::OK,
            Json(MessageResponse {
                message: message.to_owned(),
            }),
        )
            .into_response())
    }

    async fn handle_google_authorize(
        State(resources): State<Arc<ServerResources>>,
    ) -> Result<Response, AppError> {
        let google = resources
            .google
            .as_ref()
            .ok_or_else(|| AppError::config_missing(messages::GOOGLE_NOT_CONFIGURED))?;
        let authorization_url = google.authorization_url()?;
        Ok((
            StatusCode::OK,
            Json(AuthorizationUrlResponse { authorization_url }),
        )
            .into_response())
    }

    async fn handle_google_callback(
        State(resources): State<Arc<ServerResources>>,
        Query(query): Query<GoogleCallbackQuery>,
    ) -> Result<Response, AppError> {
        let google = resources
            .google
            .as_ref()
            .ok_or_else(|| AppError::config_missing(messages::GOOGLE_NOT_CONFIGURED))?;

        if let Some(error) = query.error {
            warn!(oauth.error = %error, "Google sign-in was not granted");
            return Err(AppError::new(
                ErrorCode::ExternalAuthFailed,
                messages::GOOGLE_LOGIN_FAILED,
            ));
        }

        let code = query
            .code
            .filter(|code| !code.is_empty())
            .ok_or_else(|| AppError::missing_field("code is required"))?;

        let identity = google.complete(&code, query.state.as_deref()).await?;
        Ok(Self::session_response(&resources, identity))
    }

    async fn handle_logout(
        State(resources): State<Arc<ServerResources>>,
        headers: HeaderMap,
    ) -> Result<Response, AppError> {
        let token = super::authenticate(&headers, &resources)?;
        resources.sessions.remove(&token);
        Ok((
            StatusCode::OK,
            Json(MessageResponse {
                message: "Logged out".to_owned(),
            }),
        )
            .into_response())
    }
}
