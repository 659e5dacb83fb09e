// ABOUTME: Demo email/password login, forgot-password demo and Google sign-in flow
// ABOUTME: Credential comparison is constant time; Google login uses the OAuth2 code flow
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

//! # Authentication
//!
//! Two ways in: a single configured email/password pair, or Google sign-in.
//! Neither stores passwords or tokens; success only yields a session identity.

use std::path::Path;

use chrono::{DateTime, Duration, Utc};
use dashmap::DashMap;
use subtle::ConstantTimeEq;
use tracing::{info, warn};
use uuid::Uuid;

use crate::config::{DemoCredentials, GoogleOAuthConfig};
use crate::constants::{identities, messages};
use crate::errors::{AppError, AppResult, ErrorCode};
use crate::oauth2_client::{OAuth2Client, OAuth2Config};

/// How long an issued OAuth `state` stays valid
const OAUTH_STATE_TTL_MINUTES: i64 = 10;

/// Checks the configured demo credentials
#[derive(Debug, Clone)]
pub struct CredentialAuthenticator {
    credentials: DemoCredentials,
}

impl CredentialAuthenticator {
    /// Create an authenticator for one email/password pair
    #[must_use]
    pub const fn new(credentials: DemoCredentials) -> Self {
        Self { credentials }
    }

    /// Verify an email/password pair and return the session identity
    ///
    /// # Errors
    ///
    /// Returns `AUTH_INVALID` when either value does not match
    pub fn login(&self, email: &str, password: &str) -> AppResult<String> {
        let email_ok = email.as_bytes().ct_eq(self.credentials.email.as_bytes());
        let password_ok = password
            .as_bytes()
            .ct_eq(self.credentials.password.as_bytes());

        if bool::from(email_ok & password_ok) {
            info!(auth.event = "login", auth.method = "password", auth.success = true, "Authentication event");
            Ok(self.credentials.email.clone())
        } else {
            warn!(auth.event = "login", auth.method = "password", auth.success = false, "Authentication event");
            Err(AppError::auth_invalid(messages::INVALID_CREDENTIALS))
        }
    }

    /// Demo password reset: only the configured email is known
    ///
    /// # Errors
    ///
    /// Returns `RESOURCE_NOT_FOUND` for any other email
    pub fn forgot_password(&self, email: &str) -> AppResult<&'static str> {
        if email.trim() == self.credentials.email {
            info!(auth.event = "forgot_password", "Password reset demo link issued");
            Ok(messages::RESET_LINK_SENT)
        } else {
            Err(AppError::new(
                ErrorCode::ResourceNotFound,
                messages::EMAIL_NOT_FOUND,
            ))
        }
    }
}

/// Google sign-in via the OAuth2 authorization-code flow
#[derive(Debug)]
pub struct GoogleAuth {
    client: OAuth2Client,
    pending_states: DashMap<String, DateTime<Utc>>,
}

impl GoogleAuth {
    /// Wrap an OAuth2 client configured for Google
    #[must_use]
    pub fn new(config: OAuth2Config) -> Self {
        Self {
            client: OAuth2Client::new(config),
            pending_states: DashMap::new(),
        }
    }

    /// Load Google client secrets; `None` (with a warning) when unavailable
    #[must_use]
    pub fn from_config(config: &GoogleOAuthConfig) -> Option<Self> {
        Self::load(&config.client_secret_path, &config.redirect_uri)
    }

    fn load(path: &Path, redirect_uri: &str) -> Option<Self> {
        match OAuth2Config::load_google_client_secret(path, redirect_uri) {
            Ok(config) => {
                info!(redirect_uri, "Google sign-in enabled");
                Some(Self::new(config))
            }
            Err(e) => {
                warn!(path = %path.display(), error = %e, "Google sign-in disabled");
                None
            }
        }
    }

    /// Build the Google consent URL with a fresh `state`
    ///
    /// # Errors
    ///
    /// Returns `CONFIG_ERROR` if the configured authorization endpoint is not a URL
    pub fn authorization_url(&self) -> AppResult<String> {
        let now = Utc::now();
        let cutoff = now - Duration::minutes(OAUTH_STATE_TTL_MINUTES);
        self.pending_states.retain(|_, issued| *issued > cutoff);

        let state = Uuid::new_v4().to_string();
        let url = self
            .client
            .get_authorization_url(&state)
            .map_err(|e| AppError::config(format!("Invalid Google authorization URL: {e}")))?;
        self.pending_states.insert(state, now);
        Ok(url)
    }

    /// Exchange the callback code; success yields the Google session identity
    ///
    /// A `state` that was never issued (or already used) is rejected. The
    /// callback may omit `state` entirely.
    ///
    /// # Errors
    ///
    /// Returns `EXTERNAL_AUTH_FAILED` when the state is unknown or the exchange fails
    pub async fn complete(&self, code: &str, state: Option<&str>) -> AppResult<String> {
        if let Some(state) = state {
            if self.pending_states.remove(state).is_none() {
                warn!(auth.event = "google_callback", "Unknown OAuth state");
                return Err(Self::login_failed());
            }
        }

        match self.client.exchange_code(code).await {
            Ok(_token) => {
                info!(auth.event = "login", auth.method = "google", auth.success = true, "Authentication event");
                Ok(identities::GOOGLE_USER.to_owned())
            }
            Err(e) => {
                warn!(auth.event = "login", auth.method = "google", error = %e, "Google code exchange failed");
                Err(Self::login_failed())
            }
        }
    }

    fn login_failed() -> AppError {
        AppError::new(ErrorCode::ExternalAuthFailed, messages::GOOGLE_LOGIN_FAILED)
    }
}
