// ABOUTME: In-memory session registry mapping bearer tokens to per-user health state
// ABOUTME: Sessions are created at login, observed with a daily water reset, and dropped at logout
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

//! # Session Registry
//!
//! Each login creates a [`UserSession`] keyed by a random UUID token. Handlers
//! reach the state through [`SessionStore::with_session`], which applies the
//! daily water reset before running the closure. Entries are locked only for
//! the duration of that synchronous closure.

use chrono::{DateTime, Local, NaiveDate, Utc};
use companion_core::models::HealthProfile;
use companion_intelligence::SessionMetrics;
use dashmap::DashMap;
use tracing::{debug, info};
use uuid::Uuid;

use crate::errors::{AppError, AppResult};

/// State owned by one logged-in session
#[derive(Debug, Clone)]
pub struct UserSession {
    /// Who logged in (demo email or `google_user`)
    pub identity: String,
    /// Free-text health profile
    pub profile: HealthProfile,
    /// Tracker state
    pub metrics: SessionMetrics,
    /// Height remembered from the BMI calculator
    pub height_cm: Option<f64>,
    /// Login time
    pub created_at: DateTime<Utc>,
}

impl UserSession {
    /// Fresh session for `identity` starting on `today`
    #[must_use]
    pub fn new(identity: impl Into<String>, today: NaiveDate) -> Self {
        Self {
            identity: identity.into(),
            profile: HealthProfile::default(),
            metrics: SessionMetrics::new(today),
            height_cm: None,
            created_at: Utc::now(),
        }
    }
}

/// Concurrent token → session map
#[derive(Debug, Default)]
pub struct SessionStore {
    sessions: DashMap<Uuid, UserSession>,
}

impl SessionStore {
    /// Create an empty registry
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Start a session and return its bearer token
    pub fn create(&self, identity: &str) -> Uuid {
        let token = Uuid::new_v4();
        self.sessions
            .insert(token, UserSession::new(identity, Local::now().date_naive()));
        info!(user.id = %identity, "Session created");
        token
    }

    /// Run `f` against the session using the local calendar date
    ///
    /// # Errors
    ///
    /// Returns `AUTH_REQUIRED` when the token is unknown
    pub fn with_session<T>(
        &self,
        token: &Uuid,
        f: impl FnOnce(&mut UserSession) -> T,
    ) -> AppResult<T> {
        self.with_session_on(token, Local::now().date_naive(), f)
    }

    /// Run `f` against the session as observed on `today`
    ///
    /// # Errors
    ///
    /// Returns `AUTH_REQUIRED` when the token is unknown
    pub fn with_session_on<T>(
        &self,
        token: &Uuid,
        today: NaiveDate,
        f: impl FnOnce(&mut UserSession) -> T,
    ) -> AppResult<T> {
        let mut entry = self
            .sessions
            .get_mut(token)
            .ok_or_else(AppError::auth_required)?;
        let session = entry.value_mut();
        if session.metrics.reset_water_if_new_day(today) {
            debug!(user.id = %session.identity, "Water intake reset for new day");
        }
        Ok(f(session))
    }

    /// Resolve a raw bearer token string
    ///
    /// # Errors
    ///
    /// Returns `AUTH_REQUIRED` when the string is not a known session token
    pub fn resolve(&self, raw_token: &str) -> AppResult<Uuid> {
        let token = Uuid::parse_str(raw_token.trim()).map_err(|_| AppError::auth_required())?;
        if self.sessions.contains_key(&token) {
            Ok(token)
        } else {
            Err(AppError::auth_required())
        }
    }

    /// End a session, discarding its state
    pub fn remove(&self, token: &Uuid) -> bool {
        let removed = self.sessions.remove(token);
        if let Some((_, session)) = &removed {
            info!(user.id = %session.identity, "Session ended");
        }
        removed.is_some()
    }

    /// Number of live sessions
    #[must_use]
    pub fn len(&self) -> usize {
        self.sessions.len()
    }

    /// True when no sessions are live
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.sessions.is_empty()
    }
}
