// ABOUTME: Dashboard route handlers for tracker tiles, the weight chart, leaderboard and quotes
// ABOUTME: Reads session state and the shared fitness log without mutating either
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

//! Dashboard routes
//!
//! The leaderboard aggregates every session's rows from the fitness log, so
//! any logged-in user can see it.

use std::sync::Arc;

use axum::{
    extract::State,
    http::{HeaderMap, StatusCode},
    response::{IntoResponse, Response},
    routing::get,
    Json, Router,
};
use companion_core::models::LeaderboardEntry;
use rand::seq::SliceRandom;
use serde::{Deserialize, Serialize};

use crate::errors::AppError;
use crate::resources::ServerResources;

/// Motivational quotes shown on the home screen
pub const QUOTES: &[&str] = &[
    "Your body can stand almost anything. It's your mind you have to convince.",
    "Small progress is still progress.",
    "Consistency beats motivation.",
    "Eat clean. Train dirty.",
    "Healthy is not a size, it's a lifestyle.",
];

/// Shown in place of a missing latest weight
const NOT_AVAILABLE: &str = "N/A";

/// One point of the weight chart
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ChartPoint {
    /// 1-based entry number
    pub day: usize,
    /// Logged weight
    pub weight_kg: f64,
}

/// Dashboard tiles and chart
#[derive(Debug, Serialize, Deserialize)]
pub struct DashboardResponse {
    /// Glasses of water today
    pub water_today: u32,
    /// Weights logged this session
    pub entries_logged: usize,
    /// Latest weight, if any
    pub latest_weight_kg: Option<f64>,
    /// Latest weight for display, `N/A` when none
    pub latest_weight: String,
    /// Health score out of 100
    pub health_score: u32,
    /// Weight chart series
    pub chart: Vec<ChartPoint>,
}

/// Leaderboard rows
#[derive(Debug, Serialize, Deserialize)]
pub struct LeaderboardResponse {
    /// Users ordered by entries logged
    pub entries: Vec<LeaderboardEntry>,
}

/// Quote of the moment
#[derive(Debug, Serialize, Deserialize)]
pub struct QuoteResponse {
    /// Quote text
    pub quote: String,
}

/// Dashboard routes
pub struct DashboardRoutes;

impl DashboardRoutes {
    /// Create dashboard routes
    pub fn routes(resources: Arc<ServerResources>) -> Router {
        Router::new()
            .route("/api/dashboard", get(Self::handle_dashboard))
            .route("/api/leaderboard", get(Self::handle_leaderboard))
            .route("/api/quote", get(Self::handle_quote))
            .with_state(resources)
    }

    async fn handle_dashboard(
        State(resources): State<Arc<ServerResources>>,
        headers: HeaderMap,
    ) -> Result<Response, AppError> {
        let token = super::authenticate(&headers, &resources)?;
        let dashboard = resources.sessions.with_session(&token, |session| {
            let metrics = &session.metrics;
            let latest = metrics.latest_weight();
            DashboardResponse {
                water_today: metrics.water_glasses(),
                entries_logged: metrics.weight_history().len(),
                latest_weight_kg: latest,
                latest_weight: latest.map_or_else(|| NOT_AVAILABLE.to_owned(), |w| w.to_string()),
                health_score: metrics.compute_health_score(
                    session.height_cm,
                    metrics.target_weight().map(f64::from),
                ),
                chart: metrics
                    .weight_history()
                    .iter()
                    .enumerate()
                    .map(|(i, &weight_kg)| ChartPoint {
                        day: i + 1,
                        weight_kg,
                    })
                    .collect(),
            }
        })?;
        Ok((StatusCode::OK, Json(dashboard)).into_response())
    }

    async fn handle_leaderboard(
        State(resources): State<Arc<ServerResources>>,
        headers: HeaderMap,
    ) -> Result<Response, AppError> {
        super::authenticate(&headers, &resources)?;
        let entries = resources.fitness_log.leaderboard().await;
        Ok((StatusCode::OK, Json(LeaderboardResponse { entries })).into_response())
    }

    async fn handle_quote(
        State(resources): State<Arc<ServerResources>>,
        headers: HeaderMap,
    ) -> Result<Response, AppError> {
        super::authenticate(&headers, &resources)?;
        let quote = QUOTES
            .choose(&mut rand::thread_rng())
            .copied()
            .unwrap_or_default();
        Ok((
            StatusCode::OK,
            Json(QuoteResponse {
                quote: quote.to_owned(),
            }),
        )
            .into_response())
    }
}
