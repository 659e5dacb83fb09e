// ABOUTME: Tracker route handlers for water, streak, weight, target weight and BMI
// ABOUTME: Mutate session metrics and persist weight samples to the shared fitness log
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

//! Tracker routes
//!
//! Weight samples are queued to the fitness log writer; a failed write is
//! logged and never reaches the caller.

use std::sync::Arc;

use axum::{
    extract::State,
    http::{HeaderMap, StatusCode},
    response::{IntoResponse, Response},
    routing::{get, post, put},
    Json, Router,
};
use chrono::Local;
use companion_core::constants::{hydration::DAILY_WATER_GOAL_GLASSES, limits};
use companion_core::models::FitnessLogEntry;
use companion_intelligence::{compute_bmi, BmiCategory, MetricsSnapshot, TrendProjection};
use serde::{Deserialize, Serialize};
use tracing::info;

use crate::errors::{AppError, AppResult};
use crate::resources::ServerResources;

/// Log weight request
#[derive(Debug, Deserialize)]
pub struct LogWeightRequest {
    /// Weight in kilograms, 30 to 200
    pub weight_kg: f64,
}

/// Target weight request
#[derive(Debug, Deserialize)]
pub struct TargetWeightRequest {
    /// Target in kilograms, 30 to 200
    pub target_weight_kg: f64,
}

/// BMI calculator request
#[derive(Debug, Deserialize)]
pub struct BmiRequest {
    /// Height in centimetres, 100 to 250
    pub height_cm: f64,
    /// Weight in kilograms, 30 to 200
    pub weight_kg: f64,
}

/// Water counter after a glass
#[derive(Debug, Serialize, Deserialize)]
pub struct WaterResponse {
    /// Glasses today
    pub water_glasses: u32,
    /// Daily goal
    pub water_goal: u32,
    /// `min(glasses / goal, 1)`
    pub water_progress: f64,
}

/// Streak after logging a healthy day
#[derive(Debug, Serialize, Deserialize)]
pub struct StreakResponse {
    /// Healthy days logged
    pub streak_days: u32,
}

/// Result of logging a weight
#[derive(Debug, Serialize, Deserialize)]
pub struct LogWeightResponse {
    /// Logged weight
    pub weight_kg: f64,
    /// BMI when a height is remembered
    pub bmi: Option<f64>,
    /// Number of weights in this session
    pub entries_logged: usize,
    /// Latest weight within 1 kg of the target
    pub goal_reached: bool,
}

/// Result of setting the target
#[derive(Debug, Serialize, Deserialize)]
pub struct TargetWeightResponse {
    /// Stored target
    pub target_weight_kg: f64,
    /// Latest weight within 1 kg of the target
    pub goal_reached: bool,
}

/// BMI calculator result
#[derive(Debug, Serialize, Deserialize)]
pub struct BmiResponse {
    /// BMI rounded to two decimals
    pub bmi: f64,
    /// Classification
    pub category: BmiCategory,
    /// Display label
    pub label: String,
}

/// Trend projection, or why there is none
#[derive(Debug, Serialize)]
pub struct TrendResponse {
    /// True when a projection exists
    pub available: bool,
    /// Projected weight rounded to two decimals
    pub predicted_weight_kg: Option<f64>,
    /// Full projection
    pub projection: Option<TrendProjection>,
    /// Explanation when unavailable
    pub message: Option<String>,
}

/// Round to two decimals for display
pub(crate) fn round2(value: f64) -> f64 {
    (value * 100.0).round() / 100.0
}

fn ensure_in_range(field: &str, value: f64, min: f64, max: f64) -> AppResult<()> {
    if value.is_finite() && (min..=max).contains(&value) {
        Ok(())
    } else {
        Err(AppError::out_of_range(field, min, max, value))
    }
}

/// Tracker routes
pub struct TrackerRoutes;

impl TrackerRoutes {
    /// Create tracker routes
    pub fn routes(resources: Arc<ServerResources>) -> Router {
        Router::new()
            .route("/api/water", post(Self::handle_record_water))
            .route("/api/streak", post(Self::handle_log_streak))
            .route("/api/weight", post(Self::handle_log_weight))
            .route("/api/target", put(Self::handle_set_target))
            .route("/api/bmi", post(Self::handle_bmi))
            .route("/api/metrics", get(Self::handle_metrics))
            .route("/api/trend", get(Self::handle_trend))
            .with_state(resources)
    }

    async fn handle_record_water(
        State(resources): State<Arc<ServerResources>>,
        headers: HeaderMap,
    ) -> Result<Response, AppError> {
        let token = super::authenticate(&headers, &resources)?;
        let water_glasses = resources.sessions.with_session(&token, |session| {
            session.metrics.record_water();
            session.metrics.water_glasses()
        })?;

        Ok((
            StatusCode::OK,
            Json(WaterResponse {
                water_glasses,
                water_goal: DAILY_WATER_GOAL_GLASSES,
                water_progress: (f64::from(water_glasses) / f64::from(DAILY_WATER_GOAL_GLASSES))
                    .min(1.0),
            }),
        )
            .into_response())
    }

    async fn handle_log_streak(
        State(resources): State<Arc<ServerResources>>,
        headers: HeaderMap,
    ) -> Result<Response, AppError> {
        let token = super::authenticate(&headers, &resources)?;
        let streak_days = resources.sessions.with_session(&token, |session| {
            session.metrics.log_streak_day();
            session.metrics.streak_days()
        })?;
        Ok((StatusCode::OK, Json(StreakResponse { streak_days })).into_response())
    }

    async fn handle_log_weight(
        State(resources): State<Arc<ServerResources>>,
        headers: HeaderMap,
        Json(request): Json<LogWeightRequest>,
    ) -> Result<Response, AppError> {
        let token = super::authenticate(&headers, &resources)?;
        ensure_in_range(
            "weight_kg",
            request.weight_kg,
            limits::WEIGHT_MIN_KG,
            limits::WEIGHT_MAX_KG,
        )?;

        let (entry, response) = resources.sessions.with_session(&token, |session| {
            let record = session.metrics.log_weight(
                request.weight_kg,
                session.height_cm,
                Local::now().naive_local(),
            );
            let entry = FitnessLogEntry {
                username: session.identity.clone(),
                weight: record.weight_kg,
                water: record.water_glasses,
                bmi: record.bmi,
                date: record.timestamp,
            };
            let response = LogWeightResponse {
                weight_kg: record.weight_kg,
                bmi: record.bmi.map(round2),
                entries_logged: session.metrics.weight_history().len(),
                goal_reached: session.metrics.goal_reached(),
            };
            (entry, response)
        })?;

        info!(user.id = %entry.username, weight = entry.weight, "Weight logged");

        resources.fitness_writer.enqueue(entry);

        Ok((StatusCode::OK, Json(response)).into_response())
    }

    async fn handle_set_target(
        State(resources): State<Arc<ServerResources>>,
        headers: HeaderMap,
        Json(request): Json<TargetWeightRequest>,
    ) -> Result<Response, AppError> {
        let token = super::authenticate(&headers, &resources)?;
        let response = resources
            .sessions
            .with_session(&token, |session| -> AppResult<TargetWeightResponse> {
                let target = session.metrics.set_target_weight(request.target_weight_kg)?;
                Ok(TargetWeightResponse {
                    target_weight_kg: target.kg(),
                    goal_reached: session.metrics.goal_reached(),
                })
            })??;
        Ok((StatusCode::OK, Json(response)).into_response())
    }

    async fn handle_bmi(
        State(resources): State<Arc<ServerResources>>,
        headers: HeaderMap,
        Json(request): Json<BmiRequest>,
    ) -> Result<Response, AppError> {
        let token = super::authenticate(&headers, &resources)?;
        ensure_in_range(
            "height_cm",
            request.height_cm,
            limits::HEIGHT_MIN_CM,
            limits::HEIGHT_MAX_CM,
        )?;
        ensure_in_range(
            "weight_kg",
            request.weight_kg,
            limits::WEIGHT_MIN_KG,
            limits::WEIGHT_MAX_KG,
        )?;

        let bmi = compute_bmi(request.weight_kg, Some(request.height_cm))
            .ok_or_else(|| AppError::invalid_input("BMI cannot be computed for this height"))?;

        resources.sessions.with_session(&token, |session| {
            session.height_cm = Some(request.height_cm);
        })?;

        let category = BmiCategory::from_bmi(bmi);
        Ok((
            StatusCode::OK,
            Json(BmiResponse {
                bmi: round2(bmi),
                category,
                label: category.label().to_owned(),
            }),
        )
            .into_response())
    }

    async fn handle_metrics(
        State(resources): State<Arc<ServerResources>>,
        headers: HeaderMap,
    ) -> Result<Response, AppError> {
        let token = super::authenticate(&headers, &resources)?;
        let snapshot: MetricsSnapshot = resources
            .sessions
            .with_session(&token, |session| session.metrics.snapshot(session.height_cm))?;
        Ok((StatusCode::OK, Json(snapshot)).into_response())
    }

    async fn handle_trend(
        State(resources): State<Arc<ServerResources>>,
        headers: HeaderMap,
    ) -> Result<Response, AppError> {
        let token = super::authenticate(&headers, &resources)?;
        let trend = resources
            .sessions
            .with_session(&token, |session| session.metrics.compute_trend())?;

        let response = match trend {
            Ok(projection) => TrendResponse {
                available: true,
                predicted_weight_kg: Some(round2(projection.predicted_weight_kg)),
                projection: Some(projection),
                message: None,
            },
            Err(e) => TrendResponse {
                available: false,
                predicted_weight_kg: None,
                projection: None,
                message: Some(e.to_string()),
            },
        };
        Ok((StatusCode::OK, Json(response)).into_response())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_round2() {
        assert!((round2(22.857_142) - 22.86).abs() < f64::EPSILON);
        assert!((round2(71.0) - 71.0).abs() < f64::EPSILON);
    }

    #[test]
    fn test_range_check() {
        assert!(ensure_in_range("height_cm", 175.0, 100.0, 250.0).is_ok());
        assert!(ensure_in_range("height_cm", 99.9, 100.0, 250.0).is_err());
        assert!(ensure_in_range("height_cm", f64::NAN, 100.0, 250.0).is_err());
    }
}
