// ABOUTME: AI assistant route handlers for meal plans, food photos, insights, coaching and reports
// ABOUTME: Always answer with text; AI failures become inline messages rather than HTTP errors
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

//! Assistant routes
//!
//! Session data is copied out of the registry before the AI call so no
//! session entry is held across an await.

use std::sync::Arc;

use axum::{
    extract::State,
    http::{header, HeaderMap, HeaderValue, StatusCode},
    response::{IntoResponse, Response},
    routing::post,
    Json, Router,
};
use base64::engine::general_purpose::STANDARD as BASE64;
use base64::Engine;
use companion_core::models::HealthProfile;
use serde::{Deserialize, Serialize};
use tracing::{debug, info};
use uuid::Uuid;

use crate::constants::messages;
use crate::errors::{AppError, AppResult};
use crate::llm::prompts;
use crate::llm::InlineImage;
use crate::resources::ServerResources;

/// MIME types accepted for food photos
pub const ACCEPTED_IMAGE_TYPES: &[&str] = &["image/jpeg", "image/png"];

/// Meal plan request
#[derive(Debug, Default, Deserialize)]
pub struct MealPlanRequest {
    /// Extra requirements, e.g. "quick meals for work"
    #[serde(default)]
    pub requirements: String,
}

/// Food photo upload
#[derive(Debug, Deserialize)]
pub struct FoodAnalysisRequest {
    /// `image/jpeg` or `image/png`
    pub mime_type: String,
    /// Base64 image bytes, optionally as a `data:` URL
    pub image_base64: String,
}

/// Health question
#[derive(Debug, Default, Deserialize)]
pub struct InsightsRequest {
    /// Free-text question
    #[serde(default)]
    pub question: String,
}

/// Assistant answer
#[derive(Debug, Serialize, Deserialize)]
pub struct AssistantResponse {
    /// Model output, or a warning/error message
    pub text: String,
    /// True when the AI was not called because input was missing
    #[serde(default)]
    pub warning: bool,
}

impl AssistantResponse {
    fn answer(text: String) -> Self {
        Self {
            text,
            warning: false,
        }
    }

    fn warning(text: &str) -> Self {
        Self {
            text: text.to_owned(),
            warning: true,
        }
    }
}

/// Tracker state copied out of a session for prompt rendering
struct PromptContext {
    identity: String,
    profile: HealthProfile,
    water_glasses: u32,
    weights: Vec<f64>,
    target_weight_kg: Option<f64>,
}

impl PromptContext {
    fn load(resources: &ServerResources, token: &Uuid) -> AppResult<Self> {
        resources.sessions.with_session(token, |session| Self {
            identity: session.identity.clone(),
            profile: session.profile.clone(),
            water_glasses: session.metrics.water_glasses(),
            weights: session.metrics.weight_history().to_vec(),
            target_weight_kg: session.metrics.target_weight().map(f64::from),
        })
    }
}

/// Decode an uploaded image, accepting raw base64 or a `data:<mime>;base64,` URL
fn decode_image(request: &FoodAnalysisRequest) -> AppResult<InlineImage> {
    let mime_type = request.mime_type.trim().to_lowercase();
    if !ACCEPTED_IMAGE_TYPES.contains(&mime_type.as_str()) {
        return Err(AppError::invalid_input(format!(
            "Unsupported image type '{}'; use image/jpeg or image/png",
            request.mime_type
        )));
    }

    let payload = request.image_base64.trim();
    let payload = payload
        .split_once(";base64,")
        .map_or(payload, |(_, data)| data);
    if payload.is_empty() {
        return Err(AppError::missing_field("image_base64 is required"));
    }

    let bytes = BASE64
        .decode(payload)
        .map_err(|e| AppError::invalid_input(format!("image_base64 is not valid base64: {e}")))?;
    Ok(InlineImage::new(mime_type, bytes))
}

/// Assistant routes
pub struct AssistantRoutes;

impl AssistantRoutes {
    /// Create assistant routes
    pub fn routes(resources: Arc<ServerResources>) -> Router {
        Router::new()
            .route("/api/ai/meal-plan", post(Self::handle_meal_plan))
            .route(
                "/api/ai/meal-plan/download",
                post(Self::handle_meal_plan_download),
            )
            .route("/api/ai/food-analysis", post(Self::handle_food_analysis))
            .route("/api/ai/insights", post(Self::handle_insights))
            .route("/api/ai/coach", post(Self::handle_coach))
            .route("/api/ai/risk", post(Self::handle_risk))
            .route("/api/ai/weekly-report", post(Self::handle_weekly_report))
            .with_state(resources)
    }

    fn respond(response: AssistantResponse) -> Response {
        (StatusCode::OK, Json(response)).into_response()
    }

    async fn meal_plan_text(
        resources: &ServerResources,
        headers: &HeaderMap,
        request: &MealPlanRequest,
    ) -> AppResult<AssistantResponse> {
        let token = super::authenticate(headers, resources)?;
        let context = PromptContext::load(resources, &token)?;
        if context.profile.is_empty() {
            return Ok(AssistantResponse::warning(messages::EMPTY_PROFILE));
        }

        info!(user.id = %context.identity, "Generating meal plan");
        let prompt = prompts::meal_plan(&context.profile, &request.requirements);
        Ok(AssistantResponse::answer(
            resources.assistant.generate(&prompt, Vec::new()).await,
        ))
    }

    async fn handle_meal_plan(
        State(resources): State<Arc<ServerResources>>,
        headers: HeaderMap,
        Json(request): Json<MealPlanRequest>,
    ) -> Result<Response, AppError> {
        let response = Self::meal_plan_text(&resources, &headers, &request).await?;
        Ok(Self::respond(response))
    }

    async fn handle_meal_plan_download(
        State(resources): State<Arc<ServerResources>>,
        headers: HeaderMap,
        Json(request): Json<MealPlanRequest>,
    ) -> Result<Response, AppError> {
        let response = Self::meal_plan_text(&resources, &headers, &request).await?;
        let disposition = format!("attachment; filename=\"{}\"", messages::MEAL_PLAN_FILENAME);
        let disposition = HeaderValue::from_str(&disposition)
            .map_err(|e| AppError::internal(format!("Invalid content disposition: {e}")))?;

        Ok((
            StatusCode::OK,
            [
                (
                    header::CONTENT_TYPE,
                    HeaderValue::from_static("text/plain; charset=utf-8"),
                ),
                (header::CONTENT_DISPOSITION, disposition),
            ],
            response.text,
        )
            .into_response())
    }

    async fn handle_food_analysis(
        State(resources): State<Arc<ServerResources>>,
        headers: HeaderMap,
        Json(request): Json<FoodAnalysisRequest>,
    ) -> Result<Response, AppError> {
        let token = super::authenticate(&headers, &resources)?;
        let image = decode_image(&request)?;
        let identity = resources
            .sessions
            .with_session(&token, |session| session.identity.clone())?;

        debug!(user.id = %identity, mime_type = %image.mime_type, size = image.bytes.len(), "Analyzing food photo");
        let text = resources
            .assistant
            .generate(prompts::FOOD_ANALYSIS_PROMPT, vec![image])
            .await;
        Ok(Self::respond(AssistantResponse::answer(text)))
    }

    async fn handle_insights(
        State(resources): State<Arc<ServerResources>>,
        headers: HeaderMap,
        Json(request): Json<InsightsRequest>,
    ) -> Result<Response, AppError> {
        let token = super::authenticate(&headers, &resources)?;
        if request.question.trim().is_empty() {
            return Ok(Self::respond(AssistantResponse::warning(
                messages::EMPTY_QUESTION,
            )));
        }

        let context = PromptContext::load(&resources, &token)?;
        let prompt = prompts::health_insights(&request.question, &context.profile);
        let text = resources.assistant.generate(&prompt, Vec::new()).await;
        Ok(Self::respond(AssistantResponse::answer(text)))
    }

    async fn handle_coach(
        State(resources): State<Arc<ServerResources>>,
        headers: HeaderMap,
    ) -> Result<Response, AppError> {
        let token = super::authenticate(&headers, &resources)?;
        let context = PromptContext::load(&resources, &token)?;
        let prompt =
            prompts::coach_advice(&context.profile, context.water_glasses, &context.weights);
        let text = resources.assistant.generate(&prompt, Vec::new()).await;
        Ok(Self::respond(AssistantResponse::answer(text)))
    }

    async fn handle_risk(
        State(resources): State<Arc<ServerResources>>,
        headers: HeaderMap,
    ) -> Result<Response, AppError> {
        let token = super::authenticate(&headers, &resources)?;
        let context = PromptContext::load(&resources, &token)?;
        let prompt =
            prompts::risk_analysis(&context.profile, context.water_glasses, &context.weights);
        let text = resources.assistant.generate(&prompt, Vec::new()).await;
        Ok(Self::respond(AssistantResponse::answer(text)))
    }

    async fn handle_weekly_report(
        State(resources): State<Arc<ServerResources>>,
        headers: HeaderMap,
    ) -> Result<Response, AppError> {
        let token = super::authenticate(&headers, &resources)?;
        let context = PromptContext::load(&resources, &token)?;
        let prompt = prompts::weekly_report(
            context.weights.last().copied(),
            context.target_weight_kg,
            context.water_glasses,
            &context.weights,
        );
        let text = resources.assistant.generate(&prompt, Vec::new()).await;
        Ok(Self::respond(AssistantResponse::answer(text)))
    }
}
