// ABOUTME: Google Gemini LLM provider implementation with inline image support
// ABOUTME: Calls the generateContent endpoint of the Generative Language API
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

//! # Gemini Provider
//!
//! Implementation of the `LlmProvider` trait for Google's Gemini models.
//!
//! ## Configuration
//!
//! Set `GEMINI_API_KEY` with a key from Google AI Studio. `GEMINI_MODEL`
//! and `GEMINI_BASE_URL` override the model and endpoint.
//!
//! ## Example
//!
//! ```rust,no_run
//! use health_companion::llm::{ChatMessage, ChatRequest, GeminiProvider, LlmProvider};
//! use health_companion::errors::AppError;
//!
//! #[tokio::main]
//! async fn main() -> Result<(), AppError> {
//!     let provider = GeminiProvider::new("api-key");
//!     let request = ChatRequest::new(vec![ChatMessage::user("Is oatmeal a good breakfast?")]);
//!     let response = provider.complete(&request).await?;
//!     println!("{}", response.content);
//!     Ok(())
//! }
//! ```

use std::fmt::{Debug, Formatter, Result as FmtResult};

use async_trait::async_trait;
use base64::engine::general_purpose::STANDARD as BASE64;
use base64::Engine;
use reqwest::Client;
use serde::{Deserialize, Serialize};
use tracing::{debug, error, instrument};

use super::{
    ChatMessage, ChatRequest, ChatResponse, LlmCapabilities, LlmProvider, MessageRole, TokenUsage,
};
use crate::constants::defaults;
use crate::errors::{AppError, ErrorCode};

// ============================================================================
// API Request/Response Types
// ============================================================================

/// Gemini API request structure
#[derive(Debug, Serialize)]
struct GeminiRequest {
    contents: Vec<GeminiContent>,
    #[serde(skip_serializing_if = "Option::is_none")]
    system_instruction: Option<GeminiContent>,
}

/// Content structure for Gemini API
#[derive(Debug, Serialize, Deserialize)]
struct GeminiContent {
    #[serde(skip_serializing_if = "Option::is_none")]
    role: Option<String>,
    #[serde(default)]
    parts: Vec<ContentPart>,
}

/// Part of content (text or inline binary data)
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(untagged)]
enum ContentPart {
    /// Text content
    Text { text: String },
    /// Base64-encoded image
    InlineData {
        #[serde(alias = "inlineData")]
        inline_data: InlineData,
    },
}

/// Inline binary payload
#[derive(Debug, Clone, Serialize, Deserialize)]
struct InlineData {
    #[serde(alias = "mimeType")]
    mime_type: String,
    data: String,
}

/// Gemini API response structure
#[derive(Debug, Deserialize)]
struct GeminiResponse {
    candidates: Option<Vec<Candidate>>,
    #[serde(rename = "usageMetadata")]
    usage_metadata: Option<UsageMetadata>,
    error: Option<GeminiError>,
}

/// Response candidate
#[derive(Debug, Deserialize)]
struct Candidate {
    content: Option<GeminiContent>,
    #[serde(rename = "finishReason")]
    finish_reason: Option<String>,
}

/// Usage metadata from Gemini API response
#[derive(Debug, Deserialize)]
struct UsageMetadata {
    #[serde(rename = "promptTokenCount")]
    prompt: Option<u32>,
    #[serde(rename = "candidatesTokenCount")]
    candidates: Option<u32>,
    #[serde(rename = "totalTokenCount")]
    total: Option<u32>,
}

/// API error response from Gemini
#[derive(Debug, Deserialize)]
struct GeminiError {
    message: String,
}

// ============================================================================
// Provider Implementation
// ============================================================================

/// Google Gemini LLM provider
pub struct GeminiProvider {
    api_key: String,
    client: Client,
    default_model: String,
    base_url: String,
}

impl GeminiProvider {
    /// Create a new Gemini provider with an API key
    #[must_use]
    pub fn new(api_key: impl Into<String>) -> Self {
        Self {
            api_key: api_key.into(),
            client: Client::new(),
            default_model: defaults::GEMINI_MODEL.to_owned(),
            base_url: defaults::GEMINI_BASE_URL.to_owned(),
        }
    }

    /// Set a custom default model
    #[must_use]
    pub fn with_default_model(mut self, model: impl Into<String>) -> Self {
        self.default_model = model.into();
        self
    }

    /// Point the provider at a different API base URL
    #[must_use]
    pub fn with_base_url(mut self, base_url: impl Into<String>) -> Self {
        self.base_url = base_url.into().trim_end_matches('/').to_owned();
        self
    }

    /// Build the API URL for a model and method
    fn build_url(&self, model: &str, method: &str) -> String {
        format!(
            "{}/models/{model}:{method}?key={}",
            self.base_url, self.api_key
        )
    }

    /// Text part followed by one inline part per image
    fn message_parts(message: &ChatMessage) -> Vec<ContentPart> {
        let mut parts = Vec::with_capacity(1 + message.images.len());
        parts.push(ContentPart::Text {
            text: message.content.clone(),
        });
        parts.extend(message.images.iter().map(|image| ContentPart::InlineData {
            inline_data: InlineData {
                mime_type: image.mime_type.clone(),
                data: BASE64.encode(&image.bytes),
            },
        }));
        parts
    }

    /// Convert chat messages to Gemini format
    fn convert_messages(messages: &[ChatMessage]) -> (Vec<GeminiContent>, Option<GeminiContent>) {
        let mut contents = Vec::new();
        let mut system_instruction = None;

        for message in messages {
            if message.role == MessageRole::System {
                system_instruction = Some(GeminiContent {
                    role: None,
                    parts: Self::message_parts(message),
                });
            } else {
                contents.push(GeminiContent {
                    role: Some("user".to_owned()),
                    parts: Self::message_parts(message),
                });
            }
        }

        (contents, system_instruction)
    }

    /// Build a Gemini API request from a `ChatRequest`
    fn build_gemini_request(request: &ChatRequest) -> GeminiRequest {
        let (contents, system_instruction) = Self::convert_messages(&request.messages);
        GeminiRequest {
            contents,
            system_instruction,
        }
    }

    /// Concatenate the text parts of the first candidate
    fn extract_content(response: &GeminiResponse) -> Result<String, AppError> {
        let parts = response
            .candidates
            .as_ref()
            .and_then(|c| c.first())
            .and_then(|c| c.content.as_ref())
            .map(|c| c.parts.as_slice())
            .unwrap_or_default();

        let text: String = parts
            .iter()
            .filter_map(|part| match part {
                ContentPart::Text { text } => Some(text.as_str()),
                ContentPart::InlineData { .. } => None,
            })
            .collect();

        if text.is_empty() {
            return Err(AppError::external_service(
                "Gemini",
                "No content in Gemini response",
            ));
        }
        Ok(text)
    }

    /// Convert usage metadata to our token usage format
    fn convert_usage(metadata: &UsageMetadata) -> TokenUsage {
        TokenUsage {
            prompt_tokens: metadata.prompt.unwrap_or(0),
            completion_tokens: metadata.candidates.unwrap_or(0),
            total_tokens: metadata.total.unwrap_or(0),
        }
    }

    /// Map API error status to appropriate error type
    fn map_api_error(status: u16, response_text: &str) -> AppError {
        let message = serde_json::from_str::<GeminiResponse>(response_text)
            .ok()
            .and_then(|r| r.error)
            .map_or_else(|| response_text.to_owned(), |e| e.message);

        match status {
            429 => AppError::new(
                ErrorCode::ExternalRateLimited,
                Self::extract_quota_message(&message),
            ),
            _ => AppError::external_service("Gemini", format!("API error ({status}): {message}")),
        }
    }

    /// Extract a user-friendly quota message such as "Please retry in 6.4s."
    fn extract_quota_message(message: &str) -> String {
        const RETRY_PREFIX: &str = "Please retry in ";

        if let Some(retry_pos) = message.find(RETRY_PREFIX) {
            let after_prefix = &message[retry_pos + RETRY_PREFIX.len()..];
            if let Some(s_pos) = after_prefix.find('s') {
                if let Ok(seconds) = after_prefix[..s_pos].parse::<f64>() {
                    let seconds_int = seconds.ceil() as u64;
                    return format!(
                        "AI service quota exceeded. Please try again in {seconds_int} seconds."
                    );
                }
            }
        }
        "AI service quota exceeded. Please wait a moment and try again.".to_owned()
    }
}

#[async_trait]
impl LlmProvider for GeminiProvider {
    fn name(&self) -> &'static str {
        "gemini"
    }

    fn display_name(&self) -> &'static str {
        "Google Gemini"
    }

    fn capabilities(&self) -> LlmCapabilities {
        LlmCapabilities::multimodal()
    }

    #[instrument(skip(self, request), fields(images = request.has_images()))]
    async fn complete(&self, request: &ChatRequest) -> Result<ChatResponse, AppError> {
        let model = self.default_model.as_str();
        let url = self.build_url(model, "generateContent");

        let gemini_request = Self::build_gemini_request(request);

        debug!("Sending request to Gemini API");

        let response = self
            .client
            .post(&url)
            .json(&gemini_request)
            .send()
            .await
            .map_err(|e| {
                AppError::new(
                    ErrorCode::ExternalServiceUnavailable,
                    format!("HTTP request failed: {}", e.without_url()),
                )
            })?;

        let status = response.status();
        let response_text = response.text().await.map_err(|e| {
            AppError::external_service("Gemini", format!("Failed to read response: {e}"))
        })?;

        if !status.is_success() {
            error!(status = %status, "Gemini API error");
            return Err(Self::map_api_error(status.as_u16(), &response_text));
        }

        let gemini_response: GeminiResponse =
            serde_json::from_str(&response_text).map_err(|e| {
                error!(error = %e, "Failed to parse Gemini response");
                AppError::external_service("Gemini", format!("Failed to parse response: {e}"))
            })?;

        if let Some(error) = gemini_response.error {
            return Err(AppError::external_service("Gemini", error.message));
        }

        let content = Self::extract_content(&gemini_response)?;
        let usage = gemini_response
            .usage_metadata
            .as_ref()
            .map(Self::convert_usage);
        let finish_reason = gemini_response
            .candidates
            .as_ref()
            .and_then(|c| c.first())
            .and_then(|c| c.finish_reason.clone());

        debug!("Successfully received Gemini response");

        Ok(ChatResponse {
            content,
            model: model.to_owned(),
            usage,
            finish_reason,
        })
    }
}

impl Debug for GeminiProvider {
    fn fmt(&self, f: &mut Formatter<'_>) -> FmtResult {
        f.debug_struct("GeminiProvider")
            .field("default_model", &self.default_model)
            .field("base_url", &self.base_url)
            .field("api_key", &"[REDACTED]")
            .finish_non_exhaustive()
    }
}
