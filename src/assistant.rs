// ABOUTME: Assistant facade that turns prompts into text without ever failing
// ABOUTME: Reports missing AI configuration and provider errors as inline messages
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

//! # Assistant
//!
//! Wraps an optional [`LlmProvider`]. Every call produces text: the model's
//! answer, a notice that AI is not configured, or an inline error message.

use std::sync::Arc;

use tracing::{info, warn};

use crate::config::AiConfig;
use crate::constants::messages;
use crate::llm::{ChatMessage, ChatRequest, GeminiProvider, InlineImage, LlmProvider};

/// Prompt-in, text-out access to the configured AI backend
#[derive(Clone)]
pub struct Assistant {
    provider: Option<Arc<dyn LlmProvider>>,
}

impl Assistant {
    /// Assistant backed by the given provider
    #[must_use]
    pub fn new(provider: Arc<dyn LlmProvider>) -> Self {
        Self {
            provider: Some(provider),
        }
    }

    /// Assistant with no backend; every call returns the unavailable notice
    #[must_use]
    pub const fn disabled() -> Self {
        Self { provider: None }
    }

    /// Build from configuration, disabled when no API key is set
    #[must_use]
    pub fn from_config(config: &AiConfig) -> Self {
        match config.gemini_api_key.as_deref().filter(|key| !key.trim().is_empty()) {
            Some(key) => {
                let provider = GeminiProvider::new(key)
                    .with_default_model(config.model.clone())
                    .with_base_url(config.base_url.clone());
                info!(model = %config.model, "AI assistant enabled");
                Self::new(Arc::new(provider))
            }
            None => Self::disabled(),
        }
    }

    /// True when a provider is configured
    #[must_use]
    pub fn is_available(&self) -> bool {
        self.provider.is_some()
    }

    /// Name of the active provider, if any
    #[must_use]
    pub fn provider_name(&self) -> Option<&'static str> {
        self.provider.as_ref().map(|p| p.display_name())
    }

    /// Send one prompt (with optional images) and return the text answer
    pub async fn generate(&self, prompt: &str, images: Vec<InlineImage>) -> String {
        let Some(provider) = &self.provider else {
            return messages::AI_UNAVAILABLE.to_owned();
        };

        if !images.is_empty() && !provider.capabilities().supports_vision() {
            warn!(provider = provider.name(), "Provider does not accept images");
            return format!(
                "{}: {} does not support image input",
                messages::AI_ERROR_PREFIX,
                provider.display_name()
            );
        }

        let request = ChatRequest::new(vec![ChatMessage::user(prompt).with_images(images)]);
        match provider.complete(&request).await {
            Ok(response) => response.content,
            Err(e) => {
                warn!(provider = provider.name(), code = ?e.code, error = %e.message, "AI request failed");
                format!("{}: {}", messages::AI_ERROR_PREFIX, e.message)
            }
        }
    }
}

impl std::fmt::Debug for Assistant {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Assistant")
            .field("provider", &self.provider_name())
            .finish()
    }
}
