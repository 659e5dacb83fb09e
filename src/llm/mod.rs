// ABOUTME: LLM provider abstraction layer for the nutrition assistant
// ABOUTME: Defines the provider contract, capability flags and multimodal message types
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

//! # LLM Provider Interface
//!
//! This module defines the contract that generative AI backends implement to
//! serve the assistant features (meal plans, food photo analysis, health
//! insights, coaching and reports).
//!
//! ## Key Concepts
//!
//! - **`LlmCapabilities`**: Bitflags describing provider features (vision, system messages)
//! - **`LlmProvider`**: Async trait for one-shot completions
//! - **`ChatMessage`**: Role-based message that may carry inline images
//! - **`ChatRequest`**: The messages of one completion
//!
//! ## Example: Using a Provider
//!
//! ```rust,no_run
//! use health_companion::llm::{ChatMessage, ChatRequest, LlmProvider};
//!
//! async fn example(provider: &dyn LlmProvider) {
//!     let request = ChatRequest::new(vec![ChatMessage::user("Suggest a high-protein breakfast.")]);
//!     let response = provider.complete(&request).await;
//! }
//! ```

mod gemini;
pub mod prompts;

pub use gemini::GeminiProvider;

use async_trait::async_trait;
use serde::{Deserialize, Serialize};

use crate::errors::AppError;

// ============================================================================
// Capability Flags
// ============================================================================

bitflags::bitflags! {
    /// LLM provider capability flags
    #[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
    pub struct LlmCapabilities: u8 {
        /// Provider accepts inline images
        const VISION = 0b0000_0001;
        /// Provider supports system messages
        const SYSTEM_MESSAGES = 0b0000_0010;
    }
}

impl LlmCapabilities {
    /// Capabilities of a text-only provider
    #[must_use]
    pub const fn text_only() -> Self {
        Self::SYSTEM_MESSAGES
    }

    /// Capabilities of a multimodal provider
    #[must_use]
    pub const fn multimodal() -> Self {
        Self::VISION.union(Self::SYSTEM_MESSAGES)
    }

    /// Check if vision is supported
    #[must_use]
    pub const fn supports_vision(&self) -> bool {
        self.contains(Self::VISION)
    }

    /// Check if system messages are supported
    #[must_use]
    pub const fn supports_system_messages(&self) -> bool {
        self.contains(Self::SYSTEM_MESSAGES)
    }
}

// ============================================================================
// Message Types
// ============================================================================

/// Role of a message in the conversation
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum MessageRole {
    /// System instruction message
    System,
    /// User input message
    User,
}

/// Image attached to a message
#[derive(Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct InlineImage {
    /// MIME type (`image/jpeg` or `image/png`)
    pub mime_type: String,
    /// Raw image bytes
    pub bytes: Vec<u8>,
}

impl InlineImage {
    /// Create an inline image
    #[must_use]
    pub fn new(mime_type: impl Into<String>, bytes: Vec<u8>) -> Self {
        Self {
            mime_type: mime_type.into(),
            bytes,
        }
    }
}

impl std::fmt::Debug for InlineImage {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("InlineImage")
            .field("mime_type", &self.mime_type)
            .field("bytes", &self.bytes.len())
            .finish()
    }
}

/// A single message in a chat conversation
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ChatMessage {
    /// Role of the message sender
    pub role: MessageRole,
    /// Text content of the message
    pub content: String,
    /// Images sent alongside the text
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub images: Vec<InlineImage>,
}

impl ChatMessage {
    /// Create a new chat message
    #[must_use]
    pub fn new(role: MessageRole, content: impl Into<String>) -> Self {
        Self {
            role,
            content: content.into(),
            images: Vec::new(),
        }
    }

    /// Create a system message
    #[must_use]
    pub fn system(content: impl Into<String>) -> Self {
        Self::new(MessageRole::System, content)
    }

    /// Create a user message
    #[must_use]
    pub fn user(content: impl Into<String>) -> Self {
        Self::new(MessageRole::User, content)
    }

    /// Attach images to the message
    #[must_use]
    pub fn with_images(mut self, images: Vec<InlineImage>) -> Self {
        self.images = images;
        self
    }

    /// True when the message carries at least one image
    #[must_use]
    pub fn has_images(&self) -> bool {
        !self.images.is_empty()
    }
}

// ============================================================================
// Request/Response Types
// ============================================================================

/// A one-shot completion request, answered by the provider's configured model
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ChatRequest {
    /// Conversation messages
    pub messages: Vec<ChatMessage>,
}

impl ChatRequest {
    /// Create a new chat request with messages
    #[must_use]
    pub const fn new(messages: Vec<ChatMessage>) -> Self {
        Self { messages }
    }

    /// True when any message carries an image
    #[must_use]
    pub fn has_images(&self) -> bool {
        self.messages.iter().any(ChatMessage::has_images)
    }
}

/// Response from a chat completion
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ChatResponse {
    /// Generated message content
    pub content: String,
    /// Model used for generation
    pub model: String,
    /// Token usage statistics
    pub usage: Option<TokenUsage>,
    /// Finish reason (stop, length, etc.)
    pub finish_reason: Option<String>,
}

/// Token usage statistics
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TokenUsage {
    /// Number of tokens in the prompt
    pub prompt_tokens: u32,
    /// Number of tokens in the completion
    pub completion_tokens: u32,
    /// Total tokens used
    pub total_tokens: u32,
}

// ============================================================================
// Provider Trait
// ============================================================================

/// LLM provider trait for one-shot completions
#[async_trait]
pub trait LlmProvider: Send + Sync {
    /// Unique provider identifier (e.g., "gemini")
    fn name(&self) -> &'static str;

    /// Human-readable display name for the provider
    fn display_name(&self) -> &'static str;

    /// Provider capabilities
    fn capabilities(&self) -> LlmCapabilities;

    /// Perform a chat completion
    async fn complete(&self, request: &ChatRequest) -> Result<ChatResponse, AppError>;
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_capabilities() {
        let caps = LlmCapabilities::multimodal();
        assert!(caps.supports_vision());
        assert!(caps.supports_system_messages());
        assert!(!LlmCapabilities::text_only().supports_vision());
    }

    #[test]
    fn test_request_detects_images() {
        let plain = ChatRequest::new(vec![ChatMessage::user("hello")]);
        assert!(!plain.has_images());

        let with_photo = ChatRequest::new(vec![ChatMessage::user("what is this?")
            .with_images(vec![InlineImage::new("image/png", vec![0x89, 0x50])])]);
        assert!(with_photo.has_images());
    }

    #[test]
    fn test_inline_image_debug_hides_bytes() {
        let image = InlineImage::new("image/jpeg", vec![1, 2, 3]);
        let rendered = format!("{image:?}");
        assert!(rendered.contains("image/jpeg"));
        assert!(rendered.contains("bytes: 3"));
    }
}
