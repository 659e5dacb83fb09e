// ABOUTME: Shared test utilities and setup functions for integration tests
// ABOUTME: Provides scripted AI providers, temp-dir backed resources and login helpers
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence
#![allow(
    dead_code,
    clippy::missing_errors_doc,
    clippy::missing_panics_doc,
    clippy::must_use_candidate
)]
//! Shared test utilities for `health_companion`

use std::path::PathBuf;
use std::sync::{Arc, Mutex, Once};
use std::time::Duration;

use async_trait::async_trait;
use axum::{http::StatusCode, Router};
use health_companion::{
    config::{GoogleOAuthConfig, ServerConfig},
    errors::{AppError, ErrorCode},
    llm::{ChatRequest, ChatResponse, LlmCapabilities, LlmProvider},
    resources::ServerResources,
    server,
};
use tempfile::TempDir;

use crate::helpers::api::ApiRequest;

static INIT_LOGGER: Once = Once::new();

/// Initialize quiet logging for tests (call once per test process)
pub fn init_test_logging() {
    INIT_LOGGER.call_once(|| {
        let log_level = match std::env::var("TEST_LOG").as_deref() {
            Ok("TRACE") => tracing::Level::TRACE,
            Ok("DEBUG") => tracing::Level::DEBUG,
            Ok("INFO") => tracing::Level::INFO,
            Ok("WARN" | "ERROR") | _ => tracing::Level::WARN,
        };

        tracing_subscriber::fmt()
            .with_max_level(log_level)
            .with_test_writer()
            .init();
    });
}

// ============================================================================
// AI provider doubles
// ============================================================================

/// Provider that answers every request with fixed text and records the requests
pub struct ScriptedProvider {
    reply: String,
    capabilities: LlmCapabilities,
    requests: Mutex<Vec<ChatRequest>>,
}

impl ScriptedProvider {
    pub fn new(reply: &str) -> Self {
        Self {
            reply: reply.to_owned(),
            capabilities: LlmCapabilities::multimodal(),
            requests: Mutex::new(Vec::new()),
        }
    }

    pub fn text_only(reply: &str) -> Self {
        Self {
            capabilities: LlmCapabilities::text_only(),
            ..Self::new(reply)
        }
    }

    /// Requests received so far
    pub fn requests(&self) -> Vec<ChatRequest> {
        self.requests.lock().unwrap().clone()
    }

    /// Text of the last user prompt
    pub fn last_prompt(&self) -> Option<String> {
        self.requests
            .lock()
            .unwrap()
            .last()
            .and_then(|request| request.messages.last())
            .map(|message| message.content.clone())
    }
}

#[async_trait]
impl LlmProvider for ScriptedProvider {
    fn name(&self) -> &'static str {
        "scripted"
    }

    fn display_name(&self) -> &'static str {
        "Scripted"
    }

    fn capabilities(&self) -> LlmCapabilities {
        self.capabilities
    }

    async fn complete(&self, request: &ChatRequest) -> Result<ChatResponse, AppError> {
        self.requests.lock().unwrap().push(request.clone());
        Ok(ChatResponse {
            content: self.reply.clone(),
            model: "scripted-model".to_owned(),
            usage: None,
            finish_reason: Some("stop".to_owned()),
        })
    }
}

/// Provider whose every call fails
pub struct FailingProvider;

#[async_trait]
impl LlmProvider for FailingProvider {
    fn name(&self) -> &'static str {
        "failing"
    }

    fn display_name(&self) -> &'static str {
        "Failing"
    }

    fn capabilities(&self) -> LlmCapabilities {
        LlmCapabilities::multimodal()
    }

    async fn complete(&self, _request: &ChatRequest) -> Result<ChatResponse, AppError> {
        Err(AppError::new(
            ErrorCode::ExternalServiceUnavailable,
            "quota exhausted",
        ))
    }
}

// ============================================================================
// Resources and router
// ============================================================================

/// Server wired to a temporary fitness log
pub struct TestServer {
    pub resources: Arc<ServerResources>,
    pub router: Router,
    pub dir: TempDir,
}

impl TestServer {
    /// Location of the fitness log CSV
    pub fn fitness_log_path(&self) -> PathBuf {
        self.resources.fitness_log.path().to_path_buf()
    }

    /// Log in with the demo credentials and return the bearer token
    pub async fn login(&self) -> String {
        let response = ApiRequest::post("/auth/login")
            .json(&serde_json::json!({"email": "admin@gmail.com", "password": "123456"}))
            .send(self.router.clone())
            .await;
        assert_eq!(response.status_code(), StatusCode::OK, "demo login failed");
        let body: serde_json::Value = response.json();
        body["token"].as_str().unwrap().to_owned()
    }
}

/// Configuration rooted in `dir` with AI and Google sign-in disabled
pub fn test_config(dir: &TempDir) -> ServerConfig {
    ServerConfig {
        fitness_log_path: dir.path().join("fitness_data.csv"),
        google_oauth: GoogleOAuthConfig {
            client_secret_path: dir.path().join("client_secret.json"),
            redirect_uri: "http://localhost:8506".to_owned(),
        },
        ..ServerConfig::default()
    }
}

/// Build a test server, optionally with an AI provider
pub fn create_test_server(provider: Option<Arc<dyn LlmProvider>>) -> TestServer {
    init_test_logging();
    let dir = TempDir::new().unwrap();
    let mut resources = ServerResources::new(test_config(&dir));
    if let Some(provider) = provider {
        resources = resources.with_llm_provider(provider);
    }
    build(resources, dir)
}

/// Build a test server backed by `provider`
pub fn create_test_server_with(provider: Arc<dyn LlmProvider>) -> TestServer {
    create_test_server(Some(provider))
}

/// Build a test server from prepared resources
pub fn build(resources: ServerResources, dir: TempDir) -> TestServer {
    let resources = Arc::new(resources);
    let router = server::router(Arc::clone(&resources));
    TestServer {
        resources,
        router,
        dir,
    }
}

/// Wait until the background append has written `rows` data rows
pub async fn wait_for_rows(server: &TestServer, rows: usize) -> Vec<String> {
    let path = server.fitness_log_path();
    for _ in 0..100 {
        if let Ok(contents) = tokio::fs::read_to_string(&path).await {
            let lines: Vec<String> = contents.lines().map(ToOwned::to_owned).collect();
            if lines.len() > rows {
                return lines;
            }
        }
        tokio::time::sleep(Duration::from_millis(20)).await;
    }
    panic!("fitness log never reached {rows} rows");
}
