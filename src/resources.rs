// ABOUTME: Shared server resources handed to every route handler
// ABOUTME: Bundles configuration, session registry, fitness log, assistant and login backends
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

//! Server resources shared across handlers through `Arc<ServerResources>`

use std::sync::Arc;

use crate::assistant::Assistant;
use crate::auth::{CredentialAuthenticator, GoogleAuth};
use crate::config::ServerConfig;
use crate::fitness_log::{FitnessLogStore, FitnessLogWriter};
use crate::llm::LlmProvider;
use crate::session::SessionStore;

/// Everything a request handler may need
#[derive(Debug)]
pub struct ServerResources {
    /// Loaded configuration
    pub config: Arc<ServerConfig>,
    /// Live sessions
    pub sessions: SessionStore,
    /// Shared CSV fitness log
    pub fitness_log: Arc<FitnessLogStore>,
    /// Ordered background appends to `fitness_log`
    pub fitness_writer: FitnessLogWriter,
    /// AI assistant (possibly disabled)
    pub assistant: Assistant,
    /// Demo email/password check
    pub credentials: CredentialAuthenticator,
    /// Google sign-in, absent when client secrets are missing
    pub google: Option<GoogleAuth>,
}

impl ServerResources {
    /// Build resources from configuration
    #[must_use]
    pub fn new(config: ServerConfig) -> Self {
        let assistant = Assistant::from_config(&config.ai);
        let google = GoogleAuth::from_config(&config.google_oauth);
        let fitness_log = Arc::new(FitnessLogStore::new(config.fitness_log_path.clone()));
        Self {
            sessions: SessionStore::new(),
            fitness_writer: FitnessLogWriter::new(Arc::clone(&fitness_log)),
            fitness_log,
            credentials: CredentialAuthenticator::new(config.demo_credentials.clone()),
            assistant,
            google,
            config: Arc::new(config),
        }
    }

    /// Replace the assistant's provider
    #[must_use]
    pub fn with_llm_provider(mut self, provider: Arc<dyn LlmProvider>) -> Self {
        self.assistant = Assistant::new(provider);
        self
    }

    /// Replace the Google sign-in backend
    #[must_use]
    pub fn with_google_auth(mut self, google: GoogleAuth) -> Self {
        self.google = Some(google);
        self
    }
}
