// ABOUTME: Environment configuration management for deployment-specific settings
// ABOUTME: Handles environment variables, deployment modes, and runtime configuration parsing
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

//! Environment-based configuration management

use std::env;
use std::fmt;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use tracing::{info, warn};

use crate::constants::{defaults, env_vars};

/// Strongly typed log level configuration
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Default)]
#[serde(rename_all = "lowercase")]
pub enum LogLevel {
    /// Errors only
    Error,
    /// Warnings and errors
    Warn,
    /// Informational
    #[default]
    Info,
    /// Debug output
    Debug,
    /// Everything
    Trace,
}

impl LogLevel {
    /// Parse from string with fallback
    #[must_use]
    pub fn from_str_or_default(s: &str) -> Self {
        match s.to_lowercase().as_str() {
            "error" => Self::Error,
            "warn" => Self::Warn,
            "debug" => Self::Debug,
            "trace" => Self::Trace,
            _ => Self::Info,
        }
    }
}

impl fmt::Display for LogLevel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Error => write!(f, "error"),
            Self::Warn => write!(f, "warn"),
            Self::Info => write!(f, "info"),
            Self::Debug => write!(f, "debug"),
            Self::Trace => write!(f, "trace"),
        }
    }
}

/// Deployment environment
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Default)]
#[serde(rename_all = "lowercase")]
pub enum Environment {
    /// Local development
    #[default]
    Development,
    /// Production deployment
    Production,
    /// Automated tests
    Testing,
}

impl Environment {
    /// Parse from string with fallback
    #[must_use]
    pub fn from_str_or_default(s: &str) -> Self {
        match s.to_lowercase().as_str() {
            "production" | "prod" => Self::Production,
            "testing" | "test" => Self::Testing,
            _ => Self::Development,
        }
    }

    /// Check if this is a production environment
    #[must_use]
    pub const fn is_production(self) -> bool {
        matches!(self, Self::Production)
    }
}

impl fmt::Display for Environment {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Development => write!(f, "development"),
            Self::Production => write!(f, "production"),
            Self::Testing => write!(f, "testing"),
        }
    }
}

/// Generative AI backend settings
#[derive(Clone, Serialize, Deserialize)]
pub struct AiConfig {
    /// Gemini API key; AI features are disabled without it
    pub gemini_api_key: Option<String>,
    /// Model identifier
    pub model: String,
    /// API base URL
    pub base_url: String,
}

impl AiConfig {
    /// True when an API key is configured
    #[must_use]
    pub fn is_enabled(&self) -> bool {
        self.gemini_api_key.as_deref().is_some_and(|key| !key.trim().is_empty())
    }
}

impl fmt::Debug for AiConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("AiConfig")
            .field(
                "gemini_api_key",
                &self.gemini_api_key.as_ref().map(|_| "[REDACTED]"),
            )
            .field("model", &self.model)
            .field("base_url", &self.base_url)
            .finish()
    }
}

/// Demo email/password pair accepted by the email login
#[derive(Clone, Serialize, Deserialize)]
pub struct DemoCredentials {
    /// Accepted email
    pub email: String,
    /// Accepted password
    pub password: String,
}

impl Default for DemoCredentials {
    fn default() -> Self {
        Self {
            email: defaults::DEMO_EMAIL.to_owned(),
            password: defaults::DEMO_PASSWORD.to_owned(),
        }
    }
}

impl fmt::Debug for DemoCredentials {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("DemoCredentials")
            .field("email", &self.email)
            .field("password", &"[REDACTED]")
            .finish()
    }
}

/// Google sign-in settings
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GoogleOAuthConfig {
    /// Path to the Google `client_secret.json` download
    pub client_secret_path: PathBuf,
    /// Redirect URI registered with Google
    pub redirect_uri: String,
}

/// Complete server configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ServerConfig {
    /// Bind address
    pub host: String,
    /// HTTP port
    pub http_port: u16,
    /// Log level
    pub log_level: LogLevel,
    /// Deployment environment
    pub environment: Environment,
    /// Location of the shared fitness log CSV
    pub fitness_log_path: PathBuf,
    /// Generative AI settings
    pub ai: AiConfig,
    /// Email login credentials
    pub demo_credentials: DemoCredentials,
    /// Google sign-in settings
    pub google_oauth: GoogleOAuthConfig,
    /// Per-request timeout for API handlers, in seconds
    pub request_timeout_secs: u64,
    /// Comma-separated CORS origins, `*` for any
    pub cors_allowed_origins: String,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: defaults::HOST.to_owned(),
            http_port: defaults::HTTP_PORT,
            log_level: LogLevel::default(),
            environment: Environment::default(),
            fitness_log_path: PathBuf::from(defaults::FITNESS_LOG_PATH),
            ai: AiConfig {
                gemini_api_key: None,
                model: defaults::GEMINI_MODEL.to_owned(),
                base_url: defaults::GEMINI_BASE_URL.to_owned(),
            },
            demo_credentials: DemoCredentials::default(),
            google_oauth: GoogleOAuthConfig {
                client_secret_path: PathBuf::from(defaults::GOOGLE_CLIENT_SECRET_PATH),
                redirect_uri: defaults::GOOGLE_REDIRECT_URI.to_owned(),
            },
            request_timeout_secs: defaults::REQUEST_TIMEOUT_SECS,
            cors_allowed_origins: defaults::CORS_ALLOWED_ORIGINS.to_owned(),
        }
    }
}

impl ServerConfig {
    /// Load configuration from environment variables
    ///
    /// # Errors
    ///
    /// Returns an error if a numeric variable is set but cannot be parsed.
    pub fn from_env() -> Result<Self> {
        info!("Loading configuration from environment variables");

        let config = Self {
            host: env_var_or(env_vars::HOST, defaults::HOST),
            http_port: env_var_or(env_vars::HTTP_PORT, &defaults::HTTP_PORT.to_string())
                .parse()
                .context("Invalid HTTP_PORT value")?,
            log_level: LogLevel::from_str_or_default(&env_var_or(env_vars::LOG_LEVEL, "info")),
            environment: Environment::from_str_or_default(&env_var_or(
                env_vars::ENVIRONMENT,
                "development",
            )),
            fitness_log_path: PathBuf::from(env_var_or(
                env_vars::FITNESS_LOG_PATH,
                defaults::FITNESS_LOG_PATH,
            )),
            ai: AiConfig {
                gemini_api_key: env::var(env_vars::GEMINI_API_KEY)
                    .ok()
                    .filter(|key| !key.trim().is_empty()),
                model: env_var_or(env_vars::GEMINI_MODEL, defaults::GEMINI_MODEL),
                base_url: env_var_or(env_vars::GEMINI_BASE_URL, defaults::GEMINI_BASE_URL),
            },
            demo_credentials: DemoCredentials {
                email: env_var_or(env_vars::DEMO_LOGIN_EMAIL, defaults::DEMO_EMAIL),
                password: env_var_or(env_vars::DEMO_LOGIN_PASSWORD, defaults::DEMO_PASSWORD),
            },
            google_oauth: GoogleOAuthConfig {
                client_secret_path: PathBuf::from(env_var_or(
                    env_vars::GOOGLE_CLIENT_SECRET_PATH,
                    defaults::GOOGLE_CLIENT_SECRET_PATH,
                )),
                redirect_uri: env_var_or(
                    env_vars::GOOGLE_REDIRECT_URI,
                    defaults::GOOGLE_REDIRECT_URI,
                ),
            },
            request_timeout_secs: env_var_or(
                env_vars::REQUEST_TIMEOUT_SECS,
                &defaults::REQUEST_TIMEOUT_SECS.to_string(),
            )
            .parse()
            .context("Invalid REQUEST_TIMEOUT_SECS value")?,
            cors_allowed_origins: env_var_or(
                env_vars::CORS_ALLOWED_ORIGINS,
                defaults::CORS_ALLOWED_ORIGINS,
            ),
        };

        config.validate();
        Ok(config)
    }

    /// Log warnings for settings that leave features disabled
    pub fn validate(&self) {
        if !self.ai.is_enabled() {
            warn!(
                "{} is not set; AI features will answer with a warning",
                env_vars::GEMINI_API_KEY
            );
        }

        if !self.google_oauth.client_secret_path.exists() {
            warn!(
                path = %self.google_oauth.client_secret_path.display(),
                "Google client secret file not found; Google login disabled"
            );
        }

        if self.environment.is_production()
            && self.demo_credentials.password == defaults::DEMO_PASSWORD
        {
            warn!("Running in production with the default demo password");
        }
    }

    /// Human-readable configuration summary with secrets omitted
    #[must_use]
    pub fn summary(&self) -> String {
        format!(
            "Health Companion Configuration:\n\
             - Listen: {}:{}\n\
             - Environment: {}\n\
             - Log Level: {}\n\
             - Fitness Log: {}\n\
             - AI Model: {} ({})\n\
             - Google Login: {}\n\
             - Demo Login: {}",
            self.host,
            self.http_port,
            self.environment,
            self.log_level,
            self.fitness_log_path.display(),
            self.ai.model,
            if self.ai.is_enabled() {
                "Enabled"
            } else {
                "Disabled"
            },
            if self.google_oauth.client_secret_path.exists() {
                "Enabled"
            } else {
                "Disabled"
            },
            self.demo_credentials.email,
        )
    }
}

/// Load `.env` from the working directory or one of its parents
///
/// Runs before logging starts so the file can set `RUST_LOG`, `LOG_LEVEL`
/// and `LOG_FORMAT`. Variables already present in the process win. Returns
/// the loaded file, or `None` when there is none.
pub fn load_dotenv() -> Option<PathBuf> {
    dotenvy::dotenv().ok()
}

/// Load variables from a specific env file
///
/// # Errors
///
/// Returns an error if the file cannot be read or parsed.
pub fn load_dotenv_from(path: &Path) -> Result<()> {
    dotenvy::from_path(path).with_context(|| format!("Failed to load {}", path.display()))
}

/// Read an environment variable with a default
fn env_var_or(key: &str, default: &str) -> String {
    env::var(key).unwrap_or_else(|_| default.to_owned())
}
