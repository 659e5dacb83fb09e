// ABOUTME: Server-level constants: environment variable names, defaults and fixed messages
// ABOUTME: Domain thresholds live in companion-core and are re-exported here
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

//! Constants module
//!
//! Groups the server's constants by concern. Health thresholds and
//! gamification tables come from `companion_core::constants`.

pub use companion_core::constants::{bmi, gamification, health_score, hydration, limits, trend};

/// Environment variable names read at startup
pub mod env_vars {
    /// Bind address
    pub const HOST: &str = "HOST";
    /// HTTP port
    pub const HTTP_PORT: &str = "HTTP_PORT";
    /// Log level for this service's own targets
    pub const LOG_LEVEL: &str = "LOG_LEVEL";
    /// Log output format (pretty, compact, json)
    pub const LOG_FORMAT: &str = "LOG_FORMAT";
    /// Deployment environment
    pub const ENVIRONMENT: &str = "ENVIRONMENT";
    /// Fitness log CSV location
    pub const FITNESS_LOG_PATH: &str = "FITNESS_LOG_PATH";
    /// Gemini API key
    pub const GEMINI_API_KEY: &str = "GEMINI_API_KEY";
    /// Gemini model override
    pub const GEMINI_MODEL: &str = "GEMINI_MODEL";
    /// Gemini base URL override
    pub const GEMINI_BASE_URL: &str = "GEMINI_BASE_URL";
    /// Demo login email
    pub const DEMO_LOGIN_EMAIL: &str = "DEMO_LOGIN_EMAIL";
    /// Demo login password
    pub const DEMO_LOGIN_PASSWORD: &str = "DEMO_LOGIN_PASSWORD";
    /// Google `client_secret.json` path
    pub const GOOGLE_CLIENT_SECRET_PATH: &str = "GOOGLE_CLIENT_SECRET_PATH";
    /// Google redirect URI
    pub const GOOGLE_REDIRECT_URI: &str = "GOOGLE_REDIRECT_URI";
    /// Request timeout
    pub const REQUEST_TIMEOUT_SECS: &str = "REQUEST_TIMEOUT_SECS";
    /// Allowed CORS origins
    pub const CORS_ALLOWED_ORIGINS: &str = "CORS_ALLOWED_ORIGINS";
}

/// Default values used when the environment is silent
pub mod defaults {
    /// Bind address
    pub const HOST: &str = "127.0.0.1";
    /// HTTP port
    pub const HTTP_PORT: u16 = 8506;
    /// Fitness log CSV location
    pub const FITNESS_LOG_PATH: &str = "fitness_data.csv";
    /// Gemini model
    pub const GEMINI_MODEL: &str = "gemini-2.5-flash";
    /// Gemini API base URL
    pub const GEMINI_BASE_URL: &str = "https://generativelanguage.googleapis.com/v1beta";
    /// Demo login email
    pub const DEMO_EMAIL: &str = "admin@gmail.com";
    /// Demo login password
    pub const DEMO_PASSWORD: &str = "123456";
    /// Google `client_secret.json` path
    pub const GOOGLE_CLIENT_SECRET_PATH: &str = "client_secret.json";
    /// Google redirect URI
    pub const GOOGLE_REDIRECT_URI: &str = "http://localhost:8506";
    /// Request timeout in seconds; AI calls can be slow
    pub const REQUEST_TIMEOUT_SECS: u64 = 120;
    /// Largest accepted request body (base64 food photos)
    pub const MAX_BODY_BYTES: usize = 10 * 1024 * 1024;
    /// Any origin
    pub const CORS_ALLOWED_ORIGINS: &str = "*";
}

/// Identities attached to sessions
pub mod identities {
    /// Identity recorded for a successful Google sign-in
    pub const GOOGLE_USER: &str = "google_user";
}

/// User-facing messages with fixed wording
pub mod messages {
    /// Answer when the AI key is absent
    pub const AI_UNAVAILABLE: &str =
        "AI features are unavailable: GEMINI_API_KEY is not configured.";
    /// Prefix for AI failures
    pub const AI_ERROR_PREFIX: &str = "Error generating response";
    /// Meal plan requested with an empty profile
    pub const EMPTY_PROFILE: &str = "Please complete your health profile first.";
    /// Insights requested with a blank question
    pub const EMPTY_QUESTION: &str = "Please enter a health question";
    /// Failed email login
    pub const INVALID_CREDENTIALS: &str = "Invalid credentials";
    /// Failed Google code exchange
    pub const GOOGLE_LOGIN_FAILED: &str = "Login failed";
    /// Google login without client secrets
    pub const GOOGLE_NOT_CONFIGURED: &str = "Google login is not configured";
    /// Forgot-password success
    pub const RESET_LINK_SENT: &str = "Password reset demo link sent";
    /// Forgot-password unknown email
    pub const EMAIL_NOT_FOUND: &str = "Email not found";
    /// Filename of the meal plan download
    pub const MEAL_PLAN_FILENAME: &str = "personalized_meal_plan.txt";
}

/// Service identification
pub mod service_names {
    /// Service name used in logs and the health endpoint
    pub const HEALTH_COMPANION: &str = "health-companion";
}
