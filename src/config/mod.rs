// ABOUTME: Configuration management module for server, AI and login settings
// ABOUTME: Environment-only configuration with typed sections and startup summary
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

//! Configuration module for the Health Companion server
//!
//! All settings come from environment variables (optionally seeded from a
//! `.env` file). Missing optional settings disable the matching feature
//! instead of failing startup.

/// Environment and server configuration
pub mod environment;

pub use environment::{
    load_dotenv, load_dotenv_from, AiConfig, DemoCredentials, Environment, GoogleOAuthConfig,
    LogLevel, ServerConfig,
};
