// ABOUTME: Main library entry point for the Health Companion API
// ABOUTME: Session health tracking, shared fitness log, leaderboard and AI nutrition assistant
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

#![deny(unsafe_code)]

//! # Health Companion
//!
//! An HTTP API for personal health tracking. A signed-in user keeps a health
//! profile and per-session metrics (water, weight history, healthy-day
//! streak, target weight), every weight sample is appended to a shared CSV
//! fitness log that feeds a leaderboard, and a Gemini-backed assistant
//! produces meal plans, food photo analysis, health answers, coaching and
//! weekly reports.
//!
//! ## Architecture
//!
//! - **`companion-core`**: error type, shared constants and data models
//! - **`companion-intelligence`**: pure metrics derivation (BMI, trend, score, XP)
//! - **Session**: in-memory registry of signed-in users keyed by bearer token
//! - **Fitness log**: append-only CSV shared by all sessions
//! - **LLM**: provider trait with a Gemini implementation and prompt builders
//! - **Routes**: axum routers grouped by domain
//!
//! ## Example Usage
//!
//! ```rust,no_run
//! use std::sync::Arc;
//! use health_companion::config::ServerConfig;
//! use health_companion::resources::ServerResources;
//!
//! #[tokio::main]
//! async fn main() -> anyhow::Result<()> {
//!     let config = ServerConfig::from_env()?;
//!     let resources = Arc::new(ServerResources::new(config));
//!     health_companion::server::serve(resources).await
//! }
//! ```

/// Prompt execution against the configured AI provider
pub mod assistant;

/// Email and Google sign-in
pub mod auth;

/// Environment configuration
pub mod config;

/// Application constants and configuration defaults
pub mod constants;

/// Unified error handling re-exported from `companion-core`
pub mod errors;

/// Shared CSV fitness log and leaderboard
pub mod fitness_log;

/// LLM provider abstraction, Gemini client and prompts
pub mod llm;

/// Structured logging setup
pub mod logging;

/// HTTP middleware (CORS, request IDs)
pub mod middleware;

/// `OAuth2` client for Google sign-in
pub mod oauth2_client;

/// Shared handler state
pub mod resources;

/// HTTP route handlers
pub mod routes;

/// Router assembly and server loop
pub mod server;

/// In-memory session registry
pub mod session;
