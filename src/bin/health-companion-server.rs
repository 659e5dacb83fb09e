// ABOUTME: Server binary for the Health Companion HTTP API
// ABOUTME: Loads environment configuration, applies CLI overrides, initializes logging and serves
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

//! # Health Companion Server Binary
//!
//! Starts the HTTP API with session tracking, the shared fitness log and the
//! AI assistant (enabled when `GEMINI_API_KEY` is set).

use std::path::PathBuf;
use std::sync::Arc;

use anyhow::Result;
use clap::Parser;
use health_companion::{
    config::{self, ServerConfig},
    logging,
    resources::ServerResources,
    server,
};
use tracing::{error, info};

#[derive(Parser)]
#[command(name = "health-companion-server")]
#[command(about = "AI Health Companion - health tracking and nutrition assistant API")]
pub struct Args {
    /// Override HTTP port
    #[arg(long)]
    http_port: Option<u16>,

    /// Override bind address
    #[arg(long)]
    host: Option<String>,

    /// Override the fitness log CSV location
    #[arg(long)]
    fitness_log: Option<PathBuf>,
}

#[tokio::main]
async fn main() -> Result<()> {
    let args = Args::parse();

    let dotenv_path = config::load_dotenv();
    logging::init_from_env()?;
    match dotenv_path {
        Some(path) => info!(path = %path.display(), "Loaded environment file"),
        None => info!("No .env file found, using process environment"),
    }

    let mut config = ServerConfig::from_env()?;
    if let Some(http_port) = args.http_port {
        config.http_port = http_port;
    }
    if let Some(host) = args.host {
        config.host = host;
    }
    if let Some(path) = args.fitness_log {
        config.fitness_log_path = path;
    }

    info!("Starting Health Companion");
    info!("{}", config.summary());
    display_available_endpoints(&config);

    let resources = Arc::new(ServerResources::new(config));

    if let Err(e) = server::serve(resources).await {
        error!("Server error: {e:#}");
        return Err(e);
    }

    Ok(())
}

/// Display all available API endpoints
#[allow(clippy::cognitive_complexity)]
fn display_available_endpoints(config: &ServerConfig) {
    let base = format!("http://{}:{}", config.host, config.http_port);

    info!("=== Available API Endpoints ===");
    info!("Health:");
    info!("   Liveness:          GET  {base}/health");
    info!("   Readiness:         GET  {base}/ready");
    info!("Authentication:");
    info!("   Login:             POST {base}/auth/login");
    info!("   Forgot Password:   POST {base}/auth/forgot-password");
    info!("   Google Sign-in:    GET  {base}/auth/google");
    info!("   Google Callback:   GET  {base}/auth/google/callback");
    info!("   Logout:            POST {base}/auth/logout");
    info!("Tracker:");
    info!("   Profile:           GET/PUT {base}/api/profile");
    info!("   Water:             POST {base}/api/water");
    info!("   Streak:            POST {base}/api/streak");
    info!("   Weight:            POST {base}/api/weight");
    info!("   Target Weight:     PUT  {base}/api/target");
    info!("   BMI Calculator:    POST {base}/api/bmi");
    info!("   Metrics:           GET  {base}/api/metrics");
    info!("   Trend:             GET  {base}/api/trend");
    info!("Dashboard:");
    info!("   Dashboard:         GET  {base}/api/dashboard");
    info!("   Leaderboard:       GET  {base}/api/leaderboard");
    info!("   Quote:             GET  {base}/api/quote");
    info!("AI Assistant:");
    info!("   Meal Plan:         POST {base}/api/ai/meal-plan");
    info!("   Meal Plan File:    POST {base}/api/ai/meal-plan/download");
    info!("   Food Analysis:     POST {base}/api/ai/food-analysis");
    info!("   Health Insights:   POST {base}/api/ai/insights");
    info!("   Coach:             POST {base}/api/ai/coach");
    info!("   Risk Analysis:     POST {base}/api/ai/risk");
    info!("   Weekly Report:     POST {base}/api/ai/weekly-report");
    info!("=== End of Endpoint List ===");
}
