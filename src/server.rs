// ABOUTME: HTTP server assembly: merges domain routers and applies the middleware stack
// ABOUTME: Binds the listener and serves until Ctrl+C or SIGTERM triggers graceful shutdown
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

//! # HTTP Server
//!
//! [`router`] builds the complete application (used directly by integration
//! tests) and [`serve`] runs it on a TCP listener.

use std::sync::Arc;
use std::time::Duration;

use anyhow::{Context, Result};
use axum::{extract::DefaultBodyLimit, middleware, Router};
use tokio::net::TcpListener;
use tower_http::{timeout::TimeoutLayer, trace::TraceLayer};
use tracing::info;

use crate::constants::defaults;
use crate::middleware::{request_id_middleware, setup_cors};
use crate::resources::ServerResources;
use crate::routes::{
    AssistantRoutes, AuthRoutes, DashboardRoutes, HealthRoutes, ProfileRoutes, TrackerRoutes,
};

/// Build the application router with all routes and layers
pub fn router(resources: Arc<ServerResources>) -> Router {
    let timeout = Duration::from_secs(resources.config.request_timeout_secs);
    let cors = setup_cors(&resources.config);

    Router::new()
        .merge(HealthRoutes::routes(Arc::clone(&resources)))
        .merge(AuthRoutes::routes(Arc::clone(&resources)))
        .merge(ProfileRoutes::routes(Arc::clone(&resources)))
        .merge(TrackerRoutes::routes(Arc::clone(&resources)))
        .merge(DashboardRoutes::routes(Arc::clone(&resources)))
        .merge(AssistantRoutes::routes(resources))
        .layer(DefaultBodyLimit::max(defaults::MAX_BODY_BYTES))
        .layer(TimeoutLayer::new(timeout))
        .layer(TraceLayer::new_for_http())
        .layer(middleware::from_fn(request_id_middleware))
        .layer(cors)
}

/// Bind to the configured address and serve until shutdown
///
/// # Errors
///
/// Returns an error if the listener cannot be bound or the server fails
pub async fn serve(resources: Arc<ServerResources>) -> Result<()> {
    let address = format!("{}:{}", resources.config.host, resources.config.http_port);
    let listener = TcpListener::bind(&address)
        .await
        .with_context(|| format!("Failed to bind {address}"))?;

    info!("Health Companion listening on http://{address}");

    let served = axum::serve(listener, router(Arc::clone(&resources)))
        .with_graceful_shutdown(shutdown_signal())
        .await
        .context("HTTP server error");

    resources.fitness_writer.shutdown().await;
    served?;

    info!("Server shut down");
    Ok(())
}

async fn shutdown_signal() {
    let ctrl_c = async {
        if let Err(e) = tokio::signal::ctrl_c().await {
            tracing::error!("Failed to install Ctrl+C handler: {e}");
            std::future::pending::<()>().await;
        }
        info!("Received Ctrl+C, shutting down");
    };

    #[cfg(unix)]
    let terminate = async {
        match tokio::signal::unix::signal(tokio::signal::unix::SignalKind::terminate()) {
            Ok(mut signal) => {
                signal.recv().await;
                info!("Received terminate signal, shutting down");
            }
            Err(e) => {
                tracing::error!("Failed to install SIGTERM handler: {e}");
                std::future::pending::<()>().await;
            }
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        () = ctrl_c => {},
        () = terminate => {},
    }
}
