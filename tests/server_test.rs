// ABOUTME: Integration tests for the assembled router and its middleware stack
// ABOUTME: Tests health endpoints, request ID propagation and CORS preflight handling
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

#![allow(clippy::unwrap_used, clippy::expect_used, clippy::panic)]
#![allow(missing_docs)]

mod common;
mod helpers;

use axum::{
    body::Body,
    http::{Method, Request, StatusCode},
};
use common::create_test_server;
use helpers::api::ApiRequest;
use serde_json::Value;
use tower::ServiceExt;
use uuid::Uuid;

#[tokio::test]
async fn test_health_endpoint() {
    let server = create_test_server(None);

    let response = ApiRequest::get("/health")
        .send(server.router.clone())
        .await;
    assert_eq!(response.status_code(), StatusCode::OK);
    let body: Value = response.json();
    assert_eq!(body["status"], "healthy");
    assert_eq!(body["service"], "health-companion");
}

#[tokio::test]
async fn test_ready_reports_features() {
    let server = create_test_server(None);

    let body: Value = ApiRequest::get("/ready")
        .send(server.router.clone())
        .await
        .json();
    assert_eq!(body["status"], "ready");
    assert_eq!(body["features"]["ai_assistant"], false);
    assert_eq!(body["features"]["google_login"], false);
}

#[tokio::test]
async fn test_request_id_generated() {
    let server = create_test_server(None);

    let response = ApiRequest::get("/health")
        .send(server.router.clone())
        .await;
    let request_id = response.header("x-request-id").unwrap();
    assert!(Uuid::parse_str(&request_id).is_ok());
}

#[tokio::test]
async fn test_request_id_propagated() {
    let server = create_test_server(None);

    let response = ApiRequest::get("/health")
        .header("x-request-id", "client-trace-42")
        .send(server.router.clone())
        .await;
    assert_eq!(
        response.header("x-request-id").as_deref(),
        Some("client-trace-42")
    );
}

#[tokio::test]
async fn test_request_id_on_error_responses() {
    let server = create_test_server(None);

    let response = ApiRequest::get("/api/metrics")
        .send(server.router.clone())
        .await;
    assert_eq!(response.status_code(), StatusCode::UNAUTHORIZED);
    assert!(response.header("x-request-id").is_some());
}

#[tokio::test]
async fn test_cors_preflight() {
    let server = create_test_server(None);

    let request = Request::builder()
        .method(Method::OPTIONS)
        .uri("/api/profile")
        .header("origin", "http://localhost:3000")
        .header("access-control-request-method", "PUT")
        .header("access-control-request-headers", "authorization,content-type")
        .body(Body::empty())
        .unwrap();

    let response = server.router.clone().oneshot(request).await.unwrap();
    assert!(response.status().is_success());
    assert_eq!(
        response
            .headers()
            .get("access-control-allow-origin")
            .unwrap(),
        "*"
    );
}

#[tokio::test]
async fn test_unknown_route_is_not_found() {
    let server = create_test_server(None);

    let response = ApiRequest::get("/api/does-not-exist")
        .send(server.router.clone())
        .await;
    assert_eq!(response.status_code(), StatusCode::NOT_FOUND);
}
