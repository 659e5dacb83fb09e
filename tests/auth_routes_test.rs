// ABOUTME: Integration tests for the authentication route handlers
// ABOUTME: Tests demo login, password reset demo, logout and the Google sign-in flow
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

#![allow(clippy::unwrap_used, clippy::expect_used, clippy::panic)]
#![allow(missing_docs)]

mod common;
mod helpers;

use axum::{http::StatusCode, routing::post, Json, Router};
use common::{build, create_test_server, init_test_logging, test_config, TestServer};
use health_companion::auth::GoogleAuth;
use health_companion::oauth2_client::OAuth2Config;
use health_companion::resources::ServerResources;
use health_companion::routes::auth::{AuthorizationUrlResponse, LoginResponse, MessageResponse};
use helpers::api::ApiRequest;
use serde_json::{json, Value};
use tempfile::TempDir;
use tokio::net::TcpListener;
use url::Url;

// ============================================================================
// Test Helpers
// ============================================================================

/// Start a token endpoint that accepts any authorization code
async fn spawn_token_endpoint(status: StatusCode) -> String {
    let app = Router::new().route(
        "/token",
        post(move || async move {
            (
                status,
                Json(json!({
                    "access_token": "ya29.test-access-token",
                    "token_type": "Bearer",
                    "expires_in": 3599,
                    "id_token": "header.payload.signature"
                })),
            )
        }),
    );

    let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
    let address = listener.local_addr().unwrap();
    tokio::spawn(async move {
        axum::serve(listener, app).await.unwrap();
    });
    format!("http://{address}/token")
}

fn google_config(token_url: String) -> OAuth2Config {
    OAuth2Config {
        client_id: "test-client.apps.googleusercontent.com".to_owned(),
        client_secret: "test-secret".to_owned(),
        auth_url: "https://accounts.google.com/o/oauth2/auth".to_owned(),
        token_url,
        redirect_uri: "http://localhost:8506".to_owned(),
        scopes: vec!["openid".to_owned()],
    }
}

async fn google_server(status: StatusCode) -> TestServer {
    init_test_logging();
    let token_url = spawn_token_endpoint(status).await;
    let dir = TempDir::new().unwrap();
    let resources =
        ServerResources::new(test_config(&dir)).with_google_auth(GoogleAuth::new(google_config(token_url)));
    build(resources, dir)
}

async fn issued_state(server: &TestServer) -> String {
    let response = ApiRequest::get("/auth/google")
        .send(server.router.clone())
        .await;
    assert_eq!(response.status_code(), StatusCode::OK);
    let body: AuthorizationUrlResponse = response.json();

    let url = Url::parse(&body.authorization_url).unwrap();
    url.query_pairs()
        .find(|(key, _)| key == "state")
        .map(|(_, value)| value.into_owned())
        .unwrap()
}

// ============================================================================
// Email Login Tests
// ============================================================================

#[tokio::test]
async fn test_login_with_demo_credentials() {
    let server = create_test_server(None);

    let response = ApiRequest::post("/auth/login")
        .json(&json!({"email": "admin@gmail.com", "password": "123456"}))
        .send(server.router.clone())
        .await;

    assert_eq!(response.status_code(), StatusCode::OK);
    let login: LoginResponse = response.json();
    assert_eq!(login.user, "admin@gmail.com");
    assert!(uuid::Uuid::parse_str(&login.token).is_ok());
    assert_eq!(server.resources.sessions.len(), 1);
}

#[tokio::test]
async fn test_login_rejects_wrong_password() {
    let server = create_test_server(None);

    let response = ApiRequest::post("/auth/login")
        .json(&json!({"email": "admin@gmail.com", "password": "wrong"}))
        .send(server.router.clone())
        .await;

    assert_eq!(response.status_code(), StatusCode::UNAUTHORIZED);
    let body: Value = response.json();
    assert_eq!(body["error"]["code"], "AUTH_INVALID");
    assert_eq!(body["error"]["message"], "Invalid credentials");
    assert!(server.resources.sessions.is_empty());
}

#[tokio::test]
async fn test_each_login_gets_its_own_session() {
    let server = create_test_server(None);
    let first = server.login().await;
    let second = server.login().await;

    assert_ne!(first, second);
    assert_eq!(server.resources.sessions.len(), 2);
}

#[tokio::test]
async fn test_forgot_password() {
    let server = create_test_server(None);

    let response = ApiRequest::post("/auth/forgot-password")
        .json(&json!({"email": "admin@gmail.com"}))
        .send(server.router.clone())
        .await;
    assert_eq!(response.status_code(), StatusCode::OK);
    let body: MessageResponse = response.json();
    assert_eq!(body.message, "Password reset demo link sent");
    assert!(!body.message.contains("123456"));

    let response = ApiRequest::post("/auth/forgot-password")
        .json(&json!({"email": "someone@example.com"}))
        .send(server.router.clone())
        .await;
    assert_eq!(response.status_code(), StatusCode::NOT_FOUND);
    let body: Value = response.json();
    assert_eq!(body["error"]["message"], "Email not found");
}

#[tokio::test]
async fn test_logout_ends_session() {
    let server = create_test_server(None);
    let token = server.login().await;

    let response = ApiRequest::post("/auth/logout")
        .bearer(&token)
        .send(server.router.clone())
        .await;
    assert_eq!(response.status_code(), StatusCode::OK);

    let response = ApiRequest::get("/api/profile")
        .bearer(&token)
        .send(server.router.clone())
        .await;
    assert_eq!(response.status_code(), StatusCode::UNAUTHORIZED);
    let body: Value = response.json();
    assert_eq!(body["error"]["code"], "AUTH_REQUIRED");
}

#[tokio::test]
async fn test_api_requires_bearer_token() {
    let server = create_test_server(None);

    for uri in ["/api/profile", "/api/metrics", "/api/dashboard", "/api/leaderboard"] {
        let response = ApiRequest::get(uri).send(server.router.clone()).await;
        assert_eq!(response.status_code(), StatusCode::UNAUTHORIZED, "{uri}");
    }

    let response = ApiRequest::get("/api/profile")
        .header("authorization", "Bearer not-a-token")
        .send(server.router.clone())
        .await;
    assert_eq!(response.status_code(), StatusCode::UNAUTHORIZED);
}

// ============================================================================
// Google Sign-in Tests
// ============================================================================

#[tokio::test]
async fn test_google_login_disabled_without_client_secret() {
    let server = create_test_server(None);

    let response = ApiRequest::get("/auth/google")
        .send(server.router.clone())
        .await;
    assert_eq!(response.status_code(), StatusCode::SERVICE_UNAVAILABLE);
    let body: Value = response.json();
    assert_eq!(body["error"]["code"], "CONFIG_MISSING");
}

#[tokio::test]
async fn test_google_authorization_url() {
    let server = google_server(StatusCode::OK).await;

    let response = ApiRequest::get("/auth/google")
        .send(server.router.clone())
        .await;
    let body: AuthorizationUrlResponse = response.json();
    let url = Url::parse(&body.authorization_url).unwrap();

    assert_eq!(url.host_str(), Some("accounts.google.com"));
    let pairs: Vec<(String, String)> = url.query_pairs().into_owned().collect();
    assert!(pairs.contains(&("response_type".to_owned(), "code".to_owned())));
    assert!(pairs.contains(&(
        "redirect_uri".to_owned(),
        "http://localhost:8506".to_owned()
    )));
}

#[tokio::test]
async fn test_google_callback_creates_session() {
    let server = google_server(StatusCode::OK).await;
    let state = issued_state(&server).await;

    let response = ApiRequest::get(&format!("/auth/google/callback?code=4%2Fabc&state={state}"))
        .send(server.router.clone())
        .await;

    assert_eq!(response.status_code(), StatusCode::OK);
    let login: LoginResponse = response.json();
    assert_eq!(login.user, "google_user");

    let response = ApiRequest::get("/api/profile")
        .bearer(&login.token)
        .send(server.router.clone())
        .await;
    assert_eq!(response.status_code(), StatusCode::OK);
}

#[tokio::test]
async fn test_google_callback_state_is_single_use() {
    let server = google_server(StatusCode::OK).await;
    let state = issued_state(&server).await;
    let uri = format!("/auth/google/callback?code=abc&state={state}");

    let first = ApiRequest::get(&uri).send(server.router.clone()).await;
    assert_eq!(first.status_code(), StatusCode::OK);

    let replay = ApiRequest::get(&uri).send(server.router.clone()).await;
    assert_eq!(replay.status_code(), StatusCode::SERVICE_UNAVAILABLE);
    let body: Value = replay.json();
    assert_eq!(body["error"]["code"], "EXTERNAL_AUTH_FAILED");
    assert_eq!(body["error"]["message"], "Login failed");
}

#[tokio::test]
async fn test_google_callback_rejected_code() {
    let server = google_server(StatusCode::BAD_REQUEST).await;
    let state = issued_state(&server).await;

    let response = ApiRequest::get(&format!("/auth/google/callback?code=expired&state={state}"))
        .send(server.router.clone())
        .await;

    assert_eq!(response.status_code(), StatusCode::SERVICE_UNAVAILABLE);
    let body: Value = response.json();
    assert_eq!(body["error"]["message"], "Login failed");
    assert!(server.resources.sessions.is_empty());
}

#[tokio::test]
async fn test_google_callback_denied_or_missing_code() {
    let server = google_server(StatusCode::OK).await;

    let denied = ApiRequest::get("/auth/google/callback?error=access_denied")
        .send(server.router.clone())
        .await;
    assert_eq!(denied.status_code(), StatusCode::SERVICE_UNAVAILABLE);

    let missing = ApiRequest::get("/auth/google/callback")
        .send(server.router.clone())
        .await;
    assert_eq!(missing.status_code(), StatusCode::BAD_REQUEST);
    let body: Value = missing.json();
    assert_eq!(body["error"]["code"], "MISSING_REQUIRED_FIELD");
}
