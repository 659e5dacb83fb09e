// ABOUTME: In-process HTTP client for driving the Health Companion router in tests
// ABOUTME: Builds requests with bearer tokens and JSON bodies and buffers the full response
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

use axum::{
    body::{to_bytes, Body, Bytes},
    http::{header, HeaderMap, Method, Request, StatusCode},
    Router,
};
use serde::{de::DeserializeOwned, Serialize};
use tower::ServiceExt;

/// Request sent straight into a router with `oneshot`
pub struct ApiRequest {
    builder: axum::http::request::Builder,
    body: Body,
}

impl ApiRequest {
    fn new(method: Method, uri: &str) -> Self {
        Self {
            builder: Request::builder().method(method).uri(uri),
            body: Body::empty(),
        }
    }

    pub fn get(uri: &str) -> Self {
        Self::new(Method::GET, uri)
    }

    pub fn post(uri: &str) -> Self {
        Self::new(Method::POST, uri)
    }

    pub fn put(uri: &str) -> Self {
        Self::new(Method::PUT, uri)
    }

    /// Authenticate as the session behind `token`
    pub fn bearer(self, token: &str) -> Self {
        self.header(header::AUTHORIZATION.as_str(), &format!("Bearer {token}"))
    }

    pub fn header(mut self, name: &str, value: &str) -> Self {
        self.builder = self.builder.header(name, value);
        self
    }

    pub fn json<T: Serialize>(mut self, payload: &T) -> Self {
        self.body = Body::from(serde_json::to_vec(payload).expect("serialize request body"));
        self.header(header::CONTENT_TYPE.as_str(), "application/json")
    }

    pub async fn send(self, router: Router) -> ApiResponse {
        let request = self.builder.body(self.body).expect("valid request");
        let response = router.oneshot(request).await.expect("router is infallible");

        let status = response.status();
        let headers = response.headers().clone();
        let body = to_bytes(response.into_body(), usize::MAX)
            .await
            .expect("read response body");

        ApiResponse {
            status,
            headers,
            body,
        }
    }
}

/// Buffered router response
pub struct ApiResponse {
    status: StatusCode,
    headers: HeaderMap,
    body: Bytes,
}

impl ApiResponse {
    pub const fn status_code(&self) -> StatusCode {
        self.status
    }

    /// Header value, if present and valid UTF-8
    pub fn header(&self, name: &str) -> Option<String> {
        self.headers
            .get(name)
            .and_then(|value| value.to_str().ok())
            .map(str::to_owned)
    }

    pub fn json<T: DeserializeOwned>(&self) -> T {
        serde_json::from_slice(&self.body).unwrap_or_else(|e| {
            panic!(
                "response is not the expected JSON ({e}): {}",
                String::from_utf8_lossy(&self.body)
            )
        })
    }

    pub fn text(&self) -> String {
        String::from_utf8(self.body.to_vec()).expect("UTF-8 response body")
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::{routing::post, Json};
    use serde_json::{json, Value};

    #[tokio::test]
    async fn test_bearer_and_json_reach_the_handler() {
        let router = Router::new().route(
            "/echo",
            post(|headers: HeaderMap, Json(body): Json<Value>| async move {
                let auth = headers
                    .get(header::AUTHORIZATION)
                    .and_then(|v| v.to_str().ok())
                    .unwrap_or_default()
                    .to_owned();
                Json(json!({ "auth": auth, "body": body }))
            }),
        );

        let response = ApiRequest::post("/echo")
            .bearer("abc")
            .json(&json!({ "weight_kg": 70.0 }))
            .send(router)
            .await;

        assert_eq!(response.status_code(), StatusCode::OK);
        let echoed: Value = response.json();
        assert_eq!(echoed["auth"], "Bearer abc");
        assert_eq!(echoed["body"]["weight_kg"], 70.0);
    }

    #[tokio::test]
    async fn test_unmatched_route_is_buffered() {
        let response = ApiRequest::get("/missing").send(Router::new()).await;
        assert_eq!(response.status_code(), StatusCode::NOT_FOUND);
        assert!(response.text().is_empty());
        assert!(response.header("x-request-id").is_none());
    }
}
