// ABOUTME: HTTP middleware for CORS and request identification
// ABOUTME: Provides the CORS layer builder and request ID propagation for structured logging
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

pub mod cors;
pub mod request_id;

// CORS configuration
pub use cors::setup_cors;

// Request identification
pub use request_id::{request_id_middleware, RequestId, REQUEST_ID_HEADER};
