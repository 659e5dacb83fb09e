// ABOUTME: Re-export of the unified error types from companion-core
// ABOUTME: Lets server modules import errors from crate::errors
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

//! Unified error handling, re-exported from `companion_core::errors`

pub use companion_core::errors::{
    AppError, AppResult, ErrorCode, ErrorResponse, ErrorResponseDetails,
};
