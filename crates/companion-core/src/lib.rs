// ABOUTME: Core types and constants for the Health Companion service
// ABOUTME: Foundation crate with error handling, domain models and shared constants
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

#![deny(unsafe_code)]

//! # Companion Core
//!
//! Foundation crate providing shared types for the Health Companion service.
//! It changes rarely, so the metrics engine and the HTTP server can build on
//! it independently.
//!
//! ## Modules
//!
//! - **errors**: Unified error handling with `AppError` and `ErrorCode`
//! - **constants**: Health thresholds, gamification tables and input ranges
//! - **models**: Health profile, fitness log rows and leaderboard entries

/// Unified error handling system with standard error codes and HTTP responses
pub mod errors;

/// Health thresholds, gamification tables and accepted input ranges
pub mod constants;

/// Core data models (`HealthProfile`, `FitnessLogEntry`, `LeaderboardEntry`)
pub mod models;
