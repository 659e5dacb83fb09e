// ABOUTME: Health metrics derivation engine for the Health Companion service
// ABOUTME: Session state, BMI, gamification scores and weight trend regression
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

#![deny(unsafe_code)]

//! # Companion Intelligence
//!
//! Everything the dashboard shows is derived here from a [`SessionMetrics`]
//! record plus two external inputs (height and target weight). Derived values
//! are never stored; each read recomputes them.

/// Body mass index and its classification
pub mod bmi;
/// Errors raised by metric derivations
pub mod errors;
/// Experience points, ranks, levels, achievements and the health score
pub mod scoring;
/// Mutable per-session health state and its derived snapshot
pub mod session_metrics;
/// Least-squares regression and trend projection
pub mod statistics;

pub use bmi::{compute_bmi, BmiCategory};
pub use errors::MetricsError;
pub use scoring::{Achievement, Rank};
pub use session_metrics::{MetricsSnapshot, SessionMetrics, TargetWeight, WeightLogRecord};
pub use statistics::{RegressionResult, StatisticalAnalyzer, TrendProjection};
