// ABOUTME: Error type for metric derivations that need more input than is available
// ABOUTME: Converts into the unified AppError for the HTTP layer
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

use companion_core::errors::{AppError, ErrorCode};
use thiserror::Error;

/// Metric derivation failures
#[derive(Debug, Clone, PartialEq, Error)]
pub enum MetricsError {
    /// Not enough samples for the requested computation
    #[error("Insufficient data: need at least {required} weight entries, got {actual}")]
    InsufficientData {
        /// Samples required
        required: usize,
        /// Samples available
        actual: usize,
    },
    /// Value outside its domain
    #[error("{field} must be between {min} and {max}, got {value}")]
    OutOfRange {
        /// Field name
        field: &'static str,
        /// Inclusive minimum
        min: f64,
        /// Inclusive maximum
        max: f64,
        /// Rejected value
        value: f64,
    },
    /// Fit produced an infinite or NaN value
    #[error("Trend cannot be computed: {quantity} is not finite")]
    NonFinite {
        /// Offending quantity
        quantity: &'static str,
    },
}

impl From<MetricsError> for AppError {
    fn from(error: MetricsError) -> Self {
        match error {
            MetricsError::InsufficientData { .. } | MetricsError::NonFinite { .. } => {
                Self::new(ErrorCode::InvalidInput, error.to_string())
            }
            MetricsError::OutOfRange {
                field,
                min,
                max,
                value,
            } => Self::out_of_range(field, min, max, value),
        }
    }
}
