// ABOUTME: Ordinary least-squares regression over the session weight log
// ABOUTME: Projects body weight a fixed number of days past the last sample
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence
#![allow(clippy::cast_precision_loss)] // Safe: sample counts are far below 2^52

use companion_core::constants::trend::{MIN_SAMPLES, PROJECTION_DAYS};
use serde::{Deserialize, Serialize};

use crate::errors::MetricsError;

/// Slopes flatter than this (kg per entry) count as stable
const STABLE_SLOPE_KG: f64 = 0.05;

/// Linear regression analysis results
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct RegressionResult {
    /// Slope of the regression line (kg per entry)
    pub slope: f64,
    /// Y-intercept of the regression line
    pub intercept: f64,
    /// Coefficient of determination (goodness of fit, 0-1)
    pub r_squared: f64,
    /// Pearson correlation coefficient (-1 to 1)
    pub correlation: f64,
    /// Standard error of the estimate
    pub standard_error: f64,
    /// Degrees of freedom (n - 2)
    pub degrees_of_freedom: usize,
}

impl RegressionResult {
    /// Evaluate the fitted line at `x`
    #[must_use]
    pub fn predict(&self, x: f64) -> f64 {
        self.slope.mul_add(x, self.intercept)
    }
}

/// Direction the weight log is heading
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TrendDirection {
    /// Weight increasing
    Gaining,
    /// Weight decreasing
    Losing,
    /// Slope within the stable band
    Stable,
}

/// Seven-day weight projection
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct TrendProjection {
    /// Underlying fit
    pub regression: RegressionResult,
    /// Index the line was evaluated at (`len + 7`)
    pub projected_index: usize,
    /// Projected weight in kilograms
    pub predicted_weight_kg: f64,
    /// Direction of the fitted slope
    pub direction: TrendDirection,
}

/// Regression over evenly spaced samples
pub struct StatisticalAnalyzer;

impl StatisticalAnalyzer {
    /// Fit `y = slope * x + intercept` over `(index, value)` pairs
    ///
    /// # Errors
    ///
    /// Returns [`MetricsError::InsufficientData`] with fewer than two samples
    /// and [`MetricsError::NonFinite`] when the sums overflow.
    pub fn linear_regression(values: &[f64]) -> Result<RegressionResult, MetricsError> {
        if values.len() < MIN_SAMPLES {
            return Err(MetricsError::InsufficientData {
                required: MIN_SAMPLES,
                actual: values.len(),
            });
        }

        let n = values.len() as f64;
        let x_values: Vec<f64> = (0..values.len()).map(|i| i as f64).collect();

        let sum_x = x_values.iter().sum::<f64>();
        let sum_y = values.iter().sum::<f64>();
        let sum_xx = x_values.iter().map(|x| x * x).sum::<f64>();
        let sum_x_y = x_values.iter().zip(values).map(|(x, y)| x * y).sum::<f64>();
        let sum_yy = values.iter().map(|y| y * y).sum::<f64>();

        let mean_x = sum_x / n;
        let mean_y = sum_y / n;

        // Indices are distinct, so the x variance is positive for n >= 2
        let variance_x = (n * mean_x).mul_add(-mean_x, sum_xx);
        let covariance = (n * mean_x).mul_add(-mean_y, sum_x_y);
        let variance_y = (n * mean_y).mul_add(-mean_y, sum_yy);

        let slope = covariance / variance_x;
        let intercept = slope.mul_add(-mean_x, mean_y);
        ensure_finite("slope", slope)?;
        ensure_finite("intercept", intercept)?;

        let denominator_corr = (variance_x * variance_y).sqrt();
        let correlation = if denominator_corr > 0.0 {
            covariance / denominator_corr
        } else {
            0.0
        };

        let sse = x_values
            .iter()
            .zip(values)
            .map(|(x, actual)| {
                let diff = actual - slope.mul_add(*x, intercept);
                diff * diff
            })
            .sum::<f64>();

        let degrees_of_freedom = values.len().saturating_sub(2);
        let standard_error = if degrees_of_freedom > 0 {
            (sse / degrees_of_freedom as f64).sqrt()
        } else {
            0.0
        };

        Ok(RegressionResult {
            slope,
            intercept,
            r_squared: correlation * correlation,
            correlation,
            standard_error,
            degrees_of_freedom,
        })
    }

    /// Project the weight log `PROJECTION_DAYS` entries past its end
    ///
    /// # Errors
    ///
    /// Returns [`MetricsError::InsufficientData`] with fewer than two samples
    /// and [`MetricsError::NonFinite`] when the fit or projection is not finite.
    pub fn project_trend(weights: &[f64]) -> Result<TrendProjection, MetricsError> {
        let regression = Self::linear_regression(weights)?;
        let projected_index = weights.len() + PROJECTION_DAYS;

        let direction = if regression.slope > STABLE_SLOPE_KG {
            TrendDirection::Gaining
        } else if regression.slope < -STABLE_SLOPE_KG {
            TrendDirection::Losing
        } else {
            TrendDirection::Stable
        };

        let predicted_weight_kg = regression.predict(projected_index as f64);
        ensure_finite("predicted weight", predicted_weight_kg)?;

        Ok(TrendProjection {
            regression,
            projected_index,
            predicted_weight_kg,
            direction,
        })
    }
}

fn ensure_finite(quantity: &'static str, value: f64) -> Result<(), MetricsError> {
    if value.is_finite() {
        Ok(())
    } else {
        Err(MetricsError::NonFinite { quantity })
    }
}

#[cfg(test)]
mod tests {
    #![allow(clippy::unwrap_used)]

    use super::*;

    #[test]
    fn test_two_point_fit() {
        let projection = StatisticalAnalyzer::project_trend(&[80.0, 79.0]).unwrap();
        assert!((projection.regression.slope + 1.0).abs() < 1e-9);
        assert!((projection.regression.intercept - 80.0).abs() < 1e-9);
        assert_eq!(projection.projected_index, 9);
        assert!((projection.predicted_weight_kg - 71.0).abs() < 1e-9);
        assert_eq!(projection.direction, TrendDirection::Losing);
    }

    #[test]
    fn test_flat_series_is_stable() {
        let projection = StatisticalAnalyzer::project_trend(&[70.0, 70.0, 70.0]).unwrap();
        assert!(projection.regression.slope.abs() < 1e-12);
        assert!((projection.predicted_weight_kg - 70.0).abs() < 1e-9);
        assert_eq!(projection.direction, TrendDirection::Stable);
        assert!(projection.regression.correlation.abs() < f64::EPSILON);
    }

    #[test]
    fn test_perfect_line_has_unit_r_squared() {
        let regression = StatisticalAnalyzer::linear_regression(&[60.0, 61.0, 62.0, 63.0]).unwrap();
        assert!((regression.r_squared - 1.0).abs() < 1e-9);
        assert!(regression.standard_error.abs() < 1e-9);
        assert_eq!(regression.degrees_of_freedom, 2);
    }

    #[test]
    fn test_overflowing_samples_are_rejected() {
        assert_eq!(
            StatisticalAnalyzer::project_trend(&[1e308, 1e308]),
            Err(MetricsError::NonFinite { quantity: "slope" })
        );
    }

    #[test]
    fn test_insufficient_samples() {
        assert_eq!(
            StatisticalAnalyzer::project_trend(&[72.0]),
            Err(MetricsError::InsufficientData {
                required: 2,
                actual: 1
            })
        );
        assert!(StatisticalAnalyzer::linear_regression(&[]).is_err());
    }

    #[test]
    fn test_noisy_series_prediction_is_finite() {
        let weights = [81.2, 80.4, 80.9, 79.7, 79.9, 79.1, 78.6];
        let projection = StatisticalAnalyzer::project_trend(&weights).unwrap();
        assert!(projection.predicted_weight_kg.is_finite());
        assert!(projection.regression.r_squared <= 1.0);
        assert_eq!(projection.projected_index, 14);
    }
}
