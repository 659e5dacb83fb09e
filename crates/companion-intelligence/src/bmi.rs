// ABOUTME: Body mass index calculation and WHO weight classification
// ABOUTME: Guards against absent or non-positive heights instead of dividing by zero
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

use companion_core::constants::bmi::{NORMAL_MAX, NORMAL_MIN, OBESE_MIN};
use serde::{Deserialize, Serialize};

/// BMI for a weight in kilograms and a height in centimetres
///
/// Returns `None` when the height is absent, zero, negative or not finite.
#[must_use]
pub fn compute_bmi(weight_kg: f64, height_cm: Option<f64>) -> Option<f64> {
    let height_cm = height_cm.filter(|h| h.is_finite() && *h > 0.0)?;
    let height_m = height_cm / 100.0;
    Some(weight_kg / (height_m * height_m))
}

/// True when the BMI falls in the range that earns the health score bonus
#[must_use]
pub fn is_healthy_bmi(bmi: f64) -> bool {
    (NORMAL_MIN..=NORMAL_MAX).contains(&bmi)
}

/// Weight classification by BMI
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum BmiCategory {
    /// Below 18.5
    Underweight,
    /// 18.5 up to 25
    Normal,
    /// 25 up to 30
    Overweight,
    /// 30 and above
    Obese,
}

impl BmiCategory {
    /// Classify a BMI value
    #[must_use]
    pub fn from_bmi(bmi: f64) -> Self {
        if bmi < NORMAL_MIN {
            Self::Underweight
        } else if bmi < NORMAL_MAX {
            Self::Normal
        } else if bmi < OBESE_MIN {
            Self::Overweight
        } else {
            Self::Obese
        }
    }

    /// Display label
    #[must_use]
    pub const fn label(self) -> &'static str {
        match self {
            Self::Underweight => "Underweight",
            Self::Normal => "Normal Weight",
            Self::Overweight => "Overweight",
            Self::Obese => "Obese",
        }
    }
}

#[cfg(test)]
mod tests {
    #![allow(clippy::unwrap_used)]

    use super::*;

    #[test]
    fn test_bmi_formula() {
        let bmi = compute_bmi(70.0, Some(175.0)).unwrap();
        assert!((bmi - 22.857).abs() < 0.001);
    }

    #[test]
    fn test_bmi_zero_height_is_none() {
        assert_eq!(compute_bmi(70.0, Some(0.0)), None);
        assert_eq!(compute_bmi(70.0, Some(-170.0)), None);
        assert_eq!(compute_bmi(70.0, None), None);
    }

    #[test]
    fn test_category_boundaries() {
        assert_eq!(BmiCategory::from_bmi(18.4), BmiCategory::Underweight);
        assert_eq!(BmiCategory::from_bmi(18.5), BmiCategory::Normal);
        assert_eq!(BmiCategory::from_bmi(24.99), BmiCategory::Normal);
        assert_eq!(BmiCategory::from_bmi(25.0), BmiCategory::Overweight);
        assert_eq!(BmiCategory::from_bmi(30.0), BmiCategory::Obese);
    }

    #[test]
    fn test_healthy_range_includes_upper_bound() {
        assert!(is_healthy_bmi(25.0));
        assert!(is_healthy_bmi(18.5));
        assert!(!is_healthy_bmi(25.01));
    }
}
