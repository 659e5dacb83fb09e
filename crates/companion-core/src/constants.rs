// ABOUTME: Health thresholds, gamification tables and accepted input ranges
// ABOUTME: Single source for the numbers the metrics engine and API validation share
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

//! Constants organized by domain

/// Water tracking
pub mod hydration {
    /// Daily goal in glasses
    pub const DAILY_WATER_GOAL_GLASSES: u32 = 8;
}

/// Body mass index thresholds (WHO adult classification)
pub mod bmi {
    /// Lower bound of the normal range
    pub const NORMAL_MIN: f64 = 18.5;
    /// Upper bound of the normal range used by the health score (inclusive)
    pub const NORMAL_MAX: f64 = 25.0;
    /// Lower bound of the obese range
    pub const OBESE_MIN: f64 = 30.0;
}

/// Experience points, ranks and levels
pub mod gamification {
    /// XP per logged weight sample
    pub const XP_PER_WEIGHT_ENTRY: u32 = 10;
    /// XP per glass of water
    pub const XP_PER_WATER_GLASS: u32 = 2;
    /// XP per healthy streak day
    pub const XP_PER_STREAK_DAY: u32 = 5;
    /// XP needed per rank tier
    pub const XP_PER_RANK: u32 = 100;
    /// Weight entries per level
    pub const ENTRIES_PER_LEVEL: usize = 5;
    /// Level at which the level progress bar is full
    pub const MAX_DISPLAY_LEVEL: usize = 10;
    /// Weight entries needed for the consistency achievement
    pub const CONSISTENCY_ENTRIES: usize = 7;
}

/// Health score composition
pub mod health_score {
    /// Score with no bonuses
    pub const BASE: u32 = 50;
    /// Bonus for a normal BMI
    pub const BMI_BONUS: u32 = 20;
    /// Bonus for meeting the daily water goal
    pub const WATER_BONUS: u32 = 15;
    /// Bonus for being near the target weight
    pub const GOAL_BONUS: u32 = 15;
    /// Score ceiling
    pub const MAX: u32 = 100;
    /// Distance from target (kg) that still earns the goal bonus
    pub const GOAL_TOLERANCE_KG: f64 = 2.0;
    /// Distance from target (kg) that counts as the goal being reached
    pub const GOAL_REACHED_TOLERANCE_KG: f64 = 1.0;
}

/// Trend projection
pub mod trend {
    /// Days past the last sample to project
    pub const PROJECTION_DAYS: usize = 7;
    /// Samples needed for a regression
    pub const MIN_SAMPLES: usize = 2;
}

/// Accepted ranges for user-entered values
pub mod limits {
    /// Minimum target/body weight in kg
    pub const WEIGHT_MIN_KG: f64 = 30.0;
    /// Maximum target/body weight in kg
    pub const WEIGHT_MAX_KG: f64 = 200.0;
    /// Minimum height in cm for the BMI calculator
    pub const HEIGHT_MIN_CM: f64 = 100.0;
    /// Maximum height in cm for the BMI calculator
    pub const HEIGHT_MAX_CM: f64 = 250.0;
}
