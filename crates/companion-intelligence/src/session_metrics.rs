// ABOUTME: Mutable per-session health state with its update rules and derived reads
// ABOUTME: Water resets on a new calendar day; every derived value is recomputed on read
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence
#![allow(clippy::cast_precision_loss)] // Safe: levels and counts are small

//! # Session Metrics
//!
//! [`SessionMetrics`] is the only stored state behind the dashboard. Experience,
//! rank, level, BMI, health score and the trend projection are pure functions
//! of it plus the height and target weight supplied at read time, so nothing
//! derived can drift from its inputs.

use chrono::{NaiveDate, NaiveDateTime};
use companion_core::constants::{
    gamification::MAX_DISPLAY_LEVEL,
    health_score::GOAL_REACHED_TOLERANCE_KG,
    hydration::DAILY_WATER_GOAL_GLASSES,
    limits::{WEIGHT_MAX_KG, WEIGHT_MIN_KG},
};
use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::bmi::{compute_bmi, BmiCategory};
use crate::errors::MetricsError;
use crate::scoring::{self, Achievement, Rank};
use crate::statistics::{StatisticalAnalyzer, TrendProjection};

/// Target body weight, always within `[30, 200]` kg
#[derive(Debug, Clone, Copy, PartialEq, PartialOrd, Serialize, Deserialize)]
#[serde(try_from = "f64", into = "f64")]
pub struct TargetWeight(f64);

impl TargetWeight {
    /// Validate a target weight in kilograms
    ///
    /// # Errors
    ///
    /// Returns [`MetricsError::OutOfRange`] outside `[30, 200]` or for non-finite input.
    pub fn new(kg: f64) -> Result<Self, MetricsError> {
        if kg.is_finite() && (WEIGHT_MIN_KG..=WEIGHT_MAX_KG).contains(&kg) {
            Ok(Self(kg))
        } else {
            Err(MetricsError::OutOfRange {
                field: "target_weight_kg",
                min: WEIGHT_MIN_KG,
                max: WEIGHT_MAX_KG,
                value: kg,
            })
        }
    }

    /// Kilograms
    #[must_use]
    pub const fn kg(self) -> f64 {
        self.0
    }
}

impl TryFrom<f64> for TargetWeight {
    type Error = MetricsError;

    fn try_from(kg: f64) -> Result<Self, Self::Error> {
        Self::new(kg)
    }
}

impl From<TargetWeight> for f64 {
    fn from(target: TargetWeight) -> Self {
        target.0
    }
}

/// Record emitted to the fitness log when a weight is logged
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct WeightLogRecord {
    /// Logged weight in kilograms
    pub weight_kg: f64,
    /// Water glasses at the time of logging
    pub water_glasses: u32,
    /// BMI when height was known
    pub bmi: Option<f64>,
    /// Local time of the entry
    pub timestamp: NaiveDateTime,
}

/// Per-session health state
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SessionMetrics {
    water_glasses: u32,
    weight_history: Vec<f64>,
    streak_days: u32,
    target_weight: Option<TargetWeight>,
    last_reset_date: NaiveDate,
}

impl SessionMetrics {
    /// Fresh state for a session starting on `today`
    #[must_use]
    pub const fn new(today: NaiveDate) -> Self {
        Self {
            water_glasses: 0,
            weight_history: Vec::new(),
            streak_days: 0,
            target_weight: None,
            last_reset_date: today,
        }
    }

    /// Glasses of water since the last reset
    #[must_use]
    pub const fn water_glasses(&self) -> u32 {
        self.water_glasses
    }

    /// Logged weights, oldest first
    #[must_use]
    pub fn weight_history(&self) -> &[f64] {
        &self.weight_history
    }

    /// Healthy days logged
    #[must_use]
    pub const fn streak_days(&self) -> u32 {
        self.streak_days
    }

    /// Current target weight
    #[must_use]
    pub const fn target_weight(&self) -> Option<TargetWeight> {
        self.target_weight
    }

    /// Date the water counter was last validated against
    #[must_use]
    pub const fn last_reset_date(&self) -> NaiveDate {
        self.last_reset_date
    }

    /// Most recent logged weight
    #[must_use]
    pub fn latest_weight(&self) -> Option<f64> {
        self.weight_history.last().copied()
    }

    /// Drink one glass
    pub fn record_water(&mut self) {
        self.water_glasses = self.water_glasses.saturating_add(1);
    }

    /// Zero the water counter when `today` differs from the last reset date
    ///
    /// Returns `true` when a reset happened. Calling it again on the same
    /// date is a no-op.
    pub fn reset_water_if_new_day(&mut self, today: NaiveDate) -> bool {
        if today == self.last_reset_date {
            return false;
        }
        debug!(
            previous = %self.last_reset_date,
            %today,
            glasses = self.water_glasses,
            "New day, resetting water intake"
        );
        self.water_glasses = 0;
        self.last_reset_date = today;
        true
    }

    /// Append a weight sample and build the record to persist
    pub fn log_weight(
        &mut self,
        sample_kg: f64,
        height_cm: Option<f64>,
        timestamp: NaiveDateTime,
    ) -> WeightLogRecord {
        self.weight_history.push(sample_kg);
        WeightLogRecord {
            weight_kg: sample_kg,
            water_glasses: self.water_glasses,
            bmi: compute_bmi(sample_kg, height_cm),
            timestamp,
        }
    }

    /// Log one healthy day
    pub fn log_streak_day(&mut self) {
        self.streak_days = self.streak_days.saturating_add(1);
    }

    /// Set the target weight
    ///
    /// # Errors
    ///
    /// Returns [`MetricsError::OutOfRange`] outside `[30, 200]`; state is unchanged.
    pub fn set_target_weight(&mut self, kg: f64) -> Result<TargetWeight, MetricsError> {
        let target = TargetWeight::new(kg)?;
        self.target_weight = Some(target);
        Ok(target)
    }

    /// Experience points
    #[must_use]
    pub fn compute_experience(&self) -> u32 {
        scoring::experience_points(
            self.weight_history.len(),
            self.water_glasses,
            self.streak_days,
        )
    }

    /// Rank tier for the current experience
    #[must_use]
    pub fn compute_rank(&self) -> Rank {
        Rank::from_experience(self.compute_experience())
    }

    /// Level from the number of weight entries
    #[must_use]
    pub fn compute_level(&self) -> usize {
        scoring::level(self.weight_history.len())
    }

    /// Health score for the given height and target
    #[must_use]
    pub fn compute_health_score(&self, height_cm: Option<f64>, target_kg: Option<f64>) -> u32 {
        scoring::health_score(
            self.latest_weight(),
            self.water_glasses,
            height_cm,
            target_kg,
        )
    }

    /// Seven-day projection of the weight log
    ///
    /// # Errors
    ///
    /// Returns [`MetricsError::InsufficientData`] with fewer than two entries.
    pub fn compute_trend(&self) -> Result<TrendProjection, MetricsError> {
        StatisticalAnalyzer::project_trend(&self.weight_history)
    }

    /// Latest weight within 1 kg of the target
    #[must_use]
    pub fn goal_reached(&self) -> bool {
        match (self.latest_weight(), self.target_weight) {
            (Some(latest), Some(target)) => {
                (latest - target.kg()).abs() <= GOAL_REACHED_TOLERANCE_KG
            }
            _ => false,
        }
    }

    /// Every derived value for one read
    #[must_use]
    pub fn snapshot(&self, height_cm: Option<f64>) -> MetricsSnapshot {
        let experience_points = self.compute_experience();
        let rank = Rank::from_experience(experience_points);
        let level = self.compute_level();
        let latest_weight_kg = self.latest_weight();
        let target_weight_kg = self.target_weight.map(TargetWeight::kg);
        let bmi = latest_weight_kg.and_then(|weight| compute_bmi(weight, height_cm));

        MetricsSnapshot {
            water_glasses: self.water_glasses,
            water_goal: DAILY_WATER_GOAL_GLASSES,
            water_progress: (f64::from(self.water_glasses)
                / f64::from(DAILY_WATER_GOAL_GLASSES))
            .min(1.0),
            weight_entries: self.weight_history.len(),
            latest_weight_kg,
            streak_days: self.streak_days,
            experience_points,
            rank,
            rank_name: rank.name(),
            rank_progress: scoring::rank_progress(experience_points),
            level,
            level_progress: (level as f64 / MAX_DISPLAY_LEVEL as f64).min(1.0),
            health_score: self.compute_health_score(height_cm, target_weight_kg),
            bmi,
            bmi_category: bmi.map(BmiCategory::from_bmi),
            target_weight_kg,
            goal_reached: self.goal_reached(),
            achievements: scoring::achievements(self.water_glasses, self.weight_history.len()),
            trend: self.compute_trend().ok(),
        }
    }
}

/// Derived dashboard values at one point in time
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct MetricsSnapshot {
    /// Glasses of water today
    pub water_glasses: u32,
    /// Daily goal in glasses
    pub water_goal: u32,
    /// `min(water / goal, 1)`
    pub water_progress: f64,
    /// Number of logged weights
    pub weight_entries: usize,
    /// Most recent weight
    pub latest_weight_kg: Option<f64>,
    /// Healthy days logged
    pub streak_days: u32,
    /// Experience points
    pub experience_points: u32,
    /// Rank tier
    pub rank: Rank,
    /// Rank display name
    pub rank_name: &'static str,
    /// Progress toward the next rank
    pub rank_progress: f64,
    /// Level
    pub level: usize,
    /// `min(level / 10, 1)`
    pub level_progress: f64,
    /// Health score out of 100
    pub health_score: u32,
    /// BMI of the latest weight when height is known
    pub bmi: Option<f64>,
    /// Classification of `bmi`
    pub bmi_category: Option<BmiCategory>,
    /// Target weight
    pub target_weight_kg: Option<f64>,
    /// Latest weight within 1 kg of target
    pub goal_reached: bool,
    /// Unlocked achievements
    pub achievements: Vec<Achievement>,
    /// Seven-day projection when at least two weights exist
    pub trend: Option<TrendProjection>,
}

#[cfg(test)]
mod tests {
    #![allow(clippy::unwrap_used)]

    use super::*;

    fn day(d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(2025, 6, d).unwrap()
    }

    fn at(d: u32) -> NaiveDateTime {
        day(d).and_hms_opt(9, 0, 0).unwrap()
    }

    #[test]
    fn test_water_resets_on_new_day_only() {
        let mut metrics = SessionMetrics::new(day(1));
        metrics.record_water();
        metrics.record_water();
        assert!(!metrics.reset_water_if_new_day(day(1)));
        assert_eq!(metrics.water_glasses(), 2);

        assert!(metrics.reset_water_if_new_day(day(2)));
        assert_eq!(metrics.water_glasses(), 0);
        assert_eq!(metrics.last_reset_date(), day(2));
    }

    #[test]
    fn test_reset_is_idempotent_within_a_day() {
        let mut metrics = SessionMetrics::new(day(1));
        metrics.reset_water_if_new_day(day(3));
        metrics.record_water();
        assert!(!metrics.reset_water_if_new_day(day(3)));
        assert_eq!(metrics.water_glasses(), 1);
    }

    #[test]
    fn test_log_weight_builds_record() {
        let mut metrics = SessionMetrics::new(day(1));
        metrics.record_water();
        let record = metrics.log_weight(70.0, Some(175.0), at(1));
        assert_eq!(record.water_glasses, 1);
        assert!((record.bmi.unwrap() - 22.857).abs() < 0.001);
        assert_eq!(record.timestamp, at(1));

        let without_height = metrics.log_weight(69.5, None, at(1));
        assert_eq!(without_height.bmi, None);
        assert_eq!(metrics.weight_history(), &[70.0, 69.5]);
    }

    #[test]
    fn test_target_weight_validation_keeps_previous_value() {
        let mut metrics = SessionMetrics::new(day(1));
        metrics.set_target_weight(65.0).unwrap();
        assert!(metrics.set_target_weight(250.0).is_err());
        assert!(metrics.set_target_weight(f64::NAN).is_err());
        assert_eq!(metrics.target_weight().map(TargetWeight::kg), Some(65.0));
    }

    #[test]
    fn test_health_score_scenario() {
        let mut metrics = SessionMetrics::new(day(1));
        for _ in 0..8 {
            metrics.record_water();
        }
        metrics.log_weight(70.0, None, at(1));
        assert_eq!(metrics.compute_health_score(None, Some(70.0)), 80);
    }

    #[test]
    fn test_trend_scenario() {
        let mut metrics = SessionMetrics::new(day(1));
        assert!(metrics.compute_trend().is_err());
        metrics.log_weight(80.0, None, at(1));
        assert!(metrics.compute_trend().is_err());
        metrics.log_weight(79.0, None, at(2));
        let trend = metrics.compute_trend().unwrap();
        assert!((trend.predicted_weight_kg - 71.0).abs() < 1e-9);
    }

    #[test]
    fn test_trend_with_overflowing_history_is_an_error() {
        let mut metrics = SessionMetrics::new(day(1));
        metrics.log_weight(1e308, None, at(1));
        metrics.log_weight(1e308, None, at(2));
        assert!(matches!(
            metrics.compute_trend(),
            Err(MetricsError::NonFinite { .. })
        ));
    }

    #[test]
    fn test_goal_reached_within_one_kg() {
        let mut metrics = SessionMetrics::new(day(1));
        metrics.set_target_weight(70.0).unwrap();
        metrics.log_weight(71.5, None, at(1));
        assert!(!metrics.goal_reached());
        metrics.log_weight(70.8, None, at(2));
        assert!(metrics.goal_reached());
    }

    #[test]
    fn test_snapshot_derives_everything() {
        let mut metrics = SessionMetrics::new(day(1));
        for _ in 0..10 {
            metrics.record_water();
        }
        for (i, weight) in [74.0, 73.5, 73.0, 72.6, 72.0, 71.8, 71.1].iter().enumerate() {
            metrics.log_weight(*weight, Some(178.0), at(1 + u32::try_from(i).unwrap()));
        }
        metrics.log_streak_day();
        metrics.set_target_weight(71.0).unwrap();

        let snapshot = metrics.snapshot(Some(178.0));
        assert_eq!(snapshot.experience_points, 70 + 20 + 5);
        assert_eq!(snapshot.rank, Rank::Beginner);
        assert_eq!(snapshot.level, 2);
        assert!((snapshot.level_progress - 0.2).abs() < 1e-12);
        assert!((snapshot.water_progress - 1.0).abs() < f64::EPSILON);
        assert_eq!(snapshot.health_score, 100);
        assert_eq!(snapshot.bmi_category, Some(BmiCategory::Normal));
        assert!(snapshot.goal_reached);
        assert_eq!(snapshot.achievements.len(), 3);
        assert!(snapshot.trend.is_some());
    }

    #[test]
    fn test_target_weight_deserialization_validates() {
        assert!(serde_json::from_str::<TargetWeight>("72.5").is_ok());
        assert!(serde_json::from_str::<TargetWeight>("12.0").is_err());
    }
}
