// ABOUTME: Gamification and health scoring derived from logged activity
// ABOUTME: Experience points, rank tiers, levels, achievements and the capped health score
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

use companion_core::constants::{
    gamification::{
        CONSISTENCY_ENTRIES, ENTRIES_PER_LEVEL, XP_PER_RANK, XP_PER_STREAK_DAY,
        XP_PER_WATER_GLASS, XP_PER_WEIGHT_ENTRY,
    },
    health_score::{BASE, BMI_BONUS, GOAL_BONUS, GOAL_TOLERANCE_KG, MAX, WATER_BONUS},
    hydration::DAILY_WATER_GOAL_GLASSES,
};
use serde::{Deserialize, Serialize};

use crate::bmi::{compute_bmi, is_healthy_bmi};

/// Rank tiers in XP order
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Rank {
    /// 0-99 XP
    Beginner,
    /// 100-199 XP
    Rookie,
    /// 200-299 XP
    Warrior,
    /// 300-399 XP
    Champion,
    /// 400-499 XP
    Legend,
    /// Past the end of the table
    UltimateLegend,
}

impl Rank {
    /// Named tiers indexed by `xp / 100`
    pub const TABLE: [Self; 5] = [
        Self::Beginner,
        Self::Rookie,
        Self::Warrior,
        Self::Champion,
        Self::Legend,
    ];

    /// Rank for an XP total, falling back to the overflow rank
    #[must_use]
    pub fn from_experience(xp: u32) -> Self {
        let index = (xp / XP_PER_RANK) as usize;
        Self::TABLE.get(index).copied().unwrap_or(Self::UltimateLegend)
    }

    /// Display name
    #[must_use]
    pub const fn name(self) -> &'static str {
        match self {
            Self::Beginner => "Beginner",
            Self::Rookie => "Rookie",
            Self::Warrior => "Warrior",
            Self::Champion => "Champion",
            Self::Legend => "Legend",
            Self::UltimateLegend => "Ultimate Legend",
        }
    }
}

/// `10*entries + 2*water + 5*streak`
#[must_use]
pub fn experience_points(weight_entries: usize, water_glasses: u32, streak_days: u32) -> u32 {
    let entries = u32::try_from(weight_entries).unwrap_or(u32::MAX);
    entries
        .saturating_mul(XP_PER_WEIGHT_ENTRY)
        .saturating_add(water_glasses.saturating_mul(XP_PER_WATER_GLASS))
        .saturating_add(streak_days.saturating_mul(XP_PER_STREAK_DAY))
}

/// `xp // 100`
#[must_use]
pub const fn rank_index(xp: u32) -> u32 {
    xp / XP_PER_RANK
}

/// Fraction of the way to the next rank
#[must_use]
pub fn rank_progress(xp: u32) -> f64 {
    f64::from(xp % XP_PER_RANK) / f64::from(XP_PER_RANK)
}

/// `1 + entries // 5`
#[must_use]
pub const fn level(weight_entries: usize) -> usize {
    1 + weight_entries / ENTRIES_PER_LEVEL
}

/// Badges unlocked by the current session state
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Achievement {
    /// Daily water goal met
    HydrationChampion,
    /// Seven or more weight entries
    ConsistencyStar,
    /// Both of the above
    UltimateDiscipline,
}

impl Achievement {
    /// Display title
    #[must_use]
    pub const fn title(self) -> &'static str {
        match self {
            Self::HydrationChampion => "Hydration Champion",
            Self::ConsistencyStar => "Consistency Star",
            Self::UltimateDiscipline => "Ultimate Discipline",
        }
    }
}

/// Unlocked achievements, in display order
#[must_use]
pub fn achievements(water_glasses: u32, weight_entries: usize) -> Vec<Achievement> {
    let hydrated = water_glasses >= DAILY_WATER_GOAL_GLASSES;
    let consistent = weight_entries >= CONSISTENCY_ENTRIES;

    let mut unlocked = Vec::new();
    if hydrated {
        unlocked.push(Achievement::HydrationChampion);
    }
    if consistent {
        unlocked.push(Achievement::ConsistencyStar);
    }
    if hydrated && consistent {
        unlocked.push(Achievement::UltimateDiscipline);
    }
    unlocked
}

/// Health score in `[50, 100]`
///
/// Base 50, +20 for a normal BMI of the latest weight, +15 for meeting the
/// water goal, +15 when the latest weight is within 2 kg of the target.
/// Bonuses needing the latest weight, height or target are skipped when that
/// input is absent.
#[must_use]
pub fn health_score(
    latest_weight_kg: Option<f64>,
    water_glasses: u32,
    height_cm: Option<f64>,
    target_weight_kg: Option<f64>,
) -> u32 {
    let mut score = BASE;

    if latest_weight_kg
        .and_then(|weight| compute_bmi(weight, height_cm))
        .is_some_and(is_healthy_bmi)
    {
        score += BMI_BONUS;
    }

    if water_glasses >= DAILY_WATER_GOAL_GLASSES {
        score += WATER_BONUS;
    }

    if let (Some(latest), Some(target)) = (latest_weight_kg, target_weight_kg) {
        if (latest - target).abs() <= GOAL_TOLERANCE_KG {
            score += GOAL_BONUS;
        }
    }

    score.min(MAX)
}
