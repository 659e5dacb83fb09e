// ABOUTME: Rows of the shared fitness log file and the leaderboard built from them
// ABOUTME: Column names and timestamp format match the flat CSV layout
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};

/// One persisted weight sample
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FitnessLogEntry {
    /// Session identity that logged the sample
    #[serde(rename = "Username")]
    pub username: String,
    /// Weight in kilograms
    #[serde(rename = "Weight")]
    pub weight: f64,
    /// Glasses of water at the time of logging
    #[serde(rename = "Water")]
    pub water: u32,
    /// BMI, empty when height was unknown
    #[serde(rename = "BMI")]
    pub bmi: Option<f64>,
    /// Local timestamp of the entry
    #[serde(rename = "Date", with = "log_timestamp")]
    pub date: NaiveDateTime,
}

/// Number of log rows per user
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LeaderboardEntry {
    /// Username column value
    pub username: String,
    /// Rows logged by this user
    pub entries_logged: usize,
}

/// Timestamps are written as `2025-01-31 08:15:00.000000`; the ISO `T`
/// separator is accepted on read.
mod log_timestamp {
    use chrono::NaiveDateTime;
    use serde::{de::Error as _, Deserialize, Deserializer, Serializer};

    const WRITE_FORMAT: &str = "%Y-%m-%d %H:%M:%S%.6f";
    const READ_FORMATS: &[&str] = &["%Y-%m-%d %H:%M:%S%.f", "%Y-%m-%dT%H:%M:%S%.f"];

    pub fn serialize<S: Serializer>(value: &NaiveDateTime, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_str(&value.format(WRITE_FORMAT))
    }

    pub fn deserialize<'de, D: Deserializer<'de>>(deserializer: D) -> Result<NaiveDateTime, D::Error> {
        let raw = String::deserialize(deserializer)?;
        READ_FORMATS
            .iter()
            .find_map(|format| NaiveDateTime::parse_from_str(raw.trim(), format).ok())
            .ok_or_else(|| D::Error::custom(format!("unrecognized timestamp: {raw}")))
    }
}
