// ABOUTME: Core data models shared by the metrics engine, storage and HTTP layers
// ABOUTME: Health profile, fitness log rows and leaderboard entries
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

//! Domain models

/// Fitness log rows and leaderboard entries
pub mod fitness_log;
/// Free-text health profile
pub mod profile;

pub use fitness_log::{FitnessLogEntry, LeaderboardEntry};
pub use profile::HealthProfile;
