// ABOUTME: Free-text health profile edited by the user and fed into AI prompts
// ABOUTME: Replaced wholesale on update and reset to defaults with each new session
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

use std::fmt;

use serde::{Deserialize, Serialize};

/// User health profile
///
/// All fields are free text. No validation is applied; an update replaces
/// every field at once.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct HealthProfile {
    /// Health goals
    pub goals: String,
    /// Medical conditions
    pub conditions: String,
    /// Fitness routines
    pub routines: String,
    /// Food preferences
    pub preferences: String,
    /// Dietary restrictions
    pub restrictions: String,
}

impl Default for HealthProfile {
    fn default() -> Self {
        Self {
            goals: "Lose 10 pounds in 3 months\nImprove cardiovascular health".to_owned(),
            conditions: "None".to_owned(),
            routines: "30-minute walk 3x/week".to_owned(),
            preferences: "Vegetarian\nLow carb".to_owned(),
            restrictions: "No dairy\nNo nuts".to_owned(),
        }
    }
}

impl HealthProfile {
    /// True when every field is blank
    #[must_use]
    pub fn is_empty(&self) -> bool {
        [
            &self.goals,
            &self.conditions,
            &self.routines,
            &self.preferences,
            &self.restrictions,
        ]
        .iter()
        .all(|field| field.trim().is_empty())
    }
}

impl fmt::Display for HealthProfile {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "Health Goals: {}", self.goals)?;
        writeln!(f, "Medical Conditions: {}", self.conditions)?;
        writeln!(f, "Fitness Routines: {}", self.routines)?;
        writeln!(f, "Food Preferences: {}", self.preferences)?;
        write!(f, "Dietary Restrictions: {}", self.restrictions)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_profile_is_not_empty() {
        assert!(!HealthProfile::default().is_empty());
    }

    #[test]
    fn test_whitespace_only_profile_is_empty() {
        let profile = HealthProfile {
            goals: "  ".to_owned(),
            conditions: String::new(),
            routines: "\n".to_owned(),
            preferences: String::new(),
            restrictions: "\t".to_owned(),
        };
        assert!(profile.is_empty());
    }

    #[test]
    fn test_display_lists_every_field() {
        let rendered = HealthProfile::default().to_string();
        assert!(rendered.contains("Health Goals: Lose 10 pounds"));
        assert!(rendered.ends_with("Dietary Restrictions: No dairy\nNo nuts"));
    }
}
