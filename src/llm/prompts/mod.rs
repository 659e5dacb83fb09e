// ABOUTME: Prompt templates for the nutrition and coaching assistant features
// ABOUTME: Renders meal plan, food analysis, insights, coaching, risk and weekly report prompts
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

//! # Prompt Templates
//!
//! Each assistant feature sends a single user prompt. The builders here render
//! the session's profile and tracker state into those prompts.

use companion_core::models::HealthProfile;

/// Fixed prompt for food photo analysis
pub const FOOD_ANALYSIS_PROMPT: &str = "\
You are an expert nutritionist. Analyze this food image.

Provide detailed information about:
- Estimated calories
- Macronutrient breakdown
- Potential health benefits
- Any concerns based on common dietary restrictions
- Suggested portion sizes

If the food contains multiple items, analyze each separately.
";

/// Render a weight history as `[80.0, 79.5]`
fn format_history(weights: &[f64]) -> String {
    let entries: Vec<String> = weights.iter().map(|w| format!("{w:?}")).collect();
    format!("[{}]", entries.join(", "))
}

/// Seven-day meal plan for the profile plus free-text requirements
#[must_use]
pub fn meal_plan(profile: &HealthProfile, requirements: &str) -> String {
    let requirements = if requirements.trim().is_empty() {
        "None provided"
    } else {
        requirements.trim()
    };

    format!(
        "Create a personalized meal plan based on the following health profile:

{profile}

Additional requirements: {requirements}

Provide:
1. A 7-day meal plan with breakfast, lunch, dinner, and snacks
2. Nutritional breakdown for each day (calories, macros)
3. Contextual explanations for why each meal was chosen
4. Shopping list organized by category
5. Preparation tips and time-saving suggestions

Format the output clearly with headings and bullet points.
"
    )
}

/// Science-backed answer to a health question
#[must_use]
pub fn health_insights(question: &str, profile: &HealthProfile) -> String {
    format!(
        "You are a certified nutritionist and health expert.

Provide detailed, science-backed insights about:
{question}

Consider the user's health profile:
{profile}

Include:
1. Clear explanation of the science
2. Practical recommendations
3. Any relevant precautions
4. References to studies (when applicable)
5. Suggested foods/supplements if appropriate

Use simple language but maintain accuracy.
",
        question = question.trim()
    )
}

/// Short daily coaching message
#[must_use]
pub fn coach_advice(profile: &HealthProfile, water_glasses: u32, weights: &[f64]) -> String {
    format!(
        "User Profile:
{profile}
Water: {water_glasses}
Weight History: {history}

Give short powerful daily coaching advice.
",
        history = format_history(weights)
    )
}

/// Lifestyle risk analysis
#[must_use]
pub fn risk_analysis(profile: &HealthProfile, water_glasses: u32, weights: &[f64]) -> String {
    format!(
        "User Health Data:
Profile:
{profile}
Water Intake: {water_glasses}
Weight History: {history}

Analyze potential health risks, lifestyle imbalances,
and suggest preventive improvements.
",
        history = format_history(weights)
    )
}

/// Weekly summary of the tracker state
#[must_use]
pub fn weekly_report(
    latest_weight_kg: Option<f64>,
    target_weight_kg: Option<f64>,
    water_glasses: u32,
    weights: &[f64],
) -> String {
    let current = latest_weight_kg.map_or_else(|| "Not logged".to_owned(), |w| format!("{w:?}"));
    let target = target_weight_kg.map_or_else(|| "Not set".to_owned(), |w| format!("{w:?}"));

    format!(
        "User Health Data:
Current Weight: {current}
Target Weight: {target}
Water Intake Today: {water_glasses}
Weight History: {history}

Generate:
1. Weekly health summary
2. Progress analysis
3. Improvement suggestions
4. Motivation message
",
        history = format_history(weights)
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_meal_plan_defaults_requirements() {
        let prompt = meal_plan(&HealthProfile::default(), "   ");
        assert!(prompt.contains("Additional requirements: None provided"));
        assert!(prompt.contains("Health Goals:"));
        assert!(prompt.contains("7-day meal plan"));
    }

    #[test]
    fn test_meal_plan_includes_requirements() {
        let prompt = meal_plan(&HealthProfile::default(), "quick lunches");
        assert!(prompt.contains("Additional requirements: quick lunches"));
    }

    #[test]
    fn test_weekly_report_without_weight() {
        let prompt = weekly_report(None, Some(70.0), 3, &[]);
        assert!(prompt.contains("Current Weight: Not logged"));
        assert!(prompt.contains("Target Weight: 70.0"));
        assert!(prompt.contains("Weight History: []"));
    }

    #[test]
    fn test_history_formatting() {
        let prompt = coach_advice(&HealthProfile::default(), 5, &[80.0, 79.5]);
        assert!(prompt.contains("Water: 5"));
        assert!(prompt.contains("Weight History: [80.0, 79.5]"));
    }

    #[test]
    fn test_insights_embeds_question() {
        let prompt = health_insights("  How can I improve my gut health?  ", &HealthProfile::default());
        assert!(prompt.contains("insights about:\nHow can I improve my gut health?\n"));
    }
}
