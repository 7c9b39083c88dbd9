//! Red-flag detector.
//!
//! An ordered decision list over tokens and vitals. Emergency rules are all
//! evaluated and their reasons accumulate; if any fired, the result is
//! `EmergencyNow` and the urgent tier is never consulted. Urgent rules are
//! first-match-wins with a single reason.

use crate::models::symptom::{
    CHEST_PAIN, CONFUSION, COUGH_BLOOD, MEMORY_ISSUES, NOSE_BLEED, SEIZURES, SHORTNESS_OF_BREATH,
    SPEECH_DIFFICULTY, VISION_CHANGES, VOMITING,
};
use crate::models::{RedFlagLevel, TokenSet, Vitals};

use super::types::RedFlagResult;

/// Temperature at or above which fever is treated as urgent (°C).
pub const VERY_HIGH_FEVER_C: f64 = 40.0;
/// Vomiting for at least this many days is treated as urgent.
pub const PERSISTENT_VOMITING_DAYS: u32 = 2;

/// Condition under which a red-flag rule fires.
pub enum FlagCondition {
    /// Every token present.
    AllTokens(&'static [&'static str]),
    /// At least one token present.
    AnyToken(&'static [&'static str]),
    /// At least one nested condition holds.
    AnyOf(&'static [FlagCondition]),
    /// Recorded temperature at or above the threshold.
    TemperatureAtLeast(f64),
    /// Token present and reported duration at least `days`.
    TokenForDays {
        token: &'static str,
        days: u32,
    },
}

impl FlagCondition {
    pub fn matches(&self, tokens: &TokenSet, vitals: &Vitals) -> bool {
        match self {
            Self::AllTokens(required) => tokens.contains_all(required),
            Self::AnyToken(candidates) => tokens.contains_any(candidates),
            Self::AnyOf(conditions) => conditions.iter().any(|c| c.matches(tokens, vitals)),
            Self::TemperatureAtLeast(threshold) => vitals
                .temperature_celsius
                .is_some_and(|t| t >= *threshold),
            Self::TokenForDays { token, days } => {
                tokens.contains(token) && vitals.duration_days >= *days
            }
        }
    }
}

/// A hard-coded red-flag rule.
pub struct RedFlagRule {
    /// Identifier for the audit log.
    pub id: &'static str,
    pub condition: FlagCondition,
    /// User-facing reason.
    pub reason: &'static str,
}

// ── Rule registry ───────────────────────────────────────────

/// Emergency tier. All matching reasons are reported.
pub static EMERGENCY_RULES: &[RedFlagRule] = &[
    RedFlagRule {
        id: "RF-E1",
        condition: FlagCondition::AllTokens(&[CHEST_PAIN, SHORTNESS_OF_BREATH]),
        reason: "Chest pain with shortness of breath",
    },
    RedFlagRule {
        id: "RF-E2",
        condition: FlagCondition::AnyToken(&[
            SEIZURES,
            SPEECH_DIFFICULTY,
            MEMORY_ISSUES,
            CONFUSION,
            VISION_CHANGES,
        ]),
        reason: "Neurologic concern",
    },
    RedFlagRule {
        id: "RF-E3",
        condition: FlagCondition::AnyOf(&[
            FlagCondition::AnyToken(&[COUGH_BLOOD]),
            FlagCondition::AllTokens(&[NOSE_BLEED, SHORTNESS_OF_BREATH]),
        ]),
        reason: "Bleeding with breathing symptoms",
    },
];

/// Urgent tier, in priority order. First match wins.
pub static URGENT_RULES: &[RedFlagRule] = &[
    RedFlagRule {
        id: "RF-U1",
        condition: FlagCondition::TemperatureAtLeast(VERY_HIGH_FEVER_C),
        reason: "Very high fever (≥ 40°C)",
    },
    RedFlagRule {
        id: "RF-U2",
        condition: FlagCondition::AnyToken(&[SHORTNESS_OF_BREATH]),
        reason: "Breathing difficulty",
    },
    RedFlagRule {
        id: "RF-U3",
        condition: FlagCondition::TokenForDays {
            token: VOMITING,
            days: PERSISTENT_VOMITING_DAYS,
        },
        reason: "Persistent vomiting",
    },
];

/// Evaluate the decision list.
pub fn detect_red_flags(tokens: &TokenSet, vitals: &Vitals) -> RedFlagResult {
    let fired: Vec<&RedFlagRule> = EMERGENCY_RULES
        .iter()
        .filter(|rule| rule.condition.matches(tokens, vitals))
        .collect();

    if !fired.is_empty() {
        let ids: Vec<&str> = fired.iter().map(|r| r.id).collect();
        tracing::warn!(rules = ?ids, "Emergency red flag fired");
        return RedFlagResult {
            level: RedFlagLevel::EmergencyNow,
            reasons: fired.iter().map(|r| r.reason.to_string()).collect(),
        };
    }

    if let Some(rule) = URGENT_RULES
        .iter()
        .find(|rule| rule.condition.matches(tokens, vitals))
    {
        tracing::warn!(rule_id = rule.id, "Urgent red flag fired");
        return RedFlagResult {
            level: RedFlagLevel::UrgentToday,
            reasons: vec![rule.reason.to_string()],
        };
    }

    RedFlagResult::non_urgent()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn tokens(list: &[&str]) -> TokenSet {
        list.iter().copied().collect()
    }

    #[test]
    fn chest_pain_with_breathlessness_is_emergency() {
        let result = detect_red_flags(
            &tokens(&[CHEST_PAIN, SHORTNESS_OF_BREATH]),
            &Vitals::default(),
        );
        assert_eq!(result.level, RedFlagLevel::EmergencyNow);
        assert_eq!(result.reasons, vec!["Chest pain with shortness of breath"]);
    }

    #[test]
    fn chest_pain_alone_is_not_flagged() {
        let result = detect_red_flags(&tokens(&[CHEST_PAIN]), &Vitals::default());
        assert_eq!(result, RedFlagResult::non_urgent());
    }

    #[test]
    fn each_neurologic_token_is_emergency() {
        for token in [SEIZURES, SPEECH_DIFFICULTY, MEMORY_ISSUES, CONFUSION, VISION_CHANGES] {
            let result = detect_red_flags(&tokens(&[token]), &Vitals::default());
            assert_eq!(result.level, RedFlagLevel::EmergencyNow, "{token}");
            assert_eq!(result.reasons, vec!["Neurologic concern"]);
        }
    }

    #[test]
    fn emergency_reasons_accumulate_in_rule_order() {
        let result = detect_red_flags(
            &tokens(&[CHEST_PAIN, SHORTNESS_OF_BREATH, CONFUSION, NOSE_BLEED]),
            &Vitals::with_temperature(41.0),
        );
        assert_eq!(result.level, RedFlagLevel::EmergencyNow);
        assert_eq!(
            result.reasons,
            vec![
                "Chest pain with shortness of breath",
                "Neurologic concern",
                "Bleeding with breathing symptoms",
            ]
        );
    }

    #[test]
    fn coughing_blood_alone_is_emergency() {
        let result = detect_red_flags(&tokens(&[COUGH_BLOOD]), &Vitals::default());
        assert_eq!(result.reasons, vec!["Bleeding with breathing symptoms"]);
    }

    #[test]
    fn nose_bleed_alone_is_not_flagged() {
        let result = detect_red_flags(&tokens(&[NOSE_BLEED]), &Vitals::default());
        assert_eq!(result.level, RedFlagLevel::NonUrgent);
    }

    #[test]
    fn very_high_fever_is_urgent() {
        let result = detect_red_flags(&TokenSet::new(), &Vitals::with_temperature(40.0));
        assert_eq!(result.level, RedFlagLevel::UrgentToday);
        assert_eq!(result.reasons, vec!["Very high fever (≥ 40°C)"]);
    }

    #[test]
    fn fever_just_below_threshold_is_not_urgent() {
        let result = detect_red_flags(&TokenSet::new(), &Vitals::with_temperature(39.9));
        assert_eq!(result.level, RedFlagLevel::NonUrgent);
    }

    #[test]
    fn urgent_tier_is_first_match_wins() {
        let vitals = Vitals {
            temperature_celsius: Some(40.5),
            duration_days: 4,
            ..Vitals::default()
        };
        let result = detect_red_flags(&tokens(&[SHORTNESS_OF_BREATH, VOMITING]), &vitals);
        assert_eq!(result.level, RedFlagLevel::UrgentToday);
        assert_eq!(result.reasons, vec!["Very high fever (≥ 40°C)"]);
    }

    #[test]
    fn breathlessness_alone_is_urgent() {
        let result = detect_red_flags(&tokens(&[SHORTNESS_OF_BREATH]), &Vitals::default());
        assert_eq!(result.reasons, vec!["Breathing difficulty"]);
    }

    #[test]
    fn vomiting_needs_two_days() {
        let short = detect_red_flags(&tokens(&[VOMITING]), &Vitals::with_duration(1));
        assert_eq!(short.level, RedFlagLevel::NonUrgent);

        let long = detect_red_flags(&tokens(&[VOMITING]), &Vitals::with_duration(2));
        assert_eq!(long.level, RedFlagLevel::UrgentToday);
        assert_eq!(long.reasons, vec!["Persistent vomiting"]);
    }

    #[test]
    fn empty_input_is_non_urgent() {
        let result = detect_red_flags(&TokenSet::new(), &Vitals::default());
        assert!(!result.is_emergency());
        assert!(result.reasons.is_empty());
    }
}
