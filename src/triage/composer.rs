use crate::models::{RedFlagLevel, ScoredCondition, UrgencyLevel, DEFAULT_ESCALATION};

use super::types::{Recommendation, RedFlagResult};

pub const EMERGENCY_ADVICE: &str = "Call your local emergency number now.";
pub const EMERGENCY_ESCALATION: &str = "Immediate medical attention recommended.";
pub const NO_CLEAR_MATCH: &str = "No clear match. Consider contacting a clinician.";

/// Condition ids that raise a non-urgent case to a GP visit within 24–48 hours.
pub const GP_REVIEW_CONDITIONS: &[&str] = &["gastro"];

/// Combine the red-flag outcome with the ranked conditions.
///
/// An emergency suppresses the condition list entirely. Otherwise urgent
/// beats GP review, which beats self-care. Advice, monitoring and escalation
/// text come from the top-ranked condition.
pub fn compose(red_flags: RedFlagResult, ranked: Vec<ScoredCondition>) -> Recommendation {
    if red_flags.level == RedFlagLevel::EmergencyNow {
        return Recommendation {
            urgency_level: UrgencyLevel::EmergencyNow,
            reasons: red_flags.reasons,
            ranked_conditions: Vec::new(),
            advice: vec![EMERGENCY_ADVICE.to_string()],
            monitor: Vec::new(),
            escalation: EMERGENCY_ESCALATION.to_string(),
            note: None,
        };
    }

    let urgency_level = if red_flags.level == RedFlagLevel::UrgentToday {
        UrgencyLevel::UrgentToday
    } else if ranked
        .iter()
        .any(|c| GP_REVIEW_CONDITIONS.contains(&c.id.as_str()))
    {
        UrgencyLevel::GpWithin48h
    } else {
        UrgencyLevel::Selfcare
    };

    let (advice, monitor, escalation) = match ranked.first() {
        Some(top) => (top.advice.clone(), top.monitor.clone(), top.escalate.clone()),
        None => (Vec::new(), Vec::new(), DEFAULT_ESCALATION.to_string()),
    };
    let note = ranked.is_empty().then(|| NO_CLEAR_MATCH.to_string());

    Recommendation {
        urgency_level,
        reasons: red_flags.reasons,
        ranked_conditions: ranked,
        advice,
        monitor,
        escalation,
        note,
    }
}
