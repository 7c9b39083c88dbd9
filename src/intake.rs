//! Symptom and vitals collection.
//!
//! Merges explicit symptom selections with tokens found in free-text notes,
//! parses the numeric vitals fields, and splits chronic-condition text.
//! Bad input never errors: it becomes absent (or 0 for duration).

use std::sync::LazyLock;

use regex::Regex;
use serde::{Deserialize, Serialize};

use crate::environment::normalize::clamp_window;
use crate::models::symptom::{COUGH_BLOOD, FEVER, WHEEZING};
use crate::models::vital_sign::to_celsius;
use crate::models::{TemperatureUnit, TokenSet, Vitals};

// ═══════════════════════════════════════════
// Free-text keyword table
// ═══════════════════════════════════════════

/// Substring (lowercase) → token. Additive only.
pub const KEYWORD_TOKENS: &[(&str, &str)] = &[
    ("fever", FEVER),
    ("wheeze", WHEEZING),
    ("bleed", COUGH_BLOOD),
];

static CHRONIC_SEPARATOR: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"[,;]+").expect("valid regex")
});

// ═══════════════════════════════════════════
// Types
// ═══════════════════════════════════════════

/// Raw form fields as entered by the user.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct IntakeForm {
    pub selected: TokenSet,
    pub notes: String,
    pub chronic: String,
    pub age: String,
    pub temperature: String,
    pub temperature_unit: TemperatureUnit,
    pub duration: String,
}

/// Normalised output of one collection pass.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Intake {
    pub tokens: TokenSet,
    pub vitals: Vitals,
    /// Chronic conditions parsed from this pass only.
    pub chronic: Vec<String>,
}

// ═══════════════════════════════════════════
// Collection
// ═══════════════════════════════════════════

/// Tokens whose keyword appears in the text (case-insensitive).
pub fn scan_free_text(text: &str) -> Vec<&'static str> {
    let lower = text.to_lowercase();
    KEYWORD_TOKENS
        .iter()
        .filter(|(keyword, _)| lower.contains(keyword))
        .map(|(_, token)| *token)
        .collect()
}

/// Explicit selections plus anything found in the notes.
pub fn collect_tokens(selected: &TokenSet, notes: &str) -> TokenSet {
    let mut tokens = selected.clone();
    tokens.extend(scan_free_text(notes));
    tokens
}

/// Splits comma/semicolon separated chronic conditions. Lowercased, trimmed,
/// empty entries dropped.
pub fn parse_chronic(text: &str) -> Vec<String> {
    CHRONIC_SEPARATOR
        .split(&text.to_lowercase())
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .map(str::to_string)
        .collect()
}

fn parse_number(raw: &str) -> Option<f64> {
    let trimmed = raw.trim();
    if trimmed.is_empty() {
        return None;
    }
    trimmed.parse::<f64>().ok().filter(|v| v.is_finite())
}

/// Positive age in whole years; anything else is absent.
pub fn parse_age(raw: &str) -> Option<u32> {
    parse_number(raw)
        .filter(|v| *v >= 1.0)
        .map(|v| v.trunc().min(u32::MAX as f64) as u32)
}

/// Temperature converted to Celsius; absent when empty or non-numeric.
pub fn parse_temperature(raw: &str, unit: TemperatureUnit) -> Option<f64> {
    parse_number(raw).map(|v| to_celsius(v, unit))
}

/// Symptom duration in whole days; 0 when absent, invalid or negative.
pub fn parse_duration(raw: &str) -> u32 {
    parse_number(raw)
        .filter(|v| *v > 0.0)
        .map(|v| v.trunc().min(u32::MAX as f64) as u32)
        .unwrap_or(0)
}

/// Forecast window derived from the duration field: 1–7 days.
pub fn forecast_window_days(raw: &str) -> u8 {
    match parse_number(raw) {
        Some(v) if v >= 1.0 => clamp_window(v.trunc().min(i64::MAX as f64) as i64),
        _ => 1,
    }
}

pub fn parse_vitals(form: &IntakeForm) -> Vitals {
    Vitals {
        age: parse_age(&form.age),
        temperature_celsius: parse_temperature(&form.temperature, form.temperature_unit),
        duration_days: parse_duration(&form.duration),
    }
}

/// One collection pass over a form.
pub fn collect(form: &IntakeForm) -> Intake {
    let tokens = collect_tokens(&form.selected, &form.notes);
    let vitals = parse_vitals(form);
    let chronic = parse_chronic(&form.chronic);

    tracing::debug!(
        selected = form.selected.len(),
        tokens = tokens.len(),
        chronic = chronic.len(),
        has_temperature = vitals.temperature_celsius.is_some(),
        duration_days = vitals.duration_days,
        "Intake collected"
    );

    Intake {
        tokens,
        vitals,
        chronic,
    }
}
