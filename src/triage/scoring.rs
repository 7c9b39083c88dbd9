//! Weighted multi-condition scorer.
//!
//! Every catalog entry is scored the same way: +2 per key token, +1 per
//! support token, −2 per exclude token, +1 per declared weather link that is
//! active. Entries at or below zero are dropped. Bands are relative to the
//! best score of the current evaluation.

use crate::models::{Band, ConditionDefinition, ScoredCondition, TokenSet, WeatherContext, WeatherLink};

use super::catalog::ConditionCatalog;

pub const KEY_TOKEN_WEIGHT: i32 = 2;
pub const SUPPORT_TOKEN_WEIGHT: i32 = 1;
pub const EXCLUDE_TOKEN_PENALTY: i32 = 2;
pub const WEATHER_LINK_BONUS: i32 = 1;

/// Maximum number of ranked conditions returned.
pub const MAX_RESULTS: usize = 5;

pub const HIGHER_BAND_RATIO: f64 = 0.8;
pub const MEDIUM_BAND_RATIO: f64 = 0.5;

const WEATHER_LINK_ORDER: [WeatherLink; 4] = [
    WeatherLink::AqiHigh,
    WeatherLink::PollenHigh,
    WeatherLink::HeatHigh,
    WeatherLink::ColdAir,
];

/// Raw score and matched tokens for one definition, before filtering.
pub fn score_definition(
    def: &ConditionDefinition,
    tokens: &TokenSet,
    weather: Option<&WeatherContext>,
) -> (i32, Vec<String>) {
    let mut score = 0;
    let mut why = Vec::new();

    for token in def.key_tokens.iter().filter(|t| tokens.contains(t)) {
        score += KEY_TOKEN_WEIGHT;
        why.push(token.clone());
    }
    for token in def.support_tokens.iter().filter(|t| tokens.contains(t)) {
        score += SUPPORT_TOKEN_WEIGHT;
        why.push(token.clone());
    }
    let excluded = def
        .exclude_tokens
        .iter()
        .filter(|t| tokens.contains(t))
        .count() as i32;
    score -= EXCLUDE_TOKEN_PENALTY * excluded;

    if let Some(ctx) = weather {
        let active = WEATHER_LINK_ORDER
            .iter()
            .filter(|link| def.declares(**link) && ctx.link_active(**link))
            .count() as i32;
        score += WEATHER_LINK_BONUS * active;
    }

    (score, why)
}

/// Band for a score relative to the evaluation's best score.
pub fn band_for(score: i32, max: i32) -> Band {
    let ratio = if max > 0 {
        score as f64 / max as f64
    } else {
        0.0
    };
    if ratio >= HIGHER_BAND_RATIO {
        Band::Higher
    } else if ratio >= MEDIUM_BAND_RATIO {
        Band::Medium
    } else {
        Band::Lower
    }
}

/// Score the catalog, drop non-positive entries, rank and band the rest.
///
/// Ranking is a stable sort on descending score, so catalog order breaks ties.
pub fn score_conditions(
    catalog: &ConditionCatalog,
    tokens: &TokenSet,
    weather: Option<&WeatherContext>,
) -> Vec<ScoredCondition> {
    let mut results: Vec<ScoredCondition> = catalog
        .iter()
        .filter_map(|def| {
            let (score, why) = score_definition(def, tokens, weather);
            tracing::debug!(condition = %def.id, score, "Condition scored");
            (score > 0).then(|| ScoredCondition {
                id: def.id.clone(),
                name: def.name.clone(),
                score,
                why,
                band: Band::Lower,
                advice: def.advice.clone(),
                monitor: def.monitor.clone(),
                escalate: def.escalation_text().to_string(),
            })
        })
        .collect();

    results.sort_by(|a, b| b.score.cmp(&a.score));

    let max = results.first().map_or(0, |r| r.score);
    for result in &mut results {
        result.band = band_for(result.score, max);
    }

    results.truncate(MAX_RESULTS);
    results
}
