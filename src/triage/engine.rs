use std::collections::BTreeSet;
use std::time::Instant;

use crate::models::{TokenSet, Vitals, WeatherContext};

use super::catalog::ConditionCatalog;
use super::composer::compose;
use super::red_flags::detect_red_flags;
use super::scoring::score_conditions;
use super::types::Recommendation;

/// Evaluate one case against a catalog.
///
/// Pure and deterministic: identical inputs give identical output. Red flags
/// are checked first; an emergency skips scoring. Chronic conditions are
/// carried for the caller and do not affect scoring.
pub fn evaluate(
    catalog: &ConditionCatalog,
    tokens: &TokenSet,
    vitals: &Vitals,
    chronic: &BTreeSet<String>,
    weather: Option<&WeatherContext>,
) -> Recommendation {
    let start = Instant::now();

    let red_flags = detect_red_flags(tokens, vitals);
    let ranked = if red_flags.is_emergency() {
        Vec::new()
    } else {
        score_conditions(catalog, tokens, weather)
    };
    let recommendation = compose(red_flags, ranked);

    tracing::info!(
        level = %recommendation.urgency_level,
        tokens = tokens.len(),
        chronic = chronic.len(),
        has_weather = weather.is_some(),
        conditions = recommendation.ranked_conditions.len(),
        top = recommendation.top_condition().map(|c| c.id.as_str()).unwrap_or("none"),
        elapsed_us = start.elapsed().as_micros() as u64,
        "Triage evaluation complete"
    );

    recommendation
}

/// Catalog-owning front for [`evaluate`].
#[derive(Debug, Clone, Default)]
pub struct TriageEngine {
    catalog: ConditionCatalog,
}

impl TriageEngine {
    pub fn new(catalog: ConditionCatalog) -> Self {
        Self { catalog }
    }

    pub fn catalog(&self) -> &ConditionCatalog {
        &self.catalog
    }

    pub fn evaluate(
        &self,
        tokens: &TokenSet,
        vitals: &Vitals,
        chronic: &BTreeSet<String>,
        weather: Option<&WeatherContext>,
    ) -> Recommendation {
        evaluate(&self.catalog, tokens, vitals, chronic, weather)
    }
}
