//! Triage session.
//!
//! Holds the state that outlives a single evaluation: the chronic conditions
//! recorded so far, the most recent weather context, and the emergency number
//! shown alongside emergency advice.
//!
//! Chronic conditions are append-only for the lifetime of the session; a later
//! pass with an empty chronic field never clears earlier entries.

use std::collections::BTreeSet;

use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::config::TriageConfig;
use crate::intake::{collect, IntakeForm};
use crate::models::{UrgencyLevel, WeatherContext};
use crate::triage::{ConditionCatalog, Recommendation, TriageEngine};

// ═══════════════════════════════════════════════════════════
// Assessment
// ═══════════════════════════════════════════════════════════

/// One evaluated case with the session context it was evaluated in.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Assessment {
    pub session_id: Uuid,
    pub evaluated_at: NaiveDateTime,
    /// Display label for the urgency level, e.g. "EMERGENCY NOW".
    pub urgency_label: String,
    pub recommendation: Recommendation,
    /// Everything recorded in this session so far, sorted.
    pub chronic_conditions: Vec<String>,
    pub emergency_number: String,
    pub weather: Option<WeatherContext>,
}

impl Assessment {
    pub fn is_emergency(&self) -> bool {
        self.recommendation.urgency_level == UrgencyLevel::EmergencyNow
    }
}

// ═══════════════════════════════════════════════════════════
// TriageSession
// ═══════════════════════════════════════════════════════════

pub struct TriageSession {
    id: Uuid,
    started_at: NaiveDateTime,
    emergency_number: String,
    weather: Option<WeatherContext>,
    chronic: BTreeSet<String>,
    engine: TriageEngine,
}

impl TriageSession {
    pub fn new(config: &TriageConfig, catalog: ConditionCatalog) -> Self {
        let session = Self {
            id: Uuid::new_v4(),
            started_at: chrono::Local::now().naive_local(),
            emergency_number: config.emergency_number.clone(),
            weather: None,
            chronic: BTreeSet::new(),
            engine: TriageEngine::new(catalog),
        };
        tracing::info!(
            session_id = %session.id,
            conditions = session.engine.catalog().len(),
            "Triage session started"
        );
        session
    }

    pub fn id(&self) -> Uuid {
        self.id
    }

    pub fn started_at(&self) -> NaiveDateTime {
        self.started_at
    }

    pub fn emergency_number(&self) -> &str {
        &self.emergency_number
    }

    /// Add chronic conditions, trimmed and lowercased like the form field.
    /// Returns how many were new.
    pub fn record_chronic<I, S>(&mut self, conditions: I) -> usize
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        conditions
            .into_iter()
            .map(|c| c.as_ref().trim().to_lowercase())
            .filter(|c| !c.is_empty())
            .filter(|c| self.chronic.insert(c.clone()))
            .count()
    }

    pub fn chronic_conditions(&self) -> &BTreeSet<String> {
        &self.chronic
    }

    pub fn weather(&self) -> Option<&WeatherContext> {
        self.weather.as_ref()
    }

    /// Replace the weather context used by later assessments.
    pub fn set_weather(&mut self, weather: WeatherContext) {
        tracing::debug!(
            session_id = %self.id,
            days = weather.days,
            aqi = %weather.aqi_category,
            pollen = %weather.pollen_category,
            "Weather context updated"
        );
        self.weather = Some(weather);
    }

    pub fn clear_weather(&mut self) {
        self.weather = None;
    }

    /// Collect the form, fold its chronic conditions into the session, and
    /// evaluate.
    pub fn assess(&mut self, form: &IntakeForm) -> Assessment {
        let intake = collect(form);
        let added = self.record_chronic(intake.chronic);

        let recommendation = self.engine.evaluate(
            &intake.tokens,
            &intake.vitals,
            &self.chronic,
            self.weather.as_ref(),
        );

        tracing::info!(
            session_id = %self.id,
            level = %recommendation.urgency_level,
            chronic_added = added,
            "Assessment complete"
        );

        Assessment {
            session_id: self.id,
            evaluated_at: chrono::Local::now().naive_local(),
            urgency_label: recommendation.urgency_level.label().to_string(),
            recommendation,
            chronic_conditions: self.chronic.iter().cloned().collect(),
            emergency_number: self.emergency_number.clone(),
            weather: self.weather.clone(),
        }
    }
}
