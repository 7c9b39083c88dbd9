use serde::{Deserialize, Serialize};

use super::enums::{Band, WeatherLink};
use super::symptom::humanize_token;

/// Escalation text used when a condition declares none, and when nothing scored.
pub const DEFAULT_ESCALATION: &str = "If symptoms worsen, seek medical care.";

/// Static catalog entry: matching rules plus response text.
///
/// Token lists are ordered; `why` on a scored result follows key tokens then
/// support tokens in the order declared here.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ConditionDefinition {
    pub id: String,
    pub name: String,
    #[serde(default)]
    pub key_tokens: Vec<String>,
    #[serde(default)]
    pub support_tokens: Vec<String>,
    #[serde(default)]
    pub exclude_tokens: Vec<String>,
    #[serde(default)]
    pub weather_links: Vec<WeatherLink>,
    #[serde(default)]
    pub advice: Vec<String>,
    #[serde(default)]
    pub monitor: Vec<String>,
    #[serde(default)]
    pub escalate: Option<String>,
}

impl ConditionDefinition {
    pub fn escalation_text(&self) -> &str {
        self.escalate.as_deref().unwrap_or(DEFAULT_ESCALATION)
    }

    pub fn declares(&self, link: WeatherLink) -> bool {
        self.weather_links.contains(&link)
    }
}

/// A catalog entry scored against one evaluation's inputs.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ScoredCondition {
    pub id: String,
    pub name: String,
    pub score: i32,
    /// Matched key and support tokens, catalog order.
    pub why: Vec<String>,
    pub band: Band,
    pub advice: Vec<String>,
    pub monitor: Vec<String>,
    pub escalate: String,
}

impl ScoredCondition {
    /// `why` rendered for display: "runny nose, sore throat".
    pub fn because(&self) -> String {
        self.why
            .iter()
            .map(|t| humanize_token(t))
            .collect::<Vec<_>>()
            .join(", ")
    }
}
