use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::models::{RedFlagLevel, ScoredCondition, UrgencyLevel};

// ---------------------------------------------------------------------------
// RedFlagResult
// ---------------------------------------------------------------------------

/// Outcome of the red-flag decision list.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RedFlagResult {
    pub level: RedFlagLevel,
    pub reasons: Vec<String>,
}

impl RedFlagResult {
    pub fn non_urgent() -> Self {
        Self {
            level: RedFlagLevel::NonUrgent,
            reasons: Vec::new(),
        }
    }

    pub fn is_emergency(&self) -> bool {
        self.level == RedFlagLevel::EmergencyNow
    }
}

// ---------------------------------------------------------------------------
// Recommendation
// ---------------------------------------------------------------------------

/// Final output of one evaluation.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Recommendation {
    pub urgency_level: UrgencyLevel,
    /// Red-flag reasons, empty when none fired.
    pub reasons: Vec<String>,
    /// Top conditions, descending score. Empty in an emergency.
    pub ranked_conditions: Vec<ScoredCondition>,
    pub advice: Vec<String>,
    pub monitor: Vec<String>,
    pub escalation: String,
    /// Set when nothing matched outside an emergency.
    pub note: Option<String>,
}

impl Recommendation {
    pub fn top_condition(&self) -> Option<&ScoredCondition> {
        self.ranked_conditions.first()
    }
}

// ---------------------------------------------------------------------------
// Errors
// ---------------------------------------------------------------------------

/// Condition catalog loading errors.
#[derive(Error, Debug)]
pub enum CatalogError {
    #[error("Failed to load condition catalog {0}: {1}")]
    Load(String, String),

    #[error("Failed to parse condition catalog {0}: {1}")]
    Parse(String, String),

    #[error("Unsupported condition catalog version {found} (expected {supported})")]
    UnsupportedVersion { found: u32, supported: u32 },

    #[error("Condition catalog entry has an empty id")]
    EmptyId,

    #[error("Duplicate condition id in catalog: {0}")]
    DuplicateId(String),

    #[error("Condition {0} has an empty name")]
    EmptyName(String),

    #[error("Condition {id} lists token {token} more than once")]
    DuplicateToken { id: String, token: String },

    #[error("Condition catalog is empty")]
    Empty,
}
