use std::collections::BTreeSet;

use serde::{Deserialize, Serialize};

// ═══════════════════════════════════════════
// Token constants
// ═══════════════════════════════════════════

pub const CHEST_PAIN: &str = "chest_pain";
pub const SHORTNESS_OF_BREATH: &str = "shortness_of_breath";
pub const SEIZURES: &str = "seizures";
pub const SPEECH_DIFFICULTY: &str = "speech_difficulty";
pub const MEMORY_ISSUES: &str = "memory_issues";
pub const CONFUSION: &str = "confusion";
pub const VISION_CHANGES: &str = "vision_changes";
pub const COUGH_BLOOD: &str = "cough_blood";
pub const NOSE_BLEED: &str = "nose_bleed";
pub const VOMITING: &str = "vomiting";
pub const FEVER: &str = "fever";
pub const WHEEZING: &str = "wheezing";

/// Symptom vocabulary grouped by body system, in display order.
pub const SYMPTOM_GROUPS: &[(&str, &[&str])] = &[
    (
        "Respiratory",
        &[
            "runny_nose",
            "blocked_nose",
            "sneezing",
            "sore_throat",
            "cough_dry",
            WHEEZING,
            SHORTNESS_OF_BREATH,
            COUGH_BLOOD,
            NOSE_BLEED,
        ],
    ),
    ("Cardiac", &[CHEST_PAIN]),
    (
        "Digestive",
        &["nausea", VOMITING, "diarrhea", "stomachache"],
    ),
    (
        "Neurological",
        &[
            "headache",
            "light_sound_sensitivity",
            SEIZURES,
            SPEECH_DIFFICULTY,
            MEMORY_ISSUES,
            CONFUSION,
            VISION_CHANGES,
        ],
    ),
    ("General", &[FEVER, "fatigue", "itchy"]),
];

/// True if the token appears in the known vocabulary.
pub fn is_known_token(token: &str) -> bool {
    SYMPTOM_GROUPS
        .iter()
        .any(|(_, tokens)| tokens.contains(&token))
}

/// Readable form of a token: `cough_dry` → `cough dry`.
pub fn humanize_token(token: &str) -> String {
    token.replace('_', " ")
}

// ═══════════════════════════════════════════
// TokenSet
// ═══════════════════════════════════════════

/// Membership-only set of reported symptom tokens.
///
/// Backed by a `BTreeSet` so serialised output is stable across runs.
/// Deserialisation goes through [`TokenSet::insert`], so JSON input is
/// trimmed and blank entries are dropped.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(from = "Vec<String>", into = "Vec<String>")]
pub struct TokenSet(BTreeSet<String>);

impl TokenSet {
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds a token. Blank tokens are ignored. Returns true if newly inserted.
    pub fn insert(&mut self, token: impl Into<String>) -> bool {
        let token = token.into();
        let trimmed = token.trim();
        if trimmed.is_empty() {
            return false;
        }
        self.0.insert(trimmed.to_string())
    }

    /// Toggles a selection: removes the token if present, adds it otherwise.
    /// Returns true if the token is selected afterwards.
    pub fn toggle(&mut self, token: &str) -> bool {
        if self.0.remove(token) {
            false
        } else {
            self.insert(token)
        }
    }

    pub fn contains(&self, token: &str) -> bool {
        self.0.contains(token)
    }

    pub fn contains_all(&self, tokens: &[&str]) -> bool {
        tokens.iter().all(|t| self.contains(t))
    }

    pub fn contains_any(&self, tokens: &[&str]) -> bool {
        tokens.iter().any(|t| self.contains(t))
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &str> {
        self.0.iter().map(String::as_str)
    }
}

impl<S: Into<String>> FromIterator<S> for TokenSet {
    fn from_iter<I: IntoIterator<Item = S>>(iter: I) -> Self {
        let mut set = TokenSet::new();
        set.extend(iter);
        set
    }
}

impl From<Vec<String>> for TokenSet {
    fn from(tokens: Vec<String>) -> Self {
        tokens.into_iter().collect()
    }
}

impl From<TokenSet> for Vec<String> {
    fn from(set: TokenSet) -> Self {
        set.0.into_iter().collect()
    }
}

impl<S: Into<String>> Extend<S> for TokenSet {
    fn extend<I: IntoIterator<Item = S>>(&mut self, iter: I) {
        for token in iter {
            self.insert(token);
        }
    }
}
