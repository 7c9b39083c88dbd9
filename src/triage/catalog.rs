use std::collections::HashSet;
use std::path::Path;

use serde::Deserialize;

use crate::models::{ConditionDefinition, WeatherLink};

use super::types::CatalogError;

/// Catalog file format version this build understands.
pub const CATALOG_VERSION: u32 = 1;

/// On-disk catalog: `{ "version": 1, "conditions": [...] }`.
#[derive(Debug, Deserialize)]
struct CatalogFile {
    version: u32,
    conditions: Vec<ConditionDefinition>,
}

/// Immutable list of condition definitions, in tie-break order.
#[derive(Debug, Clone, PartialEq)]
pub struct ConditionCatalog {
    version: u32,
    conditions: Vec<ConditionDefinition>,
}

fn strings(items: &[&str]) -> Vec<String> {
    items.iter().map(|s| s.to_string()).collect()
}

impl ConditionCatalog {
    /// Validate and wrap a list of definitions.
    pub fn new(conditions: Vec<ConditionDefinition>) -> Result<Self, CatalogError> {
        if conditions.is_empty() {
            return Err(CatalogError::Empty);
        }

        let mut ids = HashSet::new();
        for def in &conditions {
            if def.id.trim().is_empty() {
                return Err(CatalogError::EmptyId);
            }
            if !ids.insert(def.id.as_str()) {
                return Err(CatalogError::DuplicateId(def.id.clone()));
            }
            if def.name.trim().is_empty() {
                return Err(CatalogError::EmptyName(def.id.clone()));
            }
            for list in [&def.key_tokens, &def.support_tokens, &def.exclude_tokens] {
                let mut seen = HashSet::new();
                if let Some(dup) = list.iter().find(|t| !seen.insert(t.as_str())) {
                    return Err(CatalogError::DuplicateToken {
                        id: def.id.clone(),
                        token: dup.clone(),
                    });
                }
            }
        }

        Ok(Self {
            version: CATALOG_VERSION,
            conditions,
        })
    }

    /// Parse a versioned JSON catalog. `origin` names the source in errors.
    pub fn from_json(json: &str, origin: &str) -> Result<Self, CatalogError> {
        let file: CatalogFile = serde_json::from_str(json)
            .map_err(|e| CatalogError::Parse(origin.to_string(), e.to_string()))?;
        if file.version != CATALOG_VERSION {
            return Err(CatalogError::UnsupportedVersion {
                found: file.version,
                supported: CATALOG_VERSION,
            });
        }
        Self::new(file.conditions)
    }

    /// Load a versioned catalog file.
    pub fn load(path: &Path) -> Result<Self, CatalogError> {
        let json = std::fs::read_to_string(path)
            .map_err(|e| CatalogError::Load(path.display().to_string(), e.to_string()))?;
        let catalog = Self::from_json(&json, &path.display().to_string())?;
        tracing::info!(
            path = %path.display(),
            version = catalog.version,
            conditions = catalog.len(),
            "Condition catalog loaded"
        );
        Ok(catalog)
    }

    /// The bundled catalog.
    pub fn builtin() -> Self {
        Self {
            version: CATALOG_VERSION,
            conditions: vec![
                ConditionDefinition {
                    id: "viral_uri".into(),
                    name: "Common cold".into(),
                    key_tokens: strings(&["runny_nose", "sore_throat", "cough_dry", "blocked_nose"]),
                    support_tokens: strings(&["headache", "fatigue"]),
                    exclude_tokens: vec![],
                    weather_links: vec![],
                    advice: strings(&[
                        "Rest and hydrate.",
                        "Use saline spray; warm showers or humidified air.",
                    ]),
                    monitor: strings(&["Fever > 48h", "Breathing difficulty"]),
                    escalate: Some("See a GP if not improving after 3–5 days.".into()),
                },
                ConditionDefinition {
                    id: "allergy".into(),
                    name: "Allergic rhinitis".into(),
                    key_tokens: strings(&[
                        "runny_nose",
                        "itchy",
                        "sneezing",
                        "light_sound_sensitivity",
                    ]),
                    support_tokens: strings(&["blocked_nose"]),
                    exclude_tokens: strings(&["fever"]),
                    weather_links: vec![],
                    advice: strings(&[
                        "Limit outdoor exposure when pollen is high.",
                        "Non-sedating antihistamines or saline rinses may help.",
                    ]),
                    monitor: strings(&["Worsening wheeze or breathlessness"]),
                    escalate: Some("See a GP if persistent.".into()),
                },
                ConditionDefinition {
                    id: "asthma".into(),
                    name: "Asthma flare".into(),
                    key_tokens: strings(&["shortness_of_breath", "cough_dry", "wheezing"]),
                    support_tokens: strings(&["chest_pain"]),
                    exclude_tokens: vec![],
                    weather_links: vec![
                        WeatherLink::AqiHigh,
                        WeatherLink::PollenHigh,
                        WeatherLink::ColdAir,
                        WeatherLink::HeatHigh,
                    ],
                    advice: strings(&[
                        "Follow your asthma action plan.",
                        "Avoid triggers; consider staying indoors if air quality/pollen is poor.",
                    ]),
                    monitor: strings(&["Need for reliever frequently"]),
                    escalate: Some("Seek urgent care if breathing worsens.".into()),
                },
                ConditionDefinition {
                    id: "gastro".into(),
                    name: "Gastroenteritis".into(),
                    key_tokens: strings(&["diarrhea", "vomiting", "stomachache"]),
                    support_tokens: strings(&["nausea"]),
                    exclude_tokens: vec![],
                    weather_links: vec![],
                    advice: strings(&[
                        "Small sips of oral rehydration solution.",
                        "Avoid alcohol and dairy until improved.",
                    ]),
                    monitor: strings(&["Dehydration signs"]),
                    escalate: Some(
                        "See a clinician if unable to keep fluids down or >48h.".into(),
                    ),
                },
                ConditionDefinition {
                    id: "migraine".into(),
                    name: "Migraine".into(),
                    key_tokens: strings(&["headache", "light_sound_sensitivity", "nausea"]),
                    support_tokens: vec![],
                    exclude_tokens: strings(&["speech_difficulty", "seizures", "confusion"]),
                    weather_links: vec![],
                    advice: strings(&["Rest in a dark, quiet room; hydrate."]),
                    monitor: strings(&["New or changing pattern"]),
                    escalate: Some("Seek care if severe or different from usual.".into()),
                },
            ],
        }
    }

    pub fn version(&self) -> u32 {
        self.version
    }

    pub fn get(&self, id: &str) -> Option<&ConditionDefinition> {
        self.conditions.iter().find(|c| c.id == id)
    }

    pub fn iter(&self) -> impl Iterator<Item = &ConditionDefinition> {
        self.conditions.iter()
    }

    pub fn len(&self) -> usize {
        self.conditions.len()
    }

    pub fn is_empty(&self) -> bool {
        self.conditions.is_empty()
    }
}

impl Default for ConditionCatalog {
    fn default() -> Self {
        Self::builtin()
    }
}

#[cfg(test)]
mod tests {
    use std::io::Write;

    use super::*;

    #[test]
    fn builtin_catalog_is_valid() {
        let builtin = ConditionCatalog::builtin();
        let revalidated = ConditionCatalog::new(builtin.iter().cloned().collect()).unwrap();
        assert_eq!(revalidated, builtin);
        assert_eq!(builtin.len(), 5);
    }

    #[test]
    fn builtin_order_is_stable() {
        let catalog = ConditionCatalog::builtin();
        let ids: Vec<&str> = catalog.iter().map(|c| c.id.as_str()).collect();
        assert_eq!(ids, vec!["viral_uri", "allergy", "asthma", "gastro", "migraine"]);
    }

    #[test]
    fn get_by_id() {
        let catalog = ConditionCatalog::builtin();
        assert_eq!(catalog.get("gastro").unwrap().name, "Gastroenteritis");
        assert!(catalog.get("flu").is_none());
    }

    #[test]
    fn duplicate_ids_rejected() {
        let json = r#"{"version":1,"conditions":[{"id":"a","name":"A"},{"id":"a","name":"Again"}]}"#;
        let err = ConditionCatalog::from_json(json, "inline").unwrap_err();
        assert!(matches!(err, CatalogError::DuplicateId(id) if id == "a"));
    }

    #[test]
    fn duplicate_tokens_rejected() {
        let json = r#"{"version":1,"conditions":[{"id":"a","name":"A","key_tokens":["fever","fever"]}]}"#;
        let err = ConditionCatalog::from_json(json, "inline").unwrap_err();
        assert!(matches!(err, CatalogError::DuplicateToken { .. }));
    }

    #[test]
    fn empty_name_rejected() {
        let json = r#"{"version":1,"conditions":[{"id":"a","name":"  "}]}"#;
        let err = ConditionCatalog::from_json(json, "inline").unwrap_err();
        assert!(matches!(err, CatalogError::EmptyName(_)));
    }

    #[test]
    fn empty_id_rejected() {
        let json = r#"{"version":1,"conditions":[{"id":" ","name":"Nameless"}]}"#;
        let err = ConditionCatalog::from_json(json, "inline").unwrap_err();
        assert!(matches!(err, CatalogError::EmptyId));
    }

    #[test]
    fn unsupported_version_rejected() {
        let json = r#"{"version":2,"conditions":[{"id":"a","name":"A"}]}"#;
        let err = ConditionCatalog::from_json(json, "inline").unwrap_err();
        assert!(matches!(
            err,
            CatalogError::UnsupportedVersion { found: 2, supported: CATALOG_VERSION }
        ));
    }

    #[test]
    fn bare_array_is_not_a_catalog() {
        let err = ConditionCatalog::from_json(r#"[{"id":"a","name":"A"}]"#, "inline").unwrap_err();
        assert!(matches!(err, CatalogError::Parse(_, _)));
    }

    #[test]
    fn empty_catalog_rejected() {
        let err = ConditionCatalog::from_json(r#"{"version":1,"conditions":[]}"#, "inline").unwrap_err();
        assert!(matches!(err, CatalogError::Empty));
    }

    #[test]
    fn malformed_json_rejected() {
        let err = ConditionCatalog::from_json("{", "inline").unwrap_err();
        assert!(matches!(err, CatalogError::Parse(origin, _) if origin == "inline"));
    }

    #[test]
    fn load_from_file() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        write!(
            file,
            r#"{{"version":1,"conditions":[{{"id":"hay_fever","name":"Hay fever",
                 "key_tokens":["sneezing"],"weather_links":["pollen_high"],
                 "advice":["Keep windows shut."]}}]}}"#
        )
        .unwrap();

        let catalog = ConditionCatalog::load(file.path()).unwrap();
        assert_eq!(catalog.version(), CATALOG_VERSION);
        let def = catalog.get("hay_fever").unwrap();
        assert!(def.declares(WeatherLink::PollenHigh));
        assert_eq!(def.advice, vec!["Keep windows shut."]);
    }

    #[test]
    fn load_missing_file_fails() {
        let dir = tempfile::tempdir().unwrap();
        let err = ConditionCatalog::load(&dir.path().join("nope.json")).unwrap_err();
        assert!(matches!(err, CatalogError::Load(_, _)));
    }
}
