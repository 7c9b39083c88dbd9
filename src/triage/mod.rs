//! Triage rule engine: red flags, condition scoring and urgency composition.

pub mod catalog;
pub mod composer;
pub mod engine;
pub mod red_flags;
pub mod scoring;
pub mod types;

pub use catalog::ConditionCatalog;
pub use engine::{evaluate, TriageEngine};
pub use red_flags::detect_red_flags;
pub use scoring::score_conditions;
pub use types::*;
