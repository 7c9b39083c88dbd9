use crate::environment::EnvironmentError;
use crate::triage::CatalogError;

/// Errors surfaced by the one-shot runner.
#[derive(Debug, thiserror::Error)]
pub enum AppError {
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Invalid assessment request: {0}")]
    Json(#[from] serde_json::Error),

    #[error("Catalog error: {0}")]
    Catalog(#[from] CatalogError),

    #[error("Environment error: {0}")]
    Environment(#[from] EnvironmentError),

    #[error("Runtime error: {0}")]
    Runtime(String),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn wraps_catalog_errors() {
        let err: AppError = CatalogError::Empty.into();
        assert_eq!(err.to_string(), "Catalog error: Condition catalog is empty");
    }

    #[test]
    fn wraps_json_errors() {
        let parse = serde_json::from_str::<serde_json::Value>("{").unwrap_err();
        let err: AppError = parse.into();
        assert!(err.to_string().starts_with("Invalid assessment request:"));
    }
}
