pub mod config;
pub mod environment; // Open-Meteo fetch + normalisation
pub mod error;
pub mod intake;
pub mod models;
pub mod session;
pub mod triage; // Red flags, scoring, urgency

use std::io::Read;
use std::path::Path;

use serde::{Deserialize, Serialize};
use tracing_subscriber::EnvFilter;

use config::TriageConfig;
use environment::{load_weather_context, Coordinates, OpenMeteoClient};
use error::AppError;
use intake::{forecast_window_days, IntakeForm};
use session::{Assessment, TriageSession};
use triage::ConditionCatalog;

/// Input accepted by the one-shot runner.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct AssessmentRequest {
    pub intake: IntakeForm,
    /// When present, weather context is fetched for this position.
    pub location: Option<Coordinates>,
}

/// Catalog precedence: configured path, then `~/Chopper/conditions.json`,
/// then the bundled catalog.
pub fn load_catalog(config: &TriageConfig) -> Result<ConditionCatalog, AppError> {
    if let Some(path) = &config.catalog_path {
        return Ok(ConditionCatalog::load(path)?);
    }
    match config::catalog_override_path() {
        Some(path) if path.is_file() => Ok(ConditionCatalog::load(&path)?),
        _ => Ok(ConditionCatalog::builtin()),
    }
}

/// Read a request from a file, or stdin when `path` is `None` or `-`.
pub fn read_request(path: Option<&Path>) -> Result<AssessmentRequest, AppError> {
    let json = match path {
        Some(p) if p != Path::new("-") => std::fs::read_to_string(p)?,
        _ => {
            let mut buf = String::new();
            std::io::stdin().read_to_string(&mut buf)?;
            buf
        }
    };
    Ok(serde_json::from_str(&json)?)
}

/// Evaluate one request in a fresh session, fetching weather when a location
/// is given. Upstream failures degrade to unknown exposure, never an error.
pub async fn assess_request(
    config: &TriageConfig,
    catalog: ConditionCatalog,
    request: &AssessmentRequest,
) -> Result<Assessment, AppError> {
    let mut session = TriageSession::new(config, catalog);

    if let Some(at) = request.location {
        let client = OpenMeteoClient::from_config(config)?;
        let days = forecast_window_days(&request.intake.duration);
        let weather = load_weather_context(&client, at, days).await;
        session.set_weather(weather);
    }

    Ok(session.assess(&request.intake))
}

pub fn run() -> Result<(), AppError> {
    // Initialize tracing
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| EnvFilter::new(config::default_log_filter())),
        )
        .with_writer(std::io::stderr)
        .init();

    tracing::info!("{} starting v{}", config::APP_NAME, config::APP_VERSION);

    let config = TriageConfig::from_env();
    let catalog = load_catalog(&config)?;
    let request_path = std::env::args_os().nth(1);
    let request = read_request(request_path.as_deref().map(Path::new))?;

    let runtime = tokio::runtime::Builder::new_current_thread()
        .enable_all()
        .build()
        .map_err(|e| AppError::Runtime(e.to_string()))?;
    let assessment = runtime.block_on(assess_request(&config, catalog, &request))?;

    println!("{}", serde_json::to_string_pretty(&assessment)?);
    Ok(())
}
