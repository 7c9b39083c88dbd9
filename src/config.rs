use std::path::PathBuf;

/// Application-level constants
pub const APP_NAME: &str = "Chopper";
pub const APP_VERSION: &str = env!("CARGO_PKG_VERSION");

pub const DEFAULT_EMERGENCY_NUMBER: &str = "000";
pub const DEFAULT_FORECAST_URL: &str = "https://api.open-meteo.com/v1/forecast";
pub const DEFAULT_AIR_QUALITY_URL: &str = "https://air-quality-api.open-meteo.com/v1/air-quality";
pub const DEFAULT_POLLEN_URL: &str = "https://pollen-api.open-meteo.com/v1/forecast";
pub const DEFAULT_HTTP_TIMEOUT_SECS: u64 = 15;

/// Log filter used when `RUST_LOG` is not set.
pub fn default_log_filter() -> &'static str {
    if cfg!(debug_assertions) {
        "info,chopper_lib=debug"
    } else {
        "warn,chopper_lib=info"
    }
}

/// Get the application data directory
/// ~/Chopper/ on all platforms. `None` when no home directory can be resolved.
pub fn app_data_dir() -> Option<PathBuf> {
    dirs::home_dir().map(|home| home.join(APP_NAME))
}

/// Optional user-supplied condition catalog.
pub fn catalog_override_path() -> Option<PathBuf> {
    app_data_dir().map(|dir| dir.join("conditions.json"))
}

/// Runtime settings for assessments and upstream fetches.
#[derive(Debug, Clone, PartialEq)]
pub struct TriageConfig {
    /// Number shown next to emergency advice.
    pub emergency_number: String,
    pub forecast_url: String,
    pub air_quality_url: String,
    pub pollen_url: String,
    pub http_timeout_secs: u64,
    /// JSON condition catalog; built-in catalog when `None`.
    pub catalog_path: Option<PathBuf>,
}

impl Default for TriageConfig {
    fn default() -> Self {
        Self {
            emergency_number: DEFAULT_EMERGENCY_NUMBER.into(),
            forecast_url: DEFAULT_FORECAST_URL.into(),
            air_quality_url: DEFAULT_AIR_QUALITY_URL.into(),
            pollen_url: DEFAULT_POLLEN_URL.into(),
            http_timeout_secs: DEFAULT_HTTP_TIMEOUT_SECS,
            catalog_path: None,
        }
    }
}

impl TriageConfig {
    /// Defaults overridden by `CHOPPER_*` environment variables.
    pub fn from_env() -> Self {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Build from an arbitrary key lookup. Blank values are ignored.
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Self {
        let get = |key: &str| {
            lookup(key)
                .map(|v| v.trim().to_string())
                .filter(|v| !v.is_empty())
        };

        let mut config = Self::default();
        if let Some(number) = get("CHOPPER_EMERGENCY_NUMBER") {
            config.emergency_number = number;
        }
        if let Some(url) = get("CHOPPER_FORECAST_URL") {
            config.forecast_url = url;
        }
        if let Some(url) = get("CHOPPER_AIR_QUALITY_URL") {
            config.air_quality_url = url;
        }
        if let Some(url) = get("CHOPPER_POLLEN_URL") {
            config.pollen_url = url;
        }
        match get("CHOPPER_HTTP_TIMEOUT_SECS").map(|v| v.parse::<u64>()) {
            Some(Ok(secs)) if secs > 0 => config.http_timeout_secs = secs,
            Some(_) => tracing::warn!(
                default = DEFAULT_HTTP_TIMEOUT_SECS,
                "Ignoring invalid CHOPPER_HTTP_TIMEOUT_SECS"
            ),
            None => {}
        }
        config.catalog_path = get("CHOPPER_CATALOG").map(PathBuf::from);
        config
    }
}
