use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Geographic position used to key the upstream fetches.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Coordinates {
    pub latitude: f64,
    pub longitude: f64,
}

// ---------------------------------------------------------------------------
// Raw upstream payloads
// ---------------------------------------------------------------------------

/// Forecast response (`current` + `daily` blocks).
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
pub struct ForecastPayload {
    #[serde(default)]
    pub current: Option<CurrentReading>,
    #[serde(default)]
    pub daily: Option<DailySeries>,
}

#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
pub struct CurrentReading {
    pub temperature_2m: Option<f64>,
    pub apparent_temperature: Option<f64>,
    pub relative_humidity_2m: Option<f64>,
}

#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
pub struct DailySeries {
    #[serde(default)]
    pub time: Vec<String>,
    #[serde(default)]
    pub apparent_temperature_max: Vec<Option<f64>>,
    #[serde(default)]
    pub apparent_temperature_min: Vec<Option<f64>>,
    #[serde(default)]
    pub precipitation_sum: Vec<Option<f64>>,
}

/// Air-quality response (hourly US AQI).
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
pub struct AirQualityPayload {
    #[serde(default)]
    pub hourly: Option<AirQualityHourly>,
}

#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
pub struct AirQualityHourly {
    #[serde(default)]
    pub us_aqi: Vec<Option<f64>>,
}

/// Pollen response (hourly grass, tree, weed).
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
pub struct PollenPayload {
    #[serde(default)]
    pub hourly: Option<PollenHourly>,
}

#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
pub struct PollenHourly {
    #[serde(default)]
    pub grass_pollen: Vec<Option<f64>>,
    #[serde(default)]
    pub tree_pollen: Vec<Option<f64>>,
    #[serde(default)]
    pub weed_pollen: Vec<Option<f64>>,
}

/// Whatever subset of the three sources arrived.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct RawEnvironment {
    pub forecast: Option<ForecastPayload>,
    pub air_quality: Option<AirQualityPayload>,
    pub pollen: Option<PollenPayload>,
}

impl RawEnvironment {
    pub fn available_sources(&self) -> usize {
        [
            self.forecast.is_some(),
            self.air_quality.is_some(),
            self.pollen.is_some(),
        ]
        .iter()
        .filter(|present| **present)
        .count()
    }
}

/// Upstream source names, used in logs and errors.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Source {
    Forecast,
    AirQuality,
    Pollen,
}

impl std::fmt::Display for Source {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Forecast => write!(f, "forecast"),
            Self::AirQuality => write!(f, "air_quality"),
            Self::Pollen => write!(f, "pollen"),
        }
    }
}

/// Failure fetching or decoding one upstream source.
#[derive(Error, Debug)]
pub enum EnvironmentError {
    #[error("{source_name} service unreachable at {url}")]
    Connection { source_name: Source, url: String },

    #[error("{source_name} request timed out after {secs}s")]
    Timeout { source_name: Source, secs: u64 },

    #[error("{source_name} returned error (status {status}): {body}")]
    Status {
        source_name: Source,
        status: u16,
        body: String,
    },

    #[error("{source_name} response parsing error: {reason}")]
    Parse { source_name: Source, reason: String },

    #[error("HTTP client error: {0}")]
    HttpClient(String),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn forecast_tolerates_missing_blocks() {
        let payload: ForecastPayload = serde_json::from_str("{}").unwrap();
        assert!(payload.current.is_none());
        assert!(payload.daily.is_none());
    }

    #[test]
    fn daily_series_keeps_null_days() {
        let json = r#"{"daily":{"time":["2026-10-19","2026-10-20"],
            "apparent_temperature_max":[30.1,null],
            "apparent_temperature_min":[12.0,7.5]}}"#;
        let payload: ForecastPayload = serde_json::from_str(json).unwrap();
        let daily = payload.daily.unwrap();
        assert_eq!(daily.apparent_temperature_max, vec![Some(30.1), None]);
        assert!(daily.precipitation_sum.is_empty());
    }

    #[test]
    fn available_sources_counts_present() {
        let raw = RawEnvironment {
            forecast: Some(ForecastPayload::default()),
            air_quality: None,
            pollen: Some(PollenPayload::default()),
        };
        assert_eq!(raw.available_sources(), 2);
    }

    #[test]
    fn error_names_the_source() {
        let err = EnvironmentError::Status {
            source_name: Source::Pollen,
            status: 503,
            body: "busy".into(),
        };
        assert_eq!(err.to_string(), "pollen returned error (status 503): busy");
    }
}
