//! Upstream environment fetches.
//!
//! Forecast, air quality and pollen are fetched as three independent requests.
//! Each one either yields its payload or degrades to absent; a failing source
//! never takes the others down with it.

use std::future::Future;
use std::time::Duration;

use serde::de::DeserializeOwned;

use crate::config::TriageConfig;
use crate::models::WeatherContext;

use super::normalize::{clamp_window, normalize, window_hours};
use super::types::{
    AirQualityPayload, Coordinates, EnvironmentError, ForecastPayload, PollenPayload,
    RawEnvironment, Source,
};

/// Seam for anything that can provide the three upstream payloads.
pub trait EnvironmentSource {
    fn forecast(
        &self,
        at: Coordinates,
        days: u8,
    ) -> impl Future<Output = Result<ForecastPayload, EnvironmentError>> + Send;

    fn air_quality(
        &self,
        at: Coordinates,
        days: u8,
    ) -> impl Future<Output = Result<AirQualityPayload, EnvironmentError>> + Send;

    fn pollen(
        &self,
        at: Coordinates,
        days: u8,
    ) -> impl Future<Output = Result<PollenPayload, EnvironmentError>> + Send;
}

fn settle<T>(source: Source, result: Result<T, EnvironmentError>) -> Option<T> {
    match result {
        Ok(payload) => Some(payload),
        Err(e) => {
            tracing::warn!(source = %source, error = %e, "Environment source degraded");
            None
        }
    }
}

/// Run all three fetches concurrently, isolating failures per source.
pub async fn gather<S: EnvironmentSource>(source: &S, at: Coordinates, days: u8) -> RawEnvironment {
    let days = clamp_window(days as i64);
    let (forecast, air_quality, pollen) = tokio::join!(
        source.forecast(at, days),
        source.air_quality(at, days),
        source.pollen(at, days),
    );

    RawEnvironment {
        forecast: settle(Source::Forecast, forecast),
        air_quality: settle(Source::AirQuality, air_quality),
        pollen: settle(Source::Pollen, pollen),
    }
}

/// Fetch and normalize in one step.
pub async fn load_weather_context<S: EnvironmentSource>(
    source: &S,
    at: Coordinates,
    days: u8,
) -> WeatherContext {
    let raw = gather(source, at, days).await;
    normalize(&raw, days)
}

// ═══════════════════════════════════════════════════════════
// Open-Meteo client
// ═══════════════════════════════════════════════════════════

/// HTTP client for the Open-Meteo forecast, air-quality and pollen APIs.
pub struct OpenMeteoClient {
    client: reqwest::Client,
    forecast_url: String,
    air_quality_url: String,
    pollen_url: String,
    timeout_secs: u64,
}

impl OpenMeteoClient {
    pub fn new(
        forecast_url: &str,
        air_quality_url: &str,
        pollen_url: &str,
        timeout_secs: u64,
    ) -> Result<Self, EnvironmentError> {
        let client = reqwest::Client::builder()
            .timeout(Duration::from_secs(timeout_secs))
            .build()
            .map_err(|e| EnvironmentError::HttpClient(e.to_string()))?;

        Ok(Self {
            client,
            forecast_url: forecast_url.trim_end_matches('/').to_string(),
            air_quality_url: air_quality_url.trim_end_matches('/').to_string(),
            pollen_url: pollen_url.trim_end_matches('/').to_string(),
            timeout_secs,
        })
    }

    pub fn from_config(config: &TriageConfig) -> Result<Self, EnvironmentError> {
        Self::new(
            &config.forecast_url,
            &config.air_quality_url,
            &config.pollen_url,
            config.http_timeout_secs,
        )
    }

    async fn get_json<T: DeserializeOwned>(
        &self,
        source: Source,
        url: &str,
        query: &[(&str, String)],
    ) -> Result<T, EnvironmentError> {
        let response = self
            .client
            .get(url)
            .query(query)
            .send()
            .await
            .map_err(|e| {
                if e.is_connect() {
                    EnvironmentError::Connection {
                        source_name: source,
                        url: url.to_string(),
                    }
                } else if e.is_timeout() {
                    EnvironmentError::Timeout {
                        source_name: source,
                        secs: self.timeout_secs,
                    }
                } else {
                    EnvironmentError::HttpClient(e.to_string())
                }
            })?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(EnvironmentError::Status {
                source_name: source,
                status: status.as_u16(),
                body,
            });
        }

        response.json::<T>().await.map_err(|e| EnvironmentError::Parse {
            source_name: source,
            reason: e.to_string(),
        })
    }
}

fn position(at: Coordinates) -> Vec<(&'static str, String)> {
    vec![
        ("latitude", at.latitude.to_string()),
        ("longitude", at.longitude.to_string()),
    ]
}

impl EnvironmentSource for OpenMeteoClient {
    async fn forecast(&self, at: Coordinates, days: u8) -> Result<ForecastPayload, EnvironmentError> {
        let mut query = position(at);
        query.push((
            "current",
            "temperature_2m,apparent_temperature,relative_humidity_2m".into(),
        ));
        query.push((
            "daily",
            "apparent_temperature_max,apparent_temperature_min,precipitation_sum".into(),
        ));
        query.push(("forecast_days", days.to_string()));
        self.get_json(Source::Forecast, &self.forecast_url, &query).await
    }

    async fn air_quality(
        &self,
        at: Coordinates,
        days: u8,
    ) -> Result<AirQualityPayload, EnvironmentError> {
        let mut query = position(at);
        query.push(("hourly", "us_aqi".into()));
        query.push(("forecast_hours", window_hours(days).to_string()));
        self.get_json(Source::AirQuality, &self.air_quality_url, &query)
            .await
    }

    async fn pollen(&self, at: Coordinates, days: u8) -> Result<PollenPayload, EnvironmentError> {
        let mut query = position(at);
        query.push(("hourly", "grass_pollen,tree_pollen,weed_pollen".into()));
        query.push(("forecast_days", days.to_string()));
        self.get_json(Source::Pollen, &self.pollen_url, &query).await
    }
}
