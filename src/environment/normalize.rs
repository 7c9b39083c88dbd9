//! Environmental context normalizer.
//!
//! Turns whatever subset of forecast, air-quality and pollen payloads arrived
//! into a [`WeatherContext`]. Missing sources degrade to `Unknown` or empty
//! series; nothing here fails.

use crate::models::{ExposureCategory, WeatherContext};

use super::types::{AirQualityPayload, ForecastPayload, PollenPayload, RawEnvironment};

pub const MIN_WINDOW_DAYS: u8 = 1;
pub const MAX_WINDOW_DAYS: u8 = 7;

/// US AQI at or above this is `High`.
pub const AQI_HIGH: f64 = 151.0;
/// US AQI at or above this is `Moderate`.
pub const AQI_MODERATE: f64 = 51.0;
/// Mean pollen score at or above this is `High`.
pub const POLLEN_HIGH: f64 = 80.0;
/// Mean pollen score at or above this is `Moderate`.
pub const POLLEN_MODERATE: f64 = 30.0;

/// Clamps a requested window into 1–7 days. Anything below 1 becomes 1.
pub fn clamp_window(days: i64) -> u8 {
    if days < MIN_WINDOW_DAYS as i64 {
        MIN_WINDOW_DAYS
    } else {
        days.min(MAX_WINDOW_DAYS as i64) as u8
    }
}

/// Number of hourly samples covered by a window.
pub fn window_hours(days: u8) -> usize {
    24 * days as usize
}

/// Arithmetic mean of the present samples within the first `limit` entries.
/// `None` when there are no samples.
pub fn windowed_mean(samples: &[Option<f64>], limit: usize) -> Option<f64> {
    let present: Vec<f64> = samples.iter().take(limit).flatten().copied().collect();
    if present.is_empty() {
        return None;
    }
    Some(present.iter().sum::<f64>() / present.len() as f64)
}

pub fn aqi_category(average: Option<f64>) -> ExposureCategory {
    match average {
        None => ExposureCategory::Unknown,
        Some(v) if v >= AQI_HIGH => ExposureCategory::High,
        Some(v) if v >= AQI_MODERATE => ExposureCategory::Moderate,
        Some(_) => ExposureCategory::Low,
    }
}

pub fn pollen_category(average: Option<f64>) -> ExposureCategory {
    match average {
        None => ExposureCategory::Unknown,
        Some(v) if v >= POLLEN_HIGH => ExposureCategory::High,
        Some(v) if v >= POLLEN_MODERATE => ExposureCategory::Moderate,
        Some(_) => ExposureCategory::Low,
    }
}

/// Mean AQI over the window.
pub fn average_aqi(payload: &AirQualityPayload, days: u8) -> Option<f64> {
    let hourly = payload.hourly.as_ref()?;
    windowed_mean(&hourly.us_aqi, window_hours(days))
}

/// Mean of the three pollen-type means over the window.
///
/// Each type is averaged on its own first. A type with no samples counts as
/// zero; if no type has samples the result is `None`.
pub fn average_pollen(payload: &PollenPayload, days: u8) -> Option<f64> {
    let hourly = payload.hourly.as_ref()?;
    let limit = window_hours(days);
    let per_type = [
        windowed_mean(&hourly.grass_pollen, limit),
        windowed_mean(&hourly.tree_pollen, limit),
        windowed_mean(&hourly.weed_pollen, limit),
    ];
    if per_type.iter().all(Option::is_none) {
        return None;
    }
    let total: f64 = per_type.iter().map(|m| m.unwrap_or(0.0)).sum();
    Some(total / per_type.len() as f64)
}

fn apply_forecast(ctx: &mut WeatherContext, forecast: &ForecastPayload) {
    if let Some(current) = &forecast.current {
        ctx.temperature = current.temperature_2m;
        ctx.apparent_temperature = current.apparent_temperature;
        ctx.humidity = current.relative_humidity_2m;
    }
    if let Some(daily) = &forecast.daily {
        ctx.daily_dates = daily.time.clone();
        ctx.daily_apparent_temp_max = daily.apparent_temperature_max.clone();
        ctx.daily_apparent_temp_min = daily.apparent_temperature_min.clone();
        ctx.daily_precipitation_sum = daily.precipitation_sum.clone();
    }
}

/// Build the weather context for a forecast window from any subset of sources.
pub fn normalize(raw: &RawEnvironment, days: u8) -> WeatherContext {
    let days = clamp_window(days as i64);
    let mut ctx = WeatherContext::unavailable(days);

    if let Some(forecast) = &raw.forecast {
        apply_forecast(&mut ctx, forecast);
    }

    let aqi = raw.air_quality.as_ref().and_then(|p| average_aqi(p, days));
    ctx.aqi = aqi.map(f64::round);
    ctx.aqi_category = aqi_category(aqi);

    let pollen = raw.pollen.as_ref().and_then(|p| average_pollen(p, days));
    ctx.pollen = pollen;
    ctx.pollen_category = pollen_category(pollen);

    tracing::debug!(
        days,
        sources = raw.available_sources(),
        aqi_category = %ctx.aqi_category,
        pollen_category = %ctx.pollen_category,
        forecast_days = ctx.daily_dates.len(),
        "Environmental context normalized"
    );

    ctx
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::environment::types::{
        AirQualityHourly, CurrentReading, DailySeries, PollenHourly,
    };

    fn aqi_payload(values: Vec<Option<f64>>) -> AirQualityPayload {
        AirQualityPayload {
            hourly: Some(AirQualityHourly { us_aqi: values }),
        }
    }

    fn pollen_payload(grass: f64, tree: f64, weed: f64, hours: usize) -> PollenPayload {
        PollenPayload {
            hourly: Some(PollenHourly {
                grass_pollen: vec![Some(grass); hours],
                tree_pollen: vec![Some(tree); hours],
                weed_pollen: vec![Some(weed); hours],
            }),
        }
    }

    #[test]
    fn window_clamps_to_range() {
        assert_eq!(clamp_window(0), 1);
        assert_eq!(clamp_window(-4), 1);
        assert_eq!(clamp_window(3), 3);
        assert_eq!(clamp_window(7), 7);
        assert_eq!(clamp_window(30), 7);
    }

    #[test]
    fn aqi_thresholds() {
        assert_eq!(aqi_category(Some(151.0)), ExposureCategory::High);
        assert_eq!(aqi_category(Some(150.9)), ExposureCategory::Moderate);
        assert_eq!(aqi_category(Some(51.0)), ExposureCategory::Moderate);
        assert_eq!(aqi_category(Some(50.0)), ExposureCategory::Low);
        assert_eq!(aqi_category(None), ExposureCategory::Unknown);
    }

    #[test]
    fn pollen_thresholds() {
        assert_eq!(pollen_category(Some(80.0)), ExposureCategory::High);
        assert_eq!(pollen_category(Some(30.0)), ExposureCategory::Moderate);
        assert_eq!(pollen_category(Some(29.9)), ExposureCategory::Low);
        assert_eq!(pollen_category(None), ExposureCategory::Unknown);
    }

    #[test]
    fn aqi_mean_only_covers_window() {
        // Day one averages 100; day two would push it over 151.
        let mut values = vec![Some(100.0); 24];
        values.extend(vec![Some(400.0); 24]);
        let payload = aqi_payload(values);
        assert_eq!(average_aqi(&payload, 1), Some(100.0));
        assert_eq!(average_aqi(&payload, 2), Some(250.0));
    }

    #[test]
    fn aqi_without_samples_is_unknown() {
        let raw = RawEnvironment {
            air_quality: Some(aqi_payload(vec![])),
            ..RawEnvironment::default()
        };
        let ctx = normalize(&raw, 1);
        assert_eq!(ctx.aqi, None);
        assert_eq!(ctx.aqi_category, ExposureCategory::Unknown);
    }

    #[test]
    fn aqi_skips_null_samples() {
        let payload = aqi_payload(vec![Some(60.0), None, Some(40.0)]);
        assert_eq!(average_aqi(&payload, 1), Some(50.0));
    }

    #[test]
    fn pollen_averages_type_means() {
        let payload = pollen_payload(90.0, 120.0, 30.0, 24);
        assert_eq!(average_pollen(&payload, 1), Some(80.0));
    }

    #[test]
    fn pollen_missing_type_counts_as_zero() {
        let payload = PollenPayload {
            hourly: Some(PollenHourly {
                grass_pollen: vec![Some(90.0); 24],
                tree_pollen: vec![],
                weed_pollen: vec![],
            }),
        };
        assert_eq!(average_pollen(&payload, 1), Some(30.0));
    }

    #[test]
    fn pollen_with_no_samples_is_none() {
        let payload = PollenPayload {
            hourly: Some(PollenHourly::default()),
        };
        assert_eq!(average_pollen(&payload, 2), None);
    }

    #[test]
    fn empty_environment_degrades_to_unknown() {
        let ctx = normalize(&RawEnvironment::default(), 3);
        assert_eq!(ctx, WeatherContext::unavailable(3));
    }

    #[test]
    fn window_above_seven_is_clamped() {
        let ctx = normalize(&RawEnvironment::default(), 12);
        assert_eq!(ctx.days, 7);
    }

    #[test]
    fn full_environment_normalizes() {
        let raw = RawEnvironment {
            forecast: Some(ForecastPayload {
                current: Some(CurrentReading {
                    temperature_2m: Some(18.2),
                    apparent_temperature: Some(16.9),
                    relative_humidity_2m: Some(71.0),
                }),
                daily: Some(DailySeries {
                    time: vec!["2026-10-19".into(), "2026-10-20".into()],
                    apparent_temperature_max: vec![Some(19.0), Some(33.5)],
                    apparent_temperature_min: vec![Some(10.0), Some(11.0)],
                    precipitation_sum: vec![Some(0.0), Some(1.4)],
                }),
            }),
            air_quality: Some(aqi_payload(vec![Some(160.4); 48])),
            pollen: Some(pollen_payload(10.0, 10.0, 10.0, 48)),
        };

        let ctx = normalize(&raw, 2);
        assert_eq!(ctx.days, 2);
        assert_eq!(ctx.temperature, Some(18.2));
        assert_eq!(ctx.humidity, Some(71.0));
        assert_eq!(ctx.aqi, Some(160.0));
        assert_eq!(ctx.aqi_category, ExposureCategory::High);
        assert_eq!(ctx.pollen_category, ExposureCategory::Low);
        assert_eq!(ctx.daily_dates.len(), 2);
        assert!(ctx.has_heat());
        assert!(!ctx.has_cold_air());
    }

    #[test]
    fn pollen_alone_still_normalizes() {
        let raw = RawEnvironment {
            pollen: Some(pollen_payload(100.0, 100.0, 100.0, 24)),
            ..RawEnvironment::default()
        };
        let ctx = normalize(&raw, 1);
        assert_eq!(ctx.pollen_category, ExposureCategory::High);
        assert_eq!(ctx.aqi_category, ExposureCategory::Unknown);
        assert!(ctx.daily_apparent_temp_max.is_empty());
    }
}
