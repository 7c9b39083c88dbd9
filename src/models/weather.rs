use serde::{Deserialize, Serialize};

use super::enums::{ExposureCategory, WeatherLink};

/// Apparent daily maximum at or above this counts as heat exposure (°C).
pub const HEAT_APPARENT_MAX_C: f64 = 32.0;
/// Apparent daily minimum at or below this counts as cold air (°C).
pub const COLD_APPARENT_MIN_C: f64 = 8.0;

/// Compact environmental context consumed by the condition scorer.
///
/// Daily series are aligned by index with `daily_dates`. Individual days may
/// be `None` when the upstream forecast had a gap.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct WeatherContext {
    /// Forecast window in days (1–7).
    pub days: u8,
    pub temperature: Option<f64>,
    pub apparent_temperature: Option<f64>,
    pub humidity: Option<f64>,
    /// Rounded mean US AQI over the window; `None` without samples.
    pub aqi: Option<f64>,
    pub aqi_category: ExposureCategory,
    pub pollen: Option<f64>,
    pub pollen_category: ExposureCategory,
    #[serde(default)]
    pub daily_dates: Vec<String>,
    #[serde(default)]
    pub daily_apparent_temp_max: Vec<Option<f64>>,
    #[serde(default)]
    pub daily_apparent_temp_min: Vec<Option<f64>>,
    #[serde(default)]
    pub daily_precipitation_sum: Vec<Option<f64>>,
}

/// One day of the forecast outlook.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DailyOutlook {
    pub date: String,
    pub apparent_min: Option<f64>,
    pub apparent_max: Option<f64>,
    pub precipitation_sum: Option<f64>,
}

impl WeatherContext {
    /// Context with every source missing.
    pub fn unavailable(days: u8) -> Self {
        Self {
            days,
            ..Self::default()
        }
    }

    pub fn has_heat(&self) -> bool {
        self.daily_apparent_temp_max
            .iter()
            .flatten()
            .any(|&v| v >= HEAT_APPARENT_MAX_C)
    }

    pub fn has_cold_air(&self) -> bool {
        self.daily_apparent_temp_min
            .iter()
            .flatten()
            .any(|&v| v <= COLD_APPARENT_MIN_C)
    }

    /// Whether the given environmental trigger is active in this context.
    pub fn link_active(&self, link: WeatherLink) -> bool {
        match link {
            WeatherLink::AqiHigh => self.aqi_category == ExposureCategory::High,
            WeatherLink::PollenHigh => self.pollen_category == ExposureCategory::High,
            WeatherLink::HeatHigh => self.has_heat(),
            WeatherLink::ColdAir => self.has_cold_air(),
        }
    }

    /// Per-day outlook, one entry per forecast date.
    pub fn daily_outlook(&self) -> Vec<DailyOutlook> {
        self.daily_dates
            .iter()
            .enumerate()
            .map(|(i, date)| DailyOutlook {
                date: date.clone(),
                apparent_min: self.daily_apparent_temp_min.get(i).copied().flatten(),
                apparent_max: self.daily_apparent_temp_max.get(i).copied().flatten(),
                precipitation_sum: self.daily_precipitation_sum.get(i).copied().flatten(),
            })
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn unavailable_has_no_active_links() {
        let ctx = WeatherContext::unavailable(3);
        assert_eq!(ctx.days, 3);
        assert_eq!(ctx.aqi_category, ExposureCategory::Unknown);
        for link in [
            WeatherLink::AqiHigh,
            WeatherLink::PollenHigh,
            WeatherLink::HeatHigh,
            WeatherLink::ColdAir,
        ] {
            assert!(!ctx.link_active(link));
        }
    }

    #[test]
    fn heat_and_cold_thresholds_are_inclusive() {
        let ctx = WeatherContext {
            daily_apparent_temp_max: vec![Some(31.9), Some(32.0)],
            daily_apparent_temp_min: vec![Some(8.0), Some(12.0)],
            ..WeatherContext::default()
        };
        assert!(ctx.has_heat());
        assert!(ctx.has_cold_air());
    }

    #[test]
    fn missing_days_never_trigger() {
        let ctx = WeatherContext {
            daily_apparent_temp_max: vec![None, Some(20.0)],
            daily_apparent_temp_min: vec![None, Some(15.0)],
            ..WeatherContext::default()
        };
        assert!(!ctx.has_heat());
        assert!(!ctx.has_cold_air());
    }

    #[test]
    fn outlook_zips_by_day_index() {
        let ctx = WeatherContext {
            daily_dates: vec!["2026-10-19".into(), "2026-10-20".into()],
            daily_apparent_temp_max: vec![Some(21.0), Some(24.5)],
            daily_apparent_temp_min: vec![Some(9.0)],
            daily_precipitation_sum: vec![Some(0.0), Some(3.2)],
            ..WeatherContext::default()
        };
        let outlook = ctx.daily_outlook();
        assert_eq!(outlook.len(), 2);
        assert_eq!(outlook[1].apparent_max, Some(24.5));
        assert_eq!(outlook[1].apparent_min, None);
        assert_eq!(outlook[1].precipitation_sum, Some(3.2));
    }
}
